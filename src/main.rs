use clap::Parser;
use lambdac::{CompileError, Compiler, DEFAULT_OUTPUT, SOURCE_EXTENSION};
use log::info;
use snafu::{OptionExt, ResultExt, Snafu, ensure};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{self, Command};

#[derive(Parser)]
#[command(name = "lambdac")]
#[command(about = "Compile lambda calculus programs into JavaScript", long_about = None)]
struct Cli {
  /// Source program (.lc)
  #[arg(value_name = "FILE")]
  input: PathBuf,

  /// Where to write the generated JavaScript
  #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
  output: PathBuf,

  /// Do not echo the generated JavaScript
  #[arg(short, long)]
  quiet: bool,

  /// Execute the generated file after compiling it
  #[arg(long)]
  run: bool,

  /// Command used by --run; the output path is appended
  #[arg(long, env = "LAMBDAC_RUNTIME", default_value = "deno run")]
  runtime: String,
}

#[derive(Debug, Snafu)]
enum CliError {
  #[snafu(display("file must have a .{} extension: {}", SOURCE_EXTENSION, path.display()))]
  Extension { path: PathBuf },

  #[snafu(display("failed to read {}: {source}", path.display()))]
  Read { path: PathBuf, source: io::Error },

  #[snafu(display("failed to write {}: {source}", path.display()))]
  Write { path: PathBuf, source: io::Error },

  #[snafu(display("{source}"))]
  Compile { source: CompileError },

  #[snafu(display("runtime command is empty"))]
  EmptyRuntime,

  #[snafu(display("failed to launch {runtime}: {source}"))]
  Launch { runtime: String, source: io::Error },
}

fn main() {
  env_logger::init();
  let cli = Cli::parse();

  match run(&cli) {
    Ok(code) => process::exit(code),
    Err(err) => {
      eprintln!("Error: {err}");
      process::exit(1);
    }
  }
}

/// Compile, write, optionally execute. Returns the process exit code.
fn run(cli: &Cli) -> Result<i32, CliError> {
  ensure!(
    has_source_extension(&cli.input),
    ExtensionSnafu {
      path: cli.input.clone()
    }
  );

  let program = fs::read_to_string(&cli.input).context(ReadSnafu {
    path: cli.input.clone(),
  })?;
  let js = Compiler::new().transpile(&program).context(CompileSnafu)?;

  fs::write(&cli.output, &js).context(WriteSnafu {
    path: cli.output.clone(),
  })?;
  info!("transpiled {} to {}", cli.input.display(), cli.output.display());

  if !cli.quiet {
    print!("{js}");
  }

  if cli.run {
    return execute(&cli.runtime, &cli.output);
  }
  Ok(0)
}

fn has_source_extension(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext == SOURCE_EXTENSION)
}

fn execute(runtime: &str, script: &Path) -> Result<i32, CliError> {
  let mut parts = runtime.split_whitespace();
  let program = parts.next().context(EmptyRuntimeSnafu)?;
  info!("running {} with {runtime}", script.display());

  let status = Command::new(program)
    .args(parts)
    .arg(script)
    .status()
    .context(LaunchSnafu { runtime })?;
  Ok(status.code().unwrap_or(1))
}
