//! Crate root: wires together the compilation pipeline.
//!
//! - `source` splits a program into lines and collects `//` comments.
//! - `directive` decides what each line asks for.
//! - `tokenizer` splits one expression into words, groups and lambda literals.
//! - `parser` builds an expression tree, checking names against the `registry`.
//! - `codegen` lowers trees to JavaScript and assembles the program text.
//! - `compiler` drives all of the above for one compilation run.

pub mod codegen;
pub mod compiler;
pub mod directive;
pub mod error;
pub mod parser;
pub mod registry;
pub mod source;
pub mod tokenizer;

pub use compiler::Compiler;
pub use error::{CompileError, CompileResult, ErrorKind};

/// File extension expected on source programs.
pub const SOURCE_EXTENSION: &str = "lc";

/// Name of the file the CLI writes unless told otherwise.
pub const DEFAULT_OUTPUT: &str = "output.js";

/// Compile a whole program into JavaScript with a fresh registry.
pub fn transpile(program: &str) -> CompileResult<String> {
  Compiler::new().transpile(program)
}
