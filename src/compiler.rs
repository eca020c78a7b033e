//! Directive dispatch: one `Compiler` owns the registry for a compilation run
//! and turns source lines into output lines, strictly in file order.

use chrono::{Local, NaiveDate};
use log::{debug, trace};
use snafu::{ResultExt, ensure};

use crate::codegen::{self, OutputLine, Program};
use crate::directive::Directive;
use crate::error::{CompileResult, InvalidDefinitionNameSnafu, LineSnafu};
use crate::parser::Parser;
use crate::registry::Registry;
use crate::source::split_lines;

#[derive(Debug, Clone)]
pub struct Compiler {
  registry: Registry,
  compiled_on: NaiveDate,
}

impl Default for Compiler {
  fn default() -> Self {
    Self::new()
  }
}

impl Compiler {
  /// A compiler stamping today's local date into the header.
  pub fn new() -> Self {
    Self::dated(Local::now().date_naive())
  }

  pub fn dated(compiled_on: NaiveDate) -> Self {
    Self {
      registry: Registry::new(),
      compiled_on,
    }
  }

  pub fn registry(&self) -> &Registry {
    &self.registry
  }

  /// Compile one expression against the combinations defined so far.
  pub fn compile_expression(&self, text: &str) -> CompileResult<String> {
    let expr = Parser::new(&self.registry).parse_expression(text)?;
    Ok(codegen::generate(&expr))
  }

  /// Compile a whole program. The first failing line aborts the run.
  pub fn transpile(&mut self, program: &str) -> CompileResult<String> {
    let mut output = Program::new(self.compiled_on);

    for line in split_lines(program) {
      for comment in &line.comments {
        output.push(OutputLine::Comment((*comment).to_string()));
      }
      trace!("line {}: {:?}", line.number, line.text);
      let directive = Directive::parse(line.text);
      if let Some(compiled) = self
        .compile_directive(directive)
        .context(LineSnafu { line: line.number })?
      {
        output.push(compiled);
      }
    }

    debug!(
      "compiled {} output lines, {} combinations",
      output.lines().len(),
      self.registry.len()
    );
    Ok(output.render())
  }

  pub fn compile_directive(&mut self, directive: Directive<'_>) -> CompileResult<Option<OutputLine>> {
    let line = match directive {
      Directive::Define { name, expr } => self.define(name, expr)?,
      Directive::PrintNumber(expr) => self.print_number(expr)?,
      Directive::PrintBoolean(expr) => self.print_boolean(expr)?,
      Directive::PrintLabel(text) => print_label(text),
      Directive::PrintSource(expr) => self.print_source(expr)?,
      Directive::Bare(expr) => self.bare(expr)?,
      Directive::Blank => return Ok(None),
    };
    Ok(Some(line))
  }

  /// `Name := expr`. The name is checked before the body is compiled.
  pub fn define(&mut self, name: &str, expr: &str) -> CompileResult<OutputLine> {
    ensure!(
      name.starts_with(|c: char| c.is_ascii_uppercase()),
      InvalidDefinitionNameSnafu { name }
    );
    let body = self.compile_expression(expr)?;
    let statement = format!("const {name} = {body};");
    if self.registry.define(name, body).is_some() {
      debug!("redefined combination {name}");
    } else {
      debug!("defined combination {name}");
    }
    Ok(OutputLine::Definition(statement))
  }

  pub fn print_number(&self, expr: &str) -> CompileResult<OutputLine> {
    let js = self.compile_expression(expr)?;
    Ok(OutputLine::Statement(format!("console.log(toNumber({js}));")))
  }

  pub fn print_boolean(&self, expr: &str) -> CompileResult<OutputLine> {
    let js = self.compile_expression(expr)?;
    Ok(OutputLine::Statement(format!("console.log(toBoolean({js}));")))
  }

  pub fn print_source(&self, expr: &str) -> CompileResult<OutputLine> {
    let js = self.compile_expression(expr)?;
    Ok(OutputLine::Statement(format!("console.log(({js}).toString());")))
  }

  pub fn bare(&self, expr: &str) -> CompileResult<OutputLine> {
    let js = self.compile_expression(expr)?;
    Ok(OutputLine::Statement(format!("{js};")))
  }
}

fn print_label(text: &str) -> OutputLine {
  let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
  OutputLine::Statement(format!("console.log(\"%c{escaped}\", \"color: blue\");"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::codegen::{TO_BOOLEAN_HELPER, TO_NUMBER_HELPER};
  use crate::error::ErrorKind;
  use pretty_assertions::assert_eq;

  fn compiler() -> Compiler {
    Compiler::dated(NaiveDate::from_ymd_opt(2025, 2, 24).unwrap())
  }

  #[test]
  fn definitions_reference_earlier_definitions() {
    let mut compiler = compiler();
    let js = compiler
      .transpile("Zero := $fa.a\nSucc := $nfa.f (n f a)\nOne := Succ Zero\n")
      .unwrap();
    assert!(js.contains("const Zero = (f) => (a) => a;"));
    assert!(js.contains("const Succ = (n) => (f) => (a) => f(n(f)(a));"));
    assert!(js.contains("const One = Succ(Zero);"));
    assert_eq!(compiler.registry().get("One"), Some("Succ(Zero)"));
  }

  #[test]
  fn forward_references_are_rejected() {
    let err = compiler().transpile("One := Succ Zero\nZero := $fa.a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownIdentifier);
    assert_eq!(err.line(), Some(1));
  }

  #[test]
  fn lowercase_definition_fails_before_compiling() {
    let mut compiler = compiler();
    // The right-hand side would fail too; the name check must win.
    let err = compiler.transpile("zero := Nope").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDefinitionName);
    assert!(err.to_string().contains("must start with a capital letter"));
    assert!(compiler.registry().is_empty());
  }

  #[test]
  fn redefinition_is_allowed() {
    let mut compiler = compiler();
    let js = compiler.transpile("Id := $a.a\nId := $b.b\n#Id").unwrap();
    assert!(js.contains("const Id = (b) => b;"));
    assert_eq!(compiler.registry().len(), 1);
  }

  #[test]
  fn print_directives() {
    let mut compiler = compiler();
    let js = compiler
      .transpile("True := $ab.a\nOne := $fa.f a\n#One\n?True\n!One\n@hello \"world\"\nTrue One")
      .unwrap();
    assert!(js.contains("console.log(toNumber(One));"));
    assert!(js.contains("console.log(toBoolean(True));"));
    assert!(js.contains("console.log((One).toString());"));
    assert!(js.contains(r#"console.log("%chello \"world\"", "color: blue");"#));
    assert!(js.contains("\nTrue(One);\n"));
  }

  #[test]
  fn empty_print_payload_fails() {
    let err = compiler().transpile("#").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyExpression);
  }

  #[test]
  fn syntax_errors_carry_line_numbers() {
    let err = compiler().transpile("Zero := $fa.a\n\nTwo := $fa.f (f a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().starts_with("line 3: "));
  }

  #[test]
  fn full_program_layout() {
    let program = "\
// numbers
Zero := $fa.a
One := $fa.f a
#Zero
// the successor
Succ := $nfa.f (n f a)
#Succ One
";
    let expected = format!(
      "// Compiled on February 24, 2025 from λ calculus
// numbers
const Zero = (f) => (a) => a;
const One = (f) => (a) => f(a);
{TO_NUMBER_HELPER}
{TO_BOOLEAN_HELPER}
console.log(toNumber(Zero));
// the successor
const Succ = (n) => (f) => (a) => f(n(f)(a));
console.log(toNumber(Succ(One)));
"
    );
    assert_eq!(compiler().transpile(program).unwrap(), expected);
  }

  #[test]
  fn recursive_definitions_through_z() {
    let program = "\
Idiot := $a.a
Add := $nk.n Idiot k
Sub := $nk.k Idiot n
Pred := $n.n
Z := $f.($x.f ($y.x x y)) ($x.f ($y.x x y))
Pseudo := $fmn.IsZero (Sub n m) ($x.m) ($x.Add n (f m (Pred n))) Idiot
SumRange := Z Pseudo
";
    let js = compiler().transpile(program).unwrap();
    assert!(js.contains("const Z = (f) => ((x) => f((y) => x(x)(y)))((x) => f((y) => x(x)(y)));"));
    assert!(js.contains(
      "const Pseudo = (f) => (m) => (n) => \
       IsZero(Sub(n)(m))((x) => m)((x) => Add(n)(f(m)(Pred(n))))(Idiot);"
    ));
    assert!(js.contains("const SumRange = Z(Pseudo);"));
  }

  #[test]
  fn independent_compilers_do_not_share_definitions() {
    let mut first = compiler();
    first.transpile("Zero := $fa.a").unwrap();
    let second = compiler();
    assert!(second.compile_expression("Zero").is_err());
  }
}
