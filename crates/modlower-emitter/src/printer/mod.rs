//! JavaScript printer.
//!
//! Turns the tree produced by the System transform back into source text.
//! Formatting is fixed: four-space indentation, double-quoted strings,
//! non-empty object literals on multiple lines and function bodies always
//! broken over lines.
//!
//! ```ignore
//! let text = Printer::emit_to_string(&lowered.statement);
//! ```
//!
//! Parentheses are derived from operator precedence; the tree carries an
//! explicit [`Expr::Paren`](modlower_ast::Expr::Paren) only where a
//! transform asked for one.

use modlower_ast::{SourceFile, Stmt};

mod expressions;
mod statements;

/// A node the printer can write.
pub trait Emit {
    fn emit(&self, printer: &mut Printer);
}

/// Accumulates printed JavaScript.
#[derive(Debug)]
pub struct Printer {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    /// Print one node at indentation level zero.
    pub fn emit_to_string<T: Emit + ?Sized>(node: &T) -> String {
        let mut printer = Self::new();
        node.emit(&mut printer);
        printer.finish()
    }

    /// Print a statement list, one statement per line, each line ending in
    /// a newline.
    pub fn print_statements(statements: &[Stmt]) -> String {
        Self::emit_to_string(statements)
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write `s` as the body of a double-quoted string literal.
    pub(crate) fn write_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\0' => self.output.push_str("\\0"),
                '\u{2028}' => self.output.push_str("\\u2028"),
                '\u{2029}' => self.output.push_str("\\u2029"),
                c if (c as u32) < 0x20 || c == '\x7F' => {
                    self.output.push_str(&format!("\\u{:04X}", c as u32));
                }
                _ => self.output.push(c),
            }
        }
    }

    pub(crate) fn write_quoted(&mut self, s: &str) {
        self.write("\"");
        self.write_escaped(s);
        self.write("\"");
    }

    pub(crate) fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub(crate) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    pub(crate) const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(crate) const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Byte offset of the next write; paired with [`Printer::written_since`].
    pub(crate) const fn mark(&self) -> usize {
        self.output.len()
    }

    pub(crate) fn written_since(&self, mark: usize) -> &str {
        self.output.get(mark..).unwrap_or_default()
    }

    /// Wrap everything written since `mark` in parentheses.
    pub(crate) fn parenthesize_since(&mut self, mark: usize) {
        self.output.insert(mark, '(');
        self.output.push(')');
    }
}

impl Emit for [Stmt] {
    fn emit(&self, printer: &mut Printer) {
        printer.emit_statement_lines(self);
    }
}

impl Emit for Vec<Stmt> {
    fn emit(&self, printer: &mut Printer) {
        printer.emit_statement_lines(self);
    }
}

impl Emit for SourceFile {
    fn emit(&self, printer: &mut Printer) {
        printer.emit_statement_lines(&self.statements);
    }
}

#[cfg(test)]
#[path = "../../tests/printer.rs"]
mod tests;
