//! Sprout parser: converts a token stream into an AST.
//!
//! [`parse_source`] is the whole tree-builder pipeline: lex, then parse.
//! On any failure the caller receives a single syntax error carrying the
//! diagnostic; no partial tree is ever produced.

mod parse_expr;
mod parse_stmt;
mod parser;

pub use parser::Parser;

use sprout_lexer::Lexer;
use sprout_types::ast::Program;
use sprout_types::SourceFile;

/// Parse a source file into a [`Program`].
pub fn parse_source(source_file: &SourceFile) -> sprout_types::Result<Program> {
    let tokens = Lexer::new(source_file).lex()?;
    Parser::new(tokens, source_file).parse()
}
