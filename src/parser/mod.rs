pub mod ast_node;
mod parser;
pub(crate) mod regex_parser;
mod schema_parser;
mod token;

pub use ast_node::AstNode;
pub use parser::ParserStream;
pub use regex_parser::parser::RegexParser;
pub use schema_parser::parser::PatternSchema;
pub use schema_parser::parser::SchemaConfig;

use crate::error_handling::Error::UnknownSyntax;
use crate::error_handling::Result;

/// Which front-end turns pattern text into an `AstNode`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Syntax {
    /// Alphanumeric literals, `.`, postfix `*`/`+`/`?`, `|` and parentheses.
    #[default]
    Basic,
    /// The `regex_syntax` grammar, lowered into the same node kinds.
    ///
    /// `\d`, `\w` and `\s` lower to every ASCII member of the class, independent of the
    /// alphabet. Building an NFA over an alphabet that lacks a member fails with
    /// `SymbolOutsideAlphabet`, so `\d` over the default lowercase alphabet fails on `'0'`.
    Extended,
}

impl Syntax {
    pub fn from_name(name: &str) -> Result<Syntax> {
        match name {
            "basic" => Ok(Syntax::Basic),
            "extended" => Ok(Syntax::Extended),
            _ => Err(UnknownSyntax(name.to_string())),
        }
    }
}

pub fn parse_pattern(pattern: &str, syntax: Syntax) -> Result<AstNode> {
    match syntax {
        Syntax::Basic => ParserStream::parse(pattern),
        Syntax::Extended => RegexParser::new().parse_into_ast_node(pattern),
    }
}
