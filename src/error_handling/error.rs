use regex_syntax::ast;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    RegexParsingError(ast::Error),
    YamlParsingError(serde_yaml::Error),
    IOError(std::io::Error),
    UnexpectedToken(usize, char),
    UnexpectedEndOfPattern,
    UnbalancedParenthesis(usize),
    NestLimitExceeded(usize),
    SymbolOutsideAlphabet(char),
    UnsupportedAstNodeType(&'static str),
    NoneASCIICharacters,
    NegationNotSupported(&'static str),
    NonGreedyRepetitionNotSupported,
    RepetitionTooLarge(u32),
    UnsupportedAstBracketedKind,
    UnsupportedClassSetType,
    UnsupportedGroupKindType,
    MissingSchemaKey(&'static str),
    UnknownSyntax(String),
    InvalidSchema,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RegexParsingError(e) => write!(f, "regex parsing error: {}", e),
            Error::YamlParsingError(e) => write!(f, "yaml parsing error: {}", e),
            Error::IOError(e) => write!(f, "io error: {}", e),
            Error::UnexpectedToken(pos, c) => {
                write!(f, "unexpected token {:?} at position {}", c, pos)
            }
            Error::UnexpectedEndOfPattern => write!(f, "unexpected end of pattern"),
            Error::UnbalancedParenthesis(pos) => {
                write!(f, "unbalanced parenthesis at position {}", pos)
            }
            Error::NestLimitExceeded(pos) => {
                write!(f, "parentheses nested too deeply at position {}", pos)
            }
            Error::SymbolOutsideAlphabet(c) => {
                write!(f, "symbol {:?} is not in the alphabet", c)
            }
            Error::UnsupportedAstNodeType(kind) => write!(f, "unsupported regex construct: {}", kind),
            Error::NoneASCIICharacters => write!(f, "only ASCII characters are supported"),
            Error::NegationNotSupported(kind) => write!(f, "negation is not supported: {}", kind),
            Error::NonGreedyRepetitionNotSupported => {
                write!(f, "non-greedy repetition is not supported")
            }
            Error::RepetitionTooLarge(count) => {
                write!(f, "repetition of {} copies exceeds the size limit", count)
            }
            Error::UnsupportedAstBracketedKind => {
                write!(f, "binary operations in bracketed classes are not supported")
            }
            Error::UnsupportedClassSetType => write!(f, "unsupported class set item"),
            Error::UnsupportedGroupKindType => write!(f, "unsupported group kind"),
            Error::MissingSchemaKey(key) => write!(f, "missing schema key: {}", key),
            Error::UnknownSyntax(syntax) => write!(f, "unknown syntax: {}", syntax),
            Error::InvalidSchema => write!(f, "invalid schema"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::RegexParsingError(e) => Some(e),
            Error::YamlParsingError(e) => Some(e),
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
