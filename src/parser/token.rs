use crate::error_handling::Error::UnexpectedToken;
use crate::error_handling::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Token {
    Literal(char), // Single alphanumeric character
    Dot,           // .
    Star,          // *
    Plus,          // +
    Optional,      // ?
    Union,         // |
    LParen,        // (
    RParen,        // )
}

impl Token {
    pub(crate) fn tokenize(regex: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for (pos, ch) in regex.chars().enumerate() {
            match ch {
                '.' => tokens.push(Token::Dot),
                '*' => tokens.push(Token::Star),
                '+' => tokens.push(Token::Plus),
                '?' => tokens.push(Token::Optional),
                '|' => tokens.push(Token::Union),
                '(' => tokens.push(Token::LParen),
                ')' => tokens.push(Token::RParen),
                _ if ch.is_ascii_alphanumeric() => tokens.push(Token::Literal(ch)),
                _ => return Err(UnexpectedToken(pos, ch)),
            }
        }
        Ok(tokens)
    }

    pub(crate) fn as_char(&self) -> char {
        match self {
            Token::Literal(c) => *c,
            Token::Dot => '.',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Optional => '?',
            Token::Union => '|',
            Token::LParen => '(',
            Token::RParen => ')',
        }
    }
}
