use super::ast_node::AstNode;
use super::token::Token;
use crate::error_handling::Error::{
    NestLimitExceeded, UnbalancedParenthesis, UnexpectedEndOfPattern, UnexpectedToken,
};
use crate::error_handling::Result;

// Recursive-descent parser for the basic grammar:
//   union   := concat ('|' concat)*
//   concat  := unary*
//   unary   := primary ('*' | '+' | '?')*
//   primary := literal | '.' | '(' union ')'
// An empty concat denotes the empty string.
pub struct ParserStream {
    tokens: Vec<Token>,
    pos: usize,   // Current position in the token stream
    depth: usize, // Number of currently open parentheses
}

impl ParserStream {
    pub fn new(regex: &str) -> Result<Self> {
        let tokens = Token::tokenize(regex)?;
        Ok(ParserStream {
            tokens,
            pos: 0,
            depth: 0,
        })
    }

    pub fn parse(regex: &str) -> Result<AstNode> {
        ParserStream::new(regex)?.parse_regex()
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    #[cfg(test)]
    fn get_token(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }
}

impl ParserStream {
    // Same default as `regex_syntax::ast::parse::ParserBuilder::nest_limit`
    const NEST_LIMIT: usize = 250;

    pub fn parse_regex(&mut self) -> Result<AstNode> {
        let node = self.parse_union()?;
        match self.peek() {
            None => Ok(node),
            Some(Token::RParen) => Err(UnbalancedParenthesis(self.pos)),
            Some(token) => Err(UnexpectedToken(self.pos, token.as_char())),
        }
    }

    fn parse_union(&mut self) -> Result<AstNode> {
        let mut node = self.parse_concat()?;
        while let Some(Token::Union) = self.peek() {
            self.next();
            let rhs = self.parse_concat()?;
            node = AstNode::union(node, rhs);
        }
        Ok(node)
    }

    fn parse_concat(&mut self) -> Result<AstNode> {
        let mut node: Option<AstNode> = None;
        while let Some(Token::Literal(_) | Token::Dot | Token::LParen) = self.peek() {
            let rhs = self.parse_unary()?;
            node = Some(match node {
                None => rhs,
                Some(lhs) => AstNode::concat(lhs, rhs),
            });
        }
        Ok(node.unwrap_or(AstNode::EmptyString))
    }

    fn parse_unary(&mut self) -> Result<AstNode> {
        let mut node = self.parse_primary()?;
        loop {
            node = match self.peek() {
                Some(Token::Star) => AstNode::star(node),
                Some(Token::Plus) => AstNode::plus(node),
                Some(Token::Optional) => AstNode::optional(node),
                _ => return Ok(node),
            };
            self.next();
        }
    }

    fn parse_primary(&mut self) -> Result<AstNode> {
        let start = self.pos;
        match self.next() {
            Some(Token::Literal(c)) => Ok(AstNode::Literal(c)),
            Some(Token::Dot) => Ok(AstNode::AnyChar),
            Some(Token::LParen) => {
                if self.depth == Self::NEST_LIMIT {
                    return Err(NestLimitExceeded(start));
                }
                self.depth += 1;
                let node = self.parse_union()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(node),
                    Some(token) => Err(UnexpectedToken(self.pos - 1, token.as_char())),
                    None => Err(UnexpectedEndOfPattern),
                }
            }
            Some(token) => Err(UnexpectedToken(start, token.as_char())),
            None => Err(UnexpectedEndOfPattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Error;

    fn lit(c: char) -> AstNode {
        AstNode::Literal(c)
    }

    #[test]
    fn test_basic_tokenization() -> Result<()> {
        let p = ParserStream::new("a|(b*)c?de+f.")?;
        assert!(p.get_token(0) == Some(&Token::Literal('a')));
        assert!(p.get_token(1) == Some(&Token::Union));
        assert!(p.get_token(2) == Some(&Token::LParen));
        assert!(p.get_token(3) == Some(&Token::Literal('b')));
        assert!(p.get_token(4) == Some(&Token::Star));
        assert!(p.get_token(5) == Some(&Token::RParen));
        assert!(p.get_token(6) == Some(&Token::Literal('c')));
        assert!(p.get_token(7) == Some(&Token::Optional));
        assert!(p.get_token(8) == Some(&Token::Literal('d')));
        assert!(p.get_token(9) == Some(&Token::Literal('e')));
        assert!(p.get_token(10) == Some(&Token::Plus));
        assert!(p.get_token(11) == Some(&Token::Literal('f')));
        assert!(p.get_token(12) == Some(&Token::Dot));
        assert!(p.get_token(13).is_none());
        Ok(())
    }

    #[test]
    fn test_single_literal() -> Result<()> {
        assert_eq!(ParserStream::parse("a")?, lit('a'));
        Ok(())
    }

    #[test]
    fn test_concat_is_left_associative() -> Result<()> {
        assert_eq!(
            ParserStream::parse("abc")?,
            AstNode::concat(AstNode::concat(lit('a'), lit('b')), lit('c'))
        );
        Ok(())
    }

    #[test]
    fn test_precedence() -> Result<()> {
        assert_eq!(
            ParserStream::parse("(a|b)*c")?,
            AstNode::concat(AstNode::star(AstNode::union(lit('a'), lit('b'))), lit('c'))
        );
        assert_eq!(
            ParserStream::parse("ab|c")?,
            AstNode::union(AstNode::concat(lit('a'), lit('b')), lit('c'))
        );
        assert_eq!(
            ParserStream::parse("ab*")?,
            AstNode::concat(lit('a'), AstNode::star(lit('b')))
        );
        Ok(())
    }

    #[test]
    fn test_chained_postfix_operators() -> Result<()> {
        assert_eq!(
            ParserStream::parse("a*+?")?,
            AstNode::optional(AstNode::plus(AstNode::star(lit('a'))))
        );
        Ok(())
    }

    #[test]
    fn test_wildcard_and_digits() -> Result<()> {
        assert_eq!(
            ParserStream::parse(".1")?,
            AstNode::concat(AstNode::AnyChar, lit('1'))
        );
        Ok(())
    }

    #[test]
    fn test_empty_alternatives() -> Result<()> {
        assert_eq!(ParserStream::parse("")?, AstNode::EmptyString);
        assert_eq!(ParserStream::parse("()")?, AstNode::EmptyString);
        assert_eq!(
            ParserStream::parse("a|")?,
            AstNode::union(lit('a'), AstNode::EmptyString)
        );
        Ok(())
    }

    #[test]
    fn test_long_pattern() -> Result<()> {
        let ast = ParserStream::parse(&"ab".repeat(50_000))?;
        let AstNode::Concat(_, last) = &ast else {
            panic!("Type mismatched")
        };
        assert_eq!(**last, lit('b'));
        Ok(())
    }

    #[test]
    fn test_nest_limit() -> Result<()> {
        let depth = ParserStream::NEST_LIMIT;
        let nested = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(ParserStream::parse(&nested)?, lit('a'));

        let too_deep = format!("({}", nested);
        assert!(matches!(
            ParserStream::parse(&too_deep),
            Err(Error::NestLimitExceeded(250))
        ));
        Ok(())
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            ParserStream::parse("*a"),
            Err(Error::UnexpectedToken(0, '*'))
        ));
        assert!(matches!(
            ParserStream::parse("a)"),
            Err(Error::UnbalancedParenthesis(1))
        ));
        assert!(matches!(
            ParserStream::parse("(ab"),
            Err(Error::UnexpectedEndOfPattern)
        ));
        assert!(matches!(
            ParserStream::parse("a-b"),
            Err(Error::UnexpectedToken(1, '-'))
        ));
        assert!(matches!(
            ParserStream::parse("a|*"),
            Err(Error::UnexpectedToken(2, '*'))
        ));
    }
}
