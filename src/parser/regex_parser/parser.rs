use crate::error_handling::Error::{
    NegationNotSupported, NonGreedyRepetitionNotSupported, NoneASCIICharacters,
    RegexParsingError, RepetitionTooLarge, UnsupportedAstBracketedKind, UnsupportedAstNodeType,
    UnsupportedClassSetType, UnsupportedGroupKindType,
};
use crate::error_handling::Result;
use crate::parser::ast_node::AstNode;
use regex_syntax::ast::{
    parse::Parser, Ast, ClassPerlKind, ClassSet, ClassSetItem, GroupKind, RepetitionKind,
    RepetitionRange,
};

// This is a wrapper of `regex_syntax::ast::parse::Parser`. The parsed `Ast` is lowered into
// an `AstNode`, desugaring everything the automata don't model directly.
pub struct RegexParser {
    m_parser: Parser,
}

impl RegexParser {
    // Upper bound on the number of nodes a counted repetition may expand into.
    const REPETITION_SIZE_LIMIT: usize = 10_000;

    pub fn new() -> RegexParser {
        Self {
            m_parser: Parser::new(),
        }
    }

    pub fn parse_into_ast(&mut self, pattern: &str) -> Result<Ast> {
        match self.m_parser.parse(pattern) {
            Ok(ast) => Ok(ast),
            Err(e) => Err(RegexParsingError(e)),
        }
    }

    pub fn parse_into_ast_node(&mut self, pattern: &str) -> Result<AstNode> {
        let ast = self.parse_into_ast(pattern)?;
        Self::lower(&ast)
    }

    fn lower(ast: &Ast) -> Result<AstNode> {
        match ast {
            Ast::Empty(_) => Ok(AstNode::EmptyString),
            Ast::Literal(literal) => Ok(AstNode::Literal(Self::ascii(literal.c)?)),
            Ast::Dot(_) => Ok(AstNode::AnyChar),
            Ast::Concat(concat) => {
                let mut node: Option<AstNode> = None;
                for child in &concat.asts {
                    let rhs = Self::lower(child)?;
                    node = Some(match node {
                        None => rhs,
                        Some(lhs) => AstNode::concat(lhs, rhs),
                    });
                }
                Ok(node.unwrap_or(AstNode::EmptyString))
            }
            Ast::Alternation(alternation) => {
                let mut node: Option<AstNode> = None;
                for child in &alternation.asts {
                    let rhs = Self::lower(child)?;
                    node = Some(match node {
                        None => rhs,
                        Some(lhs) => AstNode::union(lhs, rhs),
                    });
                }
                Ok(node.unwrap_or(AstNode::EmptyLanguage))
            }
            Ast::Group(group) => {
                if let GroupKind::NonCapturing(flags) = &group.kind {
                    if false == flags.items.is_empty() {
                        return Err(UnsupportedGroupKindType);
                    }
                }
                Self::lower(&group.ast)
            }
            Ast::Repetition(repetition) => {
                if false == repetition.greedy {
                    return Err(NonGreedyRepetitionNotSupported);
                }
                let node = Self::lower(&repetition.ast)?;
                match &repetition.op.kind {
                    RepetitionKind::ZeroOrOne => Ok(AstNode::optional(node)),
                    RepetitionKind::ZeroOrMore => Ok(AstNode::star(node)),
                    RepetitionKind::OneOrMore => Ok(AstNode::plus(node)),
                    RepetitionKind::Range(RepetitionRange::Exactly(n)) => {
                        Self::repeat(&node, *n, Some(*n))
                    }
                    RepetitionKind::Range(RepetitionRange::AtLeast(n)) => {
                        Self::repeat(&node, *n, None)
                    }
                    RepetitionKind::Range(RepetitionRange::Bounded(min, max)) => {
                        Self::repeat(&node, *min, Some(*max))
                    }
                }
            }
            Ast::ClassBracketed(bracketed) => {
                if bracketed.negated {
                    return Err(NegationNotSupported("bracketed class"));
                }
                match &bracketed.kind {
                    ClassSet::Item(item) => Self::lower_class_set_item(item),
                    ClassSet::BinaryOp(_) => Err(UnsupportedAstBracketedKind),
                }
            }
            Ast::ClassPerl(perl) => {
                if perl.negated {
                    return Err(NegationNotSupported("perl class"));
                }
                Ok(Self::lower_perl_class(&perl.kind))
            }
            Ast::ClassUnicode(_) => Err(UnsupportedAstNodeType("unicode class")),
            Ast::Assertion(_) => Err(UnsupportedAstNodeType("assertion")),
            Ast::Flags(_) => Err(UnsupportedAstNodeType("flags")),
        }
    }

    fn lower_class_set_item(item: &ClassSetItem) -> Result<AstNode> {
        match item {
            ClassSetItem::Empty(_) => Ok(AstNode::EmptyLanguage),
            ClassSetItem::Literal(literal) => Ok(AstNode::Literal(Self::ascii(literal.c)?)),
            ClassSetItem::Range(range) => {
                let start = Self::ascii(range.start.c)?;
                let end = Self::ascii(range.end.c)?;
                Ok(AstNode::union_of_literals(start..=end))
            }
            ClassSetItem::Perl(perl) => {
                if perl.negated {
                    return Err(NegationNotSupported("perl class"));
                }
                Ok(Self::lower_perl_class(&perl.kind))
            }
            ClassSetItem::Union(union) => {
                let mut node: Option<AstNode> = None;
                for child in &union.items {
                    let rhs = Self::lower_class_set_item(child)?;
                    node = Some(match node {
                        None => rhs,
                        Some(lhs) => AstNode::union(lhs, rhs),
                    });
                }
                Ok(node.unwrap_or(AstNode::EmptyLanguage))
            }
            ClassSetItem::Bracketed(bracketed) => {
                if bracketed.negated {
                    return Err(NegationNotSupported("bracketed class"));
                }
                match &bracketed.kind {
                    ClassSet::Item(item) => Self::lower_class_set_item(item),
                    ClassSet::BinaryOp(_) => Err(UnsupportedAstBracketedKind),
                }
            }
            ClassSetItem::Ascii(_) | ClassSetItem::Unicode(_) => Err(UnsupportedClassSetType),
        }
    }

    fn lower_perl_class(kind: &ClassPerlKind) -> AstNode {
        match kind {
            ClassPerlKind::Digit => AstNode::union_of_literals('0'..='9'),
            ClassPerlKind::Space => AstNode::union_of_literals([' ', '\t', '\n', '\r', '\x0B', '\x0C']),
            ClassPerlKind::Word => AstNode::union_of_literals(
                ('0'..='9')
                    .chain('A'..='Z')
                    .chain(std::iter::once('_'))
                    .chain('a'..='z'),
            ),
        }
    }

    // `min` copies followed by either a star (unbounded) or `max - min` nested optionals.
    fn repeat(node: &AstNode, min: u32, max: Option<u32>) -> Result<AstNode> {
        let copies = min as usize + max.map_or(1, |max| max.saturating_sub(min) as usize);
        if node.num_nodes().saturating_mul(copies) > Self::REPETITION_SIZE_LIMIT {
            return Err(RepetitionTooLarge(max.unwrap_or(min)));
        }

        let tail = match max {
            None => Some(AstNode::star(node.clone())),
            Some(max) if max <= min => None,
            Some(max) => {
                let mut optional_tail = AstNode::optional(node.clone());
                for _ in 1..(max - min) {
                    optional_tail =
                        AstNode::optional(AstNode::concat(node.clone(), optional_tail));
                }
                Some(optional_tail)
            }
        };

        Ok((0..min)
            .map(|_| node.clone())
            .chain(tail)
            .reduce(AstNode::concat)
            .unwrap_or(AstNode::EmptyString))
    }

    fn ascii(c: char) -> Result<char> {
        if false == c.is_ascii() {
            return Err(NoneASCIICharacters);
        }
        Ok(c)
    }
}

impl Default for RegexParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Error;
    use regex_syntax::ast;

    fn lit(c: char) -> AstNode {
        AstNode::Literal(c)
    }

    #[test]
    fn test_basic_parsing() {
        let mut parser = RegexParser::new();
        let parse_result = parser.parse_into_ast(r"[a-t\d]");
        assert!(parse_result.is_ok());
        let Ast::ClassBracketed(bracket_ast) = &parse_result.unwrap() else {
            panic!("Type mismatched")
        };
        let ast::ClassSet::Item(item) = &bracket_ast.kind else {
            panic!("Type mismatched")
        };
        let ast::ClassSetItem::Union(union) = &item else {
            panic!("Type mismatched")
        };
        let a_to_z_item = &union.items[0];
        let ast::ClassSetItem::Range(range) = &a_to_z_item else {
            panic!("Type mismatched")
        };
        assert_eq!(range.start.c, 'a');
        assert_eq!(range.end.c, 't');
    }

    #[test]
    fn test_lower_matches_basic_grammar() -> Result<()> {
        let mut parser = RegexParser::new();
        assert_eq!(
            parser.parse_into_ast_node("(a|b)*c")?,
            AstNode::concat(AstNode::star(AstNode::union(lit('a'), lit('b'))), lit('c'))
        );
        assert_eq!(
            parser.parse_into_ast_node("a+.?")?,
            AstNode::concat(AstNode::plus(lit('a')), AstNode::optional(AstNode::AnyChar))
        );
        assert_eq!(parser.parse_into_ast_node("")?, AstNode::EmptyString);
        Ok(())
    }

    #[test]
    fn test_lower_bracketed_class() -> Result<()> {
        let mut parser = RegexParser::new();
        assert_eq!(
            parser.parse_into_ast_node("[a-c]")?,
            AstNode::union_of_literals(['a', 'b', 'c'])
        );
        assert_eq!(
            parser.parse_into_ast_node("[xa-b]")?,
            AstNode::union(lit('x'), AstNode::union_of_literals(['a', 'b']))
        );
        Ok(())
    }

    #[test]
    fn test_lower_counted_repetition() -> Result<()> {
        let mut parser = RegexParser::new();
        assert_eq!(
            parser.parse_into_ast_node("a{2}")?,
            AstNode::concat(lit('a'), lit('a'))
        );
        assert_eq!(
            parser.parse_into_ast_node("a{1,}")?,
            AstNode::concat(lit('a'), AstNode::star(lit('a')))
        );
        assert_eq!(
            parser.parse_into_ast_node("a{0,2}")?,
            AstNode::optional(AstNode::concat(lit('a'), AstNode::optional(lit('a'))))
        );
        assert_eq!(parser.parse_into_ast_node("a{0}")?, AstNode::EmptyString);
        Ok(())
    }

    #[test]
    fn test_perl_classes_need_their_members_in_the_alphabet() -> Result<()> {
        let mut parser = RegexParser::new();
        let digit = parser.parse_into_ast_node(r"\d")?;
        assert!(matches!(
            crate::nfa::NFA::from_ast(&digit, &crate::alphabet::Alphabet::default()),
            Err(Error::SymbolOutsideAlphabet('0'))
        ));
        let digits = crate::alphabet::Alphabet::from_symbols("0123456789")?;
        assert!(crate::nfa::NFA::from_ast(&digit, &digits)?.accepts("7"));
        Ok(())
    }

    #[test]
    fn test_repetition_size_limit() -> Result<()> {
        let mut parser = RegexParser::new();
        assert_eq!(parser.parse_into_ast_node("a{10000}")?.num_nodes(), 19_999);
        assert!(matches!(
            parser.parse_into_ast_node("a{50000}"),
            Err(Error::RepetitionTooLarge(50000))
        ));
        assert!(matches!(
            parser.parse_into_ast_node("a{3,20000}"),
            Err(Error::RepetitionTooLarge(20000))
        ));
        // Nested counts multiply.
        assert!(matches!(
            parser.parse_into_ast_node("(a{200}){200}"),
            Err(Error::RepetitionTooLarge(200))
        ));
        Ok(())
    }

    #[test]
    fn test_unsupported_constructs() {
        let mut parser = RegexParser::new();
        assert!(matches!(
            parser.parse_into_ast_node("a*?"),
            Err(Error::NonGreedyRepetitionNotSupported)
        ));
        assert!(matches!(
            parser.parse_into_ast_node("[^a]"),
            Err(Error::NegationNotSupported(_))
        ));
        assert!(matches!(
            parser.parse_into_ast_node(r"\D"),
            Err(Error::NegationNotSupported(_))
        ));
        assert!(matches!(
            parser.parse_into_ast_node("^a"),
            Err(Error::UnsupportedAstNodeType("assertion"))
        ));
        assert!(matches!(
            parser.parse_into_ast_node("[a-z&&b]"),
            Err(Error::UnsupportedAstBracketedKind)
        ));
        assert!(matches!(
            parser.parse_into_ast_node("(?i:a)"),
            Err(Error::UnsupportedGroupKindType)
        ));
        assert!(matches!(
            parser.parse_into_ast_node("é"),
            Err(Error::NoneASCIICharacters)
        ));
        assert!(matches!(
            parser.parse_into_ast_node("(a"),
            Err(Error::RegexParsingError(_))
        ));
    }
}
