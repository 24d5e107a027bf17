#[derive(Clone, Eq)]
pub enum AstNode {
    EmptyLanguage,                      // Matches nothing, not even ""
    EmptyString,                        // Matches only ""
    Literal(char),                      // Single character literal
    Concat(Box<AstNode>, Box<AstNode>), // Concatenation of two expressions
    Union(Box<AstNode>, Box<AstNode>),  // Union of two expressions
    Star(Box<AstNode>),                 // Kleene Star (zero or more)
    Plus(Box<AstNode>),                 // One or more
    Optional(Box<AstNode>),             // Zero or one (optional)
    AnyChar,                            // Any symbol of the alphabet
}

impl AstNode {
    pub fn concat(left: AstNode, right: AstNode) -> AstNode {
        AstNode::Concat(Box::new(left), Box::new(right))
    }

    pub fn union(left: AstNode, right: AstNode) -> AstNode {
        AstNode::Union(Box::new(left), Box::new(right))
    }

    pub fn star(node: AstNode) -> AstNode {
        AstNode::Star(Box::new(node))
    }

    pub fn plus(node: AstNode) -> AstNode {
        AstNode::Plus(Box::new(node))
    }

    pub fn optional(node: AstNode) -> AstNode {
        AstNode::Optional(Box::new(node))
    }

    // Union over the given symbols; no symbols at all is the empty language.
    pub fn union_of_literals(symbols: impl IntoIterator<Item = char>) -> AstNode {
        symbols
            .into_iter()
            .map(AstNode::Literal)
            .reduce(AstNode::union)
            .unwrap_or(AstNode::EmptyLanguage)
    }

    pub fn num_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&AstNode> = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            match node {
                AstNode::Concat(left, right) | AstNode::Union(left, right) => {
                    stack.push(left);
                    stack.push(right);
                }
                AstNode::Star(inner) | AstNode::Plus(inner) | AstNode::Optional(inner) => {
                    stack.push(inner)
                }
                _ => {}
            }
        }
        count
    }

    fn has_children(&self) -> bool {
        match self {
            AstNode::EmptyLanguage
            | AstNode::EmptyString
            | AstNode::Literal(_)
            | AstNode::AnyChar => false,
            _ => true,
        }
    }

    // Moves every child that has children of its own onto `stack`, leaving a leaf behind.
    fn detach_children(&mut self, stack: &mut Vec<Box<AstNode>>) {
        match self {
            AstNode::Concat(left, right) | AstNode::Union(left, right) => {
                for child in [left, right] {
                    if child.has_children() {
                        stack.push(std::mem::replace(child, Box::new(AstNode::EmptyString)));
                    }
                }
            }
            AstNode::Star(inner) | AstNode::Plus(inner) | AstNode::Optional(inner) => {
                if inner.has_children() {
                    stack.push(std::mem::replace(inner, Box::new(AstNode::EmptyString)));
                }
            }
            _ => {}
        }
    }
}

// Parsers build left-deep chains whose depth grows with the pattern length, so dropping and
// comparing walk the tree with an explicit stack.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut stack: Vec<Box<AstNode>> = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}

impl PartialEq for AstNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack: Vec<(&AstNode, &AstNode)> = vec![(self, other)];
        while let Some(pair) = stack.pop() {
            match pair {
                (AstNode::EmptyLanguage, AstNode::EmptyLanguage)
                | (AstNode::EmptyString, AstNode::EmptyString)
                | (AstNode::AnyChar, AstNode::AnyChar) => {}
                (AstNode::Literal(l1), AstNode::Literal(l2)) if l1 == l2 => {}
                (AstNode::Concat(l1, r1), AstNode::Concat(l2, r2))
                | (AstNode::Union(l1, r1), AstNode::Union(l2, r2)) => {
                    stack.push((&**l1, &**l2));
                    stack.push((&**r1, &**r2));
                }
                (AstNode::Star(e1), AstNode::Star(e2))
                | (AstNode::Plus(e1), AstNode::Plus(e2))
                | (AstNode::Optional(e1), AstNode::Optional(e2)) => stack.push((&**e1, &**e2)),
                _ => return false,
            }
        }
        true
    }
}

impl std::fmt::Debug for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AstNode::EmptyLanguage => write!(f, "EmptyLanguage"),
            AstNode::EmptyString => write!(f, "EmptyString"),
            AstNode::Literal(c) => write!(f, "Literal({:?})", c),
            AstNode::Concat(left, right) => write!(f, "Concat({:?}, {:?})", left, right),
            AstNode::Union(left, right) => write!(f, "Union({:?}, {:?})", left, right),
            AstNode::Star(node) => write!(f, "Star({:?})", node),
            AstNode::Plus(node) => write!(f, "Plus({:?})", node),
            AstNode::Optional(node) => write!(f, "Optional({:?})", node),
            AstNode::AnyChar => write!(f, "AnyChar"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_format() {
        let node = AstNode::concat(
            AstNode::star(AstNode::union(AstNode::Literal('a'), AstNode::Literal('b'))),
            AstNode::Literal('c'),
        );
        assert_eq!(
            format!("{:?}", node),
            "Concat(Star(Union(Literal('a'), Literal('b'))), Literal('c'))"
        );
    }

    #[test]
    fn test_union_of_literals() {
        assert_eq!(
            AstNode::union_of_literals(['a', 'b', 'c']),
            AstNode::union(
                AstNode::union(AstNode::Literal('a'), AstNode::Literal('b')),
                AstNode::Literal('c')
            )
        );
        assert_eq!(AstNode::union_of_literals(['x']), AstNode::Literal('x'));
        assert_eq!(
            AstNode::union_of_literals(std::iter::empty()),
            AstNode::EmptyLanguage
        );
    }

    #[test]
    fn test_equality() {
        let ab = AstNode::concat(AstNode::Literal('a'), AstNode::Literal('b'));
        assert_eq!(ab, ab.clone());
        assert_ne!(ab, AstNode::union(AstNode::Literal('a'), AstNode::Literal('b')));
        assert_ne!(ab, AstNode::concat(AstNode::Literal('a'), AstNode::Literal('c')));
        assert_ne!(AstNode::star(ab.clone()), AstNode::plus(ab));
        assert_ne!(AstNode::EmptyString, AstNode::EmptyLanguage);
    }

    #[test]
    fn test_num_nodes() {
        assert_eq!(AstNode::AnyChar.num_nodes(), 1);
        // Concat(Star(Union(a, b)), c)
        let node = AstNode::concat(
            AstNode::star(AstNode::union(AstNode::Literal('a'), AstNode::Literal('b'))),
            AstNode::Literal('c'),
        );
        assert_eq!(node.num_nodes(), 6);
    }

    #[test]
    fn test_deep_chain_compare_and_drop() {
        let chain = |len: usize| {
            (0..len)
                .map(|_| AstNode::Literal('a'))
                .reduce(AstNode::concat)
                .unwrap_or(AstNode::EmptyString)
        };
        let lhs = chain(200_000);
        assert_eq!(lhs.num_nodes(), 399_999);
        assert!(lhs == chain(200_000));
        assert!(lhs != chain(199_999));
    }
}
