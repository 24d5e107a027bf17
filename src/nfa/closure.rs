use super::nfa::{State, Symbol, NFA};
use std::collections::BTreeSet;

/// An order-independent set of NFA states. `BTreeSet` hashes and compares by content, so it
/// can key the subset construction's seen-set directly.
pub type StateSet = BTreeSet<State>;

// Helper functions shared by the subset construction and the set-based simulation
impl NFA {
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<State> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for (symbol, targets) in self.get_transitions_from_state(state) {
                if Symbol::Epsilon != symbol {
                    continue;
                }
                for target in targets {
                    if closure.insert(*target) {
                        stack.push(*target);
                    }
                }
            }
        }

        closure
    }

    pub fn move_on(&self, states: &StateSet, input: char) -> StateSet {
        let mut result = StateSet::new();
        for state in states {
            for (symbol, targets) in self.get_transitions_from_state(*state) {
                if symbol.matches(input, self.get_alphabet()) {
                    result.extend(targets.iter().copied());
                }
            }
        }
        result
    }

    pub fn contains_accept_state(&self, states: &StateSet) -> bool {
        states.iter().any(|state| self.is_accept_state(*state))
    }

    /// Set-based simulation: the epsilon-closed set of states reached after reading `input`.
    /// An empty set means the automaton is stuck.
    pub fn accepting_closure(&self, input: &str) -> StateSet {
        let mut current = self.epsilon_closure(&StateSet::from([self.get_start()]));
        for symbol in input.chars() {
            if current.is_empty() {
                break;
            }
            current = self.epsilon_closure(&self.move_on(&current, symbol));
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::error_handling::Result;
    use crate::parser::AstNode;

    #[test]
    fn test_epsilon_closure_of_star() -> Result<()> {
        // start(2) -e-> inner start(0), start(2) -e-> accept(3)
        let nfa = NFA::from_ast(&AstNode::star(AstNode::Literal('a')), &Alphabet::default())?;
        let closure = nfa.epsilon_closure(&StateSet::from([nfa.get_start()]));
        assert_eq!(closure, StateSet::from([State(0), State(2), State(3)]));
        assert!(nfa.contains_accept_state(&closure));
        Ok(())
    }

    #[test]
    fn test_move_on() -> Result<()> {
        let nfa = NFA::from_ast(&AstNode::star(AstNode::Literal('a')), &Alphabet::default())?;
        let closure = nfa.epsilon_closure(&StateSet::from([nfa.get_start()]));
        assert_eq!(nfa.move_on(&closure, 'a'), StateSet::from([State(1)]));
        assert!(nfa.move_on(&closure, 'b').is_empty());
        assert!(false == nfa.contains_accept_state(&nfa.move_on(&closure, 'a')));
        Ok(())
    }

    #[test]
    fn test_move_on_wildcard_respects_alphabet() -> Result<()> {
        let nfa = NFA::from_ast(&AstNode::AnyChar, &Alphabet::from_symbols("ab")?)?;
        let start = StateSet::from([nfa.get_start()]);
        assert_eq!(nfa.move_on(&start, 'a'), StateSet::from([State(1)]));
        assert_eq!(nfa.move_on(&start, 'b'), StateSet::from([State(1)]));
        assert!(nfa.move_on(&start, 'c').is_empty());
        Ok(())
    }

    #[test]
    fn test_closure_of_empty_set() -> Result<()> {
        let nfa = NFA::from_ast(&AstNode::Literal('a'), &Alphabet::default())?;
        assert!(nfa.epsilon_closure(&StateSet::new()).is_empty());
        Ok(())
    }

    #[test]
    fn test_accepting_closure() -> Result<()> {
        let nfa = NFA::from_ast(
            &AstNode::concat(AstNode::Literal('a'), AstNode::Literal('b')),
            &Alphabet::default(),
        )?;
        assert!(nfa.contains_accept_state(&nfa.accepting_closure("ab")));
        assert!(false == nfa.contains_accept_state(&nfa.accepting_closure("a")));
        assert!(nfa.accepting_closure("b").is_empty());
        Ok(())
    }
}
