use crate::alphabet::Alphabet;
use crate::error_handling::Error::SymbolOutsideAlphabet;
use crate::error_handling::Result;
use crate::parser::ast_node::AstNode;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use std::fmt::Debug;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(pub(crate) usize);

impl State {
    pub fn get_id(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub enum Symbol {
    Epsilon,
    Char(char),
    // Matches any symbol of the automaton's alphabet.
    Any,
}

impl Symbol {
    // Whether this (non-epsilon) symbol consumes `input`.
    pub fn matches(&self, input: char, alphabet: &Alphabet) -> bool {
        match self {
            Symbol::Epsilon => false,
            Symbol::Char(c) => *c == input,
            Symbol::Any => alphabet.contains(input),
        }
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "epsilon"),
            Symbol::Char(c) => write!(f, "{:?}", c),
            Symbol::Any => write!(f, "any"),
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct NfaState {
    pub(crate) accepting: bool,
    pub(crate) transitions: IndexMap<Symbol, IndexSet<State>>,
}

pub struct NFA {
    start: State,
    states: Vec<NfaState>,
    alphabet: Alphabet,
}

impl Debug for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "NFA( start: {:?}, accept: {:?}, alphabet: {:?}, transitions: {{",
            self.start,
            self.get_accept_states(),
            self.alphabet
        )?;
        for (idx, state) in self.states.iter().enumerate() {
            for (symbol, targets) in state.transitions.iter() {
                writeln!(f, "\t{:?} -> {:?}, symbol: {:?}", State(idx), targets, symbol)?;
            }
        }
        write!(f, "}} )")
    }
}

impl NFA {
    pub(crate) fn from_parts(start: State, states: Vec<NfaState>, alphabet: Alphabet) -> Self {
        debug_assert!(start.0 < states.len());
        NFA {
            start,
            states,
            alphabet,
        }
    }

    pub fn get_start(&self) -> State {
        self.start
    }

    pub fn get_alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> impl Iterator<Item = State> {
        (0..self.states.len()).map(State)
    }

    pub fn is_accept_state(&self, state: State) -> bool {
        self.states
            .get(state.0)
            .map_or(false, |nfa_state| nfa_state.accepting)
    }

    pub fn get_accept_states(&self) -> Vec<State> {
        self.states().filter(|s| self.is_accept_state(*s)).collect()
    }

    pub fn get_transitions_from_state(
        &self,
        state: State,
    ) -> impl Iterator<Item = (Symbol, &IndexSet<State>)> {
        self.states
            .get(state.0)
            .into_iter()
            .flat_map(|nfa_state| nfa_state.transitions.iter())
            .map(|(symbol, targets)| (*symbol, targets))
    }
}

// A sub-automaton under construction. `accept` is `None` only when the fragment's language
// is empty, in which case nothing downstream may link from it. The right operand of a concat
// whose left side is empty is still built, so its literals are checked, but its states are
// unreachable.
#[derive(Clone, Copy)]
struct Fragment {
    start: State,
    accept: Option<State>,
}

// Pending work of the post-order walk in `ThompsonBuilder::build`.
enum BuildStep<'n> {
    Visit(&'n AstNode),
    Concat,
    Union,
    Star,
    Optional,
}

// Thompson's construction. States are allocated from a per-build arena, so ids are unique
// within one automaton and never shared across builds.
struct ThompsonBuilder<'a> {
    states: Vec<NfaState>,
    alphabet: &'a Alphabet,
}

impl<'a> ThompsonBuilder<'a> {
    fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            states: Vec::new(),
            alphabet,
        }
    }

    fn new_state(&mut self, accepting: bool) -> State {
        self.states.push(NfaState {
            accepting,
            transitions: IndexMap::new(),
        });
        State(self.states.len() - 1)
    }

    fn add_transition(&mut self, from: State, symbol: Symbol, to: State) {
        self.states[from.0]
            .transitions
            .entry(symbol)
            .or_default()
            .insert(to);
    }

    fn add_epsilon_transition(&mut self, from: State, to: State) {
        self.add_transition(from, Symbol::Epsilon, to);
    }

    fn demote(&mut self, state: State) {
        self.states[state.0].accepting = false;
    }

    // Walks the AST with an explicit stack so deep concat chains cannot overflow the call
    // stack. Operands finish before their operator runs, and states are allocated in the same
    // order as a left-to-right recursive build.
    fn build(&mut self, ast: &AstNode) -> Result<Fragment> {
        let mut steps: Vec<BuildStep> = vec![BuildStep::Visit(ast)];
        let mut fragments: Vec<Fragment> = Vec::new();

        while let Some(step) = steps.pop() {
            let fragment = match step {
                BuildStep::Visit(node) => match node {
                    AstNode::EmptyLanguage => Fragment {
                        start: self.new_state(false),
                        accept: None,
                    },
                    AstNode::EmptyString => self.empty_string(),
                    AstNode::Literal(c) => {
                        if false == self.alphabet.contains(*c) {
                            return Err(SymbolOutsideAlphabet(*c));
                        }
                        self.single_symbol(Symbol::Char(*c))
                    }
                    AstNode::AnyChar => self.single_symbol(Symbol::Any),
                    AstNode::Concat(left, right) => {
                        steps.extend([
                            BuildStep::Concat,
                            BuildStep::Visit(right),
                            BuildStep::Visit(left),
                        ]);
                        continue;
                    }
                    AstNode::Union(left, right) => {
                        steps.extend([
                            BuildStep::Union,
                            BuildStep::Visit(right),
                            BuildStep::Visit(left),
                        ]);
                        continue;
                    }
                    AstNode::Star(inner) => {
                        steps.extend([BuildStep::Star, BuildStep::Visit(inner)]);
                        continue;
                    }
                    AstNode::Plus(inner) => {
                        // E+ == E E*, with two independent copies of E
                        steps.extend([
                            BuildStep::Concat,
                            BuildStep::Star,
                            BuildStep::Visit(inner),
                            BuildStep::Visit(inner),
                        ]);
                        continue;
                    }
                    AstNode::Optional(inner) => {
                        steps.extend([BuildStep::Optional, BuildStep::Visit(inner)]);
                        continue;
                    }
                },
                BuildStep::Concat => {
                    let (right, left) = Self::pop_operands(&mut fragments);
                    self.concat(left, right)
                }
                BuildStep::Union => {
                    let (right, left) = Self::pop_operands(&mut fragments);
                    self.union(left, right)
                }
                BuildStep::Star => {
                    let inner = Self::pop_operand(&mut fragments);
                    self.star(inner)
                }
                BuildStep::Optional => {
                    // E? == E | ""
                    let inner = Self::pop_operand(&mut fragments);
                    let empty = self.empty_string();
                    self.union(inner, empty)
                }
            };
            fragments.push(fragment);
        }

        Ok(Self::pop_operand(&mut fragments))
    }

    fn pop_operand(fragments: &mut Vec<Fragment>) -> Fragment {
        match fragments.pop() {
            Some(fragment) => fragment,
            None => unreachable!("operands are built before their operator"),
        }
    }

    fn pop_operands(fragments: &mut Vec<Fragment>) -> (Fragment, Fragment) {
        let right = Self::pop_operand(fragments);
        let left = Self::pop_operand(fragments);
        (right, left)
    }

    fn empty_string(&mut self) -> Fragment {
        let start = self.new_state(false);
        let accept = self.new_state(true);
        self.add_epsilon_transition(start, accept);
        Fragment {
            start,
            accept: Some(accept),
        }
    }

    fn single_symbol(&mut self, symbol: Symbol) -> Fragment {
        let start = self.new_state(false);
        let accept = self.new_state(true);
        self.add_transition(start, symbol, accept);
        Fragment {
            start,
            accept: Some(accept),
        }
    }

    fn concat(&mut self, left: Fragment, right: Fragment) -> Fragment {
        match left.accept {
            Some(left_accept) => {
                self.demote(left_accept);
                self.add_epsilon_transition(left_accept, right.start);
                Fragment {
                    start: left.start,
                    accept: right.accept,
                }
            }
            None => {
                if let Some(right_accept) = right.accept {
                    self.demote(right_accept);
                }
                Fragment {
                    start: left.start,
                    accept: None,
                }
            }
        }
    }

    fn union(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let start = self.new_state(false);
        self.add_epsilon_transition(start, left.start);
        self.add_epsilon_transition(start, right.start);

        let accept = self.new_state(true);
        let mut reachable = false;
        for sub_accept in [left.accept, right.accept].into_iter().flatten() {
            self.demote(sub_accept);
            self.add_epsilon_transition(sub_accept, accept);
            reachable = true;
        }
        if false == reachable {
            self.demote(accept);
            return Fragment {
                start,
                accept: None,
            };
        }

        Fragment {
            start,
            accept: Some(accept),
        }
    }

    fn star(&mut self, inner: Fragment) -> Fragment {
        let start = self.new_state(false);
        let accept = self.new_state(true);
        self.add_epsilon_transition(start, inner.start);
        self.add_epsilon_transition(start, accept);
        if let Some(inner_accept) = inner.accept {
            self.demote(inner_accept);
            self.add_epsilon_transition(inner_accept, inner.start);
            self.add_epsilon_transition(inner_accept, accept);
        }
        Fragment {
            start,
            accept: Some(accept),
        }
    }
}

impl NFA {
    /// Builds an NFA over `alphabet` using Thompson's construction.
    ///
    /// Fails with `SymbolOutsideAlphabet` if a literal is not part of the alphabet; no partial
    /// automaton is ever returned.
    pub fn from_ast(ast: &AstNode, alphabet: &Alphabet) -> Result<NFA> {
        let mut builder = ThompsonBuilder::new(alphabet);
        let fragment = builder.build(ast)?;
        if fragment.accept.is_none() {
            warn!("{:?} denotes the empty language", ast);
        }

        let nfa = NFA::from_parts(fragment.start, builder.states, alphabet.clone());
        debug!(
            "Built NFA with {} states ({} accepting)",
            nfa.num_states(),
            nfa.get_accept_states().len()
        );
        Ok(nfa)
    }
}
