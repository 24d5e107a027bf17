use crate::alphabet::{Alphabet, ALPHABET_SIZE};
use crate::nfa::nfa::{NfaState, Symbol};
use crate::nfa::{StateSet, NFA};
use indexmap::IndexSet;
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(usize);

impl State {
    pub fn get_id(&self) -> usize {
        self.0
    }
}

struct Transition {
    from_state: State,
    symbol: char,
    to_state: State,
}

impl Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:?} -> {:?}, symbol: {:?}",
            self.from_state, self.to_state, self.symbol
        )
    }
}

pub struct DFA {
    start: State,
    accept: Vec<State>,
    states: Vec<State>,
    transitions: Vec<Vec<Option<Transition>>>, // from_state -> symbol[index in the length 128 vector] -> transition
    dfa_to_nfa_state_mapping: Vec<Rc<StateSet>>, // the NFA states each DFA state stands for
    alphabet: Alphabet,
}

impl Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA( start: {:?}, accept: {:?}, states: {:?}, transitions: {{",
            self.start, self.accept, self.states
        )?;

        for state in &self.states {
            let state_idx = state.0;
            if self.transitions[state_idx].iter().all(Option::is_none) {
                continue;
            }
            writeln!(
                f,
                "\t{:?} (NFA states {:?}):",
                state, self.dfa_to_nfa_state_mapping[state_idx]
            )?;
            for transition in self.transitions[state_idx].iter().flatten() {
                writeln!(f, "\t\t{:?}", transition)?;
            }
        }

        write!(f, "}} )")
    }
}

impl DFA {
    fn new_transition_vector() -> Vec<Option<Transition>> {
        let mut vector = Vec::with_capacity(ALPHABET_SIZE);
        for _ in 0..ALPHABET_SIZE {
            vector.push(None::<Transition>);
        }
        vector
    }

    fn get_transition(transitions_map: &[Option<Transition>], symbol: char) -> Option<&Transition> {
        transitions_map.get(symbol as usize)?.as_ref()
    }
}

impl DFA {
    pub fn get_start(&self) -> State {
        self.start
    }

    pub fn get_alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.states.iter().copied()
    }

    pub fn get_accept_states(&self) -> &[State] {
        &self.accept
    }

    pub fn is_accept_state(&self, state: State) -> bool {
        self.accept.binary_search(&state).is_ok()
    }

    pub fn get_next_state(&self, state: State, symbol: char) -> Option<State> {
        let transitions = self.transitions.get(state.0)?;
        DFA::get_transition(transitions, symbol).map(|transition| transition.to_state)
    }

    pub fn get_transitions_from_state(
        &self,
        state: State,
    ) -> impl Iterator<Item = (char, State)> + '_ {
        self.transitions
            .get(state.0)
            .into_iter()
            .flat_map(|transitions| transitions.iter().flatten())
            .map(|transition| (transition.symbol, transition.to_state))
    }

    pub fn get_nfa_states(&self, state: State) -> Option<&StateSet> {
        self.dfa_to_nfa_state_mapping
            .get(state.0)
            .map(|nfa_states| nfa_states.as_ref())
    }
}

// Accumulates DFA states while the subset construction runs
struct SubsetBuilder<'a> {
    nfa: &'a NFA,
    dfa_states: Vec<State>,
    dfa_accept_states: Vec<State>,
    dfa_transitions: Vec<Vec<Option<Transition>>>,
    dfa_to_nfa_state_mapping: Vec<Rc<StateSet>>,
    nfa_states_to_dfa_mapping: HashMap<Rc<StateSet>, State>,
    worklist: Vec<State>,
}

impl<'a> SubsetBuilder<'a> {
    fn new(nfa: &'a NFA) -> Self {
        Self {
            nfa,
            dfa_states: Vec::new(),
            dfa_accept_states: Vec::new(),
            dfa_transitions: Vec::new(),
            dfa_to_nfa_state_mapping: Vec::new(),
            nfa_states_to_dfa_mapping: HashMap::new(),
            worklist: Vec::new(),
        }
    }

    // Returns the DFA state standing for `nfa_states`, creating and enqueuing it if unseen.
    fn get_or_add_state(&mut self, nfa_states: StateSet) -> State {
        if let Some(existing) = self.nfa_states_to_dfa_mapping.get(&nfa_states) {
            return *existing;
        }

        let dfa_state = State(self.dfa_states.len());
        let nfa_states = Rc::new(nfa_states);
        self.dfa_states.push(dfa_state);
        self.dfa_transitions.push(DFA::new_transition_vector());
        if self.nfa.contains_accept_state(&nfa_states) {
            self.dfa_accept_states.push(dfa_state);
        }
        self.dfa_to_nfa_state_mapping.push(nfa_states.clone());
        self.nfa_states_to_dfa_mapping.insert(nfa_states, dfa_state);
        self.worklist.push(dfa_state);
        dfa_state
    }
}

// Subset construction
impl DFA {
    pub fn from_nfa(nfa: &NFA) -> DFA {
        let alphabet = nfa.get_alphabet().clone();
        let mut builder = SubsetBuilder::new(nfa);

        // Start with the epsilon closure of the start state
        let start_state =
            builder.get_or_add_state(nfa.epsilon_closure(&StateSet::from([nfa.get_start()])));

        // Process and add all dfa states
        while let Some(dfa_state) = builder.worklist.pop() {
            let nfa_states = builder.dfa_to_nfa_state_mapping[dfa_state.0].clone();
            trace!("Expanding {:?} = {:?}", dfa_state, nfa_states);

            for symbol in alphabet.iter() {
                let destination_nfa_states = nfa.epsilon_closure(&nfa.move_on(&nfa_states, symbol));
                if destination_nfa_states.is_empty() {
                    continue;
                }
                let destination_dfa_state = builder.get_or_add_state(destination_nfa_states);

                // Add the transition to the DFA
                builder.dfa_transitions[dfa_state.0][symbol as usize] = Some(Transition {
                    from_state: dfa_state,
                    symbol,
                    to_state: destination_dfa_state,
                });
            }
        }

        // States are numbered in creation order; keep the accept list sorted for lookups.
        let mut dfa_accept_states = builder.dfa_accept_states;
        dfa_accept_states.sort();
        debug!(
            "Built DFA with {} states ({} accepting) from an NFA with {} states",
            builder.dfa_states.len(),
            dfa_accept_states.len(),
            nfa.num_states()
        );

        DFA {
            start: start_state,
            accept: dfa_accept_states,
            states: builder.dfa_states,
            transitions: builder.dfa_transitions,
            dfa_to_nfa_state_mapping: builder.dfa_to_nfa_state_mapping,
            alphabet,
        }
    }
}

// Reinterprets a DFA as an NFA with no epsilon moves and at most one target per symbol.
impl From<&DFA> for NFA {
    fn from(dfa: &DFA) -> Self {
        let states = dfa
            .states()
            .map(|state| NfaState {
                accepting: dfa.is_accept_state(state),
                transitions: dfa
                    .get_transitions_from_state(state)
                    .map(|(symbol, to_state)| {
                        (
                            Symbol::Char(symbol),
                            IndexSet::from([crate::nfa::State(to_state.0)]),
                        )
                    })
                    .collect(),
            })
            .collect();
        NFA::from_parts(
            crate::nfa::State(dfa.start.0),
            states,
            dfa.alphabet.clone(),
        )
    }
}
