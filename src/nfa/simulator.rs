use super::nfa::{State, Symbol, NFA};
use std::collections::{HashSet, VecDeque};

impl NFA {
    // Breadth-first search over (state, input position) configurations. The visited set keeps
    // the search finite even if an epsilon cycle is reachable.
    pub fn accepts(&self, input: &str) -> bool {
        let symbols: Vec<char> = input.chars().collect();
        let mut queue: VecDeque<(State, usize)> = VecDeque::from([(self.get_start(), 0)]);
        let mut visited: HashSet<(State, usize)> = HashSet::new();

        while let Some((state, pos)) = queue.pop_front() {
            if false == visited.insert((state, pos)) {
                continue;
            }
            if pos == symbols.len() && self.is_accept_state(state) {
                return true;
            }

            for (symbol, targets) in self.get_transitions_from_state(state) {
                let next_pos = match symbol {
                    Symbol::Epsilon => pos,
                    _ if pos < symbols.len() && symbol.matches(symbols[pos], self.get_alphabet()) => {
                        pos + 1
                    }
                    _ => continue,
                };
                queue.extend(targets.iter().map(|target| (*target, next_pos)));
            }
        }

        false
    }
}
