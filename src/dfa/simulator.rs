use super::dfa::DFA;

impl DFA {
    // Walks the table one symbol at a time; a missing transition rejects without reading the
    // rest of the input.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current_state = self.get_start();
        for symbol in input.chars() {
            match self.get_next_state(current_state, symbol) {
                Some(next_state) => current_state = next_state,
                None => return false,
            }
        }
        self.is_accept_state(current_state)
    }
}
