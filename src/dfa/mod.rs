pub(crate) mod dfa;
mod simulator;

pub use dfa::State;
pub use dfa::DFA;
