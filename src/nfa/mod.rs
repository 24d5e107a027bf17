mod closure;
pub(crate) mod nfa;
mod simulator;

pub use crate::nfa::closure::StateSet;
pub use crate::nfa::nfa::State;
pub use crate::nfa::nfa::Symbol;
pub use crate::nfa::nfa::NFA;
