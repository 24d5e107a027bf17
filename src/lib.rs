pub mod alphabet;
pub mod dfa;
pub mod error_handling;
pub mod matcher;
pub mod nfa;
pub mod parser;

const VERSION: &str = "0.0.1";

pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), VERSION);
    }
}
