mod matcher;

pub use matcher::CompiledPattern;
pub use matcher::Engine;
pub use matcher::PatternMatcher;
