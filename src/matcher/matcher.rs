use crate::dfa::DFA;
use crate::error_handling::Result;
use crate::nfa::{StateSet, NFA};
use crate::parser::{PatternSchema, SchemaConfig};
use log::debug;
use std::fmt::Debug;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Engine {
    Nfa,
    Dfa,
}

pub struct CompiledPattern {
    name: String,
    regex: String,
    nfa: NFA,
    dfa: DFA,
}

impl CompiledPattern {
    fn compile(schema: &PatternSchema, schema_config: &SchemaConfig) -> Result<Self> {
        let nfa = NFA::from_ast(schema.get_ast(), schema_config.get_alphabet())?;
        let dfa = DFA::from_nfa(&nfa);
        debug!(
            "Compiled pattern {} ({}): {} NFA states, {} DFA states",
            schema.get_name(),
            schema.get_regex(),
            nfa.num_states(),
            dfa.num_states()
        );
        Ok(Self {
            name: schema.get_name().to_string(),
            regex: schema.get_regex().to_string(),
            nfa,
            dfa,
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_regex(&self) -> &str {
        &self.regex
    }

    pub fn get_nfa(&self) -> &NFA {
        &self.nfa
    }

    pub fn get_dfa(&self) -> &DFA {
        &self.dfa
    }

    pub fn accepts(&self, input: &str, engine: Engine) -> bool {
        match engine {
            Engine::Nfa => self.nfa.accepts(input),
            Engine::Dfa => self.dfa.accepts(input),
        }
    }

    // Number of symbols read before the NFA got stuck, or the whole input if it never did.
    // Once the closure is empty it stays empty, so the scan stops there.
    pub fn longest_viable_prefix(&self, input: &str) -> usize {
        let mut current = self
            .nfa
            .epsilon_closure(&StateSet::from([self.nfa.get_start()]));
        let mut consumed = 0;
        for symbol in input.chars() {
            current = self.nfa.epsilon_closure(&self.nfa.move_on(&current, symbol));
            if current.is_empty() {
                break;
            }
            consumed += 1;
        }
        consumed
    }
}

impl Debug for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CompiledPattern( name: {}, regex: {:?}, nfa states: {}, dfa states: {} )",
            self.name,
            self.regex,
            self.nfa.num_states(),
            self.dfa.num_states()
        )
    }
}

pub struct PatternMatcher {
    schema_config: Rc<SchemaConfig>,
    patterns: Vec<CompiledPattern>,
}

impl PatternMatcher {
    pub fn new(schema_config: Rc<SchemaConfig>) -> Result<Self> {
        let patterns = schema_config
            .get_pattern_schemas()
            .iter()
            .map(|schema| CompiledPattern::compile(schema, &schema_config))
            .collect::<Result<Vec<_>>>()?;
        debug!("Compiled {} patterns", patterns.len());
        Ok(Self {
            schema_config,
            patterns,
        })
    }

    pub fn get_schema_config(&self) -> &SchemaConfig {
        &self.schema_config
    }

    pub fn get(&self, name: &str) -> Option<&CompiledPattern> {
        self.patterns.iter().find(|pattern| pattern.get_name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    // Names of every pattern whose DFA accepts `input`, in schema order.
    pub fn match_all(&self, input: &str) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|pattern| pattern.accepts(input, Engine::Dfa))
            .map(|pattern| pattern.get_name())
            .collect()
    }
}
