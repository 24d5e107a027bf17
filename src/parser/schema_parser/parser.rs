use crate::alphabet::Alphabet;
use crate::error_handling::Error::{IOError, InvalidSchema, MissingSchemaKey, YamlParsingError};
use crate::error_handling::Result;
use crate::parser::ast_node::AstNode;
use crate::parser::{parse_pattern, Syntax};
use indexmap::IndexMap;
use serde_yaml::Value;
use std::io::Read;
use std::rc::Rc;

pub struct PatternSchema {
    name: String,
    regex: String,
    ast: AstNode,
}

impl PatternSchema {
    pub fn new(name: String, regex: String, syntax: Syntax) -> Result<PatternSchema> {
        let ast = parse_pattern(regex.as_str(), syntax)?;
        Ok(Self { name, regex, ast })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_regex(&self) -> &str {
        &self.regex
    }

    pub fn get_ast(&self) -> &AstNode {
        &self.ast
    }
}

pub struct SchemaConfig {
    alphabet: Alphabet,
    syntax: Syntax,
    pattern_schemas: Vec<PatternSchema>,
}

impl SchemaConfig {
    pub fn get_alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn get_syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn get_pattern_schemas(&self) -> &Vec<PatternSchema> {
        &self.pattern_schemas
    }
}

impl SchemaConfig {
    const ALPHABET_KEY: &'static str = "alphabet";
    const SYNTAX_KEY: &'static str = "syntax";
    const PATTERNS_KEY: &'static str = "patterns";

    pub fn parse_from_file(yaml_file_path: &str) -> Result<Rc<SchemaConfig>> {
        match std::fs::File::open(yaml_file_path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    return Err(IOError(e));
                }
                Ok(Rc::new(Self::parse_from_str(contents.as_str())?))
            }
            Err(e) => Err(IOError(e)),
        }
    }

    pub fn parse_from_str(yaml_content: &str) -> Result<SchemaConfig> {
        match Self::load_kv_pairs_from_yaml_content(yaml_content) {
            Ok(kv_pairs) => Self::load_from_kv_pairs(kv_pairs),
            Err(e) => Err(YamlParsingError(e)),
        }
    }

    fn get_key_value<'a>(
        kv_map: &'a IndexMap<String, Value>,
        key: &'static str,
    ) -> Result<&'a Value> {
        kv_map.get(key).ok_or(MissingSchemaKey(key))
    }

    fn load_kv_pairs_from_yaml_content(
        yaml_content: &str,
    ) -> serde_yaml::Result<IndexMap<String, Value>> {
        let kv_map_result: IndexMap<String, Value> = serde_yaml::from_str(yaml_content)?;
        Ok(kv_map_result)
    }

    fn load_from_kv_pairs(kv_pairs: IndexMap<String, Value>) -> Result<Self> {
        // Handle alphabet
        let alphabet = match Self::get_key_value(&kv_pairs, Self::ALPHABET_KEY)? {
            Value::String(symbols) => Alphabet::from_symbols(symbols)?,
            _ => return Err(InvalidSchema),
        };

        // Handle syntax, which defaults to the basic grammar
        let syntax = match kv_pairs.get(Self::SYNTAX_KEY) {
            None => Syntax::default(),
            Some(Value::String(name)) => Syntax::from_name(name)?,
            Some(_) => return Err(InvalidSchema),
        };

        // Handle patterns
        let mut pattern_schemas: Vec<PatternSchema> = Vec::new();
        let patterns = Self::get_key_value(&kv_pairs, Self::PATTERNS_KEY)?;
        if let Value::Mapping(map) = patterns {
            for (key, value) in map {
                match (key, value) {
                    (Value::String(name), Value::String(regex)) => {
                        pattern_schemas.push(PatternSchema::new(
                            name.clone(),
                            regex.clone(),
                            syntax,
                        )?);
                    }
                    _ => return Err(InvalidSchema),
                }
            }
        } else {
            return Err(InvalidSchema);
        }

        Ok(Self {
            alphabet,
            syntax,
            pattern_schemas,
        })
    }
}
