use regex_forge::error_handling::Result;
use regex_forge::matcher::{Engine, PatternMatcher};
use regex_forge::parser::{SchemaConfig, Syntax};

#[test]
fn test_read_demo_schema_file() -> Result<()> {
    let project_root = env!("CARGO_MANIFEST_DIR");
    let schema_path = std::path::Path::new(project_root)
        .join("demos")
        .join("schema.yaml");
    let parsed_schema = SchemaConfig::parse_from_file(schema_path.to_str().unwrap())?;

    assert_eq!(parsed_schema.get_alphabet().len(), 26);
    assert_eq!(parsed_schema.get_syntax(), Syntax::Basic);

    let expected_names = vec![
        "repeated_a",
        "ab_then_cd",
        "ends_with_c",
        "a_then_bc",
        "three_letters",
    ];
    let actual_names: Vec<&str> = parsed_schema
        .get_pattern_schemas()
        .iter()
        .map(|p| p.get_name())
        .collect();
    assert_eq!(expected_names, actual_names);

    Ok(())
}

#[test]
fn test_match_demo_schema() -> Result<()> {
    let project_root = env!("CARGO_MANIFEST_DIR");
    let schema_path = std::path::Path::new(project_root)
        .join("demos")
        .join("schema.yaml");
    let matcher = PatternMatcher::new(SchemaConfig::parse_from_file(schema_path.to_str().unwrap())?)?;

    assert_eq!(matcher.match_all(""), vec!["repeated_a"]);
    assert_eq!(matcher.match_all("a"), vec!["repeated_a", "a_then_bc"]);
    assert_eq!(matcher.match_all("abc"), vec!["ab_then_cd", "ends_with_c", "a_then_bc", "three_letters"]);
    assert_eq!(matcher.match_all("abdcdc"), vec!["ab_then_cd"]);
    assert_eq!(matcher.match_all("abababc"), vec!["ends_with_c"]);
    assert!(matcher.match_all("zzzz").is_empty());

    let repeated_a = matcher.get("repeated_a").expect("pattern is compiled");
    assert_eq!(repeated_a.get_dfa().num_states(), 2);
    for input in ["", "a", "aaaa", "aab", "b"] {
        assert_eq!(
            repeated_a.accepts(input, Engine::Nfa),
            repeated_a.accepts(input, Engine::Dfa)
        );
    }

    Ok(())
}
