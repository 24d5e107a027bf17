use regex_forge::alphabet::Alphabet;
use regex_forge::dfa::DFA;
use regex_forge::error_handling::Result;
use regex_forge::matcher::{Engine, PatternMatcher};
use regex_forge::nfa::NFA;
use regex_forge::parser::{parse_pattern, SchemaConfig, Syntax};

use clap::{Arg, ArgMatches, Command};
use log::info;

fn pattern_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("pattern")
                .help("Regular expression to compile")
                .required(true)
                .value_name("PATTERN"),
        )
        .arg(
            Arg::new("syntax")
                .long("syntax")
                .help("Pattern syntax")
                .value_parser(["basic", "extended"])
                .default_value("basic"),
        )
        .arg(
            Arg::new("alphabet")
                .long("alphabet")
                .help("Symbols of the alphabet; defaults to lowercase letters")
                .value_name("SYMBOLS"),
        )
}

fn compile(matches: &ArgMatches) -> Result<(NFA, DFA)> {
    let pattern: &String = matches.get_one("pattern").expect("no pattern found");
    let syntax: &String = matches.get_one("syntax").expect("syntax has a default");
    let alphabet = match matches.get_one::<String>("alphabet") {
        Some(symbols) => Alphabet::from_symbols(symbols)?,
        None => Alphabet::default(),
    };

    let ast = parse_pattern(pattern, Syntax::from_name(syntax)?)?;
    info!("Parsed {} into {:?}", pattern, ast);
    let nfa = NFA::from_ast(&ast, &alphabet)?;
    let dfa = DFA::from_nfa(&nfa);
    Ok((nfa, dfa))
}

fn run_match(matches: &ArgMatches) -> Result<()> {
    let (nfa, dfa) = compile(matches)?;
    for input in matches.get_many::<String>("input").into_iter().flatten() {
        println!(
            "{:?}: nfa={} dfa={}",
            input,
            nfa.accepts(input),
            dfa.accepts(input)
        );
    }
    Ok(())
}

fn run_dump(matches: &ArgMatches) -> Result<()> {
    let (nfa, dfa) = compile(matches)?;
    println!("{:?}", nfa);
    println!("{:?}", dfa);
    Ok(())
}

fn run_schema(matches: &ArgMatches) -> Result<()> {
    let schema_path: &String = matches.get_one("schema").expect("no schema found");
    let schema_config = SchemaConfig::parse_from_file(schema_path)?;
    let matcher = PatternMatcher::new(schema_config)?;
    info!(
        "Loaded {} patterns over {:?} ({:?} syntax)",
        matcher.get_schema_config().get_pattern_schemas().len(),
        matcher.get_schema_config().get_alphabet(),
        matcher.get_schema_config().get_syntax()
    );
    for pattern in matcher.iter() {
        info!("{:?}", pattern);
    }

    for input in matches.get_many::<String>("input").into_iter().flatten() {
        println!("{:?}: {:?}", input, matcher.match_all(input));
        for pattern in matcher.iter() {
            if false == pattern.accepts(input, Engine::Nfa) {
                info!(
                    "{}: stuck after {} symbols",
                    pattern.get_name(),
                    pattern.longest_viable_prefix(input)
                );
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let inputs = Arg::new("input")
        .help("Strings to test")
        .num_args(0..)
        .value_name("INPUT");

    let matches = Command::new("forge")
        .version(regex_forge::version())
        .about("Compiles regular expressions into NFAs and DFAs")
        .subcommand_required(true)
        .subcommand(pattern_args(Command::new("match").about("Test inputs against a pattern")).arg(inputs.clone()))
        .subcommand(pattern_args(Command::new("dump").about("Print the NFA and DFA of a pattern")))
        .subcommand(
            Command::new("schema")
                .about("Test inputs against every pattern of a schema file")
                .arg(
                    Arg::new("schema")
                        .help("Path to the schema file")
                        .required(true)
                        .value_name("SCHEMA_FILE"),
                )
                .arg(inputs),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("match", sub_matches)) => run_match(sub_matches),
        Some(("dump", sub_matches)) => run_dump(sub_matches),
        Some(("schema", sub_matches)) => run_schema(sub_matches),
        _ => unreachable!("a subcommand is required"),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
