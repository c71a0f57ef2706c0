//! Command-line interface for handhistory
//! This binary parses, detects and validates poker hand history files.
//!
//! Usage:
//!   hhparse parse `<path>` [--output json|yaml|debug] [--config `<file>`]  - Parse every hand in a file
//!   hhparse detect `<path>`                                             - Print the detected format
//!   hhparse validate `<path>` [--config `<file>`]                       - Parse and validate every hand
//!   hhparse formats                                                   - List supported formats

use clap::{Arg, Command};
use handhistory::history::config::{HandHistoryConfig, Loader};
use handhistory::history::formats::FormatRegistry;
use handhistory::history::parsing::ParserResult;
use handhistory::history::validation::validate;
use log::debug;

fn main() {
    env_logger::init();

    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file layered over the built-in defaults");

    let matches = Command::new("hhparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and settling poker hand histories")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse every hand in a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the hand history file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output format")
                        .value_parser(["json", "yaml", "debug"])
                        .default_value("json"),
                )
                .arg(config_arg.clone()),
        )
        .subcommand(
            Command::new("detect").about("Print the detected format").arg(
                Arg::new("path")
                    .help("Path to the hand history file")
                    .required(true)
                    .index(1),
            ),
        )
        .subcommand(
            Command::new("validate")
                .about("Parse and validate every hand; exits non-zero on any problem")
                .arg(
                    Arg::new("path")
                        .help("Path to the hand history file")
                        .required(true)
                        .index(1),
                )
                .arg(config_arg),
        )
        .subcommand(Command::new("formats").about("List supported formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let output = parse_matches.get_one::<String>("output").unwrap();
            let config = load_config(parse_matches.get_one::<String>("config"));
            handle_parse_command(path, output, &config);
        }
        Some(("detect", detect_matches)) => {
            let path = detect_matches.get_one::<String>("path").unwrap();
            handle_detect_command(path);
        }
        Some(("validate", validate_matches)) => {
            let path = validate_matches.get_one::<String>("path").unwrap();
            let config = load_config(validate_matches.get_one::<String>("config"));
            handle_validate_command(path, &config);
        }
        Some(("formats", _)) => {
            handle_formats_command();
        }
        _ => unreachable!(),
    }
}

fn load_config(path: Option<&String>) -> HandHistoryConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    })
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Parse all hands, reporting failures on stderr
fn parse_file(path: &str, config: &HandHistoryConfig) -> Vec<ParserResult> {
    let source = read_source(path);
    let results = FormatRegistry::with_config(config).parse_all(&source);
    if results.is_empty() {
        eprintln!("No hand histories found in {}", path);
        std::process::exit(1);
    }
    debug!("parsed {} hands from {}", results.len(), path);
    results
}

/// Handle the parse command
fn handle_parse_command(path: &str, output: &str, config: &HandHistoryConfig) {
    let results = parse_file(path, config);
    let mut failed = false;
    let mut hands = Vec::new();
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Ok(hand) => hands.push(hand),
            Err(e) => {
                eprintln!("Hand {}: {}", i + 1, e);
                failed = true;
            }
        }
    }

    let rendered = match output {
        "yaml" => serde_yaml::to_string(&hands).map_err(|e| e.to_string()),
        "debug" => Ok(format!("{:#?}\n", hands)),
        _ => serde_json::to_string_pretty(&hands)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
    };
    match rendered {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }
    }
    if failed {
        std::process::exit(1);
    }
}

/// Handle the detect command
fn handle_detect_command(path: &str) {
    let source = read_source(path);
    println!("{}", FormatRegistry::default().detect_format(&source));
}

/// Handle the validate command
fn handle_validate_command(path: &str, config: &HandHistoryConfig) {
    let results = parse_file(path, config);
    let mut problems = 0;
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(hand) => {
                let report = validate(hand);
                if report.is_valid {
                    println!("Hand {} ({}): ok", i + 1, hand.id);
                } else {
                    problems += 1;
                    println!("Hand {} ({}): invalid", i + 1, hand.id);
                    for error in &report.errors {
                        println!("  - {}", error);
                    }
                }
            }
            Err(e) => {
                problems += 1;
                println!("Hand {}: {}", i + 1, e);
            }
        }
    }
    if problems > 0 {
        std::process::exit(1);
    }
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Supported formats:\n");
    for tag in FormatRegistry::default().supported_formats() {
        println!("  {}", tag);
    }
}
