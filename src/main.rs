//! Command-line interface for cscan
//!
//! Usage:
//!   cscan scan `<path>` [--json]              - Scan a C file or directory tree and list functions
//!   cscan locate `<file>` `<line>`              - Name the function containing a line
//!   cscan statements `<file>` [--max-level N] - Dump the statement stream of one file

use clap::{Arg, ArgAction, Command};
use serde::Serialize;
use std::path::Path;
use std::process;

use cscan::index::FunctionIndex;
use cscan::scanner::analyzer::Analyzer;
use cscan::scanner::functions::FunctionRecord;

fn main() {
    let matches = Command::new("cscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scans C sources and maps source lines to the functions containing them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("scan")
                .about("Scan a C file or directory tree and list the functions found")
                .arg(
                    Arg::new("path")
                        .help("C file or directory to scan")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit the results as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("locate")
                .about("Name the function containing a given line")
                .arg(
                    Arg::new("file")
                        .help("C file to scan")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("line")
                        .help("1-based line number")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("statements")
                .about("Dump the statement stream of one file")
                .arg(
                    Arg::new("file")
                        .help("C file to scan")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("max-level")
                        .long("max-level")
                        .help("Only show statements at or below this nesting level"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("scan", scan_matches)) => {
            let path = scan_matches.get_one::<String>("path").unwrap();
            let json = scan_matches.get_flag("json");
            handle_scan(path, json);
        }
        Some(("locate", locate_matches)) => {
            let file = locate_matches.get_one::<String>("file").unwrap();
            let line = locate_matches.get_one::<String>("line").unwrap();
            handle_locate(file, line);
        }
        Some(("statements", statements_matches)) => {
            let file = statements_matches.get_one::<String>("file").unwrap();
            let max_level = statements_matches.get_one::<String>("max-level");
            handle_statements(file, max_level.map(String::as_str));
        }
        _ => unreachable!(),
    }
}

/// Per-file entry of the JSON scan report.
#[derive(Serialize)]
struct FileFunctions<'a> {
    file: &'a Path,
    functions: &'a [FunctionRecord],
}

fn handle_scan(path: &str, json: bool) {
    let path = Path::new(path);
    let mut index = FunctionIndex::new();

    if path.is_dir() {
        let summary = index.scan_tree(path);
        for failure in &summary.failures {
            eprintln!("warning: skipped {}", failure);
        }
        eprintln!(
            "Indexed {} file(s), skipped {}.",
            summary.scanned,
            summary.failures.len()
        );
    } else if let Err(err) = index.scan_file(path) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }

    let mut entries: Vec<(&Path, &[FunctionRecord])> = index.entries().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    if json {
        let report: Vec<FileFunctions> = entries
            .iter()
            .map(|(file, functions)| FileFunctions { file, functions })
            .collect();
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        }
    } else {
        for (file, functions) in entries {
            println!("{}", file.display());
            for function in functions {
                println!("  {}", function);
            }
        }
    }
}

fn handle_locate(file: &str, line: &str) {
    let line: usize = match line.parse() {
        Ok(line) => line,
        Err(_) => {
            eprintln!("Error: '{}' is not a valid line number", line);
            process::exit(1);
        }
    };

    let mut index = FunctionIndex::new();
    if let Err(err) = index.scan_file(Path::new(file)) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }

    match index.function_at(Path::new(file), line) {
        Some(function) => println!("{}", function.name),
        None => {
            eprintln!("No function contains line {} of {}", line, file);
            process::exit(1);
        }
    }
}

fn handle_statements(file: &str, max_level: Option<&str>) {
    let max_level: Option<usize> = match max_level {
        Some(text) => match text.parse() {
            Ok(level) => Some(level),
            Err(_) => {
                eprintln!("Error: '{}' is not a valid nesting level", text);
                process::exit(1);
            }
        },
        None => None,
    };

    let source = match std::fs::read_to_string(file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: {}: {}", file, err);
            process::exit(1);
        }
    };

    let mut analyzer = Analyzer::new();
    if let Err(err) = analyzer.scan(&source) {
        eprintln!("Error: {}: {}", file, err);
        process::exit(1);
    }

    match max_level {
        Some(level) => {
            for statement in analyzer.statements_at_level(level) {
                println!("{}", statement);
            }
        }
        None => {
            for statement in analyzer.statements() {
                println!("{}", statement);
            }
        }
    }
}
