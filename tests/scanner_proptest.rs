//! Property-based tests for the scanner
//!
//! Balanced delimiter soup must always scan cleanly, keep the open/close
//! statement counts in balance, and yield the same results on every scan.

use cscan::scanner::analyzer::Analyzer;
use cscan::scanner::statements::{Statement, StatementKind};
use proptest::prelude::*;

/// Code-ish filler with no delimiters, comment markers, quotes, or hashes.
fn filler() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_ ;]{0,12}").unwrap()
}

/// Balanced delimiter soup: filler interleaved with properly nested pairs.
fn balanced_source() -> impl Strategy<Value = String> {
    filler().prop_recursive(4, 64, 4, |inner| {
        (
            prop::sample::select(vec![('{', '}'), ('(', ')'), ('[', ']')]),
            prop::collection::vec(inner, 0..4),
            filler(),
        )
            .prop_map(|((open, close), parts, tail)| {
                format!("{}{}{}{}", open, parts.join(" "), close, tail)
            })
    })
}

fn scan(source: &str) -> Vec<Statement> {
    let mut analyzer = Analyzer::new();
    analyzer
        .scan(source)
        .unwrap_or_else(|err| panic!("balanced input failed to scan: {}", err));
    analyzer.statements().to_vec()
}

proptest! {
    #[test]
    fn balanced_input_scans_cleanly(source in balanced_source()) {
        scan(&source);
    }

    #[test]
    fn open_and_close_counts_balance(source in balanced_source()) {
        let statements = scan(&source);
        let opens = statements
            .iter()
            .filter(|s| s.kind == StatementKind::BlockOpen)
            .count();
        let closes = statements
            .iter()
            .filter(|s| s.kind == StatementKind::BlockClose)
            .count();
        prop_assert_eq!(opens, closes);

        // In every prefix the closes never outnumber the opens.
        let mut depth: i64 = 0;
        for statement in &statements {
            match statement.kind {
                StatementKind::BlockOpen => depth += 1,
                StatementKind::BlockClose => depth -= 1,
                _ => {}
            }
            prop_assert!(depth >= 0);
        }
    }

    #[test]
    fn matching_open_and_close_carry_equal_levels(source in balanced_source()) {
        let statements = scan(&source);
        let mut stack = Vec::new();
        for statement in &statements {
            match statement.kind {
                StatementKind::BlockOpen => stack.push(statement.level),
                StatementKind::BlockClose => {
                    let open_level = stack.pop().expect("close without open");
                    prop_assert_eq!(open_level, statement.level);
                }
                _ => {}
            }
        }
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn rescanning_yields_identical_results(source in balanced_source()) {
        let mut analyzer = Analyzer::new();
        analyzer.scan(&source).expect("first scan failed");
        let first: Vec<Statement> = analyzer.statements().to_vec();
        let first_functions = analyzer.functions();

        analyzer.scan(&source).expect("second scan failed");
        prop_assert_eq!(analyzer.statements(), first.as_slice());
        prop_assert_eq!(analyzer.functions(), first_functions);
    }

    #[test]
    fn delimiter_free_text_never_errors(source in "[a-zA-Z0-9_ \t;.,+*=-]{0,40}") {
        let mut analyzer = Analyzer::new();
        prop_assert!(analyzer.scan(&source).is_ok());
    }
}
