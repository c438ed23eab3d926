// Integration tests for the C source scanner and function index

use cscan::index::FunctionIndex;
use cscan::scanner::analyzer::{Analyzer, ScanError};
use cscan::scanner::location::SourceLocation;
use cscan::scanner::statements::StatementKind;
use std::fs;
use std::path::PathBuf;

fn scan(source: &str) -> Analyzer {
    let mut analyzer = Analyzer::new();
    analyzer.scan(source).expect("scan failed");
    analyzer
}

#[test]
fn test_empty_function_is_detected() {
    let analyzer = scan("int main() {}");
    let functions = analyzer.functions();

    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name, "main");
    assert_eq!(functions[0].start, SourceLocation::new(1, 1));
    assert_eq!(functions[0].end, SourceLocation::new(1, 13));
}

#[test]
fn test_non_empty_body_is_not_detected() {
    // The extractor requires the exact five-entry skeleton; a body statement
    // interposes and defeats the match.  This is the documented behavior, not
    // an accident.
    let analyzer = scan("int foo() { return 1; }");
    assert!(analyzer.functions().is_empty());
}

#[test]
fn test_multiple_functions_with_noise() {
    let source = r#"
        #include <stdio.h>
        #define LIMIT 10

        /* setup helper {
           braces in comments don't count */
        void setup()
        {
        }

        // void commented_out() {}

        char *banner = "int fake() {}";

        void teardown()
        {
        }
    "#;

    let analyzer = scan(source);
    let functions = analyzer.functions();
    let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["setup", "teardown"]);

    // Extents cover signature line through closing brace line.
    assert_eq!(functions[0].start.line, 7);
    assert_eq!(functions[0].end.line, 9);
    assert_eq!(functions[1].start.line, 15);
    assert_eq!(functions[1].end.line, 17);
}

#[test]
fn test_records_do_not_overlap() {
    let source = "void a() {}\nvoid b() {}\nvoid c() {}\n";
    let functions = scan(source).functions();
    assert_eq!(functions.len(), 3);
    for pair in functions.windows(2) {
        assert!(pair[0].end.line <= pair[1].start.line);
    }
}

#[test]
fn test_unterminated_block_is_fatal() {
    let mut analyzer = Analyzer::new();
    let err = analyzer.scan("void f() {\n").unwrap_err();
    assert!(matches!(err, ScanError::UnterminatedBlock { .. }));
}

#[test]
fn test_stray_close_is_fatal() {
    let mut analyzer = Analyzer::new();
    let err = analyzer.scan("void f() }\n").unwrap_err();
    match err {
        ScanError::MismatchedDelimiter { location, .. } => {
            assert_eq!(location, SourceLocation::new(1, 10));
        }
        other => panic!("expected mismatched delimiter, got {:?}", other),
    }
}

#[test]
fn test_directive_statements_are_classified() {
    let source = "#include <stdio.h>\n#define WIDE \\\n    1\nint x;\n";
    let analyzer = scan(source);
    let kinds: Vec<StatementKind> = analyzer.statements().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::Directive,
            StatementKind::Directive,
            StatementKind::Code,
        ]
    );
}

#[test]
fn test_deep_nesting_stays_out_of_top_level_view() {
    let source = "int table[3][4];\nvoid f()\n{\n    if (x) { while (y) { z; } }\n}\n";
    let analyzer = scan(source);
    for statement in analyzer.statements_at_level(0) {
        assert_eq!(statement.level, 0);
    }
    // The nested body never produces a top-level code statement besides the
    // two signatures.
    let top_code: Vec<&str> = analyzer
        .statements_at_level(0)
        .iter()
        .filter(|s| s.kind == StatementKind::Code)
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(top_code, vec!["int table", "void f"]);
}

#[test]
fn test_index_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("app.c");
    fs::write(
        &file,
        "#include <app.h>\n\nvoid init()\n{\n}\n\nvoid shutdown()\n{\n}\n",
    )
    .expect("write");

    let mut index = FunctionIndex::new();
    let summary = index.scan_tree(dir.path());
    assert_eq!(summary.scanned, 1);
    assert!(summary.failures.is_empty());

    assert_eq!(index.function_at(&file, 4).map(|f| f.name.as_str()), Some("init"));
    assert_eq!(
        index.function_at(&file, 8).map(|f| f.name.as_str()),
        Some("shutdown")
    );
    assert_eq!(index.function_at(&file, 1), None);
    assert_eq!(index.function_at(&file, 6), None);

    let missing = PathBuf::from(dir.path()).join("other.c");
    assert_eq!(index.function_at(&missing, 1), None);
}
