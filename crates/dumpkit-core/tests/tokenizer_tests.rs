#![allow(clippy::unwrap_used, clippy::expect_used)]

use dumpkit_core::tokenizer::{parse_tuples, scan_tuples};
use dumpkit_core::SqlValue;
use proptest::prelude::*;

#[test]
fn test_quoted_comma_and_null() {
    // (1,'a,b',NULL) -> [1, "a,b", null]
    let tuples = parse_tuples("(1,'a,b',NULL)");
    assert_eq!(
        tuples,
        vec![vec![
            SqlValue::Int(1),
            SqlValue::Str("a,b".to_string()),
            SqlValue::Null
        ]]
    );
}

#[test]
fn test_escaped_single_quote() {
    // ('it\'s ok') -> ["it's ok"]
    let tuples = parse_tuples(r"('it\'s ok')");
    assert_eq!(tuples, vec![vec![SqlValue::Str("it's ok".to_string())]]);
}

#[test]
fn test_wordpress_style_row() {
    let block = r#"(12,1,'2020-03-01 10:00:00','<p>Hello\r\n<a href=\"/x\">link</a></p>','Title','','publish',0.0,NULL)"#;
    let tuples = parse_tuples(block);
    assert_eq!(tuples.len(), 1);

    let row = &tuples[0];
    assert_eq!(row.len(), 9);
    assert_eq!(row[0], SqlValue::Int(12));
    assert_eq!(
        row[3],
        SqlValue::Str("<p>Hello\r\n<a href=\"/x\">link</a></p>".to_string())
    );
    assert_eq!(row[5], SqlValue::Str(String::new()));
    assert_eq!(row[7], SqlValue::Float(0.0));
    assert_eq!(row[8], SqlValue::Null);
}

#[test]
fn test_whitespace_between_values_is_ignored() {
    let tuples = parse_tuples("( 1 , 'a' ,\n  NULL )");
    assert_eq!(
        tuples,
        vec![vec![
            SqlValue::Int(1),
            SqlValue::Str("a".to_string()),
            SqlValue::Null
        ]]
    );
}

#[test]
fn test_unbalanced_quote_is_best_effort() {
    let scan = scan_tuples("(1,'never closed),(2,'b')");
    assert!(scan.unterminated);
    assert!(scan.tuples.is_empty());
}

#[derive(Debug, Clone)]
enum Literal {
    Int(i64),
    Text(String),
    Null,
}

fn literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        any::<i64>().prop_map(Literal::Int),
        "[a-zA-Z0-9 ,;()'\"\\\\\n\t]{0,24}".prop_map(Literal::Text),
        Just(Literal::Null),
    ]
}

fn render(values: &[Literal]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| match v {
            Literal::Int(i) => i.to_string(),
            Literal::Null => "NULL".to_string(),
            Literal::Text(s) => {
                let escaped = s
                    .replace('\\', "\\\\")
                    .replace('\'', "\\'")
                    .replace('"', "\\\"")
                    .replace('\n', "\\n")
                    .replace('\t', "\\t");
                format!("'{}'", escaped)
            }
        })
        .collect();
    format!("({})", parts.join(","))
}

fn expected(values: &[Literal]) -> Vec<SqlValue> {
    values
        .iter()
        .map(|v| match v {
            Literal::Int(i) => SqlValue::Int(*i),
            Literal::Null => SqlValue::Null,
            Literal::Text(s) => SqlValue::Str(s.clone()),
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_never_panics(input in "\\PC{0,200}") {
        let _ = scan_tuples(&input);
    }

    #[test]
    fn prop_mysqldump_rows_parse_back(rows in prop::collection::vec(prop::collection::vec(literal(), 1..8), 1..5)) {
        let block = rows.iter().map(|r| render(r)).collect::<Vec<_>>().join(",\n");
        let scan = scan_tuples(&block);

        prop_assert!(!scan.unterminated);
        let want: Vec<Vec<SqlValue>> = rows.iter().map(|r| expected(r)).collect();
        prop_assert_eq!(scan.tuples, want);
    }
}
