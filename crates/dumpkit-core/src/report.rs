//! Human-oriented summaries of extracted records

use crate::record::Record;

const TITLE_WIDTH: usize = 60;

/// Count records per distinct value of `column`, in order of first appearance
///
/// Records without the column are counted under the empty string.
pub fn group_counts(records: &[Record], column: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let key = record
            .get(column)
            .map(|v| v.to_string())
            .unwrap_or_default();
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

/// One line per record: `[id] title`, for the first `n` records
///
/// `id_columns` and `title_columns` are tried in order; the first column
/// holding a non-NULL value wins. Titles are cut to 60 characters.
pub fn sample_lines(
    records: &[Record],
    n: usize,
    id_columns: &[&str],
    title_columns: &[&str],
) -> Vec<String> {
    records
        .iter()
        .take(n)
        .map(|record| {
            let id = first_present(record, id_columns).unwrap_or_else(|| "?".to_string());
            let title =
                first_present(record, title_columns).unwrap_or_else(|| "No title".to_string());
            format!("[{}] {}", id, truncate(&title, TITLE_WIDTH))
        })
        .collect()
}

fn first_present(record: &Record, columns: &[&str]) -> Option<String> {
    columns
        .iter()
        .find_map(|c| record.get(c).filter(|v| !v.is_null()))
        .map(|v| v.to_string())
}

fn truncate(text: &str, width: usize) -> String {
    let single_line = text.replace(['\r', '\n'], " ");
    match single_line.char_indices().nth(width) {
        Some((cut, _)) => single_line[..cut].to_string(),
        None => single_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    fn qa(id: i64, kind: &str, title: &str) -> Record {
        let columns = vec!["post_id".to_string(), "type".to_string(), "title".to_string()];
        Record::from_tuple(&columns, vec![SqlValue::Int(id), kind.into(), title.into()]).unwrap()
    }

    #[test]
    fn test_group_counts_first_appearance_order() {
        let records = vec![qa(1, "Q", "a"), qa(2, "A", "b"), qa(3, "Q", "c")];
        assert_eq!(
            group_counts(&records, "type"),
            vec![("Q".to_string(), 2), ("A".to_string(), 1)]
        );
    }

    #[test]
    fn test_group_counts_missing_column() {
        let records = vec![qa(1, "Q", "a")];
        assert_eq!(group_counts(&records, "status"), vec![(String::new(), 1)]);
    }

    #[test]
    fn test_sample_lines_fallbacks_and_truncation() {
        let long = "x".repeat(80);
        let records = vec![qa(1, "Q", &long), qa(2, "A", "short\nline"), qa(3, "Q", "c")];

        let lines = sample_lines(&records, 2, &["ID", "post_id"], &["post_title", "title"]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("[1] {}", "x".repeat(60)));
        assert_eq!(lines[1], "[2] short line");

        let missing = sample_lines(&records, 1, &["id"], &["question"]);
        assert_eq!(missing, vec!["[?] No title"]);

        let columns = vec!["post_id".to_string(), "title".to_string()];
        let untitled =
            Record::from_tuple(&columns, vec![SqlValue::Int(4), SqlValue::Null]).unwrap();
        assert_eq!(
            sample_lines(&[untitled], 1, &["post_id"], &["title"]),
            vec!["[4] No title"]
        );
    }
}
