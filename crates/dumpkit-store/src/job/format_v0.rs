//! Job file format v0
//!
//! Defines the TOML structure for extraction jobs

use dumpkit_core::errors::ExError;
use dumpkit_core::{ExtractOptions, RowFilter};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level job file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFileV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Extractions to run, in file order
    #[serde(rename = "job", default)]
    pub jobs: Vec<JobSpec>,
}

/// One extraction: a table of a dump file written to a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    /// Unique job name
    pub name: String,

    /// Dump file to read
    pub dump: PathBuf,

    /// Table to extract
    pub table: String,

    /// JSON file to write
    pub output: PathBuf,

    /// Column names overriding the dump's own definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,

    /// Equality filters, all of which must match
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub filters: IndexMap<String, String>,

    /// Decode HTML entities in string values
    #[serde(default)]
    pub unescape_html: bool,

    /// Keep at most this many records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Column to report per-value counts for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,

    /// Write `{"count": N, "records": [...]}` instead of a bare list
    #[serde(default)]
    pub envelope: bool,

    /// Number of sample lines printed after the run
    #[serde(default = "default_sample_count")]
    pub sample: usize,

    /// `[id_column, title_column]` used for sample lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_columns: Option<Vec<String>>,
}

fn default_sample_count() -> usize {
    5
}

const DEFAULT_ID_COLUMNS: &[&str] = &["ID", "id", "post_id", "postid"];
const DEFAULT_TITLE_COLUMNS: &[&str] = &["post_title", "title", "name"];

impl JobSpec {
    /// Minimal job with every optional setting at its default
    pub fn new(
        name: impl Into<String>,
        dump: impl Into<PathBuf>,
        table: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            dump: dump.into(),
            table: table.into(),
            output: output.into(),
            columns: None,
            filters: IndexMap::new(),
            unescape_html: false,
            limit: None,
            group_by: None,
            envelope: false,
            sample: default_sample_count(),
            sample_columns: None,
        }
    }

    /// Translate into core extraction options
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            columns: self.columns.clone(),
            filters: self
                .filters
                .iter()
                .map(|(column, expected)| RowFilter::new(column.clone(), expected.clone()))
                .collect(),
            unescape_html: self.unescape_html,
            limit: self.limit,
        }
    }

    /// Candidate id and title columns for sample lines
    ///
    /// An explicit `sample_columns` pair wins; otherwise the common
    /// WordPress and Q&A column names are tried in order.
    pub fn sample_columns(&self) -> (Vec<&str>, Vec<&str>) {
        match self.sample_columns.as_deref() {
            Some([id, title]) => (vec![id.as_str()], vec![title.as_str()]),
            _ => (DEFAULT_ID_COLUMNS.to_vec(), DEFAULT_TITLE_COLUMNS.to_vec()),
        }
    }

    /// Attach this job's name to an error
    pub fn tag(&self, err: impl Into<ExError>) -> ExError {
        err.into().with_job(self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_toml() {
        let job: JobSpec = toml::from_str(
            r#"
name = "faq"
dump = "c1faq.sql"
table = "qa_posts"
output = "faq.json"
"#,
        )
        .unwrap();

        assert_eq!(job, JobSpec::new("faq", "c1faq.sql", "qa_posts", "faq.json"));
        assert_eq!(job.sample, 5);
        let (ids, titles) = job.sample_columns();
        assert_eq!(ids, vec!["ID", "id", "post_id", "postid"]);
        assert_eq!(titles, vec!["post_title", "title", "name"]);
    }

    #[test]
    fn test_extract_options_keep_filter_order() {
        let mut job = JobSpec::new("posts", "d.sql", "wp_posts", "out.json");
        job.filters.insert("post_status".into(), "publish".into());
        job.filters.insert("post_type".into(), "post".into());
        job.unescape_html = true;
        job.limit = Some(3);

        let options = job.extract_options();
        assert_eq!(
            options.filters,
            vec![
                RowFilter::new("post_status", "publish"),
                RowFilter::new("post_type", "post"),
            ]
        );
        assert!(options.unescape_html);
        assert_eq!(options.limit, Some(3));
        assert_eq!(options.columns, None);
    }

    #[test]
    fn test_explicit_sample_columns() {
        let mut job = JobSpec::new("posts", "d.sql", "wp_posts", "out.json");
        job.sample_columns = Some(vec!["ID".into(), "post_title".into()]);
        assert_eq!(job.sample_columns(), (vec!["ID"], vec!["post_title"]));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<JobSpec, _> = toml::from_str(
            r#"
name = "x"
dump = "d.sql"
table = "t"
output = "o.json"
filter = { a = "b" }
"#,
        );
        assert!(result.is_err());
    }
}
