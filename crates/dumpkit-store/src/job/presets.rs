//! Built-in jobs for the two legacy exports

use crate::errors::job_validation;
use crate::job::format_v0::JobSpec;
use dumpkit_core::errors::ExError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A ready-made job for a known dump layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Published WordPress posts of type `post`, entities decoded
    WordpressPosts,
    /// Every row of the FAQ `qa_posts` table, grouped by `type`
    QaPosts,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::WordpressPosts, Preset::QaPosts];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::WordpressPosts => "wordpress-posts",
            Preset::QaPosts => "qa-posts",
        }
    }

    /// Output path used when none is given
    pub fn default_output(&self) -> PathBuf {
        match self {
            Preset::WordpressPosts => PathBuf::from("data_extraction/wordpress_posts.json"),
            Preset::QaPosts => PathBuf::from("data_extraction/qa_posts.json"),
        }
    }

    /// Build the job for `dump`, writing to `output` or the default path
    pub fn job(&self, dump: &Path, output: Option<&Path>) -> JobSpec {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output());

        match self {
            Preset::WordpressPosts => {
                let mut job = JobSpec::new("wordpress_posts", dump, "wp_posts", output);
                job.filters
                    .insert("post_status".to_string(), "publish".to_string());
                job.filters.insert("post_type".to_string(), "post".to_string());
                job.unescape_html = true;
                job.sample_columns = Some(vec!["ID".to_string(), "post_title".to_string()]);
                job
            }
            Preset::QaPosts => {
                let mut job = JobSpec::new("qa_posts", dump, "qa_posts", output);
                job.unescape_html = true;
                job.group_by = Some("type".to_string());
                job
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| {
                job_validation(&format!(
                    "Unknown preset '{}', expected one of: wordpress-posts, qa-posts",
                    s
                ))
            })
    }
}
