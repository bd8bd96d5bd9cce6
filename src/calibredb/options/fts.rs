//! Full text search indexing and querying.

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::calibredb::choices::{FtsAction, IndexingSpeed, OutputFormat};
use crate::calibredb::schema::{CommandOptions, Field};

/// `calibredb fts_index [options] enable/disable/status/reindex`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FtsIndexOptions {
    #[arg(value_name = "ACTION", value_enum)]
    pub action: Option<FtsAction>,

    /// Wait until all books are indexed
    #[arg(long, value_name = "BOOL")]
    pub wait_for_completion: Option<bool>,

    #[arg(long, value_enum)]
    pub indexing_speed: Option<IndexingSpeed>,
}

impl CommandOptions for FtsIndexOptions {
    const COMMAND: &'static str = "fts_index";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("action", self.action.map_or("", FtsAction::as_str)).required(),
            Field::switch("wait-for-completion", self.wait_for_completion),
            Field::choice(
                "indexing-speed",
                self.indexing_speed.map(IndexingSpeed::as_str),
            ),
        ]
    }
}

/// `calibredb fts_search [options] search expression`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FtsSearchOptions {
    #[arg(value_name = "EXPRESSION", default_value = "", hide_default_value = true)]
    pub expression: String,

    /// Include snippets of matched text
    #[arg(long, value_name = "BOOL")]
    pub include_snippets: Option<bool>,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub match_start_marker: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub match_end_marker: String,

    #[arg(long, value_name = "BOOL")]
    pub do_not_match_on_related_words: Option<bool>,

    /// Restrict searched books, e.g. "ids:1,2,3" or a search expression
    #[arg(long, default_value = "", hide_default_value = true)]
    pub restrict_to: String,

    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Percentage of books that must be indexed before searching (0 = default)
    #[arg(long, default_value_t = 0.0, hide_default_value = true)]
    pub indexing_threshold: f64,
}

impl CommandOptions for FtsSearchOptions {
    const COMMAND: &'static str = "fts_search";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("expression", &self.expression).required(),
            Field::switch("include-snippets", self.include_snippets),
            Field::text("match-start-marker", &self.match_start_marker),
            Field::text("match-end-marker", &self.match_end_marker),
            Field::switch(
                "do-not-match-on-related-words",
                self.do_not_match_on_related_words,
            ),
            Field::text("restrict-to", &self.restrict_to),
            Field::choice("output-format", self.output_format.map(OutputFormat::as_str)),
            Field::float("indexing-threshold", self.indexing_threshold),
        ]
    }
}
