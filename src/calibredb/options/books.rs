//! Option sets for sub-commands that add, remove, list and edit books.

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::calibredb::choices::Automerge;
use crate::calibredb::schema::{CommandOptions, Field};

/* ---- add ---- */

/// `calibredb add [options] file1 file2 ...`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AddOptions {
    /// Files or folders to add
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Add books even if they already exist
    #[arg(long, value_name = "BOOL")]
    pub duplicates: Option<bool>,

    /// Merge incoming formats into existing records
    #[arg(long, value_enum)]
    pub automerge: Option<Automerge>,

    /// Add an empty book (a book with no formats)
    #[arg(long, value_name = "BOOL")]
    pub empty: Option<bool>,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub title: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub authors: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub isbn: String,

    /// Identifier (e.g. asin:XXX), repeatable
    #[arg(long)]
    pub identifier: Vec<String>,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub tags: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub series: String,

    /// Series number; 0 is a valid index
    #[arg(long)]
    pub series_index: Option<f64>,

    /// Path to the cover image
    #[arg(long, default_value = "", hide_default_value = true)]
    pub cover: String,

    /// Comma separated list of languages
    #[arg(long, default_value = "", hide_default_value = true)]
    pub languages: String,

    #[arg(long, value_name = "BOOL")]
    pub one_book_per_directory: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub recurse: Option<bool>,

    /// Glob of files to ignore when scanning folders, repeatable
    #[arg(long, value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Glob of files to add when scanning folders, repeatable
    #[arg(long, value_name = "GLOB")]
    pub add: Vec<String>,
}

impl CommandOptions for AddOptions {
    const COMMAND: &'static str = "add";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::args("files", &self.files).required(),
            Field::switch("duplicates", self.duplicates),
            Field::choice("automerge", self.automerge.map(Automerge::as_str)),
            Field::switch("empty", self.empty),
            Field::text("title", &self.title),
            Field::text("authors", &self.authors),
            Field::text("isbn", &self.isbn),
            Field::repeated("identifier", &self.identifier),
            Field::text("tags", &self.tags),
            Field::text("series", &self.series),
            Field::kept_float("series-index", self.series_index),
            Field::text("cover", &self.cover),
            Field::text("languages", &self.languages),
            Field::switch("one-book-per-directory", self.one_book_per_directory),
            Field::switch("recurse", self.recurse),
            Field::repeated("ignore", &self.ignore),
            Field::repeated("add", &self.add),
        ]
    }
}

/* ---- add_format ---- */

/// `calibredb add_format [options] id ebook_file`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AddFormatOptions {
    #[arg(value_name = "ID", default_value = "", hide_default_value = true)]
    pub id: String,

    #[arg(value_name = "EBOOK_FILE", default_value = "", hide_default_value = true)]
    pub ebook_file: String,

    /// Do not replace the format if it already exists
    #[arg(long, value_name = "BOOL")]
    pub dont_replace: Option<bool>,

    /// Add the file as an extra data file to the book, not an e-book format
    #[arg(long, value_name = "BOOL")]
    pub as_extra_data_file: Option<bool>,
}

impl CommandOptions for AddFormatOptions {
    const COMMAND: &'static str = "add_format";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("id", &self.id).required(),
            Field::arg("ebook_file", &self.ebook_file).required(),
            Field::switch("dont-replace", self.dont_replace),
            Field::switch("as-extra-data-file", self.as_extra_data_file),
        ]
    }
}

/* ---- remove ---- */

/// `calibredb remove ids`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RemoveOptions {
    /// Book ids or ranges (e.g. 23,34,57-85)
    #[arg(value_name = "IDS")]
    pub ids: Vec<String>,

    /// Do not use the Trash
    #[arg(long, value_name = "BOOL")]
    pub permanent: Option<bool>,
}

impl CommandOptions for RemoveOptions {
    const COMMAND: &'static str = "remove";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::args("ids", &self.ids).required(),
            Field::switch("permanent", self.permanent),
        ]
    }
}

/* ---- remove_format ---- */

/// `calibredb remove_format [options] id fmt`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RemoveFormatOptions {
    #[arg(value_name = "ID", default_value = "", hide_default_value = true)]
    pub id: String,

    /// Format extension, e.g. EPUB
    #[arg(value_name = "FMT", default_value = "", hide_default_value = true)]
    pub fmt: String,
}

impl CommandOptions for RemoveFormatOptions {
    const COMMAND: &'static str = "remove_format";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("id", &self.id).required(),
            Field::arg("fmt", &self.fmt).required(),
        ]
    }
}

/* ---- list ---- */

/// `calibredb list [options]`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ListOptions {
    /// Comma separated fields to display, or "all"
    #[arg(long, default_value = "", hide_default_value = true)]
    pub fields: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub sort_by: String,

    #[arg(long, value_name = "BOOL")]
    pub ascending: Option<bool>,

    /// Filter with a calibre search query
    #[arg(long, default_value = "", hide_default_value = true)]
    pub search: String,

    #[arg(long, default_value_t = 0, hide_default_value = true)]
    pub line_width: i64,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub separator: String,

    /// Prefix for all file paths
    #[arg(long, default_value = "", hide_default_value = true)]
    pub prefix: String,

    /// Maximum number of results (0 = all)
    #[arg(long, default_value_t = 0, hide_default_value = true)]
    pub limit: i64,

    /// Emit JSON
    #[arg(long, value_name = "BOOL")]
    pub for_machine: Option<bool>,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub template: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub template_file: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub template_heading: String,
}

impl CommandOptions for ListOptions {
    const COMMAND: &'static str = "list";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("fields", &self.fields),
            Field::text("sort-by", &self.sort_by),
            Field::switch("ascending", self.ascending),
            Field::text("search", &self.search),
            Field::int("line-width", self.line_width),
            Field::text("separator", &self.separator),
            Field::text("prefix", &self.prefix),
            Field::int("limit", self.limit),
            Field::switch("for-machine", self.for_machine),
            Field::text("template", &self.template),
            Field::text("template_file", &self.template_file),
            Field::text("template_heading", &self.template_heading),
        ]
    }
}

/* ---- show_metadata ---- */

/// `calibredb show_metadata [options] id`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ShowMetadataOptions {
    #[arg(value_name = "ID", default_value = "", hide_default_value = true)]
    pub id: String,

    /// Print metadata in OPF form (XML)
    #[arg(long, value_name = "BOOL")]
    pub as_opf: Option<bool>,
}

impl CommandOptions for ShowMetadataOptions {
    const COMMAND: &'static str = "show_metadata";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("id", &self.id).required(),
            Field::switch("as-opf", self.as_opf),
        ]
    }
}

/* ---- set_metadata ---- */

/// `calibredb set_metadata [options] book_id [/path/to/metadata.opf]`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SetMetadataOptions {
    #[arg(value_name = "BOOK_ID", default_value = "", hide_default_value = true)]
    pub book_id: String,

    /// OPF file to read metadata from
    #[arg(value_name = "OPF", default_value = "", hide_default_value = true)]
    pub path: String,

    /// field_name:value pairs, repeatable
    #[arg(long = "field", value_name = "NAME:VALUE")]
    pub field: Vec<String>,

    /// List the metadata field names usable with --field
    #[arg(long, value_name = "BOOL")]
    pub list_fields: Option<bool>,
}

impl CommandOptions for SetMetadataOptions {
    const COMMAND: &'static str = "set_metadata";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("book_id", &self.book_id).required(),
            Field::arg("path", &self.path),
            Field::repeated("field", &self.field),
            Field::switch("list-fields", self.list_fields),
        ]
    }
}

/* ---- export ---- */

/// `calibredb export [options] ids`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ExportOptions {
    #[arg(value_name = "IDS")]
    pub ids: Vec<String>,

    /// Export all books, ignoring the list of ids
    #[arg(long, value_name = "BOOL")]
    pub all: Option<bool>,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub to_dir: String,

    /// Export all books into a single folder
    #[arg(long, value_name = "BOOL")]
    pub single_dir: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub progress: Option<bool>,

    /// Comma separated list of formats to save
    #[arg(long, default_value = "", hide_default_value = true)]
    pub formats: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub template: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub timefmt: String,

    #[arg(long, value_name = "BOOL")]
    pub dont_asciiize: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub dont_save_cover: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub dont_write_opf: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub dont_update_metadata: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub replace_whitespace: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub to_lowercase: Option<bool>,
}

impl CommandOptions for ExportOptions {
    const COMMAND: &'static str = "export";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::args("ids", &self.ids).required(),
            Field::switch("all", self.all),
            Field::text("to-dir", &self.to_dir),
            Field::switch("single-dir", self.single_dir),
            Field::switch("progress", self.progress),
            Field::text("formats", &self.formats),
            Field::text("template", &self.template),
            Field::text("timefmt", &self.timefmt),
            Field::switch("dont-asciiize", self.dont_asciiize),
            Field::switch("dont-save-cover", self.dont_save_cover),
            Field::switch("dont-write-opf", self.dont_write_opf),
            Field::switch("dont-update-metadata", self.dont_update_metadata),
            Field::switch("replace-whitespace", self.replace_whitespace),
            Field::switch("to-lowercase", self.to_lowercase),
        ]
    }
}

/* ---- embed_metadata ---- */

/// `calibredb embed_metadata [options] book_id`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EmbedMetadataOptions {
    /// Book id(s): "1", "1 2 3", "1-10" or "all"
    #[arg(value_name = "BOOK_ID", default_value = "", hide_default_value = true)]
    pub book_id: String,

    /// Only update metadata in files of this format, repeatable
    #[arg(long, value_name = "FMT")]
    pub only_formats: Vec<String>,
}

impl CommandOptions for EmbedMetadataOptions {
    const COMMAND: &'static str = "embed_metadata";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("book_id", &self.book_id).required(),
            Field::repeated("only-formats", &self.only_formats),
        ]
    }
}

/* ---- search ---- */

/// `calibredb search [options] search expression`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SearchOptions {
    #[arg(value_name = "EXPRESSION", default_value = "", hide_default_value = true)]
    pub expression: String,

    /// Maximum number of ids to return (0 = all)
    #[arg(long, default_value_t = 0, hide_default_value = true)]
    pub limit: i64,
}

impl CommandOptions for SearchOptions {
    const COMMAND: &'static str = "search";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("expression", &self.expression).required(),
            Field::int("limit", self.limit),
        ]
    }
}
