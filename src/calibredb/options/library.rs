//! Library-wide operations: catalogs, saved searches, checks, backups.

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::calibredb::choices::Dialect;
use crate::calibredb::schema::{CommandOptions, Field};

/// `calibredb catalog /path/to/destination.(csv|epub|mobi|xml...) [options]`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CatalogOptions {
    /// Destination file; the extension selects the catalog format
    #[arg(value_name = "PATH", default_value = "", hide_default_value = true)]
    pub path: String,

    /// Comma separated list of book ids to catalog
    #[arg(long, default_value = "", hide_default_value = true)]
    pub ids: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub search: String,

    /// Show detailed output information
    #[arg(id = "catalog_verbose", long = "catalog-verbose", value_name = "BOOL")]
    pub verbose: Option<bool>,
}

impl CommandOptions for CatalogOptions {
    const COMMAND: &'static str = "catalog";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("path", &self.path).required(),
            Field::text("ids", &self.ids),
            Field::text("search", &self.search),
            Field::switch("verbose", self.verbose),
        ]
    }
}

/// `calibredb saved_searches [options] (list|add|remove) ...`
///
/// Takes no options; the action and its operands are free-form arguments.
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SavedSearchesOptions {}

impl CommandOptions for SavedSearchesOptions {
    const COMMAND: &'static str = "saved_searches";

    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }
}

/// `calibredb check_library [options]`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CheckLibraryOptions {
    /// Output in CSV
    #[arg(long, value_name = "BOOL")]
    pub csv: Option<bool>,

    /// Comma separated list of reports
    #[arg(long, default_value = "", hide_default_value = true)]
    pub report: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub ignore_extensions: String,

    #[arg(long, default_value = "", hide_default_value = true)]
    pub ignore_names: String,

    /// Vacuum the full text search database (can be slow)
    #[arg(long, value_name = "BOOL")]
    pub vacuum_fts_db: Option<bool>,
}

impl CommandOptions for CheckLibraryOptions {
    const COMMAND: &'static str = "check_library";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::switch("csv", self.csv),
            Field::text("report", &self.report),
            Field::text("ignore_extensions", &self.ignore_extensions),
            Field::text("ignore_names", &self.ignore_names),
            Field::switch("vacuum-fts-db", self.vacuum_fts_db),
        ]
    }
}

/// `calibredb restore_database [options]`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RestoreDatabaseOptions {
    /// Required by calibredb to actually perform the restore
    #[arg(long, value_name = "BOOL")]
    pub really_do_it: Option<bool>,
}

impl CommandOptions for RestoreDatabaseOptions {
    const COMMAND: &'static str = "restore_database";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::switch("really-do-it", self.really_do_it)]
    }
}

/// `calibredb list_categories [options]`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ListCategoriesOptions {
    /// Output only the number of items in each category
    #[arg(long = "item_count", value_name = "BOOL")]
    pub item_count: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub csv: Option<bool>,

    #[arg(long, value_enum)]
    pub dialect: Option<Dialect>,

    /// Comma separated category lookup names
    #[arg(long, default_value = "", hide_default_value = true)]
    pub categories: String,

    /// Maximum line width (0 = detect)
    #[arg(long, default_value_t = 0, hide_default_value = true)]
    pub width: i64,
}

impl CommandOptions for ListCategoriesOptions {
    const COMMAND: &'static str = "list_categories";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::switch("item_count", self.item_count),
            Field::switch("csv", self.csv),
            Field::choice("dialect", self.dialect.map(Dialect::as_str)),
            Field::text("categories", &self.categories),
            Field::int("width", self.width),
        ]
    }
}

/// `calibredb backup_metadata [options]`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BackupMetadataOptions {
    /// Back up every book, not only those with stale OPF files
    #[arg(long, value_name = "BOOL")]
    pub all: Option<bool>,
}

impl CommandOptions for BackupMetadataOptions {
    const COMMAND: &'static str = "backup_metadata";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::switch("all", self.all)]
    }
}

/// `calibredb clone path/to/new/library`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CloneOptions {
    #[arg(value_name = "PATH", default_value = "", hide_default_value = true)]
    pub path: String,
}

impl CommandOptions for CloneOptions {
    const COMMAND: &'static str = "clone";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::arg("path", &self.path).required()]
    }
}
