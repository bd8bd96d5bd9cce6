//! Typed option sets, one per calibredb sub-command.

pub mod books;
pub mod columns;
pub mod fts;
pub mod library;

pub use books::{
    AddFormatOptions, AddOptions, EmbedMetadataOptions, ExportOptions, ListOptions,
    RemoveFormatOptions, RemoveOptions, SearchOptions, SetMetadataOptions, ShowMetadataOptions,
};
pub use columns::{
    AddCustomColumnOptions, CustomColumnsOptions, RemoveCustomColumnOptions, SetCustomOptions,
};
pub use fts::{FtsIndexOptions, FtsSearchOptions};
pub use library::{
    BackupMetadataOptions, CatalogOptions, CheckLibraryOptions, CloneOptions,
    ListCategoriesOptions, RestoreDatabaseOptions, SavedSearchesOptions,
};
