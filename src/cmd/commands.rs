/*!
`commands.rs`

One CLI sub-command per calibredb sub-command, plus three conveniences:

  calibrewrap <calibredb-command> [options] [-- extra args...]
  calibrewrap books [list options]       (structured records via --for-machine)
  calibrewrap version
  calibrewrap help [COMMAND]

Pass-through commands share a single shape: the typed option set flattened
into the sub-command, and anything after `--` forwarded verbatim.
*/

use anyhow::{Context, Result};
use clap::Subcommand;

use calibrewrap::calibredb::Calibre;
use calibrewrap::calibredb::options::*;
use calibrewrap::models::Book;

/// Result of one dispatched command, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub command: &'static str,
    pub output: String,
    pub books: Option<Vec<Book>>,
}

macro_rules! calibredb_commands {
    ($( $(#[$doc:meta])* $variant:ident($opts:ty) = $name:literal; )+) => {
        #[derive(Subcommand, Debug)]
        pub enum Commands {
            $(
                $(#[$doc])*
                #[command(name = $name)]
                $variant {
                    #[command(flatten)]
                    opts: $opts,

                    /// Extra arguments forwarded to calibredb verbatim (after `--`)
                    #[arg(last = true, value_name = "ARGS")]
                    extra: Vec<String>,
                },
            )+

            /// List books as structured records (list --for-machine)
            Books {
                #[command(flatten)]
                opts: ListOptions,
            },

            /// Print the calibredb version
            Version,

            /// Show calibredb help, optionally for one sub-command
            Help {
                #[arg(value_name = "COMMAND")]
                command: Option<String>,
            },
        }

        impl Commands {
            pub fn name(&self) -> &'static str {
                match self {
                    $( Commands::$variant { .. } => $name, )+
                    Commands::Books { .. } => "books",
                    Commands::Version => "version",
                    Commands::Help { .. } => "help",
                }
            }
        }

        /// Run `command` against `calibre`.
        pub async fn dispatch(calibre: &Calibre, command: Commands) -> Result<Outcome> {
            let name = command.name();
            match command {
                $(
                    Commands::$variant { opts, extra } => {
                        let output = calibre
                            .run(&opts, &extra)
                            .await
                            .with_context(|| format!("calibredb {name} failed"))?;
                        Ok(Outcome { command: name, output, books: None })
                    }
                )+
                Commands::Books { opts } => {
                    let books = calibre
                        .list_books(opts)
                        .await
                        .context("listing books failed")?;
                    Ok(Outcome {
                        command: name,
                        output: format!("{} book(s)", books.len()),
                        books: Some(books),
                    })
                }
                Commands::Version => Ok(Outcome {
                    command: name,
                    output: calibre.version().await?,
                    books: None,
                }),
                Commands::Help { command } => {
                    let output = match command.as_deref() {
                        Some(sub) if !sub.trim().is_empty() => calibre.help_for(sub.trim()).await?,
                        _ => calibre.help().await?,
                    };
                    Ok(Outcome { command: name, output, books: None })
                }
            }
        }
    };
}

calibredb_commands! {
    /// Add books to the library
    Add(AddOptions) = "add";
    /// Add (or replace) a format of an existing book
    AddFormat(AddFormatOptions) = "add_format";
    /// Remove books by id
    Remove(RemoveOptions) = "remove";
    /// Remove one format from a book
    RemoveFormat(RemoveFormatOptions) = "remove_format";
    /// List books (text table)
    List(ListOptions) = "list";
    /// Show metadata of one book
    ShowMetadata(ShowMetadataOptions) = "show_metadata";
    /// Set metadata from an OPF file or individual fields
    SetMetadata(SetMetadataOptions) = "set_metadata";
    /// Export books to the filesystem
    Export(ExportOptions) = "export";
    /// Generate a catalog
    Catalog(CatalogOptions) = "catalog";
    /// Manage saved searches (list | add NAME EXPR | remove NAME)
    SavedSearches(SavedSearchesOptions) = "saved_searches";
    /// Create a custom column
    AddCustomColumn(AddCustomColumnOptions) = "add_custom_column";
    /// List custom columns
    CustomColumns(CustomColumnsOptions) = "custom_columns";
    /// Remove a custom column
    RemoveCustomColumn(RemoveCustomColumnOptions) = "remove_custom_column";
    /// Set a custom column value for one book
    SetCustom(SetCustomOptions) = "set_custom";
    /// Check the library for problems
    CheckLibrary(CheckLibraryOptions) = "check_library";
    /// Rebuild the database from OPF backups
    RestoreDatabase(RestoreDatabaseOptions) = "restore_database";
    /// Report tag / category usage
    ListCategories(ListCategoriesOptions) = "list_categories";
    /// Write OPF backups for all books
    BackupMetadata(BackupMetadataOptions) = "backup_metadata";
    /// Create an empty library with the same custom columns
    CloneLibrary(CloneOptions) = "clone";
    /// Write current metadata into the book files
    EmbedMetadata(EmbedMetadataOptions) = "embed_metadata";
    /// Search the library and print matching ids
    Search(SearchOptions) = "search";
    /// Control full-text indexing
    FtsIndex(FtsIndexOptions) = "fts_index";
    /// Full-text search
    FtsSearch(FtsSearchOptions) = "fts_search";
}
