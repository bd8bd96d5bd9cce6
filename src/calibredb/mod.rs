/*!
calibredb - typed invocation of calibre's `calibredb` command-line tool.

Pipeline per call:
  - schema:   option set -> validation -> argument vector
  - client:   prefix args, remote credentials, `--with-library=` (always last)
  - exec:     spawn, drain stdout+stderr together, optional timeout
  - classify: strip status noise on success, keep the fault line on failure

Option sets live in `options`, one struct per sub-command.
*/

pub mod choices;
pub mod classify;
pub mod client;
pub mod error;
pub mod exec;
pub mod location;
pub mod options;
pub mod schema;

pub use classify::{Classified, classify};
pub use client::{Calibre, CalibreBuilder, OnError, blocking};
pub use error::{CalibreError, ErrorKind, Result, to_exit_code};
pub use location::{LibraryLocation, ToolCommand};
pub use schema::{CommandOptions, Field, ZeroPolicy, build_args, validate};
