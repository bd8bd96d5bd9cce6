//! Typed wrapper around calibre's `calibredb` tool.
//!
//! ```no_run
//! use calibrewrap::calibredb::{Calibre, options::ListOptions};
//!
//! # fn main() -> calibrewrap::calibredb::Result<()> {
//! let calibre = Calibre::builder().library("/srv/books").build()?;
//! let listing = calibre.run_blocking(&ListOptions::default(), &[])?;
//! println!("{listing}");
//! # Ok(())
//! # }
//! ```

pub mod calibredb;
pub mod models;
