//! Tool + library location parsing.
//!
//! parse_tool    -> ToolCommand { program, prefix args }
//! parse_library -> LibraryLocation { Local | Remote }
//!
//! A library is remote when it parses as an http(s) URL, i.e. a calibre
//! Content server such as `http://localhost:8080/#mylibrary`.
use shell_words::split as shell_split;
use std::fmt;
use url::Url;

use super::error::{CalibreError, Result};

/// Executable plus any wrapper arguments placed before the sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub prefix: Vec<String>,
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, self.prefix.join(" "))
        }
    }
}

/// Parse a calibredb location, e.g. `/usr/bin/calibredb` or
/// `flatpak run --command=calibredb com.calibre_ebook.calibre`.
pub fn parse_tool(raw: &str) -> Result<ToolCommand> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalibreError::config("calibredb location is empty"));
    }

    let parts = shell_split(trimmed)
        .map_err(|e| CalibreError::config(format!("cannot parse calibredb location: {e}")))?;
    let Some((program, prefix)) = parts.split_first() else {
        return Err(CalibreError::config(
            "no tokens produced when parsing calibredb location",
        ));
    };
    if program.is_empty() {
        return Err(CalibreError::config("empty program name in calibredb location"));
    }

    Ok(ToolCommand {
        program: program.clone(),
        prefix: prefix.to_vec(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryLocation {
    /// Library folder on disk.
    Local(String),
    /// calibre Content server (`http(s)://host:port/#library_id`).
    Remote(Url),
}

impl LibraryLocation {
    pub fn is_remote(&self) -> bool {
        matches!(self, LibraryLocation::Remote(_))
    }

    /// Value for `--with-library=`.
    pub fn as_arg(&self) -> &str {
        match self {
            LibraryLocation::Local(path) => path,
            LibraryLocation::Remote(url) => url.as_str(),
        }
    }
}

impl fmt::Display for LibraryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryLocation::Local(path) => write!(f, "local: {path}"),
            LibraryLocation::Remote(url) => write!(f, "remote: {url}"),
        }
    }
}

pub fn parse_library(raw: &str) -> Result<LibraryLocation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalibreError::config("library path is empty"));
    }

    if let Ok(url) = Url::parse(trimmed)
        && matches!(url.scheme(), "http" | "https")
    {
        return Ok(LibraryLocation::Remote(url));
    }
    Ok(LibraryLocation::Local(trimmed.to_string()))
}
