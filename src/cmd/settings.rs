/*!
`settings.rs`

Connection settings for the CLI: where calibredb lives, which library to
open and how to authenticate against a Content server.

Sources (highest precedence first):
  1. CLI flags            (--calibredb, --library, --username, --password, --timeout)
  2. Environment          (CALIBREDB_PATH, CALIBRE_LIBRARY, CALIBRE_USERNAME, CALIBRE_PASSWORD)
  3. Config file          (--config path.(json|yaml|yml))

Flags and environment are merged by clap; the file only fills gaps.

Config file shape (JSON or YAML):
{
  "calibredb": "/usr/bin/calibredb",
  "library": "/srv/books",
  "username": "reader",
  "password": "...",
  "timeout_secs": 60
}
*/

use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use calibrewrap::calibredb::{Calibre, CalibreError, Result};

/* -------------------------------------------------------------------------- */
/* Argument Struct                                                            */
/* -------------------------------------------------------------------------- */

#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// calibredb executable, optionally with wrapper args (default: calibredb on PATH)
    #[arg(long, env = "CALIBREDB_PATH", global = true, value_name = "CMD")]
    pub calibredb: Option<String>,

    /// Library folder or Content server URL (http://host:port/#library_id)
    #[arg(short = 'l', long, env = "CALIBRE_LIBRARY", global = true, value_name = "PATH|URL")]
    pub library: Option<String>,

    /// Content server username (remote libraries only)
    #[arg(long, env = "CALIBRE_USERNAME", global = true)]
    pub username: Option<String>,

    /// Content server password (remote libraries only)
    #[arg(long, env = "CALIBRE_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Kill calibredb after this many seconds (0 = no limit)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Load connection settings from a JSON or YAML file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/* -------------------------------------------------------------------------- */
/* Config File                                                                */
/* -------------------------------------------------------------------------- */

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub calibredb: Option<String>,
    pub library: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "timeout")]
    pub timeout_secs: Option<u64>,
}

pub fn load_settings_file(path: &Path) -> Result<FileSettings> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CalibreError::config(format!("failed to read config file {}: {e}", path.display()))
    })?;
    let lower = path.to_string_lossy().to_ascii_lowercase();

    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        serde_yaml::from_str(&raw)
            .map_err(|e| CalibreError::config(format!("failed to parse YAML config file: {e}")))
    } else {
        serde_json::from_str(&raw)
            .map_err(|e| CalibreError::config(format!("failed to parse JSON config file: {e}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Resolution                                                                 */
/* -------------------------------------------------------------------------- */

/// Merge flags/env over the optional config file and build the client.
pub fn resolve(args: &ConnectionArgs) -> Result<Calibre> {
    let file = match &args.config {
        Some(path) => load_settings_file(path)?,
        None => FileSettings::default(),
    };

    let library = args
        .library
        .clone()
        .or(file.library)
        .ok_or_else(|| CalibreError::config("no library specified (use --library or CALIBRE_LIBRARY)"))?;

    let mut builder = Calibre::builder().library(library);
    if let Some(tool) = args.calibredb.clone().or(file.calibredb) {
        builder = builder.calibredb(tool);
    }
    if let Some(user) = args.username.clone().or(file.username) {
        builder = builder.username(user);
    }
    if let Some(pass) = args.password.clone().or(file.password) {
        builder = builder.password(pass);
    }
    if let Some(secs) = args.timeout.or(file.timeout_secs).filter(|s| *s > 0) {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn yaml_file_fills_missing_flags() {
        let f = write_temp(
            ".yaml",
            "calibredb: /opt/calibre/calibredb\nlibrary: /srv/books\ntimeout_secs: 30\n",
        );
        let args = ConnectionArgs {
            config: Some(f.path().to_path_buf()),
            ..Default::default()
        };
        let calibre = resolve(&args).unwrap();
        assert_eq!(calibre.tool().program, "/opt/calibre/calibredb");
        assert_eq!(calibre.library().as_arg(), "/srv/books");
        assert_eq!(calibre.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn flags_override_json_file() {
        let f = write_temp(
            ".json",
            r#"{ "library": "/srv/books", "username": "file-user" }"#,
        );
        let args = ConnectionArgs {
            library: Some("http://localhost:8080/#main".into()),
            username: Some("cli-user".into()),
            config: Some(f.path().to_path_buf()),
            ..Default::default()
        };
        let calibre = resolve(&args).unwrap();
        assert!(calibre.library().is_remote());
        assert_eq!(calibre.username(), Some("cli-user"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let f = write_temp(".json", r#"{ "libary": "/typo" }"#);
        let err = load_settings_file(f.path()).unwrap_err();
        assert!(matches!(err, CalibreError::Config(_)));
    }

    #[test]
    fn missing_library_is_config_error() {
        let err = resolve(&ConnectionArgs::default()).unwrap_err();
        assert!(err.to_string().contains("no library"));
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let args = ConnectionArgs {
            library: Some("/srv/books".into()),
            timeout: Some(0),
            ..Default::default()
        };
        assert_eq!(resolve(&args).unwrap().timeout(), None);
    }
}
