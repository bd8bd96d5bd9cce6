/*!
client.rs - `Calibre`: immutable configuration + the invocation pipeline.

  validate -> build_args -> (prefix, credentials, library) -> execute -> classify

Construction:
  Calibre::builder()
      .calibredb("/usr/bin/calibredb")
      .library("/srv/books")
      .timeout(Duration::from_secs(60))
      .on_error(|e| eprintln!("calibredb failed: {e}"))
      .build()?

The value is cheap to clone and safe to share between concurrent callers;
each call owns its child process and output buffer.
*/

use std::fmt;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::classify::{Classified, classify, failure_line};
use super::error::{CalibreError, Result};
use super::exec::{self, ExecFailure};
use super::location::{LibraryLocation, ToolCommand, parse_library, parse_tool};
use super::options::ListOptions;
use super::schema::{CommandOptions, build_args, validate};
use crate::models::{Book, parse_books};

/// Failure observer, called synchronously before an execution error is returned.
pub type OnError = Arc<dyn Fn(&CalibreError) + Send + Sync>;

pub const DEFAULT_CALIBREDB: &str = "calibredb";

/* ---- Configuration ---- */

#[derive(Clone)]
pub struct Calibre {
    tool: ToolCommand,
    library: LibraryLocation,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
    on_error: Option<OnError>,
}

impl fmt::Debug for Calibre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calibre")
            .field("tool", &self.tool)
            .field("library", &self.library)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct CalibreBuilder {
    calibredb: Option<String>,
    library: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
    on_error: Option<OnError>,
}

impl CalibreBuilder {
    /// calibredb executable (optionally with wrapper args). Defaults to `calibredb`.
    pub fn calibredb(mut self, location: impl Into<String>) -> Self {
        self.calibredb = Some(location.into());
        self
    }

    /// Library folder or Content server URL.
    pub fn library(mut self, location: impl Into<String>) -> Self {
        self.library = Some(location.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&CalibreError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<Calibre> {
        let tool = parse_tool(self.calibredb.as_deref().unwrap_or(DEFAULT_CALIBREDB))?;
        let library = parse_library(self.library.as_deref().unwrap_or_default())?;
        Ok(Calibre {
            tool,
            library,
            username: self.username.filter(|s| !s.is_empty()),
            password: self.password.filter(|s| !s.is_empty()),
            timeout: self.timeout,
            on_error: self.on_error,
        })
    }
}

impl Calibre {
    pub fn builder() -> CalibreBuilder {
        CalibreBuilder::default()
    }

    pub fn tool(&self) -> &ToolCommand {
        &self.tool
    }

    pub fn library(&self) -> &LibraryLocation {
        &self.library
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /* ---- Argument Vector ---- */

    /// Validate and encode `opts`, returning the exact arguments passed to
    /// the executable (everything after the program name).
    ///
    /// `extra` must not contain a bare `--`: `--with-library=` goes last and
    /// calibredb would read it as a positional after the separator.
    pub fn argv<O: CommandOptions>(&self, opts: &O, extra: &[String]) -> Result<Vec<String>> {
        validate(opts)?;
        if extra.iter().any(|a| a == "--") {
            return Err(CalibreError::config(
                "extra arguments must not contain a bare `--`",
            ));
        }
        Ok(self.finish(build_args(opts, extra)))
    }

    fn finish(&self, args: Vec<String>) -> Vec<String> {
        let mut argv = self.tool.prefix.clone();
        argv.extend(args);

        if self.library.is_remote() {
            if let Some(user) = &self.username {
                argv.push(format!("--username={user}"));
            }
            if let Some(pass) = &self.password {
                argv.push(format!("--password={pass}"));
            }
            if let Some(timeout) = self.timeout {
                argv.push(format!("--timeout={}", timeout.as_secs().max(1)));
            }
        }

        argv.push(format!("--with-library={}", self.library.as_arg()));
        argv
    }

    /* ---- Invocation ---- */

    /// Run one sub-command and return its cleaned output.
    pub async fn run<O: CommandOptions>(&self, opts: &O, extra: &[String]) -> Result<String> {
        let argv = self.argv(opts, extra)?;
        self.invoke(argv).await
    }

    /// Synchronous form of [`Calibre::run`].
    ///
    /// Must not be called from inside a tokio runtime; there it fails with
    /// [`CalibreError::Runtime`] instead of blocking a worker thread.
    pub fn run_blocking<O: CommandOptions>(&self, opts: &O, extra: &[String]) -> Result<String> {
        blocking(self.run(opts, extra)).map_err(|err| match err {
            CalibreError::Runtime(_) => self.report(err),
            other => other,
        })
    }

    /// `calibredb --version`
    pub async fn version(&self) -> Result<String> {
        self.invoke(self.finish(vec!["--version".to_string()])).await
    }

    /// `calibredb --help`
    pub async fn help(&self) -> Result<String> {
        self.invoke(self.finish(vec!["--help".to_string()])).await
    }

    /// `calibredb <command> -h`
    pub async fn help_for(&self, command: &str) -> Result<String> {
        self.invoke(self.finish(vec![command.to_string(), "-h".to_string()]))
            .await
    }

    /// `list --for-machine`, decoded into records. Empty `fields` means all.
    pub async fn list_books(&self, mut opts: ListOptions) -> Result<Vec<Book>> {
        opts.for_machine = Some(true);
        if opts.fields.is_empty() {
            opts.fields = "all".to_string();
        }
        let text = self.run(&opts, &[]).await?;
        Ok(parse_books(&text)?)
    }

    async fn invoke(&self, argv: Vec<String>) -> Result<String> {
        debug!(
            program = %self.tool.program,
            args = %redact(&argv).join(" "),
            "running calibredb"
        );

        let program = &self.tool.program;
        let err = match exec::execute(program, &argv, self.timeout).await {
            Ok(raw) => match classify(&raw.bytes, raw.success) {
                Classified::Success(text) => return Ok(text),
                Classified::Failure(message) => CalibreError::Command {
                    message,
                    status: raw.status,
                },
            },
            Err(ExecFailure::Spawn(source)) => CalibreError::Spawn {
                program: program.clone(),
                source,
            },
            Err(ExecFailure::Wait(source, partial)) => CalibreError::Command {
                message: match failure_line(&String::from_utf8_lossy(&partial)) {
                    "" => source.to_string(),
                    line => line.to_string(),
                },
                status: None,
            },
            Err(ExecFailure::TimedOut(partial)) => CalibreError::Timeout {
                program: program.clone(),
                after: self.timeout.unwrap_or_default(),
                message: failure_line(&String::from_utf8_lossy(&partial)).to_string(),
            },
        };

        Err(self.report(err))
    }

    fn report(&self, err: CalibreError) -> CalibreError {
        warn!(error = %err, status = ?err.exit_status(), "calibredb invocation failed");
        if let Some(observer) = &self.on_error
            && catch_unwind(AssertUnwindSafe(|| observer(&err))).is_err()
        {
            warn!("on_error callback panicked; returning the original error");
        }
        err
    }
}

/// Drive an invocation future to completion on a private runtime.
/// Fails without polling `fut` when already inside a runtime.
pub fn blocking<T>(fut: impl Future<Output = Result<T>>) -> Result<T> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(CalibreError::Runtime(std::io::Error::other(
            "blocking call made from inside a tokio runtime; use the async API",
        )));
    }
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CalibreError::Runtime)?;
    rt.block_on(fut)
}

fn redact(argv: &[String]) -> Vec<String> {
    argv.iter()
        .map(|a| {
            if a.starts_with("--password=") {
                "--password=<redacted>".to_string()
            } else {
                a.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibredb::options::{AddOptions, SavedSearchesOptions};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn local() -> Calibre {
        Calibre::builder()
            .calibredb("/usr/bin/calibredb")
            .library("/srv/books")
            .build()
            .unwrap()
    }

    #[test]
    fn builder_defaults_to_calibredb_on_path() {
        let c = Calibre::builder().library("/srv/books").build().unwrap();
        assert_eq!(c.tool().program, DEFAULT_CALIBREDB);
        assert!(c.timeout().is_none());
    }

    #[test]
    fn builder_requires_library() {
        let err = Calibre::builder().calibredb("calibredb").build().unwrap_err();
        assert!(matches!(err, CalibreError::Config(_)));
    }

    #[test]
    fn library_argument_is_last() {
        let opts = AddOptions {
            files: vec!["book.epub".into()],
            title: "Dune".into(),
            ..Default::default()
        };
        let argv = local()
            .argv(&opts, &["--duplicates".to_string()])
            .unwrap();
        assert_eq!(
            argv,
            vec![
                "add",
                "book.epub",
                "--title=Dune",
                "--duplicates",
                "--with-library=/srv/books",
            ]
        );
    }

    #[test]
    fn bare_separator_in_extra_args_is_rejected() {
        let err = local()
            .argv(
                &SavedSearchesOptions::default(),
                &["--".to_string(), "list".to_string()],
            )
            .unwrap_err();
        assert!(matches!(err, CalibreError::Config(_)));
        assert!(err.to_string().contains("`--`"));
    }

    #[tokio::test]
    async fn bare_separator_fails_before_spawn_and_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let c = Calibre::builder()
            .calibredb("/nonexistent/calibredb")
            .library("/srv/books")
            .on_error(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        let err = c
            .run(&SavedSearchesOptions::default(), &["--".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, CalibreError::Config(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn local_library_does_not_forward_credentials() {
        let c = Calibre::builder()
            .library("/srv/books")
            .username("me")
            .password("secret")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        let argv = c.argv(&SavedSearchesOptions::default(), &[]).unwrap();
        assert_eq!(argv, vec!["saved_searches", "--with-library=/srv/books"]);
    }

    #[test]
    fn remote_library_forwards_credentials_before_library() {
        let c = Calibre::builder()
            .library("http://localhost:8080/#books")
            .username("me")
            .password("secret")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        let argv = c
            .argv(&SavedSearchesOptions::default(), &["list".to_string()])
            .unwrap();
        assert_eq!(
            argv,
            vec![
                "saved_searches",
                "list",
                "--username=me",
                "--password=secret",
                "--timeout=30",
                "--with-library=http://localhost:8080/#books",
            ]
        );
        assert!(
            redact(&argv).contains(&"--password=<redacted>".to_string()),
            "password must not reach the logs"
        );
    }

    #[test]
    fn wrapper_prefix_precedes_subcommand() {
        let c = Calibre::builder()
            .calibredb("flatpak run --command=calibredb com.calibre_ebook.calibre")
            .library("/srv/books")
            .build()
            .unwrap();
        let argv = c.argv(&SavedSearchesOptions::default(), &[]).unwrap();
        assert_eq!(argv[..3], ["run", "--command=calibredb", "com.calibre_ebook.calibre"]);
        assert_eq!(argv[3], "saved_searches");
    }

    #[test]
    fn debug_output_hides_password() {
        let c = Calibre::builder()
            .library("/srv/books")
            .password("hunter2")
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
    }

    #[tokio::test]
    async fn validation_failure_skips_process_and_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let c = Calibre::builder()
            .calibredb("/nonexistent/calibredb")
            .library("/srv/books")
            .on_error(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        let err = c.run(&AddOptions::default(), &[]).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("required"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn spawn_failure_invokes_callback_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let c = Calibre::builder()
            .calibredb("/nonexistent/calibredb")
            .library("/srv/books")
            .on_error(move |e| {
                assert!(matches!(e, CalibreError::Spawn { .. }));
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        let err = c.version().await.unwrap_err();
        assert!(matches!(err, CalibreError::Spawn { .. }));
        assert!(err.to_string().to_lowercase().contains("no such file"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panicking_callback_does_not_replace_error() {
        let c = Calibre::builder()
            .calibredb("/nonexistent/calibredb")
            .library("/srv/books")
            .on_error(|_| panic!("observer blew up"))
            .build()
            .unwrap();

        let err = c.help().await.unwrap_err();
        assert!(matches!(err, CalibreError::Spawn { .. }));
    }

    #[test]
    fn blocking_wrapper_runs_to_completion() {
        let c = Calibre::builder()
            .calibredb("/nonexistent/calibredb")
            .library("/srv/books")
            .build()
            .unwrap();
        let err = c
            .run_blocking(&SavedSearchesOptions::default(), &["list".to_string()])
            .unwrap_err();
        assert_eq!(err.kind(), crate::calibredb::ErrorKind::Execution);
    }

    #[tokio::test]
    async fn blocking_inside_runtime_is_an_error_and_reported() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let c = Calibre::builder()
            .calibredb("/nonexistent/calibredb")
            .library("/srv/books")
            .on_error(move |e| {
                assert!(matches!(e, CalibreError::Runtime(_)));
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        let err = c
            .run_blocking(&SavedSearchesOptions::default(), &["list".to_string()])
            .unwrap_err();
        assert!(matches!(err, CalibreError::Runtime(_)));
        assert_eq!(err.kind(), crate::calibredb::ErrorKind::Execution);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
