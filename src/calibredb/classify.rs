/*!
classify.rs - reduce calibredb's combined output to a result or one error line.

calibredb prints a status line (`Integration status: ...`) on every run and,
when it fails, a full Python traceback followed by the single line that names
the actual fault:

  Traceback (most recent call last):
    File "calibre/db/cli/main.py", line 253, in main
    ...
  apsw.ConstraintError: UNIQUE constraint failed: custom_columns.label
  Integration status: False

Success: drop blank + status lines, keep the rest in order.
Failure: same filtering, keep only the last remaining line ("" if none).

The success path never looks for tracebacks: a listing may legitimately
contain the word.
*/

/// Prefix of the status line calibredb appends to every run.
pub const STATUS_PREFIX: &str = "Integration status:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Success(String),
    Failure(String),
}

impl Classified {
    pub fn text(&self) -> &str {
        match self {
            Classified::Success(s) | Classified::Failure(s) => s,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Classified::Success(_))
    }
}

/// Classify raw process output.
pub fn classify(raw: &[u8], success: bool) -> Classified {
    let text = String::from_utf8_lossy(raw);
    if success {
        Classified::Success(success_text(&text))
    } else {
        Classified::Failure(failure_line(&text).to_string())
    }
}

/// Filtered, newline-joined output.
pub fn success_text(text: &str) -> String {
    significant_lines(text).collect::<Vec<_>>().join("\n")
}

/// Last significant line, or `""` when nothing survives filtering.
pub fn failure_line(text: &str) -> &str {
    significant_lines(text).last().unwrap_or("")
}

fn significant_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty() && !line.starts_with(STATUS_PREFIX))
}
