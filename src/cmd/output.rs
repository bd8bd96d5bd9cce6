/*!
`output.rs`

Rendering of command results.

JSON Success Output:
{
  "status": "ok",
  "command": "list",
  "output": "...cleaned calibredb output...",
  "books": [ ... ]            (books command only)
}

JSON Error Output:
{
  "status": "error",
  "kind": "validation" | "execution" | "config" | "decode",
  "error": "message"
}

Human output prints the cleaned text as-is so it can be piped; errors get a
red box on stderr.
*/

use calibrewrap::calibredb::{CalibreError, ErrorKind};
use calibrewrap::models::Book;

use super::commands::Outcome;
use super::format::{Role, StyleOptions, TableOpts, box_header, color, emoji, table};

/* -------------------------------------------------------------------------- */
/* Classification                                                             */
/* -------------------------------------------------------------------------- */

/// Error kind for exit codes; anything not raised by the library is an
/// execution failure.
pub fn error_kind(err: &anyhow::Error) -> ErrorKind {
    err.downcast_ref::<CalibreError>()
        .map(CalibreError::kind)
        .unwrap_or(ErrorKind::Execution)
}

/// Message without the CLI's context prefixes: the classified calibredb line
/// when there is one.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<CalibreError>() {
        Some(inner) => inner.to_string(),
        None => format!("{err:#}"),
    }
}

/* -------------------------------------------------------------------------- */
/* JSON                                                                       */
/* -------------------------------------------------------------------------- */

pub fn success_json(outcome: &Outcome) -> serde_json::Value {
    let mut base = serde_json::json!({
        "status": "ok",
        "command": outcome.command,
        "output": outcome.output,
    });
    if let (Some(books), serde_json::Value::Object(map)) = (&outcome.books, &mut base) {
        map.insert(
            "books".to_string(),
            serde_json::to_value(books).unwrap_or(serde_json::Value::Null),
        );
    }
    base
}

pub fn error_json(kind: ErrorKind, msg: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "error",
        "kind": kind.as_str(),
        "error": msg,
    })
}

fn print_json(v: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
    );
}

/* -------------------------------------------------------------------------- */
/* Printers                                                                   */
/* -------------------------------------------------------------------------- */

pub fn print_success(outcome: &Outcome, json: bool) {
    if json {
        print_json(&success_json(outcome));
        return;
    }
    match &outcome.books {
        Some(books) => {
            let style = StyleOptions::detect();
            println!("{}", books_table(books, &style));
        }
        None if outcome.output.is_empty() => {}
        None => println!("{}", outcome.output),
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    let kind = error_kind(err);
    let msg = error_message(err);
    if json {
        print_json(&error_json(kind, &msg));
        return;
    }

    let style = StyleOptions::detect();
    let title = format!("{} calibredb {} error", emoji("error", &style), kind.as_str());
    let shown = if msg.is_empty() { "(no output)" } else { msg.as_str() };
    eprintln!(
        "{}",
        box_header(title, Some(color(Role::Error, shown, &style)), &style)
    );
    if kind == ErrorKind::Execution {
        eprintln!(
            "{} {}",
            emoji("info", &style),
            color(Role::Dim, "Re-run with -v to see the full calibredb invocation.", &style)
        );
    }
}

/* -------------------------------------------------------------------------- */
/* Books Table                                                                */
/* -------------------------------------------------------------------------- */

pub fn books_table(books: &[Book], style: &StyleOptions) -> String {
    if books.is_empty() {
        return format!("{} No books matched", emoji("info", style));
    }
    let rows: Vec<Vec<String>> = books
        .iter()
        .map(|b| {
            let series = match (b.series.is_empty(), b.series_index) {
                (true, _) => String::new(),
                (false, Some(idx)) => format!("{} [{idx}]", b.series),
                (false, None) => b.series.clone(),
            };
            vec![
                b.id.to_string(),
                b.title.clone(),
                b.authors.join(" & "),
                series,
                b.tags.join(", "),
            ]
        })
        .collect();
    table(
        &["ID", "TITLE", "AUTHORS", "SERIES", "TAGS"],
        &rows,
        TableOpts::default(),
        style,
    )
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn success_json_includes_books_only_when_present() {
        let plain = Outcome {
            command: "list",
            output: "1 Dune".into(),
            books: None,
        };
        let v = success_json(&plain);
        assert_eq!(v["status"], "ok");
        assert_eq!(v["command"], "list");
        assert!(v.get("books").is_none());

        let with_books = Outcome {
            command: "books",
            output: "1 book(s)".into(),
            books: Some(vec![Book {
                id: 1,
                title: "Dune".into(),
                ..Default::default()
            }]),
        };
        let v = success_json(&with_books);
        assert_eq!(v["books"][0]["title"], "Dune");
    }

    #[test]
    fn context_does_not_hide_library_error() {
        let err = Err::<(), _>(CalibreError::Command {
            message: "apsw.ConstraintError: UNIQUE constraint failed".into(),
            status: Some(1),
        })
        .context("calibredb add_custom_column failed")
        .unwrap_err();
        assert_eq!(error_kind(&err), ErrorKind::Execution);
        assert_eq!(
            error_message(&err),
            "apsw.ConstraintError: UNIQUE constraint failed"
        );
    }

    #[test]
    fn validation_errors_keep_their_kind() {
        let err = anyhow::Error::new(CalibreError::MissingRequiredField {
            command: "export",
            fields: vec!["ids"],
        });
        assert_eq!(error_kind(&err), ErrorKind::Validation);
        let v = error_json(error_kind(&err), &error_message(&err));
        assert_eq!(v["kind"], "validation");
        assert_eq!(v["error"], "export: missing required field(s): ids");
    }

    #[test]
    fn books_table_formats_series() {
        let style = StyleOptions::plain(120);
        let books = vec![Book {
            id: 7,
            title: "Dune Messiah".into(),
            authors: vec!["Frank Herbert".into()],
            series: "Dune".into(),
            series_index: Some(2.0),
            ..Default::default()
        }];
        let t = books_table(&books, &style);
        assert!(t.contains("Dune [2]"));
        assert!(t.contains("Frank Herbert"));
    }
}
