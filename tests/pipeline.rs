#![cfg(unix)]

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use calibrewrap::calibredb::options::{
    AddCustomColumnOptions, ListOptions, SavedSearchesOptions, SearchOptions,
};
use calibrewrap::calibredb::{Calibre, CalibreError, choices::ColumnType};
use common::{ECHO_ARGS, FakeCalibre};

fn calibre_for(fake: &FakeCalibre) -> Calibre {
    Calibre::builder()
        .calibredb(fake.tool_str())
        .library(fake.library_str())
        .build()
        .unwrap()
}

#[tokio::test]
async fn success_output_is_the_argument_vector_without_noise() {
    let fake = FakeCalibre::new(ECHO_ARGS);
    let calibre = calibre_for(&fake);
    let opts = ListOptions {
        fields: "title,authors".into(),
        limit: 5,
        ..Default::default()
    };

    let out = calibre.run(&opts, &[]).await.unwrap();
    let expected = format!(
        "list\n--fields=title,authors\n--limit=5\n--with-library={}",
        fake.library_str()
    );
    assert_eq!(out, expected);
}

#[tokio::test]
async fn free_form_args_follow_flags() {
    let fake = FakeCalibre::new(ECHO_ARGS);
    let calibre = calibre_for(&fake);
    let extra = vec!["add".to_string(), "fav".to_string(), "tag:favourite".to_string()];

    let out = calibre.run(&SavedSearchesOptions::default(), &extra).await.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[..4], ["saved_searches", "add", "fav", "tag:favourite"]);
    assert!(lines[4].starts_with("--with-library="));
}

#[tokio::test]
async fn failure_yields_fault_line_and_notifies_observer() {
    let fake = FakeCalibre::new(
        r#"echo "Traceback (most recent call last):" 1>&2
echo '  File "calibre/db/cli/cmd_add_custom_column.py", line 81, in main' 1>&2
echo "apsw.ConstraintError: UNIQUE constraint failed: custom_columns.label" 1>&2
echo "Integration status: False"
exit 1"#,
    );
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = seen.clone();
    let calibre = Calibre::builder()
        .calibredb(fake.tool_str())
        .library(fake.library_str())
        .on_error(move |e| sink.lock().unwrap().push(e.to_string()))
        .build()
        .unwrap();

    let opts = AddCustomColumnOptions {
        label: "mylabel".into(),
        name: "My Label".into(),
        datatype: Some(ColumnType::Text),
        ..Default::default()
    };
    let err = calibre.run(&opts, &[]).await.unwrap_err();

    match &err {
        CalibreError::Command { message, status } => {
            assert_eq!(
                message,
                "apsw.ConstraintError: UNIQUE constraint failed: custom_columns.label"
            );
            assert_eq!(*status, Some(1));
        }
        other => panic!("expected command failure, got {other:?}"),
    }
    assert_eq!(*seen.lock().unwrap(), vec![err.to_string()]);
}

#[tokio::test]
async fn timeout_kills_and_reaps_the_child() {
    let fake = FakeCalibre::new("echo $$ > \"$(dirname \"$0\")/pid\"\necho started\nexec sleep 30");
    let calibre = Calibre::builder()
        .calibredb(fake.tool_str())
        .library(fake.library_str())
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap();

    let err = calibre
        .run(&SavedSearchesOptions::default(), &["list".to_string()])
        .await
        .unwrap_err();
    match &err {
        CalibreError::Timeout { message, .. } => assert_eq!(message, "started"),
        other => panic!("expected timeout, got {other:?}"),
    }

    let pid = std::fs::read_to_string(fake.dir().join("pid")).unwrap();
    let alive = std::process::Command::new("kill")
        .args(["-0", pid.trim()])
        .status()
        .unwrap()
        .success();
    assert!(!alive, "calibredb process {} still running", pid.trim());
}

#[tokio::test]
async fn concurrent_calls_do_not_mix_output() {
    let fake = FakeCalibre::new(ECHO_ARGS);
    let calibre = calibre_for(&fake);

    let mut set = tokio::task::JoinSet::new();
    for i in 0..8 {
        let calibre = calibre.clone();
        set.spawn(async move {
            let opts = SearchOptions {
                expression: format!("id:{i}"),
                ..Default::default()
            };
            (i, calibre.run(&opts, &[]).await)
        });
    }
    while let Some(joined) = set.join_next().await {
        let (i, out) = joined.unwrap();
        let out = out.unwrap();
        assert!(out.starts_with(&format!("search\nid:{i}\n")), "{out}");
    }
}

#[tokio::test]
async fn list_books_requests_machine_output() {
    let fake = FakeCalibre::new(
        r#"printf '%s\n' "$@" > "$(dirname "$0")/args"
echo '[{"id": 1, "title": "Dune", "authors": "Frank Herbert", "tags": "SF, Classic"}]'
echo "Integration status: True""#,
    );
    let calibre = calibre_for(&fake);

    let books = calibre.list_books(ListOptions::default()).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].authors, vec!["Frank Herbert"]);
    assert_eq!(books[0].tags, vec!["SF", "Classic"]);

    let args = std::fs::read_to_string(fake.dir().join("args")).unwrap();
    assert!(args.contains("--fields=all\n"));
    assert!(args.contains("--for-machine\n"));
}

#[tokio::test]
async fn undecodable_listing_is_decode_error() {
    let fake = FakeCalibre::new("echo 'id title'\necho '1  Dune'");
    let err = calibre_for(&fake)
        .list_books(ListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CalibreError::Decode(_)));
}

#[test]
fn blocking_wrapper_matches_async_result() {
    let fake = FakeCalibre::new(ECHO_ARGS);
    let calibre = calibre_for(&fake);
    let out = calibre
        .run_blocking(&SavedSearchesOptions::default(), &["list".to_string()])
        .unwrap();
    assert!(out.starts_with("saved_searches\nlist\n"));
}
