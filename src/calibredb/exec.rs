/*!
exec.rs - run calibredb once and capture its combined output.

  - stdin is closed; stdout and stderr are piped and drained concurrently into
    a single buffer in arrival order (the equivalent of `2>&1`)
  - the child is spawned with kill-on-drop, so every exit path (error,
    timeout, caller dropping the future) reaps it
  - on timeout the child is killed and waited for, and whatever was read
    until then is returned alongside the failure

Classification is not done here; see `classify`.
*/

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::warn;

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub bytes: Vec<u8>,
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub status: Option<i32>,
}

/// Why a run did not reach a normal exit.
#[derive(Debug)]
pub enum ExecFailure {
    /// The executable could not be started.
    Spawn(std::io::Error),
    /// Waiting for the child failed after it started.
    Wait(std::io::Error, Vec<u8>),
    /// The timeout elapsed; the child was killed. Carries partial output.
    TimedOut(Vec<u8>),
}

/// Spawn `program args...`, wait (bounded by `timeout`) and collect output.
pub async fn execute(
    program: &str,
    args: &[String],
    timeout: Option<Duration>,
) -> Result<RawOutput, ExecFailure> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(ExecFailure::Spawn)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let mut combined: Vec<u8> = Vec::new();

    let waited = {
        let run = async {
            let collect = async {
                while let Some(chunk) = rx.recv().await {
                    combined.extend_from_slice(&chunk);
                }
            };
            let (status, _, _, _) = tokio::join!(
                child.wait(),
                pump(stdout, tx.clone()),
                pump(stderr, tx),
                collect
            );
            status
        };
        match timeout {
            Some(limit) => tokio::time::timeout(limit, run).await.ok(),
            None => Some(run.await),
        }
    };

    match waited {
        Some(Ok(status)) => Ok(RawOutput {
            bytes: combined,
            success: status.success(),
            status: status.code(),
        }),
        Some(Err(e)) => Err(ExecFailure::Wait(e, combined)),
        None => {
            // Kill + reap before returning; the pumps were dropped with the future.
            if let Err(e) = child.kill().await {
                warn!(program, error = %e, "failed to kill timed-out calibredb");
            }
            while let Ok(chunk) = rx.try_recv() {
                combined.extend_from_slice(&chunk);
            }
            Err(ExecFailure::TimedOut(combined))
        }
    }
}

async fn pump<R>(reader: Option<R>, tx: mpsc::UnboundedSender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return;
    };
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Err(e) => {
                warn!(error = %e, "reading calibredb output failed; captured output is truncated");
                break;
            }
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
        }
    }
}
