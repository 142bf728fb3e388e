use super::helpers::join_output;
use crossbeam_channel::{RecvTimeoutError, Sender};
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How long to wait for the pipes to drain once a child has been killed.
const KILL_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub(super) struct ProcessOutput {
    pub(super) text: String,
    pub(super) status: Option<ExitStatus>,
    pub(super) timed_out: bool,
}

#[derive(Clone, Copy, Debug)]
enum Stream {
    Stdout,
    Stderr,
}

/// Runs `program` to completion, killing it once `limit` has elapsed.
///
/// Output written before the kill is still returned. A `limit` too large to
/// express as an [`Instant`] waits for the child without a deadline.
pub(super) fn run_with_deadline(
    program: &Path,
    args: &[String],
    limit: Duration,
) -> io::Result<ProcessOutput> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let deadline = Instant::now().checked_add(limit);
    let (tx, rx) = crossbeam_channel::bounded(2);
    spawn_reader(Stream::Stdout, child.stdout.take(), tx.clone());
    spawn_reader(Stream::Stderr, child.stderr.take(), tx);

    let mut stdout = String::new();
    let mut stderr = String::new();
    let mut pending = 2;
    let mut timed_out = false;

    while pending > 0 {
        let received = match (timed_out, deadline) {
            (true, _) => rx.recv_timeout(KILL_GRACE),
            (false, Some(deadline)) => {
                rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            (false, None) => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok((Stream::Stdout, text)) => {
                stdout = text;
                pending -= 1;
            }
            Ok((Stream::Stderr, text)) => {
                stderr = text;
                pending -= 1;
            }
            Err(RecvTimeoutError::Timeout) if !timed_out => {
                timed_out = true;
                let _ = child.kill();
            }
            Err(_) => break,
        }
    }

    let status = if timed_out {
        let _ = child.kill();
        child.wait().ok()
    } else {
        Some(child.wait()?)
    };

    Ok(ProcessOutput {
        text: join_output(&stdout, &stderr),
        status,
        timed_out,
    })
}

fn spawn_reader<R>(stream: Stream, pipe: Option<R>, tx: Sender<(Stream, String)>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send((stream, String::from_utf8_lossy(&buf).into_owned()));
    });
}
