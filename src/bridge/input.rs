//! # Inbound Stream
//!
//! Reads command lines on a dedicated OS thread and forwards them over a
//! bounded channel to the supervisor task.
//!
//! A blocking `read(2)` on stdin cannot be cancelled. Keeping it on its own
//! thread lets the supervisor react to a shutdown signal at any time; the
//! thread dies with the process.

use std::io::{self, BufRead};
use std::thread;
use tokio::sync::mpsc;
use tracing::debug;

/// Receiving end of the inbound line stream.
///
/// `None` from `recv` means end of stream; `Some(Err(_))` is a read failure
/// after which the reader has stopped.
pub type LineReceiver = mpsc::Receiver<io::Result<String>>;

/// Spawns a thread that forwards every line of `reader` into a channel.
///
/// # Arguments
///
/// * `reader` - Source of newline-delimited commands (stdin in production)
/// * `depth` - Channel capacity; the reader blocks when the supervisor lags
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_line_reader<R>(reader: R, depth: usize) -> io::Result<LineReceiver>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(depth.max(1));

    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() {
                    debug!("Command channel closed, reader exiting");
                    return;
                }
                if failed {
                    return;
                }
            }
            debug!("Reached end of command stream");
        })?;

    Ok(rx)
}

/// Spawns the reader over the process's stdin.
pub fn spawn_stdin_reader(depth: usize) -> io::Result<LineReceiver> {
    spawn_line_reader(io::BufReader::new(io::stdin()), depth)
}

/// Completes when the process is asked to stop (Ctrl+C, or SIGTERM on Unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[tokio::test]
    async fn test_lines_arrive_in_order() {
        let mut rx = spawn_line_reader(Cursor::new("first\n\nthird\n"), 4).unwrap();

        assert_eq!(rx.recv().await.unwrap().unwrap(), "first");
        assert_eq!(rx.recv().await.unwrap().unwrap(), "");
        assert_eq!(rx.recv().await.unwrap().unwrap(), "third");
        assert!(rx.recv().await.is_none(), "End of stream closes the channel");
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let mut rx = spawn_line_reader(Cursor::new("only"), 1).unwrap();
        assert_eq!(rx.recv().await.unwrap().unwrap(), "only");
        assert!(rx.recv().await.is_none());
    }

    /// Reader that yields one good line then fails.
    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "Mock read error"));
            }
            self.served = true;
            let line = b"ok\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[tokio::test]
    async fn test_read_failure_is_forwarded_then_stream_ends() {
        let reader = io::BufReader::new(FailingReader { served: false });
        let mut rx = spawn_line_reader(reader, 4).unwrap();

        assert_eq!(rx.recv().await.unwrap().unwrap(), "ok");
        assert!(rx.recv().await.unwrap().is_err());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_a_read_failure() {
        let mut rx = spawn_line_reader(Cursor::new(vec![0xff, 0xfe, b'\n']), 4).unwrap();
        let err = rx.recv().await.unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
