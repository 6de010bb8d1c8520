//! Console: the shared, lock-guarded output sink of the interface actor.
//!
//! A [`Console`] is constructed once and cloned into whichever actor needs
//! to print. Every call writes its whole block of lines under the output
//! lock in a single `write_all`, so blocks from different writers never
//! interleave.

use parking_lot::{Condvar, Mutex};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared line-oriented output sink.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
    line_ending: &'static str,
}

impl Console {
    /// Console writing to stdout with `\n` line endings.
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Console writing to stdout with `\r\n`, for terminals in raw mode.
    pub fn raw_stdout() -> Self {
        Self {
            line_ending: "\r\n",
            ..Self::stdout()
        }
    }

    /// Console writing to an arbitrary sink.
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
            line_ending: "\n",
        }
    }

    /// Console recording into memory, plus a handle to read it back.
    pub fn memory() -> (Self, Transcript) {
        let transcript = Transcript::default();
        let console = Self::from_writer(TranscriptWriter(transcript.clone()));
        (console, transcript)
    }

    /// Write one line.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        self.write_lines(&[line])
    }

    /// Write several lines as one uninterrupted block.
    pub fn write_lines(&self, lines: &[&str]) -> io::Result<()> {
        let mut block = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
        for line in lines {
            block.push_str(line);
            block.push_str(self.line_ending);
        }

        let mut out = self.out.lock();
        out.write_all(block.as_bytes())?;
        out.flush()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("line_ending", &self.line_ending)
            .finish_non_exhaustive()
    }
}

/// In-memory record of everything written to a [`Console::memory`] console.
#[derive(Clone, Default)]
pub struct Transcript {
    shared: Arc<(Mutex<Vec<u8>>, Condvar)>,
}

impl Transcript {
    /// All complete lines written so far.
    pub fn lines(&self) -> Vec<String> {
        Self::split(&self.shared.0.lock())
    }

    /// Whether `line` has been written.
    pub fn contains(&self, line: &str) -> bool {
        self.lines().iter().any(|l| l == line)
    }

    /// Wait until `count` lines exist or `timeout` elapses.
    ///
    /// Returns the lines seen at that point.
    pub fn wait_for_lines(&self, count: usize, timeout: Duration) -> Vec<String> {
        let deadline = Instant::now() + timeout;
        let (bytes, written) = &*self.shared;
        let mut guard = bytes.lock();
        loop {
            let lines = Self::split(&guard);
            if lines.len() >= count || written.wait_until(&mut guard, deadline).timed_out() {
                return Self::split(&guard);
            }
        }
    }

    /// Wait until `line` has been written or `timeout` elapses.
    pub fn wait_for(&self, line: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let (bytes, written) = &*self.shared;
        let mut guard = bytes.lock();
        loop {
            if Self::split(&guard).iter().any(|l| l == line) {
                return true;
            }
            if written.wait_until(&mut guard, deadline).timed_out() {
                return Self::split(&guard).iter().any(|l| l == line);
            }
        }
    }

    fn split(bytes: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(bytes)
            .split_inclusive('\n')
            .filter(|l| l.ends_with('\n'))
            .map(|l| l.trim_end_matches(['\r', '\n']).to_string())
            .collect()
    }
}

impl std::fmt::Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript")
            .field("lines", &self.lines())
            .finish()
    }
}

struct TranscriptWriter(Transcript);

impl Write for TranscriptWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let (bytes, written) = &*self.0.shared;
        bytes.lock().extend_from_slice(buf);
        written.notify_all();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
