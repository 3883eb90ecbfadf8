//! Event sinks: the human-readable transcript and the JSONL round history.

use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::Outcome;

/// Append-only, line-oriented event recorder. One call per event,
/// in chronological order.
pub trait Transcript {
    fn line(&mut self, message: &str);

    fn blank(&mut self) {
        self.line("");
    }
}

/// Writes each line to `W`, optionally mirroring it to a second writer
/// such as a terminal.
///
/// Write failures are logged, never raised. A mirror that fails once is
/// dropped so a closed pipe does not stop the game.
pub struct WriterTranscript<W: Write, E: Write = io::Sink> {
    writer: W,
    echo: Option<E>,
}

impl WriterTranscript<BufWriter<File>> {
    /// Creates (truncating) the file at `path`, making parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self::new(BufWriter::new(f)))
    }
}

impl<W: Write> WriterTranscript<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, echo: None }
    }
}

impl<W: Write, E: Write> WriterTranscript<W, E> {
    pub fn with_echo<E2: Write>(self, echo: E2) -> WriterTranscript<W, E2> {
        WriterTranscript {
            writer: self.writer,
            echo: Some(echo),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn write_line<T: Write + ?Sized>(w: &mut T, message: &str) -> io::Result<()> {
    w.write_all(message.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()
}

impl<W: Write, E: Write> Transcript for WriterTranscript<W, E> {
    fn line(&mut self, message: &str) {
        if let Err(e) = write_line(&mut self.writer, message) {
            tracing::warn!(error = %e, "transcript write failed");
        }
        if let Some(echo) = self.echo.as_mut() {
            if let Err(e) = write_line(echo, message) {
                tracing::warn!(error = %e, "transcript echo failed, echo disabled");
                self.echo = None;
            }
        }
    }
}

/// In-memory transcript. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryTranscript {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(l) => l.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

impl Transcript for MemoryTranscript {
    fn line(&mut self, message: &str) {
        match self.lines.lock() {
            Ok(mut l) => l.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

/// Settlement of one seat, as reported by a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatResult {
    pub name: String,
    pub hand: String,
    pub outcome: Outcome,
    /// Wager at settlement, including any double-down
    pub wager: u64,
    /// Balance after settlement
    pub balance: u64,
}

/// Summary returned by `Round::play` and persisted by [`HistoryWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub number: u32,
    /// Seats excluded for being below the minimum bet
    pub sat_out: Vec<String>,
    pub dealer_hand: String,
    /// Empty when no seat qualified and nothing was dealt
    pub seats: Vec<SeatResult>,
}

/// One line of the JSONL round history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Table RNG seed, when the game was seeded
    pub seed: Option<u64>,
    pub report: RoundReport,
    /// RFC3339 timestamp
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

pub struct HistoryWriter {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HistoryWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
