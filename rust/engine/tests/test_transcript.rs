use std::fs;
use std::path::PathBuf;

use tablemind_engine::rules::Outcome;
use tablemind_engine::transcript::{
    format_round_id, HistoryWriter, MemoryTranscript, RoundRecord, RoundReport, SeatResult,
    Transcript, WriterTranscript,
};

fn tmp_path(name: &str, ext: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.{}", name, std::process::id(), ext));
    p
}

fn record(id: &str) -> RoundRecord {
    RoundRecord {
        round_id: id.to_string(),
        seed: Some(9),
        report: RoundReport {
            number: 1,
            sat_out: vec!["Bob".to_string()],
            dealer_hand: "10♠, 8♥ (18)".to_string(),
            seats: vec![SeatResult {
                name: "Ann".to_string(),
                hand: "10♣, 9♦ (19)".to_string(),
                outcome: Outcome::Win,
                wager: 10,
                balance: 110,
            }],
        },
        ts: None,
    }
}

#[test]
fn history_is_jsonl_with_lf_only() {
    let path = tmp_path("history", "jsonl");
    let mut history = HistoryWriter::create(&path).expect("create history");
    history.write(&record("20250102-000001")).expect("write");
    history.write(&record("20250102-000002")).expect("write");

    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));

    let text = String::from_utf8(bytes).unwrap();
    let parsed: Vec<RoundRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid json line"))
        .collect();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1].round_id, "20250102-000002");
    assert_eq!(parsed[0].report.seats[0].outcome, Outcome::Win);
}

#[test]
fn sequential_ids_increment() {
    let mut history = HistoryWriter::with_seq_for_test("20251231");
    assert_eq!(history.next_id(), "20251231-000001");
    assert_eq!(history.next_id(), "20251231-000002");
    assert_eq!(format_round_id("20250101", 42), "20250101-000042");
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("history_ts", "jsonl");
    let mut history = HistoryWriter::create(&path).expect("create history");

    history.write(&record("20250102-000010")).expect("write");
    let line = fs::read_to_string(&path).unwrap();
    assert!(line.contains("\"ts\":"), "ts should be injected");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec = RoundRecord {
        ts: Some(preset.clone()),
        ..record("20250102-000011")
    };
    history.write(&rec).expect("write2");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(&preset), "preset ts must be kept");
}

#[test]
fn writer_transcript_writes_each_line() {
    let mut t = WriterTranscript::new(Vec::new());
    t.line("=== New Round #1 ===");
    t.blank();
    t.line("Results:");
    let text = String::from_utf8(t.into_inner()).unwrap();
    assert_eq!(text, "=== New Round #1 ===\n\nResults:\n");
}

#[test]
fn echo_mirrors_every_line_to_the_second_writer() {
    let mut screen = Vec::new();
    let mut t = WriterTranscript::new(Vec::new()).with_echo(&mut screen);
    t.line("Dealer shows: 9♣ ??");
    t.line("Ann: 10♣ 7♣ (17)");
    let file = String::from_utf8(t.into_inner()).unwrap();
    assert_eq!(file, "Dealer shows: 9♣ ??\nAnn: 10♣ 7♣ (17)\n");
    assert_eq!(String::from_utf8(screen).unwrap(), file);
}

struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn broken_echo_keeps_the_file_complete() {
    let mut t = WriterTranscript::new(Vec::new()).with_echo(ClosedPipe);
    t.line("Round 1");
    t.line("Round 2");
    let text = String::from_utf8(t.into_inner()).unwrap();
    assert_eq!(text, "Round 1\nRound 2\n");
}

#[test]
fn file_transcript_creates_parent_directories() {
    let mut dir = PathBuf::from("target");
    dir.push(format!("transcript_dir_{}", std::process::id()));
    let path = dir.join("nested").join("game.log");
    {
        let mut t = WriterTranscript::create(&path).expect("create transcript");
        t.line("Dealer shows: A♠ ??");
    }
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Dealer shows: A♠ ??\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn memory_transcript_clones_share_lines() {
    let shared = MemoryTranscript::new();
    let mut writer = shared.clone();
    writer.line("Ann has Blackjack.");
    writer.blank();
    assert_eq!(shared.lines(), vec!["Ann has Blackjack.".to_string(), String::new()]);
    assert!(shared.contains("Blackjack"));
}
