//! `--player NAME[=KIND]` parsing.

use tablemind_ai::ProviderSpec;

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSpec {
    pub name: String,
    pub provider: ProviderSpec,
}

pub fn parse_seat(raw: &str) -> Result<SeatSpec, CliError> {
    let (name, kind) = match raw.split_once('=') {
        Some((n, k)) => (n.trim(), k.trim()),
        None => (raw.trim(), "house"),
    };
    if name.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "player name missing in '{}'",
            raw
        )));
    }
    Ok(SeatSpec {
        name: name.to_string(),
        provider: ProviderSpec::parse(kind)?,
    })
}

pub fn parse_roster(raw: &[String]) -> Result<Vec<SeatSpec>, CliError> {
    if raw.is_empty() {
        return Err(CliError::InvalidInput(
            "at least one --player is required".into(),
        ));
    }
    raw.iter().map(|r| parse_seat(r)).collect()
}
