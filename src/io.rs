use serde::Deserialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, ScoringError};
use crate::sessions::{try_group_sessions, try_group_validation_sessions, Session};
use crate::validation::LabeledRow;

pub type SessionId = u64;
pub type ItemId = u64;

// Ids are optional here so an empty CSV field surfaces as a malformed row
// instead of a generic deserialization error.
#[derive(Debug, Deserialize)]
struct RawClickRow {
    session_id: Option<SessionId>,
    item_id: Option<ItemId>,
}

#[derive(Debug, Deserialize)]
struct RawLabeledRow {
    session_id: Option<SessionId>,
    item_id: Option<ItemId>,
    #[serde(default)]
    n_buys: Option<u32>,
}

/// Streams `(session_id, item_id)` rows from a CSV file with a header line.
pub fn read_click_rows<P: AsRef<Path>>(
    path: P,
) -> Result<impl Iterator<Item = Result<(SessionId, ItemId)>>> {
    let reader = csv::Reader::from_path(path)?;
    Ok(reader
        .into_deserialize::<RawClickRow>()
        .enumerate()
        .map(|(index, record)| -> Result<(SessionId, ItemId)> {
            let raw = record?;
            match (raw.session_id, raw.item_id) {
                (Some(session_id), Some(item_id)) => Ok((session_id, item_id)),
                (None, _) => Err(malformed(index, "missing session_id")),
                (_, None) => Err(malformed(index, "missing item_id")),
            }
        }))
}

/// Streams labeled rows (`session_id,item_id,n_buys`) from a CSV file with a header line.
///
/// A missing `n_buys` value counts as not bought; missing ids are errors.
pub fn read_labeled_rows<P: AsRef<Path>>(
    path: P,
) -> Result<impl Iterator<Item = Result<LabeledRow<SessionId, ItemId>>>> {
    let reader = csv::Reader::from_path(path)?;
    Ok(reader
        .into_deserialize::<RawLabeledRow>()
        .enumerate()
        .map(|(index, record)| -> Result<LabeledRow<SessionId, ItemId>> {
            let raw = record?;
            match (raw.session_id, raw.item_id) {
                (Some(session_id), Some(item_id)) => Ok(LabeledRow {
                    session_id,
                    item_id,
                    n_buys: raw.n_buys.unwrap_or(0),
                }),
                (None, _) => Err(malformed(index, "missing session_id")),
                (_, None) => Err(malformed(index, "missing item_id")),
            }
        }))
}

pub fn write_labeled_rows<P: AsRef<Path>>(
    path: P,
    rows: &[LabeledRow<SessionId, ItemId>],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Groups the click rows of a CSV file into predicted sessions.
pub fn read_predicted_sessions<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Session<SessionId, ItemId>>> {
    try_group_sessions(read_click_rows(path)?)
}

/// Groups the rows of a labeled CSV file into truth sessions.
pub fn read_validation_sessions<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Session<SessionId, ItemId>>> {
    let rows = read_labeled_rows(path)?
        .map(|row| row.map(|row| (row.session_id, row.item_id, row.n_buys)));
    try_group_validation_sessions(rows)
}

/// Writes one `Session::to_csv_line` per session, without a header.
pub fn write_submission<P, S, I>(path: P, sessions: &[Session<S, I>]) -> Result<()>
where
    P: AsRef<Path>,
    S: Display,
    I: Display,
{
    let mut writer = BufWriter::new(File::create(path)?);
    for session in sessions {
        writer.write_all(session.to_csv_line().as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a submission file back into sessions. Blank lines are skipped.
pub fn read_submission<P: AsRef<Path>>(path: P) -> Result<Vec<Session<SessionId, ItemId>>> {
    let line_iterator = create_buffered_line_reader(path)?;
    let mut sessions = Vec::new();
    for (index, line) in line_iterator.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        sessions.push(parse_submission_line(&line, index as u64 + 1)?);
    }
    Ok(sessions)
}

fn parse_submission_line(line: &str, line_number: u64) -> Result<Session<SessionId, ItemId>> {
    let (session_part, items_part) = line.split_once(';').ok_or_else(|| ScoringError::MalformedRow {
        line: line_number,
        reason: String::from("missing ';' separator"),
    })?;
    let session_id = parse_id(session_part, line_number)?;
    let item_ids = items_part
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_id(part, line_number))
        .collect::<Result<_>>()?;
    Ok(Session::new(session_id, item_ids))
}

fn parse_id(raw: &str, line_number: u64) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| ScoringError::MalformedRow {
        line: line_number,
        reason: format!("'{}' is not a numeric id", raw.trim()),
    })
}

// CSV record indexes start after the header line.
fn malformed(record_index: usize, reason: &str) -> ScoringError {
    ScoringError::MalformedRow {
        line: record_index as u64 + 2,
        reason: reason.to_string(),
    }
}

fn create_buffered_line_reader<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}
