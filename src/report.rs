//! Commit preview report model and the filtering operations over it.

use crate::{AppError, AppResult};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};
use zstd::stream::decode_all;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Rendering used for a new defect that carries no `cid`.
const MISSING_CID: &str = "None";

/// A commit preview report.
///
/// `issue_info` is `None` when the field is missing from the document and
/// `Some(None)` when it is present but `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Report {
    #[serde(rename = "issueInfo", default, deserialize_with = "present")]
    issue_info: Option<Option<Vec<Defect>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defect {
    #[serde(default)]
    pub cid: Option<Value>,
    #[serde(default)]
    pub present_in_comparison_snapshot: SnapshotPresence,
}

/// Whether a defect already existed in the comparison snapshot.
///
/// Only a literal `false` in the report means the defect is new; a missing
/// flag or any other value counts as present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotPresence {
    New,
    #[default]
    Present,
}

impl<'de> Deserialize<'de> for SnapshotPresence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(false) => SnapshotPresence::New,
            _ => SnapshotPresence::Present,
        })
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Defect {
    pub fn is_new(&self) -> bool {
        self.present_in_comparison_snapshot == SnapshotPresence::New
    }

    /// The identifier as written to the output file.
    pub fn cid_string(&self) -> String {
        match &self.cid {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => MISSING_CID.to_string(),
        }
    }
}

impl Report {
    /// Parses raw report bytes. Syntax errors are `Parse`; documents that
    /// parse but do not have the report's shape are `Structural`.
    pub fn from_slice(bytes: &[u8]) -> AppResult<Self> {
        let document: Value = serde_json::from_slice(bytes).map_err(AppError::Parse)?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> AppResult<Self> {
        let Value::Object(root) = &document else {
            return Err(AppError::Structural(format!(
                "expected a JSON object at the top level, found {}",
                kind(&document)
            )));
        };

        match root.get("issueInfo") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                if let Some((index, item)) = items.iter().enumerate().find(|(_, i)| !i.is_object()) {
                    return Err(AppError::Structural(format!(
                        "issueInfo[{index}] must be an object, found {}",
                        kind(item)
                    )));
                }
            }
            Some(other) => {
                return Err(AppError::Structural(format!(
                    "issueInfo must be a list, found {}",
                    kind(other)
                )));
            }
        }

        serde_json::from_value(document).map_err(|e| AppError::Structural(e.to_string()))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Reads a report from disk, transparently decompressing zstd input.
pub fn load(path: &Path) -> AppResult<Report> {
    let raw_bytes = fs::read(path).map_err(|e| AppError::io(path, e))?;

    if let Ok(decompressed) = decode_all(raw_bytes.as_slice()) {
        debug!(path = %path.display(), "Detected zstd-compressed report.");
        return Report::from_slice(&decompressed);
    }

    Report::from_slice(&raw_bytes)
}

/// Returns the report's defect list, `None` when `issueInfo` is `null`.
///
/// A report without an `issueInfo` field is malformed and yields a
/// `Structural` error, which callers are expected to let through.
pub fn extract_defects(report: &Report) -> AppResult<Option<&[Defect]>> {
    match &report.issue_info {
        Some(list) => Ok(list.as_deref()),
        None => Err(AppError::Structural("missing field `issueInfo`".to_string())),
    }
}

pub fn count_defects(defects: &[Defect]) -> usize {
    defects.len()
}

/// Collects the `cid` of every defect not present in the comparison snapshot,
/// in report order. An empty or missing list is let through with a notice.
pub fn filter_new_defects(defects: Option<&[Defect]>) -> Vec<String> {
    info!("Checking defects...");

    let defects = match defects {
        Some(list) if !list.is_empty() => list,
        _ => {
            info!("Report is empty or does not exist, treating as force-allow.");
            return Vec::new();
        }
    };

    let mut new_defects = Vec::new();
    for defect in defects.iter().filter(|d| d.is_new()) {
        if defect.cid.is_none() {
            warn!("New defect has no cid; recording it as {MISSING_CID}.");
        }
        let cid = defect.cid_string();
        info!(cid = %cid, "Found new defect. CID: {cid}");
        new_defects.push(cid);
    }

    if new_defects.is_empty() {
        info!("No new defects found.");
    }

    new_defects
}

/// Writes one identifier per line, replacing any existing file.
pub fn persist(path: &Path, identifiers: &[String]) -> AppResult<()> {
    let file = File::create(path).map_err(|e| AppError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for id in identifiers {
        writer
            .write_all(id.as_bytes())
            .and_then(|_| writer.write_all(LINE_ENDING.as_bytes()))
            .map_err(|e| AppError::io(path, e))?;
    }
    writer.flush().map_err(|e| AppError::io(path, e))
}
