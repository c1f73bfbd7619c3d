//! Append-only record of executions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    #[serde(with = "timestamp_serde")]
    pub timestamp: DateTime<Utc>,
    pub input_code: String,
    /// Present on records written by the code-review flow
    #[serde(default)]
    pub review: Option<ReviewSummary>,
    #[serde(default)]
    pub execution: Option<ExecutionSummary>,
}

impl HistoryRecord {
    pub fn execution(input_code: String, output: String, error: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            input_code,
            review: None,
            execution: Some(ExecutionSummary { output, error }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub output: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub analysis: String,
    #[serde(default)]
    pub issues: Vec<String>,
    pub report: String,
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a record for one execution and return it
    async fn record_execution(
        &self,
        input_code: &str,
        output: &str,
        error: &str,
    ) -> Result<HistoryRecord, Error>;

    /// All records, oldest first
    async fn all(&self) -> Result<Vec<HistoryRecord>, Error>;
}

/// History kept as a pretty-printed JSON array on disk.
///
/// Every append rewrites the whole file. Existing entries are carried over as
/// raw JSON, so records of any shape survive an append; [`HistoryStore::all`]
/// skips the ones it cannot read. A file that is not a JSON array at all is
/// moved aside to `<name>.corrupt-<timestamp>` before the next append.
pub struct JsonFileHistory {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries currently on disk, or `None` when the file is unparseable
    async fn load_raw(&self) -> Result<Option<Vec<Value>>, Error> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Some(Vec::new())),
            Err(e) => return Err(Error::History(format!("read {}: {}", self.path.display(), e))),
        };

        match serde_json::from_slice(&contents) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable history file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    async fn back_up_unreadable(&self) -> Result<PathBuf, Error> {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S%.6f")));
        let backup = self.path.with_file_name(name);

        fs::rename(&self.path, &backup).await.map_err(|e| {
            Error::History(format!(
                "move {} to {}: {}",
                self.path.display(),
                backup.display(),
                e
            ))
        })?;
        warn!(
            "Moved unreadable history file {} to {}",
            self.path.display(),
            backup.display()
        );
        Ok(backup)
    }

    async fn save(&self, entries: &[Value]) -> Result<(), Error> {
        let json = serde_json::to_vec_pretty(entries)?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| Error::History(format!("write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistory {
    async fn record_execution(
        &self,
        input_code: &str,
        output: &str,
        error: &str,
    ) -> Result<HistoryRecord, Error> {
        let _guard = self.lock.lock().await;

        let mut entries = match self.load_raw().await? {
            Some(entries) => entries,
            None => {
                self.back_up_unreadable().await?;
                Vec::new()
            }
        };

        let record =
            HistoryRecord::execution(input_code.to_string(), output.to_string(), error.to_string());
        entries.push(serde_json::to_value(&record)?);
        self.save(&entries).await?;

        debug!("Recorded execution {} ({} total)", record.id, entries.len());
        Ok(record)
    }

    async fn all(&self) -> Result<Vec<HistoryRecord>, Error> {
        let _guard = self.lock.lock().await;

        let entries = self.load_raw().await?.unwrap_or_default();
        let records = entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping history entry {}: {}", i, e);
                    None
                }
            })
            .collect();
        Ok(records)
    }
}

#[derive(Default)]
pub struct InMemoryHistory {
    records: Mutex<Vec<HistoryRecord>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn record_execution(
        &self,
        input_code: &str,
        output: &str,
        error: &str,
    ) -> Result<HistoryRecord, Error> {
        let record =
            HistoryRecord::execution(input_code.to_string(), output.to_string(), error.to_string());
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn all(&self) -> Result<Vec<HistoryRecord>, Error> {
        Ok(self.records.lock().await.clone())
    }
}

/// Timestamps are written as RFC 3339. Older files may hold naive ISO 8601
/// timestamps, which are read as UTC.
mod timestamp_serde {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(timestamp.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(D::Error::custom)
    }
}
