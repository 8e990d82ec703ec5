use crate::errors::ImportError;
use crate::models::{DateKey, Status};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::error;

/// Sparse mapping of dates to their status. Unset days have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusStore {
    days: BTreeMap<DateKey, Status>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the persisted record. Anything unreadable is an empty store.
    pub fn from_persisted(text: &str) -> Self {
        match Self::parse(text) {
            Ok(store) => store,
            Err(err) => {
                error!("persisted state is corrupt, starting empty: {err}");
                Self::default()
            }
        }
    }

    /// Parses a full document, rejecting unknown statuses and malformed
    /// dates instead of passing them through.
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Object(entries) = value else {
            return Err(ImportError::NotAnObject);
        };

        let mut days = BTreeMap::new();
        for (raw_date, raw_status) in entries {
            let date: DateKey = raw_date.parse()?;
            let status = raw_status
                .as_str()
                .and_then(Status::parse)
                .ok_or_else(|| ImportError::UnrecognizedStatus {
                    date: raw_date.clone(),
                    value: raw_status.to_string(),
                })?;
            days.insert(date, status);
        }
        Ok(Self { days })
    }

    /// The exact text that gets persisted and offered as a backup download.
    pub fn snapshot(&self) -> String {
        // BTreeMap<DateKey, Status> always serializes
        serde_json::to_string_pretty(&self.days).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get(&self, date: DateKey) -> Option<Status> {
        self.days.get(&date).copied()
    }

    /// `None` clears the date; clearing an unset date is a no-op.
    pub fn set_status(&mut self, date: DateKey, status: Option<Status>) {
        match status {
            Some(status) => {
                self.days.insert(date, status);
            }
            None => {
                self.days.remove(&date);
            }
        }
    }

    /// Copy of the store with one date changed, leaving `self` untouched
    /// until the caller decides to commit it.
    pub fn with_status(&self, date: DateKey, status: Option<Status>) -> Self {
        let mut next = self.clone();
        next.set_status(date, status);
        next
    }

    /// Wholesale replacement from an imported document. On error `self` is
    /// unchanged. Returns the number of imported entries.
    pub fn import_replace(&mut self, text: &str) -> Result<usize, ImportError> {
        let imported = Self::parse(text)?;
        *self = imported;
        Ok(self.len())
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
