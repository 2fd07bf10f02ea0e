//! # Display Indexes
//!
//! Record ids are opaque store-assigned strings (Firestore ids are 20 random
//! characters), which makes them awkward to type. Listings number records from
//! 1 in collection order and front ends accept either form:
//!
//! - `3`: the third record of the current snapshot
//! - `id:Xk2...` or any other non-numeric string: a record id
//!
//! Indexes are positional, so they are only stable until the next refresh.

use crate::error::{Result, TrackerError};
use crate::model::{RecordId, VehicleRecord};
use crate::status::{status_of, StatusReport};
use std::fmt;
use std::str::FromStr;

/// A user input addressing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    Index(usize),
    Id(RecordId),
}

impl fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSelector::Index(i) => write!(f, "#{}", i),
            RecordSelector::Id(id) => write!(f, "id {}", id),
        }
    }
}

impl FromStr for RecordSelector {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(id) = s.strip_prefix("id:") {
            if id.is_empty() {
                return Err(TrackerError::SelectorNotFound(s.to_string()));
            }
            return Ok(RecordSelector::Id(RecordId::from(id)));
        }
        if s.is_empty() {
            return Err(TrackerError::SelectorNotFound(s.to_string()));
        }
        match s.parse::<usize>() {
            Ok(0) => Err(TrackerError::SelectorNotFound(s.to_string())),
            Ok(n) => Ok(RecordSelector::Index(n)),
            Err(_) => Ok(RecordSelector::Id(RecordId::from(s))),
        }
    }
}

/// A record as shown in a listing: its position, the record, and its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub index: usize,
    pub record: VehicleRecord,
    pub status: StatusReport,
}

pub fn index_records(records: &[VehicleRecord]) -> Vec<DisplayRecord> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| DisplayRecord {
            index: i + 1,
            record: record.clone(),
            status: status_of(record),
        })
        .collect()
}

/// Finds the record a selector points at.
pub fn resolve<'a>(
    records: &'a [VehicleRecord],
    selector: &RecordSelector,
) -> Result<&'a VehicleRecord> {
    let found = match selector {
        RecordSelector::Index(n) => n.checked_sub(1).and_then(|i| records.get(i)),
        RecordSelector::Id(id) => records.iter().find(|r| &r.id == id),
    };
    found.ok_or_else(|| TrackerError::SelectorNotFound(selector.to_string()))
}
