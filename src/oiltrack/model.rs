use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque record identifier assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh locally synthesized id, for stores that do not assign their own.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The editable part of a vehicle record: what gets sent to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFields {
    pub label: String,
    pub last_service_date: String,
    pub current_mileage: i64,
    /// Absolute odometer value at which the next oil change is due.
    pub due_at_mileage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: VehicleFields,
}

impl VehicleRecord {
    pub fn new(id: RecordId, fields: VehicleFields) -> Self {
        Self { id, fields }
    }

    pub fn label(&self) -> &str {
        &self.fields.label
    }
}

/// One editable field of a vehicle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Label,
    LastServiceDate,
    CurrentMileage,
    DueAtMileage,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::Label,
        DraftField::LastServiceDate,
        DraftField::CurrentMileage,
        DraftField::DueAtMileage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Label => "label",
            DraftField::LastServiceDate => "last-service-date",
            DraftField::CurrentMileage => "current-mileage",
            DraftField::DueAtMileage => "due-at-mileage",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "label" | "make" | "name" => Ok(DraftField::Label),
            "last-service-date" | "date" | "lastOilChange" => Ok(DraftField::LastServiceDate),
            "current-mileage" | "mileage" => Ok(DraftField::CurrentMileage),
            "due-at-mileage" | "due" | "nextChangeAt" => Ok(DraftField::DueAtMileage),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}
