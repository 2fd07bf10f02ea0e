//! Maintenance status derivation.
//!
//! A record's status depends only on how many kilometers remain until the due
//! mileage. Negative mileages are taken as given.

use crate::model::VehicleRecord;
use serde::Serialize;
use std::fmt;

/// Remaining distance at or below which a change is reported as coming up.
pub const DUE_SOON_WINDOW_KM: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MaintenanceStatus {
    Overdue,
    DueSoon,
    OnTrack,
}

impl MaintenanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceStatus::Overdue => "overdue",
            MaintenanceStatus::DueSoon => "due soon",
            MaintenanceStatus::OnTrack => "on track",
        }
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub status: MaintenanceStatus,
    pub remaining_km: i64,
}

/// Classifies a mileage pair.
///
/// The subtraction saturates at the `i64` bounds, so the sign of
/// `remaining_km` (and with it the classification) is exact for every input.
pub fn classify(current_mileage: i64, due_at_mileage: i64) -> StatusReport {
    let remaining_km = due_at_mileage.saturating_sub(current_mileage);
    let status = if remaining_km <= 0 {
        MaintenanceStatus::Overdue
    } else if remaining_km <= DUE_SOON_WINDOW_KM {
        MaintenanceStatus::DueSoon
    } else {
        MaintenanceStatus::OnTrack
    };
    StatusReport {
        status,
        remaining_km,
    }
}

pub fn status_of(record: &VehicleRecord) -> StatusReport {
    classify(record.fields.current_mileage, record.fields.due_at_mileage)
}

/// Per-status counts over a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub overdue: usize,
    pub due_soon: usize,
    pub on_track: usize,
}

impl StatusSummary {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a VehicleRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            match status_of(record).status {
                MaintenanceStatus::Overdue => summary.overdue += 1,
                MaintenanceStatus::DueSoon => summary.due_soon += 1,
                MaintenanceStatus::OnTrack => summary.on_track += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.overdue + self.due_soon + self.on_track
    }
}
