//! # Edit Session
//!
//! The edit session holds the single form draft and tracks whether the user is
//! creating a vehicle or editing an existing one.
//!
//! ```text
//!            begin_create / update_field
//!   Idle ───────────────────────────────▶ Editing (create)
//!    ▲ ▲        begin_edit(record)
//!    │ └───────────────────────────────── Editing (update id)
//!    │
//!    └── submit ok | cancel ── Editing ◀── submit failed (unchanged)
//! ```
//!
//! Draft values are raw user input. Nothing is checked until
//! [`EditSession::prepare`] turns the draft into [`VehicleFields`].

use crate::error::ValidationError;
use crate::model::{DraftField, RecordId, VehicleFields, VehicleRecord};

/// Unvalidated form input for one vehicle, plus the record it targets (if any).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub label: String,
    pub last_service_date: String,
    pub current_mileage: String,
    pub due_at_mileage: String,
    /// `None` means the draft describes a new record.
    pub target: Option<RecordId>,
}

impl EditDraft {
    pub fn from_record(record: &VehicleRecord) -> Self {
        Self {
            label: record.fields.label.clone(),
            last_service_date: record.fields.last_service_date.clone(),
            current_mileage: record.fields.current_mileage.to_string(),
            due_at_mileage: record.fields.due_at_mileage.to_string(),
            target: Some(record.id.clone()),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Label => &self.label,
            DraftField::LastServiceDate => &self.last_service_date,
            DraftField::CurrentMileage => &self.current_mileage,
            DraftField::DueAtMileage => &self.due_at_mileage,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Label => self.label = value,
            DraftField::LastServiceDate => self.last_service_date = value,
            DraftField::CurrentMileage => self.current_mileage = value,
            DraftField::DueAtMileage => self.due_at_mileage = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_none() && DraftField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn to_fields(&self) -> Result<VehicleFields, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        Ok(VehicleFields {
            label: self.label.trim().to_string(),
            last_service_date: self.last_service_date.trim().to_string(),
            current_mileage: parse_mileage(DraftField::CurrentMileage, &self.current_mileage)?,
            due_at_mileage: parse_mileage(DraftField::DueAtMileage, &self.due_at_mileage)?,
        })
    }
}

fn parse_mileage(field: DraftField, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

/// What a successful submit will do with the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Update(RecordId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing(EditMode),
}

#[derive(Debug, Default)]
pub struct EditSession {
    draft: EditDraft,
    editing: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if !self.editing {
            return SessionState::Idle;
        }
        match &self.draft.target {
            Some(id) => SessionState::Editing(EditMode::Update(id.clone())),
            None => SessionState::Editing(EditMode::Create),
        }
    }

    pub fn draft(&self) -> &EditDraft {
        &self.draft
    }

    pub fn target(&self) -> Option<&RecordId> {
        self.draft.target.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_create(&mut self) {
        self.draft = EditDraft::default();
        self.editing = true;
    }

    pub fn begin_edit(&mut self, record: &VehicleRecord) {
        self.draft = EditDraft::from_record(record);
        self.editing = true;
    }

    pub fn cancel(&mut self) {
        self.draft = EditDraft::default();
        self.editing = false;
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.editing = true;
    }

    /// Validates the draft without consuming it.
    pub fn prepare(&self) -> Result<(EditMode, VehicleFields), ValidationError> {
        let fields = self.draft.to_fields()?;
        let mode = match &self.draft.target {
            Some(id) => EditMode::Update(id.clone()),
            None => EditMode::Create,
        };
        Ok((mode, fields))
    }
}
