use crate::collection::RecordCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{resolve, RecordSelector};
use crate::model::{DraftField, VehicleRecord};
use crate::session::EditSession;

pub fn begin_create(session: &mut EditSession) -> CmdResult {
    session.begin_create();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info("Adding a new vehicle"));
    result
}

/// Loads `record` into the draft. The collection is not touched.
pub fn begin_edit(session: &mut EditSession, record: &VehicleRecord) -> CmdResult {
    session.begin_edit(record);
    let mut result = CmdResult::default().with_affected_records(vec![record.clone()]);
    result.add_message(CmdMessage::info(format!("Editing {}", record.label())));
    result
}

pub fn begin_edit_selected(
    collection: &RecordCollection,
    session: &mut EditSession,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    let record = resolve(collection.records(), selector)?;
    Ok(begin_edit(session, record))
}

pub fn cancel(session: &mut EditSession) -> CmdResult {
    let was_editing = session.is_editing();
    session.cancel();
    let mut result = CmdResult::default();
    if was_editing {
        result.add_message(CmdMessage::info("Edit cancelled"));
    }
    result
}

pub fn update_field(session: &mut EditSession, field: DraftField, value: impl Into<String>) {
    session.update_field(field, value);
}
