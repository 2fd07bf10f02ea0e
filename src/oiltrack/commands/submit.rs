use crate::collection::RecordCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TrackerError};
use crate::model::VehicleRecord;
use crate::session::{EditMode, EditSession};
use crate::store::RecordStore;
use tracing::{info, warn};

/// Saves the current draft.
///
/// The draft is validated first, then written to the store, and only then
/// merged into the collection. Any failure leaves both the collection and the
/// draft as they were, so the user can fix the input and submit again.
pub fn run<S: RecordStore>(
    store: &mut S,
    collection: &mut RecordCollection,
    session: &mut EditSession,
) -> Result<CmdResult> {
    let (mode, fields) = session.prepare()?;
    let verb = match mode {
        EditMode::Update(_) => "updated",
        EditMode::Create => "added",
    };

    let record = match mode {
        EditMode::Update(id) => {
            if !collection.contains(&id) {
                warn!(%id, "edit target no longer exists");
                return Err(TrackerError::NotFound(id));
            }
            store.update(&id, &fields)?;
            collection.replace(&id, fields)?.clone()
        }
        EditMode::Create => {
            let id = store.create(&fields)?;
            let record = VehicleRecord::new(id, fields);
            collection.append(record.clone());
            record
        }
    };

    info!(id = %record.id, label = record.label(), "vehicle {}", verb);
    session.cancel();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Vehicle {}: {}",
        verb,
        record.label()
    )));
    Ok(result.with_affected_records(vec![record]))
}
