use crate::collection::RecordCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TrackerError};
use crate::model::RecordId;
use crate::session::EditSession;
use crate::store::RecordStore;
use tracing::info;

/// Deletes a record from the store and the collection.
///
/// An id missing from the collection is always `NotFound`, so removing the
/// same id twice fails the second time. If the draft was editing the removed
/// record, the draft is discarded.
pub fn run<S: RecordStore>(
    store: &mut S,
    collection: &mut RecordCollection,
    session: &mut EditSession,
    id: &RecordId,
) -> Result<CmdResult> {
    if !collection.contains(id) {
        return Err(TrackerError::NotFound(id.clone()));
    }

    store.delete(id)?;
    let removed = collection.remove(id)?;
    info!(%id, label = removed.label(), "vehicle removed");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Vehicle removed: {}",
        removed.label()
    )));

    if session.target() == Some(id) {
        session.cancel();
        result.add_message(CmdMessage::warning(
            "The vehicle being edited was removed; edit discarded",
        ));
    }

    Ok(result.with_affected_records(vec![removed]))
}
