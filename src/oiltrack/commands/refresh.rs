use crate::collection::RecordCollection;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RecordStore;
use tracing::debug;

/// Reloads the snapshot from the store.
///
/// The snapshot is replaced wholesale; on failure it is left as it was.
/// A draft in progress is not reconciled against the new snapshot.
pub fn run<S: RecordStore>(store: &S, collection: &mut RecordCollection) -> Result<CmdResult> {
    let records = store.list()?;
    debug!(count = records.len(), "snapshot refreshed");
    collection.replace_all(records);
    Ok(CmdResult::default())
}
