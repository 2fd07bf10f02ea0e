use crate::collection::RecordCollection;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{index_records, resolve, RecordSelector};

/// Status of a single record, as a one-entry listing that keeps its display index.
pub fn run(collection: &RecordCollection, selector: &RecordSelector) -> Result<CmdResult> {
    let record = resolve(collection.records(), selector)?;
    let listed: Vec<_> = index_records(collection.records())
        .into_iter()
        .filter(|dr| dr.record.id == record.id)
        .collect();
    Ok(CmdResult::default().with_listed_records(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::status::MaintenanceStatus;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::RecordStore;

    #[test]
    fn reports_selected_record() {
        let store = StoreFixture::new()
            .with_vehicle("Fine", 40000, 50000)
            .with_vehicle("Late", 50000, 50000)
            .store;
        let collection = RecordCollection::from_records(store.list().unwrap());

        let result = run(&collection, &RecordSelector::Index(2)).unwrap();

        assert_eq!(result.listed_records.len(), 1);
        let entry = &result.listed_records[0];
        assert_eq!(entry.index, 2);
        assert_eq!(entry.status.status, MaintenanceStatus::Overdue);
        assert_eq!(entry.status.remaining_km, 0);
    }

    #[test]
    fn unknown_selector_fails() {
        let collection = RecordCollection::new();
        assert!(matches!(
            run(&collection, &RecordSelector::Index(1)),
            Err(TrackerError::SelectorNotFound(_))
        ));
    }
}
