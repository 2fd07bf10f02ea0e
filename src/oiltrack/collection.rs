use crate::error::{Result, TrackerError};
use crate::model::{RecordId, VehicleFields, VehicleRecord};

/// The engine's in-memory snapshot of the vehicle collection, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCollection {
    records: Vec<VehicleRecord>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&VehicleRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn append(&mut self, record: VehicleRecord) {
        self.records.push(record);
    }

    /// Replaces the fields of the record with `id` in place, keeping its position.
    pub fn replace(&mut self, id: &RecordId, fields: VehicleFields) -> Result<&VehicleRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        record.fields = fields;
        Ok(record)
    }

    pub fn remove(&mut self, id: &RecordId) -> Result<VehicleRecord> {
        let pos = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        Ok(self.records.remove(pos))
    }

    /// Swaps in a fresh snapshot from the store.
    pub fn replace_all(&mut self, records: Vec<VehicleRecord>) {
        self.records = records;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, label: &str) -> VehicleRecord {
        VehicleRecord::new(
            RecordId::from(id),
            VehicleFields {
                label: label.into(),
                last_service_date: "2024-01-01".into(),
                current_mileage: 1000,
                due_at_mileage: 6000,
            },
        )
    }

    #[test]
    fn replace_keeps_id_and_position() {
        let mut collection =
            RecordCollection::from_records(vec![record("a", "A"), record("b", "B"), record("c", "C")]);
        let mut fields = collection.get(&RecordId::from("b")).unwrap().fields.clone();
        fields.label = "B2".into();

        collection.replace(&RecordId::from("b"), fields).unwrap();

        let labels: Vec<_> = collection.records().iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["A", "B2", "C"]);
        assert_eq!(collection.records()[1].id, RecordId::from("b"));
    }

    #[test]
    fn replace_missing_is_not_found() {
        let mut collection = RecordCollection::new();
        let err = collection
            .replace(&RecordId::from("zz"), record("zz", "Z").fields)
            .unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(id) if id.as_str() == "zz"));
    }

    #[test]
    fn remove_twice_reports_not_found_second_time() {
        let mut collection = RecordCollection::from_records(vec![record("a", "A")]);
        assert!(collection.remove(&RecordId::from("a")).is_ok());
        assert!(matches!(
            collection.remove(&RecordId::from("a")),
            Err(TrackerError::NotFound(_))
        ));
        assert!(collection.is_empty());
    }

    #[test]
    fn append_goes_to_the_end() {
        let mut collection = RecordCollection::from_records(vec![record("a", "A")]);
        collection.append(record("b", "B"));
        assert_eq!(collection.records().last().unwrap().label(), "B");
        assert_eq!(collection.len(), 2);
    }
}
