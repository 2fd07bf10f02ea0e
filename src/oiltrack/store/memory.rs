use super::RecordStore;
use crate::error::{Result, TrackerError};
use crate::model::{RecordId, VehicleFields, VehicleRecord};

/// In-memory storage.
///
/// Keeps insertion order and can be told to behave like an unreachable remote
/// so callers can exercise their failure paths.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Vec<VehicleRecord>,
    unreachable: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<VehicleRecord>) -> Self {
        Self {
            records,
            unreachable: false,
        }
    }

    /// Makes every operation fail with a transport error until switched back.
    pub fn set_unreachable(&mut self, unreachable: bool) {
        self.unreachable = unreachable;
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable {
            return Err(TrackerError::Transport(
                "in-memory store set unreachable".to_string(),
            ));
        }
        Ok(())
    }

    fn position(&self, id: &RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))
    }
}

impl RecordStore for InMemoryStore {
    fn list(&self) -> Result<Vec<VehicleRecord>> {
        self.check_reachable()?;
        Ok(self.records.clone())
    }

    fn create(&mut self, fields: &VehicleFields) -> Result<RecordId> {
        self.check_reachable()?;
        let id = RecordId::generate();
        self.records.push(VehicleRecord::new(id.clone(), fields.clone()));
        Ok(id)
    }

    fn update(&mut self, id: &RecordId, fields: &VehicleFields) -> Result<()> {
        self.check_reachable()?;
        let pos = self.position(id)?;
        self.records[pos].fields = fields.clone();
        Ok(())
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.check_reachable()?;
        let pos = self.position(id)?;
        self.records.remove(pos);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub fn fields(label: &str, current: i64, due: i64) -> VehicleFields {
        VehicleFields {
            label: label.to_string(),
            last_service_date: "2024-05-01".to_string(),
            current_mileage: current,
            due_at_mileage: due,
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_vehicle(mut self, label: &str, current: i64, due: i64) -> Self {
            self.store.create(&fields(label, current, due)).unwrap();
            self
        }

        pub fn with_vehicles(mut self, count: usize) -> Self {
            for i in 0..count {
                let label = format!("Vehicle {}", i + 1);
                self.store.create(&fields(&label, 10_000, 15_000)).unwrap();
            }
            self
        }
    }
}
