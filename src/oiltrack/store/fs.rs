use super::RecordStore;
use crate::error::{Result, TrackerError};
use crate::model::{RecordId, VehicleFields, VehicleRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DATA_FILENAME: &str = "vehicles.json";

/// Stores the whole collection as a JSON array in `<root>/vehicles.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(TrackerError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<VehicleRecord>> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(data_file).map_err(TrackerError::Io)?;
        let records: Vec<VehicleRecord> =
            serde_json::from_str(&content).map_err(TrackerError::Serialization)?;
        Ok(records)
    }

    fn save(&self, records: &[VehicleRecord]) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(records).map_err(TrackerError::Serialization)?;
        fs::write(self.data_file(), content).map_err(TrackerError::Io)?;
        debug!(count = records.len(), path = %self.data_file().display(), "saved vehicles");
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn list(&self) -> Result<Vec<VehicleRecord>> {
        self.load()
    }

    fn create(&mut self, fields: &VehicleFields) -> Result<RecordId> {
        let mut records = self.load()?;
        let id = RecordId::generate();
        records.push(VehicleRecord::new(id.clone(), fields.clone()));
        self.save(&records)?;
        Ok(id)
    }

    fn update(&mut self, id: &RecordId, fields: &VehicleFields) -> Result<()> {
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        record.fields = fields.clone();
        self.save(&records)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(TrackerError::NotFound(id.clone()));
        }
        self.save(&records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.data_file().display())
    }
}
