//! # Storage Layer
//!
//! This module defines the storage abstraction for oiltrack. The [`RecordStore`]
//! trait is the only thing the engine knows about persistence: a flat
//! collection of vehicle records keyed by an id the store assigns.
//!
//! ## Implementations
//!
//! - [`firestore::FirestoreStore`]: a Firestore document collection over the
//!   REST API. Ids are Firestore document ids.
//! - [`fs::FileStore`]: a single `vehicles.json` file in the data directory.
//!   Ids are generated locally.
//! - [`memory::InMemoryStore`]: process memory, used by tests and by the
//!   `memory` backend.
//!
//! ## Failure Model
//!
//! Remote stores report [`TrackerError::Transport`] when the request never
//! completed and [`TrackerError::RemoteRejected`] for a non-2xx answer. The
//! engine treats both as "nothing happened": its snapshot is left untouched.
//!
//! There is no versioning. Two clients updating the same record both succeed
//! and the later write wins.
//!
//! [`TrackerError::Transport`]: crate::error::TrackerError::Transport
//! [`TrackerError::RemoteRejected`]: crate::error::TrackerError::RemoteRejected

use crate::error::Result;
use crate::model::{RecordId, VehicleFields, VehicleRecord};

pub mod firestore;
pub mod fs;
pub mod memory;

/// Abstract interface for vehicle record storage.
pub trait RecordStore {
    /// All records currently in the store.
    fn list(&self) -> Result<Vec<VehicleRecord>>;

    /// Stores a new record and returns the id assigned to it.
    fn create(&mut self, fields: &VehicleFields) -> Result<RecordId>;

    /// Overwrites the fields of an existing record.
    fn update(&mut self, id: &RecordId, fields: &VehicleFields) -> Result<()>;

    /// Deletes a record.
    fn delete(&mut self, id: &RecordId) -> Result<()>;

    /// Short human-readable description of where records live.
    fn describe(&self) -> String;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn list(&self) -> Result<Vec<VehicleRecord>> {
        (**self).list()
    }

    fn create(&mut self, fields: &VehicleFields) -> Result<RecordId> {
        (**self).create(fields)
    }

    fn update(&mut self, id: &RecordId, fields: &VehicleFields) -> Result<()> {
        (**self).update(id, fields)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        (**self).delete(id)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
