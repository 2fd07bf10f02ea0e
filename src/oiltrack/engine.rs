//! # Maintenance Engine
//!
//! The engine is a **thin facade** over the command layer and the single entry
//! point for record operations, whatever the front end. It owns:
//!
//! - the injected [`RecordStore`] and [`Clock`]
//! - the collection snapshot ([`RecordCollection`])
//! - the edit session ([`EditSession`])
//!
//! ## Role and Responsibilities
//!
//! The engine:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (display indexes → record ids → records)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no presentation logic.
//!
//! ## Lifecycle
//!
//! [`MaintenanceEngine::init`] loads the first snapshot;
//! [`MaintenanceEngine::teardown`] discards any pending draft. Periodic
//! reloading is not the engine's job: wrap it in `Arc<Mutex<_>>` and hand it
//! to [`crate::refresh::Refresher`].
//!
//! ## Concurrency
//!
//! Mutations are expected from one session at a time. Nothing guards against
//! other clients of a shared remote store: the last write to an id wins, and a
//! refresh replaces the snapshot even while a draft is open.
//!
//! Config and init operate on files only and live in
//! [`crate::commands::config`] / [`crate::commands::init`], so they work even
//! when no store can be built.

use crate::clock::{Clock, SystemClock};
use crate::collection::RecordCollection;
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::index::{resolve, RecordSelector};
use crate::model::{DraftField, RecordId, VehicleRecord};
use crate::session::EditSession;
use crate::status::{status_of, StatusReport, StatusSummary};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub struct MaintenanceEngine<S: RecordStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    collection: RecordCollection,
    session: EditSession,
    last_refresh: Option<DateTime<Utc>>,
}

impl<S: RecordStore> MaintenanceEngine<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: RecordStore, C: Clock> MaintenanceEngine<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            collection: RecordCollection::new(),
            session: EditSession::new(),
            last_refresh: None,
        }
    }

    /// Loads the first snapshot from the store.
    pub fn init(&mut self) -> Result<CmdResult> {
        info!(store = %self.store.describe(), "starting maintenance engine");
        self.refresh()
    }

    pub fn teardown(&mut self) {
        if self.session.is_editing() {
            debug!("discarding open draft on teardown");
        }
        self.session.cancel();
    }

    pub fn refresh(&mut self) -> Result<CmdResult> {
        let result = commands::refresh::run(&self.store, &mut self.collection)?;
        self.last_refresh = Some(self.clock.now());
        Ok(result)
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    pub fn records(&self) -> &[VehicleRecord] {
        self.collection.records()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn resolve(&self, selector: &RecordSelector) -> Result<&VehicleRecord> {
        resolve(self.collection.records(), selector)
    }

    pub fn list(&self) -> CmdResult {
        commands::list::run(&self.collection)
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary::tally(self.collection.records())
    }

    pub fn status_of(&self, record: &VehicleRecord) -> StatusReport {
        status_of(record)
    }

    pub fn status_selected(&self, selector: &RecordSelector) -> Result<CmdResult> {
        commands::status::run(&self.collection, selector)
    }

    pub fn begin_create(&mut self) -> CmdResult {
        commands::edit::begin_create(&mut self.session)
    }

    pub fn begin_edit(&mut self, record: &VehicleRecord) -> CmdResult {
        commands::edit::begin_edit(&mut self.session, record)
    }

    pub fn begin_edit_selected(&mut self, selector: &RecordSelector) -> Result<CmdResult> {
        commands::edit::begin_edit_selected(&self.collection, &mut self.session, selector)
    }

    pub fn cancel_edit(&mut self) -> CmdResult {
        commands::edit::cancel(&mut self.session)
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        commands::edit::update_field(&mut self.session, field, value);
    }

    pub fn submit(&mut self) -> Result<CmdResult> {
        commands::submit::run(&mut self.store, &mut self.collection, &mut self.session)
    }

    pub fn remove(&mut self, id: &RecordId) -> Result<CmdResult> {
        commands::remove::run(&mut self.store, &mut self.collection, &mut self.session, id)
    }

    pub fn remove_selected(&mut self, selector: &RecordSelector) -> Result<CmdResult> {
        let id = self.resolve(selector)?.id.clone();
        self.remove(&id)
    }
}
