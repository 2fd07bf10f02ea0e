//! # Oiltrack Architecture
//!
//! Oiltrack keeps track of when each vehicle in a fleet needs its next oil
//! change. It is a **UI-agnostic library** with a CLI client: the library owns
//! the records, the edit form state and the maintenance rules; the binary only
//! parses arguments and prints.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (engine.rs, refresh.rs)                             │
//! │  - Owns the snapshot, the edit session, store and clock     │
//! │  - Normalizes inputs (indexes → ids → records)              │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic: submit, remove, refresh, list, status    │
//! │  - Built on pure parts: session, collection, status         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract RecordStore trait                               │
//! │  - FirestoreStore, FileStore, InMemoryStore                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Maintenance Status
//!
//! Each record carries its current odometer reading and the odometer value at
//! which the next change is due. The difference decides the status: at or past
//! due is overdue, within 1000 km is due soon, anything else is on track. See
//! [`status`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `engine.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! ## Module Overview
//!
//! - [`engine`]: The engine facade, entry point for record operations
//! - [`refresh`]: Periodic snapshot reload with explicit stop
//! - [`commands`]: Business logic for each operation
//! - [`session`]: Edit draft and its state machine
//! - [`collection`]: The in-memory record snapshot
//! - [`status`]: Maintenance status derivation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`VehicleRecord`, `RecordId`, `DraftField`)
//! - [`index`]: Display indexes and record selectors
//! - [`config`]: Configuration management
//! - [`init`]: Wiring config, store and engine together
//! - [`clock`]: Injected time source
//! - [`error`]: Error types

pub mod clock;
pub mod collection;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod refresh;
pub mod session;
pub mod status;
pub mod store;
