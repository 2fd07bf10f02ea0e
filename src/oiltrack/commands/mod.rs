use crate::config::TrackerConfig;
use crate::index::DisplayRecord;
use crate::model::VehicleRecord;
use crate::status::StatusSummary;
use std::path::PathBuf;

pub mod config;
pub mod edit;
pub mod init;
pub mod list;
pub mod refresh;
pub mod remove;
pub mod status;
pub mod submit;

/// Where oiltrack keeps its config file and local data.
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    pub data_dir: PathBuf,
}

impl TrackerPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<VehicleRecord>,
    pub listed_records: Vec<DisplayRecord>,
    pub summary: Option<StatusSummary>,
    pub config: Option<TrackerConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<VehicleRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_summary(mut self, summary: StatusSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = Some(config);
        self
    }
}
