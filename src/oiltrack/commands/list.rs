use crate::collection::RecordCollection;
use crate::commands::CmdResult;
use crate::index::index_records;
use crate::status::StatusSummary;

pub fn run(collection: &RecordCollection) -> CmdResult {
    let listed = index_records(collection.records());
    let summary = StatusSummary::tally(collection.records());
    CmdResult::default()
        .with_listed_records(listed)
        .with_summary(summary)
}
