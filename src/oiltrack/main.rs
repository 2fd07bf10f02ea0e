use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use colored::*;
use oiltrack::commands::config::ConfigAction;
use oiltrack::commands::{init as init_cmd, CmdMessage, MessageLevel, TrackerPaths};
use oiltrack::config::CONFIG_KEYS;
use oiltrack::engine::MaintenanceEngine;
use oiltrack::error::{Result, TrackerError};
use oiltrack::index::{DisplayRecord, RecordSelector};
use oiltrack::init::{initialize, resolve_paths, DynStore, TrackerContext};
use oiltrack::model::DraftField;
use oiltrack::refresh::Refresher;
use oiltrack::status::{MaintenanceStatus, StatusSummary};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, FieldArgs};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let paths = resolve_paths()?;

    // config and init must work before any store can be built
    match cli.command {
        Some(Commands::Config { key, value }) => return handle_config(&paths, key, value),
        Some(Commands::Init) => return handle_init(&paths),
        _ => {}
    }

    let mut ctx = initialize(paths, cli.backend)?;
    ctx.engine.init()?;

    match cli.command {
        Some(Commands::Add { fields }) => handle_add(&mut ctx, fields),
        Some(Commands::Edit { selector, fields }) => handle_edit(&mut ctx, &selector, fields),
        Some(Commands::Remove { selectors }) => handle_remove(&mut ctx, &selectors),
        Some(Commands::Status { selector }) => handle_status(&ctx, &selector),
        Some(Commands::Watch { interval }) => handle_watch(ctx, interval),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Config { .. }) | Some(Commands::Init) => Ok(()),
    }
}

fn handle_list(ctx: &TrackerContext) -> Result<()> {
    let result = ctx.engine.list();
    print_records(&result.listed_records);
    if let Some(summary) = &result.summary {
        print_summary(summary);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut TrackerContext, fields: FieldArgs) -> Result<()> {
    ctx.engine.begin_create();
    apply_fields(&mut ctx.engine, fields);
    let result = ctx.engine.submit()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut TrackerContext, selector: &str, fields: FieldArgs) -> Result<()> {
    let selector: RecordSelector = selector.parse()?;
    ctx.engine.begin_edit_selected(&selector)?;
    apply_fields(&mut ctx.engine, fields);
    let result = ctx.engine.submit()?;
    print_messages(&result.messages);
    Ok(())
}

fn apply_fields(engine: &mut MaintenanceEngine<DynStore>, fields: FieldArgs) {
    let given = [
        (DraftField::Label, fields.label),
        (DraftField::LastServiceDate, fields.date),
        (DraftField::CurrentMileage, fields.mileage),
        (DraftField::DueAtMileage, fields.due),
    ];
    for (field, value) in given {
        if let Some(value) = value {
            engine.update_field(field, value);
        }
    }
}

fn handle_remove(ctx: &mut TrackerContext, selectors: &[String]) -> Result<()> {
    // Resolve everything first: indexes shift as records are removed.
    let mut ids = Vec::with_capacity(selectors.len());
    for raw in selectors {
        let selector: RecordSelector = raw.parse()?;
        ids.push(ctx.engine.resolve(&selector)?.id.clone());
    }

    for id in ids {
        let result = ctx.engine.remove(&id)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_status(ctx: &TrackerContext, selector: &str) -> Result<()> {
    let selector: RecordSelector = selector.parse()?;
    let result = ctx.engine.status_selected(&selector)?;
    for dr in &result.listed_records {
        print_status_detail(dr);
    }
    Ok(())
}

fn handle_watch(ctx: TrackerContext, interval: Option<u64>) -> Result<()> {
    let interval = match interval {
        Some(0) => return Err(TrackerError::Config("interval must be at least 1 second".into())),
        Some(secs) => Duration::from_secs(secs),
        None => ctx.config.refresh_interval(),
    };

    handle_list(&ctx)?;
    let engine = Arc::new(Mutex::new(ctx.engine));

    let handle = Refresher::spawn(Arc::clone(&engine), interval, |engine, err| {
        println!();
        println!("{}", refresh_header(engine.last_refresh()).dimmed());
        if let Some(e) = err {
            println!("{}", format!("Refresh failed: {}", e).red());
        }
        let result = engine.list();
        print_records(&result.listed_records);
        if let Some(summary) = &result.summary {
            print_summary(summary);
        }
    })?;

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .map_err(|e| TrackerError::Io(std::io::Error::other(e)))?;

    let _ = stop_rx.recv();
    handle.stop();
    if let Ok(mut engine) = engine.lock() {
        engine.teardown();
    }
    Ok(())
}

/// Stamped by the engine's clock, so a failed reload keeps the previous time.
fn refresh_header(last_refresh: Option<DateTime<Utc>>) -> String {
    match last_refresh {
        Some(at) => format!("Last refresh {}", at.format("%H:%M:%S UTC")),
        None => "Not refreshed yet".to_string(),
    }
}

fn handle_config(paths: &TrackerPaths, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = oiltrack::commands::config::run(paths, action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in CONFIG_KEYS {
                let value = config.get(key).unwrap_or_default();
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(paths: &TrackerPaths) -> Result<()> {
    let result = init_cmd::run(paths)?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

const LABEL_WIDTH: usize = 28;
const STATUS_WIDTH: usize = 9;

fn colorize(status: MaintenanceStatus, text: String) -> ColoredString {
    match status {
        MaintenanceStatus::Overdue => text.red().bold(),
        MaintenanceStatus::DueSoon => text.yellow(),
        MaintenanceStatus::OnTrack => text.green(),
    }
}

fn print_records(records: &[DisplayRecord]) {
    if records.is_empty() {
        println!("No vehicles found.");
        return;
    }

    for dr in records {
        let fields = &dr.record.fields;
        let idx_str = format!("{:>3}. ", dr.index);

        let label = truncate_to_width(&fields.label, LABEL_WIDTH);
        let padding = LABEL_WIDTH.saturating_sub(label.width());

        let status = colorize(
            dr.status.status,
            format!("{:<width$}", dr.status.status.label(), width = STATUS_WIDTH),
        );
        let remaining = format!("{:>8} km", dr.status.remaining_km);
        let odometer = format!("({} / {})", fields.current_mileage, fields.due_at_mileage);

        println!(
            "{}{}{} {} {}  {}  {}",
            idx_str,
            label,
            " ".repeat(padding),
            status,
            remaining,
            odometer.dimmed(),
            format_service_date(&fields.last_service_date).dimmed()
        );
    }
}

fn print_summary(summary: &StatusSummary) {
    if summary.total() == 0 {
        return;
    }
    println!();
    println!(
        "{} vehicles: {}, {}, {}",
        summary.total(),
        format!("{} overdue", summary.overdue).red(),
        format!("{} due soon", summary.due_soon).yellow(),
        format!("{} on track", summary.on_track).green()
    );
}

fn print_status_detail(dr: &DisplayRecord) {
    let fields = &dr.record.fields;
    println!("{} {}", format!("{}.", dr.index).yellow(), fields.label.bold());
    println!("--------------------------------");
    println!("id:               {}", dr.record.id);
    println!("last oil change:  {}", format_service_date(&fields.last_service_date));
    println!("current mileage:  {} km", fields.current_mileage);
    println!("next change at:   {} km", fields.due_at_mileage);
    println!("remaining:        {} km", dr.status.remaining_km);
    println!(
        "status:           {}",
        colorize(dr.status.status, dr.status.status.label().to_string())
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// `2024-05-01 (5 months ago)` for ISO dates in the past, the raw text otherwise.
fn format_service_date(date: &str) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") else {
        return date.to_string();
    };
    let today = Utc::now().date_naive();
    let Ok(elapsed) = today.signed_duration_since(parsed).to_std() else {
        return date.to_string();
    };
    if elapsed.is_zero() {
        return format!("{} (today)", date);
    }

    let formatter = timeago::Formatter::new();
    format!("{} ({})", date, formatter.convert(elapsed))
}
