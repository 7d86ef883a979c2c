//! Command execution
//!
//! Each command opens the tracker over the file store, performs one
//! operation and returns the rendered output.

use crate::cli::{Cli, Commands, RiffCommands};
use crate::output::{self, ChallengeReport, StatusReport};
use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate, Utc};
use riff_shared::{FileStore, MoodCatalog, ProgressTracker, RiffConfig, RiffError, RiffLibrary};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Opened stores plus the effective "today"
pub struct Session {
    pub tracker: ProgressTracker<Arc<FileStore>>,
    pub library: RiffLibrary<Arc<FileStore>>,
    pub today: NaiveDate,
}

impl Session {
    pub fn open(data_dir: PathBuf, today: NaiveDate) -> Result<Self> {
        debug!(data_dir = %data_dir.display(), %today, "opening session");
        let store = Arc::new(FileStore::new(data_dir));
        let catalog = MoodCatalog::standard();
        let tracker = ProgressTracker::open(Arc::clone(&store), catalog.clone())
            .context("failed to load progress")?;
        let library = RiffLibrary::new(store, catalog);
        Ok(Self {
            tracker,
            library,
            today,
        })
    }
}

/// Exit status for a failed command: the library's code when the chain
/// holds a `RiffError`, else 1
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<RiffError>())
        .and_then(|e| u8::try_from(e.code()).ok())
        .unwrap_or(1)
}

/// Run a parsed command and return what should be printed
pub fn run(cli: Cli, config: &RiffConfig) -> Result<String> {
    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
    let session = Session::open(data_dir, today)?;

    match cli.command {
        Commands::Create { mood, save, duration } => create(&session, &mood, save, duration),
        Commands::Share => share(&session),
        Commands::Status { json } => status(&session, json),
        Commands::Challenge { complete, json } => challenge(&session, complete, json),
        Commands::History => Ok(output::render_history(&session.tracker.mood_history())),
        Commands::Moods => Ok(output::render_moods(session.tracker.catalog())),
        Commands::Riffs { action } => riffs(&session, action),
    }
}

fn create(session: &Session, mood: &str, save: bool, duration: u32) -> Result<String> {
    let update = session.tracker.record_riff_creation(mood, session.today)?;
    let challenge = session.tracker.check_challenge_completion(mood, session.today)?;

    let mut out = output::render_update(&update);
    out.push_str(&output::render_challenge_outcome(&challenge));

    if save {
        let riff = session.library.save(mood, Utc::now(), duration)?;
        out.push_str(&format!("[SAVED] Riff #{}\n", riff.id));
    }
    Ok(out)
}

fn share(session: &Session) -> Result<String> {
    let update = session.tracker.record_riff_share()?;
    Ok(output::render_update(&update))
}

fn status(session: &Session, json: bool) -> Result<String> {
    let progress = session.tracker.progress();
    let report = StatusReport {
        xp: progress.xp,
        level: progress.level,
        streak: progress.current_streak(session.today),
        last_riff_date: progress.last_riff_date,
        challenges_completed: progress.challenges_completed,
        total_riffs: progress.total_riffs(),
        level_progress: progress.level_progress(),
    };

    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    } else {
        Ok(output::render_status(&report))
    }
}

fn challenge(session: &Session, complete: bool, json: bool) -> Result<String> {
    let completion = if complete {
        Some(session.tracker.complete_daily_challenge(session.today)?)
    } else {
        None
    };
    let challenge = session.tracker.get_or_create_daily_challenge(session.today)?;

    if json {
        let report = ChallengeReport {
            challenge,
            completion,
        };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&report)?));
    }

    let mut out = String::new();
    if let Some(outcome) = &completion {
        out.push_str(&output::render_challenge_outcome(outcome));
    }
    out.push_str(&output::render_challenge(&challenge));
    Ok(out)
}

fn riffs(session: &Session, action: RiffCommands) -> Result<String> {
    match action {
        RiffCommands::List => {
            let riffs = session.library.list()?;
            Ok(output::render_riffs(&riffs, session.tracker.catalog()))
        }
        RiffCommands::Delete { id } => {
            if session.library.delete(id)? {
                Ok(format!("[DELETED] Riff #{}\n", id))
            } else {
                anyhow::bail!("no saved riff with id {}", id)
            }
        }
    }
}
