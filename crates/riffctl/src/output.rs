//! Output formatting - ASCII-only terminal output
//!
//! Renderers return strings; the caller decides where they go.

use owo_colors::OwoColorize;
use riff_shared::{
    ChallengeOutcome, DailyChallenge, LevelProgress, LevelUp, MoodCatalog, MoodCount,
    ProgressUpdate, SavedRiff,
};
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// Everything `riffctl status` shows
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub xp: u32,
    pub level: u32,
    /// Streak as displayed today (0 when lapsed)
    pub streak: u32,
    pub last_riff_date: Option<chrono::NaiveDate>,
    pub challenges_completed: u32,
    pub total_riffs: u32,
    pub level_progress: LevelProgress,
}

/// What `riffctl challenge --json` prints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeReport {
    pub challenge: DailyChallenge,
    /// Present only when completion was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<ChallengeOutcome>,
}

fn plural_days(n: u32) -> &'static str {
    if n == 1 {
        "day"
    } else {
        "days"
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_level_up(level_up: &LevelUp) -> String {
    format!(
        "{} Level {} reached - {}",
        "[LEVEL UP]".bright_green(),
        level_up.new_level,
        level_up.reward.bold()
    )
}

pub fn render_update(update: &ProgressUpdate) -> String {
    let s = &update.snapshot;
    let mut out = String::new();
    let _ = writeln!(out, "[PROGRESS]");
    let _ = writeln!(
        out,
        "  XP: {}  Level {}  Streak: {} {}",
        s.xp,
        s.level,
        s.streak,
        plural_days(s.streak)
    );
    if let Some(level_up) = &update.level_up {
        let _ = writeln!(out, "{}", render_level_up(level_up));
    }
    out
}

pub fn render_challenge_outcome(outcome: &ChallengeOutcome) -> String {
    match outcome {
        ChallengeOutcome::Completed(update) => {
            let mut out = format!(
                "{} Daily challenge complete! XP now {}\n",
                "[CHALLENGE]".bright_cyan(),
                update.snapshot.xp
            );
            if let Some(level_up) = &update.level_up {
                let _ = writeln!(out, "{}", render_level_up(level_up));
            }
            out
        }
        ChallengeOutcome::AlreadyCompleted => {
            "[CHALLENGE] Already completed today\n".to_string()
        }
        ChallengeOutcome::MoodMismatch => String::new(),
    }
}

pub fn render_status(report: &StatusReport) -> String {
    let lp = &report.level_progress;
    let mut out = String::new();
    let _ = writeln!(out, "[PROGRESS]");
    let _ = writeln!(out, "  Level {}  ({} XP)", report.level, report.xp);
    let _ = writeln!(
        out,
        "  {} {}/{} XP to level {}",
        progress_bar(lp.percent),
        lp.xp_into_level,
        lp.next_level_xp - lp.level_start_xp,
        lp.level + 1
    );
    let _ = writeln!(out, "  Streak: {} {}", report.streak, plural_days(report.streak));
    let last = report
        .last_riff_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "never".to_string());
    let _ = writeln!(out, "  Last riff: {}", last);
    let _ = writeln!(out, "  Riffs created: {}", report.total_riffs);
    let _ = writeln!(out, "  Challenges completed: {}", report.challenges_completed);
    out
}

pub fn render_challenge(challenge: &DailyChallenge) -> String {
    let state = if challenge.completed {
        "[DONE]".bright_green().to_string()
    } else {
        "[OPEN]".yellow().to_string()
    };
    format!(
        "[CHALLENGE] {}\n  {} {}\n  Reward: {} XP\n",
        challenge.date, state, challenge.description, challenge.xp_reward
    )
}

pub fn render_history(history: &[MoodCount]) -> String {
    let max = history.iter().map(|m| m.count).max().unwrap_or(0);
    let width = history.iter().map(|m| m.display_name.len()).max().unwrap_or(0);
    let mut out = String::from("[MOOD HISTORY]\n");
    for m in history {
        let bar = if max == 0 {
            0
        } else {
            (m.count as usize * BAR_WIDTH) / max as usize
        };
        let _ = writeln!(
            out,
            "  {:<width$}  {:<bar_width$}  {}",
            m.display_name,
            "#".repeat(bar),
            m.count,
            width = width,
            bar_width = BAR_WIDTH
        );
    }
    out
}

pub fn render_moods(catalog: &MoodCatalog) -> String {
    let mut out = String::from("[MOODS]\n");
    for entry in catalog.entries() {
        let _ = writeln!(out, "  {:<8} {}", entry.id.to_lowercase(), entry.display_name);
    }
    out
}

pub fn render_riffs(riffs: &[SavedRiff], catalog: &MoodCatalog) -> String {
    if riffs.is_empty() {
        return "[RIFFS]\n  No saved riffs\n".to_string();
    }
    let mut out = String::from("[RIFFS]\n");
    for riff in riffs {
        let _ = writeln!(
            out,
            "  #{:<4} {:<6} {:>3}s  {}",
            riff.id,
            catalog.display_name(&riff.mood_name),
            riff.duration_seconds,
            riff.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}
