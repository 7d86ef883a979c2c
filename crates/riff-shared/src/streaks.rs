//! Streak calculation for riff creation.
//!
//! A streak counts consecutive local calendar days with at least one riff.
//! Dates are day-granular (`NaiveDate`); callers supply "today".

use chrono::NaiveDate;

/// Days per streak milestone
pub const STREAK_MILESTONE_DAYS: u32 = 5;
/// Bonus XP per completed milestone block
pub const STREAK_MILESTONE_XP: u32 = 25;

/// How a creation event moved the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Another riff on the same day
    Unchanged,
    /// First riff ever, or the day after the last riff
    Extended,
    /// Gap of two or more days (or a date before the last riff)
    Reset,
}

/// Streak after a riff created on `today`
pub fn advance_streak(current: u32, last: Option<NaiveDate>, today: NaiveDate) -> (u32, StreakChange) {
    match last {
        Some(last) if last == today => (current, StreakChange::Unchanged),
        None => (current.saturating_add(1), StreakChange::Extended),
        Some(last) if last.succ_opt() == Some(today) => {
            (current.saturating_add(1), StreakChange::Extended)
        }
        Some(_) => (1, StreakChange::Reset),
    }
}

/// Bonus XP for landing on a milestone streak
pub fn milestone_bonus(streak: u32) -> u32 {
    if streak > 0 && streak % STREAK_MILESTONE_DAYS == 0 {
        streak / STREAK_MILESTONE_DAYS * STREAK_MILESTONE_XP
    } else {
        0
    }
}

/// Streak as shown to the user: lapsed streaks read as 0 without a write
pub fn displayed_streak(streak: u32, last: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last {
        Some(last) if last == today || last.succ_opt() == Some(today) => streak,
        _ => 0,
    }
}
