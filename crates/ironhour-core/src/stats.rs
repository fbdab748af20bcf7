//! Dashboard derivations over session history.
//!
//! Pure functions: the CLI renders these, nothing here touches storage.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::plan::Plan;
use crate::session::SessionRecord;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Each completed session is one stacked hour.
    pub total_hours: u64,
    pub current_streak_days: u32,
    pub total_interruptions: u64,
}

pub fn compute(history: &[SessionRecord]) -> DashboardStats {
    DashboardStats {
        total_hours: history.len() as u64,
        current_streak_days: current_streak_days(history),
        total_interruptions: history
            .iter()
            .map(|r| u64::from(r.meta.interruptions))
            .sum(),
    }
}

/// Consecutive local calendar days with at least one completed session,
/// counted back from today. A streak survives until a full day is skipped;
/// multiple sessions on one day collapse into it.
pub fn current_streak_days(history: &[SessionRecord]) -> u32 {
    let days = history
        .iter()
        .map(|r| r.completed_at.with_timezone(&Local).date_naive())
        .collect();
    streak_days(days, Local::now().date_naive())
}

fn streak_days(mut days: Vec<NaiveDate>, today: NaiveDate) -> u32 {
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    let Some(&latest) = days.first() else {
        return 0;
    };
    // Broken if the latest session is older than yesterday.
    if today.num_days_from_ce() - latest.num_days_from_ce() > 1 {
        return 0;
    }
    let mut streak = 1;
    for pair in days.windows(2) {
        if pair[0].num_days_from_ce() - pair[1].num_days_from_ce() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// The brick-wall grid: `slots` cells, the first `history.len()` filled with
/// that record's plan, the rest empty. History is already newest-first, so
/// the wall grows from the top.
pub fn wall(history: &[SessionRecord], slots: usize) -> Vec<Option<Plan>> {
    (0..slots)
        .map(|i| history.get(i).map(|r| r.plan))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{assemble, Field, SessionFields};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> SessionRecord {
        let mut fields = SessionFields::default();
        fields.set(Field::Goal, "g").unwrap();
        fields.set(Field::Why, "w").unwrap();
        fields.set(Field::Reflection, "r").unwrap();
        assemble(Plan::Vitality, &fields, 1)
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(streak_days(vec![], date(2026, 8, 26)), 0);
        assert_eq!(compute(&[]).total_hours, 0);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let days = vec![date(2026, 8, 26), date(2026, 8, 25), date(2026, 8, 24)];
        assert_eq!(streak_days(days, date(2026, 8, 26)), 3);
    }

    #[test]
    fn streak_allows_yesterday_as_latest() {
        let days = vec![date(2026, 8, 25), date(2026, 8, 24)];
        assert_eq!(streak_days(days, date(2026, 8, 26)), 2);
    }

    #[test]
    fn streak_breaks_after_a_skipped_day() {
        let days = vec![date(2026, 8, 23), date(2026, 8, 22)];
        assert_eq!(streak_days(days, date(2026, 8, 26)), 0);
    }

    #[test]
    fn gap_inside_history_stops_the_count() {
        let days = vec![date(2026, 8, 26), date(2026, 8, 25), date(2026, 8, 22)];
        assert_eq!(streak_days(days, date(2026, 8, 26)), 2);
    }

    #[test]
    fn same_day_sessions_collapse() {
        let days = vec![date(2026, 8, 26), date(2026, 8, 26), date(2026, 8, 25)];
        assert_eq!(streak_days(days, date(2026, 8, 26)), 2);
    }

    #[test]
    fn month_boundary_is_still_consecutive() {
        let days = vec![date(2026, 9, 1), date(2026, 8, 31)];
        assert_eq!(streak_days(days, date(2026, 9, 1)), 2);
    }

    #[test]
    fn compute_today_totals() {
        let history = vec![record(), record(), record()];
        let stats = compute(&history);
        assert_eq!(stats.total_hours, 3);
        assert_eq!(stats.total_interruptions, 3);
        // Records were just assembled, so the streak is alive.
        assert_eq!(stats.current_streak_days, 1);
    }

    #[test]
    fn wall_fills_from_the_front() {
        let history = vec![record(), record()];
        let grid = wall(&history, 5);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], Some(Plan::Vitality));
        assert_eq!(grid[1], Some(Plan::Vitality));
        assert_eq!(grid[2], None);
    }
}
