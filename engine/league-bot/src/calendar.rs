//! Season week arithmetic

use chrono::NaiveDate;
use sleeper_client::NflState;

/// 1-based week of the season `today` falls in, counting 7-day blocks from
/// `season_start`. `None` before the season starts.
pub fn season_week(season_start: NaiveDate, today: NaiveDate) -> Option<u32> {
    let days = (today - season_start).num_days();
    if days < 0 {
        return None;
    }
    u32::try_from(days / 7 + 1).ok()
}

/// Current week for reports. Uses the published season start date when there
/// is one and Sleeper's own week counter otherwise.
pub fn current_week(state: &NflState, today: NaiveDate) -> Option<u32> {
    match state.season_start() {
        Some(start) => season_week(start, today),
        None => (state.week > 0).then_some(state.week),
    }
}
