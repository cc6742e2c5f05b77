//! Weekly report slots and the transaction poll

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{error, info};

use crate::config::{ReportKind, ReportSlot, ScheduleSettings};
use crate::discord::ChatSink;
use crate::reports::Reports;

/// First `weekday` at `time` (UTC) strictly after `now`
pub fn next_fire(now: DateTime<Utc>, weekday: Weekday, time: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive();
    let target = weekday.num_days_from_monday() as i64;
    let days_ahead = (7 + target - today.weekday().num_days_from_monday() as i64) % 7;

    let candidate = (today + Duration::days(days_ahead)).and_time(time).and_utc();
    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(7)
    }
}

/// Runs the configured report slots until aborted
pub struct Scheduler {
    reports: Arc<Reports>,
    sink: Arc<dyn ChatSink>,
    config: ScheduleSettings,
}

impl Scheduler {
    pub fn new(reports: Arc<Reports>, sink: Arc<dyn ChatSink>, config: ScheduleSettings) -> Self {
        Self { reports, sink, config }
    }

    /// Spawns one task per slot plus the transaction poll
    pub fn start(&self) -> Result<Vec<(String, JoinHandle<()>)>> {
        info!("Starting scheduler with {} report slots", self.config.slots.len());
        let mut handles = Vec::with_capacity(self.config.slots.len() + 1);

        for slot in &self.config.slots {
            let time = slot.time_of_day()?;
            let name = format!("{} ({} {})", slot.report, slot.weekday, slot.time);
            let task = Self::run_slot(self.reports.clone(), self.sink.clone(), slot.clone(), time);
            handles.push((name, tokio::spawn(task)));
        }

        let poll = StdDuration::from_secs(self.config.transaction_poll_secs);
        let task = Self::run_transaction_poll(self.reports.clone(), self.sink.clone(), poll);
        handles.push(("transactions".to_string(), tokio::spawn(task)));

        Ok(handles)
    }

    async fn run_slot(
        reports: Arc<Reports>,
        sink: Arc<dyn ChatSink>,
        slot: ReportSlot,
        time: NaiveTime,
    ) {
        loop {
            let now = Utc::now();
            let next = next_fire(now, slot.weekday, time);
            info!("Next {} report scheduled for: {}", slot.report, next);

            sleep((next - now).to_std().unwrap_or(StdDuration::from_secs(60))).await;
            run_report(&reports, sink.as_ref(), slot.report).await;
        }
    }

    async fn run_transaction_poll(
        reports: Arc<Reports>,
        sink: Arc<dyn ChatSink>,
        every: StdDuration,
    ) {
        info!("Polling transactions every {:?}", every);

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            run_report(&reports, sink.as_ref(), ReportKind::Transactions).await;
        }
    }
}

/// Publishes one report, logging instead of failing; the next slot tries again
pub async fn run_report(reports: &Reports, sink: &dyn ChatSink, kind: ReportKind) {
    if let Err(e) = reports.publish(kind, sink, Utc::now()).await {
        error!("{} report failed: {:#}", kind, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_next_fire_later_same_week() {
        // Monday
        let now = at("2023-09-18T10:00:00Z");
        assert_eq!(next_fire(now, Weekday::Thu, hm(19, 0)), at("2023-09-21T19:00:00Z"));
    }

    #[test]
    fn test_next_fire_later_today() {
        let now = at("2023-09-21T18:59:00Z");
        assert_eq!(next_fire(now, Weekday::Thu, hm(19, 0)), at("2023-09-21T19:00:00Z"));
    }

    #[test]
    fn test_next_fire_is_strictly_after_now() {
        let now = at("2023-09-21T19:00:00Z");
        assert_eq!(next_fire(now, Weekday::Thu, hm(19, 0)), at("2023-09-28T19:00:00Z"));
    }

    #[test]
    fn test_next_fire_wraps_week() {
        // Wednesday, Tuesday slot is six days out
        let now = at("2023-09-20T16:00:00Z");
        assert_eq!(next_fire(now, Weekday::Tue, hm(15, 1)), at("2023-09-26T15:01:00Z"));
    }

    #[test]
    fn test_next_fire_sunday_night() {
        let now = at("2023-09-24T23:30:00Z");
        assert_eq!(next_fire(now, Weekday::Sun, hm(23, 0)), at("2023-10-01T23:00:00Z"));
    }
}
