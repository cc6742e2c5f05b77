//! Report pipelines: fetch from the providers, run the league stats, format

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use league_stats::{
    bench_points, close_games, highest_bench, highest_scorer, lowest_scorer, negative_starters,
    standings, MatchupAggregator, MatchupRecord, PlayerDirectory, RosterRecord, Scoreboard,
    ScoringEngine, TeamDirectory, WeekStats, CUSTOM_POINTS_KEY,
};
use sleeper_client::{LeagueProvider, NflState, PlayerProvider, StatsProvider, Transaction};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::calendar;
use crate::config::{BotConfig, LeagueSettings, ReportKind, ReportSlot};
use crate::discord::ChatSink;
use crate::format::{self, Highlights};
use crate::transactions::{format_transaction, TransactionFeed};

/// One week's raw league data with stats already scored
struct WeekData {
    matchups: Vec<MatchupRecord>,
    rosters: Vec<RosterRecord>,
    teams: TeamDirectory,
    stats: WeekStats,
}

impl WeekData {
    fn scoreboard(&self) -> Scoreboard {
        let board = MatchupAggregator::new(&self.teams, CUSTOM_POINTS_KEY)
            .build(&self.matchups, &self.stats);
        for e in &board.errors {
            warn!("Matchup dropped from scoreboard: {}", e);
        }
        board
    }
}

/// A rendered message, plus the transaction it announces for alerts
struct Outgoing {
    text: String,
    announces: Option<Transaction>,
}

impl From<String> for Outgoing {
    fn from(text: String) -> Self {
        Self { text, announces: None }
    }
}

/// Renders reports for one league
pub struct Reports {
    league: Arc<dyn LeagueProvider>,
    stats: Arc<dyn StatsProvider>,
    players: Arc<dyn PlayerProvider>,
    settings: LeagueSettings,
    slots: Vec<ReportSlot>,
    feed: Mutex<TransactionFeed>,

    /// Loaded on first use; the directory is large and changes rarely
    directory: OnceCell<PlayerDirectory>,
}

impl Reports {
    pub fn new<P>(provider: Arc<P>, config: &BotConfig) -> Self
    where
        P: LeagueProvider + StatsProvider + PlayerProvider + 'static,
    {
        let window = Duration::seconds(config.schedule.transaction_window_secs as i64);

        Self {
            league: provider.clone(),
            stats: provider.clone(),
            players: provider,
            settings: config.league.clone(),
            slots: config.schedule.slots.clone(),
            feed: Mutex::new(TransactionFeed::new(window)),
            directory: OnceCell::new(),
        }
    }

    /// Messages for `kind` as of `now`. Empty when there is nothing to post,
    /// e.g. before the season starts.
    ///
    /// Rendering never marks transactions as announced; only `publish` does.
    pub async fn render(&self, kind: ReportKind, now: DateTime<Utc>) -> Result<Vec<String>> {
        let outgoing = self.outgoing(kind, now).await?;
        Ok(outgoing.into_iter().map(|message| message.text).collect())
    }

    /// Renders `kind` and sends every message to `sink`; returns how many were sent.
    ///
    /// A transaction counts as announced only once its alert was sent, so an
    /// alert that fails to go out is retried on the next poll.
    pub async fn publish(
        &self,
        kind: ReportKind,
        sink: &dyn ChatSink,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        let messages = self.outgoing(kind, now).await?;

        for message in &messages {
            sink.send(&message.text)
                .await
                .with_context(|| format!("Failed to send {} report", kind))?;

            if let Some(tx) = &message.announces {
                self.feed.lock().await.mark_announced(tx);
            }
        }

        if !messages.is_empty() {
            info!("Posted {} report ({} message(s))", kind, messages.len());
        }
        Ok(messages.len())
    }

    async fn outgoing(&self, kind: ReportKind, now: DateTime<Utc>) -> Result<Vec<Outgoing>> {
        let state = self.league.nfl_state().await.context("Failed to fetch NFL state")?;

        if kind == ReportKind::Welcome {
            return Ok(vec![format::welcome(state.season_year(), &self.slots).into()]);
        }

        let Some(week) = calendar::current_week(&state, now.date_naive()) else {
            info!("Season has not started, skipping {} report", kind);
            return Ok(Vec::new());
        };
        debug!("Rendering {} report for week {}", kind, week);

        let text = match kind {
            ReportKind::Matchups => {
                let (rosters, teams) = self.league_tables().await?;
                let matchups =
                    self.league.matchups(week).await.context("Failed to fetch matchups")?;
                let data = WeekData { matchups, rosters, teams, stats: WeekStats::new() };
                format::matchups(week, &data.scoreboard())
            }
            ReportKind::Scores => {
                let data = self.week_data(&state, week).await?;
                format::scores(&data.scoreboard())
            }
            ReportKind::CloseGames => {
                let data = self.week_data(&state, week).await?;
                let board = data.scoreboard();
                let margin = self.settings.close_game_margin;
                format::close_games(&close_games(&board, margin), margin)
            }
            ReportKind::Standings => {
                let (rosters, teams) = self.league_tables().await?;
                format::standings(&standings(&rosters, &teams), self.settings.playoff_teams)
            }
            ReportKind::Highlights => self.highlights(&state, week).await?,
            ReportKind::Transactions => return self.transactions(week, now).await,
            ReportKind::Welcome => return Ok(Vec::new()),
        };

        Ok(vec![text.into()])
    }

    async fn league_tables(&self) -> Result<(Vec<RosterRecord>, TeamDirectory)> {
        let (rosters, users) = tokio::try_join!(self.league.rosters(), self.league.users())
            .context("Failed to fetch rosters and users")?;
        let teams = TeamDirectory::new(&rosters, &users);
        Ok((rosters, teams))
    }

    async fn week_data(&self, state: &NflState, week: u32) -> Result<WeekData> {
        let season = state.season_year().context("NFL state has no season year")?;

        let (rosters, teams) = self.league_tables().await?;
        let (matchups, settings, mut stats) = tokio::try_join!(
            self.league.matchups(week),
            self.league.scoring_settings(),
            self.stats.week_stats(&self.settings.season_type, season, week),
        )
        .context("Failed to fetch week data")?;

        let scored = ScoringEngine::new(settings).score_week(&mut stats);
        debug!("Scored {} players for week {}", scored, week);

        Ok(WeekData { matchups, rosters, teams, stats })
    }

    async fn player_directory(&self) -> Result<&PlayerDirectory> {
        self.directory
            .get_or_try_init(|| async { self.players.all_players().await })
            .await
            .context("Failed to fetch player directory")
    }

    async fn highlights(&self, state: &NflState, week: u32) -> Result<String> {
        let data = self.week_data(state, week).await?;
        let players = self.player_directory().await?;
        let board = data.scoreboard();

        let benches = bench_points(&data.matchups, &data.stats, &data.teams);
        for e in &benches.errors {
            warn!("Bench points skipped: {}", e);
        }

        let highlights = Highlights {
            highest: highest_scorer(&board),
            lowest: lowest_scorer(&board),
            bench: highest_bench(&benches.entries).cloned(),
            negatives: negative_starters(&data.matchups, &data.stats, &data.teams, players),
        };
        debug!("Highlights cover {} rosters", data.rosters.len());

        Ok(format::highlights(&highlights))
    }

    async fn transactions(&self, week: u32, now: DateTime<Utc>) -> Result<Vec<Outgoing>> {
        let transactions =
            self.league.transactions(week).await.context("Failed to fetch transactions")?;
        let fresh = {
            let mut feed = self.feed.lock().await;
            let fresh = feed.fresh(transactions, now);
            debug!(
                "{} fresh transaction(s) for week {}, {} announced in window",
                fresh.len(),
                week,
                feed.announced_len()
            );
            fresh
        };
        if fresh.is_empty() {
            return Ok(Vec::new());
        }

        let (_, teams) = self.league_tables().await?;
        let players = self.player_directory().await?;

        Ok(fresh
            .into_iter()
            .map(|tx| Outgoing {
                text: format_transaction(&tx, &teams, players),
                announces: Some(tx),
            })
            .collect())
    }
}
