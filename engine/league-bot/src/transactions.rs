//! Waiver and free agent alerts

use chrono::{DateTime, Duration, Utc};
use league_stats::{PlayerDirectory, TeamDirectory, TeamName};
use sleeper_client::{Transaction, TransactionKind};
use std::collections::HashMap;
use tracing::debug;

use crate::format::header;

/// Tracks which transactions have already been announced
#[derive(Debug, Clone)]
pub struct TransactionFeed {
    window: Duration,

    /// Announced transaction id → creation time
    announced: HashMap<String, DateTime<Utc>>,
}

impl TransactionFeed {
    pub fn new(window: Duration) -> Self {
        Self { window, announced: HashMap::new() }
    }


    /// Completed, non-trade transactions created within the window before `now`
    /// that have not been announced yet, oldest first.
    ///
    /// Nothing is recorded here; call `mark_announced` once a transaction's
    /// alert has actually been delivered. Announced ids that fell out of the
    /// window are forgotten.
    pub fn fresh(
        &mut self,
        transactions: Vec<Transaction>,
        now: DateTime<Utc>,
    ) -> Vec<Transaction> {
        let window = self.window;
        self.announced.retain(|_, created| now - *created <= window);

        let mut fresh: Vec<Transaction> = transactions
            .into_iter()
            .filter(|tx| {
                if tx.kind == TransactionKind::Trade {
                    debug!("Skipping trade {}", tx.transaction_id);
                    return false;
                }
                tx.is_complete()
                    && tx.created_at().is_some_and(|created| now - created <= window)
                    && !self.announced.contains_key(&tx.transaction_id)
            })
            .collect();

        fresh.sort_by_key(|tx| tx.created);
        fresh
    }

    /// Records that the alert for `tx` went out
    pub fn mark_announced(&mut self, tx: &Transaction) {
        if let Some(created) = tx.created_at() {
            self.announced.insert(tx.transaction_id.clone(), created);
        }
    }

    pub fn announced_len(&self) -> usize {
        self.announced.len()
    }
}

fn team_for(tx: &Transaction, teams: &TeamDirectory) -> TeamName {
    let roster_id = tx
        .roster_ids
        .first()
        .copied()
        .or_else(|| tx.adds.as_ref().and_then(|adds| adds.values().next().copied()));

    match roster_id {
        Some(roster_id) => teams.team_name(roster_id),
        None => TeamName::OwnerUnknown,
    }
}

/// Alert text: the team, the FAAB bid for waiver claims, then `+` adds and `-` drops
pub fn format_transaction(
    tx: &Transaction,
    teams: &TeamDirectory,
    players: &PlayerDirectory,
) -> String {
    let mut out = header("Transaction");
    out.push_str(&format!("**{}**", team_for(tx, teams)));

    if tx.kind == TransactionKind::Waiver {
        if let Some(bid) = tx.waiver_bid() {
            out.push_str(&format!(" (*${}*)", bid));
        }
    }

    for player_id in tx.added() {
        out.push_str(&format!("\n+ {}", players.display_name(player_id)));
    }
    for player_id in tx.dropped() {
        out.push_str(&format!("\n- {}", players.display_name(player_id)));
    }
    out
}
