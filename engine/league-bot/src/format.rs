//! Discord markdown for each report

use league_stats::{
    BenchPoints, MatchupEntry, Scoreboard, ScoreboardSide, ScoreLeader, Standing, TeamNegatives,
};
use std::fmt::Write;

use crate::config::ReportSlot;

const RULE: &str = "================================";

/// Bold title between two rules
pub fn header(title: &str) -> String {
    format!("**{RULE}**\n**{title}**\n**{RULE}**\n\n")
}

/// "custom (standard)" with two decimals
pub fn score_text(side: &ScoreboardSide) -> String {
    match (side.custom_score, side.standard_score) {
        (Some(custom), Some(standard)) => format!("{:.2} ({:.2})", custom, standard),
        (Some(custom), None) => format!("{:.2}", custom),
        (None, _) => "no score".to_string(),
    }
}

pub fn matchups(week: u32, board: &Scoreboard) -> String {
    let mut out = header(&format!("Matchups for Week {}", week));

    if board.is_empty() {
        out.push_str("No matchups this week\n");
        return out;
    }

    for (i, entry) in board.entries.values().enumerate() {
        let (a, b) = (&entry.team_a.team_name, &entry.team_b.team_name);
        let _ = write!(out, "*Matchup {}*:\n**{}** vs. **{}**\n\n", i + 1, a, b);
    }
    out
}

pub fn scores(board: &Scoreboard) -> String {
    let mut out = header("Scores");

    if board.is_empty() {
        out.push_str("No scores yet\n");
        return out;
    }

    for (i, entry) in board.entries.values().enumerate() {
        let _ = write!(
            out,
            "*Matchup {}*\n**{}** {}\n**{}** {}\n\n",
            i + 1,
            entry.team_a.team_name,
            score_text(&entry.team_a),
            entry.team_b.team_name,
            score_text(&entry.team_b),
        );
    }
    out
}

pub fn close_games(games: &[&MatchupEntry], margin: f64) -> String {
    let mut out = header("Close games");

    if games.is_empty() {
        let _ = writeln!(out, "No games within {} points", margin);
        return out;
    }

    for (i, entry) in games.iter().enumerate() {
        let _ = write!(
            out,
            "*Matchup {}*\n**{}** {}\n**{}** {}\n\n",
            i + 1,
            entry.team_a.team_name,
            score_text(&entry.team_a),
            entry.team_b.team_name,
            score_text(&entry.team_b),
        );
    }
    out
}

/// League table with a rule under the last playoff spot
pub fn standings(table: &[Standing], playoff_teams: u32) -> String {
    let mut out = header("Standings");

    for standing in table {
        let record = if standing.ties > 0 {
            format!("{}-{}-{}", standing.wins, standing.losses, standing.ties)
        } else {
            format!("{}-{}", standing.wins, standing.losses)
        };
        let _ = writeln!(
            out,
            "**{}. {}** ({}) *{:.2} points*",
            standing.rank, standing.team_name, record, standing.points_for
        );

        if standing.rank == playoff_teams as usize && standing.rank < table.len() {
            let _ = writeln!(out, "{RULE}");
        }
    }
    out
}

/// Inputs of the weekly highlights post
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    pub highest: Option<ScoreLeader>,
    pub lowest: Option<ScoreLeader>,
    pub bench: Option<BenchPoints>,
    pub negatives: Vec<TeamNegatives>,
}

pub fn highlights(h: &Highlights) -> String {
    let mut out = header("Highlights");

    match (&h.highest, &h.lowest) {
        (Some(high), Some(low)) => {
            let _ = write!(
                out,
                "🔥 **Highest Scorer** 🔥\n{}\n*{:.2}*\n\n",
                high.team_name, high.score
            );
            let _ = write!(
                out,
                "🧊 **Lowest Scorer** 🧊\n{}\n*{:.2}*\n\n",
                low.team_name, low.score
            );
        }
        _ => out.push_str("No scores yet\n\n"),
    }

    if let Some(bench) = &h.bench {
        let _ = write!(
            out,
            "🪑 **Most points left on the bench** 🪑\n{}\n*{:.2}*\n\n",
            bench.team_name, bench.points
        );
    }

    if !h.negatives.is_empty() {
        out.push_str("🤔🤔 Why bother?\n");
    }
    for team in &h.negatives {
        let _ = writeln!(out, "{} started:", team.team_name);
        for player in &team.players {
            let _ = writeln!(out, "{} who had {:.2} points", player.name, player.points);
        }
        out.push('\n');
    }
    out
}

pub fn welcome(season: Option<i32>, slots: &[ReportSlot]) -> String {
    let mut out = String::from("👋 Hello, I am League Bot!\n\n");

    match season {
        Some(season) => {
            let _ = writeln!(out, "Here is when I post during the {} season (UTC):", season);
        }
        None => out.push_str("Here is when I post during the season (UTC):\n"),
    }
    for slot in slots {
        let _ = writeln!(out, "- {} {}: {}", slot.weekday, slot.time, slot.report);
    }
    out.push_str("\nWaiver and free agent moves are announced as they happen.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use league_stats::{NegativeStarter, TeamName};

    use crate::config::ReportKind;

    fn side(
        roster_id: u32,
        name: &str,
        custom: Option<f64>,
        standard: Option<f64>,
    ) -> ScoreboardSide {
        ScoreboardSide {
            roster_id,
            team_name: TeamName::Named(name.to_string()),
            custom_score: custom,
            standard_score: standard,
        }
    }

    fn board() -> Scoreboard {
        let mut board = Scoreboard::default();
        board.entries.insert(
            3,
            MatchupEntry {
                matchup_id: 3,
                team_a: side(1, "Goblins", Some(101.456), Some(99.0)),
                team_b: side(2, "Ogres", None, None),
            },
        );
        board.entries.insert(
            1,
            MatchupEntry {
                matchup_id: 1,
                team_a: side(3, "Trolls", Some(88.0), None),
                team_b: side(4, "Elves", Some(90.5), Some(91.25)),
            },
        );
        board
    }

    fn standing(
        rank: usize,
        name: &str,
        wins: u32,
        losses: u32,
        ties: u32,
        points_for: f64,
    ) -> Standing {
        Standing {
            rank,
            roster_id: rank as u32,
            team_name: TeamName::Named(name.to_string()),
            wins,
            losses,
            ties,
            points_for,
        }
    }

    #[test]
    fn test_header() {
        let rule = "**================================**";
        assert_eq!(header("Scores"), format!("{rule}\n**Scores**\n{rule}\n\n"));
    }

    #[test]
    fn test_matchups_numbered_in_board_order() {
        let text = matchups(5, &board());

        assert!(text.contains("**Matchups for Week 5**"));
        assert!(text.contains(
            "*Matchup 1*:\n**Trolls** vs. **Elves**\n\n*Matchup 2*:\n**Goblins** vs. **Ogres**"
        ));
    }

    #[test]
    fn test_scores_text() {
        let text = scores(&board());

        assert!(text.contains("**Trolls** 88.00\n**Elves** 90.50 (91.25)"));
        assert!(text.contains("**Goblins** 101.46 (99.00)\n**Ogres** no score"));
    }

    #[test]
    fn test_empty_boards() {
        assert!(scores(&Scoreboard::default()).ends_with("No scores yet\n"));
        assert!(close_games(&[], 20.0).ends_with("No games within 20 points\n"));
    }

    #[test]
    fn test_standings_playoff_line_and_ties() {
        let table = vec![
            standing(1, "T3", 6, 1, 0, 550.0),
            standing(2, "T1", 5, 1, 1, 601.3),
            standing(3, "T2", 5, 2, 0, 598.0),
        ];

        let text = standings(&table, 2);

        assert!(text.contains("**1. T3** (6-1) *550.00 points*\n"));
        assert!(text.contains(
            "**2. T1** (5-1-1) *601.30 points*\n================================\n**3. T2**"
        ));
    }

    #[test]
    fn test_no_playoff_line_after_last_team() {
        let table = vec![standing(1, "T1", 1, 0, 0, 10.0), standing(2, "T2", 0, 1, 0, 5.0)];

        let text = standings(&table, 2);

        assert!(text.ends_with("**2. T2** (0-1) *5.00 points*\n"));
    }

    #[test]
    fn test_highlights() {
        let h = Highlights {
            highest: Some(ScoreLeader {
                roster_id: 1,
                team_name: TeamName::Named("Goblins".into()),
                score: 140.2,
            }),
            lowest: Some(ScoreLeader {
                roster_id: 2,
                team_name: TeamName::OwnerUnknown,
                score: 61.0,
            }),
            bench: Some(BenchPoints {
                roster_id: 3,
                team_name: TeamName::Named("Trolls".into()),
                points: 48.75,
                unscored: Vec::new(),
            }),
            negatives: vec![TeamNegatives {
                roster_id: 2,
                team_name: TeamName::OwnerUnknown,
                players: vec![NegativeStarter {
                    player_id: "DEN".into(),
                    name: "Denver Broncos".into(),
                    position: Some("DEF".into()),
                    points: -4.0,
                }],
            }],
        };

        let text = highlights(&h);

        assert!(text.contains("**Highest Scorer** 🔥\nGoblins\n*140.20*"));
        assert!(text.contains("**Lowest Scorer** 🧊\nTeam name not available\n*61.00*"));
        assert!(text.contains("bench** 🪑\nTrolls\n*48.75*"));
        assert!(text.contains(
            "Why bother?\nTeam name not available started:\nDenver Broncos who had -4.00 points\n"
        ));
    }

    #[test]
    fn test_highlights_without_scores() {
        let text = highlights(&Highlights::default());
        assert!(text.contains("No scores yet"));
        assert!(!text.contains("Why bother"));
    }

    #[test]
    fn test_welcome_lists_schedule() {
        let slots = vec![ReportSlot::new(ReportKind::Matchups, Weekday::Thu, "19:00")];

        let text = welcome(Some(2023), &slots);

        assert!(text.contains("during the 2023 season"));
        assert!(text.contains("- Thu 19:00: matchups\n"));
    }
}
