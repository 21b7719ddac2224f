//! Group-stage standings.
//!
//! A pure reduction over the match rows of one (tournament, division) pair.
//! Teams are ranked within each group by wins, then set differential, then
//! game differential, then team identifier ascending. The final team-id
//! tiebreak also fixes the order of groups with no completed matches, so
//! the output never depends on map iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Games won per side in a single set, serialized as `[games_a, games_b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore(pub i32, pub i32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StandingsError {
    #[error("completed match {team_a} vs {team_b} has no recorded sets")]
    MissingScore { team_a: String, team_b: String },

    #[error("set score {games_a}-{games_b} in match {team_a} vs {team_b} has no winner")]
    DrawnSet {
        team_a: String,
        team_b: String,
        games_a: i32,
        games_b: i32,
    },

    #[error("match {team_a} vs {team_b} ended {sets_a}-{sets_b} in sets with no winner")]
    DrawnMatch {
        team_a: String,
        team_b: String,
        sets_a: i32,
        sets_b: i32,
    },
}

/// One match row as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatch {
    pub group_id: String,
    pub team_a: String,
    pub team_b: String,
    pub completed: bool,
    pub sets: Vec<SetScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    pub team: String,
    pub rank: u32,
    pub wins: u32,
    pub losses: u32,
    pub sets_for: i32,
    pub sets_against: i32,
    pub games_for: i32,
    pub games_against: i32,
}

impl TeamStanding {
    pub fn set_diff(&self) -> i32 {
        self.sets_for - self.sets_against
    }

    pub fn game_diff(&self) -> i32 {
        self.games_for - self.games_against
    }

    fn zeroed(team: &str) -> Self {
        Self {
            team: team.to_string(),
            rank: 0,
            wins: 0,
            losses: 0,
            sets_for: 0,
            sets_against: 0,
            games_for: 0,
            games_against: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTable {
    pub group_id: String,
    pub rows: Vec<TeamStanding>,
}

/// Totals for one side of a completed match.
struct Outcome {
    sets_a: i32,
    sets_b: i32,
    games_a: i32,
    games_b: i32,
}

fn score_match(m: &GroupMatch) -> Result<Outcome, StandingsError> {
    if m.sets.is_empty() {
        return Err(StandingsError::MissingScore {
            team_a: m.team_a.clone(),
            team_b: m.team_b.clone(),
        });
    }

    let mut outcome = Outcome {
        sets_a: 0,
        sets_b: 0,
        games_a: 0,
        games_b: 0,
    };

    for set in &m.sets {
        if set.0 == set.1 {
            return Err(StandingsError::DrawnSet {
                team_a: m.team_a.clone(),
                team_b: m.team_b.clone(),
                games_a: set.0,
                games_b: set.1,
            });
        }
        if set.0 > set.1 {
            outcome.sets_a += 1;
        } else {
            outcome.sets_b += 1;
        }
        outcome.games_a += set.0;
        outcome.games_b += set.1;
    }

    // Ties are unsupported: a completed match must have a strict set winner.
    if outcome.sets_a == outcome.sets_b {
        return Err(StandingsError::DrawnMatch {
            team_a: m.team_a.clone(),
            team_b: m.team_b.clone(),
            sets_a: outcome.sets_a,
            sets_b: outcome.sets_b,
        });
    }

    Ok(outcome)
}

/// Compute one ranked table per group from the given match set.
///
/// Every team appearing in any match of a group gets a row, zeroed until a
/// completed match involves it. Groups and rows come out in a deterministic
/// order; recomputing on the same input yields identical output.
pub fn compute_standings(matches: &[GroupMatch]) -> Result<Vec<GroupTable>, StandingsError> {
    let mut by_group: BTreeMap<&str, Vec<&GroupMatch>> = BTreeMap::new();
    for m in matches {
        by_group.entry(m.group_id.as_str()).or_default().push(m);
    }

    let mut tables = Vec::with_capacity(by_group.len());
    for (group_id, group_matches) in by_group {
        let mut tallies: BTreeMap<&str, TeamStanding> = BTreeMap::new();
        for m in &group_matches {
            tallies
                .entry(m.team_a.as_str())
                .or_insert_with(|| TeamStanding::zeroed(&m.team_a));
            tallies
                .entry(m.team_b.as_str())
                .or_insert_with(|| TeamStanding::zeroed(&m.team_b));
        }

        for m in &group_matches {
            if !m.completed {
                continue;
            }
            let outcome = score_match(m)?;

            let a = tallies.get_mut(m.team_a.as_str()).expect("team seeded");
            if outcome.sets_a > outcome.sets_b {
                a.wins += 1;
            } else {
                a.losses += 1;
            }
            a.sets_for += outcome.sets_a;
            a.sets_against += outcome.sets_b;
            a.games_for += outcome.games_a;
            a.games_against += outcome.games_b;

            let b = tallies.get_mut(m.team_b.as_str()).expect("team seeded");
            if outcome.sets_b > outcome.sets_a {
                b.wins += 1;
            } else {
                b.losses += 1;
            }
            b.sets_for += outcome.sets_b;
            b.sets_against += outcome.sets_a;
            b.games_for += outcome.games_b;
            b.games_against += outcome.games_a;
        }

        let mut rows: Vec<TeamStanding> = tallies.into_values().collect();
        rows.sort_by(|x, y| {
            y.wins
                .cmp(&x.wins)
                .then(y.set_diff().cmp(&x.set_diff()))
                .then(y.game_diff().cmp(&x.game_diff()))
                .then(x.team.cmp(&y.team))
        });
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = (i + 1) as u32;
        }

        tables.push(GroupTable {
            group_id: group_id.to_string(),
            rows,
        });
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(group: &str, a: &str, b: &str, sets: &[(i32, i32)]) -> GroupMatch {
        GroupMatch {
            group_id: group.to_string(),
            team_a: a.to_string(),
            team_b: b.to_string(),
            completed: true,
            sets: sets.iter().map(|&(x, y)| SetScore(x, y)).collect(),
        }
    }

    fn scheduled(group: &str, a: &str, b: &str) -> GroupMatch {
        GroupMatch {
            group_id: group.to_string(),
            team_a: a.to_string(),
            team_b: b.to_string(),
            completed: false,
            sets: Vec::new(),
        }
    }

    #[test]
    fn empty_input_yields_empty_standings() {
        assert_eq!(compute_standings(&[]).unwrap(), Vec::new());
    }

    #[test]
    fn three_way_tie_resolved_by_set_differential() {
        // A beats B 2-0, B beats C 2-1, C beats A 2-1: one win each, so the
        // order falls to set differential (A +1, C 0, B -1).
        let matches = vec![
            completed("A", "A", "B", &[(6, 4), (6, 3)]),
            completed("A", "B", "C", &[(6, 4), (4, 6), (7, 5)]),
            completed("A", "C", "A", &[(7, 6), (2, 6), (6, 4)]),
        ];

        let tables = compute_standings(&matches).unwrap();
        assert_eq!(tables.len(), 1);
        let rows = &tables[0].rows;

        assert_eq!(rows[0].team, "A");
        assert_eq!(rows[1].team, "C");
        assert_eq!(rows[2].team, "B");
        assert_eq!(
            rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let a = &rows[0];
        assert_eq!((a.wins, a.losses), (1, 1));
        assert_eq!((a.sets_for, a.sets_against), (3, 2));
        assert_eq!((a.games_for, a.games_against), (28, 22));

        let c = &rows[1];
        assert_eq!((c.wins, c.losses), (1, 1));
        assert_eq!((c.sets_for, c.sets_against), (3, 3));
        assert_eq!((c.games_for, c.games_against), (30, 33));

        let b = &rows[2];
        assert_eq!((b.wins, b.losses), (1, 1));
        assert_eq!((b.sets_for, b.sets_against), (2, 3));
        assert_eq!((b.games_for, b.games_against), (24, 27));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let matches = vec![
            completed("A", "A", "B", &[(6, 4), (6, 3)]),
            completed("A", "B", "C", &[(6, 4), (4, 6), (7, 5)]),
            completed("A", "C", "A", &[(7, 6), (2, 6), (6, 4)]),
            scheduled("B", "D", "E"),
        ];

        let first = compute_standings(&matches).unwrap();
        let second = compute_standings(&matches).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn group_without_completed_matches_appears_zeroed() {
        let matches = vec![scheduled("B", "Eagles", "Aces"), scheduled("B", "Aces", "Volley")];

        let tables = compute_standings(&matches).unwrap();
        assert_eq!(tables.len(), 1);
        let rows = &tables[0].rows;

        // Everything zero, ordered by team identifier.
        assert_eq!(
            rows.iter().map(|r| r.team.as_str()).collect::<Vec<_>>(),
            vec!["Aces", "Eagles", "Volley"]
        );
        assert!(rows.iter().all(|r| r.wins == 0
            && r.losses == 0
            && r.sets_for == 0
            && r.games_for == 0));
    }

    #[test]
    fn equal_records_fall_back_to_team_order() {
        // Two disjoint completed matches: both winners 1-0 with identical
        // differentials, both losers 0-1 alike.
        let matches = vec![
            completed("A", "Delta", "Alpha", &[(6, 3), (6, 3)]),
            completed("A", "Bravo", "Echo", &[(6, 3), (6, 3)]),
        ];

        let tables = compute_standings(&matches).unwrap();
        let rows = &tables[0].rows;
        assert_eq!(
            rows.iter().map(|r| r.team.as_str()).collect::<Vec<_>>(),
            vec!["Bravo", "Delta", "Alpha", "Echo"]
        );
    }

    #[test]
    fn drawn_scores_are_rejected() {
        let tied_sets = vec![completed("A", "A", "B", &[(6, 4), (4, 6)])];
        assert!(matches!(
            compute_standings(&tied_sets),
            Err(StandingsError::DrawnMatch { .. })
        ));

        let tied_games = vec![completed("A", "A", "B", &[(5, 5), (6, 3)])];
        assert!(matches!(
            compute_standings(&tied_games),
            Err(StandingsError::DrawnSet { .. })
        ));

        let no_sets = vec![completed("A", "A", "B", &[])];
        assert!(matches!(
            compute_standings(&no_sets),
            Err(StandingsError::MissingScore { .. })
        ));
    }

    #[test]
    fn groups_are_ordered_by_group_id() {
        let matches = vec![
            scheduled("B", "C1", "C2"),
            scheduled("A", "A1", "A2"),
            scheduled("C", "B1", "B2"),
        ];

        let tables = compute_standings(&matches).unwrap();
        let ids: Vec<&str> = tables.iter().map(|t| t.group_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }
}
