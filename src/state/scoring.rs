//! Score calculation and round plausibility checks.
//!
//! All functions here are pure and work on borrowed snapshots.

use serde::Serialize;

use super::player::{Player, PlayerId};
use super::round::{PlayerRoundData, Round};

/// Points for hitting the bid exactly.
pub const EXACT_BID_BONUS: i64 = 10;

/// Points for missing the bid, in either direction.
pub const MISSED_BID_PENALTY: i64 = -5;

/// Step between legal bonus card point values.
pub const BONUS_POINTS_STEP: i32 = 5;

/// Default number of bonus steps in each direction (range -15..=15).
pub const DEFAULT_BONUS_SPAN: u32 = 3;

/// Score of a single round, or `None` if bid or tricks taken is missing.
///
/// Tricks taken count one point each, plus 10 for an exact bid or minus 5
/// otherwise, plus any bonus card points. Computed in `i64` so that no
/// `u32` trick count can overflow it.
pub fn round_score(data: &PlayerRoundData) -> Option<i64> {
    let (bid, tricks) = (data.bid?, data.tricks_taken?);
    let bid_bonus = if tricks == bid {
        EXACT_BID_BONUS
    } else {
        MISSED_BID_PENALTY
    };
    Some(i64::from(tricks) + bid_bonus + i64::from(data.bonus_card_points.unwrap_or(0)))
}

/// Sum of the player's round scores. Incomplete rounds contribute 0.
pub fn total_score(player_id: &PlayerId, rounds: &[Round]) -> i64 {
    rounds
        .iter()
        .filter_map(|r| r.data_for(player_id))
        .filter_map(round_score)
        .sum()
}

/// Check if the player has no complete round at all.
///
/// Used to show a blank total instead of a misleading 0.
pub fn is_empty_column(player_id: &PlayerId, rounds: &[Round]) -> bool {
    !rounds
        .iter()
        .filter_map(|r| r.data_for(player_id))
        .any(PlayerRoundData::is_complete)
}

/// Plausibility check for the round at `index`.
///
/// Returns `false` if `index` is out of range. See [`is_plausible_round`].
pub fn is_valid_round(rounds: &[Round], index: usize, players: &[Player]) -> bool {
    rounds
        .get(index)
        .is_some_and(|round| is_plausible_round(round, players))
}

/// Heuristic consistency check of the data entered for one round.
///
/// An untouched round is valid. Otherwise bids must all be in before any
/// tricks are entered, and the tricks entered so far must either add up to
/// the cards dealt, or fall short while someone's tricks are still pending.
pub fn is_plausible_round(round: &Round, players: &[Player]) -> bool {
    let records: Vec<PlayerRoundData> = players
        .iter()
        .map(|p| round.data_for(&p.id).copied().unwrap_or_default())
        .collect();

    if records.iter().all(PlayerRoundData::is_empty) {
        return true;
    }

    let pending_bids = records.iter().filter(|d| d.bid.is_none()).count();
    let pending_tricks = records.iter().filter(|d| d.tricks_taken.is_none()).count();
    let tricks_sum: u64 = records
        .iter()
        .filter_map(|d| d.tricks_taken)
        .map(u64::from)
        .sum();
    let cards_dealt = u64::from(round.cards_dealt);

    let bids_plausible = pending_bids == 0 || pending_tricks == players.len();
    let tricks_plausible =
        tricks_sum == cards_dealt || (tricks_sum < cards_dealt && pending_tricks > 0);

    bids_plausible && tricks_plausible
}

/// Legal bids for a round: `0..=cards_dealt`.
pub fn possible_bids(cards_dealt: u32) -> Vec<u32> {
    (0..=cards_dealt).collect()
}

/// Legal bonus card point values: `-5n..=5n` in steps of 5.
pub fn bonus_points_values(span: u32) -> Vec<i32> {
    let n = i32::try_from(span)
        .unwrap_or(i32::MAX)
        .min(i32::MAX / BONUS_POINTS_STEP);
    (-n..=n).map(|i| i * BONUS_POINTS_STEP).collect()
}

/// A player's place in the standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player_id: PlayerId,
    /// 1-based; tied players share a rank
    pub rank: usize,
    /// `None` while the player has no complete round
    pub total: Option<i64>,
}

/// Rank players by total score, highest first.
///
/// Ties share a rank and the next rank is skipped ("1, 2, 2, 4"). Players
/// without any complete round come last, sharing the rank after everyone
/// else. Roster order breaks ties.
pub fn ranking(players: &[Player], rounds: &[Round]) -> Vec<Standing> {
    let mut totals: Vec<(PlayerId, Option<i64>)> = players
        .iter()
        .map(|p| {
            let total = if is_empty_column(&p.id, rounds) {
                None
            } else {
                Some(total_score(&p.id, rounds))
            };
            (p.id.clone(), total)
        })
        .collect();

    // Stable sort keeps roster order among equal totals; None sorts below Some.
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    let mut standings: Vec<Standing> = Vec::with_capacity(totals.len());
    for (index, (player_id, total)) in totals.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(prev) if prev.total == total => prev.rank,
            _ => index + 1,
        };
        standings.push(Standing {
            player_id,
            rank,
            total,
        });
    }
    standings
}
