//! Per-tournament bracket bookkeeping.
//!
//! Everything lives behind one `parking_lot::Mutex`. Each public method takes
//! the lock once and releases it before returning, so callers never hold it
//! across a publish.
//!
//! A bracket is released once its champion is published, leaving only the
//! champion id behind. Cancelling drops the bracket and keeps a tombstone, so
//! a cancellation seen before `bracket.generated` still wins. Champions and
//! tombstones are one entry per tournament and are never evicted; outcomes
//! whose delivery was discarded stay pending until their tournament ends.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::models::{
    bracket::{AdvancementOutcome, BracketPlan, ByePlacement, ChampionDetermined, IgnoreReason, MatchFinished, Pairing},
    types::{MatchCoordinate, ParticipantId, Position, TournamentId},
};

use super::{AdvancementError, AdvancementResult, next_slot};

/// Contestants and winner of one match, as far as the ledger knows them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSlot {
    pub slot_a: Option<ParticipantId>,
    pub slot_b: Option<ParticipantId>,
    pub winner: Option<ParticipantId>,
}

impl MatchSlot {
    fn set(&mut self, position: Position, participant_id: ParticipantId) {
        match position {
            Position::First => self.slot_a = Some(participant_id),
            Position::Second => self.slot_b = Some(participant_id),
        }
    }

    fn get(&self, position: Position) -> Option<ParticipantId> {
        match position {
            Position::First => self.slot_a,
            Position::Second => self.slot_b,
        }
    }

    fn contestants(&self) -> Option<(ParticipantId, ParticipantId)> {
        Some((self.slot_a?, self.slot_b?))
    }
}

/// (round, match_number)
type SlotKey = (u32, u32);

struct BracketState {
    total_rounds: u32,
    bracket_size: usize,
    pairings: Vec<Pairing>,
    byes: Vec<ByePlacement>,
    slots: HashMap<SlotKey, MatchSlot>,
    /// Outcomes recorded but not yet confirmed as published, keyed by source match
    pending: HashMap<SlotKey, AdvancementOutcome>,
    champion: Option<ParticipantId>,
}

impl BracketState {
    fn from_plan(tournament_id: TournamentId, plan: &BracketPlan) -> AdvancementResult<Self> {
        let inconsistent = || AdvancementError::InconsistentBracket(tournament_id);

        if plan.total_rounds == 0
            || plan.total_rounds >= usize::BITS
            || plan.bracket_size != 1usize << plan.total_rounds
        {
            return Err(inconsistent());
        }
        if plan.pairings.len() != plan.first_round_match_count
            || plan.byes.len() != plan.bye_count
            || 2 * plan.first_round_match_count + plan.bye_count != plan.participant_count
        {
            return Err(inconsistent());
        }

        let mut state = Self {
            total_rounds: plan.total_rounds,
            bracket_size: plan.bracket_size,
            pairings: plan.pairings.clone(),
            byes: plan.byes.clone(),
            slots: HashMap::new(),
            pending: HashMap::new(),
            champion: None,
        };

        for pairing in &plan.pairings {
            if pairing.round != 1 || !state.is_match_in_round(1, pairing.match_number) {
                return Err(inconsistent());
            }
            let previous = state.slots.insert(
                (1, pairing.match_number),
                MatchSlot {
                    slot_a: Some(pairing.slot_a),
                    slot_b: Some(pairing.slot_b),
                    winner: None,
                },
            );
            if previous.is_some() {
                return Err(inconsistent());
            }
        }

        for bye in &plan.byes {
            if bye.round != 2 || !state.is_match_in_round(2, bye.match_number) {
                return Err(inconsistent());
            }
            let slot = state.slots.entry((2, bye.match_number)).or_default();
            if slot.get(bye.position).is_some() {
                return Err(inconsistent());
            }
            slot.set(bye.position, bye.participant_id);
        }

        // every side of round 2 is fed by exactly one of a bye or a round-1 match
        if plan.total_rounds >= 2 {
            for match_number in 1..=(plan.bracket_size >> 2) as u32 {
                for (feeder, side) in [(2 * match_number - 1, Position::First), (2 * match_number, Position::Second)] {
                    let has_bye = state
                        .slots
                        .get(&(2, match_number))
                        .and_then(|slot| slot.get(side))
                        .is_some();
                    let has_feeder = state.slots.contains_key(&(1, feeder));
                    if has_bye == has_feeder {
                        return Err(inconsistent());
                    }
                }
            }
        }

        Ok(state)
    }

    fn is_match_in_round(&self, round: u32, match_number: u32) -> bool {
        if round == 0 || round > self.total_rounds {
            return false;
        }
        let matches_in_round = self.bracket_size >> round;
        match_number >= 1 && (match_number as usize) <= matches_in_round
    }

    fn same_layout(&self, plan: &BracketPlan) -> bool {
        self.total_rounds == plan.total_rounds && self.pairings == plan.pairings && self.byes == plan.byes
    }
}

#[derive(Default)]
struct LedgerState {
    brackets: HashMap<TournamentId, BracketState>,
    /// Cancelled tournaments, with or without a bracket
    cancelled: HashSet<TournamentId>,
    /// Champions of released brackets
    completed: HashMap<TournamentId, ParticipantId>,
}

/// In-memory bracket bookkeeping shared by the start path and the worker
pub struct BracketLedger {
    state: Mutex<LedgerState>,
}

impl Default for BracketLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BracketLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Records the bracket of a tournament.
    ///
    /// Registering the same layout again, or any layout for a tournament that
    /// already has a champion, is a no-op.
    ///
    /// # Returns
    /// * `Ok(true)` - The bracket was new
    /// * `Ok(false)` - The bracket was already registered or played out
    /// * `Err(AdvancementError)` - The tournament is cancelled, a different bracket exists, or
    ///   the plan is inconsistent
    pub fn register(&self, tournament_id: TournamentId, plan: &BracketPlan) -> AdvancementResult<bool> {
        let mut ledger = self.state.lock();

        if ledger.cancelled.contains(&tournament_id) {
            warn!(tournament_id, "bracket for a cancelled tournament refused");
            return Err(AdvancementError::TournamentCancelled(tournament_id));
        }
        if ledger.completed.contains_key(&tournament_id) {
            debug!(tournament_id, "bracket already played out");
            return Ok(false);
        }
        if let Some(existing) = ledger.brackets.get(&tournament_id) {
            if existing.same_layout(plan) {
                debug!(tournament_id, "bracket already registered");
                return Ok(false);
            }
            return Err(AdvancementError::BracketAlreadyRegistered(tournament_id));
        }

        let state = BracketState::from_plan(tournament_id, plan)?;
        ledger.brackets.insert(tournament_id, state);
        info!(tournament_id, total_rounds = plan.total_rounds, "bracket registered");
        Ok(true)
    }

    /// Forgets a bracket. Returns false if none was registered.
    pub fn rollback(&self, tournament_id: TournamentId) -> bool {
        let removed = self.state.lock().brackets.remove(&tournament_id).is_some();
        if removed {
            warn!(tournament_id, "bracket registration rolled back");
        }
        removed
    }

    /// Applies a finished match in a single critical section.
    ///
    /// The winner is recorded on the finished slot and written into the one
    /// side of the next slot it feeds; the other side is left alone. The
    /// resulting outcome stays pending until [`BracketLedger::confirm_published`]
    /// is called for the same coordinate, and a redelivery of the same result
    /// returns the pending outcome again. Results for a released bracket are
    /// `AlreadyApplied` without further checks.
    ///
    /// # Errors
    /// `UnknownMatchCoordinate`, `WinnerNotInMatch` or `ConflictingResult`;
    /// the ledger is left unchanged in every error case.
    pub fn apply(&self, event: &MatchFinished) -> AdvancementResult<AdvancementOutcome> {
        let coordinate = event.coordinate();
        let key = (event.round, event.match_number);

        let mut ledger = self.state.lock();
        if ledger.cancelled.contains(&event.tournament_id) {
            return Ok(AdvancementOutcome::Ignored {
                coordinate,
                reason: IgnoreReason::TournamentCancelled,
            });
        }
        if ledger.completed.contains_key(&event.tournament_id) {
            return Ok(AdvancementOutcome::AlreadyApplied { coordinate });
        }

        let state = ledger
            .brackets
            .get_mut(&event.tournament_id)
            .ok_or(AdvancementError::UnknownMatchCoordinate(coordinate))?;

        if !state.is_match_in_round(event.round, event.match_number) {
            return Err(AdvancementError::UnknownMatchCoordinate(coordinate));
        }

        let slot = state
            .slots
            .get(&key)
            .copied()
            .ok_or(AdvancementError::UnknownMatchCoordinate(coordinate))?;
        let (slot_a, slot_b) = slot
            .contestants()
            .ok_or(AdvancementError::UnknownMatchCoordinate(coordinate))?;

        if event.winner_id != slot_a && event.winner_id != slot_b {
            return Err(AdvancementError::WinnerNotInMatch {
                coordinate,
                winner_id: event.winner_id,
            });
        }

        if let Some(recorded) = slot.winner {
            if recorded != event.winner_id {
                return Err(AdvancementError::ConflictingResult {
                    coordinate,
                    recorded,
                    reported: event.winner_id,
                });
            }
            return Ok(match state.pending.get(&key) {
                Some(outcome) => {
                    debug!(%coordinate, "returning unpublished outcome again");
                    outcome.clone()
                }
                None => AdvancementOutcome::AlreadyApplied { coordinate },
            });
        }

        if let Some(finished) = state.slots.get_mut(&key) {
            finished.winner = Some(event.winner_id);
        }

        let outcome = if event.round == state.total_rounds {
            state.champion = Some(event.winner_id);
            AdvancementOutcome::ChampionDetermined(ChampionDetermined {
                tournament_id: event.tournament_id,
                champion_id: event.winner_id,
                final_round: event.round,
                final_match_number: event.match_number,
            })
        } else {
            let update = next_slot(event);
            state
                .slots
                .entry((update.next_round, update.next_match_number))
                .or_default()
                .set(update.position, update.winner_id);
            AdvancementOutcome::Advanced(update)
        };

        state.pending.insert(key, outcome.clone());
        Ok(outcome)
    }

    /// Drops the pending outcome of a finished match once its event is out.
    /// The bracket is released when that was the last pending outcome after
    /// the final.
    pub fn confirm_published(&self, coordinate: &MatchCoordinate) {
        let tournament_id = coordinate.tournament_id;
        let mut ledger = self.state.lock();
        let Some(state) = ledger.brackets.get_mut(&tournament_id) else {
            return;
        };
        state.pending.remove(&(coordinate.round, coordinate.match_number));

        let released = match state.champion {
            Some(champion) if state.pending.is_empty() => champion,
            _ => return,
        };
        ledger.brackets.remove(&tournament_id);
        ledger.completed.insert(tournament_id, released);
        debug!(tournament_id, champion_id = released, "bracket released");
    }

    /// Marks a tournament cancelled and drops its bracket, if any.
    ///
    /// The mark is kept even when no bracket is registered yet. Returns
    /// whether a bracket was registered.
    pub fn cancel(&self, tournament_id: TournamentId) -> bool {
        let mut ledger = self.state.lock();
        ledger.cancelled.insert(tournament_id);
        ledger.brackets.remove(&tournament_id).is_some()
    }

    pub fn is_cancelled(&self, tournament_id: TournamentId) -> bool {
        self.state.lock().cancelled.contains(&tournament_id)
    }

    pub fn total_rounds(&self, tournament_id: TournamentId) -> Option<u32> {
        self.state
            .lock()
            .brackets
            .get(&tournament_id)
            .map(|state| state.total_rounds)
    }

    pub fn slot(&self, coordinate: &MatchCoordinate) -> Option<MatchSlot> {
        self.state
            .lock()
            .brackets
            .get(&coordinate.tournament_id)
            .and_then(|state| state.slots.get(&(coordinate.round, coordinate.match_number)).copied())
    }

    pub fn champion(&self, tournament_id: TournamentId) -> Option<ParticipantId> {
        let ledger = self.state.lock();
        ledger
            .brackets
            .get(&tournament_id)
            .and_then(|state| state.champion)
            .or_else(|| ledger.completed.get(&tournament_id).copied())
    }

    /// Number of outcomes still waiting for a successful publish
    pub fn pending_count(&self, tournament_id: TournamentId) -> usize {
        self.state
            .lock()
            .brackets
            .get(&tournament_id)
            .map_or(0, |state| state.pending.len())
    }

    /// Brackets still held in full
    pub fn active_brackets(&self) -> usize {
        self.state.lock().brackets.len()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use proptest::prelude::*;

    use super::*;
    use crate::domain::services::bracket_planner::generate_first_round;

    const TOURNAMENT: TournamentId = 7;

    fn ledger_with(participants: &[ParticipantId]) -> BracketLedger {
        let ledger = BracketLedger::new();
        let plan = generate_first_round(participants).unwrap();
        assert!(ledger.register(TOURNAMENT, &plan).unwrap());
        ledger
    }

    fn finished(round: u32, match_number: u32, winner_id: ParticipantId) -> MatchFinished {
        MatchFinished {
            match_id: (round * 100 + match_number) as i64,
            tournament_id: TOURNAMENT,
            round,
            match_number,
            winner_id,
        }
    }

    fn coordinate(round: u32, match_number: u32) -> MatchCoordinate {
        MatchCoordinate::new(TOURNAMENT, round, match_number)
    }

    /// Plays every ready match round by round, second side always winning.
    /// Returns the number of results applied.
    fn play_out(ledger: &BracketLedger, plan: &BracketPlan) -> usize {
        let mut played = 0;
        for round in 1..=plan.total_rounds {
            for match_number in 1..=(plan.bracket_size >> round) as u32 {
                let Some(slot) = ledger.slot(&coordinate(round, match_number)) else {
                    continue;
                };
                let (Some(_), Some(winner), None) = (slot.slot_a, slot.slot_b, slot.winner) else {
                    continue;
                };
                ledger.apply(&finished(round, match_number, winner)).unwrap();
                ledger.confirm_published(&coordinate(round, match_number));
                played += 1;
            }
        }
        played
    }

    #[test]
    fn test_register_fills_round_one_and_byes() {
        let ledger = ledger_with(&[1, 2, 3, 4, 5]);

        assert_eq!(ledger.total_rounds(TOURNAMENT), Some(3));
        assert_eq!(
            ledger.slot(&coordinate(1, 1)),
            Some(MatchSlot { slot_a: Some(1), slot_b: Some(2), winner: None })
        );
        assert_eq!(
            ledger.slot(&coordinate(2, 1)),
            Some(MatchSlot { slot_a: None, slot_b: Some(3), winner: None })
        );
        assert_eq!(
            ledger.slot(&coordinate(2, 2)),
            Some(MatchSlot { slot_a: Some(4), slot_b: Some(5), winner: None })
        );
    }

    #[test]
    fn test_register_same_plan_twice_is_noop() {
        let ledger = ledger_with(&[1, 2, 3, 4]);
        ledger.apply(&finished(1, 1, 1)).unwrap();

        let plan = generate_first_round(&[1, 2, 3, 4]).unwrap();
        assert!(!ledger.register(TOURNAMENT, &plan).unwrap());
        assert_eq!(ledger.slot(&coordinate(2, 1)).unwrap().slot_a, Some(1));
    }

    #[test]
    fn test_register_different_plan_is_refused() {
        let ledger = ledger_with(&[1, 2, 3, 4]);
        let other = generate_first_round(&[4, 3, 2, 1]).unwrap();

        assert_eq!(
            ledger.register(TOURNAMENT, &other),
            Err(AdvancementError::BracketAlreadyRegistered(TOURNAMENT))
        );
    }

    #[test]
    fn test_register_rejects_inconsistent_plan() {
        let ledger = BracketLedger::new();
        let mut plan = generate_first_round(&[1, 2, 3, 4]).unwrap();
        plan.pairings[1].match_number = 5;

        assert_eq!(
            ledger.register(TOURNAMENT, &plan),
            Err(AdvancementError::InconsistentBracket(TOURNAMENT))
        );
        assert_eq!(ledger.total_rounds(TOURNAMENT), None);
    }

    #[test]
    fn test_register_rejects_incomplete_plan() {
        let ledger = BracketLedger::new();
        let plan = generate_first_round(&[1, 2, 3, 4, 5, 6]).unwrap();

        let mut missing_pairing = plan.clone();
        missing_pairing.pairings.pop();

        let mut missing_bye = plan.clone();
        missing_bye.byes.pop();

        // counts still add up, but half of round 2 would never get a contestant
        let mut unfed = plan.clone();
        unfed.total_rounds += 1;
        unfed.bracket_size *= 2;

        let mut wrong_size = plan.clone();
        wrong_size.participant_count = 7;

        for broken in [missing_pairing, missing_bye, unfed, wrong_size] {
            assert_eq!(
                ledger.register(TOURNAMENT, &broken),
                Err(AdvancementError::InconsistentBracket(TOURNAMENT))
            );
        }
        assert_eq!(ledger.active_brackets(), 0);
        assert!(ledger.register(TOURNAMENT, &plan).unwrap());
    }

    #[test]
    fn test_advance_writes_only_its_side() {
        let ledger = ledger_with(&[1, 2, 3, 4, 5]);

        let outcome = ledger.apply(&finished(1, 1, 2)).unwrap();
        let AdvancementOutcome::Advanced(update) = outcome else {
            panic!("expected an advancement, got {outcome:?}");
        };
        assert_eq!(update.next_round, 2);
        assert_eq!(update.next_match_number, 1);
        assert_eq!(update.position, Position::First);

        // the bye on the second side survives
        assert_eq!(
            ledger.slot(&coordinate(2, 1)),
            Some(MatchSlot { slot_a: Some(2), slot_b: Some(3), winner: None })
        );
    }

    #[test]
    fn test_final_match_determines_champion() {
        let ledger = ledger_with(&[1, 2]);

        let outcome = ledger.apply(&finished(1, 1, 2)).unwrap();
        assert_eq!(
            outcome,
            AdvancementOutcome::ChampionDetermined(ChampionDetermined {
                tournament_id: TOURNAMENT,
                champion_id: 2,
                final_round: 1,
                final_match_number: 1,
            })
        );
        assert_eq!(ledger.champion(TOURNAMENT), Some(2));
    }

    #[test]
    fn test_redelivery_after_publish_is_already_applied() {
        let ledger = ledger_with(&[1, 2, 3, 4]);

        ledger.apply(&finished(1, 2, 3)).unwrap();
        ledger.confirm_published(&coordinate(1, 2));
        let before = ledger.slot(&coordinate(2, 1));

        assert_eq!(
            ledger.apply(&finished(1, 2, 3)).unwrap(),
            AdvancementOutcome::AlreadyApplied { coordinate: coordinate(1, 2) }
        );
        assert_eq!(ledger.slot(&coordinate(2, 1)), before);
        assert_eq!(ledger.pending_count(TOURNAMENT), 0);
    }

    #[test]
    fn test_redelivery_before_publish_returns_pending_outcome() {
        let ledger = ledger_with(&[1, 2, 3, 4]);

        let first = ledger.apply(&finished(1, 2, 3)).unwrap();
        let second = ledger.apply(&finished(1, 2, 3)).unwrap();

        assert_eq!(first, second);
        assert_eq!(ledger.pending_count(TOURNAMENT), 1);
    }

    #[test]
    fn test_conflicting_winner_is_refused() {
        let ledger = ledger_with(&[1, 2, 3, 4]);
        ledger.apply(&finished(1, 1, 1)).unwrap();

        assert_eq!(
            ledger.apply(&finished(1, 1, 2)),
            Err(AdvancementError::ConflictingResult {
                coordinate: coordinate(1, 1),
                recorded: 1,
                reported: 2,
            })
        );
        assert_eq!(ledger.slot(&coordinate(2, 1)).unwrap().slot_a, Some(1));
    }

    #[test]
    fn test_unknown_coordinates() {
        let ledger = ledger_with(&[1, 2, 3, 4]);

        for (round, match_number) in [(0, 1), (1, 0), (1, 3), (3, 1)] {
            assert_eq!(
                ledger.apply(&finished(round, match_number, 1)),
                Err(AdvancementError::UnknownMatchCoordinate(coordinate(round, match_number)))
            );
        }

        // round 2 is not playable until both semi-finals are in
        assert_eq!(
            ledger.apply(&finished(2, 1, 1)),
            Err(AdvancementError::UnknownMatchCoordinate(coordinate(2, 1)))
        );

        let mut other = finished(1, 1, 1);
        other.tournament_id = 999;
        assert!(matches!(
            ledger.apply(&other),
            Err(AdvancementError::UnknownMatchCoordinate(_))
        ));
    }

    #[test]
    fn test_winner_must_have_played() {
        let ledger = ledger_with(&[1, 2, 3, 4]);

        assert_eq!(
            ledger.apply(&finished(1, 1, 3)),
            Err(AdvancementError::WinnerNotInMatch {
                coordinate: coordinate(1, 1),
                winner_id: 3,
            })
        );
        assert_eq!(ledger.slot(&coordinate(1, 1)).unwrap().winner, None);
    }

    #[test]
    fn test_cancelled_tournament_ignores_results() {
        let ledger = ledger_with(&[1, 2, 3, 4]);
        assert!(ledger.cancel(TOURNAMENT));
        assert!(ledger.is_cancelled(TOURNAMENT));

        assert_eq!(
            ledger.apply(&finished(1, 1, 1)).unwrap(),
            AdvancementOutcome::Ignored {
                coordinate: coordinate(1, 1),
                reason: IgnoreReason::TournamentCancelled,
            }
        );
        assert_eq!(ledger.slot(&coordinate(2, 1)), None);
        assert!(!ledger.cancel(12345));
    }

    #[test]
    fn test_cancel_before_register_is_kept() {
        let ledger = BracketLedger::new();
        assert!(!ledger.cancel(TOURNAMENT));
        assert!(ledger.is_cancelled(TOURNAMENT));

        let plan = generate_first_round(&[1, 2, 3, 4]).unwrap();
        assert_eq!(
            ledger.register(TOURNAMENT, &plan),
            Err(AdvancementError::TournamentCancelled(TOURNAMENT))
        );
        assert_eq!(
            ledger.apply(&finished(1, 1, 1)).unwrap(),
            AdvancementOutcome::Ignored {
                coordinate: coordinate(1, 1),
                reason: IgnoreReason::TournamentCancelled,
            }
        );
        assert_eq!(ledger.active_brackets(), 0);
    }

    #[test]
    fn test_bracket_released_after_champion_published() {
        let plan = generate_first_round(&[1, 2, 3]).unwrap();
        let ledger = BracketLedger::new();
        ledger.register(TOURNAMENT, &plan).unwrap();

        ledger.apply(&finished(1, 1, 2)).unwrap();
        ledger.confirm_published(&coordinate(1, 1));
        ledger.apply(&finished(2, 1, 3)).unwrap();
        assert_eq!(ledger.active_brackets(), 1);

        ledger.confirm_published(&coordinate(2, 1));
        assert_eq!(ledger.active_brackets(), 0);
        assert_eq!(ledger.champion(TOURNAMENT), Some(3));

        assert_eq!(
            ledger.apply(&finished(2, 1, 3)).unwrap(),
            AdvancementOutcome::AlreadyApplied { coordinate: coordinate(2, 1) }
        );
        assert!(!ledger.register(TOURNAMENT, &plan).unwrap());
        assert_eq!(ledger.active_brackets(), 0);
    }

    #[test]
    fn test_rollback_forgets_bracket() {
        let ledger = ledger_with(&[1, 2]);
        assert!(ledger.rollback(TOURNAMENT));
        assert!(!ledger.rollback(TOURNAMENT));
        assert_eq!(ledger.total_rounds(TOURNAMENT), None);
    }

    #[test]
    fn test_concurrent_siblings_both_land() {
        for _ in 0..50 {
            let ledger = Arc::new(ledger_with(&[1, 2, 3, 4, 5, 6, 7, 8]));

            let handles: Vec<_> = [(1, 2), (2, 3)]
                .into_iter()
                .map(|(match_number, winner)| {
                    let ledger = Arc::clone(&ledger);
                    thread::spawn(move || ledger.apply(&finished(1, match_number, winner)).unwrap())
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(
                ledger.slot(&coordinate(2, 1)),
                Some(MatchSlot { slot_a: Some(2), slot_b: Some(3), winner: None })
            );
        }
    }

    proptest! {
        #[test]
        fn test_full_bracket_plays_n_minus_one_matches(n in 2usize..300) {
            let participants: Vec<ParticipantId> = (1..=n as i64).collect();
            let plan = generate_first_round(&participants).unwrap();
            let ledger = BracketLedger::new();
            ledger.register(TOURNAMENT, &plan).unwrap();

            prop_assert_eq!(play_out(&ledger, &plan), n - 1);
            prop_assert!(ledger.champion(TOURNAMENT).is_some());
            prop_assert_eq!(ledger.active_brackets(), 0);
        }
    }
}
