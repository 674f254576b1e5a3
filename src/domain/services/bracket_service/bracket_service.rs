//! Implementation of the bracket service on top of an [`EventGateway`].

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::{
    models::{
        bracket::{AdvancementOutcome, BracketSummary, MatchFinished},
        types::{ParticipantId, TournamentId, TournamentSnapshot},
    },
    services::{
        advancement::{AdvancementError, BracketLedger},
        bracket_planner::generate_first_round,
        events::{BracketEvent, BracketGenerated, EventGateway},
        lifecycle_guard::authorize_start,
    },
};

use super::{BracketResult, BracketService};

/// Bracket service publishing through `G`.
///
/// Owns the ledger; share the service itself (e.g. behind an `Arc`) between
/// the start path and the worker.
pub struct BracketServiceImpl<G> {
    gateway: G,
    ledger: BracketLedger,
}

impl<G: EventGateway> BracketServiceImpl<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            ledger: BracketLedger::new(),
        }
    }

    /// Bracket bookkeeping, read-only use intended
    pub fn ledger(&self) -> &BracketLedger {
        &self.ledger
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

#[async_trait]
impl<G: EventGateway> BracketService for BracketServiceImpl<G> {
    async fn start_bracket(
        &self,
        tournament: &TournamentSnapshot,
        total_rounds_hint: Option<u32>,
        participant_ids: Vec<ParticipantId>,
    ) -> BracketResult<BracketSummary> {
        let authorized = authorize_start(tournament.status, tournament.max_participants, &participant_ids)
            .inspect_err(|reason| {
                warn!(tournament_id = tournament.id, %reason, "start rejected");
            })?;

        let plan = generate_first_round(&authorized.participants)?;

        if let Some(hint) = total_rounds_hint.filter(|hint| *hint != plan.total_rounds) {
            warn!(
                tournament_id = tournament.id,
                hint,
                computed = plan.total_rounds,
                "round count hint ignored"
            );
        }

        // a start is never replayed; only `bracket.generated` may register twice
        if !self.ledger.register(tournament.id, &plan)? {
            warn!(tournament_id = tournament.id, "bracket already started");
            return Err(AdvancementError::BracketAlreadyRegistered(tournament.id).into());
        }

        let generated = BracketGenerated::from_plan(tournament, &plan);
        if let Err(err) = self.gateway.publish(&BracketEvent::Generated(generated)).await {
            error!(tournament_id = tournament.id, %err, "failed to publish generated bracket");
            self.ledger.rollback(tournament.id);
            return Err(err.into());
        }

        info!(
            tournament_id = tournament.id,
            participants = plan.participant_count,
            rounds = plan.total_rounds,
            byes = plan.bye_count,
            "bracket generated"
        );

        Ok(BracketSummary {
            tournament_id: tournament.id,
            tournament_name: tournament.name.clone(),
            total_participants: plan.participant_count,
            total_rounds: plan.total_rounds,
            bracket_size: plan.bracket_size,
            bye_count: plan.bye_count,
            first_round_match_count: plan.first_round_match_count,
            pairings: plan.pairings,
            byes: plan.byes,
            transition: authorized.transition,
        })
    }

    async fn on_match_finished(&self, event: MatchFinished) -> BracketResult<AdvancementOutcome> {
        let coordinate = event.coordinate();

        let outcome = self.ledger.apply(&event).inspect_err(|err| {
            warn!(%coordinate, match_id = event.match_id, %err, "match result not applied");
        })?;

        let to_publish = match &outcome {
            AdvancementOutcome::Advanced(update) => BracketEvent::AdvanceNextMatch(update.clone()),
            AdvancementOutcome::ChampionDetermined(champion) => {
                BracketEvent::ChampionDetermined(champion.clone())
            }
            AdvancementOutcome::AlreadyApplied { .. } => {
                info!(%coordinate, "match result already applied");
                return Ok(outcome);
            }
            AdvancementOutcome::Ignored { reason, .. } => {
                warn!(%coordinate, ?reason, "match result ignored");
                return Ok(outcome);
            }
        };

        if let Err(err) = self.gateway.publish(&to_publish).await {
            error!(%coordinate, %err, "advancement recorded but not published");
            return Err(err.into());
        }
        self.ledger.confirm_published(&coordinate);

        match &outcome {
            AdvancementOutcome::ChampionDetermined(champion) => info!(
                tournament_id = champion.tournament_id,
                champion_id = champion.champion_id,
                "champion determined"
            ),
            _ => info!(%coordinate, winner_id = event.winner_id, "winner advanced"),
        }

        Ok(outcome)
    }

    fn cancel_tournament(&self, tournament_id: TournamentId) -> bool {
        let cancelled = self.ledger.cancel(tournament_id);
        if cancelled {
            info!(tournament_id, "tournament cancelled, advancement stopped");
        } else {
            info!(tournament_id, "tournament cancelled before its bracket was known");
        }
        cancelled
    }

    fn register_generated(&self, generated: &BracketGenerated) -> BracketResult<bool> {
        Ok(self
            .ledger
            .register(generated.tournament_id, &generated.to_plan())?)
    }
}
