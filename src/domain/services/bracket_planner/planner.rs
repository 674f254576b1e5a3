use crate::domain::models::{
    bracket::{BracketInfo, BracketPlan, ByePlacement, Pairing},
    types::{ParticipantId, Position},
};

use super::{PlannerError, PlannerResult};

/// Shape of a bracket, independent of who plays in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BracketShape {
    total_rounds: u32,
    bracket_size: usize,
    bye_count: usize,
    first_round_match_count: usize,
}

impl BracketShape {
    fn for_participants(n: usize) -> PlannerResult<Self> {
        if n < 2 {
            return Err(PlannerError::InvalidBracketInput(n));
        }

        let total_rounds = calculate_rounds(n);
        let bracket_size = 1usize << total_rounds;
        let bye_count = bracket_size - n;

        Ok(Self {
            total_rounds,
            bracket_size,
            bye_count,
            first_round_match_count: (n - bye_count) / 2,
        })
    }
}

/// Number of rounds of a single-elimination bracket: `ceil(log2(n))`, or 0
/// when there is nobody to play against.
pub fn calculate_rounds(n: usize) -> u32 {
    if n <= 1 {
        return 0;
    }
    n.checked_next_power_of_two()
        .map_or(usize::BITS, |size| size.trailing_zeros())
}

/// Builds the round-1 pairings for `participants`, in order.
///
/// Pairing `k` takes the participants at positions `2k-1` and `2k`; the last
/// `bye_count` participants play no round-1 match and are placed into round 2
/// by [`place_byes`].
///
/// # Errors
/// Returns `PlannerError::InvalidBracketInput` with fewer than two participants
pub fn generate_first_round(participants: &[ParticipantId]) -> PlannerResult<BracketPlan> {
    let shape = BracketShape::for_participants(participants.len())?;

    let pairings = participants
        .chunks_exact(2)
        .take(shape.first_round_match_count)
        .zip(1u32..)
        .map(|(pair, match_number)| Pairing {
            round: 1,
            match_number,
            slot_a: pair[0],
            slot_b: pair[1],
        })
        .collect();

    Ok(BracketPlan {
        participant_count: participants.len(),
        total_rounds: shape.total_rounds,
        bracket_size: shape.bracket_size,
        bye_count: shape.bye_count,
        first_round_match_count: shape.first_round_match_count,
        pairings,
        byes: byes_for_shape(participants, &shape),
    })
}

/// Round-2 placements of the participants that skip round 1.
///
/// Round 2 is read as a line of positions, two per match: position `p` is
/// match `ceil(p/2)`, first side when `p` is odd. Winners of round-1 match `k`
/// take position `k`, so the byes fill the positions after
/// `first_round_match_count`, in input order.
///
/// # Errors
/// Returns `PlannerError::InvalidBracketInput` with fewer than two participants
pub fn place_byes(participants: &[ParticipantId]) -> PlannerResult<Vec<ByePlacement>> {
    let shape = BracketShape::for_participants(participants.len())?;
    Ok(byes_for_shape(participants, &shape))
}

fn byes_for_shape(participants: &[ParticipantId], shape: &BracketShape) -> Vec<ByePlacement> {
    let first_bye = 2 * shape.first_round_match_count;

    participants[first_bye..]
        .iter()
        .zip(shape.first_round_match_count + 1..)
        .map(|(&participant_id, linear_position)| {
            let position = linear_position as u32;
            ByePlacement {
                round: 2,
                match_number: position.div_ceil(2),
                position: Position::for_match_number(position),
                participant_id,
            }
        })
        .collect()
}

/// Shape-only preview of the bracket `n` participants would produce.
///
/// # Errors
/// Returns `PlannerError::InvalidBracketInput` when `n < 2`
pub fn bracket_info(n: usize) -> PlannerResult<BracketInfo> {
    let shape = BracketShape::for_participants(n)?;

    Ok(BracketInfo {
        total_participants: n,
        total_rounds: shape.total_rounds,
        bracket_size: shape.bracket_size,
        participants_with_bye: shape.bye_count,
        first_round_matches: shape.first_round_match_count,
        total_matches: n - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const A: ParticipantId = 1;
    const B: ParticipantId = 2;
    const C: ParticipantId = 3;
    const D: ParticipantId = 4;
    const E: ParticipantId = 5;

    fn ids(n: usize) -> Vec<ParticipantId> {
        (1..=n as i64).collect()
    }

    #[test]
    fn test_calculate_rounds() {
        assert_eq!(calculate_rounds(0), 0);
        assert_eq!(calculate_rounds(1), 0);
        assert_eq!(calculate_rounds(2), 1);
        assert_eq!(calculate_rounds(3), 2);
        assert_eq!(calculate_rounds(4), 2);
        assert_eq!(calculate_rounds(5), 3);
        assert_eq!(calculate_rounds(8), 3);
        assert_eq!(calculate_rounds(9), 4);
        assert_eq!(calculate_rounds(64), 6);
    }

    #[test]
    fn test_four_participants_pair_in_order() {
        let plan = generate_first_round(&[A, B, C, D]).unwrap();

        assert_eq!(plan.total_rounds, 2);
        assert_eq!(plan.bye_count, 0);
        assert_eq!(plan.first_round_match_count, 2);
        assert_eq!(
            plan.pairings,
            vec![
                Pairing { round: 1, match_number: 1, slot_a: A, slot_b: B },
                Pairing { round: 1, match_number: 2, slot_a: C, slot_b: D },
            ]
        );
        assert!(plan.byes.is_empty());
    }

    #[test]
    fn test_five_participants_leave_three_byes() {
        let plan = generate_first_round(&[A, B, C, D, E]).unwrap();

        assert_eq!(plan.total_rounds, 3);
        assert_eq!(plan.bracket_size, 8);
        assert_eq!(plan.bye_count, 3);
        assert_eq!(plan.first_round_match_count, 1);
        assert_eq!(
            plan.pairings,
            vec![Pairing { round: 1, match_number: 1, slot_a: A, slot_b: B }]
        );
        assert_eq!(plan.total_matches(), 4);
    }

    #[test]
    fn test_five_participants_bye_placement() {
        let byes = place_byes(&[A, B, C, D, E]).unwrap();

        assert_eq!(
            byes,
            vec![
                ByePlacement { round: 2, match_number: 1, position: Position::Second, participant_id: C },
                ByePlacement { round: 2, match_number: 2, position: Position::First, participant_id: D },
                ByePlacement { round: 2, match_number: 2, position: Position::Second, participant_id: E },
            ]
        );
    }

    #[test]
    fn test_three_participants() {
        let plan = generate_first_round(&[A, B, C]).unwrap();

        assert_eq!(plan.total_rounds, 2);
        assert_eq!(plan.bye_count, 1);
        assert_eq!(plan.first_round_match_count, 1);
        assert_eq!(plan.pairings.len(), 1);
        assert_eq!(
            plan.byes,
            vec![ByePlacement { round: 2, match_number: 1, position: Position::Second, participant_id: C }]
        );
    }

    #[test]
    fn test_two_participants_play_the_final() {
        let plan = generate_first_round(&[A, B]).unwrap();
        assert_eq!(plan.total_rounds, 1);
        assert_eq!(plan.pairings.len(), 1);
        assert!(plan.byes.is_empty());
    }

    #[test]
    fn test_too_few_participants() {
        assert_eq!(generate_first_round(&[]), Err(PlannerError::InvalidBracketInput(0)));
        assert_eq!(generate_first_round(&[A]), Err(PlannerError::InvalidBracketInput(1)));
        assert_eq!(place_byes(&[A]), Err(PlannerError::InvalidBracketInput(1)));
        assert_eq!(bracket_info(1), Err(PlannerError::InvalidBracketInput(1)));
    }

    #[test]
    fn test_bracket_info() {
        let info = bracket_info(6).unwrap();
        assert_eq!(
            info,
            BracketInfo {
                total_participants: 6,
                total_rounds: 3,
                bracket_size: 8,
                participants_with_bye: 2,
                first_round_matches: 2,
                total_matches: 5,
            }
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let participants = ids(13);
        assert_eq!(
            generate_first_round(&participants).unwrap(),
            generate_first_round(&participants).unwrap()
        );
    }

    proptest! {
        #[test]
        fn test_shape_invariants(n in 2usize..2048) {
            let plan = generate_first_round(&ids(n)).unwrap();

            prop_assert_eq!(2 * plan.first_round_match_count + plan.bye_count, n);
            prop_assert_eq!(plan.bracket_size, 1usize << plan.total_rounds);
            prop_assert!(plan.bracket_size / 2 < n && n <= plan.bracket_size);
            prop_assert_eq!(plan.pairings.len(), plan.first_round_match_count);
            prop_assert_eq!(plan.byes.len(), plan.bye_count);
        }

        #[test]
        fn test_every_participant_placed_once(n in 2usize..512) {
            let participants = ids(n);
            let plan = generate_first_round(&participants).unwrap();

            let mut placed: Vec<ParticipantId> = plan
                .pairings
                .iter()
                .flat_map(|p| [p.slot_a, p.slot_b])
                .chain(plan.byes.iter().map(|b| b.participant_id))
                .collect();
            placed.sort_unstable();
            prop_assert_eq!(placed, participants);
        }

        #[test]
        fn test_byes_never_share_a_side(n in 3usize..512) {
            let plan = generate_first_round(&ids(n)).unwrap();
            let round_two_matches = (plan.bracket_size / 4) as u32;

            let mut seen = std::collections::HashSet::new();
            for bye in &plan.byes {
                prop_assert!(bye.match_number >= 1 && bye.match_number <= round_two_matches);
                prop_assert!(seen.insert((bye.match_number, bye.position)));
            }
            // round-1 winners land on positions 1..=f, never on a bye position
            for pairing in &plan.pairings {
                let target = (pairing.match_number.div_ceil(2), Position::for_match_number(pairing.match_number));
                prop_assert!(!seen.contains(&target));
            }
        }

        #[test]
        fn test_rounds_are_monotonic(n in 0usize..100_000) {
            prop_assert!(calculate_rounds(n) <= calculate_rounds(n + 1));
        }
    }
}
