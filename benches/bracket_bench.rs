use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::time::Duration;

use bracket_engine::{
    BracketLedger, MatchCoordinate, MatchFinished, ParticipantId, generate_first_round,
};

const TOURNAMENT: i64 = 1;

fn participants(n: usize) -> Vec<ParticipantId> {
    (1..=n as i64).collect()
}

/// Plays every match of a registered bracket, first side always winning
fn play_out(ledger: &BracketLedger, bracket_size: usize, total_rounds: u32) {
    for round in 1..=total_rounds {
        for match_number in 1..=(bracket_size >> round) as u32 {
            let coordinate = MatchCoordinate::new(TOURNAMENT, round, match_number);
            let Some(slot) = ledger.slot(&coordinate) else {
                continue;
            };
            let Some(winner_id) = slot.slot_a else {
                continue;
            };
            let _ = black_box(ledger.apply(&MatchFinished {
                match_id: i64::from(round) * 100_000 + i64::from(match_number),
                tournament_id: TOURNAMENT,
                round,
                match_number,
                winner_id,
            }));
            ledger.confirm_published(&coordinate);
        }
    }
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("bracket_plan");
    group.measurement_time(Duration::from_secs(5));

    for size in [8, 1000, 100_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let ids = participants(size);
            b.iter(|| black_box(generate_first_round(&ids)));
        });
    }

    group.finish();
}

fn bench_full_tournament(c: &mut Criterion) {
    let mut group = c.benchmark_group("bracket_advancement");
    group.measurement_time(Duration::from_secs(10));

    for size in [16, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements((*size - 1) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let plan = generate_first_round(&participants(size)).unwrap();
            b.iter(|| {
                let ledger = BracketLedger::new();
                ledger.register(TOURNAMENT, &plan).unwrap();
                play_out(&ledger, plan.bracket_size, plan.total_rounds);
                black_box(ledger.champion(TOURNAMENT))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan, bench_full_tournament);
criterion_main!(benches);
