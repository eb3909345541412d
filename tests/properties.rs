//! Quantified invariants (§8 P1–P6), checked with `proptest` across
//! random sequences of increments.

use proptest::prelude::*;
use wave_engine::{Wave, WaveConfig};

#[derive(Debug, Clone, Copy)]
struct Op {
    v: i64,
    dt: i64,
}

fn ops_strategy(max_r: i64) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        (1..=max_r, 0..5i64).prop_map(|(v, dt)| Op { v, dt }),
        1..60,
    )
}

fn run(config: WaveConfig, start: i64, ops: &[Op]) -> Wave {
    let mut w = Wave::create(config, start);
    let mut ts = start;
    for op in ops {
        ts += op.dt;
        w.incr(op.v, ts).unwrap();
    }
    w
}

proptest! {
    // P6: level queues never exceed their configured capacity.
    #[test]
    fn p6_level_queue_size_bounded(ops in ops_strategy(50)) {
        let config = WaveConfig::new(20, 0.2, 50, false).unwrap();
        let w = run(config, 1, &ops);
        let cap = w.config().level_cap();
        for j in 0..w.config().levels() {
            prop_assert!(w.level_queue_len(j) <= cap);
        }
    }

    // P3: total mod M equals the sum of all inserted values mod M.
    #[test]
    fn p3_total_matches_sum_mod_m(ops in ops_strategy(50)) {
        let config = WaveConfig::new(20, 0.2, 50, false).unwrap();
        let w = run(config, 1, &ops);
        let sum: i128 = ops.iter().map(|op| op.v as i128).sum();
        let expected = (sum.rem_euclid(w.config().modulus() as i128)) as i64;
        prop_assert_eq!(w.total(), expected);
    }

    // P5: for the most recent timestamp, get(ts=last) == total - z.
    #[test]
    fn p5_query_at_last_is_total_minus_z(ops in ops_strategy(50)) {
        let config = WaveConfig::new(20, 0.2, 50, false).unwrap();
        let w = run(config, 1, &ops);
        prop_assert_eq!(w.get(w.last(), false), w.total() - w.z());
    }

    // P2: while every item is still within the window (pos < N, i.e. no
    // expirations have happened yet), the exact query returns the exact
    // sum of every inserted value.
    #[test]
    fn p2_no_expiry_means_exact_sum(
        values in prop::collection::vec(1..=50i64, 1..20),
    ) {
        // N chosen large enough that, with one tick per item, pos never
        // reaches N within the generated sequence. Start is non-zero so
        // `last` always advances past the `ts == 0` query short-circuit
        // (rule 1) regardless of how many items are generated.
        let n = (values.len() as i64) + 10;
        let start = 1000;
        let config = WaveConfig::new(n, 0.2, 50, false).unwrap();
        let mut w = Wave::create(config, start);
        let mut ts = start;
        let mut sum = 0i64;
        for v in &values {
            w.incr(*v, ts).unwrap();
            sum += v;
            ts += 1;
        }
        prop_assert!(w.pos() < n);
        prop_assert_eq!(w.get(w.last(), false), sum);
    }

    // P4: reset followed by a query returns 0.
    #[test]
    fn p4_reset_then_query_is_zero(ops in ops_strategy(50), reset_ts in 1000..2000i64) {
        let config = WaveConfig::new(20, 0.2, 50, false).unwrap();
        let mut w = run(config, 1, &ops);
        w.reset(reset_ts);
        prop_assert_eq!(w.get(reset_ts, false), 0);
        prop_assert_eq!(w.live_triples(), 0);
    }

    // P1 (I4/I5 facets): no live triple sits outside the window, and no
    // level queue ever overflows its capacity, after an arbitrary
    // sequence of increments including multi-window jumps.
    #[test]
    fn p1_no_triple_outside_window(
        ops in prop::collection::vec((1..=50i64, 0..500i64), 1..40),
    ) {
        let config = WaveConfig::new(20, 0.2, 50, false).unwrap();
        let mut w = Wave::create(config, 0);
        let mut ts = 0i64;
        for (v, dt) in ops {
            ts += dt;
            w.incr(v, ts).unwrap();
        }
        for triple in w.live_triple_positions() {
            prop_assert!(triple > w.pos() - w.config().n());
        }
    }
}
