// tests/rolling_invariants.rs
//
// Randomized (seeded) checks of the window invariants over sorted input.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use delivery_time_analyzer::event::Sample;
use delivery_time_analyzer::SlidingWindow;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 12, 26)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

fn sorted_samples(rng: &mut StdRng, n: usize) -> Vec<Sample> {
    let mut minute = base();
    (0..n)
        .map(|_| {
            // mostly small steps, occasional long gaps, frequent same-minute bursts
            let step = match rng.random_range(0..10) {
                0..=3 => 0,
                4..=8 => rng.random_range(1..4),
                _ => rng.random_range(5..40),
            };
            minute += Duration::minutes(step);
            Sample {
                minute,
                duration: rng.random_range(1..200) as f64,
            }
        })
        .collect()
}

#[test]
fn running_sum_and_ordering_hold_at_every_tick() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let window_minutes = rng.random_range(1..15);
        let window = Duration::minutes(i64::from(window_minutes));
        let mut w = SlidingWindow::new(window_minutes);

        for s in sorted_samples(&mut rng, 300) {
            let ticks = w.observe(s).unwrap();

            // Integer-valued durations keep the f64 sum exact.
            let recomputed: f64 = w.retained().map(|r| r.duration).sum();
            assert_eq!(w.running_sum(), recomputed, "seed {seed}");

            let retained: Vec<_> = w.retained().map(|r| r.minute).collect();
            assert!(retained.windows(2).all(|p| p[0] <= p[1]), "seed {seed}");

            if let Some(last) = ticks.last() {
                // everything retained before this sample was inside the window
                for m in &retained[..retained.len() - 1] {
                    assert!(last.minute - *m <= window, "seed {seed}");
                }
            }
        }
    }
}

#[test]
fn tick_minutes_advance_by_exactly_one() {
    let mut rng = StdRng::seed_from_u64(42);
    let samples = sorted_samples(&mut rng, 200);
    let out = delivery_time_analyzer::process(samples.into_iter().map(Ok), 10).unwrap();

    let (flush, ticks) = out.split_last().unwrap();
    for pair in ticks.windows(2) {
        assert_eq!(pair[1].minute - pair[0].minute, Duration::minutes(1));
    }
    // flush repeats the final tick's minute
    assert_eq!(flush.minute, ticks.last().unwrap().minute);
}

#[test]
fn averages_match_a_brute_force_rescan() {
    let mut rng = StdRng::seed_from_u64(7);
    let samples = sorted_samples(&mut rng, 150);
    let window = Duration::minutes(5);
    let out = delivery_time_analyzer::process(samples.iter().copied().map(Ok), 5).unwrap();

    let (_, ticks) = out.split_last().unwrap();
    for tick in ticks {
        // ticks see only samples from strictly earlier minutes
        let in_window: Vec<f64> = samples
            .iter()
            .filter(|s| s.minute < tick.minute && tick.minute - s.minute <= window)
            .map(|s| s.duration)
            .collect();
        let expected = if in_window.is_empty() {
            0.0
        } else {
            (in_window.iter().sum::<f64>() / in_window.len() as f64) as f32
        };
        assert_eq!(tick.average, expected, "tick {}", tick.minute);
    }
}
