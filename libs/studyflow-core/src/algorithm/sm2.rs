//! SM-2 spaced repetition algorithm.
//!
//! SuperMemo 2 with 0-5 quality grades. The interval is computed from the
//! ease factor the card had *before* the review; the ease update is applied
//! afterwards and only affects the next review.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{Quality, ReviewState};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Interval after the first successful review, and after any failure.
    pub first_interval: u32,
    pub second_interval: u32,
    /// Upper bound on any interval, keeping review dates representable.
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
            maximum_interval: 36_500,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> ReviewState {
        ReviewState {
            interval: self.first_interval,
            ease_factor: self.initial_ease,
            repetitions: 0,
        }
    }

    fn schedule(&self, state: &ReviewState, quality: Quality, now: DateTime<Utc>) -> SchedulingResult {
        let (interval, repetitions) = if quality.is_pass() {
            let interval = match state.repetitions {
                0 => self.first_interval,
                1 => self.second_interval,
                _ => (f64::from(state.interval) * state.ease_factor).round() as u32,
            };
            (interval.min(self.maximum_interval).max(1), state.repetitions.saturating_add(1))
        } else {
            (self.first_interval, 0)
        };

        let ease_factor = self.next_ease(state.ease_factor, quality);
        let next_review = now
            .checked_add_signed(Duration::days(i64::from(interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        SchedulingResult {
            new_state: ReviewState {
                interval,
                ease_factor,
                repetitions,
            },
            next_review,
        }
    }
}

impl Sm2 {
    /// EF' = max(min, EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)))
    fn next_ease(&self, ease_factor: f64, quality: Quality) -> f64 {
        let miss = 5.0 - f64::from(quality.to_value());
        (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(self.minimum_ease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn grade(sm2: &Sm2, state: ReviewState, quality: u8) -> ReviewState {
        let quality = Quality::from_value(quality).unwrap();
        sm2.schedule(&state, quality, now()).new_state
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn new_card_starts_at_one_day_with_default_ease() {
        let state = Sm2::default().initial_state();
        assert_eq!(state.interval, 1);
        assert_eq!(state.repetitions, 0);
        assert!(approx(state.ease_factor, 2.5));
    }

    #[test]
    fn first_pass_is_one_day_second_is_six() {
        let sm2 = Sm2::default();
        let first = grade(&sm2, sm2.initial_state(), 3);
        assert_eq!((first.interval, first.repetitions), (1, 1));
        let second = grade(&sm2, first, 3);
        assert_eq!((second.interval, second.repetitions), (6, 2));
    }

    #[test]
    fn third_pass_uses_ease_before_update() {
        let sm2 = Sm2::default();
        let mut state = sm2.initial_state();
        state = grade(&sm2, state, 4);
        assert_eq!(state.interval, 1);
        assert!(approx(state.ease_factor, 2.5));
        state = grade(&sm2, state, 4);
        assert_eq!(state.interval, 6);
        assert!(approx(state.ease_factor, 2.5));
        state = grade(&sm2, state, 5);
        // round(6 * 2.5), not round(6 * 2.6)
        assert_eq!(state.interval, 15);
        assert_eq!(state.repetitions, 3);
        assert!(approx(state.ease_factor, 2.6));
    }

    #[test]
    fn interval_rounds_half_up() {
        let sm2 = Sm2::default();
        let state = ReviewState {
            interval: 5,
            ease_factor: 2.5,
            repetitions: 4,
        };
        // 5 * 2.5 = 12.5
        assert_eq!(grade(&sm2, state, 4).interval, 13);
    }

    #[test]
    fn fail_resets_repetitions_and_interval() {
        let sm2 = Sm2::default();
        let state = ReviewState {
            interval: 40,
            ease_factor: 2.8,
            repetitions: 7,
        };
        for quality in 0..3 {
            let next = grade(&sm2, state, quality);
            assert_eq!(next.interval, 1);
            assert_eq!(next.repetitions, 0);
        }
    }

    #[test]
    fn fail_still_updates_ease() {
        let sm2 = Sm2::default();
        let next = grade(&sm2, sm2.initial_state(), 0);
        // 2.5 + (0.1 - 5 * (0.08 + 5 * 0.02)) = 1.7
        assert!(approx(next.ease_factor, 1.7));
    }

    #[test]
    fn ease_factor_never_below_minimum() {
        let sm2 = Sm2::default();
        let mut state = sm2.initial_state();
        for quality in [0, 1, 2, 0, 3, 0, 1, 3, 3, 0] {
            state = grade(&sm2, state, quality);
            assert!(state.ease_factor >= sm2.minimum_ease);
        }
        assert!(approx(state.ease_factor, 1.3));
    }

    #[test]
    fn next_review_is_interval_days_ahead() {
        let sm2 = Sm2::default();
        let state = ReviewState {
            interval: 6,
            ease_factor: 2.5,
            repetitions: 2,
        };
        let result = sm2.schedule(&state, Quality::Hesitant, now());
        assert_eq!(result.new_state.interval, 15);
        assert_eq!(
            result.next_review.timestamp_millis() - now().timestamp_millis(),
            15 * 86_400_000
        );
    }

    #[test]
    fn long_perfect_streak_caps_interval() {
        let sm2 = Sm2::default();
        let mut state = sm2.initial_state();
        for _ in 0..40 {
            let result = sm2.schedule(&state, Quality::Perfect, now());
            assert!(result.next_review >= now());
            assert!(result.new_state.interval <= sm2.maximum_interval);
            state = result.new_state;
        }
        assert_eq!(state.interval, 36_500);
        assert_eq!(state.repetitions, 40);
    }

    #[test]
    fn extreme_loaded_state_does_not_overflow() {
        let sm2 = Sm2::default();
        let state = ReviewState {
            interval: u32::MAX,
            ease_factor: 1.0e300,
            repetitions: u32::MAX,
        };
        let result = sm2.schedule(&state, Quality::Perfect, now());
        assert_eq!(result.new_state.repetitions, u32::MAX);
        assert_eq!(result.new_state.interval, sm2.maximum_interval);
        assert_eq!(result.next_review, now() + Duration::days(36_500));
    }

    #[test]
    fn unrepresentable_review_date_saturates() {
        let sm2 = Sm2 {
            maximum_interval: u32::MAX,
            ..Sm2::default()
        };
        let state = ReviewState {
            interval: u32::MAX,
            ease_factor: 4.0,
            repetitions: 5,
        };
        let result = sm2.schedule(&state, Quality::Perfect, now());
        assert_eq!(result.next_review, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn corrupt_zero_interval_still_schedules_a_day_out() {
        let sm2 = Sm2::default();
        let state = ReviewState {
            interval: 0,
            ease_factor: 2.5,
            repetitions: 3,
        };
        assert_eq!(grade(&sm2, state, 5).interval, 1);
    }
}
