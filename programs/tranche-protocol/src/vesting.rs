use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::constants::BPS_DENOMINATOR;
use crate::error::{ErrorCode, ProtocolResult};

/// Release curve applied to every allocation in a round.
///
/// All timestamps are unix seconds. Every variant is monotonically
/// non-decreasing in time and never unlocks more than the allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VestingSchedule {
    /// Entire allocation claimable from the moment the root is published.
    #[default]
    Immediate,

    /// `initial_unlock_bps` of the allocation at `start`, the remainder accruing
    /// linearly until `start + duration_seconds`. The linear portion is held
    /// back until the cliff has passed.
    Linear {
        start: i64,
        #[serde(default)]
        cliff_seconds: u64,
        duration_seconds: u64,
        #[serde(default)]
        initial_unlock_bps: u16,
    },

    /// `initial_unlock_bps` at `start`, then the remainder in `periods` equal
    /// tranches, one per elapsed `period_seconds`.
    Stepped {
        start: i64,
        period_seconds: u64,
        periods: u32,
        #[serde(default)]
        initial_unlock_bps: u16,
    },
}

impl VestingSchedule {
    pub fn validate(&self) -> ProtocolResult<()> {
        match *self {
            VestingSchedule::Immediate => Ok(()),
            VestingSchedule::Linear {
                cliff_seconds,
                duration_seconds,
                initial_unlock_bps,
                ..
            } => {
                if duration_seconds == 0 {
                    return Err(ErrorCode::InvalidVestingSchedule(
                        "duration_seconds must be greater than zero".to_string(),
                    ));
                }
                if cliff_seconds > duration_seconds {
                    return Err(ErrorCode::InvalidVestingSchedule(format!(
                        "cliff_seconds ({}) exceeds duration_seconds ({})",
                        cliff_seconds, duration_seconds
                    )));
                }
                check_bps(initial_unlock_bps)
            }
            VestingSchedule::Stepped {
                period_seconds,
                periods,
                initial_unlock_bps,
                ..
            } => {
                if period_seconds == 0 {
                    return Err(ErrorCode::InvalidVestingSchedule(
                        "period_seconds must be greater than zero".to_string(),
                    ));
                }
                if periods == 0 {
                    return Err(ErrorCode::InvalidVestingSchedule(
                        "periods must be greater than zero".to_string(),
                    ));
                }
                check_bps(initial_unlock_bps)
            }
        }
    }

    /// Cumulative amount of `allocation` unlocked at `now`.
    pub fn unlocked(&self, allocation: U256, now: i64) -> U256 {
        match *self {
            VestingSchedule::Immediate => allocation,
            VestingSchedule::Linear {
                start,
                cliff_seconds,
                duration_seconds,
                initial_unlock_bps,
            } => {
                let Some(elapsed) = elapsed_since(start, now) else {
                    return U256::ZERO;
                };
                if elapsed >= duration_seconds {
                    return allocation;
                }

                let initial = initial_portion(allocation, initial_unlock_bps);
                if elapsed < cliff_seconds {
                    return initial;
                }

                let remainder = allocation - initial;
                initial + mul_div_floor(remainder, elapsed, duration_seconds)
            }
            VestingSchedule::Stepped {
                start,
                period_seconds,
                periods,
                initial_unlock_bps,
            } => {
                let Some(elapsed) = elapsed_since(start, now) else {
                    return U256::ZERO;
                };
                let periods = u64::from(periods);
                let completed = elapsed / period_seconds;
                if completed >= periods {
                    return allocation;
                }

                let initial = initial_portion(allocation, initial_unlock_bps);
                let remainder = allocation - initial;
                initial + mul_div_floor(remainder, completed, periods)
            }
        }
    }

    /// First timestamp at which every allocation is fully unlocked.
    pub fn fully_vested_at(&self) -> Option<i64> {
        match *self {
            VestingSchedule::Immediate => None,
            VestingSchedule::Linear {
                start,
                duration_seconds,
                ..
            } => offset(start, duration_seconds),
            VestingSchedule::Stepped {
                start,
                period_seconds,
                periods,
                ..
            } => period_seconds
                .checked_mul(u64::from(periods))
                .and_then(|total| offset(start, total)),
        }
    }
}

fn check_bps(bps: u16) -> ProtocolResult<()> {
    if u64::from(bps) > BPS_DENOMINATOR {
        return Err(ErrorCode::InvalidVestingSchedule(format!(
            "initial_unlock_bps ({}) exceeds {}",
            bps, BPS_DENOMINATOR
        )));
    }
    Ok(())
}

fn elapsed_since(start: i64, now: i64) -> Option<u64> {
    if now < start {
        return None;
    }
    Some(now.abs_diff(start))
}

fn offset(start: i64, seconds: u64) -> Option<i64> {
    i64::try_from(seconds)
        .ok()
        .and_then(|seconds| start.checked_add(seconds))
}

fn initial_portion(allocation: U256, bps: u16) -> U256 {
    mul_div_floor(allocation, u64::from(bps).min(BPS_DENOMINATOR), BPS_DENOMINATOR)
}

/// `floor(amount * numerator / denominator)` for `numerator <= denominator`.
///
/// Splitting `amount` into quotient and remainder keeps every intermediate
/// below `amount`, so the result never overflows even for `U256::MAX`.
pub fn mul_div_floor(amount: U256, numerator: u64, denominator: u64) -> U256 {
    debug_assert!(denominator > 0 && numerator <= denominator);
    let numerator = U256::from(numerator);
    let denominator = U256::from(denominator);
    (amount / denominator) * numerator + (amount % denominator) * numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const START: i64 = 1_700_000_000;
    const DAY: u64 = 86_400;

    fn linear(cliff_days: u64, duration_days: u64, initial_unlock_bps: u16) -> VestingSchedule {
        VestingSchedule::Linear {
            start: START,
            cliff_seconds: cliff_days * DAY,
            duration_seconds: duration_days * DAY,
            initial_unlock_bps,
        }
    }

    fn at_day(day: u64) -> i64 {
        START + (day * DAY) as i64
    }

    #[test]
    fn test_immediate_unlocks_everything() {
        let allocation = U256::from(1000u64);
        assert_eq!(VestingSchedule::Immediate.unlocked(allocation, 0), allocation);
        assert_eq!(VestingSchedule::Immediate.unlocked(allocation, i64::MIN), allocation);
        assert_eq!(VestingSchedule::Immediate.fully_vested_at(), None);
    }

    #[test]
    fn test_linear_curve_with_cliff() {
        let schedule = linear(30, 100, 0);
        let allocation = U256::from(1000u64);

        assert_eq!(schedule.unlocked(allocation, START - 1), U256::ZERO);
        assert_eq!(schedule.unlocked(allocation, START), U256::ZERO);
        assert_eq!(schedule.unlocked(allocation, at_day(29)), U256::ZERO);
        assert_eq!(schedule.unlocked(allocation, at_day(30)), U256::from(300u64));
        assert_eq!(schedule.unlocked(allocation, at_day(40)), U256::from(400u64));
        assert_eq!(schedule.unlocked(allocation, at_day(100)), allocation);
        assert_eq!(schedule.unlocked(allocation, at_day(1000)), allocation);
        assert_eq!(schedule.fully_vested_at(), Some(at_day(100)));
    }

    #[test]
    fn test_linear_initial_unlock() {
        // 25% at start, the other 75% over 100 days with no cliff
        let schedule = linear(0, 100, 2_500);
        let allocation = U256::from(1000u64);

        assert_eq!(schedule.unlocked(allocation, START - 1), U256::ZERO);
        assert_eq!(schedule.unlocked(allocation, START), U256::from(250u64));
        assert_eq!(schedule.unlocked(allocation, at_day(50)), U256::from(625u64));
        assert_eq!(schedule.unlocked(allocation, at_day(100)), allocation);
    }

    #[test]
    fn test_stepped_curve_releases_rounding_remainder_last() {
        let schedule = VestingSchedule::Stepped {
            start: START,
            period_seconds: 30 * DAY,
            periods: 3,
            initial_unlock_bps: 0,
        };
        let allocation = U256::from(1000u64);

        assert_eq!(schedule.unlocked(allocation, START), U256::ZERO);
        assert_eq!(schedule.unlocked(allocation, at_day(29)), U256::ZERO);
        assert_eq!(schedule.unlocked(allocation, at_day(30)), U256::from(333u64));
        assert_eq!(schedule.unlocked(allocation, at_day(60)), U256::from(666u64));
        assert_eq!(schedule.unlocked(allocation, at_day(90)), allocation);
        assert_eq!(schedule.fully_vested_at(), Some(at_day(90)));
    }

    #[test]
    fn test_validate_rejects_degenerate_schedules() {
        assert!(VestingSchedule::Immediate.validate().is_ok());
        assert!(linear(30, 100, 0).validate().is_ok());

        for bad in [
            linear(0, 0, 0),
            linear(101, 100, 0),
            linear(0, 100, 10_001),
            VestingSchedule::Stepped {
                start: START,
                period_seconds: 0,
                periods: 4,
                initial_unlock_bps: 0,
            },
            VestingSchedule::Stepped {
                start: START,
                period_seconds: DAY,
                periods: 0,
                initial_unlock_bps: 0,
            },
        ] {
            assert!(
                matches!(bad.validate(), Err(ErrorCode::InvalidVestingSchedule(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_mul_div_floor_handles_max_amount() {
        assert_eq!(mul_div_floor(U256::MAX, 1, 1), U256::MAX);
        assert_eq!(mul_div_floor(U256::MAX, 0, 7), U256::ZERO);
        assert_eq!(mul_div_floor(U256::MAX, 1, 2), U256::MAX >> 1);
        assert_eq!(mul_div_floor(U256::from(10u64), 1, 3), U256::from(3u64));
    }

    #[test]
    fn test_serde_tagged_representation() {
        let schedule: VestingSchedule = serde_json::from_str(
            r#"{"kind":"linear","start":1700000000,"duration_seconds":8640000}"#,
        )
        .unwrap();
        assert_eq!(schedule, linear(0, 100, 0));

        let immediate: VestingSchedule = serde_json::from_str(r#"{"kind":"immediate"}"#).unwrap();
        assert_eq!(immediate, VestingSchedule::Immediate);
        assert_eq!(VestingSchedule::default(), VestingSchedule::Immediate);
    }

    fn any_schedule() -> impl Strategy<Value = VestingSchedule> {
        prop_oneof![
            Just(VestingSchedule::Immediate),
            (1u64..=1_000_000, 0u16..=10_000).prop_flat_map(|(duration, bps)| {
                (0..=duration).prop_map(move |cliff| VestingSchedule::Linear {
                    start: START,
                    cliff_seconds: cliff,
                    duration_seconds: duration,
                    initial_unlock_bps: bps,
                })
            }),
            (1u64..=100_000, 1u32..=48, 0u16..=10_000).prop_map(|(period, periods, bps)| {
                VestingSchedule::Stepped {
                    start: START,
                    period_seconds: period,
                    periods,
                    initial_unlock_bps: bps,
                }
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_unlocked_is_monotonic_and_bounded(
            schedule in any_schedule(),
            allocation in any::<u128>(),
            t1 in -1_000_000i64..10_000_000,
            dt in 0i64..10_000_000,
        ) {
            let allocation = U256::from(allocation);
            let t1 = START + t1;
            let t2 = t1 + dt;

            let early = schedule.unlocked(allocation, t1);
            let late = schedule.unlocked(allocation, t2);
            prop_assert!(early <= late);
            prop_assert!(late <= allocation);

            if let Some(end) = schedule.fully_vested_at() {
                prop_assert_eq!(schedule.unlocked(allocation, end), allocation);
            }
        }
    }
}
