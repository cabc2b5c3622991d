//! Release schedule: a cliff followed by equal periodic steps

use ghx_primitives::{serde_amount, Seconds, Timestamp, U256};
use serde::{Deserialize, Serialize};

/// Cliff-and-steps release schedule. Immutable once locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSchedule {
    /// Schedule start (seconds since epoch)
    pub start_time: Timestamp,
    /// Seconds from start until the cliff unlocks
    pub cliff_duration: Seconds,
    /// Amount unlocked at the cliff
    #[serde(with = "serde_amount")]
    pub cliff_amount: U256,
    /// Number of steps after the cliff
    pub num_steps: u64,
    /// Seconds between steps
    pub step_duration: Seconds,
    /// Amount unlocked per step
    #[serde(with = "serde_amount")]
    pub step_amount: U256,
}

impl ReleaseSchedule {
    /// `cliff_amount + step_amount * num_steps`, or `None` on overflow
    pub fn total_scheduled(&self) -> Option<U256> {
        self.step_amount
            .checked_mul(U256::from(self.num_steps))?
            .checked_add(self.cliff_amount)
    }

    /// Cliff unlock time, or `None` on overflow
    pub fn cliff_end(&self) -> Option<Timestamp> {
        self.start_time.checked_add(self.cliff_duration)
    }

    /// Unlock time of step `n` (not range-checked), or `None` on overflow
    pub fn step_end(&self, n: u64) -> Option<Timestamp> {
        self.cliff_end()?
            .checked_add(self.step_duration.checked_mul(n)?)
    }

    /// Unlock time of the last step, or `None` on overflow
    pub fn final_unlock_time(&self) -> Option<Timestamp> {
        self.step_end(self.num_steps)
    }

    /// Steps fully elapsed at `now`, clamped to `num_steps`. Zero before the
    /// cliff.
    pub fn elapsed_steps(&self, now: Timestamp) -> u64 {
        let cliff_end = self.cliff_end().unwrap_or(Timestamp::MAX);
        if now < cliff_end {
            return 0;
        }
        if self.step_duration == 0 {
            return self.num_steps;
        }
        ((now - cliff_end) / self.step_duration).min(self.num_steps)
    }

    /// Cumulative amount unlocked at `now`
    pub fn unlocked_at(&self, now: Timestamp) -> U256 {
        let cliff_end = self.cliff_end().unwrap_or(Timestamp::MAX);
        if now < cliff_end {
            return U256::zero();
        }
        let steps = U256::from(self.elapsed_steps(now));
        self.cliff_amount
            .saturating_add(self.step_amount.saturating_mul(steps))
    }

    /// Number of unlock points: the cliff plus every step
    pub fn unlock_count(&self) -> u128 {
        u128::from(self.num_steps) + 1
    }

    /// Unlock timeline: the cliff followed by every step, computed lazily.
    /// Ends early if an unlock time overflows.
    pub fn timeline(&self) -> Timeline {
        Timeline {
            schedule: *self,
            next: Some(0),
        }
    }
}

/// Iterator over the unlock points of a [`ReleaseSchedule`]
#[derive(Clone, Debug)]
pub struct Timeline {
    schedule: ReleaseSchedule,
    next: Option<u64>,
}

impl Iterator for Timeline {
    type Item = UnlockEvent;

    fn next(&mut self) -> Option<UnlockEvent> {
        let step = self.next?;
        let s = &self.schedule;
        let event = if step == 0 {
            s.cliff_end().map(|unlock_time| UnlockEvent {
                step,
                unlock_time,
                amount: s.cliff_amount,
                cumulative: s.cliff_amount,
            })
        } else {
            s.step_end(step).map(|unlock_time| UnlockEvent {
                step,
                unlock_time,
                amount: s.step_amount,
                cumulative: s
                    .cliff_amount
                    .saturating_add(s.step_amount.saturating_mul(U256::from(step))),
            })
        };

        self.next = match event {
            Some(_) if step < s.num_steps => Some(step + 1),
            _ => None,
        };
        event
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(step) => {
                let left = (self.schedule.num_steps - step).checked_add(1);
                (0, left.and_then(|n| usize::try_from(n).ok()))
            }
        }
    }
}

/// One point of the unlock timeline. Step 0 is the cliff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockEvent {
    /// Step number, 0 for the cliff
    pub step: u64,
    /// Unlock time
    pub unlock_time: Timestamp,
    /// Amount unlocked at this point
    #[serde(with = "serde_amount")]
    pub amount: U256,
    /// Total unlocked including this point
    #[serde(with = "serde_amount")]
    pub cumulative: U256,
}
