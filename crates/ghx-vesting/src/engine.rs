//! Per-pool vesting state machine
//!
//! `Unlocked` → `Locked` → `FullyReleased`. The engine owns its release
//! counter; only [`VestingEngine::release`] advances it. Time is always an
//! argument, taken from the ledger's clock by the caller.

use crate::error::{CustodyError, LockError, QueryError, ReleaseError};
use crate::event::VestingEvent;
use crate::schedule::ReleaseSchedule;
use ghx_ledger::{GasParams, Ledger, TxReceipt};
use ghx_primitives::{Address, Timestamp, U256};

/// Lifecycle phase of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Created, nothing in custody
    Unlocked,
    /// Tokens in custody, some still unreleased
    Locked,
    /// Every locked token has been released (terminal)
    FullyReleased,
}

/// Lock state. Created with the engine, never deleted.
#[derive(Clone, Debug)]
struct VestingState {
    owner: Address,
    beneficiary: Address,
    total_locked: U256,
    released: U256,
    /// Set once by `lock`, never cleared
    schedule: Option<ReleaseSchedule>,
}

/// Custody and release logic for one lock pool
#[derive(Clone, Debug)]
pub struct VestingEngine {
    token: Address,
    custody: Address,
    state: VestingState,
    events: Vec<VestingEvent>,
}

impl VestingEngine {
    /// Engine over an existing custody account
    pub fn new(
        token: Address,
        custody: Address,
        owner: Address,
        beneficiary: Address,
    ) -> Result<Self, CustodyError> {
        if token.is_zero() {
            return Err(CustodyError::ZeroToken);
        }
        if beneficiary.is_zero() {
            return Err(CustodyError::ZeroBeneficiary);
        }
        Ok(Self {
            token,
            custody,
            state: VestingState {
                owner,
                beneficiary,
                total_locked: U256::zero(),
                released: U256::zero(),
                schedule: None,
            },
            events: Vec::new(),
        })
    }

    /// Create a custody account on the ledger and an engine over it
    pub fn deploy<L: Ledger + ?Sized>(
        ledger: &mut L,
        owner: Address,
        token: Address,
        beneficiary: Address,
        gas: &GasParams,
    ) -> Result<(Self, TxReceipt), CustodyError> {
        if token.is_zero() {
            return Err(CustodyError::ZeroToken);
        }
        if beneficiary.is_zero() {
            return Err(CustodyError::ZeroBeneficiary);
        }
        let deployed = ledger.create_custody(owner, token, beneficiary, gas)?;
        let engine = Self::new(token, deployed.address, owner, beneficiary)?;
        Ok((engine, deployed.receipt))
    }

    /// Lock `locked_amount` under `schedule`.
    ///
    /// Only the owner may call this, and only once. The owner must have
    /// approved the custody address for `locked_amount`; the tokens are
    /// pulled with `transfer_from`. On any error the engine is unchanged.
    pub fn lock<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        schedule: ReleaseSchedule,
        locked_amount: U256,
        now: Timestamp,
        gas: &GasParams,
    ) -> Result<TxReceipt, LockError> {
        if caller != self.state.owner {
            return Err(LockError::CallerNotOwner);
        }
        if self.is_locked() {
            return Err(LockError::AlreadyLocked);
        }
        check_schedule(&schedule, locked_amount, now)?;

        let receipt = ledger.transfer_from(
            self.token,
            self.custody,
            self.state.owner,
            self.custody,
            locked_amount,
            gas,
        )?;

        self.state.total_locked = locked_amount;
        self.state.schedule = Some(schedule);
        self.events.push(VestingEvent::TokensLocked {
            amount: locked_amount,
            schedule,
        });
        tracing::info!(
            "Locked {} tokens in custody {} for {}",
            locked_amount,
            self.custody,
            self.state.beneficiary
        );
        Ok(receipt)
    }

    /// Release everything unlocked and not yet released at `now`.
    ///
    /// Skipped steps are paid out together in a single transfer. Only the
    /// beneficiary may call this.
    pub fn release<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        now: Timestamp,
        gas: &GasParams,
    ) -> Result<U256, ReleaseError> {
        if caller != self.state.beneficiary {
            return Err(ReleaseError::CallerNotBeneficiary);
        }
        let Some(schedule) = self.state.schedule else {
            return Err(ReleaseError::NotLockedYet);
        };
        if self.state.released == self.state.total_locked {
            return Err(ReleaseError::AllTokensReleased);
        }

        let amount = self.releasable_amount(now);
        if amount.is_zero() {
            let before_cliff = schedule.cliff_end().map_or(true, |end| now < end);
            return Err(if before_cliff {
                ReleaseError::BeforeCliffEnd
            } else {
                ReleaseError::BeforeCurrentStepEnd
            });
        }

        // Counter moves only after the ledger confirmed the transfer
        ledger.transfer(
            self.token,
            self.custody,
            self.state.beneficiary,
            amount,
            gas,
        )?;
        self.state.released += amount;
        self.events.push(VestingEvent::TokensReleased { amount });
        tracing::info!(
            "Released {} tokens from custody {} to {}",
            amount,
            self.custody,
            self.state.beneficiary
        );
        Ok(amount)
    }

    /// Cumulative amount unlocked at `now` (0 before locking)
    pub fn unlocked_amount(&self, now: Timestamp) -> U256 {
        match &self.state.schedule {
            Some(schedule) => schedule.unlocked_at(now).min(self.state.total_locked),
            None => U256::zero(),
        }
    }

    /// Unlocked but not yet released at `now` (0 before locking)
    pub fn releasable_amount(&self, now: Timestamp) -> U256 {
        self.unlocked_amount(now)
            .saturating_sub(self.state.released)
    }

    /// Amount locked (0 before locking). Unaffected by releases.
    pub fn total_amount(&self) -> U256 {
        self.state.total_locked
    }

    /// Amount released so far
    pub fn released_amount(&self) -> U256 {
        self.state.released
    }

    /// Cliff unlock time (`None` before locking)
    pub fn cliff_unlock_time(&self) -> Option<Timestamp> {
        self.state.schedule.as_ref().and_then(ReleaseSchedule::cliff_end)
    }

    /// Unlock time of step `step`, `1..=num_steps` (`Ok(None)` before locking)
    pub fn step_unlock_time(&self, step: u64) -> Result<Option<Timestamp>, QueryError> {
        let Some(schedule) = &self.state.schedule else {
            return Ok(None);
        };
        if step == 0 || step > schedule.num_steps {
            return Err(QueryError::InvalidStepNumber {
                step,
                num_steps: schedule.num_steps,
            });
        }
        Ok(schedule.step_end(step))
    }

    /// Smallest unlock time `>= now`. Once every step has passed this stays
    /// at the last step's unlock time. `None` before locking.
    pub fn next_unlock_time(&self, now: Timestamp) -> Option<Timestamp> {
        let schedule = self.state.schedule.as_ref()?;
        let cliff_end = schedule.cliff_end()?;
        if now <= cliff_end || schedule.step_duration == 0 {
            return Some(cliff_end);
        }
        let since_cliff = now - cliff_end;
        let step = since_cliff.div_ceil(schedule.step_duration).min(schedule.num_steps);
        schedule.step_end(step)
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        if !self.is_locked() {
            Phase::Unlocked
        } else if self.state.released == self.state.total_locked {
            Phase::FullyReleased
        } else {
            Phase::Locked
        }
    }

    /// Whether `lock` has succeeded
    pub fn is_locked(&self) -> bool {
        self.state.schedule.is_some()
    }

    /// Schedule recorded at lock time
    pub fn schedule(&self) -> Option<&ReleaseSchedule> {
        self.state.schedule.as_ref()
    }

    /// Token held in custody
    pub fn token(&self) -> Address {
        self.token
    }

    /// Custody account address
    pub fn custody_address(&self) -> Address {
        self.custody
    }

    /// Identity allowed to lock
    pub fn owner(&self) -> Address {
        self.state.owner
    }

    /// Identity allowed to release
    pub fn beneficiary(&self) -> Address {
        self.state.beneficiary
    }

    /// Events emitted so far, oldest first
    pub fn events(&self) -> &[VestingEvent] {
        &self.events
    }
}

/// Lock-time checks, first failure wins
fn check_schedule(
    schedule: &ReleaseSchedule,
    locked_amount: U256,
    now: Timestamp,
) -> Result<(), LockError> {
    if schedule.cliff_duration == 0 {
        return Err(LockError::ZeroCliffDuration);
    }
    if schedule.cliff_amount.is_zero() {
        return Err(LockError::ZeroCliffAmount);
    }
    if schedule.num_steps == 0 {
        return Err(LockError::ZeroNumSteps);
    }
    if schedule.step_duration == 0 {
        return Err(LockError::ZeroStepDuration);
    }
    if schedule.step_amount.is_zero() {
        return Err(LockError::ZeroStepAmount);
    }
    if let Some(cliff_end) = schedule.cliff_end() {
        if cliff_end < now {
            return Err(LockError::CliffEndInPast);
        }
    }
    if schedule.total_scheduled() != Some(locked_amount) {
        return Err(LockError::ScheduleAmountMismatch {
            locked: locked_amount,
        });
    }
    if schedule.final_unlock_time().is_none() {
        return Err(LockError::ScheduleTimeOverflow);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> ReleaseSchedule {
        ReleaseSchedule {
            start_time: 100,
            cliff_duration: 50,
            cliff_amount: U256::from(4u64),
            num_steps: 3,
            step_duration: 10,
            step_amount: U256::from(2u64),
        }
    }

    #[test]
    fn test_zero_checks_are_independent() {
        let amount = U256::from(10u64);
        let s = ReleaseSchedule { cliff_duration: 0, ..schedule() };
        assert_eq!(check_schedule(&s, amount, 0), Err(LockError::ZeroCliffDuration));
        let s = ReleaseSchedule { step_amount: U256::zero(), ..schedule() };
        assert_eq!(check_schedule(&s, amount, 0), Err(LockError::ZeroStepAmount));
        let s = ReleaseSchedule { num_steps: 0, step_duration: 0, ..schedule() };
        assert_eq!(check_schedule(&s, amount, 0), Err(LockError::ZeroNumSteps));
    }

    #[test]
    fn test_cliff_end_boundary() {
        let amount = U256::from(10u64);
        assert_eq!(check_schedule(&schedule(), amount, 150), Ok(()));
        assert_eq!(check_schedule(&schedule(), amount, 151), Err(LockError::CliffEndInPast));
    }

    #[test]
    fn test_mismatch_and_time_overflow_guards() {
        assert_eq!(
            check_schedule(&schedule(), U256::from(9u64), 0),
            Err(LockError::ScheduleAmountMismatch { locked: U256::from(9u64) })
        );
        let s = ReleaseSchedule {
            start_time: u64::MAX - 60,
            ..schedule()
        };
        assert_eq!(
            check_schedule(&s, U256::from(10u64), 0),
            Err(LockError::ScheduleTimeOverflow)
        );
    }

    #[test]
    fn test_unlocked_engine_queries() {
        let engine = VestingEngine::new(
            Address::from_bytes([1; 20]),
            Address::from_bytes([2; 20]),
            Address::from_bytes([3; 20]),
            Address::from_bytes([4; 20]),
        )
        .unwrap();
        assert_eq!(engine.phase(), Phase::Unlocked);
        assert_eq!(engine.total_amount(), U256::zero());
        assert_eq!(engine.releasable_amount(u64::MAX), U256::zero());
        assert_eq!(engine.cliff_unlock_time(), None);
        assert_eq!(engine.step_unlock_time(1), Ok(None));
        assert_eq!(engine.next_unlock_time(0), None);
    }

    #[test]
    fn test_new_rejects_zero_addresses() {
        let a = Address::from_bytes([1; 20]);
        assert_eq!(
            VestingEngine::new(Address::ZERO, a, a, a).unwrap_err(),
            CustodyError::ZeroToken
        );
        assert_eq!(
            VestingEngine::new(a, a, a, Address::ZERO).unwrap_err(),
            CustodyError::ZeroBeneficiary
        );
    }
}
