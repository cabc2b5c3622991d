//! Deployment orchestrator
//!
//! Runs the plan strictly in order against a blocking ledger:
//! validate → deploy token → per pool (custody, approve, lock) → instant
//! transfers. The first failure stops the run. Nothing is rolled back; the
//! failure carries the completed prefix.

use crate::error::{DeployError, DeployFailure};
use crate::params::{DeploymentParams, FilledGasParams};
use crate::presets;
use crate::result::{DeployedLockPool, DeploymentProgress, DeploymentResult, DoneTransfer};
use ghx_ledger::Ledger;
use ghx_primitives::{Address, U256};
use ghx_vesting::{InstantTransfer, LockPool, PoolId, VestingArena, VestingEngine};

/// Drives one deployment and keeps its engines for later releases
pub struct Deployer<L: Ledger> {
    ledger: L,
    deployer: Address,
    arena: VestingArena,
    token: Option<Address>,
    gas: FilledGasParams,
}

impl<L: Ledger> Deployer<L> {
    /// Deployer acting as `deployer` on `ledger`
    pub fn new(ledger: L, deployer: Address) -> Self {
        Self {
            ledger,
            deployer,
            arena: VestingArena::new(),
            token: None,
            gas: FilledGasParams::default(),
        }
    }

    /// Run the whole plan. May only succeed once per deployer.
    pub fn deploy(&mut self, params: &DeploymentParams) -> Result<DeploymentResult, DeployFailure> {
        let mut progress = DeploymentProgress::default();
        match self.run(params, &mut progress) {
            Ok(token) => Ok(progress.into_result(token)),
            Err(error) => {
                tracing::error!("Deployment failed: {}", error);
                if !progress.is_empty() {
                    tracing::error!(
                        "Completed before the failure: {}",
                        progress.completed_names().join(", ")
                    );
                }
                Err(DeployFailure {
                    error,
                    completed: progress,
                })
            }
        }
    }

    fn run(
        &mut self,
        params: &DeploymentParams,
        progress: &mut DeploymentProgress,
    ) -> Result<Address, DeployError> {
        if let Some(token) = self.token {
            return Err(DeployError::AlreadyDeployed(token));
        }
        params.validate()?;
        self.gas = params.transaction_params.fill_missing_with_defaults();

        let token = self.deploy_token(params.total_token_supply)?;
        progress.token_address = Some(token);

        for pool in &params.lock_pools {
            let deployed = self.deploy_pool_and_lock(token, pool)?;
            progress.lock_pools.push(deployed);
        }

        for transfer in &params.instant_transfers {
            let done = self.transfer_tokens(token, transfer)?;
            progress.instant_transfers.push(done);
        }

        Ok(token)
    }

    fn deploy_token(&mut self, total_supply: U256) -> Result<Address, DeployError> {
        let deployed = self
            .ledger
            .deploy_token(
                self.deployer,
                &presets::token_metadata(),
                total_supply,
                &self.gas.token_deploy,
            )
            .map_err(DeployError::TokenDeploy)?;
        self.token = Some(deployed.address);
        tracing::info!("Deployed GHX token at {}", deployed.address);
        Ok(deployed.address)
    }

    fn deploy_pool_and_lock(
        &mut self,
        token: Address,
        pool: &LockPool,
    ) -> Result<DeployedLockPool, DeployError> {
        tracing::info!("Deploying \"{}\" lock pool...", pool.name);
        let (mut engine, _) = VestingEngine::deploy(
            &mut self.ledger,
            self.deployer,
            token,
            pool.beneficiary_address,
            &self.gas.locking_contract_deploy,
        )
        .map_err(|source| DeployError::Custody {
            pool_name: pool.name.clone(),
            source,
        })?;
        let custody = engine.custody_address();
        tracing::info!("   - locking contract deployed at {}", custody);

        self.ledger
            .approve(
                token,
                self.deployer,
                custody,
                pool.locked_amount,
                &self.gas.approve_call,
            )
            .map_err(|source| DeployError::Approve {
                pool_name: pool.name.clone(),
                custody,
                source,
            })?;
        tracing::info!("   - tokens approved");

        let now = self.ledger.current_time();
        engine
            .lock(
                &mut self.ledger,
                self.deployer,
                pool.release_schedule,
                pool.locked_amount,
                now,
                &self.gas.lock_tokens_call,
            )
            .map_err(|source| DeployError::Lock {
                pool_name: pool.name.clone(),
                custody,
                source,
            })?;
        tracing::info!("   - tokens locked");

        let pool_id = self.arena.insert(engine);
        Ok(DeployedLockPool {
            name: pool.name.clone(),
            pool_id,
            locking_contract_address: custody,
        })
    }

    fn transfer_tokens(
        &mut self,
        token: Address,
        transfer: &InstantTransfer,
    ) -> Result<DoneTransfer, DeployError> {
        tracing::info!("Doing \"{}\" instant transfer...", transfer.name);
        let receipt = self
            .ledger
            .transfer(
                token,
                self.deployer,
                transfer.beneficiary_address,
                transfer.token_amount,
                &self.gas.transfer_call,
            )
            .map_err(|source| DeployError::Transfer {
                transfer_name: transfer.name.clone(),
                source,
            })?;
        tracing::info!("   - transaction mined, hash: {}", receipt.transaction_hash);
        Ok(DoneTransfer {
            name: transfer.name.clone(),
            transaction_hash: receipt.transaction_hash,
        })
    }

    /// Release whatever `pool` has unlocked at the ledger's current time.
    /// `caller` must be the pool's beneficiary.
    pub fn release(&mut self, pool: PoolId, caller: Address) -> Result<U256, DeployError> {
        let now = self.ledger.current_time();
        let engine = self
            .arena
            .get_mut(pool)
            .ok_or(DeployError::UnknownPool(pool))?;
        engine
            .release(&mut self.ledger, caller, now, &self.gas.transfer_call)
            .map_err(|source| DeployError::Release { pool, source })
    }

    /// Engine of a locked pool
    pub fn engine(&self, pool: PoolId) -> Option<&VestingEngine> {
        self.arena.get(pool)
    }

    /// All engines of this deployment
    pub fn arena(&self) -> &VestingArena {
        &self.arena
    }

    /// Deployed token, once the token step succeeded
    pub fn token_address(&self) -> Option<Address> {
        self.token
    }

    /// Deployer identity
    pub fn deployer_address(&self) -> Address {
        self.deployer
    }

    /// Underlying ledger
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable ledger access, e.g. to advance a simulated clock
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Take the ledger back
    pub fn into_ledger(self) -> L {
        self.ledger
    }
}
