//! Built-in distribution plans

use crate::error::ParamsError;
use crate::params::{DeploymentParams, TransactionParams};
use ghx_primitives::time::{DAY, GREGORIAN_MONTH, GREGORIAN_YEAR, HOUR};
use ghx_ledger::TokenMetadata;
use ghx_primitives::{parse_tokens, Address, Seconds, Timestamp};
use ghx_vesting::{InstantTransfer, LockPool, ReleaseSchedule};

/// Schedule start of the mainnet plan (2020-12-30 23:00:00 UTC)
pub const START_TIME: Timestamp = 1_609_369_200;

/// Token name
pub const TOKEN_NAME: &str = "GamerCoin";

/// Token symbol
pub const TOKEN_SYMBOL: &str = "GHX";

/// Total GHX supply in whole tokens
pub const TOTAL_SUPPLY_TOKENS: u64 = 880_000_000;

/// Token Sale Contributors: `0x0fe9d1CFd4e671A36a64092bc87beFE9952eA672`
const TOKEN_SALE: Address = Address::from_bytes([
    0x0f, 0xe9, 0xd1, 0xcf, 0xd4, 0xe6, 0x71, 0xa3, 0x6a, 0x64, 0x09, 0x2b, 0xc8, 0x7b, 0xef,
    0xe9, 0x95, 0x2e, 0xa6, 0x72,
]);

/// Liquidity Reserve: `0xC429A23072935c3dA626B47B57Abba3699Eab032`
const LIQUIDITY_RESERVE: Address = Address::from_bytes([
    0xc4, 0x29, 0xa2, 0x30, 0x72, 0x93, 0x5c, 0x3d, 0xa6, 0x26, 0xb4, 0x7b, 0x57, 0xab, 0xba,
    0x36, 0x99, 0xea, 0xb0, 0x32,
]);

/// Team: `0xCfC99a10332D4992a9a96485a577F6c6dF77Ea98`
const TEAM: Address = Address::from_bytes([
    0xcf, 0xc9, 0x9a, 0x10, 0x33, 0x2d, 0x49, 0x92, 0xa9, 0xa9, 0x64, 0x85, 0xa5, 0x77, 0xf6,
    0xc6, 0xdf, 0x77, 0xea, 0x98,
]);

/// Community & Game mining: `0x96e5fc4c3B30164c9eAF5a6d8b176973995EC379`
const COMMUNITY: Address = Address::from_bytes([
    0x96, 0xe5, 0xfc, 0x4c, 0x3b, 0x30, 0x16, 0x4c, 0x9e, 0xaf, 0x5a, 0x6d, 0x8b, 0x17, 0x69,
    0x73, 0x99, 0x5e, 0xc3, 0x79,
]);

/// Foundation: `0x72AE2C5A9985b5DAb9a5a6C134763Eb4247F3b6e`
const FOUNDATION: Address = Address::from_bytes([
    0x72, 0xae, 0x2c, 0x5a, 0x99, 0x85, 0xb5, 0xda, 0xb9, 0xa5, 0xa6, 0xc1, 0x34, 0x76, 0x3e,
    0xb4, 0x24, 0x7f, 0x3b, 0x6e,
]);

/// Advisors: `0xDF6B2dDEE4FBACbdb5045327176454963c7f0069`
const ADVISORS: Address = Address::from_bytes([
    0xdf, 0x6b, 0x2d, 0xde, 0xe4, 0xfb, 0xac, 0xbd, 0xb5, 0x04, 0x53, 0x27, 0x17, 0x64, 0x54,
    0x96, 0x3c, 0x7f, 0x00, 0x69,
]);

/// Ecosystem Fund: `0x7B4395Eec8Ac4196Fdd1F9C4d057Afc636deAA79`
const ECOSYSTEM_FUND: Address = Address::from_bytes([
    0x7b, 0x43, 0x95, 0xee, 0xc8, 0xac, 0x41, 0x96, 0xfd, 0xd1, 0xf9, 0xc4, 0xd0, 0x57, 0xaf,
    0xc6, 0x36, 0xde, 0xaa, 0x79,
]);

/// Marketing: `0x577584EeBF32F0863202b5166c2Bb9738e1A3601`
const MARKETING: Address = Address::from_bytes([
    0x57, 0x75, 0x84, 0xee, 0xbf, 0x32, 0xf0, 0x86, 0x32, 0x02, 0xb5, 0x16, 0x6c, 0x2b, 0xb9,
    0x73, 0x8e, 0x1a, 0x36, 0x01,
]);

/// Strategic partnership: `0xb1a17849627480eb750CbF9A75798C0036308c9F`
const STRATEGIC_PARTNERSHIP: Address = Address::from_bytes([
    0xb1, 0xa1, 0x78, 0x49, 0x62, 0x74, 0x80, 0xeb, 0x75, 0x0c, 0xbf, 0x9a, 0x75, 0x79, 0x8c,
    0x00, 0x36, 0x30, 0x8c, 0x9f,
]);

/// One lock pool of a plan, amounts in whole tokens
struct PoolRow {
    name: &'static str,
    beneficiary: Address,
    locked: u64,
    cliff: Seconds,
    cliff_tokens: u64,
    steps: u64,
    step: Seconds,
    step_tokens: u64,
}

impl PoolRow {
    fn into_pool(self, start_time: Timestamp) -> LockPool {
        LockPool {
            name: self.name.to_string(),
            locked_amount: parse_tokens(self.locked),
            beneficiary_address: self.beneficiary,
            release_schedule: ReleaseSchedule {
                start_time,
                cliff_duration: self.cliff,
                cliff_amount: parse_tokens(self.cliff_tokens),
                num_steps: self.steps,
                step_duration: self.step,
                step_amount: parse_tokens(self.step_tokens),
            },
        }
    }
}

fn transfer(name: &str, beneficiary: Address, tokens: u64) -> InstantTransfer {
    InstantTransfer {
        name: name.to_string(),
        beneficiary_address: beneficiary,
        token_amount: parse_tokens(tokens),
    }
}

fn instant_transfers() -> Vec<InstantTransfer> {
    vec![
        transfer("Token Sale Contributors", TOKEN_SALE, 322_080_000),
        transfer("Liquidity Reserve", LIQUIDITY_RESERVE, 38_720_000),
    ]
}

/// Name and symbol of the GHX token
pub fn token_metadata() -> TokenMetadata {
    TokenMetadata::new(TOKEN_NAME, TOKEN_SYMBOL)
}

/// Mainnet distribution: seven pools starting at [`START_TIME`] and two
/// instant transfers
pub fn mainnet() -> DeploymentParams {
    let rows = vec![
        PoolRow {
            name: "Team",
            beneficiary: TEAM,
            locked: 132_000_000,
            cliff: GREGORIAN_YEAR,
            cliff_tokens: 13_200_000,
            steps: 18,
            step: GREGORIAN_MONTH,
            step_tokens: 6_600_000,
        },
        PoolRow {
            name: "Community & Game mining",
            beneficiary: COMMUNITY,
            locked: 44_000_000,
            cliff: 30 * DAY,
            cliff_tokens: 1_760_000,
            steps: 32,
            step: GREGORIAN_MONTH,
            step_tokens: 1_320_000,
        },
        PoolRow {
            name: "Foundation",
            beneficiary: FOUNDATION,
            locked: 123_200_000,
            cliff: GREGORIAN_YEAR,
            cliff_tokens: 30_800_000,
            steps: 3,
            step: GREGORIAN_YEAR,
            step_tokens: 30_800_000,
        },
        PoolRow {
            name: "Advisors",
            beneficiary: ADVISORS,
            locked: 35_200_000,
            cliff: 90 * DAY,
            cliff_tokens: 8_800_000,
            steps: 3,
            step: 3 * GREGORIAN_MONTH,
            step_tokens: 8_800_000,
        },
        PoolRow {
            name: "Ecosystem Fund",
            beneficiary: ECOSYSTEM_FUND,
            locked: 105_600_000,
            cliff: 30 * DAY,
            cliff_tokens: 10_560_000,
            steps: 5,
            step: GREGORIAN_YEAR,
            step_tokens: 19_008_000,
        },
        PoolRow {
            name: "Marketing",
            beneficiary: MARKETING,
            locked: 35_200_000,
            cliff: 90 * DAY,
            cliff_tokens: 8_800_000,
            steps: 3,
            step: 3 * GREGORIAN_MONTH,
            step_tokens: 8_800_000,
        },
        PoolRow {
            name: "Strategic partnership",
            beneficiary: STRATEGIC_PARTNERSHIP,
            locked: 44_000_000,
            cliff: 2 * GREGORIAN_YEAR,
            cliff_tokens: 22_000_000,
            steps: 1,
            step: GREGORIAN_YEAR,
            step_tokens: 22_000_000,
        },
    ];

    DeploymentParams {
        total_token_supply: parse_tokens(TOTAL_SUPPLY_TOKENS),
        lock_pools: rows.into_iter().map(|row| row.into_pool(START_TIME)).collect(),
        instant_transfers: instant_transfers(),
        transaction_params: TransactionParams::default(),
    }
}

/// Testnet distribution: six pools with a 12 hour cliff and two 6 hour
/// steps, all starting at `start_time`
pub fn testnet(start_time: Timestamp) -> DeploymentParams {
    // Half of each pool unlocks at the cliff, a quarter at each step
    let pools = [
        ("Team", TEAM, 132_000_000),
        ("Ecosystem Fund", ECOSYSTEM_FUND, 105_600_000),
        ("Foundation", FOUNDATION, 123_200_000),
        ("Marketing and Strategic partnership", MARKETING, 79_200_000),
        ("Community & Game mining", COMMUNITY, 44_000_000),
        ("Advisors", ADVISORS, 35_200_000),
    ];
    let lock_pools = pools
        .into_iter()
        .map(|(name, beneficiary, locked)| {
            PoolRow {
                name,
                beneficiary,
                locked,
                cliff: 12 * HOUR,
                cliff_tokens: locked / 2,
                steps: 2,
                step: 6 * HOUR,
                step_tokens: locked / 4,
            }
            .into_pool(start_time)
        })
        .collect();

    DeploymentParams {
        total_token_supply: parse_tokens(TOTAL_SUPPLY_TOKENS),
        lock_pools,
        instant_transfers: instant_transfers(),
        transaction_params: TransactionParams::default(),
    }
}

/// Preset by name. The testnet plan starts at `now`.
pub fn preset(name: &str, now: Timestamp) -> Result<DeploymentParams, ParamsError> {
    match name {
        "mainnet" => Ok(mainnet()),
        "testnet" => Ok(testnet(now)),
        other => Err(ParamsError::UnknownPreset(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_is_consistent() {
        let params = mainnet();
        assert!(params.validate().is_ok());
        assert_eq!(params.lock_pools.len(), 7);
        assert_eq!(
            params.total_locked() + params.total_instant(),
            params.total_token_supply
        );
        assert_eq!(params.earliest_start_time(), Some(START_TIME));
    }

    #[test]
    fn test_testnet_is_consistent() {
        let params = testnet(1_700_000_000);
        assert!(params.validate().is_ok());
        assert_eq!(params.lock_pools.len(), 6);
        assert_eq!(params.earliest_start_time(), Some(1_700_000_000));
    }

    #[test]
    fn test_beneficiary_addresses() {
        let params = mainnet();
        let team = params.pool("Team").unwrap();
        assert_eq!(
            team.beneficiary_address,
            Address::from_hex("0xCfC99a10332D4992a9a96485a577F6c6dF77Ea98").unwrap()
        );
        let partnership = params.pool("Strategic partnership").unwrap();
        assert_eq!(
            partnership.beneficiary_address,
            Address::from_hex("0xb1a17849627480eb750CbF9A75798C0036308c9F").unwrap()
        );
        assert_eq!(
            params.instant_transfers[0].beneficiary_address,
            Address::from_hex("0x0fe9d1CFd4e671A36a64092bc87beFE9952eA672").unwrap()
        );
    }

    #[test]
    fn test_testnet_splits_half_then_quarters() {
        let params = testnet(1_700_000_000);
        let team = params.pool("Team").unwrap();
        let schedule = &team.release_schedule;
        assert_eq!(schedule.cliff_amount, parse_tokens(66_000_000));
        assert_eq!(schedule.step_amount, parse_tokens(33_000_000));
        assert_eq!(schedule.cliff_duration, 12 * HOUR);
        assert_eq!(schedule.step_duration, 6 * HOUR);
    }

    #[test]
    fn test_mainnet_team_schedule() {
        let params = mainnet();
        let schedule = &params.pool("Team").unwrap().release_schedule;
        assert_eq!(schedule.start_time, START_TIME);
        assert_eq!(schedule.cliff_duration, GREGORIAN_YEAR);
        assert_eq!(schedule.num_steps, 18);
        assert_eq!(schedule.step_amount, parse_tokens(6_600_000));
    }

    #[test]
    fn test_token_metadata() {
        assert_eq!(token_metadata(), TokenMetadata::new("GamerCoin", "GHX"));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            preset("devnet", 0),
            Err(ParamsError::UnknownPreset(name)) if name == "devnet"
        ));
    }
}
