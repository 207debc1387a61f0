use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tessel_common::{
    hard_fork::{ActivationSchedule, Feature, ForkCondition, HardFork},
    htlc::HtlcParameters,
    network::Network,
    static_assert,
    time::{DurationSeconds, TimestampSeconds},
    transaction::FeeSchedule,
};

// Block rules
// Expected seconds between two blocks, used by block generation helpers
pub const DEFAULT_BLOCK_INTERVAL_SECS: DurationSeconds = 5;

// Chain time of the first block on networks without a fixed genesis
pub const DEFAULT_GENESIS_TIMESTAMP: TimestampSeconds = 1_700_000_000;

// Hard Forks configured
const HARD_FORKS: [HardFork; 3] = [
    HardFork {
        feature: Feature::Htlc,
        condition: ForkCondition::Timestamp(1_735_689_600),
        changelog: "Hashed time-locked contracts",
    },
    HardFork {
        feature: Feature::HtlcExtension,
        condition: ForkCondition::Timestamp(1_751_328_000),
        changelog: "HTLC expiration extension",
    },
    HardFork {
        feature: Feature::MarketFeeSharing,
        condition: ForkCondition::Timestamp(1_767_225_600),
        changelog: "Market fee sharing with registrars and referrers",
    },
];

// Testnet / Stagenet hard forks
const OTHERS_NETWORK_HARD_FORKS: [HardFork; 3] = [
    HardFork {
        feature: Feature::Htlc,
        condition: ForkCondition::Always,
        changelog: "Hashed time-locked contracts",
    },
    HardFork {
        feature: Feature::HtlcExtension,
        condition: ForkCondition::Timestamp(1_704_067_200),
        changelog: "HTLC expiration extension",
    },
    HardFork {
        feature: Feature::MarketFeeSharing,
        condition: ForkCondition::Timestamp(1_719_792_000),
        changelog: "Market fee sharing with registrars and referrers",
    },
];

// Devnet has everything from genesis
const DEVNET_HARD_FORKS: [HardFork; 3] = [
    HardFork {
        feature: Feature::Htlc,
        condition: ForkCondition::Always,
        changelog: "Hashed time-locked contracts",
    },
    HardFork {
        feature: Feature::HtlcExtension,
        condition: ForkCondition::Always,
        changelog: "HTLC expiration extension",
    },
    HardFork {
        feature: Feature::MarketFeeSharing,
        condition: ForkCondition::Always,
        changelog: "Market fee sharing with registrars and referrers",
    },
];

// Get hard forks based on the network
pub const fn get_hard_forks(network: &Network) -> &[HardFork] {
    match network {
        Network::Mainnet => &HARD_FORKS,
        Network::Testnet | Network::Stagenet => &OTHERS_NETWORK_HARD_FORKS,
        Network::Devnet => &DEVNET_HARD_FORKS,
    }
}

/// Everything the ledger needs to know about the chain it runs.
///
/// Gating and limits are read from here only, there is no global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub network: Network,
    pub genesis_timestamp: TimestampSeconds,
    pub block_interval_secs: DurationSeconds,
    pub activations: ActivationSchedule,
    pub htlc: HtlcParameters,
    pub fees: FeeSchedule,
}

// On-disk form, every field but the network falls back to the network preset
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChainConfigFile {
    network: Network,
    #[serde(default)]
    genesis_timestamp: Option<TimestampSeconds>,
    #[serde(default)]
    block_interval_secs: Option<DurationSeconds>,
    #[serde(default)]
    activations: Option<ActivationSchedule>,
    #[serde(default)]
    htlc: Option<HtlcParameters>,
    #[serde(default)]
    fees: Option<FeeSchedule>,
}

impl ChainConfig {
    /// Preset for a network
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            genesis_timestamp: DEFAULT_GENESIS_TIMESTAMP,
            block_interval_secs: DEFAULT_BLOCK_INTERVAL_SECS,
            activations: ActivationSchedule::from_hard_forks(get_hard_forks(&network)),
            htlc: HtlcParameters::default(),
            fees: FeeSchedule::default(),
        }
    }

    pub fn devnet() -> Self {
        Self::for_network(Network::Devnet)
    }

    pub fn with_activations(mut self, activations: ActivationSchedule) -> Self {
        self.activations = activations;
        self
    }

    pub fn with_htlc_parameters(mut self, htlc: HtlcParameters) -> Self {
        self.htlc = htlc;
        self
    }

    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    pub fn with_genesis_timestamp(mut self, genesis_timestamp: TimestampSeconds) -> Self {
        self.genesis_timestamp = genesis_timestamp;
        self
    }

    /// Parse a JSON configuration, missing sections use the network preset
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ChainConfigFile =
            serde_json::from_str(json).context("Error while parsing chain config")?;

        let preset = Self::for_network(file.network);
        let config = Self {
            network: file.network,
            genesis_timestamp: file.genesis_timestamp.unwrap_or(preset.genesis_timestamp),
            block_interval_secs: file.block_interval_secs.unwrap_or(preset.block_interval_secs),
            activations: file.activations.unwrap_or(preset.activations),
            htlc: file.htlc.unwrap_or(preset.htlc),
            fees: file.fees.unwrap_or(preset.fees),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Error while reading chain config {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_interval_secs == 0 {
            anyhow::bail!("Block interval must be at least one second");
        }
        if self.htlc.max_timeout_secs == 0 {
            anyhow::bail!("HTLC max timeout must be at least one second");
        }
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

// Static checks
static_assert!(
    DEFAULT_BLOCK_INTERVAL_SECS > 0,
    "Block interval must be at least one second"
);
