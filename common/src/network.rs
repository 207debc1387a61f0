use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Network {
    // Production network
    #[default]
    Mainnet,
    // Public test network
    Testnet,
    // Pre-release network, mirrors the testnet activation schedule
    Stagenet,
    // Local development network, everything active from genesis
    Devnet,
}
