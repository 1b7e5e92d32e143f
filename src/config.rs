use serde::{Deserialize, Serialize};

use crate::calc::CommunityId;

/// Output encoding of the 20-byte digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Standard base64 alphabet with padding (28 characters).
    #[default]
    Base64,

    /// Lowercase hexadecimal (40 characters).
    Hex,
}

/// Configuration for a [`CommunityId`] calculator.
///
/// Meant to be embedded in the configuration of whatever component observes the flows, e.g.
///
/// ```toml
/// seed = 1
/// encoding = "hex"
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct CommunityIdConfig {
    /// Seed mixed into every digest.
    ///
    /// Operators can pick a non-zero seed to keep their IDs distinct from those of other
    /// deployments. Every party that needs to correlate flows must use the same seed.
    pub seed: u16,

    /// How the digest is rendered after the `1:` version prefix.
    pub encoding: Encoding,
}

impl CommunityIdConfig {
    pub const fn build(&self) -> CommunityId {
        CommunityId::with_encoding(self.seed, self.encoding)
    }
}

impl From<&CommunityIdConfig> for CommunityId {
    fn from(config: &CommunityIdConfig) -> Self {
        config.build()
    }
}

impl From<CommunityIdConfig> for CommunityId {
    fn from(config: CommunityIdConfig) -> Self {
        config.build()
    }
}
