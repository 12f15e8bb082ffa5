//! Acryl network (chain id) types.

use core::fmt;
use core::hash::{Hash, Hasher};

/// Supported Acryl networks, identified by the chain id byte embedded in
/// every address.
///
/// Equality and hashing go by chain id, so `Custom(b'A')` is `Mainnet`.
#[derive(Debug, Clone, Copy, Default)]
pub enum Network {
    /// Acryl mainnet (`'A'`).
    #[default]
    Mainnet,
    /// Acryl testnet (`'K'`).
    Testnet,
    /// Any other chain id, e.g. a private network.
    Custom(u8),
}

impl Network {
    /// Chain id byte for this network.
    #[inline]
    #[must_use]
    pub const fn chain_id(self) -> u8 {
        match self {
            Self::Mainnet => b'A',
            Self::Testnet => b'K',
            Self::Custom(id) => id,
        }
    }

    /// Map a chain id byte back to a network.
    #[must_use]
    pub const fn from_chain_id(id: u8) -> Self {
        match id {
            b'A' => Self::Mainnet,
            b'K' => Self::Testnet,
            other => Self::Custom(other),
        }
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Custom(_) => "custom",
        }
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id() == other.chain_id()
    }
}

impl Eq for Network {}

impl Hash for Network {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id().hash(state);
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(id) => write!(f, "custom ({})", char::from(*id)),
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_ids() {
        assert_eq!(Network::Mainnet.chain_id(), b'A');
        assert_eq!(Network::Testnet.chain_id(), b'K');
        assert_eq!(Network::Custom(b'T').chain_id(), b'T');
    }

    #[test]
    fn test_from_chain_id_roundtrip() {
        for network in [Network::Mainnet, Network::Testnet, Network::Custom(b'S')] {
            assert_eq!(Network::from_chain_id(network.chain_id()), network);
        }
    }

    #[test]
    fn test_custom_with_known_chain_id_is_same_network() {
        assert_eq!(Network::Custom(b'A'), Network::Mainnet);
        assert_eq!(Network::Custom(b'K'), Network::Testnet);
        assert_ne!(Network::Custom(b'S'), Network::Mainnet);

        let set: std::collections::HashSet<_> = [Network::Mainnet, Network::Custom(b'A')].into();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
        assert_eq!(Network::Custom(b'S').to_string(), "custom (S)");
    }
}
