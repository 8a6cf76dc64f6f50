use std::fmt;

/// Networks an address may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
    Simnet,
    Regnet,
}

impl Network {
    pub fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet3",
            Self::Simnet => "simnet",
            Self::Regnet => "regnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Network parameters threaded through address construction.
///
/// Script handling never inspects these beyond tagging the produced
/// addresses with the network they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    pub network: Network,
    /// Human readable name of the network.
    pub name: &'static str,
}

impl ChainParams {
    /// Constructs a new instance of [`ChainParams`].
    pub fn new(network: Network) -> Self {
        Self {
            network,
            name: network.name(),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(Network::Mainnet)
    }

    pub fn testnet() -> Self {
        Self::new(Network::Testnet)
    }

    pub fn simnet() -> Self {
        Self::new(Network::Simnet)
    }

    pub fn regnet() -> Self {
        Self::new(Network::Regnet)
    }
}
