//! Destination identities recovered from and encoded into standard scripts.

use crate::chain_params::{ChainParams, Network};
use crate::constants::{ED25519_PUBKEY_SIZE, HASH160_SIZE};
use crate::opcodes::{OP_0, as_small_int, is_small_int};
use bitcoin::secp256k1::PublicKey;

/// Signature algorithms selectable by the alternative signature opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignatureScheme {
    EcdsaSecp256k1 = 0,
    Ed25519 = 1,
    SchnorrSecp256k1 = 2,
}

impl SignatureScheme {
    /// Decodes the scheme from its numeric value.
    pub fn from_value(value: usize) -> Option<Self> {
        match value {
            0 => Some(Self::EcdsaSecp256k1),
            1 => Some(Self::Ed25519),
            2 => Some(Self::SchnorrSecp256k1),
            _ => None,
        }
    }

    /// Decodes the scheme tag of an alternative signature script.
    ///
    /// Only the two alternative schemes are valid tags, `OP_0` never selects
    /// ECDSA in a script.
    pub fn from_tag_opcode(op: u8) -> Option<Self> {
        if !is_small_int(op) {
            return None;
        }
        Self::from_value(as_small_int(op)).filter(|scheme| scheme.is_alt())
    }

    /// Returns the small integer opcode pushing this scheme's value.
    pub fn tag_opcode(self) -> u8 {
        match self {
            Self::EcdsaSecp256k1 => OP_0,
            scheme => crate::opcodes::OP_1 - 1 + scheme as u8,
        }
    }

    /// Whether the scheme is checked by `OP_CHECKSIGALT` rather than
    /// `OP_CHECKSIG`.
    pub fn is_alt(self) -> bool {
        self != Self::EcdsaSecp256k1
    }
}

/// Address construction error.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum AddressError {
    #[error("hash must be {HASH160_SIZE} bytes, got {0}")]
    InvalidHashLength(usize),
    #[error("invalid secp256k1 public key: {0}")]
    InvalidSecp256k1Key(bitcoin::secp256k1::Error),
    #[error("ed25519 public key must be {ED25519_PUBKEY_SIZE} bytes, got {0}")]
    InvalidEd25519KeyLength(usize),
}

/// A payment destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    PubKeyHash {
        hash: [u8; 20],
        scheme: SignatureScheme,
        network: Network,
    },
    ScriptHash {
        hash: [u8; 20],
        network: Network,
    },
    PubKeySecp256k1 {
        key: PublicKey,
        network: Network,
    },
    PubKeyEd25519 {
        key: [u8; 32],
        network: Network,
    },
    PubKeySchnorrSecp256k1 {
        key: PublicKey,
        network: Network,
    },
}

impl Address {
    /// Constructs a pay-to-pubkey-hash address for the given signature scheme.
    pub fn pubkey_hash(
        hash: &[u8],
        params: &ChainParams,
        scheme: SignatureScheme,
    ) -> Result<Self, AddressError> {
        Ok(Self::PubKeyHash {
            hash: hash160(hash)?,
            scheme,
            network: params.network,
        })
    }

    /// Constructs a pay-to-script-hash address from an already computed hash.
    pub fn script_hash_from_hash(hash: &[u8], params: &ChainParams) -> Result<Self, AddressError> {
        Ok(Self::ScriptHash {
            hash: hash160(hash)?,
            network: params.network,
        })
    }

    /// Parses a compressed or uncompressed secp256k1 public key.
    pub fn secp256k1_pubkey(serialized: &[u8], params: &ChainParams) -> Result<Self, AddressError> {
        let key = PublicKey::from_slice(serialized).map_err(AddressError::InvalidSecp256k1Key)?;
        Ok(Self::from_secp256k1_key(key, params))
    }

    pub fn from_secp256k1_key(key: PublicKey, params: &ChainParams) -> Self {
        Self::PubKeySecp256k1 {
            key,
            network: params.network,
        }
    }

    /// Only the length of an Ed25519 key is validated.
    pub fn ed25519_pubkey(serialized: &[u8], params: &ChainParams) -> Result<Self, AddressError> {
        let key: [u8; 32] = serialized
            .try_into()
            .map_err(|_| AddressError::InvalidEd25519KeyLength(serialized.len()))?;
        Ok(Self::PubKeyEd25519 {
            key,
            network: params.network,
        })
    }

    pub fn schnorr_secp256k1_pubkey(
        serialized: &[u8],
        params: &ChainParams,
    ) -> Result<Self, AddressError> {
        let key = PublicKey::from_slice(serialized).map_err(AddressError::InvalidSecp256k1Key)?;
        Ok(Self::PubKeySchnorrSecp256k1 {
            key,
            network: params.network,
        })
    }

    /// Returns the bytes a script commits to when paying this address.
    ///
    /// Secp256k1 keys are always serialized in compressed form.
    pub fn script_address(&self) -> Vec<u8> {
        match self {
            Self::PubKeyHash { hash, .. } | Self::ScriptHash { hash, .. } => hash.to_vec(),
            Self::PubKeySecp256k1 { key, .. } | Self::PubKeySchnorrSecp256k1 { key, .. } => {
                key.serialize().to_vec()
            }
            Self::PubKeyEd25519 { key, .. } => key.to_vec(),
        }
    }

    /// Returns the signature scheme required to spend from this address,
    /// `None` for script hashes.
    pub fn scheme(&self) -> Option<SignatureScheme> {
        match self {
            Self::PubKeyHash { scheme, .. } => Some(*scheme),
            Self::ScriptHash { .. } => None,
            Self::PubKeySecp256k1 { .. } => Some(SignatureScheme::EcdsaSecp256k1),
            Self::PubKeyEd25519 { .. } => Some(SignatureScheme::Ed25519),
            Self::PubKeySchnorrSecp256k1 { .. } => Some(SignatureScheme::SchnorrSecp256k1),
        }
    }

    pub fn network(&self) -> Network {
        match self {
            Self::PubKeyHash { network, .. }
            | Self::ScriptHash { network, .. }
            | Self::PubKeySecp256k1 { network, .. }
            | Self::PubKeyEd25519 { network, .. }
            | Self::PubKeySchnorrSecp256k1 { network, .. } => *network,
        }
    }

    /// Short description of the address variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PubKeyHash { .. } => "pubkey hash address",
            Self::ScriptHash { .. } => "script hash address",
            Self::PubKeySecp256k1 { .. } => "secp256k1 pubkey address",
            Self::PubKeyEd25519 { .. } => "ed25519 pubkey address",
            Self::PubKeySchnorrSecp256k1 { .. } => "schnorr secp256k1 pubkey address",
        }
    }
}

fn hash160(hash: &[u8]) -> Result<[u8; 20], AddressError> {
    hash.try_into()
        .map_err(|_| AddressError::InvalidHashLength(hash.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::{OP_1, OP_2, OP_16};
    use hex_literal::hex;

    #[test]
    fn test_signature_scheme_tags() {
        assert_eq!(SignatureScheme::Ed25519.tag_opcode(), OP_1);
        assert_eq!(SignatureScheme::SchnorrSecp256k1.tag_opcode(), OP_2);
        assert_eq!(SignatureScheme::EcdsaSecp256k1.tag_opcode(), OP_0);

        assert_eq!(SignatureScheme::from_tag_opcode(OP_1), Some(SignatureScheme::Ed25519));
        assert_eq!(
            SignatureScheme::from_tag_opcode(OP_2),
            Some(SignatureScheme::SchnorrSecp256k1)
        );
        // Scheme 0 is disabled for alternative signature checks.
        assert_eq!(SignatureScheme::from_tag_opcode(OP_0), None);
        assert_eq!(SignatureScheme::from_tag_opcode(OP_2 + 1), None);
        assert_eq!(SignatureScheme::from_tag_opcode(OP_16), None);
    }

    #[test]
    fn test_hash_addresses_require_20_bytes() {
        let params = ChainParams::mainnet();
        assert_eq!(
            Address::pubkey_hash(&[0u8; 19], &params, SignatureScheme::EcdsaSecp256k1),
            Err(AddressError::InvalidHashLength(19))
        );
        assert_eq!(
            Address::script_hash_from_hash(&[0u8; 21], &params),
            Err(AddressError::InvalidHashLength(21))
        );

        let addr = Address::script_hash_from_hash(&[7u8; 20], &params).unwrap();
        assert_eq!(addr.script_address(), vec![7u8; 20]);
        assert_eq!(addr.scheme(), None);
        assert_eq!(addr.network(), Network::Mainnet);
    }

    #[test]
    fn test_secp256k1_address_serializes_compressed() {
        let params = ChainParams::testnet();
        let uncompressed = hex!(
            "0411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5c"
            "b2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3"
        );
        let compressed = hex!("0311db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5c");

        let from_uncompressed = Address::secp256k1_pubkey(&uncompressed, &params).unwrap();
        let from_compressed = Address::secp256k1_pubkey(&compressed, &params).unwrap();
        assert_eq!(from_uncompressed, from_compressed);
        assert_eq!(from_uncompressed.script_address(), compressed.to_vec());
        assert_eq!(from_uncompressed.network(), Network::Testnet);

        assert!(matches!(
            Address::secp256k1_pubkey(&[0x05; 33], &params),
            Err(AddressError::InvalidSecp256k1Key(_))
        ));
    }

    #[test]
    fn test_ed25519_address_length() {
        let params = ChainParams::simnet();
        let addr = Address::ed25519_pubkey(&[9u8; 32], &params).unwrap();
        assert_eq!(addr.scheme(), Some(SignatureScheme::Ed25519));
        assert_eq!(
            Address::ed25519_pubkey(&[9u8; 33], &params),
            Err(AddressError::InvalidEd25519KeyLength(33))
        );
    }
}
