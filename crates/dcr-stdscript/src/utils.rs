use crate::constants::{COMPRESSED_PUBKEY_SIZE, UNCOMPRESSED_PUBKEY_SIZE};

/// Returns whether the bytes are a strictly encoded compressed secp256k1
/// public key. The point itself is not validated.
pub fn is_strict_compressed_pubkey_encoding(v: &[u8]) -> bool {
    v.len() == COMPRESSED_PUBKEY_SIZE && (v[0] == 0x02 || v[0] == 0x03)
}

/// Returns whether the bytes are a strictly encoded compressed or
/// uncompressed secp256k1 public key. Hybrid keys are rejected.
pub fn is_strict_pubkey_encoding(v: &[u8]) -> bool {
    match v.len() {
        COMPRESSED_PUBKEY_SIZE => is_strict_compressed_pubkey_encoding(v),
        UNCOMPRESSED_PUBKEY_SIZE => v[0] == 0x04,
        _ => false,
    }
}
