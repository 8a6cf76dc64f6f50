/// The only script version with defined standard templates.
pub const DEFAULT_SCRIPT_VERSION: u16 = 0;

/// Maximum number of bytes allowed in pushed data to be considered a nulldata
/// script.
pub const MAX_DATA_CARRIER_SIZE: usize = 256;

/// Maximum number of public keys per multisig.
pub const MAX_PUBKEYS_PER_MULTISIG: usize = 20;

pub const COMPRESSED_PUBKEY_SIZE: usize = 33;
pub const UNCOMPRESSED_PUBKEY_SIZE: usize = 65;
pub const ED25519_PUBKEY_SIZE: usize = 32;

/// Size of the HASH160 digest embedded in pubkey-hash and script-hash scripts.
pub const HASH160_SIZE: usize = 20;

/// Alternative pubkeys larger than this are never standard.
pub const MAX_ALT_PUBKEY_SIZE: usize = 512;

/// Set in byte 27 of a stake submission commitment when the committed
/// destination is a script hash.
pub const SSTX_SCRIPT_HASH_FLAG: u8 = 1 << 7;
