//! Standard script recognition for Decred-style transaction outputs.
//!
//! Scripts are classified against a fixed set of templates, the destinations
//! and data they commit to are extracted, and canonical scripts paying to
//! each kind of destination can be built. Only script version 0 defines any
//! standard template, scripts of other versions are always non-standard.

mod address;
mod atomic_swap;
mod builder;
mod chain_params;
mod constants;
mod error;
mod extract;
mod multisig;
mod num;
pub mod opcodes;
mod script_class;
mod script_info;
mod standard;
mod tokenizer;
mod utils;


pub use self::address::{Address, AddressError, SignatureScheme};
pub use self::atomic_swap::{AtomicSwapDataPushes, extract_atomic_swap_data_pushes};
pub use self::builder::{
    generate_provably_prunable_out, generate_sstx_addr_push, generate_ssgen_block_ref,
    generate_ssgen_votes, multisig_script, pay_to_addr_script, pay_to_ed25519_pubkey_script,
    pay_to_pubkey_hash_ed25519_script, pay_to_pubkey_hash_schnorr_script,
    pay_to_pubkey_hash_script, pay_to_pubkey_script, pay_to_schnorr_pubkey_script,
    pay_to_script_hash_script, pay_to_ssgen, pay_to_ssgen_pkh_direct, pay_to_ssgen_sh_direct,
    pay_to_ssrtx, pay_to_ssrtx_pkh_direct, pay_to_ssrtx_sh_direct, pay_to_sstx,
    pay_to_sstx_change,
};
pub use self::chain_params::{ChainParams, Network};
pub use self::constants::*;
pub use self::error::Error;
pub use self::extract::{
    extract_pk_script_addrs, extract_pk_script_alt_sig_type, get_script_hash_from_p2sh_script,
    pushed_data,
};
pub use self::multisig::{
    MultisigDetails, calc_multisig_stats, extract_multisig_script_details, is_multisig_script,
    is_multisig_sig_script, multisig_redeem_script_from_script_sig,
};
pub use self::num::{NumError, ScriptNum};
pub use self::script_class::ScriptClass;
pub use self::script_info::{
    ScriptInfo, calc_script_info, contains_stake_opcodes, get_sig_op_count,
    get_stake_out_subclass, is_stake_output,
};
pub use self::standard::{
    classify, extract_compressed_pubkey, extract_pubkey, extract_pubkey_alt_details,
    extract_pubkey_hash, extract_pubkey_hash_alt_details, extract_script_hash,
    extract_stake_pubkey_hash, extract_stake_script_hash, extract_uncompressed_pubkey,
    get_script_class, is_null_data_script, is_pubkey_alt_script, is_pubkey_hash_alt_script,
    is_pubkey_hash_script, is_pubkey_script, is_script_hash_script, is_stake_generation,
    is_stake_revocation, is_stake_submission_change, is_stake_submission_script,
};
pub use self::tokenizer::{Operation, Tokenizer, check_script_parses, final_opcode_data, parse_script};
pub use self::utils::{is_strict_compressed_pubkey_encoding, is_strict_pubkey_encoding};
