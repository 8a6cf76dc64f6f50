//! Recovery of destinations and embedded data from output scripts.

use crate::address::{Address, AddressError, SignatureScheme};
use crate::chain_params::ChainParams;
use crate::constants::{DEFAULT_SCRIPT_VERSION, MAX_ALT_PUBKEY_SIZE};
use crate::error::Error;
use crate::multisig::extract_multisig_script_details;
use crate::opcodes::*;
use crate::script_class::ScriptClass;
use crate::standard::{
    classify, extract_pubkey, extract_pubkey_alt_details, extract_pubkey_hash,
    extract_pubkey_hash_alt_details, extract_script_hash,
};
use crate::tokenizer::{Operation, check_script_parses, parse_script};

const LOG_TARGET: &str = "stdscript::extract";

/// Returns the class, the destination addresses and the number of required
/// signatures of a standard output script.
///
/// Public keys and hashes which do not form a valid address are omitted from
/// the result rather than reported as errors. Null data and non-standard
/// scripts have no addresses and require no signatures.
pub fn extract_pk_script_addrs(
    version: u16,
    pk_script: &[u8],
    params: &ChainParams,
) -> Result<(ScriptClass, Vec<Address>, usize), Error> {
    if version != DEFAULT_SCRIPT_VERSION {
        return Err(Error::UnsupportedScriptVersion(version));
    }

    check_script_parses(pk_script)?;

    let class = classify(version, pk_script);

    let mut addrs = Vec::new();
    let mut push_addr = |result: Result<Address, AddressError>| match result {
        Ok(addr) => addrs.push(addr),
        Err(err) => {
            tracing::debug!(target: LOG_TARGET, "Skipping invalid {class} destination: {err}");
        }
    };

    let required_sigs = match class {
        ScriptClass::PubKeyHash => {
            if let Some(hash) = extract_pubkey_hash(pk_script) {
                push_addr(Address::pubkey_hash(hash, params, SignatureScheme::EcdsaSecp256k1));
            }
            1
        }
        ScriptClass::PubKeyHashAlt => {
            if let Some((hash, scheme)) = extract_pubkey_hash_alt_details(pk_script) {
                push_addr(Address::pubkey_hash(hash, params, scheme));
            }
            1
        }
        ScriptClass::PubKey => {
            if let Some(pubkey) = extract_pubkey(pk_script) {
                push_addr(Address::secp256k1_pubkey(pubkey, params));
            }
            1
        }
        ScriptClass::PubKeyAlt => {
            match extract_pubkey_alt_details(pk_script) {
                Some((pubkey, SignatureScheme::Ed25519)) => {
                    push_addr(Address::ed25519_pubkey(pubkey, params))
                }
                Some((pubkey, SignatureScheme::SchnorrSecp256k1)) => {
                    push_addr(Address::schnorr_secp256k1_pubkey(pubkey, params))
                }
                _ => {}
            }
            1
        }
        ScriptClass::ScriptHash => {
            if let Some(hash) = extract_script_hash(pk_script) {
                push_addr(Address::script_hash_from_hash(hash, params));
            }
            1
        }
        ScriptClass::StakeSubmission
        | ScriptClass::StakeGeneration
        | ScriptClass::StakeRevocation
        | ScriptClass::StakeSubmissionChange => {
            // <stake opcode> followed by a P2PKH or P2SH script.
            let (_, stake_addrs, required_sigs) =
                extract_pk_script_addrs(version, &pk_script[1..], params)?;
            addrs.extend(stake_addrs);
            required_sigs
        }
        ScriptClass::MultiSig => {
            let details = extract_multisig_script_details(version, pk_script, true);
            for pubkey in details.pubkeys {
                push_addr(Address::secp256k1_pubkey(pubkey, params));
            }
            details.required_sigs
        }
        ScriptClass::NullData | ScriptClass::NonStandard => 0,
    };

    Ok((class, addrs, required_sigs))
}

/// Returns the value of an operation pushing a single byte, either as a small
/// integer opcode or as `OP_DATA_1`.
fn one_byte_push_value(op: &Operation<'_>) -> Option<usize> {
    match op.opcode {
        OP_1..=OP_16 => Some(as_small_int(op.opcode)),
        OP_DATA_1 => op.data.and_then(|data| data.first()).map(|&b| b as usize),
        _ => None,
    }
}

/// Returns the signature scheme of a pay-to-alt-pubkey or
/// pay-to-alt-pubkey-hash script.
///
/// The shape check is looser than classification: any key under
/// [`MAX_ALT_PUBKEY_SIZE`] bytes and any single byte scheme push are
/// accepted, only the scheme value itself must be an alternative scheme.
pub fn extract_pk_script_alt_sig_type(pk_script: &[u8]) -> Result<SignatureScheme, Error> {
    let ops = parse_script(pk_script)?;

    let is_pubkey_alt = ops.len() == 3
        && ops[0].data_or_empty().len() < MAX_ALT_PUBKEY_SIZE
        && one_byte_push_value(&ops[1]).is_some()
        && ops[2].opcode == OP_CHECKSIGALT;

    let is_pubkey_hash_alt = ops.len() == 6
        && ops[0].opcode == OP_DUP
        && ops[1].opcode == OP_HASH160
        && ops[2].opcode == OP_DATA_20
        && ops[3].opcode == OP_EQUALVERIFY
        && one_byte_push_value(&ops[4]).is_some()
        && ops[5].opcode == OP_CHECKSIGALT;

    let scheme_op = match (is_pubkey_alt, is_pubkey_hash_alt) {
        (true, _) => &ops[1],
        (_, true) => &ops[4],
        _ => return Err(Error::WrongScriptType),
    };

    one_byte_push_value(scheme_op)
        .and_then(SignatureScheme::from_value)
        .filter(|scheme| scheme.is_alt())
        .ok_or(Error::BadSignatureScheme)
}

/// Returns every payload pushed by the script, `OP_0` included as an empty
/// payload. The small integer opcodes `OP_1` through `OP_16` are not data
/// pushes and are skipped.
pub fn pushed_data(script: &[u8]) -> Result<Vec<&[u8]>, Error> {
    Ok(parse_script(script)?
        .into_iter()
        .filter_map(|op| op.data)
        .collect())
}

/// Returns the operand following the first `OP_HASH160` of a P2SH script.
///
/// `None` when there is no `OP_HASH160` or it is not followed by a push.
pub fn get_script_hash_from_p2sh_script(pk_script: &[u8]) -> Result<Option<&[u8]>, Error> {
    let ops = parse_script(pk_script)?;
    Ok(ops
        .iter()
        .position(|op| op.opcode == OP_HASH160)
        .and_then(|index| ops.get(index + 1))
        .and_then(|op| op.data))
}
