//! Standard script templates and classification.
//!
//! The fixed-length templates are matched directly against the raw script
//! bytes, only the variable-length templates need the tokenizer.

use crate::address::SignatureScheme;
use crate::constants::{DEFAULT_SCRIPT_VERSION, MAX_DATA_CARRIER_SIZE};
use crate::multisig::is_multisig_script;
use crate::opcodes::*;
use crate::script_class::ScriptClass;
use crate::tokenizer::{Operation, Tokenizer, parse_script};
use crate::utils::is_strict_compressed_pubkey_encoding;

const LOG_TARGET: &str = "stdscript::standard";

/// Extracts the key of a pay-to-compressed-pubkey script.
///
/// `OP_DATA_33 <33-byte compressed pubkey> OP_CHECKSIG`
pub fn extract_compressed_pubkey(script: &[u8]) -> Option<&[u8]> {
    if script.len() == 35
        && script[34] == OP_CHECKSIG
        && script[0] == OP_DATA_33
        && (script[1] == 0x02 || script[1] == 0x03)
    {
        return Some(&script[1..34]);
    }
    None
}

/// Extracts the key of a pay-to-uncompressed-pubkey script.
///
/// `OP_DATA_65 <65-byte uncompressed pubkey> OP_CHECKSIG`
///
/// Hybrid keys (0x06/0x07 prefix) never match.
pub fn extract_uncompressed_pubkey(script: &[u8]) -> Option<&[u8]> {
    if script.len() == 67 && script[66] == OP_CHECKSIG && script[0] == OP_DATA_65 && script[1] == 0x04
    {
        return Some(&script[1..66]);
    }
    None
}

/// Extracts the key of either pay-to-pubkey form, compressed first.
pub fn extract_pubkey(script: &[u8]) -> Option<&[u8]> {
    extract_compressed_pubkey(script).or_else(|| extract_uncompressed_pubkey(script))
}

pub fn is_pubkey_script(script: &[u8]) -> bool {
    extract_pubkey(script).is_some()
}

/// Extracts the key and signature scheme of a pay-to-alt-pubkey script.
///
/// ```text
/// OP_DATA_32 <32-byte ed25519 pubkey> OP_1 OP_CHECKSIGALT
/// OP_DATA_33 <33-byte compressed secp256k1 pubkey> OP_2 OP_CHECKSIGALT
/// ```
pub fn extract_pubkey_alt_details(script: &[u8]) -> Option<(&[u8], SignatureScheme)> {
    if script.len() < 3 || script[script.len() - 1] != OP_CHECKSIGALT {
        return None;
    }

    let tagged = |offset: usize, scheme: SignatureScheme| {
        SignatureScheme::from_tag_opcode(script[offset]) == Some(scheme)
    };

    if script.len() == 35 && script[0] == OP_DATA_32 && tagged(33, SignatureScheme::Ed25519) {
        return Some((&script[1..33], SignatureScheme::Ed25519));
    }

    if script.len() == 36
        && script[0] == OP_DATA_33
        && tagged(34, SignatureScheme::SchnorrSecp256k1)
        && is_strict_compressed_pubkey_encoding(&script[1..34])
    {
        return Some((&script[1..34], SignatureScheme::SchnorrSecp256k1));
    }

    None
}

pub fn is_pubkey_alt_script(script: &[u8]) -> bool {
    extract_pubkey_alt_details(script).is_some()
}

/// Extracts the hash of a pay-to-pubkey-hash script.
///
/// `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn extract_pubkey_hash(script: &[u8]) -> Option<&[u8]> {
    if script.len() == 25
        && script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[2] == OP_DATA_20
        && script[23] == OP_EQUALVERIFY
        && script[24] == OP_CHECKSIG
    {
        return Some(&script[3..23]);
    }
    None
}

pub fn is_pubkey_hash_script(script: &[u8]) -> bool {
    extract_pubkey_hash(script).is_some()
}

/// Extracts the hash and signature scheme of a pay-to-alt-pubkey-hash script.
///
/// `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY <scheme> OP_CHECKSIGALT`
pub fn extract_pubkey_hash_alt_details(script: &[u8]) -> Option<(&[u8], SignatureScheme)> {
    if script.len() == 26
        && script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[2] == OP_DATA_20
        && script[23] == OP_EQUALVERIFY
        && script[25] == OP_CHECKSIGALT
    {
        let scheme = SignatureScheme::from_tag_opcode(script[24])?;
        return Some((&script[3..23], scheme));
    }
    None
}

pub fn is_pubkey_hash_alt_script(script: &[u8]) -> bool {
    extract_pubkey_hash_alt_details(script).is_some()
}

/// Extracts the hash of a pay-to-script-hash script.
///
/// `OP_HASH160 <20-byte hash> OP_EQUAL`
pub fn extract_script_hash(script: &[u8]) -> Option<&[u8]> {
    if script.len() == 23 && script[0] == OP_HASH160 && script[1] == OP_DATA_20 && script[22] == OP_EQUAL
    {
        return Some(&script[2..22]);
    }
    None
}

pub fn is_script_hash_script(script: &[u8]) -> bool {
    extract_script_hash(script).is_some()
}

/// Returns whether the script is a lone `OP_RETURN` or an `OP_RETURN` followed
/// by a single push of at most [`MAX_DATA_CARRIER_SIZE`] bytes.
pub fn is_null_data_script(version: u16, script: &[u8]) -> bool {
    if version != DEFAULT_SCRIPT_VERSION {
        return false;
    }

    match script {
        [OP_RETURN] => true,
        [OP_RETURN, rest @ ..] => {
            let mut tokenizer = Tokenizer::new(rest);
            match tokenizer.next() {
                Some(Ok(op)) => {
                    tokenizer.is_done()
                        && (is_small_int(op.opcode) || op.opcode <= OP_PUSHDATA4)
                        && op.data_or_empty().len() <= MAX_DATA_CARRIER_SIZE
                }
                _ => false,
            }
        }
        _ => false,
    }
}

/// Extracts the hash of a pay-to-pubkey-hash script tagged with `stake_opcode`.
pub fn extract_stake_pubkey_hash(script: &[u8], stake_opcode: u8) -> Option<&[u8]> {
    match script.split_first() {
        Some((&op, rest)) if op == stake_opcode => extract_pubkey_hash(rest),
        _ => None,
    }
}

/// Extracts the hash of a pay-to-script-hash script tagged with `stake_opcode`.
pub fn extract_stake_script_hash(script: &[u8], stake_opcode: u8) -> Option<&[u8]> {
    match script.split_first() {
        Some((&op, rest)) if op == stake_opcode => extract_script_hash(rest),
        _ => None,
    }
}

/// Returns whether the script is a P2PKH or P2SH script tagged with `OP_SSTX`.
pub fn is_stake_submission_script(version: u16, script: &[u8]) -> bool {
    if version != DEFAULT_SCRIPT_VERSION {
        return false;
    }

    extract_stake_pubkey_hash(script, OP_SSTX).is_some()
        || extract_stake_script_hash(script, OP_SSTX).is_some()
}

/// Matches the decoded operations against a stake opcode followed by either
/// a P2PKH or a P2SH shaped body.
///
/// Only opcodes are compared, the length of the hash push is implied by
/// `OP_DATA_20`.
fn is_stake_tagged(ops: &[Operation<'_>], stake_opcode: u8) -> bool {
    const P2PKH_BODY: [u8; 5] = [OP_DUP, OP_HASH160, OP_DATA_20, OP_EQUALVERIFY, OP_CHECKSIG];
    const P2SH_BODY: [u8; 3] = [OP_HASH160, OP_DATA_20, OP_EQUAL];

    let Some((first, body)) = ops.split_first() else {
        return false;
    };
    if first.opcode != stake_opcode {
        return false;
    }

    let opcodes_match = |expected: &[u8]| {
        body.len() == expected.len()
            && body.iter().zip(expected).all(|(op, &want)| op.opcode == want)
    };

    opcodes_match(&P2PKH_BODY) || opcodes_match(&P2SH_BODY)
}

pub fn is_stake_generation(ops: &[Operation<'_>]) -> bool {
    is_stake_tagged(ops, OP_SSGEN)
}

pub fn is_stake_revocation(ops: &[Operation<'_>]) -> bool {
    is_stake_tagged(ops, OP_SSRTX)
}

pub fn is_stake_submission_change(ops: &[Operation<'_>]) -> bool {
    is_stake_tagged(ops, OP_SSTXCHANGE)
}

/// Returns the class of the script from the known standard templates.
///
/// The templates are tried in a fixed order and the first match wins:
///
/// 1. pay-to-pubkey
/// 2. pay-to-alt-pubkey
/// 3. pay-to-pubkey-hash
/// 4. pay-to-alt-pubkey-hash
/// 5. pay-to-script-hash
/// 6. multisig
/// 7. null data
/// 8. stake submission
///
/// Only then is the script fully decoded and checked for the stake
/// generation, revocation and submission change shapes, in that order.
///
/// Scripts of any version other than 0, and scripts that fail to decode, are
/// [`ScriptClass::NonStandard`].
pub fn classify(version: u16, script: &[u8]) -> ScriptClass {
    if version != DEFAULT_SCRIPT_VERSION {
        return ScriptClass::NonStandard;
    }

    if is_pubkey_script(script) {
        return ScriptClass::PubKey;
    }
    if is_pubkey_alt_script(script) {
        return ScriptClass::PubKeyAlt;
    }
    if is_pubkey_hash_script(script) {
        return ScriptClass::PubKeyHash;
    }
    if is_pubkey_hash_alt_script(script) {
        return ScriptClass::PubKeyHashAlt;
    }
    if is_script_hash_script(script) {
        return ScriptClass::ScriptHash;
    }
    if is_multisig_script(version, script) {
        return ScriptClass::MultiSig;
    }
    if is_null_data_script(version, script) {
        return ScriptClass::NullData;
    }
    if is_stake_submission_script(version, script) {
        return ScriptClass::StakeSubmission;
    }

    let ops = match parse_script(script) {
        Ok(ops) => ops,
        Err(err) => {
            tracing::trace!(target: LOG_TARGET, "Nonstandard script, failed to parse: {err:?}");
            return ScriptClass::NonStandard;
        }
    };

    if is_stake_generation(&ops) {
        ScriptClass::StakeGeneration
    } else if is_stake_revocation(&ops) {
        ScriptClass::StakeRevocation
    } else if is_stake_submission_change(&ops) {
        ScriptClass::StakeSubmissionChange
    } else {
        ScriptClass::NonStandard
    }
}

/// Returns the class of the script passed.
///
/// [`ScriptClass::NonStandard`] is returned when the script does not parse.
pub fn get_script_class(version: u16, script: &[u8]) -> ScriptClass {
    classify(version, script)
}
