//! Bare multisig scripts of the form
//!
//! `<required> <pubkey1> <pubkey2> ... <num pubkeys> OP_CHECKMULTISIG`

use crate::constants::{DEFAULT_SCRIPT_VERSION, MAX_PUBKEYS_PER_MULTISIG};
use crate::error::Error;
use crate::opcodes::{OP_CHECKMULTISIG, as_small_int, is_small_int};
use crate::tokenizer::{Tokenizer, final_opcode_data, parse_script};
use crate::utils::is_strict_pubkey_encoding;

/// Details extracted from a standard multisig script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultisigDetails<'a> {
    pub required_sigs: usize,
    pub num_pubkeys: usize,
    /// Encoded public keys in script order, only populated on request.
    pub pubkeys: Vec<&'a [u8]>,
    pub valid: bool,
}

/// Attempts to extract the details of a standard multisig script.
///
/// The required signature count is not compared against the number of keys
/// here, only the builder enforces that. When `extract_pubkeys` is false the
/// keys are counted but not collected.
pub fn extract_multisig_script_details(
    version: u16,
    script: &[u8],
    extract_pubkeys: bool,
) -> MultisigDetails<'_> {
    if version != DEFAULT_SCRIPT_VERSION {
        return MultisigDetails::default();
    }

    // Must end with OP_CHECKMULTISIG and leave room for the two counts.
    if script.len() < 3 || script[script.len() - 1] != OP_CHECKMULTISIG {
        return MultisigDetails::default();
    }

    let mut tokenizer = Tokenizer::new(script);
    let required_sigs = match tokenizer.next() {
        Some(Ok(op)) if is_small_int(op.opcode) => as_small_int(op.opcode),
        _ => return MultisigDetails::default(),
    };

    let mut num_pubkeys = 0;
    let mut pubkeys = Vec::new();
    if extract_pubkeys {
        pubkeys.reserve(MAX_PUBKEYS_PER_MULTISIG);
    }

    let mut count_op = None;
    for op in tokenizer.by_ref() {
        let Ok(op) = op else {
            return MultisigDetails::default();
        };
        let data = op.data_or_empty();
        if !is_strict_pubkey_encoding(data) {
            count_op = Some(op);
            break;
        }
        num_pubkeys += 1;
        if extract_pubkeys {
            pubkeys.push(data);
        }
    }

    let Some(count_op) = count_op else {
        return MultisigDetails::default();
    };
    if !is_small_int(count_op.opcode) || as_small_int(count_op.opcode) != num_pubkeys {
        return MultisigDetails::default();
    }

    // Only the trailing OP_CHECKMULTISIG may be left.
    if script.len() - tokenizer.byte_index() != 1 {
        return MultisigDetails::default();
    }

    MultisigDetails {
        required_sigs,
        num_pubkeys,
        pubkeys,
        valid: true,
    }
}

/// Returns whether the script is a standard multisig script.
pub fn is_multisig_script(version: u16, script: &[u8]) -> bool {
    extract_multisig_script_details(version, script, false).valid
}

/// Best effort check whether a signature script redeems a pay-to-script-hash
/// multisig output, treating its final push as the redeem script.
pub fn is_multisig_sig_script(script: &[u8]) -> bool {
    if script.len() < 4 || script[script.len() - 1] != OP_CHECKMULTISIG {
        return false;
    }

    final_opcode_data(script)
        .is_some_and(|redeem_script| is_multisig_script(DEFAULT_SCRIPT_VERSION, redeem_script))
}

/// Returns `(num_pubkeys, required_sigs)` of a script already known to be
/// multisig, read from the second to last and the first operation.
///
/// The script must hold at least `OP_1 <pubkey> OP_1 OP_CHECKMULTISIG`.
pub fn calc_multisig_stats(script: &[u8]) -> Result<(usize, usize), Error> {
    let ops = parse_script(script)?;
    if ops.len() < 4 {
        return Err(Error::NotMultisigScript(hex::encode(script)));
    }

    let required_sigs = as_small_int(ops[0].opcode);
    let num_pubkeys = as_small_int(ops[ops.len() - 2].opcode);
    Ok((num_pubkeys, required_sigs))
}

/// Extracts the multisig redeem script carried by a pay-to-script-hash
/// signature script.
///
/// Returns `Ok(None)` when the final operation is not a push of a standard
/// multisig script.
pub fn multisig_redeem_script_from_script_sig(script: &[u8]) -> Result<Option<&[u8]>, Error> {
    let ops = parse_script(script)?;
    let redeem_script = ops.last().and_then(|op| op.data);
    Ok(redeem_script
        .filter(|redeem_script| is_multisig_script(DEFAULT_SCRIPT_VERSION, redeem_script)))
}
