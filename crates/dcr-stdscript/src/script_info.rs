use crate::constants::{DEFAULT_SCRIPT_VERSION, MAX_PUBKEYS_PER_MULTISIG};
use crate::error::Error;
use crate::opcodes::*;
use crate::script_class::ScriptClass;
use crate::standard::classify;
use crate::tokenizer::{Operation, check_script_parses, parse_script};

const LOG_TARGET: &str = "stdscript::script_info";

/// Statistics of a signature script and public key script pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptInfo {
    /// Class of the public key script.
    pub pk_script_class: ScriptClass,
    /// Number of operations in the signature script.
    pub num_inputs: usize,
    /// Number of stack items the pair expects the signature script to
    /// provide, including the redeem script's own needs for pay-to-script-hash.
    /// `-1` when it cannot be determined.
    pub expected_inputs: isize,
    /// Precise count of signature operations.
    pub sig_ops: usize,
}

/// Number of stack items required to satisfy a script of the given class.
///
/// `subclass` is only consulted for stake classes. Multisig expects one item
/// more than its signature count since `OP_CHECKMULTISIG` pops an extra
/// dummy element off the stack.
fn expected_inputs(ops: &[Operation<'_>], class: ScriptClass, subclass: ScriptClass) -> isize {
    match class {
        ScriptClass::PubKey => 1,
        ScriptClass::PubKeyHash => 2,
        ScriptClass::StakeSubmission
        | ScriptClass::StakeGeneration
        | ScriptClass::StakeRevocation
        | ScriptClass::StakeSubmissionChange => {
            if subclass == ScriptClass::PubKeyHash {
                2
            } else {
                1
            }
        }
        // The redeem script itself is accounted for by the caller.
        ScriptClass::ScriptHash => 1,
        ScriptClass::MultiSig => ops
            .first()
            .map_or(-1, |op| as_small_int(op.opcode) as isize + 1),
        _ => -1,
    }
}

/// Counts the signature operations of a decoded script.
///
/// In precise mode a multisig check preceded by a small integer counts that
/// many operations, otherwise it counts [`MAX_PUBKEYS_PER_MULTISIG`].
pub fn get_sig_op_count(ops: &[Operation<'_>], precise: bool) -> usize {
    let mut count = 0;
    let mut prev_opcode = None;

    for op in ops {
        match op.opcode {
            OP_CHECKSIG | OP_CHECKSIGVERIFY | OP_CHECKSIGALT | OP_CHECKSIGALTVERIFY => count += 1,
            OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => match prev_opcode {
                Some(prev @ OP_1..=OP_16) if precise => count += as_small_int(prev),
                _ => count += MAX_PUBKEYS_PER_MULTISIG,
            },
            _ => {}
        }
        prev_opcode = Some(op.opcode);
    }

    count
}

fn is_push_only(ops: &[Operation<'_>]) -> bool {
    ops.iter().all(Operation::is_push)
}

/// Returns whether the script is one of the stake-tagged standard scripts.
pub fn is_stake_output(pk_script: &[u8]) -> bool {
    classify(DEFAULT_SCRIPT_VERSION, pk_script).is_stake()
}

/// Returns the class of the P2PKH or P2SH script wrapped by a stake output.
pub fn get_stake_out_subclass(pk_script: &[u8]) -> Result<ScriptClass, Error> {
    check_script_parses(pk_script)?;

    if !is_stake_output(pk_script) {
        return Err(Error::NotStakeOutput);
    }

    Ok(classify(DEFAULT_SCRIPT_VERSION, &pk_script[1..]))
}

/// Returns whether any operation of the script is a stake tagging opcode.
pub fn contains_stake_opcodes(pk_script: &[u8]) -> Result<bool, Error> {
    Ok(parse_script(pk_script)?
        .iter()
        .any(|op| is_stake_opcode(op.opcode)))
}

/// Computes the [`ScriptInfo`] of a signature script and the public key
/// script it spends.
///
/// Both scripts must parse and the signature script must be push only. When
/// `bip16` is set and the public key script (or the script wrapped by a stake
/// output) pays to a script hash, the final push of the signature script is
/// analysed as the redeem script.
pub fn calc_script_info(sig_script: &[u8], pk_script: &[u8], bip16: bool) -> Result<ScriptInfo, Error> {
    let sig_ops = parse_script(sig_script)?;
    let pk_ops = parse_script(pk_script)?;

    let pk_script_class = classify(DEFAULT_SCRIPT_VERSION, pk_script);

    if !is_push_only(&sig_ops) {
        return Err(Error::NotPushOnly);
    }

    let subclass = if pk_script_class.is_stake() {
        get_stake_out_subclass(pk_script)?
    } else {
        ScriptClass::NonStandard
    };

    let mut expected = expected_inputs(&pk_ops, pk_script_class, subclass);

    let pays_to_script_hash =
        pk_script_class == ScriptClass::ScriptHash || subclass == ScriptClass::ScriptHash;

    let sig_op_count = if pays_to_script_hash && bip16 {
        // An empty signature script carries an empty redeem script.
        let redeem_script = sig_ops.last().map(Operation::data_or_empty).unwrap_or_default();
        let redeem_ops = parse_script(redeem_script)?;
        let redeem_class = classify(DEFAULT_SCRIPT_VERSION, redeem_script);

        match expected_inputs(&redeem_ops, redeem_class, ScriptClass::NonStandard) {
            -1 => expected = -1,
            redeem_inputs => expected += redeem_inputs,
        }

        tracing::trace!(
            target: LOG_TARGET,
            "Counting sigops of {redeem_class} redeem script {}",
            hex::encode(redeem_script)
        );

        get_sig_op_count(&redeem_ops, true)
    } else {
        get_sig_op_count(&pk_ops, true)
    };

    Ok(ScriptInfo {
        pk_script_class,
        num_inputs: sig_ops.len(),
        expected_inputs: expected,
        sig_ops: sig_op_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sig_op_count() {
        let ops = parse_script(&[OP_2, OP_CHECKMULTISIG, OP_CHECKSIG, OP_CHECKSIGALTVERIFY]).unwrap();
        assert_eq!(get_sig_op_count(&ops, true), 4);
        assert_eq!(get_sig_op_count(&ops, false), 22);

        // Not preceded by a small integer.
        let ops = parse_script(&[OP_CHECKMULTISIGVERIFY]).unwrap();
        assert_eq!(get_sig_op_count(&ops, true), MAX_PUBKEYS_PER_MULTISIG);

        // OP_0 does not count as a key count.
        let ops = parse_script(&[OP_0, OP_CHECKMULTISIG]).unwrap();
        assert_eq!(get_sig_op_count(&ops, true), MAX_PUBKEYS_PER_MULTISIG);
    }

    #[test]
    fn test_stake_subclass() {
        let mut script = vec![OP_SSRTX, OP_HASH160, OP_DATA_20];
        script.extend_from_slice(&[0x10; 20]);
        script.push(OP_EQUAL);

        assert!(is_stake_output(&script));
        assert_eq!(get_stake_out_subclass(&script), Ok(ScriptClass::ScriptHash));
        assert_eq!(contains_stake_opcodes(&script), Ok(true));

        assert_eq!(get_stake_out_subclass(&script[1..]), Err(Error::NotStakeOutput));
        assert_eq!(contains_stake_opcodes(&script[1..]), Ok(false));
        assert!(get_stake_out_subclass(&[OP_SSRTX, OP_DATA_20]).is_err());
    }

    #[test]
    fn test_not_push_only() {
        let pk_script = [OP_RETURN];
        assert_eq!(
            calc_script_info(&[OP_0, OP_DUP], &pk_script, true),
            Err(Error::NotPushOnly)
        );
    }
}
