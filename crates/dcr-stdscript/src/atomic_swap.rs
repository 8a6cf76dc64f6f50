//! Atomic swap contracts.
//!
//! Contracts are not standard outputs and are paid to via P2SH. The contract
//! has exactly twenty operations:
//!
//! ```text
//! OP_IF
//!     OP_SIZE <secret size> OP_EQUALVERIFY OP_SHA256 <32-byte secret hash> OP_EQUALVERIFY
//!     OP_DUP OP_HASH160 <20-byte recipient hash>
//! OP_ELSE
//!     <lock time> OP_CHECKLOCKTIMEVERIFY OP_DROP
//!     OP_DUP OP_HASH160 <20-byte refund hash>
//! OP_ENDIF
//! OP_EQUALVERIFY OP_CHECKSIG
//! ```

use crate::constants::DEFAULT_SCRIPT_VERSION;
use crate::error::Error;
use crate::num::ScriptNum;
use crate::opcodes::*;
use crate::tokenizer::{Operation, parse_script};

const LOG_TARGET: &str = "stdscript::atomic_swap";

/// Data pushes of an atomic swap contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomicSwapDataPushes {
    pub recipient_hash160: [u8; 20],
    pub refund_hash160: [u8; 20],
    pub secret_hash: [u8; 32],
    pub secret_size: i64,
    pub lock_time: i64,
}

/// Returns whether the push uses the smallest encoding for its payload.
///
/// Non-push opcodes above `OP_16` are considered canonical.
fn canonical_push(op: &Operation<'_>) -> bool {
    let data = op.data_or_empty();
    match op.opcode {
        opcode if opcode > OP_16 => true,
        opcode if opcode > OP_0 && opcode < OP_PUSHDATA1 && data.len() == 1 && data[0] <= 16 => {
            false
        }
        OP_PUSHDATA1 if data.len() < OP_PUSHDATA1 as usize => false,
        OP_PUSHDATA2 if data.len() <= 0xff => false,
        OP_PUSHDATA4 if data.len() <= 0xffff => false,
        _ => true,
    }
}

/// Decodes a secret size or lock time operand, either a minimally encoded
/// script number of up to 5 bytes or a small integer opcode.
fn decode_operand(op: &Operation<'_>, name: &str) -> Option<i64> {
    match op.data {
        Some(data) => match ScriptNum::from_bytes(data, ScriptNum::LOCK_TIME_NUM_SIZE) {
            Ok(num) => Some(num.value()),
            Err(err) => {
                tracing::debug!(target: LOG_TARGET, "Invalid atomic swap {name}: {err}");
                None
            }
        },
        None if is_small_int(op.opcode) => Some(as_small_int(op.opcode) as i64),
        None => None,
    }
}

fn fixed_push<const N: usize>(op: &Operation<'_>) -> Option<[u8; N]> {
    op.data_or_empty().try_into().ok()
}

/// Extracts the data pushes of an atomic swap contract.
///
/// Returns `Ok(None)` for any script that parses but is not exactly the
/// contract template. An error is only returned when the script fails to
/// parse.
pub fn extract_atomic_swap_data_pushes(
    version: u16,
    pk_script: &[u8],
) -> Result<Option<AtomicSwapDataPushes>, Error> {
    let ops = parse_script(pk_script)?;

    if version != DEFAULT_SCRIPT_VERSION || ops.len() != 20 {
        return Ok(None);
    }

    let is_atomic_swap = ops[0].opcode == OP_IF
        && ops[1].opcode == OP_SIZE
        && canonical_push(&ops[2])
        && ops[3].opcode == OP_EQUALVERIFY
        && ops[4].opcode == OP_SHA256
        && ops[5].opcode == OP_DATA_32
        && ops[6].opcode == OP_EQUALVERIFY
        && ops[7].opcode == OP_DUP
        && ops[8].opcode == OP_HASH160
        && ops[9].opcode == OP_DATA_20
        && ops[10].opcode == OP_ELSE
        && canonical_push(&ops[11])
        && ops[12].opcode == OP_CHECKLOCKTIMEVERIFY
        && ops[13].opcode == OP_DROP
        && ops[14].opcode == OP_DUP
        && ops[15].opcode == OP_HASH160
        && ops[16].opcode == OP_DATA_20
        && ops[17].opcode == OP_ENDIF
        && ops[18].opcode == OP_EQUALVERIFY
        && ops[19].opcode == OP_CHECKSIG;
    if !is_atomic_swap {
        return Ok(None);
    }

    let (Some(secret_size), Some(lock_time)) = (
        decode_operand(&ops[2], "secret size"),
        decode_operand(&ops[11], "lock time"),
    ) else {
        return Ok(None);
    };

    let (Some(secret_hash), Some(recipient_hash160), Some(refund_hash160)) = (
        fixed_push::<32>(&ops[5]),
        fixed_push::<20>(&ops[9]),
        fixed_push::<20>(&ops[16]),
    ) else {
        return Ok(None);
    };

    Ok(Some(AtomicSwapDataPushes {
        recipient_hash160,
        refund_hash160,
        secret_hash,
        secret_size,
        lock_time,
    }))
}
