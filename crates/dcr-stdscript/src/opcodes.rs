//! Opcode values referenced by the standard script templates.
//!
//! The data-push, flow-control, stack and signature opcodes share their byte
//! values with bitcoin and are taken from [`bitcoin::opcodes::all`]. The stake
//! tagging opcodes, the alternative signature check and `OP_SHA256` occupy
//! bytes that bitcoin leaves unassigned (or assigns differently), so they are
//! spelled out here.

use bitcoin::opcodes::all;

pub const OP_0: u8 = all::OP_PUSHBYTES_0.to_u8();
pub const OP_DATA_1: u8 = all::OP_PUSHBYTES_1.to_u8();
pub const OP_DATA_20: u8 = all::OP_PUSHBYTES_20.to_u8();
pub const OP_DATA_32: u8 = all::OP_PUSHBYTES_32.to_u8();
pub const OP_DATA_33: u8 = all::OP_PUSHBYTES_33.to_u8();
pub const OP_DATA_65: u8 = all::OP_PUSHBYTES_65.to_u8();
pub const OP_DATA_75: u8 = all::OP_PUSHBYTES_75.to_u8();
pub const OP_PUSHDATA1: u8 = all::OP_PUSHDATA1.to_u8();
pub const OP_PUSHDATA2: u8 = all::OP_PUSHDATA2.to_u8();
pub const OP_PUSHDATA4: u8 = all::OP_PUSHDATA4.to_u8();
pub const OP_1NEGATE: u8 = all::OP_PUSHNUM_NEG1.to_u8();
pub const OP_1: u8 = all::OP_PUSHNUM_1.to_u8();
pub const OP_2: u8 = all::OP_PUSHNUM_2.to_u8();
pub const OP_16: u8 = all::OP_PUSHNUM_16.to_u8();

pub const OP_IF: u8 = all::OP_IF.to_u8();
pub const OP_ELSE: u8 = all::OP_ELSE.to_u8();
pub const OP_ENDIF: u8 = all::OP_ENDIF.to_u8();
pub const OP_RETURN: u8 = all::OP_RETURN.to_u8();
pub const OP_DROP: u8 = all::OP_DROP.to_u8();
pub const OP_DUP: u8 = all::OP_DUP.to_u8();
pub const OP_SIZE: u8 = all::OP_SIZE.to_u8();
pub const OP_EQUAL: u8 = all::OP_EQUAL.to_u8();
pub const OP_EQUALVERIFY: u8 = all::OP_EQUALVERIFY.to_u8();
pub const OP_HASH160: u8 = all::OP_HASH160.to_u8();
pub const OP_CHECKSIG: u8 = all::OP_CHECKSIG.to_u8();
pub const OP_CHECKSIGVERIFY: u8 = all::OP_CHECKSIGVERIFY.to_u8();
pub const OP_CHECKMULTISIG: u8 = all::OP_CHECKMULTISIG.to_u8();
pub const OP_CHECKMULTISIGVERIFY: u8 = all::OP_CHECKMULTISIGVERIFY.to_u8();
pub const OP_CHECKLOCKTIMEVERIFY: u8 = all::OP_CLTV.to_u8();

/// Tags a stake submission (ticket purchase) output.
pub const OP_SSTX: u8 = 0xba;
/// Tags a stake generation (vote) output.
pub const OP_SSGEN: u8 = 0xbb;
/// Tags a stake revocation output.
pub const OP_SSRTX: u8 = 0xbc;
/// Tags the change output of a stake submission.
pub const OP_SSTXCHANGE: u8 = 0xbd;
/// Signature check with the scheme selected by a preceding small integer.
pub const OP_CHECKSIGALT: u8 = 0xbe;
pub const OP_CHECKSIGALTVERIFY: u8 = 0xbf;
pub const OP_SHA256: u8 = 0xc0;

/// Returns whether the opcode is one of the stake tagging opcodes.
pub fn is_stake_opcode(op: u8) -> bool {
    (OP_SSTX..=OP_SSTXCHANGE).contains(&op)
}

/// Returns whether the opcode pushes a small integer (0 through 16).
pub fn is_small_int(op: u8) -> bool {
    op == OP_0 || (OP_1..=OP_16).contains(&op)
}

/// Returns the integer pushed by a small-integer opcode.
///
/// Callers are expected to have checked [`is_small_int`]; any other opcode
/// yields the (meaningless) distance from `OP_1 - 1` modulo 256.
pub fn as_small_int(op: u8) -> usize {
    if op == OP_0 {
        return 0;
    }
    op.wrapping_sub(OP_1 - 1) as usize
}
