//! Decoded script operations.
//!
//! Byte-level decoding is delegated to [`bitcoin::script::Instructions`] in its
//! non-minimal mode, which enforces that every push length is satisfiable by
//! the remaining bytes. This module keeps the raw opcode byte alongside the
//! payload, since the standard templates distinguish `OP_PUSHDATA1` from a
//! direct push and the chain-specific opcodes have no meaning in bitcoin.

use crate::error::Error;
use bitcoin::script::{Instruction, Instructions, Script};

/// A single decoded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation<'a> {
    /// Raw opcode byte.
    pub opcode: u8,
    /// Pushed payload, `Some` for `OP_0` through `OP_PUSHDATA4`.
    pub data: Option<&'a [u8]>,
}

impl<'a> Operation<'a> {
    /// Payload of the operation, empty for non-push opcodes.
    pub fn data_or_empty(&self) -> &'a [u8] {
        self.data.unwrap_or_default()
    }

    /// Whether this operation only pushes data onto the stack.
    ///
    /// `OP_RESERVED` is considered a push here, execution of it fails anyway.
    pub fn is_push(&self) -> bool {
        self.opcode <= crate::opcodes::OP_16
    }
}

/// Iterates the operations of a script, tracking the byte offset.
///
/// The tokenizer is fused: after the first parse error no more operations are
/// produced and [`Tokenizer::is_done`] returns `true`.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    script: &'a [u8],
    instructions: Instructions<'a>,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(script: &'a [u8]) -> Self {
        Self {
            script,
            instructions: Script::from_bytes(script).instructions(),
            failed: false,
        }
    }

    /// Offset of the next unparsed byte.
    pub fn byte_index(&self) -> usize {
        self.script.len() - self.instructions.as_script().len()
    }

    /// Returns `true` once all bytes are consumed or a parse error occurred.
    pub fn is_done(&self) -> bool {
        self.failed || self.instructions.as_script().is_empty()
    }

    /// Returns the full script being tokenized.
    pub fn script(&self) -> &'a [u8] {
        self.script
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Operation<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let opcode = *self.instructions.as_script().as_bytes().first()?;

        match self.instructions.next()? {
            Ok(Instruction::PushBytes(push)) => Some(Ok(Operation {
                opcode,
                data: Some(push.as_bytes()),
            })),
            Ok(Instruction::Op(_)) => Some(Ok(Operation { opcode, data: None })),
            Err(err) => {
                self.failed = true;
                Some(Err(Error::MalformedScript(err)))
            }
        }
    }
}

/// Decodes the whole script, failing on the first malformed push.
pub fn parse_script(script: &[u8]) -> Result<Vec<Operation<'_>>, Error> {
    Tokenizer::new(script).collect()
}

/// Returns `Ok(())` when the script decodes without error.
pub fn check_script_parses(script: &[u8]) -> Result<(), Error> {
    Tokenizer::new(script).try_for_each(|op| op.map(|_| ()))
}

/// Returns the payload of the final operation of a script, or `None` when the
/// script is empty, malformed, or ends with a non-push opcode.
pub fn final_opcode_data(script: &[u8]) -> Option<&[u8]> {
    let mut last = None;
    for op in Tokenizer::new(script) {
        last = Some(op.ok()?);
    }
    last.and_then(|op| op.data)
}
