//! Canonical construction of the standard scripts.
//!
//! Every builder pushes data the way the reference script builder does:
//! empty data and `[0]` become `OP_0`, a single byte 1 through 16 becomes the
//! matching small integer opcode, `[0x81]` becomes `OP_1NEGATE` and anything
//! else uses the smallest direct or `OP_PUSHDATA` push.

use crate::address::{Address, SignatureScheme};
use crate::constants::{MAX_DATA_CARRIER_SIZE, SSTX_SCRIPT_HASH_FLAG};
use crate::error::Error;
use crate::opcodes::*;
use bitcoin::opcodes::Opcode;
use bitcoin::script::{Builder, PushBytes};
use bitcoin::secp256k1::PublicKey;

trait PushData: Sized {
    fn push_op(self, op: u8) -> Self;

    fn push_data(self, data: &[u8]) -> Result<Self, Error>;
}

impl PushData for Builder {
    fn push_op(self, op: u8) -> Self {
        self.push_opcode(Opcode::from(op))
    }

    fn push_data(self, data: &[u8]) -> Result<Self, Error> {
        let builder = match data {
            [] | [0] => self.push_op(OP_0),
            [n @ 1..=16] => self.push_int(i64::from(*n)),
            [0x81] => self.push_op(OP_1NEGATE),
            _ => {
                let push: &PushBytes = data
                    .try_into()
                    .map_err(|_| Error::PushTooLarge(data.len()))?;
                self.push_slice(push)
            }
        };
        Ok(builder)
    }
}

fn finish(builder: Builder) -> Vec<u8> {
    builder.into_script().into_bytes()
}

/// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn pay_to_pubkey_hash_script(pubkey_hash: &[u8]) -> Result<Vec<u8>, Error> {
    let builder = Builder::new()
        .push_op(OP_DUP)
        .push_op(OP_HASH160)
        .push_data(pubkey_hash)?
        .push_op(OP_EQUALVERIFY)
        .push_op(OP_CHECKSIG);
    Ok(finish(builder))
}

fn pay_to_pubkey_hash_alt_script(
    pubkey_hash: &[u8],
    scheme: SignatureScheme,
) -> Result<Vec<u8>, Error> {
    let builder = Builder::new()
        .push_op(OP_DUP)
        .push_op(OP_HASH160)
        .push_data(pubkey_hash)?
        .push_op(OP_EQUALVERIFY)
        .push_data(&[scheme as u8])?
        .push_op(OP_CHECKSIGALT);
    Ok(finish(builder))
}

/// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_1 OP_CHECKSIGALT`
pub fn pay_to_pubkey_hash_ed25519_script(pubkey_hash: &[u8]) -> Result<Vec<u8>, Error> {
    pay_to_pubkey_hash_alt_script(pubkey_hash, SignatureScheme::Ed25519)
}

/// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_2 OP_CHECKSIGALT`
pub fn pay_to_pubkey_hash_schnorr_script(pubkey_hash: &[u8]) -> Result<Vec<u8>, Error> {
    pay_to_pubkey_hash_alt_script(pubkey_hash, SignatureScheme::SchnorrSecp256k1)
}

/// `OP_HASH160 <hash> OP_EQUAL`
pub fn pay_to_script_hash_script(script_hash: &[u8]) -> Result<Vec<u8>, Error> {
    let builder = Builder::new()
        .push_op(OP_HASH160)
        .push_data(script_hash)?
        .push_op(OP_EQUAL);
    Ok(finish(builder))
}

/// `<pubkey> OP_CHECKSIG`
pub fn pay_to_pubkey_script(serialized_pubkey: &[u8]) -> Result<Vec<u8>, Error> {
    let builder = Builder::new()
        .push_data(serialized_pubkey)?
        .push_op(OP_CHECKSIG);
    Ok(finish(builder))
}

fn pay_to_alt_pubkey_script(
    serialized_pubkey: &[u8],
    scheme: SignatureScheme,
) -> Result<Vec<u8>, Error> {
    let builder = Builder::new()
        .push_data(serialized_pubkey)?
        .push_data(&[scheme as u8])?
        .push_op(OP_CHECKSIGALT);
    Ok(finish(builder))
}

/// `<pubkey> OP_1 OP_CHECKSIGALT`
pub fn pay_to_ed25519_pubkey_script(serialized_pubkey: &[u8]) -> Result<Vec<u8>, Error> {
    pay_to_alt_pubkey_script(serialized_pubkey, SignatureScheme::Ed25519)
}

/// `<pubkey> OP_2 OP_CHECKSIGALT`
pub fn pay_to_schnorr_pubkey_script(serialized_pubkey: &[u8]) -> Result<Vec<u8>, Error> {
    pay_to_alt_pubkey_script(serialized_pubkey, SignatureScheme::SchnorrSecp256k1)
}

/// Creates a script paying to the given address.
pub fn pay_to_addr_script<'a>(addr: impl Into<Option<&'a Address>>) -> Result<Vec<u8>, Error> {
    let addr = addr.into().ok_or(Error::NilAddress)?;
    let script_address = addr.script_address();

    match addr {
        Address::PubKeyHash { scheme, .. } => match scheme {
            SignatureScheme::EcdsaSecp256k1 => pay_to_pubkey_hash_script(&script_address),
            SignatureScheme::Ed25519 => pay_to_pubkey_hash_ed25519_script(&script_address),
            SignatureScheme::SchnorrSecp256k1 => pay_to_pubkey_hash_schnorr_script(&script_address),
        },
        Address::ScriptHash { .. } => pay_to_script_hash_script(&script_address),
        Address::PubKeySecp256k1 { .. } => pay_to_pubkey_script(&script_address),
        Address::PubKeyEd25519 { .. } => pay_to_ed25519_pubkey_script(&script_address),
        Address::PubKeySchnorrSecp256k1 { .. } => pay_to_schnorr_pubkey_script(&script_address),
    }
}

/// Destination of a stake output.
enum StakeDestination {
    PubKeyHash([u8; 20]),
    ScriptHash([u8; 20]),
}

impl StakeDestination {
    /// Stake outputs may only pay ECDSA pubkey hashes or script hashes.
    fn from_address<'a>(addr: impl Into<Option<&'a Address>>) -> Result<Self, Error> {
        match addr.into().ok_or(Error::NilAddress)? {
            Address::PubKeyHash { hash, scheme, .. } => {
                if *scheme != SignatureScheme::EcdsaSecp256k1 {
                    return Err(Error::UnsupportedAddress(
                        "unsupported digital signature algorithm",
                    ));
                }
                Ok(Self::PubKeyHash(*hash))
            }
            Address::ScriptHash { hash, .. } => Ok(Self::ScriptHash(*hash)),
            other => Err(Error::UnsupportedAddress(other.kind())),
        }
    }
}

fn pay_to_stake_pkh_script(stake_opcode: u8, pubkey_hash: &[u8]) -> Result<Vec<u8>, Error> {
    let builder = Builder::new()
        .push_op(stake_opcode)
        .push_op(OP_DUP)
        .push_op(OP_HASH160)
        .push_data(pubkey_hash)?
        .push_op(OP_EQUALVERIFY)
        .push_op(OP_CHECKSIG);
    Ok(finish(builder))
}

fn pay_to_stake_sh_script(stake_opcode: u8, script_hash: &[u8]) -> Result<Vec<u8>, Error> {
    let builder = Builder::new()
        .push_op(stake_opcode)
        .push_op(OP_HASH160)
        .push_data(script_hash)?
        .push_op(OP_EQUAL);
    Ok(finish(builder))
}

fn pay_to_stake_addr_script<'a>(
    stake_opcode: u8,
    addr: impl Into<Option<&'a Address>>,
) -> Result<Vec<u8>, Error> {
    match StakeDestination::from_address(addr)? {
        StakeDestination::PubKeyHash(hash) => pay_to_stake_pkh_script(stake_opcode, &hash),
        StakeDestination::ScriptHash(hash) => pay_to_stake_sh_script(stake_opcode, &hash),
    }
}

/// Pays a ticket submission output, tagged with `OP_SSTX`.
pub fn pay_to_sstx<'a>(addr: impl Into<Option<&'a Address>>) -> Result<Vec<u8>, Error> {
    pay_to_stake_addr_script(OP_SSTX, addr)
}

/// Pays the change of a ticket submission, tagged with `OP_SSTXCHANGE`.
pub fn pay_to_sstx_change<'a>(addr: impl Into<Option<&'a Address>>) -> Result<Vec<u8>, Error> {
    pay_to_stake_addr_script(OP_SSTXCHANGE, addr)
}

/// Pays a vote reward, tagged with `OP_SSGEN`.
pub fn pay_to_ssgen<'a>(addr: impl Into<Option<&'a Address>>) -> Result<Vec<u8>, Error> {
    pay_to_stake_addr_script(OP_SSGEN, addr)
}

/// Pays `OP_SSGEN` tagged P2PKH output directly to a pubkey hash.
pub fn pay_to_ssgen_pkh_direct(pubkey_hash: &[u8]) -> Result<Vec<u8>, Error> {
    pay_to_stake_pkh_script(OP_SSGEN, pubkey_hash)
}

pub fn pay_to_ssgen_sh_direct(script_hash: &[u8]) -> Result<Vec<u8>, Error> {
    pay_to_stake_sh_script(OP_SSGEN, script_hash)
}

/// Pays a ticket revocation, tagged with `OP_SSRTX`.
pub fn pay_to_ssrtx<'a>(addr: impl Into<Option<&'a Address>>) -> Result<Vec<u8>, Error> {
    pay_to_stake_addr_script(OP_SSRTX, addr)
}

pub fn pay_to_ssrtx_pkh_direct(pubkey_hash: &[u8]) -> Result<Vec<u8>, Error> {
    pay_to_stake_pkh_script(OP_SSRTX, pubkey_hash)
}

pub fn pay_to_ssrtx_sh_direct(script_hash: &[u8]) -> Result<Vec<u8>, Error> {
    pay_to_stake_sh_script(OP_SSRTX, script_hash)
}

/// Creates an `m`-of-`n` multisig script from compressed public keys.
pub fn multisig_script(pubkeys: &[PublicKey], required: usize) -> Result<Vec<u8>, Error> {
    if pubkeys.len() < required {
        return Err(Error::TooManyRequiredSigs {
            required,
            available: pubkeys.len(),
        });
    }

    let mut builder = Builder::new().push_int(required as i64);
    for key in pubkeys {
        builder = builder.push_data(&key.serialize())?;
    }
    let builder = builder
        .push_int(pubkeys.len() as i64)
        .push_op(OP_CHECKMULTISIG);
    Ok(finish(builder))
}

/// Creates a provably prunable `OP_RETURN <data>` script.
pub fn generate_provably_prunable_out(data: &[u8]) -> Result<Vec<u8>, Error> {
    if data.len() > MAX_DATA_CARRIER_SIZE {
        return Err(Error::TooMuchNullData { size: data.len() });
    }

    let builder = Builder::new().push_op(OP_RETURN).push_data(data)?;
    Ok(finish(builder))
}

/// Creates the `OP_RETURN` commitment of a ticket submission.
///
/// The 30-byte payload is the destination hash, the amount as a little endian
/// u64 and the fee limits as a little endian u16. Bit 7 of byte 27, the most
/// significant bit of the amount, flags a script hash destination.
pub fn generate_sstx_addr_push<'a>(
    addr: impl Into<Option<&'a Address>>,
    amount: u64,
    limits: u16,
) -> Result<Vec<u8>, Error> {
    let (hash, is_script_hash) = match StakeDestination::from_address(addr)? {
        StakeDestination::PubKeyHash(hash) => (hash, false),
        StakeDestination::ScriptHash(hash) => (hash, true),
    };

    let mut payload = [0u8; 30];
    payload[..20].copy_from_slice(&hash);
    payload[20..28].copy_from_slice(&amount.to_le_bytes());
    payload[28..].copy_from_slice(&limits.to_le_bytes());
    if is_script_hash {
        payload[27] |= SSTX_SCRIPT_HASH_FLAG;
    }

    let builder = Builder::new().push_op(OP_RETURN).push_data(&payload)?;
    Ok(finish(builder))
}

/// Creates the `OP_RETURN` reference to the block a vote is cast on.
pub fn generate_ssgen_block_ref(block_hash: &[u8; 32], height: u32) -> Result<Vec<u8>, Error> {
    let mut payload = [0u8; 36];
    payload[..32].copy_from_slice(block_hash);
    payload[32..].copy_from_slice(&height.to_le_bytes());

    let builder = Builder::new().push_op(OP_RETURN).push_data(&payload)?;
    Ok(finish(builder))
}

/// Creates the `OP_RETURN` vote bits of a vote.
pub fn generate_ssgen_votes(vote_bits: u16) -> Result<Vec<u8>, Error> {
    let builder = Builder::new()
        .push_op(OP_RETURN)
        .push_data(&vote_bits.to_le_bytes())?;
    Ok(finish(builder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_data_pushes() {
        let push = |data: &[u8]| finish(Builder::new().push_data(data).unwrap());

        assert_eq!(push(&[]), vec![OP_0]);
        assert_eq!(push(&[0]), vec![OP_0]);
        assert_eq!(push(&[1]), vec![OP_1]);
        assert_eq!(push(&[16]), vec![OP_16]);
        assert_eq!(push(&[17]), vec![OP_DATA_1, 17]);
        assert_eq!(push(&[0x81]), vec![OP_1NEGATE]);
        assert_eq!(push(&[0, 0]), vec![0x02, 0, 0]);

        let mut expected = vec![OP_DATA_75];
        expected.extend_from_slice(&[0xab; 75]);
        assert_eq!(push(&[0xab; 75]), expected);

        let mut expected = vec![OP_PUSHDATA1, 76];
        expected.extend_from_slice(&[0xab; 76]);
        assert_eq!(push(&[0xab; 76]), expected);

        let pushed = push(&[0xab; 256]);
        assert_eq!(&pushed[..3], &[OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(pushed.len(), 259);
    }

    #[test]
    fn test_vote_payloads() {
        assert_eq!(generate_ssgen_votes(0x1234).unwrap(), vec![OP_RETURN, 0x02, 0x34, 0x12]);
        // A single vote bit is still a 2-byte push.
        assert_eq!(generate_ssgen_votes(1).unwrap(), vec![OP_RETURN, 0x02, 0x01, 0x00]);

        let block_ref = generate_ssgen_block_ref(&[0xcd; 32], 0x0102_0304).unwrap();
        assert_eq!(block_ref.len(), 38);
        assert_eq!(&block_ref[..2], &[OP_RETURN, 36]);
        assert_eq!(&block_ref[2..34], &[0xcd; 32]);
        assert_eq!(&block_ref[34..], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_provably_prunable_out_limit() {
        assert_eq!(generate_provably_prunable_out(&[]).unwrap(), vec![OP_RETURN, OP_0]);
        assert!(generate_provably_prunable_out(&[0u8; 256]).is_ok());
        assert_eq!(
            generate_provably_prunable_out(&[0u8; 257]),
            Err(Error::TooMuchNullData { size: 257 })
        );
    }
}
