use super::parse_short_form;
use crate::opcodes::*;
use crate::{
    Address, AddressError, ChainParams, Error, ScriptClass, SignatureScheme, classify,
    extract_multisig_script_details, generate_provably_prunable_out, generate_sstx_addr_push,
    multisig_script, pay_to_addr_script, pay_to_ssgen_pkh_direct, pay_to_ssgen_sh_direct,
    pay_to_ssrtx_pkh_direct, pay_to_ssrtx_sh_direct, pay_to_sstx, pay_to_sstx_change,
    pay_to_pubkey_hash_script, pay_to_pubkey_script, pay_to_script_hash_script,
};
use bitcoin::secp256k1::PublicKey;
use hex_literal::hex;

const PUBKEY_1: [u8; 33] = hex!("02192d74d0cb94344c9569c2e77901573d8d7903c3ebec3a957724895dca52c6b4");
const PUBKEY_2: [u8; 33] = hex!("03b0bd634234abbb1ba1e986e884185c61cf43e001f9137f23c2c409273eb16e65");
const PUBKEY_3: [u8; 33] = hex!("0232abdc893e7f0631364d7fd01cb33d24da45329a00357b3a7886211ab414d55a");

fn pubkeys() -> Vec<PublicKey> {
    [PUBKEY_1, PUBKEY_2, PUBKEY_3]
        .iter()
        .map(|key| PublicKey::from_slice(key).unwrap())
        .collect()
}

#[test]
fn test_pay_to_standard_scripts() {
    let hash = hex!("433ec2ac1ffa1b7b7d027f564529c57197f9ae88");

    assert_eq!(
        pay_to_pubkey_hash_script(&hash).unwrap(),
        parse_short_form(
            "DUP HASH160 DATA_20 0x433ec2ac1ffa1b7b7d027f564529c57197f9ae88 EQUALVERIFY CHECKSIG"
        )
    );
    assert_eq!(
        pay_to_script_hash_script(&hash).unwrap(),
        parse_short_form("HASH160 DATA_20 0x433ec2ac1ffa1b7b7d027f564529c57197f9ae88 EQUAL")
    );
    assert_eq!(
        pay_to_pubkey_script(&PUBKEY_1).unwrap(),
        parse_short_form(
            "DATA_33 0x02192d74d0cb94344c9569c2e77901573d8d7903c3ebec3a957724895dca52c6b4 CHECKSIG"
        )
    );

    // The direct builders do not validate the payload length.
    let short = pay_to_pubkey_hash_script(&hash[..19]).unwrap();
    assert_eq!(classify(0, &short), ScriptClass::NonStandard);
}

#[test]
fn test_pay_to_addr_script_nil_address() {
    assert_eq!(pay_to_addr_script(None), Err(Error::NilAddress));
    assert_eq!(pay_to_sstx(None), Err(Error::NilAddress));
    assert_eq!(generate_sstx_addr_push(None, 0, 0), Err(Error::NilAddress));
}

#[test]
fn test_stake_builders_reject_unsupported_addresses() {
    let params = ChainParams::mainnet();
    let hash = [0x21; 20];

    let ed25519_pkh = Address::pubkey_hash(&hash, &params, SignatureScheme::Ed25519).unwrap();
    assert_eq!(
        pay_to_sstx(&ed25519_pkh),
        Err(Error::UnsupportedAddress("unsupported digital signature algorithm"))
    );

    let pubkey = Address::secp256k1_pubkey(&PUBKEY_1, &params).unwrap();
    assert_eq!(
        pay_to_sstx_change(&pubkey),
        Err(Error::UnsupportedAddress("secp256k1 pubkey address"))
    );
    assert!(matches!(
        generate_sstx_addr_push(&pubkey, 1, 0),
        Err(Error::UnsupportedAddress(_))
    ));
}

#[test]
fn test_direct_stake_builders() {
    let hash = hex!("433ec2ac1ffa1b7b7d027f564529c57197f9ae88");

    let tests = [
        (pay_to_ssgen_pkh_direct(&hash), ScriptClass::StakeGeneration, OP_SSGEN, OP_DUP),
        (pay_to_ssgen_sh_direct(&hash), ScriptClass::StakeGeneration, OP_SSGEN, OP_HASH160),
        (pay_to_ssrtx_pkh_direct(&hash), ScriptClass::StakeRevocation, OP_SSRTX, OP_DUP),
        (pay_to_ssrtx_sh_direct(&hash), ScriptClass::StakeRevocation, OP_SSRTX, OP_HASH160),
    ];

    for (script, class, tag, body_start) in tests {
        let script = script.unwrap();
        assert_eq!(script[0], tag);
        assert_eq!(script[1], body_start);
        assert_eq!(classify(0, &script), class);
    }
}

#[test]
fn test_multisig_script() {
    let keys = pubkeys();

    let script = multisig_script(&keys, 2).unwrap();
    assert_eq!(
        script,
        parse_short_form(
            "2 \
            DATA_33 0x02192d74d0cb94344c9569c2e77901573d8d7903c3ebec3a957724895dca52c6b4 \
            DATA_33 0x03b0bd634234abbb1ba1e986e884185c61cf43e001f9137f23c2c409273eb16e65 \
            DATA_33 0x0232abdc893e7f0631364d7fd01cb33d24da45329a00357b3a7886211ab414d55a \
            3 CHECKMULTISIG"
        )
    );

    let details = extract_multisig_script_details(0, &script, true);
    assert!(details.valid);
    assert_eq!(details.required_sigs, 2);
    assert_eq!(details.pubkeys, vec![&PUBKEY_1[..], &PUBKEY_2[..], &PUBKEY_3[..]]);

    assert_eq!(
        multisig_script(&keys, 4),
        Err(Error::TooManyRequiredSigs {
            required: 4,
            available: 3
        })
    );

    // Zero required signatures is allowed by the builder.
    let script = multisig_script(&keys[..1], 0).unwrap();
    assert_eq!(script[0], OP_0);
    assert_eq!(classify(0, &script), ScriptClass::MultiSig);
}

#[test]
fn test_sstx_commitment_layout() {
    let params = ChainParams::mainnet();
    let hash = hex!("660d4ef3a743e3e696ad990364e555c271ad504b");
    let amount = 0x0000_0012_3456_789a_u64;
    let limits = 0x5800;

    let pkh = Address::pubkey_hash(&hash, &params, SignatureScheme::EcdsaSecp256k1).unwrap();
    let script = generate_sstx_addr_push(&pkh, amount, limits).unwrap();
    assert_eq!(script.len(), 32);
    assert_eq!(&script[..2], &[OP_RETURN, 30]);
    assert_eq!(&script[2..22], &hash);
    assert_eq!(&script[22..30], &amount.to_le_bytes());
    assert_eq!(&script[30..], &[0x00, 0x58]);
    assert_eq!(classify(0, &script), ScriptClass::NullData);

    let sh = Address::script_hash_from_hash(&hash, &params).unwrap();
    let flagged = generate_sstx_addr_push(&sh, amount, limits).unwrap();
    // Only the most significant bit of the amount differs.
    assert_eq!(flagged[29], script[29] | 0x80);
    assert_eq!(&flagged[..29], &script[..29]);
    assert_eq!(&flagged[30..], &script[30..]);
}

#[test]
fn test_provably_prunable_out() {
    let script = generate_provably_prunable_out(&[0x12, 0x34]).unwrap();
    assert_eq!(script, vec![OP_RETURN, 0x02, 0x12, 0x34]);
    assert_eq!(classify(0, &script), ScriptClass::NullData);

    // Single small values use the small integer opcodes.
    assert_eq!(generate_provably_prunable_out(&[5]).unwrap(), vec![OP_RETURN, OP_1 + 4]);

    let script = generate_provably_prunable_out(&[0xee; 256]).unwrap();
    assert_eq!(classify(0, &script), ScriptClass::NullData);
}

#[test]
fn test_address_error_surfaces() {
    let params = ChainParams::mainnet();
    let err = Address::secp256k1_pubkey(&PUBKEY_1[..32], &params).unwrap_err();
    assert!(matches!(
        Error::from(err),
        Error::Address(AddressError::InvalidSecp256k1Key(_))
    ));
}
