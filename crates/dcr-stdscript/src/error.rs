use crate::address::AddressError;
use crate::constants::MAX_DATA_CARRIER_SIZE;

/// Errors returned by the extraction, construction and analysis functions.
///
/// Classification never produces an error, malformed scripts simply classify
/// as non-standard.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("malformed script: {0:?}")]
    MalformedScript(bitcoin::script::Error),
    #[error("script {0} is not a multisig script")]
    NotMultisigScript(String),
    #[error("signature script is not push only")]
    NotPushOnly,
    #[error(
        "unable to generate multisig script with {required} required signatures \
        when there are only {available} public keys available"
    )]
    TooManyRequiredSigs { required: usize, available: usize },
    #[error("data size {size} is larger than max allowed size {MAX_DATA_CARRIER_SIZE}")]
    TooMuchNullData { size: usize },
    #[error("push of {0} bytes exceeds the maximum push size")]
    PushTooLarge(usize),
    #[error("unable to generate payment script for nil address")]
    NilAddress,
    #[error("unable to generate payment script for {0}")]
    UnsupportedAddress(&'static str),
    #[error("unsupported script version {0}")]
    UnsupportedScriptVersion(u16),
    #[error("not a stake output")]
    NotStakeOutput,
    #[error("wrong script type")]
    WrongScriptType,
    #[error("bad signature scheme type")]
    BadSignatureScheme,
    #[error(transparent)]
    Address(#[from] AddressError),
}
