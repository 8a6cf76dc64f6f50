use std::fmt;

/// Class of a standard output script.
///
/// The discriminants match the values used on the wire by RPC consumers and
/// must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScriptClass {
    NonStandard = 0,
    PubKey = 1,
    PubKeyHash = 2,
    ScriptHash = 3,
    MultiSig = 4,
    // unspendable OP_RETURN script that carries data.
    NullData = 5,
    StakeSubmission = 6,
    StakeGeneration = 7,
    StakeRevocation = 8,
    StakeSubmissionChange = 9,
    PubKeyAlt = 10,
    PubKeyHashAlt = 11,
}

/// Display names indexed by discriminant.
static CLASS_NAMES: [&str; 12] = [
    "nonstandard",
    "pubkey",
    "pubkeyhash",
    "scripthash",
    "multisig",
    "nulldata",
    "stakesubmission",
    "stakegen",
    "stakerevoke",
    "sstxchange",
    "pubkeyalt",
    "pubkeyhashalt",
];

impl ScriptClass {
    const ALL: [Self; 12] = [
        Self::NonStandard,
        Self::PubKey,
        Self::PubKeyHash,
        Self::ScriptHash,
        Self::MultiSig,
        Self::NullData,
        Self::StakeSubmission,
        Self::StakeGeneration,
        Self::StakeRevocation,
        Self::StakeSubmissionChange,
        Self::PubKeyAlt,
        Self::PubKeyHashAlt,
    ];

    /// Returns the class name as used in RPC responses.
    pub fn name(self) -> &'static str {
        CLASS_NAMES[self as usize]
    }

    /// Returns the name of a raw class value, `"Invalid"` when it is out of
    /// range.
    pub fn name_of(raw: u8) -> &'static str {
        CLASS_NAMES.get(raw as usize).copied().unwrap_or("Invalid")
    }

    /// Returns whether the class is one of the stake-tagged classes.
    pub fn is_stake(self) -> bool {
        matches!(
            self,
            Self::StakeSubmission
                | Self::StakeGeneration
                | Self::StakeRevocation
                | Self::StakeSubmissionChange
        )
    }
}

impl TryFrom<u8> for ScriptClass {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(raw as usize).copied().ok_or(raw)
    }
}

impl fmt::Display for ScriptClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_class_names() {
        let tests = [
            (ScriptClass::NonStandard, "nonstandard"),
            (ScriptClass::PubKey, "pubkey"),
            (ScriptClass::PubKeyAlt, "pubkeyalt"),
            (ScriptClass::PubKeyHash, "pubkeyhash"),
            (ScriptClass::PubKeyHashAlt, "pubkeyhashalt"),
            (ScriptClass::ScriptHash, "scripthash"),
            (ScriptClass::MultiSig, "multisig"),
            (ScriptClass::NullData, "nulldata"),
            (ScriptClass::StakeSubmission, "stakesubmission"),
            (ScriptClass::StakeGeneration, "stakegen"),
            (ScriptClass::StakeRevocation, "stakerevoke"),
            (ScriptClass::StakeSubmissionChange, "sstxchange"),
        ];
        for (class, name) in tests {
            assert_eq!(class.to_string(), name);
            assert_eq!(ScriptClass::name_of(class as u8), name);
        }
        assert_eq!(ScriptClass::name_of(12), "Invalid");
        assert_eq!(ScriptClass::name_of(u8::MAX), "Invalid");
    }

    #[test]
    fn test_script_class_from_raw() {
        for raw in 0..12u8 {
            assert_eq!(ScriptClass::try_from(raw).unwrap() as u8, raw);
        }
        assert_eq!(ScriptClass::try_from(12), Err(12));
    }
}
