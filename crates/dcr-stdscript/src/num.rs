//! Script numbers.

/// Script number error type.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum NumError {
    #[error("script number of {len} bytes exceeds the maximum of {max}")]
    Overflow { len: usize, max: usize },
    #[error("non-minimally encoded script number")]
    NotMinimallyEncoded,
}

/// A little-endian, sign-magnitude integer as pushed by scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScriptNum {
    value: i64,
}

impl From<i64> for ScriptNum {
    fn from(value: i64) -> Self {
        Self { value }
    }
}

impl ScriptNum {
    /// Default maximum length of a script number in bytes.
    pub const MAX_NUM_SIZE: usize = 4;

    /// Length limit used for lock times, which exceed the 4-byte range.
    pub const LOCK_TIME_NUM_SIZE: usize = 5;

    /// Decodes a minimally encoded script number of at most `max_size` bytes.
    pub fn from_bytes(data: &[u8], max_size: usize) -> Result<Self, NumError> {
        if data.len() > max_size {
            return Err(NumError::Overflow {
                len: data.len(),
                max: max_size,
            });
        }

        let Some(&last) = data.last() else {
            return Ok(Self { value: 0 });
        };

        if !Self::is_minimally_encoded(data) {
            return Err(NumError::NotMinimallyEncoded);
        }

        let mut result = 0i64;
        for (i, &byte) in data.iter().enumerate() {
            result |= i64::from(byte) << (8 * i);
        }

        // The most significant bit of the last byte is the sign.
        if last & 0x80 != 0 {
            let sign_bit = 0x80i64 << (8 * (data.len() - 1));
            return Ok(Self {
                value: -(result & !sign_bit),
            });
        }

        Ok(Self { value: result })
    }

    /// Serializes the number using the minimal encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.value == 0 {
            return Vec::new();
        }

        let negative = self.value < 0;
        let mut abs_value = self.value.unsigned_abs();
        let mut result = Vec::with_capacity(9);
        while abs_value != 0 {
            result.push((abs_value & 0xff) as u8);
            abs_value >>= 8;
        }

        let last = result.len() - 1;
        if result[last] & 0x80 != 0 {
            result.push(if negative { 0x80 } else { 0 });
        } else if negative {
            result[last] |= 0x80;
        }

        result
    }

    /// Any byte sequence whose most significant byte carries nothing but the
    /// sign is non-minimal, unless it is needed to keep the sign of the
    /// preceding byte.
    fn is_minimally_encoded(data: &[u8]) -> bool {
        match data {
            [] => true,
            [.., last] if last & 0x7f != 0 => true,
            [_] => false,
            [.., second_last, _] => second_last & 0x80 != 0,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_num_to_bytes() {
        let tests = [
            (0i64, ""),
            (1, "01"),
            (-1, "81"),
            (127, "7f"),
            (-127, "ff"),
            (128, "8000"),
            (-128, "8080"),
            (256, "0001"),
            (-256, "0081"),
            (32767, "ff7f"),
            (32768, "008000"),
            (2147483647, "ffffff7f"),
            (-2147483648, "0000008080"),
            (4294967295, "ffffffff00"),
            (549755813887, "ffffffff7f"),
        ];

        for (num, expected) in tests {
            assert_eq!(
                hex::encode(ScriptNum::from(num).to_bytes()),
                expected,
                "unexpected encoding of {num}"
            );
        }
    }

    #[test]
    fn test_script_num_from_bytes() {
        let tests = [
            ("", 4, Ok(0)),
            ("01", 4, Ok(1)),
            ("81", 4, Ok(-1)),
            ("7f", 4, Ok(127)),
            ("ff", 4, Ok(-127)),
            ("8000", 4, Ok(128)),
            ("8080", 4, Ok(-128)),
            ("0081", 4, Ok(-256)),
            ("ffffff7f", 4, Ok(2147483647)),
            ("ffffffff", 4, Ok(-2147483647)),
            ("ffffffff7f", 5, Ok(549755813887)),
            ("ffffffffff", 5, Ok(-549755813887)),
            ("0000008000", 4, Err(NumError::Overflow { len: 5, max: 4 })),
            ("000000000001", 5, Err(NumError::Overflow { len: 6, max: 5 })),
            ("80", 4, Err(NumError::NotMinimallyEncoded)),
            ("00", 4, Err(NumError::NotMinimallyEncoded)),
            ("0100", 4, Err(NumError::NotMinimallyEncoded)),
            ("7f00", 4, Err(NumError::NotMinimallyEncoded)),
            ("800000", 4, Err(NumError::NotMinimallyEncoded)),
            ("0009000100", 5, Err(NumError::NotMinimallyEncoded)),
        ];

        for (serialized, max_size, expected) in tests {
            let bytes = hex::decode(serialized).unwrap();
            let result = ScriptNum::from_bytes(&bytes, max_size).map(|num| num.value());
            assert_eq!(result, expected, "unexpected result decoding {serialized}");
        }
    }

    #[test]
    fn test_script_num_round_trip_within_lock_time_range() {
        for value in [0i64, 16, 17, -17, 500_000_000, 1_700_000_000, 0xff_ffff_ffff >> 1] {
            let bytes = ScriptNum::from(value).to_bytes();
            let decoded = ScriptNum::from_bytes(&bytes, ScriptNum::LOCK_TIME_NUM_SIZE).unwrap();
            assert_eq!(decoded.value(), value);
        }
    }
}
