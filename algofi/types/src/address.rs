use {
    crate::{AppId, StateError, StateResult},
    data_encoding::BASE32_NOPAD,
    serde::{de, ser},
    sha2::{Digest, Sha512_256},
    std::{
        fmt::{self, Debug, Display},
        str::FromStr,
    },
};

/// Domain separator prepended to an application id when deriving its escrow
/// account.
const APP_ID_PREFIX: &[u8] = b"appID";

/// An Algorand account address.
///
/// Internally this is the 32-byte Ed25519 public key. The string form is the
/// base32 encoding (without padding) of the public key followed by a 4-byte
/// checksum, which is the last 4 bytes of `sha512_256(public_key)`. The result
/// is always 58 characters long.
///
/// Parsing a string validates both the length and the checksum, so an
/// `Address` that was successfully deserialized is always well formed.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; Address::LENGTH]);

impl Address {
    pub const CHECKSUM_LENGTH: usize = 4;
    pub const ENCODED_LENGTH: usize = 58;
    pub const LENGTH: usize = 32;

    pub const fn from_inner(public_key: [u8; Self::LENGTH]) -> Self {
        Self(public_key)
    }

    pub const fn into_inner(self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Interpret a byte slice, e.g. a value read from contract storage, as a
    /// public key. Fails unless the slice is exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> StateResult<Self> {
        slice.try_into().map(Self).map_err(|_| {
            StateError::invalid_address(format!(
                "expecting {} bytes, found {}",
                Self::LENGTH,
                slice.len()
            ))
        })
    }

    /// Compute the escrow address of an application:
    ///
    /// ```plain
    /// address := sha512_256("appID" | big_endian(app_id))
    /// ```
    pub fn for_application(app_id: AppId) -> Self {
        let mut hasher = Sha512_256::new();
        hasher.update(APP_ID_PREFIX);
        hasher.update(app_id.to_be_bytes());

        let mut bytes = [0; Self::LENGTH];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    /// Generate a mock address for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }

    fn checksum(&self) -> [u8; Self::CHECKSUM_LENGTH] {
        let hash = Sha512_256::digest(self.0);
        let mut checksum = [0; Self::CHECKSUM_LENGTH];
        checksum.copy_from_slice(&hash[hash.len() - Self::CHECKSUM_LENGTH..]);
        checksum
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; Address::LENGTH]> for Address {
    fn from(public_key: [u8; Address::LENGTH]) -> Self {
        Self(public_key)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut preimage = [0; Self::LENGTH + Self::CHECKSUM_LENGTH];
        preimage[..Self::LENGTH].copy_from_slice(&self.0);
        preimage[Self::LENGTH..].copy_from_slice(&self.checksum());

        f.write_str(&BASE32_NOPAD.encode(&preimage))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = StateError;

    fn from_str(s: &str) -> StateResult<Self> {
        if s.len() != Self::ENCODED_LENGTH {
            return Err(StateError::invalid_address(format!(
                "expecting {} characters, found {}",
                Self::ENCODED_LENGTH,
                s.len()
            )));
        }

        let bytes = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(StateError::invalid_address)?;

        let (public_key, checksum) = bytes.split_at(Self::LENGTH);
        let address = Self::from_slice(public_key)?;

        if checksum != address.checksum() {
            return Err(StateError::invalid_address("checksum mismatch"));
        }

        Ok(address)
    }
}

impl ser::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> de::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(AddressVisitor)
    }
}

struct AddressVisitor;

impl de::Visitor<'_> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a checksummed base32 Algorand address")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Address::from_str(v).map_err(E::custom)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    const ZERO_ADDRESS: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";

    #[test_case(
        [0; 32],
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";
        "all zeros"
    )]
    #[test_case(
        [0xff; 32],
        "7777777777777777777777777777777777777777777777777774MSJUVU";
        "all ones"
    )]
    #[test_case(
        [
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
            16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31,
        ],
        "AAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYP7MUPJQE";
        "counting bytes"
    )]
    fn stringify_and_parse(public_key: [u8; 32], expect: &str) {
        let address = Address::from_inner(public_key);
        assert_eq!(address.to_string(), expect);
        assert_eq!(Address::from_str(expect).unwrap(), address);
    }

    #[test_case(
        1,
        "WCS6TVPJRBSARHLN2326LRU5BYVJZUKI2VJ53CAWKYYHDE455ZGKANWMGM";
        "app 1"
    )]
    #[test_case(
        123,
        "WRBMNT66ECE2AOYKM76YVWIJMBW6Z3XCQZOKG5BL7NISAQC2LBGEKTZLRM";
        "app 123"
    )]
    #[test_case(
        465818260,
        "2SGUKZCOBEVGN3HPKSXPS6DTCXZ7LSP6G3BQF6KVUIUREBBY2QTGSON7WQ";
        "mainnet manager"
    )]
    fn application_address(app_id: AppId, expect: &str) {
        assert_eq!(Address::for_application(app_id).to_string(), expect);
    }

    #[test]
    fn rejecting_bad_checksum() {
        // Flip the last character of a valid address.
        let tampered = format!("{}A", &ZERO_ADDRESS[..ZERO_ADDRESS.len() - 1]);
        assert!(matches!(
            Address::from_str(&tampered),
            Err(StateError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn rejecting_bad_length() {
        assert!(Address::from_str(&ZERO_ADDRESS[1..]).is_err());
        assert!(Address::from_slice(&[0; 31]).is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&Address::mock(0)).unwrap();
        assert_eq!(json, format!("\"{ZERO_ADDRESS}\""));

        let address: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(address, Address::mock(0));
    }
}
