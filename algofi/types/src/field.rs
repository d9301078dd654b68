use {
    crate::{Address, StateError, StateResult},
    serde::{Serialize, Serializer},
    std::collections::{btree_map, BTreeMap},
};

/// How the raw value under a field's key is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A TEAL uint, passed through unchanged.
    Integer,
    /// A TEAL byte slice holding a 32-byte public key.
    Address,
}

/// A decoded field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Integer(u64),
    Address(Address),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            FieldValue::Address(_) => None,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            FieldValue::Address(address) => Some(address),
            FieldValue::Integer(_) => None,
        }
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<Address> for FieldValue {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Integer(value) => serializer.serialize_u64(*value),
            FieldValue::Address(address) => address.serialize(serializer),
        }
    }
}

/// Describes one field of a contract's state: the logical name it is exposed
/// under, the raw key it is stored under, how to decode it, and what to use
/// when the key is absent.
///
/// A field without a default is required; its absence is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
    pub default: Option<FieldValue>,
}

impl FieldSpec {
    /// An integer field that defaults to zero when absent.
    pub const fn integer(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            kind: FieldKind::Integer,
            default: Some(FieldValue::Integer(0)),
        }
    }

    /// An address field that must be present.
    pub const fn required_address(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            kind: FieldKind::Address,
            default: None,
        }
    }

    pub const fn with_default(mut self, default: FieldValue) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// The result of decoding a raw state against a table of [`FieldSpec`]s,
/// keyed by logical field name.
///
/// Decoding always yields either a complete `DecodedState` (one entry per
/// spec) or an error; there are no partial results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DecodedState {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl DecodedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: &'static str, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(name, value)
    }

    /// Read an integer field. Errors if the field is not present or is not an
    /// integer.
    pub fn integer(&self, name: &'static str) -> StateResult<u64> {
        match self.fields.get(name) {
            Some(FieldValue::Integer(value)) => Ok(*value),
            Some(FieldValue::Address(_)) => {
                Err(StateError::decode(name, "expecting an integer, found an address"))
            },
            None => Err(StateError::missing_field(name, name.as_bytes())),
        }
    }

    /// Read an address field. Errors if the field is not present or is not an
    /// address.
    pub fn address(&self, name: &'static str) -> StateResult<Address> {
        match self.fields.get(name) {
            Some(FieldValue::Address(address)) => Ok(*address),
            Some(FieldValue::Integer(_)) => {
                Err(StateError::decode(name, "expecting an address, found an integer"))
            },
            None => Err(StateError::missing_field(name, name.as_bytes())),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, &'static str, FieldValue> {
        self.fields.iter()
    }
}

impl FromIterator<(&'static str, FieldValue)> for DecodedState {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (&'static str, FieldValue)>,
    {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
