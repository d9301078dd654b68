use {
    crate::{StateError, StateResult},
    data_encoding::BASE64,
    serde::{Deserialize, Serialize},
    std::collections::{btree_map, BTreeMap},
};

/// Identifier of an application (smart contract) on the network.
pub type AppId = u64;

/// TEAL type code for byte slice values.
pub const TEAL_BYTES_TYPE: u8 = 1;

/// TEAL type code for unsigned integer values.
pub const TEAL_UINT_TYPE: u8 = 2;

/// A single value in an application's global or local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TealValue {
    /// Unsigned 64-bit integer, as stored.
    Uint(u64),
    /// Byte slice, still in the base64 encoding the node delivered it in.
    /// Decoding is deferred to whoever knows what the bytes mean.
    Bytes(String),
}

impl TealValue {
    pub fn bytes<B>(raw: B) -> Self
    where
        B: AsRef<[u8]>,
    {
        Self::Bytes(BASE64.encode(raw.as_ref()))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            TealValue::Uint(_) => "uint",
            TealValue::Bytes(_) => "bytes",
        }
    }
}

impl From<u64> for TealValue {
    fn from(uint: u64) -> Self {
        Self::Uint(uint)
    }
}

/// Value object in the node's JSON representation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TealValueJson {
    #[serde(rename = "type")]
    pub type_code: u8,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

/// Key-value entry in the node's JSON representation. The key is base64.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TealKeyValue {
    pub key: String,
    pub value: TealValueJson,
}

impl TryFrom<TealValueJson> for TealValue {
    type Error = StateError;

    fn try_from(json: TealValueJson) -> StateResult<Self> {
        match json.type_code {
            TEAL_BYTES_TYPE => Ok(TealValue::Bytes(json.bytes)),
            TEAL_UINT_TYPE => Ok(TealValue::Uint(json.uint)),
            type_code => Err(StateError::InvalidTealType { type_code }),
        }
    }
}

/// Raw key-value state of an application, either global or for one account.
///
/// This is an immutable snapshot of what the node returned at query time. Keys
/// are the raw storage keys (base64-decoded); values are left as delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationState {
    entries: BTreeMap<Vec<u8>, TealValue>,
}

impl ApplicationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from the node's list of key-value entries.
    pub fn from_key_values<I>(key_values: I) -> StateResult<Self>
    where
        I: IntoIterator<Item = TealKeyValue>,
    {
        key_values
            .into_iter()
            .map(|kv| -> StateResult<_> {
                let key = BASE64
                    .decode(kv.key.as_bytes())
                    .map_err(|err| StateError::deserialize::<Self, _>("base64", err))?;
                Ok((key, TealValue::try_from(kv.value)?))
            })
            .collect()
    }

    pub fn get<K>(&self, key: K) -> Option<&TealValue>
    where
        K: AsRef<[u8]>,
    {
        self.entries.get(key.as_ref())
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<TealValue>
    where
        K: Into<Vec<u8>>,
        V: Into<TealValue>,
    {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Vec<u8>, TealValue> {
        self.entries.iter()
    }
}

impl<K> FromIterator<(K, TealValue)> for ApplicationState
where
    K: Into<Vec<u8>>,
{
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, TealValue)>,
    {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K, const N: usize> From<[(K, TealValue); N]> for ApplicationState
where
    K: Into<Vec<u8>>,
{
    fn from(array: [(K, TealValue); N]) -> Self {
        array.into_iter().collect()
    }
}

// ----------------------------------- tests -----------------------------------
