use {data_encoding::BASE64, std::any::type_name};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("required field `{field}` not found! storage key: {key}")]
    MissingField { field: &'static str, key: String },

    #[error("failed to decode field `{field}`: {reason}")]
    Decode { field: &'static str, reason: String },

    #[error("invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("invalid TEAL value type code {type_code}; must be 1 (bytes) or 2 (uint)")]
    InvalidTealType { type_code: u8 },

    #[error("failed to deserialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Deserialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },
}

impl StateError {
    pub fn missing_field(field: &'static str, key: &[u8]) -> Self {
        let key = match std::str::from_utf8(key) {
            Ok(key) => key.to_string(),
            Err(_) => BASE64.encode(key),
        };

        Self::MissingField { field, key }
    }

    pub fn decode<R>(field: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Decode {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn invalid_address<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::InvalidAddress {
            reason: reason.to_string(),
        }
    }

    pub fn deserialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Deserialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is the "required field absent" case, as opposed to a
    /// malformed value.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

pub type StateResult<T> = core::result::Result<T, StateError>;
