use {algofi_types::StateError, reqwest::StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("node responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Error returned by [`Manager`](crate::Manager) operations.
///
/// Transport failures are passed through untouched; everything else comes from
/// decoding the state the node returned.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Transport(E),

    #[error(transparent)]
    State(#[from] StateError),
}

impl<E> ManagerError<E>
where
    E: std::error::Error + 'static,
{
    /// Whether the failure is a required field being absent, e.g. an account
    /// without a storage address.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::State(err) if err.is_missing_field())
    }
}

pub type ManagerResult<T, E> = core::result::Result<T, ManagerError<E>>;
