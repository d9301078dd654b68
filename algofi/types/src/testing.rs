use {
    crate::{Address, AppId, ApplicationState, NodeClient},
    async_trait::async_trait,
    std::{
        collections::HashMap,
        sync::{PoisonError, RwLock},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockError {
    #[error("application {0} not found")]
    ApplicationNotFound(AppId),

    #[error("mock node lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for MockError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// An in-memory node for tests.
///
/// State can be swapped out through a shared reference, so a test can hand
/// the client to its consumer and still change what the "chain" returns.
#[derive(Debug, Default)]
pub struct MockNodeClient {
    global_states: RwLock<HashMap<AppId, ApplicationState>>,
    local_states: RwLock<HashMap<(Address, AppId), ApplicationState>>,
}

impl MockNodeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global_state(self, app_id: AppId, state: ApplicationState) -> Self {
        self.set_global_state(app_id, state);
        self
    }

    pub fn with_local_state(
        self,
        account: Address,
        app_id: AppId,
        state: ApplicationState,
    ) -> Self {
        self.set_local_state(account, app_id, state);
        self
    }

    pub fn set_global_state(&self, app_id: AppId, state: ApplicationState) {
        self.global_states
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(app_id, state);
    }

    pub fn set_local_state(&self, account: Address, app_id: AppId, state: ApplicationState) {
        self.local_states
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((account, app_id), state);
    }
}

#[async_trait]
impl NodeClient for MockNodeClient {
    type Error = MockError;

    async fn fetch_global_state(&self, app_id: AppId) -> Result<ApplicationState, Self::Error> {
        self.global_states
            .read()?
            .get(&app_id)
            .cloned()
            .ok_or(MockError::ApplicationNotFound(app_id))
    }

    async fn fetch_local_state(
        &self,
        account: &Address,
        app_id: AppId,
    ) -> Result<ApplicationState, Self::Error> {
        Ok(self
            .local_states
            .read()?
            .get(&(*account, app_id))
            .cloned()
            .unwrap_or_default())
    }
}

// ----------------------------------- tests -----------------------------------
