use {
    crate::{Address, AppId, ApplicationState},
    async_trait::async_trait,
};

/// A handle to a node that can read application state.
///
/// Implementations own the transport: connection setup, authentication,
/// timeouts. Their errors are handed back to callers as is.
#[async_trait]
pub trait NodeClient {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the global state of an application.
    async fn fetch_global_state(&self, app_id: AppId) -> Result<ApplicationState, Self::Error>;

    /// Read an account's local state in an application. An account that has
    /// not opted in has an empty local state.
    async fn fetch_local_state(
        &self,
        account: &Address,
        app_id: AppId,
    ) -> Result<ApplicationState, Self::Error>;
}

#[async_trait]
impl<C> NodeClient for &C
where
    C: NodeClient + Sync,
{
    type Error = C::Error;

    async fn fetch_global_state(&self, app_id: AppId) -> Result<ApplicationState, Self::Error> {
        (**self).fetch_global_state(app_id).await
    }

    async fn fetch_local_state(
        &self,
        account: &Address,
        app_id: AppId,
    ) -> Result<ApplicationState, Self::Error> {
        (**self).fetch_local_state(account, app_id).await
    }
}
