use {
    crate::{ManagerError, ManagerResult},
    algofi_types::{
        decode_global, decode_local, Address, AppId, DecodedState, FieldValue, ManagerInfo,
        ManagerState, NodeClient, StorageLink, UserState, MANAGER_GLOBAL_FIELDS, USER_FIELDS,
        USER_STORAGE_FIELDS,
    },
    tracing::{debug, info},
};

/// Read-only accessor for the manager application.
///
/// Holds a snapshot of the manager's global state, taken at construction and
/// replaced as a whole on [`refresh`](Self::refresh). Per-account reads always
/// go to the node.
pub struct Manager<C> {
    client: C,
    app_id: AppId,
    address: Address,
    decoded: DecodedState,
    state: ManagerState,
}

impl<C> Manager<C>
where
    C: NodeClient,
{
    pub async fn new(client: C, app_id: AppId) -> ManagerResult<Self, C::Error> {
        let (decoded, state) = Self::load(&client, app_id).await?;

        Ok(Self {
            address: Address::for_application(app_id),
            client,
            app_id,
            decoded,
            state,
        })
    }

    pub async fn from_info(client: C, info: ManagerInfo) -> ManagerResult<Self, C::Error> {
        Self::new(client, info.manager_app_id).await
    }

    /// Fetch the latest global state. On error the previous snapshot is kept.
    pub async fn refresh(&mut self) -> ManagerResult<(), C::Error> {
        let (decoded, state) = Self::load(&self.client, self.app_id).await?;

        self.decoded = decoded;
        self.state = state;

        info!(app_id = self.app_id, "Refreshed manager state");

        Ok(())
    }

    async fn load(
        client: &C,
        app_id: AppId,
    ) -> ManagerResult<(DecodedState, ManagerState), C::Error> {
        let raw_state = client
            .fetch_global_state(app_id)
            .await
            .map_err(ManagerError::Transport)?;

        let decoded = decode_global(&raw_state, MANAGER_GLOBAL_FIELDS)?;
        let state = ManagerState::try_from(&decoded)?;

        Ok((decoded, state))
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    /// The manager application's escrow address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Look up a decoded global field by its logical name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.decoded.get(name)
    }

    pub fn decoded_state(&self) -> &DecodedState {
        &self.decoded
    }

    pub fn state(&self) -> &ManagerState {
        &self.state
    }

    pub fn rewards_program_number(&self) -> u64 {
        self.state.rewards_program_number
    }

    pub fn rewards_amount(&self) -> u64 {
        self.state.rewards_amount
    }

    pub fn rewards_per_second(&self) -> u64 {
        self.state.rewards_per_second
    }

    pub fn rewards_asset_id(&self) -> u64 {
        self.state.rewards_asset_id
    }

    pub fn rewards_secondary_ratio(&self) -> u64 {
        self.state.rewards_secondary_ratio
    }

    pub fn rewards_secondary_asset_id(&self) -> u64 {
        self.state.rewards_secondary_asset_id
    }

    pub fn rewards_asset_ids(&self) -> Vec<u64> {
        self.state.rewards_asset_ids()
    }

    /// The storage account that holds `account`'s position. Fails with a
    /// missing field error if the account has none.
    pub async fn storage_address(&self, account: &Address) -> ManagerResult<Address, C::Error> {
        let raw_state = self
            .client
            .fetch_local_state(account, self.app_id)
            .await
            .map_err(ManagerError::Transport)?;

        let decoded = decode_local(&raw_state, USER_STORAGE_FIELDS)?;
        let link = StorageLink::try_from(&decoded)?;

        debug!(
            %account,
            storage_address = %link.storage_address,
            "Resolved storage address"
        );

        Ok(link.storage_address)
    }

    /// Resolve `account`'s storage address, then decode the manager's local
    /// state of that storage account.
    pub async fn account_fields(
        &self,
        account: &Address,
    ) -> ManagerResult<DecodedState, C::Error> {
        let storage_address = self.storage_address(account).await?;

        let raw_state = self
            .client
            .fetch_local_state(&storage_address, self.app_id)
            .await
            .map_err(ManagerError::Transport)?;

        Ok(decode_local(&raw_state, USER_FIELDS)?)
    }

    /// Typed form of [`account_fields`](Self::account_fields).
    pub async fn user_state(&self, account: &Address) -> ManagerResult<UserState, C::Error> {
        let decoded = self.account_fields(account).await?;
        Ok(UserState::try_from(&decoded)?)
    }
}
