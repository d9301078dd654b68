use {
    algofi_types::{ApplicationState, StateResult, TealKeyValue},
    serde::Deserialize,
};

/// Response of `GET /v2/applications/{app_id}`.
#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationResponse {
    pub params: ApplicationParams,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationParams {
    #[serde(default)]
    pub global_state: Vec<TealKeyValue>,
}

impl ApplicationResponse {
    pub fn into_state(self) -> StateResult<ApplicationState> {
        ApplicationState::from_key_values(self.params.global_state)
    }
}

/// Response of `GET /v2/accounts/{address}/applications/{app_id}`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct AccountApplicationResponse {
    #[serde(default)]
    pub app_local_state: Option<ApplicationLocalState>,
    /// Round at which the node read the state.
    pub round: u64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationLocalState {
    #[serde(default)]
    pub key_value: Vec<TealKeyValue>,
}

impl AccountApplicationResponse {
    /// The account's local state, or an empty one if it hasn't opted in.
    pub fn into_state(self) -> StateResult<ApplicationState> {
        match self.app_local_state {
            Some(local) => ApplicationState::from_key_values(local.key_value),
            None => Ok(ApplicationState::new()),
        }
    }
}

// ----------------------------------- tests -----------------------------------
