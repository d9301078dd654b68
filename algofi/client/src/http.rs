use {
    crate::{AccountApplicationResponse, ApplicationResponse, ClientError},
    algofi_types::{Address, AppId, ApplicationState, NodeClient},
    async_trait::async_trait,
    reqwest::{IntoUrl, StatusCode},
    tracing::{debug, info},
    url::Url,
};

/// Header carrying the algod API token.
pub const API_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Client for the algod v2 REST API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpClient {
    pub fn new<U>(endpoint: U) -> Result<Self, ClientError>
    where
        U: IntoUrl,
    {
        Self::from_inner(reqwest::Client::new(), endpoint)
    }

    /// Use a preconfigured `reqwest` client, e.g. one with timeouts set.
    pub fn from_inner<U>(inner: reqwest::Client, endpoint: U) -> Result<Self, ClientError>
    where
        U: IntoUrl,
    {
        let mut endpoint = endpoint.into_url()?;

        // `Url::join` replaces the last path segment unless the base ends
        // with a slash.
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Ok(Self {
            inner,
            endpoint,
            token: None,
        })
    }

    pub fn with_token<T>(mut self, token: T) -> Self
    where
        T: Into<String>,
    {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.endpoint.join(path)?)
    }

    /// Send a GET request. Returns `None` on 404; any other non-success status
    /// is an error.
    async fn get(&self, path: &str) -> Result<Option<reqwest::Response>, ClientError> {
        let url = self.url(path)?;

        debug!(%url, "Sending request to algod");

        let mut request = self.inner.get(url);
        if let Some(token) = &self.token {
            request = request.header(API_TOKEN_HEADER, token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(Some(response))
    }
}

#[async_trait]
impl NodeClient for HttpClient {
    type Error = ClientError;

    async fn fetch_global_state(&self, app_id: AppId) -> Result<ApplicationState, Self::Error> {
        let path = format!("v2/applications/{app_id}");

        let Some(response) = self.get(&path).await? else {
            return Err(ClientError::Status {
                status: StatusCode::NOT_FOUND,
                body: format!("application {app_id} not found"),
            });
        };

        let state = response.json::<ApplicationResponse>().await?.into_state()?;

        info!(app_id, entries = state.len(), "Fetched global state");

        Ok(state)
    }

    async fn fetch_local_state(
        &self,
        account: &Address,
        app_id: AppId,
    ) -> Result<ApplicationState, Self::Error> {
        let path = format!("v2/accounts/{account}/applications/{app_id}");

        // algod answers 404 when the account hasn't opted in.
        let Some(response) = self.get(&path).await? else {
            info!(app_id, %account, "Account has not opted in");
            return Ok(ApplicationState::new());
        };

        let response = response.json::<AccountApplicationResponse>().await?;
        let round = response.round;
        let state = response.into_state()?;

        info!(
            app_id,
            %account,
            round,
            entries = state.len(),
            "Fetched local state"
        );

        Ok(state)
    }
}

// ----------------------------------- tests -----------------------------------
