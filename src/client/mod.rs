//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{Credentials, OutboundMessage, SendReceipt, SessionToken, ValidationError};
use crate::transport::{self, TransportError};

pub const DEFAULT_API_BASE: &str = "https://api.clickatell.com/http/";

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ClickatellClient`].
///
/// HTTP status codes are not interpreted: the gateway signals failure in the body,
/// so only transport failures and `OK:`/`ERR:` replies are distinguished.
pub enum ClickatellError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// `http/auth` answered with something other than `OK: <session id>`.
    #[error("authentication rejected: {body}")]
    AuthRejected { body: String },

    /// `http/sendmsg` answered with `ERR: <code>`.
    #[error("message rejected: {body}")]
    SendRejected { body: String },

    /// The configured API base does not form a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ClickatellError {
    /// Raw gateway reply for rejected calls.
    pub fn gateway_body(&self) -> Option<&str> {
        match self {
            Self::AuthRejected { body } | Self::SendRejected { body } => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`ClickatellClient`].
///
/// Use this when you need to customize the API base, timeout, or user-agent.
pub struct ClickatellClientBuilder {
    api_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for ClickatellClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickatellClientBuilder {
    /// Create a builder with the default API base and no timeout/user-agent override.
    pub fn new() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the base URL that `auth` and `sendmsg` are resolved against.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set an HTTP client timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`ClickatellClient`].
    pub fn build(self) -> Result<ClickatellClient, ClickatellError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ClickatellError::Transport(Box::new(err)))?;

        Ok(ClickatellClient {
            api_base: self.api_base,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Clickatell HTTP API client.
///
/// Every notification takes one `auth` call for a session id, then one `sendmsg` call
/// per segment using that session. Both are plain `GET` requests with query parameters.
pub struct ClickatellClient {
    api_base: String,
    http: Arc<dyn HttpTransport>,
}

impl Default for ClickatellClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickatellClient {
    /// Create a client using [`DEFAULT_API_BASE`].
    ///
    /// For more customization, use [`ClickatellClient::builder`].
    pub fn new() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> ClickatellClientBuilder {
        ClickatellClientBuilder::new()
    }

    pub(crate) fn with_transport(
        api_base: impl Into<String>,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            http,
        }
    }

    /// Open a gateway session.
    ///
    /// Errors:
    /// - [`ClickatellError::AuthRejected`] unless the reply starts with `OK:` and carries a
    ///   session id,
    /// - [`ClickatellError::Transport`] when the request itself fails.
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionToken, ClickatellError> {
        let url = self.endpoint(
            transport::AUTH_PATH,
            transport::encode_auth_query(credentials),
        )?;
        tracing::debug!(user = credentials.username.as_str(), "requesting gateway session");

        let body = self.get(url).await?;
        let decoded = transport::decode_auth_response(&body);
        match decoded {
            Ok(session) => Ok(session),
            Err(TransportError::Rejected { body }) => Err(ClickatellError::AuthRejected { body }),
            Err(TransportError::EmptySession) => Err(ClickatellError::AuthRejected { body }),
        }
    }

    /// Send one message with an open session.
    ///
    /// Errors:
    /// - [`ClickatellError::SendRejected`] when the reply starts with `ERR:`,
    /// - [`ClickatellError::Transport`] when the request itself fails.
    pub async fn send_message(
        &self,
        session: &SessionToken,
        message: &OutboundMessage,
    ) -> Result<SendReceipt, ClickatellError> {
        let url = self.endpoint(
            transport::SEND_MSG_PATH,
            transport::encode_send_msg_query(session, message),
        )?;
        tracing::debug!(
            to = message.recipients().as_str(),
            chars = message.text().char_len(),
            "sending message"
        );

        let body = self.get(url).await?;
        let decoded = transport::decode_send_msg_response(&body);
        match decoded {
            Ok(receipt) => Ok(receipt),
            Err(TransportError::Rejected { body }) => Err(ClickatellError::SendRejected { body }),
            Err(TransportError::EmptySession) => Err(ClickatellError::SendRejected { body }),
        }
    }

    fn endpoint(&self, path: &str, params: Vec<(String, String)>) -> Result<Url, ClickatellError> {
        let base = self.api_base.trim_end_matches('/');
        Ok(Url::parse_with_params(&format!("{base}/{path}"), params)?)
    }

    async fn get(&self, url: Url) -> Result<String, ClickatellError> {
        let path = url.path().to_owned();
        let response = self
            .http
            .get(url)
            .await
            .map_err(ClickatellError::Transport)?;
        tracing::debug!(path = %path, status = response.status, "gateway replied");
        Ok(response.body)
    }
}
