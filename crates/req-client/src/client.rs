//! Main REQ client implementation.

use crate::config::ClientConfig;
use crate::executor::{HttpExecutor, HttpResponse, ReqwestExecutor};
use crate::request::{Operation, RequestBuilder};
use crate::session::SessionState;
use futures_util::stream::{self, Stream};
use req_core::{ReqError, Result, SearchOptions, SearchResponse};
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::Method;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Key under which the service nests its actual payload
const ENVELOPE_KEY: &str = "d";

/// Payload field carrying the session key to echo on the next request
const SESSION_KEY_FIELD: &str = "CleSession";

/// Client for the Quebec Business Register lookup service.
///
/// Every call carries the session key and cookie obtained from the previous
/// response. Clones share one session; their calls are serialized, so a
/// response is always fully applied before the next request is built.
#[derive(Clone)]
pub struct ReqClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    requests: RequestBuilder,
    connection: Mutex<Connection>,
}

struct Connection {
    http: Option<Box<dyn HttpExecutor>>,
    session: SessionState,
}

impl ReqClient {
    /// Create a client against the public service with default settings
    pub fn new() -> Result<Self> {
        ReqClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> ReqClientBuilder {
        ReqClientBuilder::new()
    }

    /// Get the registered information of an enterprise by its NEQ.
    ///
    /// The unwrapped payload is returned as-is.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let enterprise = client.lookup_by_identifier("1234567890").await?;
    /// println!("{:?}", enterprise.get("Nom"));
    /// ```
    pub async fn lookup_by_identifier(&self, neq: &str) -> Result<Map<String, Value>> {
        let mut criteria = Map::new();
        criteria.insert("Id".into(), Value::String(neq.to_string()));
        self.request(Method::POST, Operation::Lookup, criteria).await
    }

    /// Search enterprises by keywords
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let results = client.search(&SearchOptions::new("boulangerie")).await?;
    /// println!("{} enterprises", results.total_records);
    /// ```
    pub async fn search(&self, options: &SearchOptions) -> Result<SearchResponse> {
        let payload = self
            .request(Method::POST, Operation::Search, options.to_criteria())
            .await?;
        SearchResponse::from_payload(payload)
    }

    /// Walk the result pages of a search, starting at `options.page`.
    ///
    /// Pages are fetched lazily and one at a time; the stream ends after the
    /// last page reported by the service or after the first error.
    pub fn search_pages(
        &self,
        options: SearchOptions,
    ) -> impl Stream<Item = Result<SearchResponse>> + '_ {
        stream::try_unfold(Some(options), move |next| async move {
            let Some(options) = next else {
                return Ok(None);
            };

            let page = self.search(&options).await?;
            let requested = options.requested_page();
            let following = (i64::from(requested) + 1 < i64::from(page.total_pages))
                .then(|| options.page(requested + 1));

            Ok::<_, ReqError>(Some((page, following)))
        })
    }

    /// Snapshot of the current session key and cookie
    pub async fn session(&self) -> SessionState {
        self.inner.connection.lock().await.session.clone()
    }

    /// Release the HTTP executor.
    ///
    /// Later calls fail with [`ReqError::Closed`]. Closing twice is a no-op.
    /// Dropping the last clone of a client releases the executor as well.
    pub async fn close(&self) {
        if self.inner.connection.lock().await.http.take().is_some() {
            debug!("REQ client closed");
        }
    }

    /// Returns true once [`close`](Self::close) has been called
    pub async fn is_closed(&self) -> bool {
        self.inner.connection.lock().await.http.is_none()
    }

    /// Perform one round trip and return the unwrapped payload.
    ///
    /// The session lock is held for the whole call, so concurrent callers
    /// queue up instead of racing on the session key.
    pub async fn request(
        &self,
        method: Method,
        operation: Operation,
        criteria: Map<String, Value>,
    ) -> Result<Map<String, Value>> {
        let mut connection = self.inner.connection.lock().await;
        let Connection { http, session } = &mut *connection;
        let http = http.as_ref().ok_or(ReqError::Closed)?;

        let envelope = self.inner.requests.build(method, operation, criteria, session);
        debug!(%operation, url = %envelope.url, "REQ request");

        let response = http.execute(envelope).await?;
        Self::handle_response(session, &response)
    }

    /// Check the status, absorb cookie and session key, unwrap the payload
    fn handle_response(session: &mut SessionState, response: &HttpResponse) -> Result<Map<String, Value>> {
        if response.status != 200 {
            warn!(status = response.status, "REQ service returned an error status");
            return Err(ReqError::status(response.status, &response.body));
        }

        session.update(None, extract_cookie(&response.headers));

        let parsed: Value = serde_json::from_str(&response.body)
            .map_err(|e| ReqError::parse(e, &response.body))?;

        let payload = match parsed {
            Value::Object(mut outer) => match outer.remove(ENVELOPE_KEY) {
                Some(inner) => inner,
                None => Value::Object(outer),
            },
            other => other,
        };

        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => return Err(ReqError::NullPayload),
            other => return Err(ReqError::UnexpectedPayload(json_kind(&other))),
        };

        session.update(session_key_of(&payload), None);

        Ok(payload)
    }
}

/// First space-delimited token of the first `Set-Cookie` header.
///
/// This keeps `name=value;` and drops the attributes that follow. It does not
/// handle several cookies folded into one header. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD rather than dropping the cookie.
fn extract_cookie(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(SET_COOKIE)?;
    let value = String::from_utf8_lossy(value.as_bytes());
    value.split(' ').next().map(str::to_string)
}

/// Session key announced by a payload.
///
/// An absent or `null` `CleSession` yields `None`, which leaves the stored key
/// in place: once set, the session key is only ever replaced by a newer one,
/// never cleared. Non-string values are kept as their JSON text.
fn session_key_of(payload: &Map<String, Value>) -> Option<String> {
    match payload.get(SESSION_KEY_FIELD)? {
        Value::Null => None,
        Value::String(key) => Some(key.clone()),
        other => Some(other.to_string()),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builder for configuring a [`ReqClient`]
pub struct ReqClientBuilder {
    config: ClientConfig,
    timeout: Option<Duration>,
    executor: Option<Box<dyn HttpExecutor>>,
}

impl Default for ReqClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqClientBuilder {
    /// Create a builder with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    /// Create a builder from a loaded configuration
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            timeout: config.timeout(),
            config,
            executor: None,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the `Referer` header
    #[must_use]
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.config.referer = referer.into();
        self
    }

    /// Set the `Origin` header
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Set a whole-request timeout. There is none by default.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Use a custom HTTP executor instead of the built-in `reqwest` one.
    ///
    /// The `user_agent` and `timeout` settings only apply to the built-in executor.
    #[must_use]
    pub fn executor(mut self, executor: impl HttpExecutor + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ReqClient> {
        url::Url::parse(&self.config.base_url)
            .map_err(|e| ReqError::InvalidUrl(format!("{}: {e}", self.config.base_url)))?;

        let requests = RequestBuilder::new(&self.config)?;
        let http: Box<dyn HttpExecutor> = match self.executor {
            Some(executor) => executor,
            None => Box::new(ReqwestExecutor::new(&self.config.user_agent, self.timeout)?),
        };

        Ok(ReqClient {
            inner: Arc::new(ClientInner {
                requests,
                connection: Mutex::new(Connection {
                    http: Some(http),
                    session: SessionState::new(),
                }),
            }),
        })
    }
}
