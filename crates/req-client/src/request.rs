//! Request envelope construction.

use crate::config::ClientConfig;
use crate::session::SessionState;
use req_core::{ReqError, Result};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, ORIGIN,
    REFERER,
};
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::warn;

/// Top-level body key wrapping the criteria object
pub const CRITERIA_KEY: &str = "critere";

const ACCEPT_VALUE: &str = "application/json, text/javascript, */*; q=0.01";
const CONTENT_TYPE_VALUE: &str = "application/json; charset=UTF-8";
const X_REQUESTED_WITH: &str = "x-requested-with";

/// Remote operations exposed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Enterprise details by NEQ
    Lookup,
    /// Keyword search over enterprise names
    Search,
}

impl Operation {
    /// Path appended to the base URL
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Lookup => "/ObtenirEtatsRensEntreprise",
            Self::Search => "/ObtenirListeEntreprises",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A fully built request, ready to hand to an [`HttpExecutor`](crate::HttpExecutor)
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// JSON body
    pub body: Value,
}

/// Builds request envelopes from fixed defaults, session state and criteria
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    headers: HeaderMap,
}

impl RequestBuilder {
    /// Create a builder from the client configuration.
    ///
    /// Fails if a configured header value is not a valid HTTP header value.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(ACCEPT_LANGUAGE, header_value("accept_language", &config.accept_language)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_VALUE));
        headers.insert(ORIGIN, header_value("origin", &config.origin)?);
        headers.insert(REFERER, header_value("referer", &config.referer)?);
        headers.insert(
            HeaderName::from_static(X_REQUESTED_WITH),
            HeaderValue::from_static("XMLHttpRequest"),
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// Base URL operation paths are appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the envelope for one call.
    ///
    /// The criteria object starts from the accepted-terms flag and the current
    /// session key; `criteria` is laid over it, so caller fields win.
    #[must_use]
    pub fn build(
        &self,
        method: Method,
        operation: Operation,
        criteria: Map<String, Value>,
        session: &SessionState,
    ) -> RequestEnvelope {
        let mut headers = self.headers.clone();
        if let Some(cookie) = session.cookie().filter(|c| !c.is_empty()) {
            match HeaderValue::from_str(cookie) {
                Ok(value) => {
                    headers.insert(COOKIE, value);
                }
                Err(_) => warn!(cookie, "stored cookie is not a valid header value, not sending it"),
            }
        }

        let mut critere = Map::new();
        critere.insert(
            "UtilisateurAccepteConditionsUtilisation".into(),
            Value::Bool(true),
        );
        critere.insert(
            "CleSession".into(),
            session
                .session_key()
                .map_or(Value::Null, |key| Value::String(key.to_string())),
        );
        critere.extend(criteria);

        let mut body = Map::new();
        body.insert(CRITERIA_KEY.into(), Value::Object(critere));

        RequestEnvelope {
            method,
            url: format!("{}{}", self.base_url, operation.path()),
            headers,
            body: Value::Object(body),
        }
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ReqError::Config(format!("invalid {name} header value: {e}")))
}
