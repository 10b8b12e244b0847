//! HTTP client for the Quebec Business Register lookup service.
//!
//! This crate provides the main [`ReqClient`] for looking up enterprises by
//! NEQ and running keyword searches, keeping the service's session key and
//! cookie in step from one call to the next.

#![doc(html_root_url = "https://docs.rs/req-client/1.0.0")]

mod client;
mod config;
mod executor;
mod request;
mod session;

pub use client::{ReqClient, ReqClientBuilder};
pub use config::*;
pub use executor::{HttpExecutor, HttpResponse, ReqwestExecutor};
pub use request::{Operation, RequestBuilder, RequestEnvelope};
pub use session::SessionState;
pub use req_core::{EnterpriseRecord, Result, ReqError, SearchOptions, SearchResponse};
pub use reqwest::Method;
