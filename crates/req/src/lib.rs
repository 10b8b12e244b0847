//! Rust client for the Quebec Business Register (Registre des entreprises du Québec).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use req::{ReqClient, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> req::Result<()> {
//!     let client = ReqClient::new()?;
//!
//!     // Search enterprises by name
//!     let results = client
//!         .search(&SearchOptions::new("boulangerie").page(0))
//!         .await?;
//!     println!("{} enterprises on {} pages", results.total_records, results.total_pages);
//!
//!     // Look up the first one by NEQ, reusing the session from the search
//!     if let Some(neq) = results.enterprises.first().and_then(|e| e.id.as_deref()) {
//!         let details = client.lookup_by_identifier(neq).await?;
//!         println!("{details:#?}");
//!     }
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/req/1.0.0")]

// Re-export core types
pub use req_core::*;

// Re-export client
pub use req_client::{
    ClientConfig, HttpExecutor, HttpResponse, Method, Operation, ReqClient, ReqClientBuilder,
    ReqwestExecutor, RequestEnvelope, SessionState,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
