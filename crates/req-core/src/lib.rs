//! Core types and errors for the Quebec Business Register client.
//!
//! This crate provides the foundational types used across the REQ library:
//!
//! - **Types**: Search options, enterprise records and the normalized search response
//! - **Errors**: The transport / parse / mapping taxonomy in [`ReqError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use req_core::{Result, SearchResponse};
//!
//! fn print_page(page: &SearchResponse) -> Result<()> {
//!     for enterprise in &page.enterprises {
//!         println!("{:?} {:?}", enterprise.id, enterprise.name);
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/req-core/1.0.0")]

mod error;
pub mod types;

pub use error::{Result, ReqError, BODY_SNIPPET_LEN};
pub use types::*;
