//! Hashgrid HTTP client implementation.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch    - Hashgrid client, session lifecycle and request dispatch
//! ├── response - status code to error mapping and body decoding
//! ├── config   - client configuration
//! └── utils    - URL building, default headers, record decoding
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Hashgrid`] | Client owning one HTTP session |
//! | [`SessionGuard`] | Open session closed on drop |
//! | [`SessionState`] | `Unopened` / `Open` / `Closed` |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ```
//! use hashgrid::client::{build_url, ClientConfig, Hashgrid, SessionState};
//!
//! let client = Hashgrid::new(ClientConfig::default().with_api_key("key"));
//! assert_eq!(client.state(), SessionState::Unopened);
//!
//! let url = build_url("https://dna.hashgrid.ai", "/api/v1/node", &[]).unwrap();
//! assert_eq!(url.path(), "/api/v1/node");
//! ```

mod config;
mod fetch;
mod response;
mod utils;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
pub use fetch::{Hashgrid, SessionGuard, SessionState};
pub use utils::{build_url, decode, decode_list, default_headers};
