#![warn(missing_docs)]

//! # Hashgrid client
//!
//! Async client for a Hashgrid service: a coordination point where
//! independently owned *nodes* exchange short text messages with *peers*
//! across discrete time steps (*ticks*).
//!
//! ## Overview
//!
//! A typical agent:
//!
//! 1. **Connects** with [`Hashgrid::connect`], getting a [`Grid`]
//! 2. **Listens** for tick changes with [`Grid::listen`]
//! 3. For each tick, walks its **nodes** with [`Grid::nodes`]
//! 4. For each node, calls [`Node::recv`] and answers with [`Node::send`]
//!
//! ## Key Features
//!
//! - **Typed records**: [`GridInfo`], [`NodeInfo`], [`Edge`], [`Message`], [`Status`]
//! - **Error mapping**: 401, 404 and 422 map to dedicated [`HashgridError`] variants
//! - **Cancellable polling**: tick streams stop as soon as they are dropped or cancelled
//! - **Explicit sessions**: requests before `open` or after `close` fail fast
//! - **Id-addressed resources**: [`resources`] for callers managing many nodes
//!
//! ## Client Usage
//!
//! ```ignore
//! use futures::StreamExt;
//! use hashgrid::{ClientConfig, Hashgrid};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> hashgrid::Result<()> {
//!     let mut grid = Hashgrid::connect(ClientConfig::from_env()?).await?;
//!     let nodes = grid.list_nodes().await?;
//!
//!     let mut ticks = grid.listen(Duration::from_secs(30));
//!     while let Some(tick) = ticks.next().await {
//!         for node in &nodes {
//!             let replies: Vec<_> = node
//!                 .recv()
//!                 .await?
//!                 .iter()
//!                 .map(|m| m.reply(m.message.chars().rev().collect::<String>()).with_score(0.9))
//!                 .collect();
//!             node.send(&replies).await?;
//!         }
//!         println!("handled tick {}", tick);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - HTTP client, session lifecycle, configuration
//! - **[error]** - Error types and result handling
//! - **[types]** - Records mirroring the server's JSON
//! - **[resources]** - Endpoint wrappers addressed by node id
//! - **[listen]** - Tick polling state machine

pub mod client;
pub mod error;
pub mod grid;
pub mod listen;
pub mod node;
pub mod resources;
pub mod types;

pub use client::{ClientConfig, Hashgrid, SessionGuard, SessionState};
pub use error::{HashgridError, Result};
pub use grid::Grid;
pub use listen::{TickPoller, TickSource, TickStream, MIN_POLL_INTERVAL};
pub use node::Node;
pub use types::{
    clamp_score, statuses_by_peer, ApiResponse, Edge, GridInfo, Message, NewNode, NodeInfo,
    NodeUpdate, Quota, Status, Tick, User,
};
