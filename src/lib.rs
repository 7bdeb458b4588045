//! # Dayreport
//!
//! Backend for a daily report portal: staff submit one report per day, managers
//! read the reports their role covers and are notified of new submissions.
//! Usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! dayreport = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dayreport::config::ServerConfig;
//! use dayreport::server::{AppState, create_router};
//! use dayreport::store::{SqliteStore, Store};
//!
//! let config = ServerConfig::default();
//! let store = SqliteStore::new(config.db_path()).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), &config));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `dayreport` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod functions;
pub mod reports;
pub mod server;
pub mod store;
pub mod types;
