//! Synchronous client for the Clockify time-tracking API.
//!
//! # Overview
//! `ClockifyClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `Clockify` pairs it with a
//! `Transport` (ureq by default) and exposes the endpoint catalogue:
//! projects, project membership, users and clients.
//!
//! # Design
//! - The API key is an explicit `ClockifyConfig` argument, immutable once
//!   built; there is no process-wide credential.
//! - Which base URL (`/api` or `/api/v1`) an endpoint uses is a fixed table
//!   in `routes`, not a runtime decision.
//! - Mutating verbs always send JSON.
//! - Every non-2xx response surfaces as `ClockifyError::HttpRequest` with the
//!   raw status and body; nothing is retried.
//!
//! ```no_run
//! use clockify_core::{Clockify, ClockifyConfig};
//!
//! # fn main() -> clockify_core::Result<()> {
//! let api = Clockify::new(ClockifyConfig::from_env()?);
//! let acme = api.find_client_by_name("workspace-id", "Acme")?;
//! let project = api.create_project("workspace-id", "Website", Some(acme.id.as_str()), ["user-id"])?;
//! api.archive_project("workspace-id", &project.id)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod color;
pub mod config;
pub mod error;
pub mod http;
pub mod routes;
pub mod transport;
pub mod types;

pub use api::{Clockify, MAX_PAGES};
pub use client::ClockifyClient;
pub use color::ColorStrategy;
pub use config::ClockifyConfig;
pub use error::{ClockifyError, Result};
pub use http::{ApiBase, HttpMethod, HttpRequest, HttpResponse};
pub use routes::Route;
pub use transport::{Transport, UreqTransport};
pub use types::{Client, Membership, MembershipsUpdate, NewClient, NewProject, Project, ProjectUpdate, User};
