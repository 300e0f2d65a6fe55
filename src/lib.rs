//! Vizier cluster health console.
//!
//! Polls a managed cluster's status over GraphQL and routes between two
//! views: a navigation shell when the cluster is healthy, deployment
//! instructions when it is not.
//!
//! See `DESIGN.md` for architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cluster;
pub mod config;
pub mod logging;
pub mod query;
pub mod router;
pub mod watch;
