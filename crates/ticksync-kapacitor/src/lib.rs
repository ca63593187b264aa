//! Kapacitor engine access for ticksync.
//!
//! Implements the core [`ticksync_core::reconcile::RemoteMutator`] trait
//! over the Kapacitor v1 HTTP task API, plus the read side that fetches the
//! engine's current task ids at run start.

pub mod client;
pub mod config;
pub mod payload;

pub use client::KapacitorClient;
pub use config::{Credentials, EngineConfig};
