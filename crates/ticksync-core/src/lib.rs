//! Core reconciliation logic for ticksync.
//!
//! This crate is transport-free: it knows how to discover alert definition
//! files, rewrite their bodies for a target environment, and compute the
//! create/update/delete set that converges a remote engine's task registry
//! on the local files. Talking to an actual engine happens behind the
//! [`reconcile::RemoteMutator`] trait, implemented elsewhere.

pub mod discover;
pub mod params;
pub mod reconcile;
pub mod template;
