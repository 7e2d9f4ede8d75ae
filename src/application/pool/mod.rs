//! Prewarmed connection registry.
//!
//! Keeps a bounded reserve of constructed LLM client handles per
//! `PoolKey` and lends them out to short-lived requests.
//!
//! # Architecture
//!
//! The registry owns every `Connection` in one of two places: the idle
//! queue of its key's `KeyPool`, or the registry-wide active map keyed by
//! `ConnectionId`. Callers receive a [`Lease`](connection::Lease) (id plus
//! a shared client handle) and hand the id back to
//! [`ConnectionRegistry::release`](registry::ConnectionRegistry::release).
//!
//! All structure (pools, active map, config cache, counters, closed flag)
//! sits behind a single mutex. The client handle itself is used outside the
//! lock. Acquire never waits: when the idle queue is empty a temporary
//! connection is built on the spot and recycled on release if the queue is
//! full by then.
//!
//! A per-key config snapshot detects drift. When a tracked field changes
//! between acquires, every connection of that key (idle and busy) is
//! recycled and the pool is rebuilt from the new config.
//!
//! Idle eviction runs from a separate [`Reaper`](reaper::Reaper) task.

pub mod config;
pub mod connection;
pub mod reaper;
pub mod registry;

mod config_cache;
mod key_pool;
mod state;
