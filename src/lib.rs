//! Warmpool - a prewarmed LLM client connection pool.
//!
//! Long-lived consumers (bots, agents, debate pairs) each own one or two
//! model slots. Warmpool keeps a small set of ready client handles per slot
//! so a request never pays for client construction, and recycles handles
//! when a slot's configuration changes or they sit idle too long.
//!
//! # Architecture
//!
//! - [`domain`] - Keys, model configs, stats. No I/O.
//! - [`port`] - The seams: [`Llm`](port::outbound::llm::Llm) handles, the
//!   [`ClientFactory`](port::outbound::factory::ClientFactory) that builds
//!   them and a [`Clock`](port::outbound::clock::Clock).
//! - [`application`] - The [`ConnectionRegistry`](application::pool::registry::ConnectionRegistry)
//!   and its background [`Reaper`](application::pool::reaper::Reaper).
//! - [`adapter`] - OpenAI and Anthropic clients, and the `warmpool` CLI.
//! - [`infrastructure`] - Config loading, startup wiring, status file.
//!
//! # Example
//!
//! ```no_run
//! use warmpool::adapter::outbound::llm::factory::LlmClientFactory;
//! use warmpool::application::pool::config::PoolConfig;
//! use warmpool::application::pool::registry::ConnectionRegistry;
//! use warmpool::domain::{id::ConsumerId, key::PoolKey, model::ModelConfig, model::Provider};
//!
//! # async fn demo() -> warmpool::error::Result<()> {
//! let registry = ConnectionRegistry::with_system_clock(
//!     PoolConfig::default(),
//!     LlmClientFactory::new().into_client_factory(),
//! )?;
//!
//! let key = PoolKey::primary(ConsumerId::new("42"));
//! let model = ModelConfig::new(Provider::OpenAi, "gpt-4o-mini", "sk-...");
//! registry.prewarm_key(&key, &model)?;
//!
//! let lease = registry.acquire(&key, &model)?;
//! let answer = lease.client().complete("Say hi").await;
//! registry.release(lease.id());
//! println!("{}", answer?);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
