//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the connection registry and the outside
//! world: the client handles it pools, the factory that builds them and the
//! clock that ages them. Inbound ports describe what the CLI may ask of
//! the running system without knowing how it is wired.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │   ConnectionRegistry    │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │   Llm   │            │  Client     │              │   Clock   │
//! │ Adapter │            │  Factory    │              │           │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod inbound;
pub mod outbound;
