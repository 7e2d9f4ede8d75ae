//! LLM adapter modules.
//!
//! Provides implementations of the [`Llm`](crate::port::outbound::llm::Llm) trait
//! for OpenAI-compatible and Anthropic endpoints, plus the factory the
//! connection registry uses to build them.

pub mod anthropic;
pub mod factory;
pub mod openai;

mod http;
