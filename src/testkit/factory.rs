//! Test client factories.
//!
//! - [`counting`]: always succeeds; shares a call counter.
//! - [`failing`]: always fails.
//! - [`scripted`]: pops a success/failure per call, succeeding when exhausted.
//! - [`switchable`]: toggled between healthy and failing by the test.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::llm::MockLlm;
use crate::domain::model::ModelConfig;
use crate::error::FactoryError;
use crate::port::outbound::factory::ClientFactory;
use crate::port::outbound::llm::Llm;

/// Factory returning a [`MockLlm`] for the configured model on every call.
pub fn counting(calls: Arc<AtomicU32>) -> ClientFactory {
    Arc::new(move |config: &ModelConfig| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockLlm::new(config.model.clone())) as Arc<dyn Llm>)
    })
}

/// Factory whose every call fails.
pub fn failing() -> ClientFactory {
    Arc::new(|_: &ModelConfig| Err(FactoryError::Unsupported("factory disabled".to_string())))
}

/// Factory following a script: `true` succeeds, `false` fails.
///
/// Calls beyond the end of the script succeed.
pub fn scripted(script: Vec<bool>) -> ClientFactory {
    let script = Mutex::new(VecDeque::from(script));
    Arc::new(move |config: &ModelConfig| {
        if script.lock().pop_front().unwrap_or(true) {
            Ok(Arc::new(MockLlm::new(config.model.clone())) as Arc<dyn Llm>)
        } else {
            Err(FactoryError::Http("scripted failure".to_string()))
        }
    })
}

/// Factory that can be switched between succeeding and failing at runtime.
pub fn switchable(healthy: Arc<AtomicBool>) -> ClientFactory {
    Arc::new(move |config: &ModelConfig| {
        if healthy.load(Ordering::SeqCst) {
            Ok(Arc::new(MockLlm::new(config.model.clone())) as Arc<dyn Llm>)
        } else {
            Err(FactoryError::Http("upstream down".to_string()))
        }
    })
}
