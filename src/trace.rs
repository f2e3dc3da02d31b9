//! Process-wide statement trace.
//!
//! The statement executor itself lives outside this crate; what it feeds
//! is observable here. Tracing is off until configured, so the store costs
//! nothing in the common path and can be disabled wholesale in tests.

use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceConfig {
    pub trace_sql: bool,
    pub trace_last_retrieve: bool,
    pub trace_last_execute: bool,
}

impl TraceConfig {
    pub fn all() -> Self {
        Self {
            trace_sql: true,
            trace_last_retrieve: true,
            trace_last_execute: true,
        }
    }
}

#[derive(Debug, Default)]
struct TraceState {
    config: TraceConfig,
    last_sql: Option<String>,
    last_retrieve: Option<String>,
    last_execute: Option<String>,
}

fn state() -> &'static Mutex<TraceState> {
    static STATE: OnceLock<Mutex<TraceState>> = OnceLock::new();
    STATE.get_or_init(|| Mutex::new(TraceState::default()))
}

pub fn configure(config: TraceConfig) {
    state().lock().unwrap().config = config;
}

/// Record a retrieval statement if tracing is enabled for it.
pub fn trace_retrieve(statement: &str) {
    let mut state = state().lock().unwrap();
    if state.config.trace_sql {
        state.last_sql = Some(statement.to_string());
    }
    if state.config.trace_last_retrieve {
        state.last_retrieve = Some(statement.to_string());
    }
}

/// Record an execution statement if tracing is enabled for it.
pub fn trace_execute(statement: &str) {
    let mut state = state().lock().unwrap();
    if state.config.trace_sql {
        state.last_sql = Some(statement.to_string());
    }
    if state.config.trace_last_execute {
        state.last_execute = Some(statement.to_string());
    }
}

pub fn last_sql() -> Option<String> {
    state().lock().unwrap().last_sql.clone()
}

pub fn last_retrieve() -> Option<String> {
    state().lock().unwrap().last_retrieve.clone()
}

pub fn last_execute() -> Option<String> {
    state().lock().unwrap().last_execute.clone()
}

/// Drop all recorded statements and disable tracing.
pub fn reset() {
    *state().lock().unwrap() = TraceState::default();
}
