//! UI components.

pub mod call_flow;
