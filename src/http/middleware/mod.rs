//! Request middleware.

pub mod trace_context;

pub use trace_context::propagate_inbound_context;
