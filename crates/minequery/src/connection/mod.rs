//! Per-connection query handling.
//!
//! Each accepted connection is owned entirely by one responder task for the
//! duration of a single request/response exchange.

pub(crate) mod responder;
