//! The query listener/server.

pub mod core;

pub use core::{QueryServer, QueryShutdownHandle};
