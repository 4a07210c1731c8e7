//! Data Transfer Objects for backend communication
//!
//! Request and response bodies exchanged with the hosted backend's REST
//! tables and analysis function.

pub mod analysis;
pub mod log;
