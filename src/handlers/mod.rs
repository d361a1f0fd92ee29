//! HTTP handler modules.
//! Used by: server.

pub mod health;
pub mod report;
