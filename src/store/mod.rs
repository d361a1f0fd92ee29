//! Detection store backends.
//! Used by: state, report, handlers.

pub mod sqlite;
