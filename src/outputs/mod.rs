//! Persistence sinks for the cleaned article collection.
//!
//! Two sinks, written independently and non-transactionally with respect to
//! each other:
//!
//! - [`csv`]: a flat UTF-8 comma-separated file, fully overwritten each run
//! - [`sqlite`]: a single `articles` table, replaced wholesale each run
//!
//! A failure in one sink is reported to the caller and does not block the
//! other sink or abort the run.

pub mod csv;
pub mod sqlite;
