//! Text analysis over the cleaned headline collection.
//!
//! Two independent, read-only sub-analyses:
//!
//! - [`keywords`]: substring frequency and co-occurrence counts
//! - [`topics`]: TF-IDF vectorization plus latent topic decomposition
//!
//! Both degrade gracefully: an empty collection yields zero counts, and a
//! corpus too sparse to model yields a reported degenerate condition instead
//! of a failure.

pub mod keywords;
pub mod topics;
