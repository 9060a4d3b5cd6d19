//! Document rebuilding in canonical chapter order.
//!
//! The rebuild is staged entirely as a new, independent block sequence;
//! nothing in the source document is mutated. Persisting the result is the
//! caller's decision and happens only after the full sequence exists.

mod builder;
mod renumber;

pub use builder::rebuild_document;
pub use renumber::{renumber_subsections, RenumberChange};
