//! Document structure discovery.
//!
//! Scans an ordered block sequence for chapter headings, computes the
//! content range each chapter owns, and diagnoses whether the physical
//! chapter order matches the canonical (numeric) order.

mod analyzer;
mod boundary;
mod extractor;

pub use analyzer::analyze_structure;
pub use boundary::resolve_boundaries;
pub use extractor::extract_chapters;
