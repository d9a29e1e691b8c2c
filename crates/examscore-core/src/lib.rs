//! examscore-core — answer matching, band tables, and score aggregation.
//!
//! This crate defines the data model and the pure scoring pipeline the
//! examscore system builds on: normalize → match → score → band → aggregate.

pub mod bands;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod scorer;
