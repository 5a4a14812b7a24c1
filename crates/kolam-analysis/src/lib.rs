//! Pattern analysis for uploaded kolam drawings.
//!
//! This crate defines the analysis report shown on the Analyzer screen, the
//! [`PatternAnalyzer`] seam, and a canned [`MockAnalyzer`] used until a real
//! backend is wired in.

pub mod kinds;
pub mod report;

pub use kinds::*;
pub use report::*;
