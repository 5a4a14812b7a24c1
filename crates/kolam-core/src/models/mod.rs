//! Domain records for the kolam therapy system.

mod auth;
mod clinician;
mod design;
mod metrics;
mod patient;
mod task;

pub use auth::*;
pub use clinician::*;
pub use design::*;
pub use metrics::*;
pub use patient::*;
pub use task::*;
