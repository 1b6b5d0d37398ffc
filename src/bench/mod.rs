//! Load-test driver.
//!
//! # Data Flow
//! ```text
//! CLI flags
//!     → plan.rs (targets, stages, think time, SLO)
//!     → runner.rs (virtual users per stage, one timed GET per target per iteration)
//!     → report.rs (per-target stats, comparison, thresholds, text/JSON)
//! ```
//!
//! # Design Decisions
//! - Each stage holds a fixed number of virtual users until its deadline
//! - Every call is sampled; success means 200 within the SLO
//! - Workers keep samples locally and hand them back when the stage ends

pub mod plan;
pub mod report;
pub mod runner;

use thiserror::Error;

pub use plan::{LoadPlan, Stage, Target};
pub use report::Report;
pub use runner::{run, Sample};

/// Errors raised by the load-test driver.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid duration `{0}` (expected e.g. 500ms, 30s, 2m)")]
    InvalidDuration(String),

    #[error("invalid stage `{0}` (expected <duration>:<users>, e.g. 30s:100)")]
    InvalidStage(String),

    #[error("invalid target `{0}` (expected <name>=<url> or <url>)")]
    InvalidTarget(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
