//! Pullover Headless Diagnostics
//!
//! Replays JSON gesture scenarios against a [`RefreshLayout`] without a UI,
//! checks assertions between steps, and produces a machine-readable report.
//!
//! # Example
//!
//! ```rust
//! use pullover_app::run_scenario;
//!
//! let outcome = run_scenario(
//!     r#"{
//!         "layout": { "header": 60 },
//!         "steps": [
//!             { "type": "start_session" },
//!             { "type": "drag", "delta": -140 },
//!             { "type": "end_session" },
//!             { "type": "settle" },
//!             { "type": "assert_offset", "value": -60 },
//!             { "type": "assert_events", "expected": ["header:start:70", "header:refresh"] }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//! assert!(!outcome.is_failed());
//! ```
//!
//! [`RefreshLayout`]: pullover_layout::RefreshLayout

mod error;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;

pub use error::{Result, ScenarioError};
pub use headless_report::{HeadlessReport, ReportStatus, RunTotals};
pub use headless_runner::{
    lint_scenario, run_loaded_scenario, run_scenario, run_scenario_with_config, RunOutcome,
};
pub use headless_runtime::HeadlessRunConfig;
pub use headless_scenario::{HeadlessScenario, LayoutSpec, ScenarioStep, SideSpec};
