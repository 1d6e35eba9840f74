//! Fluent builder APIs for seeding scenarios.
//!
//! The [`ScenarioBuilder`] provides a convenient way to generate a complete,
//! internally consistent fixture set and seed it in dependency order.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioMetrics, ScenarioResult, ScenarioSummary};
