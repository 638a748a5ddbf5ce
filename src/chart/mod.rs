//! Chart rendering layer: view models, builders, and canvas slot ownership.

pub mod registry;
pub mod view_builder;
pub mod view_models;

pub use registry::{ChartHandle, ChartRegistry};
pub use view_builder::{build_confidence_chart, build_parameter_bars};
pub use view_models::{ConfidenceBar, ConfidenceChart, FitLevel, ParameterBar};
