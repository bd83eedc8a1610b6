//! Declarative run configuration
//!
//! A YAML [`WorkbenchSpec`] names the input files and every tunable of the
//! pipeline; [`validate_config`] checks it and the [`cli`] types map command
//! line flags onto it.

mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, Cli, Command, InspectArgs, PredictArgs, ReportArgs, RunArgs, ValidateArgs,
};
pub use loader::{load_config, parse_config};
pub use schema::{DataConfig, EvalConfig, FeatureSpec, OutputConfig, SplitConfig, TrainingParams, WorkbenchSpec};
pub use validate::{validate_config, ValidationError};
