//! Scenario inputs, their validation, and ways of loading them

mod args;
mod data;
pub mod loader;

pub use args::ScenarioArgs;
pub use data::{
    is_allowed_tax_rate, ScenarioParameters, ALLOWED_MARGINAL_TAX_RATES, DEFAULT_LAND_TAX,
    MAX_PROJECTION_YEARS,
};
pub(crate) use data::check_rate;
pub use loader::{load_scenario, load_scenario_from_reader};
