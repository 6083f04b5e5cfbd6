//! Subcommand implementations.

mod countries;
mod evaluate;
mod forecast;
mod train;

pub use countries::CountriesCommand;
pub use evaluate::EvaluateCommand;
pub use forecast::ForecastCommand;
pub use train::TrainCommand;
