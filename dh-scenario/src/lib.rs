pub mod error;
pub mod logger;
pub mod scenario;
pub mod scenario_report;


pub use error::{Result, ScenarioError};
pub use scenario::run;
pub use scenario_report::ScenarioReport;
