pub mod actions;
pub mod config;
pub mod constants;
pub mod contract;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod schedule;
pub mod state;
pub mod utils;
pub mod views;

pub use config::DashboardConfig;
pub use contract::{AlloyPensionContract, PensionContract};
pub use dashboard::{Dashboard, Session};
pub use error::DashboardError;
pub use events::{Action, ActionOutcome, Notification};
pub use schedule::DerivedSchedule;
