//! View-layer logic that does not touch the terminal or the network.

pub mod filter;
pub mod stats;
pub mod wizard;

pub use filter::{EventQuery, SortKey};
pub use stats::DashboardStats;
pub use wizard::{Step, Wizard, event_form_wizard};
