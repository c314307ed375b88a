pub mod chart;
pub mod config;
pub mod edit;
pub mod logging;
pub mod time;
