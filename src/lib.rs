pub mod append_log;
pub mod capture;
pub mod cli;
pub mod logging;
pub mod random;
pub mod record;
pub mod settings;
pub mod simulator;
