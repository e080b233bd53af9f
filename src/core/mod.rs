//! Application logic, independent of the CLI surface.

pub mod change;
pub mod export;
pub mod history;
pub mod import;
pub mod location_name;
pub mod locations;
pub mod log;
pub mod seed;
