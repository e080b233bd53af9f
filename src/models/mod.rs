pub mod dwell_record;
pub mod location;
pub mod site_change;
