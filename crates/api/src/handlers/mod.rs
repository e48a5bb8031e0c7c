pub mod accuracy;
pub mod alerts;
pub mod auth;
pub mod sensors;
pub mod thresholds;
