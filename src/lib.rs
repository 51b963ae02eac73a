pub mod api;
pub mod config;
pub mod csv_import;
pub mod dashboard;
pub mod error;
pub mod handler;
pub mod insights;
pub mod model;
pub mod validation;
