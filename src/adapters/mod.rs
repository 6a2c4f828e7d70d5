//! Concrete port implementations.

pub mod console_alert_adapter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod text_report_adapter;
