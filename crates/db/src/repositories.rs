pub mod appointment;
pub mod service;
pub mod settings;
pub mod work_interval;
