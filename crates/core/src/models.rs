pub mod appointment;
pub mod availability;
pub mod clock;
pub mod service;
pub mod settings;
pub mod work_interval;
