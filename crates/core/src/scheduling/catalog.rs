use tracing::warn;

use crate::models::service::Service;

/// Lookup of service durations by name.
///
/// Only active services with a positive duration are kept. Names match
/// case-insensitively; an unknown name resolves to the default duration so a
/// renamed or retired service never blocks a booking.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<Service>,
    default_duration_minutes: u32,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>, default_duration_minutes: u32) -> Self {
        let services = services
            .into_iter()
            .filter(|service| service.active && service.duration_minutes > 0)
            .collect();

        Self {
            services,
            default_duration_minutes,
        }
    }

    pub fn find(&self, name: &str) -> Option<&Service> {
        let wanted = name.trim().to_lowercase();
        self.services
            .iter()
            .find(|service| service.name.trim().to_lowercase() == wanted)
    }

    pub fn resolve_duration(&self, name: &str) -> u32 {
        match self.find(name) {
            Some(service) => service.duration_minutes,
            None => {
                warn!(
                    "Service '{}' not in catalog, using default duration of {} minutes",
                    name, self.default_duration_minutes
                );
                self.default_duration_minutes
            }
        }
    }
}
