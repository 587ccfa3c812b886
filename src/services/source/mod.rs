//! Injected data-source boundary.
//!
//! Appointments and resources are fetched by range from an external
//! collaborator; this trait is the only asynchronous seam in the engine.
//! No transport is specified here — embedders supply an implementation.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::appointment::Appointment;
use crate::models::resource::Resource;
use crate::models::view::TimeRange;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentSource: Send + Sync {
    /// Fetch the appointments whose interval overlaps the range.
    async fn load_appointments(&self, range: TimeRange) -> Result<Vec<Appointment>>;

    /// Fetch the full resource set.
    async fn load_resources(&self) -> Result<Vec<Resource>>;
}

/// In-memory source over a fixed data set.
///
/// Useful for tests and demo embeddings; filters the held appointments
/// by range overlap the way a real backend would.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    appointments: Vec<Appointment>,
    resources: Vec<Resource>,
}

impl StaticSource {
    pub fn new(resources: Vec<Resource>, appointments: Vec<Appointment>) -> Self {
        Self {
            appointments,
            resources,
        }
    }
}

#[async_trait]
impl AppointmentSource for StaticSource {
    async fn load_appointments(&self, range: TimeRange) -> Result<Vec<Appointment>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.overlaps(range.start, range.end))
            .cloned()
            .collect())
    }

    async fn load_resources(&self) -> Result<Vec<Resource>> {
        Ok(self.resources.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};

    fn at(hour: u32) -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_static_source_filters_by_overlap() {
        let appointments = vec![
            Appointment::new("a1", "Morning", at(9), at(10)).unwrap(),
            Appointment::new("a2", "Evening", at(18), at(19)).unwrap(),
        ];
        let source = StaticSource::new(vec![], appointments);

        let range = TimeRange::new(at(8), at(12)).unwrap();
        let loaded = source.load_appointments(range).await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "a1");
    }

    #[tokio::test]
    async fn test_static_source_boundary_touch_excluded() {
        let appointments =
            vec![Appointment::new("a1", "Morning", at(9), at(10)).unwrap()];
        let source = StaticSource::new(vec![], appointments);

        // Range starting exactly at the appointment end does not overlap
        let range = TimeRange::new(at(10), at(10) + Duration::hours(1)).unwrap();
        assert!(source.load_appointments(range).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_static_source_resources() {
        let resources = vec![Resource::new("r1", "Dr. Sarah Smith", "Cardiologist").unwrap()];
        let source = StaticSource::new(resources, vec![]);

        let loaded = source.load_resources().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "r1");
    }
}
