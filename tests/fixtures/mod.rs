// Test fixtures - reusable test data
// Provides consistent resources and appointments across test files

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use resource_planner::models::appointment::Appointment;
use resource_planner::models::resource::{Resource, ResourceType};

/// The fixed day every fixture schedules on (Monday, March 10, 2025).
pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

/// An instant on the base day.
pub fn at(hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2025, 3, 10, hour, minute, 0)
        .unwrap()
}

/// The clinic's bookable entities.
pub fn sample_resources() -> Vec<Resource> {
    vec![
        Resource::new("r1", "Dr. Sarah Smith", "Cardiologist")
            .unwrap()
            .with_kind(ResourceType::Person)
            .with_detail("department", "Cardiology"),
        Resource::new("r2", "Dr. John Doe", "Neurologist")
            .unwrap()
            .with_kind(ResourceType::Person)
            .with_detail("department", "Neurology"),
        Resource::new("r3", "MRI Scanner Room", "Imaging")
            .unwrap()
            .with_kind(ResourceType::Room)
            .with_detail("location", "Floor 2"),
        Resource::new("r4", "Surgery Room A", "Operating Room")
            .unwrap()
            .with_kind(ResourceType::Room)
            .with_detail("capacity", "10 people"),
    ]
}

/// A morning-to-afternoon schedule across the sample resources.
pub fn sample_appointments() -> Vec<Appointment> {
    vec![
        Appointment::builder()
            .id("a1")
            .title("Patient Consultation")
            .description("Initial consultation regarding heart condition")
            .start(at(9, 0))
            .end(at(10, 0))
            .resource_id("r1")
            .color("#3B82F6")
            .kind("consultation")
            .build()
            .unwrap(),
        Appointment::builder()
            .id("a2")
            .title("MRI Scan")
            .start(at(10, 0))
            .end(at(11, 0))
            .resource_id("r3")
            .color("#10B981")
            .kind("procedure")
            .build()
            .unwrap(),
        Appointment::builder()
            .id("a3")
            .title("Surgery Prep")
            .start(at(11, 0))
            .end(at(13, 0))
            .resource_id("r4")
            .color("#EF4444")
            .kind("surgery")
            .build()
            .unwrap(),
        Appointment::builder()
            .id("a4")
            .title("Neurological Assessment")
            .start(at(14, 0))
            .end(at(15, 0))
            .resource_id("r2")
            .kind("assessment")
            .build()
            .unwrap(),
    ]
}
