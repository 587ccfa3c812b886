// Appointment module
// Scheduled interval bound to a single resource

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A scheduled interval on the planner grid.
///
/// `resource_id` is `None` only transiently, while a drag preview has
/// detached the appointment from its source row; every committed record
/// references an existing resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub details: serde_json::Map<String, serde_json::Value>,
    /// Secondary sort key for stacking overlapping appointments
    /// within one resource bucket.
    #[serde(default)]
    pub order: i32,
}

impl Appointment {
    /// Create a new appointment with required fields
    ///
    /// # Arguments
    /// * `id` - Unique, stable appointment key
    /// * `title` - Appointment title (required, non-empty)
    /// * `start` - Interval start
    /// * `end` - Interval end (must be after `start`)
    ///
    /// # Returns
    /// Returns `Result<Appointment, String>` with validation
    ///
    /// # Examples
    /// ```
    /// use resource_planner::models::appointment::Appointment;
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::hours(1);
    /// let appointment = Appointment::new("a1", "Consultation", start, end).unwrap();
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, String> {
        let appointment = Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start,
            end,
            resource_id: None,
            color: None,
            kind: None,
            details: serde_json::Map::new(),
            order: 0,
        };

        appointment.validate()?;
        Ok(appointment)
    }

    /// Create a builder for constructing appointments with optional fields
    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::new()
    }

    /// Validate the appointment
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Appointment id cannot be empty".to_string());
        }

        if self.title.trim().is_empty() {
            return Err("Appointment title cannot be empty".to_string());
        }

        if self.end <= self.start {
            return Err("Appointment end time must be after start time".to_string());
        }

        // Validate color format if present (should be hex color)
        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// Get the duration of the appointment
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Check whether the interval overlaps `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Local>, end: DateTime<Local>) -> bool {
        self.start < end && self.end > start
    }
}

/// Builder for creating appointments with optional fields
pub struct AppointmentBuilder {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    resource_id: Option<String>,
    color: Option<String>,
    kind: Option<String>,
    details: serde_json::Map<String, serde_json::Value>,
    order: i32,
}

impl AppointmentBuilder {
    /// Create a new appointment builder
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            description: None,
            start: None,
            end: None,
            resource_id: None,
            color: None,
            kind: None,
            details: serde_json::Map::new(),
            order: 0,
        }
    }

    /// Set the appointment id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the appointment title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the appointment description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the start time
    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time
    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the owning resource
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Set the appointment color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the appointment kind (consultation, procedure, ...)
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Attach an opaque detail entry
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Set the stacking order within a bucket
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Build the appointment
    pub fn build(self) -> Result<Appointment, String> {
        let id = self.id.ok_or("Appointment id is required")?;
        let title = self.title.ok_or("Appointment title is required")?;
        let start = self.start.ok_or("Appointment start time is required")?;
        let end = self.end.ok_or("Appointment end time is required")?;

        let appointment = Appointment {
            id,
            title,
            description: self.description,
            start,
            end,
            resource_id: self.resource_id,
            color: self.color,
            kind: self.kind,
            details: self.details,
            order: self.order,
        };

        appointment.validate()?;
        Ok(appointment)
    }
}

impl Default for AppointmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
