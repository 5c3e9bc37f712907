//! Queue domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named patient queue, typically bound to a clinic location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    /// Random v4 UUID assigned at creation.
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    /// Location the queue serves (name or location uuid).
    pub location: Option<String>,
    pub date_created: DateTime<Utc>,
    /// Voided queues are hidden from default listings but kept on record.
    pub voided: bool,
    pub void_reason: Option<String>,
    pub date_voided: Option<DateTime<Utc>>,
}

impl Queue {
    /// Human readable label.
    pub fn display(&self) -> &str {
        &self.name
    }
}

/// Fields required to create a queue.
#[derive(Debug, Clone)]
pub struct NewQueue {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl NewQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            location: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct QueueUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl QueueUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.location.is_none()
    }

    /// Apply this update to a queue in place.
    pub fn apply_to(&self, queue: &mut Queue) {
        if let Some(ref name) = self.name {
            queue.name = name.clone();
        }
        if let Some(ref description) = self.description {
            queue.description = Some(description.clone());
        }
        if let Some(ref location) = self.location {
            queue.location = Some(location.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_queue() -> Queue {
        Queue {
            uuid: "b5ffbb90-86f4-4d9c-8b6c-3713d748ef74".to_string(),
            name: "Triage".to_string(),
            description: Some("Walk-in triage".to_string()),
            location: Some("Outpatient".to_string()),
            date_created: Utc::now(),
            voided: false,
            void_reason: None,
            date_voided: None,
        }
    }

    #[test]
    fn test_display_is_name() {
        assert_eq!(sample_queue().display(), "Triage");
    }

    #[test]
    fn test_update_applies_only_set_fields() {
        let mut queue = sample_queue();
        let update = QueueUpdate {
            description: Some("Adults only".to_string()),
            ..Default::default()
        };

        update.apply_to(&mut queue);

        assert_eq!(queue.name, "Triage");
        assert_eq!(queue.description.as_deref(), Some("Adults only"));
        assert_eq!(queue.location.as_deref(), Some("Outpatient"));
    }

    #[test]
    fn test_empty_update() {
        assert!(QueueUpdate::default().is_empty());
        assert!(!QueueUpdate {
            name: Some("x".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
