use super::{flexible_id, null_as_default};
use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Coarse lifecycle state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Confirmed,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Confirmed => "confirmed",
            EventStatus::Completed => "completed",
        }
    }

    /// Label shown to dashboard users.
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Próximo",
            EventStatus::Confirmed => "Confirmado",
            EventStatus::Completed => "Completado",
        }
    }
}

/// Who the event is aimed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAudience {
    pub teachers: bool,
    pub students: bool,
    pub administrative: bool,
    pub general_public: bool,
}

impl TargetAudience {
    pub fn any(&self) -> bool {
        self.teachers || self.students || self.administrative || self.general_public
    }

    pub fn labels(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.teachers {
            out.push("teachers");
        }
        if self.students {
            out.push("students");
        }
        if self.administrative {
            out.push("administrative");
        }
        if self.general_public {
            out.push("general public");
        }
        out
    }
}

/// Event as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendEvent {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objective: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub campus_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub space_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub type_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub for_teachers: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub for_students: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub for_administrative: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub for_general_public: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_virtual: bool,
    #[serde(default)]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requires_registration: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_public: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub additional_details: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub registrations: Vec<serde_json::Value>,
}

impl BackendEvent {
    pub fn audience(&self) -> TargetAudience {
        TargetAudience {
            teachers: self.for_teachers,
            students: self.for_students,
            administrative: self.for_administrative,
            general_public: self.for_general_public,
        }
    }
}

/// Editable form state for creating or updating an event.
///
/// Dates use the `YYYY-MM-DDTHH:MM` shape of a datetime input, in the
/// configured local offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFormData {
    pub title: String,
    pub objective: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub campus_id: Option<String>,
    pub space_id: Option<String>,
    pub category_id: Option<String>,
    pub type_id: Option<String>,
    pub audience: TargetAudience,
    pub is_virtual: bool,
    pub meeting_url: String,
    pub capacity: Option<u32>,
    pub requires_registration: bool,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    pub additional_details: String,
}

/// Wire body of `/event/createevent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub objective: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    pub for_teachers: bool,
    pub for_students: bool,
    pub for_administrative: bool,
    pub for_general_public: bool,
    pub is_virtual: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub requires_registration: bool,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

/// Wire body of `/event/updateevent`: a full replacement of the mutable
/// fields plus the target id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub id: String,
    #[serde(flatten)]
    pub fields: CreateEventRequest,
}

/// Read-only shape used by listings and the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    pub id: String,
    pub title: String,
    pub objective: String,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub location: String,
    pub audience: TargetAudience,
    pub is_virtual: bool,
    pub meeting_url: Option<String>,
    pub capacity: Option<u32>,
    pub registered: usize,
    pub requires_registration: bool,
    pub is_public: bool,
    pub status: EventStatus,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    pub additional_details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_decode_as_defaults() {
        let raw = r#"{
            "id": 1,
            "title": "Feria",
            "objective": null,
            "tags": null,
            "imageUrls": null,
            "registrations": null,
            "forStudents": null,
            "isVirtual": null,
            "isPublic": null,
            "location": null,
            "capacity": null
        }"#;
        let ev: BackendEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(ev.id, "1");
        assert_eq!(ev.title, "Feria");
        assert_eq!(ev.objective, "");
        assert!(ev.tags.is_empty());
        assert!(ev.image_urls.is_empty());
        assert!(ev.registrations.is_empty());
        assert!(!ev.for_students);
        assert!(!ev.is_virtual);
        assert_eq!(ev.location, None);
    }

    #[test]
    fn one_sparse_event_does_not_break_the_list() {
        let raw = r#"[
            {"id": 1, "title": "A", "tags": ["x"]},
            {"id": "2", "title": null, "tags": null, "forTeachers": true}
        ]"#;
        let events: Vec<BackendEvent> = serde_json::from_str(raw).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].title, "");
        assert!(events[1].audience().teachers);
    }
}
