use super::{flexible_id, null_as_default};
use serde::{Deserialize, Serialize};

/// One check-in entry of an event's attendance list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(
        default,
        alias = "identification",
        alias = "documentNumber",
        deserialize_with = "flexible_id::option::deserialize"
    )]
    pub id_number: Option<String>,
    #[serde(default, alias = "checkInTime")]
    pub check_in: Option<String>,
    #[serde(default, alias = "checkOutTime")]
    pub check_out: Option<String>,
}

impl AttendanceRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Body of `/attendance/attendancelist`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListRequest {
    pub event_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_names_are_empty() {
        let raw = r#"{"firstName": null, "lastName": "Gómez", "identification": 42, "checkIn": null}"#;
        let rec: AttendanceRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.first_name, "");
        assert_eq!(rec.full_name(), "Gómez");
        assert_eq!(rec.id_number.as_deref(), Some("42"));
        assert_eq!(rec.check_in, None);
    }
}
