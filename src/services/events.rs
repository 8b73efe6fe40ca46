use super::{ImageUploader, authorize};
use crate::api::{ApiBody, ApiClient, Request, call};
use crate::errors::{AppError, AppResult};
use crate::models::envelope::{decode_payload, expect_success};
use crate::models::event::{
    BackendEvent, CreateEventRequest, EventFormData, EventView, TargetAudience, UpdateEventRequest,
};
use crate::session::SessionContext;
use crate::utils::date;
use chrono::{FixedOffset, NaiveDate};
use reqwest::Method;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{debug, info};

// ---------------------------
// Endpoints
// ---------------------------

struct GetAllEvents;

impl Request for GetAllEvents {
    type Output = Vec<BackendEvent>;
    const PATH: &'static str = "/event/getallevents";
    const METHOD: Method = Method::GET;

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        decode_payload(body)
    }
}

struct GetEventById<'a> {
    id: &'a str,
}

impl Request for GetEventById<'_> {
    type Output = BackendEvent;
    const PATH: &'static str = "/event/geteventbyid";

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(json!({ "id": self.id })))
    }

    /// A success reply without an event means the id is unknown.
    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        match decode_payload::<Option<BackendEvent>>(body) {
            Ok(Some(event)) => Ok(event),
            Ok(None) | Err(AppError::UnexpectedResponse(_)) => {
                Err(AppError::NotFound(format!("event {}", self.id)))
            }
            Err(e) => Err(e),
        }
    }
}

struct CreateEvent<'a> {
    request: &'a CreateEventRequest,
}

impl Request for CreateEvent<'_> {
    /// Id of the new event, when the backend reports it.
    type Output = Option<String>;
    const PATH: &'static str = "/event/createevent";

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self.request)?))
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        Ok(extract_id(&expect_success(body)?))
    }
}

struct UpdateEvent<'a> {
    request: &'a UpdateEventRequest,
}

impl Request for UpdateEvent<'_> {
    type Output = ();
    const PATH: &'static str = "/event/updateevent";

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self.request)?))
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        expect_success(body).map(|_| ())
    }
}

struct DeleteEvent<'a> {
    id: &'a str,
}

impl Request for DeleteEvent<'_> {
    type Output = ();
    const PATH: &'static str = "/event/deleteevent";
    const METHOD: Method = Method::DELETE;

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(json!({ "id": self.id })))
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        expect_success(body).map(|_| ())
    }
}

fn extract_id(data: &Value) -> Option<String> {
    match data {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("id").and_then(|id| extract_id(id)),
        _ => None,
    }
}

// ---------------------------
// Service
// ---------------------------

pub struct EventService<'a> {
    api: &'a ApiClient,
    session: &'a SessionContext,
    offset: FixedOffset,
}

impl<'a> EventService<'a> {
    pub fn new(api: &'a ApiClient, session: &'a SessionContext, offset: FixedOffset) -> Self {
        Self {
            api,
            session,
            offset,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub async fn list(&self) -> AppResult<Vec<BackendEvent>> {
        authorize(self.api, self.session)?;
        let events = call(&GetAllEvents, self.api).await?;
        debug!(count = events.len(), "events loaded");
        Ok(events)
    }

    /// Lists events shaped for display, with status derived against today.
    pub async fn list_views(&self) -> AppResult<Vec<EventView>> {
        let today = date::today_in(self.offset);
        Ok(self
            .list()
            .await?
            .iter()
            .map(|e| to_view(e, self.offset, today))
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<BackendEvent> {
        if id.trim().is_empty() {
            return Err(AppError::validation("event id is required"));
        }
        authorize(self.api, self.session)?;
        call(&GetEventById { id }, self.api).await
    }

    /// Validates the form and creates the event. Returns the new id when the
    /// backend reports one.
    pub async fn create(&self, form: &EventFormData) -> AppResult<Option<String>> {
        let request = self.checked_request(form)?;

        authorize(self.api, self.session)?;
        let id = call(&CreateEvent { request: &request }, self.api).await?;
        info!(title = %request.title, id = ?id, "event created");
        Ok(id)
    }

    /// Full replacement of the mutable fields of event `id`.
    pub async fn update(&self, id: &str, form: &EventFormData) -> AppResult<()> {
        if id.trim().is_empty() {
            return Err(AppError::validation("event id is required"));
        }
        let fields = self.checked_request(form)?;

        authorize(self.api, self.session)?;
        let request = UpdateEventRequest {
            id: id.to_string(),
            fields,
        };
        call(&UpdateEvent { request: &request }, self.api).await?;
        info!(id, "event updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if id.trim().is_empty() {
            return Err(AppError::validation("event id is required"));
        }
        authorize(self.api, self.session)?;
        call(&DeleteEvent { id }, self.api).await?;
        info!(id, "event deleted");
        Ok(())
    }

    /// Deletes an event and fetches the list again.
    pub async fn delete_and_reload(&self, id: &str) -> AppResult<Vec<BackendEvent>> {
        self.delete(id).await?;
        self.list().await
    }

    /// Uploads the images one after the other, appends their public URLs to
    /// the form, then creates the event.
    pub async fn create_with_images(
        &self,
        form: &EventFormData,
        images: &[PathBuf],
        uploader: &dyn ImageUploader,
    ) -> AppResult<Option<String>> {
        let form = self.attach_images(form, images, uploader).await?;
        self.create(&form).await
    }

    pub async fn update_with_images(
        &self,
        id: &str,
        form: &EventFormData,
        images: &[PathBuf],
        uploader: &dyn ImageUploader,
    ) -> AppResult<()> {
        let form = self.attach_images(form, images, uploader).await?;
        self.update(id, &form).await
    }

    async fn attach_images(
        &self,
        form: &EventFormData,
        images: &[PathBuf],
        uploader: &dyn ImageUploader,
    ) -> AppResult<EventFormData> {
        // Fail on bad input before spending uploads on it.
        self.checked_request(form)?;

        let mut form = form.clone();
        for path in images {
            let url = uploader.upload(path).await?;
            form.image_urls.push(url);
        }
        Ok(form)
    }

    fn checked_request(&self, form: &EventFormData) -> AppResult<CreateEventRequest> {
        let request = form_data_to_create_request(form, self.offset)?;
        validate_create_request(&request, self.offset)?;
        validate_audience_and_venue(form)?;
        Ok(request)
    }
}

// ---------------------------
// Shaping
// ---------------------------

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Form state → wire body. Fails when a date does not parse.
pub fn form_data_to_create_request(
    form: &EventFormData,
    offset: FixedOffset,
) -> AppResult<CreateEventRequest> {
    let start_date = date::form_input_to_backend(&form.start_date, offset)
        .ok_or_else(|| AppError::InvalidDate(format!("start date '{}'", form.start_date)))?;
    let end_date = date::form_input_to_backend(&form.end_date, offset)
        .ok_or_else(|| AppError::InvalidDate(format!("end date '{}'", form.end_date)))?;

    let tags = form
        .tags
        .iter()
        .filter_map(|t| non_empty(t))
        .collect();

    Ok(CreateEventRequest {
        title: form.title.trim().to_string(),
        objective: form.objective.trim().to_string(),
        start_date,
        end_date,
        location: non_empty(&form.location),
        campus_id: form.campus_id.clone(),
        space_id: form.space_id.clone(),
        category_id: form.category_id.clone(),
        type_id: form.type_id.clone(),
        for_teachers: form.audience.teachers,
        for_students: form.audience.students,
        for_administrative: form.audience.administrative,
        for_general_public: form.audience.general_public,
        is_virtual: form.is_virtual,
        meeting_url: if form.is_virtual {
            non_empty(&form.meeting_url)
        } else {
            None
        },
        capacity: form.capacity,
        requires_registration: form.requires_registration,
        is_public: form.is_public,
        tags,
        image_urls: form.image_urls.clone(),
        additional_details: non_empty(&form.additional_details),
    })
}

/// Local checks run before any create/update call.
pub fn validate_create_request(req: &CreateEventRequest, offset: FixedOffset) -> AppResult<()> {
    if req.title.trim().is_empty() {
        return Err(AppError::validation("title is required"));
    }
    if req.objective.trim().is_empty() {
        return Err(AppError::validation("objective is required"));
    }

    let start = date::parse_backend_date(&req.start_date, offset)
        .ok_or_else(|| AppError::InvalidDate(format!("start date '{}'", req.start_date)))?;
    let end = date::parse_backend_date(&req.end_date, offset)
        .ok_or_else(|| AppError::InvalidDate(format!("end date '{}'", req.end_date)))?;

    if start >= end {
        return Err(AppError::validation("start date must be before end date"));
    }

    if req.capacity == Some(0) {
        return Err(AppError::validation("capacity must be greater than zero"));
    }

    Ok(())
}

/// Form-only rules the wire request cannot express on its own.
pub fn validate_audience_and_venue(form: &EventFormData) -> AppResult<()> {
    if !form.audience.any() {
        return Err(AppError::validation("at least one target audience is required"));
    }
    if form.is_virtual && form.meeting_url.trim().is_empty() {
        return Err(AppError::validation("virtual events need a meeting URL"));
    }
    Ok(())
}

/// Backend event → editable form state.
pub fn backend_event_to_form_data(event: &BackendEvent, offset: FixedOffset) -> EventFormData {
    EventFormData {
        title: event.title.clone(),
        objective: event.objective.clone(),
        start_date: date::backend_to_form_input(event.start_date.as_deref(), offset),
        end_date: date::backend_to_form_input(event.end_date.as_deref(), offset),
        location: event.location.clone().unwrap_or_default(),
        campus_id: event.campus_id.clone(),
        space_id: event.space_id.clone(),
        category_id: event.category_id.clone(),
        type_id: event.type_id.clone(),
        audience: TargetAudience {
            teachers: event.for_teachers,
            students: event.for_students,
            administrative: event.for_administrative,
            general_public: event.for_general_public,
        },
        is_virtual: event.is_virtual,
        meeting_url: event.meeting_url.clone().unwrap_or_default(),
        capacity: event.capacity,
        requires_registration: event.requires_registration,
        is_public: event.is_public,
        tags: event.tags.clone(),
        image_urls: event.image_urls.clone(),
        additional_details: event.additional_details.clone().unwrap_or_default(),
    }
}

/// Backend event → display shape.
pub fn to_view(event: &BackendEvent, offset: FixedOffset, today: NaiveDate) -> EventView {
    let start = event
        .start_date
        .as_deref()
        .and_then(|s| date::parse_backend_date(s, offset));
    let end = event
        .end_date
        .as_deref()
        .and_then(|s| date::parse_backend_date(s, offset));

    let location = if event.is_virtual {
        "Virtual".to_string()
    } else {
        event
            .location
            .as_deref()
            .and_then(non_empty)
            .unwrap_or_else(|| match (&event.campus_id, &event.space_id) {
                (Some(c), Some(s)) => format!("campus {c} / space {s}"),
                (Some(c), None) => format!("campus {c}"),
                (None, Some(s)) => format!("space {s}"),
                (None, None) => "-".to_string(),
            })
    };

    EventView {
        id: event.id.clone(),
        title: event.title.clone(),
        objective: event.objective.clone(),
        status: date::event_status(
            event.status.as_deref(),
            event.start_date.as_deref(),
            offset,
            today,
        ),
        start,
        end,
        location,
        audience: event.audience(),
        is_virtual: event.is_virtual,
        meeting_url: event.meeting_url.clone(),
        capacity: event.capacity,
        registered: event.registrations.len(),
        requires_registration: event.requires_registration,
        is_public: event.is_public,
        tags: event.tags.clone(),
        image_urls: event.image_urls.clone(),
        additional_details: event.additional_details.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_id_shapes() {
        assert_eq!(extract_id(&json!({"id": 7})).as_deref(), Some("7"));
        assert_eq!(extract_id(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(extract_id(&json!({"id": {"id": "x"}})).as_deref(), Some("x"));
        assert_eq!(extract_id(&Value::Null), None);
    }

    #[test]
    fn start_must_be_strictly_before_end() {
        let offset = date::default_offset();
        let mut form = EventFormData {
            title: "Foro".into(),
            objective: "Debate".into(),
            start_date: "2030-01-01T10:00".into(),
            end_date: "2030-01-01T10:00".into(),
            ..Default::default()
        };
        let same = form_data_to_create_request(&form, offset).unwrap();
        assert!(matches!(
            validate_create_request(&same, offset),
            Err(AppError::Validation(_))
        ));

        form.start_date = "2030-01-01T11:00".into();
        let after = form_data_to_create_request(&form, offset).unwrap();
        assert!(validate_create_request(&after, offset).is_err());

        form.start_date = "2030-01-01T09:00".into();
        let before = form_data_to_create_request(&form, offset).unwrap();
        assert!(validate_create_request(&before, offset).is_ok());
    }

    #[test]
    fn audience_and_meeting_url_are_required() {
        let mut form = EventFormData {
            is_virtual: true,
            ..Default::default()
        };
        assert!(validate_audience_and_venue(&form).is_err());

        form.audience.teachers = true;
        assert!(matches!(
            validate_audience_and_venue(&form),
            Err(AppError::Validation(msg)) if msg.contains("meeting URL")
        ));

        form.meeting_url = "https://meet.example/x".into();
        assert!(validate_audience_and_venue(&form).is_ok());
    }

    #[test]
    fn meeting_url_dropped_for_in_person_events() {
        let form = EventFormData {
            title: "t".into(),
            objective: "o".into(),
            start_date: "2030-01-01T10:00".into(),
            end_date: "2030-01-01T12:00".into(),
            meeting_url: "https://meet.example/x".into(),
            tags: vec![" ai ".into(), "".into()],
            ..Default::default()
        };
        let req = form_data_to_create_request(&form, date::default_offset()).unwrap();
        assert_eq!(req.meeting_url, None);
        assert_eq!(req.tags, vec!["ai".to_string()]);
    }

    #[test]
    fn view_location_falls_back_to_campus() {
        let ev = BackendEvent {
            id: "1".into(),
            title: "x".into(),
            campus_id: Some("3".into()),
            registrations: vec![json!({}), json!({})],
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let view = to_view(&ev, date::default_offset(), today);
        assert_eq!(view.location, "campus 3");
        assert_eq!(view.registered, 2);
    }
}
