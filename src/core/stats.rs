//! Dashboard figures computed from an already-fetched event list.

use crate::models::event::{EventStatus, EventView};
use chrono::{DateTime, FixedOffset};

pub const UPCOMING_PREVIEW: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub upcoming: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub total_registrations: usize,
    pub virtual_events: usize,
    /// Soonest events starting after `now`, at most [`UPCOMING_PREVIEW`].
    pub next_events: Vec<EventView>,
}

impl DashboardStats {
    pub fn from_views(views: &[EventView], now: DateTime<FixedOffset>) -> Self {
        let count = |s: EventStatus| views.iter().filter(|v| v.status == s).count();

        let mut next: Vec<EventView> = views
            .iter()
            .filter(|v| v.start.is_some_and(|d| d > now))
            .cloned()
            .collect();
        next.sort_by_key(|v| v.start);
        next.truncate(UPCOMING_PREVIEW);

        Self {
            total: views.len(),
            upcoming: count(EventStatus::Upcoming),
            confirmed: count(EventStatus::Confirmed),
            completed: count(EventStatus::Completed),
            total_registrations: views.iter().map(|v| v.registered).sum(),
            virtual_events: views.iter().filter(|v| v.is_virtual).count(),
            next_events: next,
        }
    }
}
