//! Client-side search, filtering and ordering of event listings.

use crate::models::event::{EventStatus, EventView};
use chrono::NaiveDate;
use clap::ValueEnum;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    Start,
    Title,
    Status,
}

#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Case-insensitive match over title, objective, location and tags.
    pub search: Option<String>,
    pub status: Option<EventStatus>,
    /// Inclusive day range on the start date.
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub sort: SortKey,
    pub descending: bool,
}

impl EventQuery {
    pub fn matches(&self, event: &EventView) -> bool {
        if let Some(status) = self.status
            && event.status != status
        {
            return false;
        }

        if let Some((from, to)) = self.range {
            match event.start.map(|d| d.date_naive()) {
                Some(day) if day >= from && day <= to => {}
                _ => return false,
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => matches_term(event, &term.to_lowercase()),
            _ => true,
        }
    }

    pub fn apply(&self, events: Vec<EventView>) -> Vec<EventView> {
        let mut out: Vec<EventView> = events.into_iter().filter(|e| self.matches(e)).collect();

        out.sort_by(|a, b| {
            let ord = match self.sort {
                SortKey::Start => compare_start(a, b),
                SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                SortKey::Status => status_rank(a.status)
                    .cmp(&status_rank(b.status))
                    .then_with(|| compare_start(a, b)),
            };
            if self.descending { ord.reverse() } else { ord }
        });

        out
    }
}

fn matches_term(event: &EventView, term: &str) -> bool {
    event.title.to_lowercase().contains(term)
        || event.objective.to_lowercase().contains(term)
        || event.location.to_lowercase().contains(term)
        || event.tags.iter().any(|t| t.to_lowercase().contains(term))
}

/// Events without a start date sort after dated ones.
fn compare_start(a: &EventView, b: &EventView) -> Ordering {
    match (a.start, b.start) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn status_rank(status: EventStatus) -> u8 {
    match status {
        EventStatus::Confirmed => 0,
        EventStatus::Upcoming => 1,
        EventStatus::Completed => 2,
    }
}
