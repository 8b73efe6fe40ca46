//! Multi-step form gate.
//!
//! Each step owns a validator over the whole form; the cursor only moves
//! forward while the current step validates.

use crate::models::event::EventFormData;
use crate::utils::date::parse_form_input;

pub struct Step<T> {
    pub title: &'static str,
    pub validate: fn(&T) -> bool,
}

pub struct Wizard<T> {
    steps: Vec<Step<T>>,
    current: usize,
}

impl<T> Wizard<T> {
    pub fn new(steps: Vec<Step<T>>) -> Self {
        Self { steps, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_title(&self) -> Option<&'static str> {
        self.steps.get(self.current).map(|s| s.title)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    pub fn can_advance(&self, data: &T) -> bool {
        self.steps
            .get(self.current)
            .is_some_and(|s| (s.validate)(data))
    }

    /// Moves to the next step. Returns false, and stays put, when the
    /// current step does not validate or is already the last one.
    pub fn advance(&mut self, data: &T) -> bool {
        if self.is_last() || !self.can_advance(data) {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Index and title of the first step that does not validate.
    pub fn first_blocking_step(&self, data: &T) -> Option<(usize, &'static str)> {
        self.steps
            .iter()
            .enumerate()
            .find(|(_, s)| !(s.validate)(data))
            .map(|(i, s)| (i, s.title))
    }

    pub fn is_complete(&self, data: &T) -> bool {
        self.first_blocking_step(data).is_none()
    }
}

fn basic_information(f: &EventFormData) -> bool {
    !f.title.trim().is_empty() && !f.objective.trim().is_empty()
}

fn schedule(f: &EventFormData) -> bool {
    match (parse_form_input(&f.start_date), parse_form_input(&f.end_date)) {
        (Some(start), Some(end)) => start < end,
        _ => false,
    }
}

fn location(f: &EventFormData) -> bool {
    if f.is_virtual {
        let url = f.meeting_url.trim();
        url.starts_with("http://") || url.starts_with("https://")
    } else {
        !f.location.trim().is_empty() || f.space_id.is_some()
    }
}

fn audience(f: &EventFormData) -> bool {
    f.audience.any()
}

fn details(f: &EventFormData) -> bool {
    f.capacity != Some(0)
}

/// The five steps of the event create/edit form.
pub fn event_form_wizard() -> Wizard<EventFormData> {
    Wizard::new(vec![
        Step {
            title: "Basic information",
            validate: basic_information,
        },
        Step {
            title: "Schedule",
            validate: schedule,
        },
        Step {
            title: "Location",
            validate: location,
        },
        Step {
            title: "Audience",
            validate: audience,
        },
        Step {
            title: "Details",
            validate: details,
        },
    ])
}
