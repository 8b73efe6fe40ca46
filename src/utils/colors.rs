//! Terminal colouring for statuses and placeholder values.

use crate::models::event::EventStatus;
use crate::utils::date::DATE_UNAVAILABLE;
use ansi_term::Colour;

pub fn status_colour(status: EventStatus) -> Colour {
    match status {
        EventStatus::Upcoming => Colour::Blue,
        EventStatus::Confirmed => Colour::Green,
        EventStatus::Completed => Colour::Fixed(245),
    }
}

/// Spanish status label painted in its status colour.
pub fn paint_status(status: EventStatus) -> String {
    status_colour(status).bold().paint(status.label()).to_string()
}

/// Greys out empty values and the unavailable-date placeholder.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" || v == DATE_UNAVAILABLE {
        Colour::Fixed(245).paint(value).to_string()
    } else {
        value.to_string()
    }
}

pub fn paint_yes_no(flag: bool) -> String {
    if flag {
        Colour::Green.paint("sí").to_string()
    } else {
        Colour::Red.paint("no").to_string()
    }
}
