use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Delivery channels of a notification category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFlags {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotificationCategory {
    EventReminders,
    NewEvents,
    EventChanges,
    AttendanceReports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotificationChannel {
    Email,
    Sms,
    Push,
}

/// Four categories × three channels of opt-in flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub event_reminders: ChannelFlags,
    pub new_events: ChannelFlags,
    pub event_changes: ChannelFlags,
    pub attendance_reports: ChannelFlags,
}

impl NotificationPreferences {
    pub fn category_mut(&mut self, category: NotificationCategory) -> &mut ChannelFlags {
        match category {
            NotificationCategory::EventReminders => &mut self.event_reminders,
            NotificationCategory::NewEvents => &mut self.new_events,
            NotificationCategory::EventChanges => &mut self.event_changes,
            NotificationCategory::AttendanceReports => &mut self.attendance_reports,
        }
    }

    pub fn enable(&mut self, category: NotificationCategory, channel: NotificationChannel) {
        let flags = self.category_mut(category);
        match channel {
            NotificationChannel::Email => flags.email = true,
            NotificationChannel::Sms => flags.sms = true,
            NotificationChannel::Push => flags.push = true,
        }
    }
}

/// Body of `/user/registerstaffmember`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    pub profession: String,
    pub department: String,
    pub position: String,
    pub faculty_id: String,
    pub notification_preferences: NotificationPreferences,
}
