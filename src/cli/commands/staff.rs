use crate::cli::parser::{StaffArgs, StaffCommand};
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::models::staff::{NotificationPreferences, StaffRegistration};
use crate::ui::messages::success;
use crate::ui::prompt::ask;

pub async fn handle(cmd: &StaffCommand, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        StaffCommand::Register(args) => {
            let registration = to_registration(args)?;
            ctx.staff().register(&registration).await?;
            success(format!("Staff member {} registered.", registration.email));
            Ok(())
        }
    }
}

fn to_registration(a: &StaffArgs) -> AppResult<StaffRegistration> {
    let password = match &a.password {
        Some(p) => p.clone(),
        None => ask("Password")?,
    };

    let mut prefs = NotificationPreferences::default();
    for (category, channel) in &a.notify {
        prefs.enable(*category, *channel);
    }

    Ok(StaffRegistration {
        name: a.name.trim().to_string(),
        email: a.email.trim().to_string(),
        password,
        phone: a.phone.trim().to_string(),
        profile_photo: a.photo_url.clone().filter(|u| !u.trim().is_empty()),
        profession: a.profession.trim().to_string(),
        department: a.department.trim().to_string(),
        position: a.position.trim().to_string(),
        faculty_id: a.faculty.trim().to_string(),
        notification_preferences: prefs,
    })
}
