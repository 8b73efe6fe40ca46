use crate::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask;

pub async fn login(ctx: &AppContext, email: Option<&str>, password: Option<&str>) -> AppResult<()> {
    let email = match email {
        Some(e) => e.to_string(),
        None => ask("Email")?,
    };
    let password = match password {
        Some(p) => p.to_string(),
        None => ask("Password")?,
    };

    let user = ctx.auth().login(&email, &password).await?;
    success(format!("Bienvenido, {} ({})", user.name, user.role));
    Ok(())
}

pub fn logout(ctx: &AppContext) -> AppResult<()> {
    if !ctx.session.is_authenticated() {
        warning("No active session.");
    }
    ctx.auth().logout()?;
    success("Session closed.");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> AppResult<()> {
    let auth = ctx.auth();
    if !auth.is_authenticated() {
        warning("Not logged in.");
        return Ok(());
    }

    match auth.current_user()? {
        Some(user) => {
            println!("{}", user.name);
            info(format!("Role: {}", user.role));
            if let Some(pic) = user.profile_picture.as_deref()
                && !pic.is_empty()
            {
                info(format!("Picture: {pic}"));
            }
        }
        None => warning("Session has a token but no user record."),
    }
    Ok(())
}
