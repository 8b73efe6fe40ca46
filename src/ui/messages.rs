use crate::api::{ApiError, ApiStatus};
use crate::errors::AppError;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{FG_BLUE}{BOLD}{ICON_INFO} {RESET}{msg}");
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{FG_GREEN}{BOLD}{ICON_OK} {RESET}{msg}");
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{FG_YELLOW}{BOLD}{ICON_WARN} {RESET}{msg}");
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{FG_RED}{BOLD}{ICON_ERR} {RESET}{msg}");
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{FG_BLUE}{BOLD}====================== {msg}\n{RESET}");
}

/// User-facing text for a failed gateway call.
pub fn describe_api_error(err: &ApiError) -> String {
    match err.status {
        ApiStatus::Timeout => {
            "La solicitud tardó demasiado en responder. Inténtelo de nuevo.".to_string()
        }
        ApiStatus::Network => {
            "No se pudo conectar con el servidor. Verifique su conexión.".to_string()
        }
        ApiStatus::Http(401) => "Credenciales incorrectas o sesión expirada.".to_string(),
        ApiStatus::Http(403) => "No tiene permisos para realizar esta acción.".to_string(),
        ApiStatus::Http(404) => "El recurso solicitado no existe.".to_string(),
        ApiStatus::Http(409) => "El correo electrónico ya está registrado.".to_string(),
        ApiStatus::Http(code) if code >= 500 => {
            "Error interno del servidor. Inténtelo más tarde.".to_string()
        }
        ApiStatus::Http(_) => match err.message.as_deref() {
            Some(msg) if !msg.trim().is_empty() => msg.trim().to_string(),
            _ => format!("Error en la solicitud ({err})."),
        },
    }
}

/// Maps any application error onto the message printed by the binary.
pub fn describe_error(err: &AppError) -> String {
    match err {
        AppError::Api(api) => describe_api_error(api),
        AppError::NotAuthenticated => {
            "No hay una sesión activa. Ejecute `campusctl login` primero.".to_string()
        }
        AppError::Rejected(msg) if !msg.trim().is_empty() => msg.trim().to_string(),
        AppError::Rejected(_) => "El servidor rechazó la operación.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_codes_map_to_spanish() {
        let e = AppError::Api(ApiError::http(409, "Conflict", None));
        assert_eq!(describe_error(&e), "El correo electrónico ya está registrado.");

        let e = AppError::Api(ApiError::http(401, "Unauthorized", Some("bad".into())));
        assert!(describe_error(&e).starts_with("Credenciales incorrectas"));

        let e = AppError::Api(ApiError::http(503, "Service Unavailable", None));
        assert!(describe_error(&e).contains("servidor"));
    }

    #[test]
    fn timeout_and_network() {
        assert!(describe_error(&ApiError::timeout().into()).contains("tardó"));
        assert!(describe_error(&ApiError::network("refused").into()).contains("conectar"));
    }

    #[test]
    fn other_codes_surface_server_message() {
        let e = AppError::Api(ApiError::http(422, "Unprocessable", Some("title missing".into())));
        assert_eq!(describe_error(&e), "title missing");
    }

    #[test]
    fn rejected_keeps_backend_message() {
        let e = AppError::Rejected("invalid credentials".into());
        assert_eq!(describe_error(&e), "invalid credentials");
    }
}
