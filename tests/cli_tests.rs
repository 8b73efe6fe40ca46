mod common;

use common::{PASSWORD, cli, cli_for, cli_with, dead_url, spawn_backend, temp_path};
use predicates::prelude::*;
use std::fs;

#[test]
fn help_lists_commands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("events"))
        .stdout(predicate::str::contains("attendance"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn init_writes_default_config() {
    let conf = temp_path("init", "conf");
    cli()
        .env("CAMPUSCTL_CONFIG", &conf)
        .arg("init")
        .assert()
        .success();

    let content = fs::read_to_string(&conf).unwrap();
    assert!(content.contains("api_base_url"));
    assert!(content.contains("utc_offset_hours: -5"));

    // A second init without --force keeps the file.
    cli()
        .env("CAMPUSCTL_CONFIG", &conf)
        .arg("init")
        .assert()
        .failure();

    cli()
        .env("CAMPUSCTL_CONFIG", &conf)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storage_bucket: event-images"));
}

#[test]
fn commands_require_login() {
    let backend = spawn_backend();
    cli_for(&backend.url, "nologin")
        .args(["events", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No hay una sesión activa"));
}

#[test]
fn wrong_password_shows_backend_message() {
    let backend = spawn_backend();
    cli_for(&backend.url, "badpass")
        .args(["login", "-e", "ana@uni.edu", "-p", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid credentials"));
}

#[test]
fn unreachable_backend_is_reported_in_spanish() {
    cli_for(&dead_url(), "offline")
        .args(["login", "-e", "ana@uni.edu", "-p", PASSWORD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No se pudo conectar"));
}

#[test]
fn full_session_flow() {
    let backend = spawn_backend();
    let conf = temp_path("flow", "conf");
    let session = temp_path("flow", "session.json");
    let with_session = || cli_with(&backend.url, &conf, &session);

    with_session()
        .args(["login", "-e", "ana@uni.edu", "-p", PASSWORD])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Admin"));
    assert!(fs::read_to_string(&session).unwrap().contains("accessToken"));

    with_session()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Admin"));

    with_session()
        .args(["events", "list", "--status", "upcoming"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feria de ciencias"))
        .stdout(predicate::str::contains("Próximo"))
        .stdout(predicate::str::contains("Taller de Rust").not());

    with_session()
        .args(["events", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15/03/2030 09:00"));

    with_session()
        .args([
            "events",
            "create",
            "--title",
            "Hackatón",
            "--objective",
            "Construir prototipos",
            "--start",
            "2031-06-01T08:00",
            "--end",
            "2031-06-02T18:00",
            "--location",
            "Bloque B",
            "--students",
            "--capacity",
            "80",
            "--tag",
            "tecnología",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event created with id 101"));
    assert_eq!(backend.event_count(), 3);

    with_session()
        .args(["events", "update", "101", "--title", "Hackatón 2031", "--public"])
        .assert()
        .success();
    let update = backend.writes().last().cloned().unwrap();
    assert_eq!(update["title"], "Hackatón 2031");
    assert_eq!(update["location"], "Bloque B");
    assert_eq!(update["isPublic"], true);
    assert_eq!(update["startDate"], "2031-06-01T08:00:00-05:00");

    with_session()
        .args(["events", "delete", "101", "--yes"])
        .assert()
        .success();
    assert_eq!(backend.event_count(), 2);

    let out = temp_path("flow_export", "csv");
    with_session()
        .args(["attendance", "export", "1", "--file", &out])
        .assert()
        .success();
    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Nombre,Apellido"));
    assert!(csv.contains("Laura,Gómez,1020304050,15/03/2030 09:05,"));

    with_session()
        .args(["catalog", "careers", "--parent", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sistemas"))
        .stdout(predicate::str::contains("Leyes").not());

    with_session()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total        : 2"));

    with_session().arg("logout").assert().success();
    assert!(!std::path::Path::new(&session).exists());

    with_session()
        .args(["events", "list"])
        .assert()
        .failure();
}

#[test]
fn incomplete_event_names_the_missing_step() {
    let backend = spawn_backend();
    let conf = temp_path("wizard", "conf");
    let session = temp_path("wizard", "session.json");
    let with_session = || cli_with(&backend.url, &conf, &session);

    with_session()
        .args(["login", "-e", "ana@uni.edu", "-p", PASSWORD])
        .assert()
        .success();

    with_session()
        .args([
            "events",
            "create",
            "--title",
            "Sin público",
            "--objective",
            "x",
            "--start",
            "2031-06-01T08:00",
            "--end",
            "2031-06-01T10:00",
            "--location",
            "Aula",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Audience"));
    assert!(backend.writes().is_empty());
}

#[test]
fn staff_conflict_maps_to_spanish_message() {
    let backend = spawn_backend();
    let conf = temp_path("staff", "conf");
    let session = temp_path("staff", "session.json");
    let with_session = || cli_with(&backend.url, &conf, &session);

    with_session()
        .args(["login", "-e", "ana@uni.edu", "-p", PASSWORD])
        .assert()
        .success();

    with_session()
        .args([
            "staff",
            "register",
            "--name",
            "Carlos",
            "--email",
            common::TAKEN_EMAIL,
            "--password",
            "longenough",
            "--phone",
            "3001234567",
            "--profession",
            "Ingeniero",
            "--department",
            "Sistemas",
            "--position",
            "Coordinador",
            "--faculty",
            "10",
            "--notify",
            "new-events:email",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("El correo electrónico ya está registrado"));
}

#[test]
fn corrupt_session_file_does_not_block_login_or_logout() {
    let backend = spawn_backend();
    let conf = temp_path("corrupt", "conf");
    let session = temp_path("corrupt", "session.json");
    fs::write(&session, "{not json").unwrap();
    let with_session = || cli_with(&backend.url, &conf, &session);

    with_session().arg("logout").assert().success();
    assert!(!std::path::Path::new(&session).exists());

    fs::write(&session, "{not json").unwrap();
    with_session()
        .args(["login", "-e", "ana@uni.edu", "-p", PASSWORD])
        .assert()
        .success();

    with_session()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Admin"));
}
