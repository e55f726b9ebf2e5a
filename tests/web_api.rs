use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use shift_scheduler::form::{rank_column_header, PreferenceEntry, WorkerSubmission};
use shift_scheduler::web::{configure, AppState, ScheduleResponse};
use shift_scheduler::{Day, Roster, SchedulerConfig, Shift, Slot};

const PASSWORD: &str = "secret";

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Roster::new(),
        SchedulerConfig::default(),
        PASSWORD.to_string(),
    ))
}

fn submission(name: &str) -> WorkerSubmission {
    WorkerSubmission {
        name: name.to_string(),
        preferences: vec![PreferenceEntry {
            day: Day::Monday,
            shift: Shift::Morning,
            rank: 1,
        }],
    }
}

fn roster_csv() -> String {
    let mut header = vec!["Name".to_string()];
    header.extend(Slot::all().map(rank_column_header));
    let ones = vec!["1"; 21].join(",");
    format!("{}\nAnn,{}\nBob,{}\n", header.join(","), ones, ones)
}

#[actix_web::test]
async fn test_roster_editing() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/roster")
        .set_json(submission("Ann"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/roster")
        .set_json(submission(" ann "))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri("/api/roster/Ann")
        .insert_header(("X-Admin-Password", PASSWORD))
        .set_json(json!({"new_name": "Anna"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/roster").to_request();
    let workers: Vec<WorkerSubmission> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].name, "Anna");
    assert_eq!(workers[0].preferences.len(), 21);

    let req = test::TestRequest::delete()
        .uri("/api/roster/nobody")
        .insert_header(("X-Admin-Password", PASSWORD))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_rename_and_remove_require_password() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/roster")
        .set_json(submission("Ann"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/api/roster/Ann")
        .set_json(json!({"new_name": "Anna"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete()
        .uri("/api/roster/Ann")
        .insert_header(("X-Admin-Password", "wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/roster").to_request();
    let workers: Vec<WorkerSubmission> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].name, "Ann");
}

#[actix_web::test]
async fn test_invalid_submission_is_rejected() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let mut bad = submission("Ann");
    bad.preferences[0].rank = 4;
    let req = test::TestRequest::post().uri("/api/roster").set_json(bad).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/roster")
        .set_json(submission("   "))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::post()
        .uri("/api/roster")
        .set_json(submission("Ann\u{1b}[2J"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_generate_rejects_malformed_body() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    for body in [r#"{"seed":"not-a-number"}"#, r#"{"seed":-5}"#, "seed=3"] {
        let req = test::TestRequest::post()
            .uri("/api/generate")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {body}");
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["success"], false);
    }

    // Nothing was generated by the rejected requests
    let req = test::TestRequest::get().uri("/api/schedule").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_names_are_returned_verbatim_as_json_text() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let name = "<img src=x onerror=alert(1)>";
    let req = test::TestRequest::post()
        .uri("/api/roster")
        .set_json(submission(name))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({"seed": 1}))
        .to_request();
    let generated: ScheduleResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(generated.slots[0].workers, vec![name]);

    // The page renders names as text nodes, never as markup
    let req = test::TestRequest::get().uri("/").to_request();
    let page = test::call_and_read_body(&app, req).await;
    let page = String::from_utf8(page.to_vec()).unwrap();
    assert!(!page.contains("innerHTML"));
    assert!(page.contains("textContent"));
}

#[actix_web::test]
async fn test_generate_and_fetch_schedule() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/schedule").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    for name in ["Ann", "Bob", "Cy"] {
        let req = test::TestRequest::post()
            .uri("/api/roster")
            .set_json(submission(name))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({"seed": 17}))
        .to_request();
    let generated: ScheduleResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(generated.slots.len(), 21);
    assert_eq!(generated.slots[0].day, "Monday");
    assert_eq!(generated.slots[0].workers, vec!["Ann", "Bob"]);

    let req = test::TestRequest::get().uri("/api/schedule").to_request();
    let stored: ScheduleResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored.slots[0].workers, generated.slots[0].workers);

    let req = test::TestRequest::get().uri("/api/schedule.csv").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("Day,Shift,Employees\nMonday,Morning,\"Ann, Bob\""));

    // Any roster edit invalidates the stored schedule
    let req = test::TestRequest::delete()
        .uri("/api/roster/Cy")
        .insert_header(("X-Admin-Password", PASSWORD))
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::get().uri("/api/schedule").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_generate_without_body() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post().uri("/api/generate").to_request();
    let generated: ScheduleResponse = test::call_and_read_body_json(&app, req).await;
    assert!(generated.slots.iter().all(|slot| slot.is_empty));
    assert!(generated.advisory.is_none());
}

#[actix_web::test]
async fn test_upload_requires_password() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_payload(roster_csv())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header(("X-Admin-Password", PASSWORD))
        .set_payload(roster_csv())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["workers"], 2);

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header(("X-Admin-Password", PASSWORD))
        .set_payload("Name,Monday Morning\nAnn,1\n")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_index_page() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
