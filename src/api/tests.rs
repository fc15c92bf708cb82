use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use crate::api::{routes, validation};
use crate::db::{InMemoryRecordStore, RecordId, RecordStore};

macro_rules! test_app {
    () => {{
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .app_data(validation::json_config())
                .configure(routes),
        )
        .await
    }};
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let bytes = test::read_body(resp).await;
        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }};
}

fn seeker_body() -> Value {
    json!({
        "name": "Bo",
        "status": "Active",
        "skills": ["Go", "Rust"],
        "experience": "4 years",
        "bio": "Backend developer",
        "availability": "Immediate"
    })
}

fn posting_body(hiring_manager_id: &str, skills: &[&str]) -> Value {
    json!({
        "job_title": "Engineer",
        "status": "Open",
        "start_date": "2024-01-01",
        "end_date": "2024-06-01",
        "hiring_manager_id": hiring_manager_id,
        "skills": skills
    })
}

fn id_of(body: &Value) -> String {
    body.as_str().expect("create returns the id as a JSON string").to_string()
}

fn skill_set(skills: &Value) -> HashSet<String> {
    skills
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn posting_view_inlines_skills_and_hiring_manager() {
    let app = test_app!();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/hiring-managers")
            .set_json(json!({"name": "Ana", "email": "ana@x.com"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let manager = id_of(&body);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/job-postings")
            .set_json(posting_body(&manager, &["Go", "SQL"]))
    );
    assert_eq!(status, StatusCode::CREATED);
    let posting = id_of(&body);

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/job-postings/{}", posting)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(skill_set(&body["skills"]), HashSet::from(["Go".to_string(), "SQL".to_string()]));
    assert_eq!(body["hiring_manager"], json!({"name": "Ana", "email": "ana@x.com"}));
    assert_eq!(body["job_title"], json!("Engineer"));
    assert!(body.get("_id").is_none());
}

#[actix_web::test]
async fn posting_list_returns_every_submitted_skill_with_ids() {
    let app = test_app!();
    let skills = ["Go", "SQL", "Kubernetes", "Terraform", "gRPC"];

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/job-postings")
            .set_json(posting_body(&RecordId::generate().to_string(), &skills))
    );
    let posting = id_of(&body);

    let (status, body) = send!(app, test::TestRequest::get().uri("/job-postings"));
    assert_eq!(status, StatusCode::OK);
    let listed = &body.as_array().unwrap()[0];
    assert_eq!(listed["_id"], json!(posting));
    assert_eq!(listed["skills"].as_array().unwrap().len(), skills.len());
    assert_eq!(
        skill_set(&listed["skills"]),
        skills.iter().map(|s| s.to_string()).collect::<HashSet<_>>()
    );
    // Manager id points nowhere.
    assert_eq!(listed["hiring_manager"], Value::Null);
}

#[actix_web::test]
async fn deleting_a_posting_removes_its_skill_sets() {
    let app = test_app!();
    let manager = RecordId::generate().to_string();

    let (_, body) = send!(
        app,
        test::TestRequest::post().uri("/job-postings").set_json(posting_body(&manager, &["Go", "SQL"]))
    );
    let doomed = id_of(&body);
    let (_, body) = send!(
        app,
        test::TestRequest::post().uri("/job-postings").set_json(posting_body(&manager, &["Excel"]))
    );
    let kept = id_of(&body);

    let (status, body) = send!(app, test::TestRequest::delete().uri(&format!("/job-postings/{}", doomed)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Job Posting deleted successfully"}));

    let (_, body) = send!(app, test::TestRequest::get().uri("/skill-sets"));
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|row| row["job_posting_id"] == json!(kept)));

    let (status, _) = send!(app, test::TestRequest::get().uri(&format!("/job-postings/{}", doomed)));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn updating_a_posting_with_skills_replaces_them() {
    let app = test_app!();
    let manager = RecordId::generate().to_string();

    let (_, body) = send!(
        app,
        test::TestRequest::post().uri("/job-postings").set_json(posting_body(&manager, &["Go", "SQL"]))
    );
    let posting = id_of(&body);

    let mut update = posting_body(&manager, &["Rust"]);
    update["job_title"] = json!("Senior Engineer");
    let (status, body) = send!(
        app,
        test::TestRequest::put().uri(&format!("/job-postings/{}", posting)).set_json(update)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Job Posting updated successfully"}));

    let (_, body) = send!(app, test::TestRequest::get().uri(&format!("/job-postings/{}", posting)));
    assert_eq!(body["job_title"], json!("Senior Engineer"));
    assert_eq!(body["skills"], json!(["Rust"]));
}

#[actix_web::test]
async fn application_lifecycle_enforces_status_values() {
    let app = test_app!();

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/hiring-managers")
            .set_json(json!({"name": "Ana", "email": "ana@x.com"}))
    );
    let manager = id_of(&body);
    let (_, body) = send!(
        app,
        test::TestRequest::post().uri("/job-postings").set_json(posting_body(&manager, &["Go"]))
    );
    let posting = id_of(&body);
    let (_, body) = send!(app, test::TestRequest::post().uri("/job-seekers").set_json(seeker_body()));
    let seeker = id_of(&body);

    // A client-supplied status is ignored.
    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/applications").set_json(json!({
            "job_posting_id": posting,
            "job_seeker_id": seeker,
            "status": "Accepted"
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let application = id_of(&body);
    let uri = format!("/applications/{}", application);

    let (status, body) = send!(app, test::TestRequest::get().uri(&uri));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("Pending"));
    assert!(body.get("_id").is_none());
    assert_eq!(body["job_posting"]["hiring_manager"]["email"], json!("ana@x.com"));
    assert!(body["job_posting"].get("skills").is_none());
    assert_eq!(body["job_seeker"]["name"], json!("Bo"));

    let (status, body) = send!(app, test::TestRequest::put().uri(&uri).set_json(json!({"status": "Hired"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Invalid status provided"}));

    let (status, _) = send!(app, test::TestRequest::put().uri(&uri).set_json(json!({})));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send!(app, test::TestRequest::get().uri(&uri));
    assert_eq!(body["status"], json!("Pending"));

    let (status, _) = send!(app, test::TestRequest::put().uri(&uri).set_json(json!({"status": "Reviewed"})));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(app, test::TestRequest::get().uri("/applications"));
    assert_eq!(status, StatusCode::OK);
    let listed = &body.as_array().unwrap()[0];
    assert_eq!(listed["_id"], json!(application));
    assert_eq!(listed["status"], json!("Reviewed"));

    let (status, _) = send!(app, test::TestRequest::delete().uri(&uri));
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send!(app, test::TestRequest::get().uri("/applications"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "No applications found"}));
}

#[actix_web::test]
async fn missing_records_are_not_found_for_every_family() {
    let app = test_app!();
    let ghost = RecordId::generate();

    for (path, message) in [
        ("job-seekers", "Job Seeker not found"),
        ("job-postings", "Job Posting not found"),
        ("skill-sets", "Skill Set not found"),
        ("applications", "Application not found"),
        ("hiring-managers", "Hiring Manager not found"),
    ] {
        let uri = format!("/{}/{}", path, ghost);

        let (status, body) = send!(app, test::TestRequest::get().uri(&uri));
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(body, json!({ "message": message }));

        let (status, _) = send!(app, test::TestRequest::delete().uri(&uri));
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
    }
}

#[actix_web::test]
async fn job_seeker_round_trip_preserves_all_fields() {
    let app = test_app!();

    let (status, body) = send!(app, test::TestRequest::post().uri("/job-seekers").set_json(seeker_body()));
    assert_eq!(status, StatusCode::CREATED);
    let seeker = id_of(&body);

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/job-seekers/{}", seeker)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, seeker_body());

    let mut replacement = seeker_body();
    replacement["status"] = json!("Hired");
    let (status, _) = send!(
        app,
        test::TestRequest::put().uri(&format!("/job-seekers/{}", seeker)).set_json(replacement.clone())
    );
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send!(app, test::TestRequest::get().uri("/job-seekers"));
    let mut expected = replacement;
    expected["_id"] = json!(seeker);
    assert_eq!(body, json!([expected]));
}

#[actix_web::test]
async fn job_seeker_round_trip_keeps_non_string_values() {
    let app = test_app!();
    let seeker = json!({
        "name": "Bo",
        "status": "Active",
        "skills": ["Go"],
        "experience": 5,
        "bio": "x",
        "availability": true
    });

    let (status, body) = send!(app, test::TestRequest::post().uri("/job-seekers").set_json(seeker.clone()));
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&body);

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/job-seekers/{}", id)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, seeker);
    assert_eq!(body["experience"], json!(5));
    assert_eq!(body["availability"], json!(true));
}

#[actix_web::test]
async fn hiring_manager_email_rule_accepts_minimal_address() {
    let app = test_app!();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/hiring-managers")
            .set_json(json!({"name": "Ana", "email": "a@b"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&body);

    let (_, body) = send!(app, test::TestRequest::get().uri(&format!("/hiring-managers/{}", id)));
    assert_eq!(body, json!({"name": "Ana", "email": "a@b"}));
}

#[actix_web::test]
async fn updating_a_missing_record_is_not_found() {
    let app = test_app!();
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/hiring-managers/{}", RecordId::generate()))
            .set_json(json!({"name": "Ana", "email": "ana@x.com"}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Hiring Manager not found"}));
}

#[actix_web::test]
async fn missing_or_invalid_body_fields_are_bad_requests() {
    let app = test_app!();

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/job-seekers").set_json(json!({"name": "Bo"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/hiring-managers")
            .set_json(json!({"name": "Ana", "email": "not-an-email"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation failed"));
    assert!(body["fields"].get("email").is_some());

    let (_, body) = send!(app, test::TestRequest::get().uri("/hiring-managers"));
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn malformed_identifiers_are_internal_errors_with_message() {
    let app = test_app!();

    let (status, body) = send!(app, test::TestRequest::get().uri("/job-postings/P1"));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Error reading job posting: invalid identifier"));

    let (status, body) = send!(app, test::TestRequest::get().uri("/job-seekers/not-an-id"));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("not-an-id"));

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/job-postings")
            .set_json(posting_body("H1", &["Go"]))
    );
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // Nothing was written by the rejected posting.
    let (_, body) = send!(app, test::TestRequest::get().uri("/skill-sets"));
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn skill_sets_can_be_managed_directly() {
    let app = test_app!();
    let posting = RecordId::generate().to_string();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/skill-sets")
            .set_json(json!({"job_posting_id": posting, "skill": "Go"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let skill = id_of(&body);
    let uri = format!("/skill-sets/{}", skill);

    let (status, _) = send!(
        app,
        test::TestRequest::put().uri(&uri).set_json(json!({"job_posting_id": posting, "skill": "Rust"}))
    );
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send!(app, test::TestRequest::get().uri(&uri));
    assert_eq!(body, json!({"job_posting_id": posting, "skill": "Rust"}));

    let (status, body) = send!(app, test::TestRequest::delete().uri(&uri));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Skill Set disassociated successfully"}));
}

#[actix_web::test]
async fn probes_and_welcome_page_respond() {
    let app = test_app!();

    let (status, body) = send!(app, test::TestRequest::get().uri("/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));

    let (status, body) = send!(app, test::TestRequest::get().uri("/live"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], json!("not_checked"));

    let (status, body) = send!(app, test::TestRequest::get().uri("/"));
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("Welcome"));
}
