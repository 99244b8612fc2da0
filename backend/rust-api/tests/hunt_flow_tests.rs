use axum::http::StatusCode;
use maroc_hunt_api::config::Config;
use serde_json::json;

mod common;

use common::{answer, create_session, send, utc, HUNT_ID, RESERVATION_ID};

const ANSWERS: [&str; 7] = [
    "Je pense que c'est un potier",
    "kharrat",
    "Oui, c'est fait",
    "Pendant le ramadan avec du miel",
    "Le kaakella sert en cuisine",
    "Chehdia, orange et fraise",
    "De l'eau fraîche",
];

fn two_step_catalog() -> serde_json::Value {
    json!([{
        "id": "two-steps",
        "title": "Mini chasse",
        "description": "Deux étapes",
        "difficulty": "easy",
        "duration": "1 heure",
        "steps": [
            {
                "id": 1,
                "location": "Atelier",
                "puzzle": "Trouvez l'artisan",
                "required_item": "Carte",
                "coordinates": { "lat": 31.63, "lng": -7.98 },
                "enigma": {
                    "question": "Quel métier ?",
                    "hints": ["Il travaille le fer"],
                    "answer": { "kind": "any_keyword", "keywords": ["forgeron", "boulanger"] },
                    "time_limit_minutes": 20,
                    "points": 100
                }
            },
            {
                "id": 2,
                "location": "Place",
                "puzzle": "Trouvez le gerrab",
                "required_item": "5 DH",
                "coordinates": { "lat": 31.62, "lng": -7.99 },
                "enigma": {
                    "question": "Que porte le gerrab ?",
                    "mini_game": {
                        "question": "Le gerrab porte traditionnellement :",
                        "options": ["Des gobelets en métal", "Un panier"],
                        "correct_option": 0
                    },
                    "answer": { "kind": "multiple_choice", "correct_option": 0 },
                    "time_limit_minutes": 25,
                    "points": 160
                }
            }
        ]
    }])
}

#[tokio::test]
async fn test_two_step_catalog_end_to_end() {
    let path = std::env::temp_dir().join(format!("two-steps-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, two_step_catalog().to_string()).unwrap();

    let config = Config {
        catalog_path: Some(path.to_string_lossy().into_owned()),
        ..Config::default()
    };
    let (app, _clock) = common::create_test_app_with(config, utc(2024, 3, 25, 8, 0));
    std::fs::remove_file(&path).ok();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/sessions",
        Some(json!({ "hunt_id": "two-steps", "reservation_id": RESERVATION_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/activate", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = answer(&app, &session_id, "Je pense que c'est un FORGERON").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], true);
    assert_eq!(body["total_score"], 100);
    assert_eq!(body["current_step_index"], 1);

    let choice = |index: usize| Some(json!({ "choice": index }));
    let uri = format!("/api/v1/sessions/{}/answers", session_id);

    let (_, body) = send(&app, "POST", &uri, choice(1)).await;
    assert_eq!(body["correct"], false);
    assert_eq!(body["total_score"], 100);
    assert_eq!(body["current_step_index"], 1);

    let (_, body) = send(&app, "POST", &uri, choice(0)).await;
    assert_eq!(body["correct"], true);
    assert_eq!(body["total_score"], 260);
    assert_eq!(body["state"]["status"], "completed");
}

#[tokio::test]
async fn test_builtin_hunt_full_run_and_summary() {
    let (app, _clock) = common::create_test_app_at(utc(2024, 3, 25, 8, 0));
    let session_id = create_session(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/activate", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"]["id"], 1);
    // Answer rules never leave the server.
    assert!(body["current_step"].get("answer").is_none());

    for text in ANSWERS {
        let (status, body) = answer(&app, &session_id, text).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["correct"], true, "rejected: {}", text);
    }

    let (status, summary) = send(
        &app,
        "GET",
        &format!("/api/v1/sessions/{}/summary", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_score"], 910);
    assert_eq!(summary["max_score"], 910);
    assert_eq!(summary["score_percent"], 100);
    assert_eq!(summary["completed_count"], 7);
    assert_eq!(summary["state"]["status"], "completed");

    let (status, _) = answer(&app, &session_id, "eau fraîche").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_wrong_answer_keeps_step_and_counts_attempt() {
    let (app, _clock) = common::create_test_app_at(utc(2024, 3, 25, 8, 0));
    let session_id = create_session(&app).await;
    send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/activate", session_id),
        None,
    )
    .await;

    let (status, body) = answer(&app, &session_id, "pêcheur").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], false);
    assert_eq!(body["current_step_index"], 0);

    let (status, _) = answer(&app, &session_id, "   ").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, session) = send(
        &app,
        "GET",
        &format!("/api/v1/sessions/{}", session_id),
        None,
    )
    .await;
    assert_eq!(session["steps"][0]["attempts"], 1);
    assert_eq!(session["score"], 0);
}

#[tokio::test]
async fn test_replay_does_not_double_count() {
    let (app, _clock) = common::create_test_app_at(utc(2024, 3, 25, 8, 0));
    let session_id = create_session(&app).await;
    send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/activate", session_id),
        None,
    )
    .await;

    let (_, body) = answer(&app, &session_id, "potier").await;
    assert_eq!(body["total_score"], 100);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/answers", session_id),
        Some(json!({ "step_id": 1, "answer": "forgeron" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["replayed"], true);
    assert_eq!(body["total_score"], 100);
    assert_eq!(body["current_step_index"], 1);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/answers", session_id),
        Some(json!({ "step_id": 4, "answer": "ramadan miel" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_hints_exhaust_after_three() {
    let (app, _clock) = common::create_test_app_at(utc(2024, 3, 25, 8, 0));
    let session_id = create_session(&app).await;
    send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/activate", session_id),
        None,
    )
    .await;

    let uri = format!("/api/v1/sessions/{}/hints", session_id);
    for expected in 1..=3 {
        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hint_number"], expected);
        assert_eq!(body["hints_remaining"], 3 - expected);
    }

    let (status, body) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.as_str().unwrap().contains("No more hints"));
}

#[tokio::test]
async fn test_qr_verification_on_gerrab_step() {
    let (app, _clock) = common::create_test_app_at(utc(2024, 3, 25, 8, 0));
    let session_id = create_session(&app).await;
    send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/activate", session_id),
        None,
    )
    .await;

    let qr_uri = format!("/api/v1/sessions/{}/qr", session_id);
    let (status, _) = send(&app, "POST", &qr_uri, Some(json!({ "token": "GERRAB_WATER" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for text in &ANSWERS[..6] {
        answer(&app, &session_id, text).await;
    }

    let (status, body) = send(&app, "POST", &qr_uri, Some(json!({ "token": "gerrab_water" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"], true);
    assert_eq!(body["step_id"], 7);
}

#[tokio::test]
async fn test_abandon_blocks_further_play() {
    let (app, _clock) = common::create_test_app_at(utc(2024, 3, 25, 8, 0));
    let session_id = create_session(&app).await;
    send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/activate", session_id),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/abandon", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["status"], "abandoned");

    let (status, _) = answer(&app, &session_id, "potier").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_finished_sessions_expire_after_retention() {
    let (app, clock) = common::create_test_app_at(utc(2024, 3, 25, 8, 0));
    let session_id = create_session(&app).await;
    let uri = format!("/api/v1/sessions/{}", session_id);

    send(&app, "POST", &format!("{}/abandon", uri), None).await;
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    // Default retention is two hours; the next creation sweeps.
    clock.advance(chrono::Duration::hours(2));
    create_session(&app).await;

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_validation_errors() {
    let (app, _clock) = common::create_test_app_at(utc(2024, 3, 25, 8, 0));

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/sessions",
        Some(json!({ "hunt_id": "atlas-trek", "reservation_id": RESERVATION_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/sessions",
        Some(json!({ "hunt_id": HUNT_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let session_id = create_session(&app).await;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/answers", session_id),
        Some(json!({ "answer": "potier", "choice": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/v1/sessions/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
