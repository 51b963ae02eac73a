use hoops_coach_lambda_rust::api::CoachApi;
use hoops_coach_lambda_rust::config::Settings;
use hoops_coach_lambda_rust::handler::{dispatch, Action, Mode, Request};
use serde_json::json;
use uuid::Uuid;

fn api_for(server: &mockito::ServerGuard) -> CoachApi {
    CoachApi::new(&Settings::development(format!("{}/api/v1", server.url())))
}

fn request(value: serde_json::Value) -> Request {
    serde_json::from_value(value).unwrap()
}

#[test]
fn serde_mode_lowercase_and_defaults_to_production() {
    let m: Mode = serde_json::from_str("\"test\"").unwrap();
    assert_eq!(m, Mode::Test);
    let req = request(json!({ "action": { "type": "team_dashboard" } }));
    assert_eq!(req.mode, Mode::Production);
    assert!(matches!(req.action, Action::TeamDashboard));
}

#[test]
fn actions_are_tagged_by_type() {
    let req = request(json!({
        "mode": "test",
        "action": {
            "type": "generate_report",
            "game_id": Uuid::from_u128(1),
            "additional_context": "Starting PG was out"
        }
    }));
    match req.action {
        Action::GenerateReport { force_regenerate, additional_context, .. } => {
            assert!(!force_regenerate);
            assert_eq!(additional_context.as_deref(), Some("Starting PG was out"));
        }
        other => panic!("unexpected action {other:?}"),
    }

    let bad = serde_json::from_value::<Request>(json!({ "action": { "type": "launch_rockets" } }));
    assert!(bad.is_err());
}

#[tokio::test]
async fn validate_stats_reports_violations() {
    let server = mockito::Server::new_async().await;
    let req = request(json!({
        "action": { "type": "validate_stats", "form": { "date": "2025-01-10", "opponent": "North", "fgm": "5", "fga": "4" } }
    }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    assert!(!response.ok);
    assert_eq!(response.violations.len(), 1);
    assert_eq!(response.violations[0].field, "fgm");
    assert!(response.notification.is_none());
}

#[tokio::test]
async fn test_mode_never_sends() {
    let mut server = mockito::Server::new_async().await;
    let player_id = Uuid::from_u128(3);
    let mock = server
        .mock("POST", format!("/api/v1/players/{}/games", player_id).as_str())
        .expect(0)
        .create_async()
        .await;

    let req = request(json!({
        "mode": "test",
        "action": {
            "type": "submit_player_game",
            "player_id": player_id,
            "form": { "date": "2025-01-10", "opponent": "North", "pts": "12" }
        }
    }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    mock.assert_async().await;
    assert!(response.ok);
    assert_eq!(response.data.unwrap()["pts"], 12);
}

#[tokio::test]
async fn invalid_form_blocks_the_request_in_production() {
    let mut server = mockito::Server::new_async().await;
    let player_id = Uuid::from_u128(3);
    let mock = server
        .mock("POST", format!("/api/v1/players/{}/games", player_id).as_str())
        .expect(0)
        .create_async()
        .await;

    let req = request(json!({
        "action": {
            "type": "submit_player_game",
            "player_id": player_id,
            "form": { "date": "2025-01-10", "opponent": "North", "pts": "151" }
        }
    }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    mock.assert_async().await;
    assert!(!response.ok);
    assert_eq!(response.violations[0].field, "pts");
}

#[tokio::test]
async fn service_errors_become_notifications() {
    let mut server = mockito::Server::new_async().await;
    let report_id = Uuid::from_u128(8);
    let _mock = server
        .mock("POST", format!("/api/v1/reports/{}/feedback", report_id).as_str())
        .with_status(404)
        .with_body(r#"{"detail":"Report not found"}"#)
        .create_async()
        .await;

    let req = request(json!({ "action": { "type": "submit_feedback", "report_id": report_id, "rating": 4 } }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    assert!(!response.ok);
    assert_eq!(response.notification.as_deref(), Some("Report not found"));
    assert!(response.violations.is_empty());
}

#[tokio::test]
async fn team_game_reports_partial_failure() {
    let mut server = mockito::Server::new_async().await;
    let team_id = Uuid::from_u128(20);
    let game_id = Uuid::from_u128(21);
    let _game = server
        .mock("POST", format!("/api/v1/teams/{}/games", team_id).as_str())
        .with_status(201)
        .with_body(
            json!({
                "id": game_id, "team_id": team_id, "opponent_name": "North",
                "game_date": "2025-01-10", "created_at": "2025-01-10T20:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _stats = server
        .mock("POST", format!("/api/v1/games/{}/stats/basketball", game_id).as_str())
        .with_status(500)
        .with_body(r#"{"detail":"Stats service unavailable"}"#)
        .create_async()
        .await;

    let req = request(json!({
        "action": {
            "type": "submit_team_game",
            "team_id": team_id,
            "game": { "opponent_name": "North", "game_date": "2025-01-10" },
            "stats": { "points_for": 55, "points_against": 50, "fg_made": 20, "fg_att": 45 }
        }
    }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    assert!(!response.ok);
    assert_eq!(response.message, "Game created but stats could not be saved");
    assert_eq!(response.notification.as_deref(), Some("Stats service unavailable"));
    assert_eq!(response.data.unwrap()["id"], json!(game_id));
}

#[tokio::test]
async fn csv_import_posts_first_row() {
    let mut server = mockito::Server::new_async().await;
    let game_id = Uuid::from_u128(30);
    let mock = server
        .mock("POST", format!("/api/v1/games/{}/stats/basketball", game_id).as_str())
        .match_body(mockito::Matcher::PartialJson(json!({ "points_for": 48, "points_against": 44 })))
        .with_status(201)
        .with_body(
            json!({
                "id": Uuid::from_u128(31), "game_id": game_id,
                "points_for": 48, "points_against": 44,
                "fg_made": 0, "fg_att": 0, "three_made": 0, "three_att": 0,
                "ft_made": 0, "ft_att": 0, "rebounds_off": 0, "rebounds_def": 0,
                "assists": 0, "steals": 0, "blocks": 0, "turnovers": 0, "fouls": 0,
                "created_at": "2025-01-10T20:00:00Z"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let req = request(json!({
        "action": { "type": "import_stats_csv", "game_id": game_id, "csv": "Our Score,Opp Score\n48,44\n60,61\n" }
    }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    mock.assert_async().await;
    assert!(response.ok);
    assert_eq!(response.data.unwrap()["total_rebounds"], 0);
}

#[tokio::test]
async fn oversized_report_context_is_rejected() {
    let server = mockito::Server::new_async().await;
    let req = request(json!({
        "action": { "type": "generate_report", "game_id": Uuid::from_u128(1), "additional_context": "x".repeat(1001) }
    }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    assert!(!response.ok);
    assert_eq!(response.violations[0].field, "additional_context");
}

#[tokio::test]
async fn team_game_message_carries_the_margin() {
    let mut server = mockito::Server::new_async().await;
    let team_id = Uuid::from_u128(40);
    let game_id = Uuid::from_u128(41);
    let _game = server
        .mock("POST", format!("/api/v1/teams/{}/games", team_id).as_str())
        .with_status(201)
        .with_body(
            json!({
                "id": game_id, "team_id": team_id, "opponent_name": "South",
                "game_date": "2025-01-17", "created_at": "2025-01-17T20:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _stats = server
        .mock("POST", format!("/api/v1/games/{}/stats/basketball", game_id).as_str())
        .with_status(201)
        .with_body(
            json!({
                "id": Uuid::from_u128(42), "game_id": game_id,
                "points_for": 47, "points_against": 52,
                "fg_made": 0, "fg_att": 0, "three_made": 0, "three_att": 0,
                "ft_made": 0, "ft_att": 0, "rebounds_off": 0, "rebounds_def": 0,
                "assists": 0, "steals": 0, "blocks": 0, "turnovers": 0, "fouls": 0,
                "created_at": "2025-01-17T20:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let req = request(json!({
        "action": {
            "type": "submit_team_game",
            "team_id": team_id,
            "game": { "opponent_name": "South", "game_date": "2025-01-17" },
            "stats": { "points_for": 47, "points_against": 52 }
        }
    }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    assert!(response.ok);
    assert_eq!(response.message, "Game vs South saved (47-52, margin -5)");
}

#[tokio::test]
async fn unfinished_report_says_its_status() {
    let mut server = mockito::Server::new_async().await;
    let game_id = Uuid::from_u128(50);
    let _mock = server
        .mock("GET", format!("/api/v1/games/{}/report", game_id).as_str())
        .with_status(200)
        .with_body(
            json!({
                "id": Uuid::from_u128(51), "game_id": game_id, "status": "generating",
                "created_at": "2025-01-17T20:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let req = request(json!({ "action": { "type": "get_report", "game_id": game_id } }));
    let response = dispatch(&api_for(&server), req).await.unwrap();
    assert!(response.ok);
    assert_eq!(response.message, "Report is generating");
}
