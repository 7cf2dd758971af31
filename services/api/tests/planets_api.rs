//! HTTP tests for the planet catalog endpoints

mod common;

use axum::http::StatusCode;
use common::{TestApp, earth_fields, planet_fields};
use planetary_api::schema;

#[tokio::test]
async fn test_list_includes_seeded_earth_with_exact_mass() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/planets").await;
    assert_eq!(status, StatusCode::OK);

    let planets = body.as_array().unwrap();
    assert_eq!(planets.len(), 3);

    let earth = planets
        .iter()
        .find(|p| p["planet_name"] == "Earth")
        .expect("Earth should be listed");
    assert_eq!(earth["mass"].as_f64(), Some(5.972e24));
    assert_eq!(earth["home_star"], "Sol");

    let fields: Vec<_> = earth.as_object().unwrap().keys().cloned().collect();
    for field in [
        "planet_id",
        "planet_name",
        "planet_type",
        "home_star",
        "mass",
        "radius",
        "distance",
    ] {
        assert!(fields.contains(&field.to_string()), "missing {}", field);
    }
    assert_eq!(fields.len(), 7);
}

#[tokio::test]
async fn test_list_is_empty_without_planets() {
    let app = TestApp::new();

    let (status, body) = app.get("/planets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_planet_details() {
    let app = TestApp::seeded().await;
    let earth_id = app.planet_id("Earth").await.unwrap();

    let (status, body) = app.get(&format!("/planet_details/{}", earth_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["planet_name"], "Earth");
    assert_eq!(body["radius"].as_f64(), Some(3959.0));
}

#[tokio::test]
async fn test_planet_details_missing() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/planet_details/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "That planet does not exist.");
}

#[tokio::test]
async fn test_planet_details_unparsable_id_is_not_found() {
    let app = TestApp::seeded().await;

    for uri in ["/planet_details/earth", "/planet_details/99999999999"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["message"], "That planet does not exist.");
    }
}

#[tokio::test]
async fn test_remove_planet_unparsable_id_is_not_found() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;

    for uri in ["/remove_planet/earth", "/remove_planet/99999999999"] {
        let (status, body) = app.delete(uri, Some(&token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["message"], "That planet does not exist.");
    }

    let (_, body) = app.get("/planets").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_add_planet_requires_token() {
    let app = TestApp::seeded().await;

    let (status, body) = app
        .form("POST", "/add_planet", &planet_fields("Mars"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing or invalid bearer token");

    // payload validity makes no difference
    let (status, _) = app
        .form("POST", "/add_planet", &[("planet_name", "Mars")], None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(app.planet_id("Mars").await.is_none());
}

#[tokio::test]
async fn test_add_planet_rejects_invalid_token() {
    let app = TestApp::seeded().await;

    let (status, _) = app
        .form("POST", "/add_planet", &planet_fields("Mars"), Some("not-a-token"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_add_planet_with_login_token() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .form("POST", "/add_planet", &planet_fields("Mars"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "You added a planet");

    let mars_id = app.planet_id("Mars").await.unwrap();
    let (status, body) = app.get(&format!("/planet_details/{}", mars_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mass"].as_f64(), Some(6.39e23));
}

#[tokio::test]
async fn test_add_planet_duplicate_name() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .form("POST", "/add_planet", &earth_fields(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "There is already a planet by that name");

    let (_, body) = app.get("/planets").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_add_planet_non_numeric_mass() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;

    let mut fields = planet_fields("Mars");
    fields[3] = ("mass", "very heavy");

    let (status, body) = app
        .form("POST", "/add_planet", &fields, Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("mass"));
    assert!(app.planet_id("Mars").await.is_none());
}

#[tokio::test]
async fn test_add_planet_validates_before_name_check() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;

    let mut fields = earth_fields();
    fields[3] = ("mass", "heavy");

    let (status, body) = app
        .form("POST", "/add_planet", &fields, Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("mass"));
}

#[tokio::test]
async fn test_add_planet_missing_field() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;

    let (status, _) = app
        .form("POST", "/add_planet", &[("planet_name", "Mars")], Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_planet_overwrites_all_fields() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;
    let earth_id = app.planet_id("Earth").await.unwrap().to_string();

    let fields = [
        ("planet_id", earth_id.as_str()),
        ("planet_name", "Terra"),
        ("planet_type", "Class M"),
        ("home_star", "Sun"),
        ("mass", "1"),
        ("radius", "2"),
        ("distance", "3"),
    ];

    let (status, body) = app
        .form("PUT", "/update_planet", &fields, Some(&token))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], "You updated a planet");

    let (_, body) = app.get(&format!("/planet_details/{}", earth_id)).await;
    assert_eq!(body["planet_name"], "Terra");
    assert_eq!(body["home_star"], "Sun");
    assert_eq!(body["mass"].as_f64(), Some(1.0));
    assert_eq!(body["distance"].as_f64(), Some(3.0));
}

#[tokio::test]
async fn test_update_planet_missing() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;

    let mut fields = vec![("planet_id", "999")];
    fields.extend(planet_fields("Mars"));

    let (status, body) = app
        .form("PUT", "/update_planet", &fields, Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "That planet does not exist.");
}

#[tokio::test]
async fn test_update_planet_onto_existing_name() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;
    let venus_id = app.planet_id("Venus").await.unwrap().to_string();

    let mut fields = vec![("planet_id", venus_id.as_str())];
    fields.extend(planet_fields("Earth"));

    let (status, _) = app
        .form("PUT", "/update_planet", &fields, Some(&token))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_planet_requires_token() {
    let app = TestApp::seeded().await;

    let mut fields = vec![("planet_id", "1")];
    fields.extend(planet_fields("Mars"));

    let (status, _) = app.form("PUT", "/update_planet", &fields, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_then_details_is_not_found() {
    let app = TestApp::seeded().await;
    let token = app.admin_token().await;
    let venus_id = app.planet_id("Venus").await.unwrap();

    let (status, body) = app
        .delete(&format!("/remove_planet/{}", venus_id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], "You deleted a planet");

    let (status, body) = app.get(&format!("/planet_details/{}", venus_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "That planet does not exist.");

    let (status, _) = app
        .delete(&format!("/remove_planet/{}", venus_id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_token() {
    let app = TestApp::seeded().await;
    let earth_id = app.planet_id("Earth").await.unwrap();

    let (status, _) = app
        .delete(&format!("/remove_planet/{}", earth_id), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.planet_id("Earth").await.is_some());
}

#[tokio::test]
async fn test_reset_token_is_not_a_bearer_credential() {
    let app = TestApp::seeded().await;
    let reset_token = app
        .state
        .jwt_service
        .generate_reset_token(schema::SEED_USER_EMAIL)
        .unwrap();

    let (status, _) = app
        .form("POST", "/add_planet", &planet_fields("Mars"), Some(&reset_token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
