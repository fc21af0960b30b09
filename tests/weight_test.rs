mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_and_get_entry() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "a@x.com", "secret1").await;
    let auth = common::bearer_header(&pool, &user).await;

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/weight",
            Some(&auth),
            &json!({ "weight": 82.5, "weight_date": "2026-08-20", "notes": "morning" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    let id = body["weight"]["id"].as_i64().unwrap();
    assert_eq!(body["weight"]["weight"], 82.5);

    let response = app
        .oneshot(common::get_request(&format!("/weight?id={id}"), Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["weight_date"], "2026-08-20");
    assert_eq!(body["notes"], "morning");
}

#[tokio::test]
async fn test_create_requires_positive_weight() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "a@x.com", "secret1").await;
    let auth = common::bearer_header(&pool, &user).await;

    for body in [
        json!({}),
        json!({ "weight": 0.0 }),
        json!({ "weight": -5.0 }),
    ] {
        let response = app
            .clone()
            .oneshot(common::json_request("POST", "/weight", Some(&auth), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn test_duplicate_date_is_conflict() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "a@x.com", "secret1").await;
    let auth = common::bearer_header(&pool, &user).await;

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/weight",
            Some(&auth),
            &json!({ "weight": 82.5, "weight_date": "2026-08-20" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/weight",
            Some(&auth),
            &json!({ "weight": 83.0, "weight_date": "2026-08-20" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Weight entry already exists for this date");

    // A different date is fine.
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/weight",
            Some(&auth),
            &json!({ "weight": 83.0, "weight_date": "2026-08-21" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // So is the same date for a different user.
    let other = common::create_test_user(&pool, "b@x.com", "secret2").await;
    let other_auth = common::bearer_header(&pool, &other).await;
    let response = app
        .oneshot(common::json_request(
            "POST",
            "/weight",
            Some(&other_auth),
            &json!({ "weight": 70.0, "weight_date": "2026-08-20" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_partial_and_validation() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "a@x.com", "secret1").await;
    let auth = common::bearer_header(&pool, &user).await;

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/weight",
            Some(&auth),
            &json!({ "weight": 82.5, "weight_date": "2026-08-20", "notes": "morning" }),
        ))
        .await
        .unwrap();
    let id = common::body_json(response).await["weight"]["id"]
        .as_i64()
        .unwrap();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            "/weight",
            Some(&auth),
            &json!({ "id": id, "notes": "evening" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::get_request(&format!("/weight?id={id}"), Some(&auth)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["weight"], 82.5);
    assert_eq!(body["notes"], "evening");

    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            "/weight",
            Some(&auth),
            &json!({ "id": id, "weight": -1.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(common::json_request(
            "PUT",
            "/weight",
            Some(&auth),
            &json!({ "notes": "missing id" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_date_collision_is_conflict() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "a@x.com", "secret1").await;
    let auth = common::bearer_header(&pool, &user).await;

    let mut ids = Vec::new();
    for date in ["2026-08-20", "2026-08-21"] {
        let response = app
            .clone()
            .oneshot(common::json_request(
                "POST",
                "/weight",
                Some(&auth),
                &json!({ "weight": 82.5, "weight_date": date }),
            ))
            .await
            .unwrap();
        ids.push(
            common::body_json(response).await["weight"]["id"]
                .as_i64()
                .unwrap(),
        );
    }

    let response = app
        .oneshot(common::json_request(
            "PUT",
            "/weight",
            Some(&auth),
            &json!({ "id": ids[1], "weight_date": "2026-08-20" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_date_range_and_order() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "a@x.com", "secret1").await;
    let auth = common::bearer_header(&pool, &user).await;

    for (weight, date) in [(82.0, "2026-08-18"), (82.5, "2026-08-20"), (83.0, "2026-08-22")] {
        let response = app
            .clone()
            .oneshot(common::json_request(
                "POST",
                "/weight",
                Some(&auth),
                &json!({ "weight": weight, "weight_date": date }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(common::get_request("/weight", Some(&auth)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    let dates: Vec<&str> = body["weights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["weight_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2026-08-22", "2026-08-20", "2026-08-18"]);

    let response = app
        .clone()
        .oneshot(common::get_request(
            "/weight?start_date=2026-08-19&end_date=2026-08-21",
            Some(&auth),
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    let weights = body["weights"].as_array().unwrap();
    assert_eq!(weights.len(), 1);
    assert_eq!(weights[0]["weight_date"], "2026-08-20");

    let response = app
        .oneshot(common::get_request(
            "/weight?start_date=2026-08-20",
            Some(&auth),
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["weights"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_other_users_entry_is_not_found() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let owner = common::create_test_user(&pool, "a@x.com", "secret1").await;
    let intruder = common::create_test_user(&pool, "b@x.com", "secret2").await;
    let owner_auth = common::bearer_header(&pool, &owner).await;
    let intruder_auth = common::bearer_header(&pool, &intruder).await;

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/weight",
            Some(&owner_auth),
            &json!({ "weight": 82.5, "weight_date": "2026-08-20" }),
        ))
        .await
        .unwrap();
    let id = common::body_json(response).await["weight"]["id"]
        .as_i64()
        .unwrap();

    let response = app
        .clone()
        .oneshot(common::get_request(
            &format!("/weight?id={id}"),
            Some(&intruder_auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            "/weight",
            Some(&intruder_auth),
            &json!({ "id": id, "weight": 1.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(common::delete_request(
            &format!("/weight?id={id}"),
            Some(&intruder_auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_entry() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "a@x.com", "secret1").await;
    let auth = common::bearer_header(&pool, &user).await;

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/weight",
            Some(&auth),
            &json!({ "weight": 82.5, "weight_date": "2026-08-20" }),
        ))
        .await
        .unwrap();
    let id = common::body_json(response).await["weight"]["id"]
        .as_i64()
        .unwrap();

    let response = app
        .clone()
        .oneshot(common::delete_request(
            &format!("/weight?id={id}"),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(common::get_request(&format!("/weight?id={id}"), Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
