//! Integration tests for the widget catalog endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

// ---------------------------------------------------------------------------
// Test: catalog lists the seeded widgets in stable order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_returns_seeded_widgets_in_order() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/widgets/catalog").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let widgets = json["widgets"].as_array().expect("widgets array");

    assert_eq!(widgets.len(), 8);
    assert_eq!(widgets[0]["id"], "weather");
    assert_eq!(widgets[1]["id"], "banner-ad");
}

// ---------------------------------------------------------------------------
// Test: descriptor flags survive the wire format
// ---------------------------------------------------------------------------

#[tokio::test]
async fn banner_descriptor_is_locked_mandatory_advertisement() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/widgets/catalog").await).await;

    let banner = json["widgets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["id"] == "banner-ad")
        .expect("banner-ad in catalog");

    assert_eq!(banner["category"], "advertisement");
    assert_eq!(banner["movable"], false);
    assert_eq!(banner["mandatory"], true);
}

// ---------------------------------------------------------------------------
// Test: the catalog requires no identity header
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_is_public() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/widgets/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);
}
