use std::net::SocketAddr;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bright_core::{extract_message, RouteFields};
use bright_web::{build_app, FrameOptions, WebConfig};
use serde_json::json;
use tower::ServiceExt;

const ASHA_FORM: &str = "full_name=Asha+Rao&phone=9035119555&trip_type=Wedding&vehicle_pref=Luxury+Bus&seats=45&travel_date=2025-12-10&pickup_location=Bidar&drop_location=Hyderabad";

fn app() -> Router {
    build_app(WebConfig::default())
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post_from(body: &str, peer: [u8; 4], forwarded: Option<&str>) -> Request<Body> {
    let mut request = form_post(body);
    if let Some(forwarded) = forwarded {
        request.headers_mut().insert(
            "x-forwarded-for",
            forwarded.parse().expect("header value"),
        );
    }
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((peer, 52_000))));
    request
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_metrics() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["route_fields"], "split");
    assert!(parsed["metrics"].get("page_views_total").is_some());
}

#[tokio::test]
async fn home_page_renders_all_sections() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert!(response.headers().get("x-request-id").is_some());

    let html = body_text(response).await;
    for needle in [
        "Luxury on Wheels.",
        r#"id="about""#,
        r#"id="services""#,
        "Visit Our Office",
        "Chat with us",
        "https://www.google.com/maps/embed",
    ] {
        assert!(html.contains(needle), "missing {needle}");
    }
}

#[tokio::test]
async fn section_paths_redirect_to_home_anchors() {
    let response = app()
        .oneshot(Request::builder().uri("/services").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/#services");
}

#[tokio::test]
async fn contact_page_preselects_requested_vehicle() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/contact?vehicle=Innova%20Crysta%20%2F%20SUV")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<option value="Innova/SUV" selected>Innova/SUV</option>"#));
}

#[tokio::test]
async fn valid_form_hands_off_to_whatsapp() {
    let response = app().oneshot(form_post(ASHA_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect location")
        .to_string();
    assert!(location.starts_with("https://wa.me/919035119555?text=Hello%20Bright%20Tours!%0A%0A"));

    let message = extract_message(&location).expect("pre-filled text");
    let lines = message.lines().collect::<Vec<_>>();
    assert_eq!(
        &lines[4..12],
        &[
            "*Name:* Asha Rao",
            "*Phone:* 9035119555",
            "*Trip Type:* Wedding",
            "*Vehicle:* Luxury Bus",
            "*Passengers:* 45",
            "*Date:* 2025-12-10",
            "*From:* Bidar",
            "*To:* Hyderabad",
        ]
    );
    assert_eq!(lines.last(), Some(&"Please provide a quote."));
}

#[tokio::test]
async fn invalid_form_is_rerendered_with_inline_errors() {
    let body = ASHA_FORM.replace("trip_type=Wedding", "trip_type=");
    let response = app().oneshot(form_post(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.headers().get(header::LOCATION).is_none());

    let html = body_text(response).await;
    assert!(html.contains(r#"<p class="field-error" id="trip_type-error">Please select a trip type</p>"#));
    assert!(!html.contains(r#"id="full_name-error""#));
    assert!(html.contains(r#"value="Asha Rao""#));
    assert!(html.contains(r#"<option value="Luxury Bus" selected>"#));
}

#[tokio::test]
async fn submitted_markup_is_escaped() {
    let response = app()
        .oneshot(form_post("full_name=%3Cscript%3Ealert(1)%3C%2Fscript%3E"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn api_returns_composed_inquiry() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/inquiry")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "full_name": "Asha Rao",
                "phone": "9035119555",
                "trip_type": "Wedding",
                "vehicle_pref": "Luxury Bus",
                "seats": "45",
                "travel_date": "2025-12-10",
                "pickup_location": "Bidar",
                "drop_location": "Hyderabad"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let message = parsed["message"].as_str().unwrap();
    assert!(message.contains("*Vehicle:* Luxury Bus\n"));
    assert_eq!(
        parsed["whatsapp_url"].as_str().unwrap(),
        format!(
            "https://wa.me/919035119555?text={}",
            parsed["encoded_message"].as_str().unwrap()
        )
    );
}

#[tokio::test]
async fn api_reports_field_errors() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/inquiry")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "full_name": "A", "phone": "12345" }).to_string(),
        ))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let parsed: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(parsed["error"], "validation_failed");
    let fields = parsed["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["field"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        fields,
        vec![
            "full_name",
            "phone",
            "trip_type",
            "vehicle_pref",
            "seats",
            "travel_date"
        ]
    );
}

#[tokio::test]
async fn combined_route_layout_requires_route_details() {
    let app = build_app(WebConfig {
        route_fields: RouteFields::Combined,
        ..WebConfig::default()
    });

    let response = app.clone().oneshot(form_post(ASHA_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Route details must be at least 10 characters"));

    let body = format!("{ASHA_FORM}&route_details=Bidar+to+Hyderabad+and+back");
    let response = app.oneshot(form_post(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    let message = extract_message(location).unwrap();
    assert!(message.contains("*Route:* Bidar to Hyderabad and back\n"));
    assert!(!message.contains("*From:*"));
}

#[tokio::test]
async fn submissions_are_rate_limited_per_client() {
    let app = build_app(WebConfig {
        rate_limit_window: Duration::from_secs(60),
        rate_limit_max: 2,
        ..WebConfig::default()
    });
    let first = [203, 0, 113, 7];
    let second = [198, 51, 100, 20];

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(form_post_from(ASHA_FORM, first, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let response = app
        .clone()
        .oneshot(form_post_from(ASHA_FORM, first, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "60");

    let response = app
        .clone()
        .oneshot(form_post_from(ASHA_FORM, second, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let page = app
        .oneshot(Request::builder().uri("/contact").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(page.status(), StatusCode::OK);
}

#[tokio::test]
async fn forwarded_header_cannot_dodge_the_limit() {
    let app = build_app(WebConfig {
        rate_limit_max: 2,
        ..WebConfig::default()
    });
    let peer = [203, 0, 113, 7];

    let statuses = {
        let mut statuses = Vec::new();
        for round in 0..4 {
            let forwarded = format!("10.9.8.{round}");
            let response = app
                .clone()
                .oneshot(form_post_from(ASHA_FORM, peer, Some(&forwarded)))
                .await
                .unwrap();
            statuses.push(response.status());
        }
        statuses
    };

    assert_eq!(
        statuses,
        vec![
            StatusCode::SEE_OTHER,
            StatusCode::SEE_OTHER,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::TOO_MANY_REQUESTS,
        ]
    );
}

#[tokio::test]
async fn trusted_proxy_limits_each_forwarded_client() {
    let app = build_app(WebConfig {
        rate_limit_max: 1,
        trust_forwarded: true,
        ..WebConfig::default()
    });
    let proxy = [10, 0, 0, 2];

    let response = app
        .clone()
        .oneshot(form_post_from(ASHA_FORM, proxy, Some("203.0.113.7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(form_post_from(ASHA_FORM, proxy, Some("203.0.113.7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app
        .oneshot(form_post_from(ASHA_FORM, proxy, Some("198.51.100.20")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn api_answers_mistyped_bodies_with_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/inquiry")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "full_name": "Asha Rao",
                "phone": "9035119555",
                "trip_type": "Wedding",
                "vehicle_pref": "Luxury Bus",
                "seats": 45,
                "travel_date": "2025-12-10"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let parsed: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(parsed["error"], "invalid_body");
    assert!(parsed["message"].as_str().unwrap().contains("seats"));
}

#[tokio::test]
async fn api_rejects_non_json_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/inquiry")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("full_name=Asha"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let parsed: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(parsed["error"], "invalid_body");
}

#[tokio::test]
async fn security_headers_follow_site_config() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.headers().get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    let csp = response
        .headers()
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(csp.contains("form-action 'self' https://brighttours.in https://wa.me"));
    assert!(csp.contains("frame-src https://www.google.com"));

    let mut config = WebConfig {
        frame_options: FrameOptions::SameOrigin,
        ..WebConfig::default()
    };
    config.profile.public_url = "https://tours.example.net".to_string();
    let response = build_app(config)
        .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::X_FRAME_OPTIONS).unwrap(),
        "SAMEORIGIN"
    );
    let csp = response
        .headers()
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(csp.starts_with("default-src 'self' https://tours.example.net;"));
    assert!(csp.contains("frame-ancestors 'self'"));
}

#[tokio::test]
async fn unknown_paths_render_not_found_page() {
    let response = app()
        .oneshot(Request::builder().uri("/fleet/helicopter").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let body = format!("full_name={}", "a".repeat(32 * 1024));
    let response = app().oneshot(form_post(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
