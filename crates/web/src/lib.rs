mod config;
mod rate_limit;
pub mod render;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Form, Json, Query, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use bright_core::{BookingInquiry, InquiryDesk, SiteProfile};
use bright_observability::AppMetrics;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use crate::config::{FrameOptions, WebConfig};
pub use crate::rate_limit::{RateDecision, SubmissionLimiter};

#[derive(Clone)]
pub struct SiteState {
    pub profile: Arc<SiteProfile>,
    pub desk: Arc<InquiryDesk>,
    pub metrics: Arc<AppMetrics>,
    pub limiter: SubmissionLimiter,
    pub trust_forwarded: bool,
    pub headers: SecurityHeaders,
}

/// Response headers stamped on every reply, resolved once from [`WebConfig`].
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    content_security_policy: Option<HeaderValue>,
    frame_options: HeaderValue,
}

impl SecurityHeaders {
    pub fn from_config(config: &WebConfig) -> Self {
        let csp = config.content_security_policy();
        let content_security_policy = match HeaderValue::from_str(&csp) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(error = %err, "content security policy is not a valid header value");
                None
            }
        };

        Self {
            content_security_policy,
            frame_options: HeaderValue::from_static(config.frame_options.header_value()),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    route_fields: &'static str,
    metrics: bright_observability::MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct ContactQuery {
    vehicle: Option<String>,
}

pub fn build_app(config: WebConfig) -> Router {
    let desk = InquiryDesk::new(&config.profile, config.route_fields);
    let headers = SecurityHeaders::from_config(&config);
    let body_limit = config.body_limit_bytes;

    let state = SiteState {
        profile: Arc::new(config.profile),
        desk: Arc::new(desk),
        metrics: AppMetrics::shared(),
        limiter: SubmissionLimiter::new(config.rate_limit_window, config.rate_limit_max),
        trust_forwarded: config.trust_forwarded,
        headers,
    };

    build_router(state, body_limit)
}

pub fn build_router(state: SiteState, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about_redirect))
        .route("/services", get(services_redirect))
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/api/inquiry", post(api_inquiry))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .with_state(state)
}

async fn home(State(state): State<SiteState>) -> impl IntoResponse {
    state.metrics.inc_page_view();
    Html(render::home_page(&state.profile, current_year()))
}

async fn about_redirect() -> Redirect {
    Redirect::permanent("/#about")
}

async fn services_redirect() -> Redirect {
    Redirect::permanent("/#services")
}

async fn contact_page(
    State(state): State<SiteState>,
    Query(query): Query<ContactQuery>,
) -> impl IntoResponse {
    state.metrics.inc_page_view();

    let mut form = BookingInquiry::default();
    if let Some(vehicle) = query
        .vehicle
        .as_deref()
        .and_then(|requested| state.profile.preselect_vehicle(requested))
    {
        form.vehicle_pref = vehicle.to_string();
    }

    Html(render::contact_page(
        &state.profile,
        state.desk.route_fields(),
        &form,
        None,
        current_year(),
    ))
}

async fn contact_submit(
    State(state): State<SiteState>,
    Form(inquiry): Form<BookingInquiry>,
) -> Response {
    match state.desk.compose(&inquiry) {
        Ok(composed) => {
            state.metrics.inc_inquiry_composed();
            tracing::info!(
                vehicle = %inquiry.vehicle_pref,
                route_fields = state.desk.route_fields().as_code(),
                message_len = composed.message.len(),
                "booking inquiry handed off to whatsapp"
            );
            Redirect::to(&composed.whatsapp_url).into_response()
        }
        Err(err) => {
            state.metrics.inc_validation_failure();
            let report = err.report();
            let fields = report
                .fields()
                .iter()
                .map(|field| field.as_str())
                .collect::<Vec<_>>();
            tracing::info!(fields = ?fields, "booking inquiry rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render::contact_page(
                    &state.profile,
                    state.desk.route_fields(),
                    &inquiry,
                    Some(report),
                    current_year(),
                )),
            )
                .into_response()
        }
    }
}

async fn api_inquiry(
    State(state): State<SiteState>,
    payload: Result<Json<BookingInquiry>, JsonRejection>,
) -> Response {
    let inquiry = match payload {
        Ok(Json(inquiry)) => inquiry,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "inquiry body rejected");
            return (
                rejection.status(),
                Json(serde_json::json!({
                    "error": "invalid_body",
                    "message": rejection.body_text(),
                })),
            )
                .into_response();
        }
    };

    match state.desk.compose(&inquiry) {
        Ok(composed) => {
            state.metrics.inc_inquiry_composed();
            tracing::info!(
                vehicle = %inquiry.vehicle_pref,
                "booking inquiry composed via api"
            );
            (StatusCode::OK, Json(composed)).into_response()
        }
        Err(err) => {
            state.metrics.inc_validation_failure();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "error": "validation_failed",
                    "message": "one or more fields are invalid",
                    "fields": err.report(),
                })),
            )
                .into_response()
        }
    }
}

async fn health(State(state): State<SiteState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        route_fields: state.desk.route_fields().as_code(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn not_found(State(state): State<SiteState>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(render::notice_page(
            &state.profile,
            "Page not found",
            "The page you are looking for does not exist.",
            current_year(),
        )),
    )
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

async fn rate_limit_middleware(
    State(state): State<SiteState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }

    let client = client_key(&request, state.trust_forwarded);
    let retry_after = match state.limiter.check(&client) {
        RateDecision::Allowed { .. } => return next.run(request).await,
        RateDecision::Limited { retry_after } => retry_after,
    };

    state.metrics.inc_rate_limited();
    tracing::warn!(client = %client, path = request.uri().path(), "submission rate limited");

    let mut response = if request.uri().path().starts_with("/api/") {
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "rate_limited",
                "message": "too many inquiries from this address. wait and retry."
            })),
        )
            .into_response()
    } else {
        (
            StatusCode::TOO_MANY_REQUESTS,
            Html(render::notice_page(
                &state.profile,
                "Too many requests",
                "You have sent several inquiries in a short time. Please wait a minute and try again, or call us directly.",
                current_year(),
            )),
        )
            .into_response()
    };

    // Round up so clients never retry inside the window.
    let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }
    response
}

/// Rate-limit key: the socket peer, or the proxy-reported client when the proxy is trusted.
fn client_key(request: &Request<Body>, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(client) = forwarded_client(request) {
            return client;
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(peer)| peer.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// The rightmost `x-forwarded-for` entry is the one our own proxy appended.
fn forwarded_client(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .rsplit(',')
        .map(str::trim)
        .find(|entry| !entry.is_empty())
        .map(str::to_string)
}

async fn security_headers_middleware(
    State(state): State<SiteState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = &state.headers;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::X_FRAME_OPTIONS,
        headers.frame_options.clone(),
    );
    response.headers_mut().insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    if let Some(csp) = &headers.content_security_policy {
        response
            .headers_mut()
            .insert(header::CONTENT_SECURITY_POLICY, csp.clone());
    }

    response
}
