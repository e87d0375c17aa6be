use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, delete, patch},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, restaurant, schedule_rule, season, exception_date, availability, booking};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Restaurant configuration
        .route("/api/v1/restaurants", post(restaurant::create_restaurant).get(restaurant::list_restaurants))
        .route("/api/v1/restaurants/{restaurant_id}", get(restaurant::get_restaurant))
        .route("/api/v1/restaurants/{restaurant_id}/rules", post(schedule_rule::create_rule).get(schedule_rule::list_rules))
        .route("/api/v1/restaurants/{restaurant_id}/rules/{rule_id}", patch(schedule_rule::update_rule).delete(schedule_rule::delete_rule))
        .route("/api/v1/restaurants/{restaurant_id}/seasons", post(season::create_season).get(season::list_seasons))
        .route("/api/v1/restaurants/{restaurant_id}/seasons/{season_id}", patch(season::update_season).delete(season::delete_season))
        .route("/api/v1/restaurants/{restaurant_id}/exceptions", post(exception_date::upsert_exception).get(exception_date::list_exceptions))
        .route("/api/v1/restaurants/{restaurant_id}/exceptions/{date}", delete(exception_date::delete_exception))

        // Availability
        .route("/api/v1/availability", get(availability::get_availability))
        .route("/api/v1/availability/check-slot", post(availability::check_slot))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/v1/bookings/mine", get(booking::my_bookings))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/confirm", post(booking::confirm_booking))
        .route("/api/v1/bookings/{booking_id}/cancel", post(booking::cancel_booking))
        .route("/api/v1/bookings/{booking_id}/complete", post(booking::complete_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
