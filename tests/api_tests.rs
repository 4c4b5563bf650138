use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use cycleplore::models::route::{ExportResponse, RouteResponse};
use cycleplore::models::{Coordinates, RouteKind};
use cycleplore::services::places::PlaceCategory;
use serde_json::{json, Value};
use std::f64::consts::FRAC_PI_2;
use tower::ServiceExt;

mod common;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = common::setup_test_app(None);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_plan_trip_due_east() {
    let app = common::setup_test_app(None);

    let request = post_json(
        "/trips/plan",
        json!({
            "start_location": {"lat": 52.2297, "lng": 21.0122},
            "track_length_km": 20.0,
            "days": 2,
            "fitness_level": 3,
            "bearing_rad": FRAC_PI_2
        }),
    );

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: RouteResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let start = common::warsaw();
    let destination = body.route.points[1];

    assert_eq!(body.route.kind, RouteKind::Destination);
    assert_eq!(body.route.points[0], start);
    assert!(destination.lng > start.lng);
    assert!((destination.lat - start.lat).abs() < 0.01);
    assert!((body.distance_km - 20.0).abs() < 1e-6);
    assert_eq!(body.days, Some(2));
    assert_eq!(body.fitness_level, Some(3));

    let parsed = common::parse_trackpoints(&body.gpx);
    assert_eq!(
        parsed,
        vec![(start.lat, start.lng), (destination.lat, destination.lng)]
    );
}

#[tokio::test]
async fn test_plan_trip_random_bearing() {
    let app = common::setup_test_app(None);

    let request = post_json(
        "/trips/plan",
        json!({
            "start_location": {"lat": 52.2297, "lng": 21.0122},
            "track_length_km": 75
        }),
    );

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: RouteResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body.route.points.len(), 2);
    assert!((body.distance_km - 75.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_plan_trip_validation() {
    let app = common::setup_test_app(None);

    let invalid_requests = vec![
        // No start location chosen yet
        json!({"track_length_km": 20.0}),
        // Below the slider range
        json!({"start_location": {"lat": 52.2297, "lng": 21.0122}, "track_length_km": 5.0}),
        // Latitude out of range
        json!({"start_location": {"lat": 95.0, "lng": 21.0122}}),
        // Bearing outside [0, 2π)
        json!({"start_location": {"lat": 52.2297, "lng": 21.0122}, "bearing_rad": 7.0}),
        // Too many days
        json!({"start_location": {"lat": 52.2297, "lng": 21.0122}, "days": 30}),
    ];

    for body in invalid_requests {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/trips/plan", body.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "should reject {body}"
        );
    }
}

#[tokio::test]
async fn test_plan_trip_rejects_bad_fitness_level() {
    let app = common::setup_test_app(None);

    let response = app
        .router
        .oneshot(post_json(
            "/trips/plan",
            json!({"start_location": {"lat": 52.2297, "lng": 21.0122}, "fitness_level": 6}),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_station_trip() {
    let station = Coordinates::new(52.2289, 21.0031).unwrap();
    let app = common::setup_test_app(Some(station));

    let response = app
        .router
        .oneshot(post_json(
            "/trips/station",
            json!({"start": {"lat": 52.2297, "lng": 21.0122}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: RouteResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body.route.kind, RouteKind::Station);
    assert_eq!(body.route.points, vec![common::warsaw(), station]);
    assert!(body.days.is_none());
    assert_eq!(
        *app.places.searches.lock().unwrap(),
        vec![(5000.0, PlaceCategory::TrainStation)]
    );
}

#[tokio::test]
async fn test_station_trip_with_category() {
    let station = Coordinates::new(52.2310, 21.0110).unwrap();
    let app = common::setup_test_app(Some(station));

    let response = app
        .router
        .oneshot(post_json(
            "/trips/station",
            json!({
                "start": {"lat": 52.2297, "lng": 21.0122},
                "radius_m": 800.0,
                "category": "public_transport_station"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *app.places.searches.lock().unwrap(),
        vec![(800.0, PlaceCategory::PublicTransportStation)]
    );
}

#[tokio::test]
async fn test_station_trip_radius_out_of_range() {
    for radius in [99.0, 50_001.0] {
        let app = common::setup_test_app(Some(common::warsaw()));

        let response = app
            .router
            .oneshot(post_json(
                "/trips/station",
                json!({"start": {"lat": 52.2297, "lng": 21.0122}, "radius_m": radius}),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "radius {} should be rejected",
            radius
        );
        let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["error"], "Bad Request");
        assert!(app.places.searches.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_station_trip_not_found() {
    let app = common::setup_test_app(None);

    let response = app
        .router
        .oneshot(post_json(
            "/trips/station",
            json!({"start": {"lat": 52.2297, "lng": 21.0122}, "radius_m": 500.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["error"], "Not Found");
}

#[tokio::test]
async fn test_render_gpx() {
    let app = common::setup_test_app(None);

    let response = app
        .router
        .oneshot(post_json(
            "/trips/gpx",
            json!({"points": [{"lat": 52.2297, "lng": 21.0122}]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/gpx+xml"
    );

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("<trkpt lat=\"52.2297\" lon=\"21.0122\"/>"));
}

#[tokio::test]
async fn test_render_gpx_empty_and_invalid() {
    let app = common::setup_test_app(None);

    let response = app
        .router
        .clone()
        .oneshot(post_json("/trips/gpx", json!({"points": []})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("<trkseg>\n</trkseg>"));

    let response = app
        .router
        .oneshot(post_json(
            "/trips/gpx",
            json!({"points": [{"lat": 0.0, "lng": 200.0}]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_trip() {
    let app = common::setup_test_app(None);
    let route_id = "6f1c2a4e-8a2b-4c55-9a3e-0d7c2f1b9e11";

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/trips/export",
            json!({
                "route": {
                    "id": route_id,
                    "kind": "destination",
                    "points": [
                        {"lat": 52.2297, "lng": 21.0122},
                        {"lat": 52.4096, "lng": 21.0122}
                    ]
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: ExportResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body.path, format!("memory/cycleplore-{}.gpx", route_id));

    let files = app.exporter.files.lock().unwrap();
    let document = &files[&format!("cycleplore-{}", route_id)];
    assert_eq!(
        common::parse_trackpoints(document),
        vec![(52.2297, 21.0122), (52.4096, 21.0122)]
    );
}

#[tokio::test]
async fn test_geocode_endpoint() {
    let app = common::setup_test_app(None);

    let request = Request::builder()
        .uri("/geocode?address=Plac%20Defilad%201%2C%20Warszawa")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let coords: Coordinates = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(coords, common::warsaw());

    let request = Request::builder()
        .uri("/geocode?address=Nowhere")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .uri("/geocode?address=unreachable")
        .body(Body::empty())
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
