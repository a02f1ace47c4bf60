//! Сквозные сценарии клиентского ядра против замоканного бэкенда.

use bus_booking::api_client::{ApiError, BackendClient};
use bus_booking::booking::BookingError;
use bus_booking::config::{ApiConfig, CircuitBreakerConfig};
use bus_booking::models::Gender;
use bus_booking::search::{SearchClient, TripQuery};
use bus_booking::services::{CheckoutService, FlowError, SeatMapService};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> BackendClient {
    BackendClient::from_config(
        &ApiConfig {
            base_url: server.uri(),
            timeout_seconds: 5,
        },
        &CircuitBreakerConfig {
            failure_threshold: 5,
            timeout_seconds: 60,
        },
    )
}

fn bus_json(seats: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "bus-1",
        "name": "Green Line",
        "busNumber": "GL-203",
        "route": { "from": "Dhaka", "to": "Sylhet" },
        "departureTime": "2026-09-01T08:30:00Z",
        "fare": { "actualPrice": 1500 },
        "seats": seats,
    })
}

fn eight_seats() -> serde_json::Value {
    json!([
        { "seatNumber": "R-1" },
        { "seatNumber": "R-2" },
        { "seatNumber": "R-3" },
        { "seatNumber": "R-4" },
        { "seatNumber": "R-5", "booked": true, "gender": "F" },
        { "seatNumber": "R-6" },
        { "seatNumber": "R-7" },
        { "seatNumber": "R-8" },
    ])
}

async fn mount_bus(server: &MockServer, seats: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/bus/bus-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bus_json(seats)))
        .mount(server)
        .await;
}

async fn mount_tickets(server: &MockServer, tickets: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/ticket/user/information/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tickets))
        .mount(server)
        .await;
}

#[tokio::test]
async fn load_merges_booked_tickets_into_layout() {
    let server = MockServer::start().await;
    mount_bus(&server, eight_seats()).await;
    mount_tickets(
        &server,
        json!({
            "active": [
                { "id": "t1", "userId": "u1", "busId": "bus-1",
                  "seatNumber": "R-6", "cancelled": false },
                { "id": "t2", "userId": "u1", "busId": "bus-1",
                  "seatNumber": "R-7", "cancelled": true },
                { "id": "t3", "userId": "u1", "busId": "bus-9",
                  "seatNumber": "R-8", "cancelled": false },
            ],
            "past": [],
        }),
    )
    .await;

    let session = SeatMapService::new(client(&server))
        .load("bus-1", "u1")
        .await
        .unwrap();

    let layout = session.layout();
    assert_eq!(layout.len(), 8);
    // Из записи рейса
    assert!(layout.seat("R-5").unwrap().booked);
    // Из неотменённого билета
    assert!(layout.seat("R-6").unwrap().booked);
    // Отменённый билет и чужой рейс мест не занимают
    assert!(!layout.seat("R-7").unwrap().booked);
    assert!(!layout.seat("R-8").unwrap().booked);
    assert_eq!(session.fare_per_seat(), 1500);
}

#[tokio::test]
async fn full_checkout_happy_path() {
    let server = MockServer::start().await;
    mount_bus(&server, eight_seats()).await;
    mount_tickets(&server, json!({ "active": [], "past": [] })).await;

    Mock::given(method("POST"))
        .and(path("/payment/create-payment-intent"))
        .and(body_partial_json(json!({ "amount": 3000, "currency": "BDT" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clientSecret": "cs_test",
            "paymentId": "pi_1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/bus/update-seat-status"))
        .and(body_partial_json(json!({
            "busId": "bus-1",
            "seats": [
                { "seatNumber": "R-7", "gender": "M" },
                { "seatNumber": "R-8", "gender": "M" },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ticket/generate"))
        .and(body_partial_json(json!({
            "tickets": [
                { "userId": "u1", "busId": "bus-1", "seatNumber": "R-7" },
                { "userId": "u1", "busId": "bus-1", "seatNumber": "R-8" },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [
                { "id": "t10", "userId": "u1", "busId": "bus-1",
                  "seatNumber": "R-7", "cancelled": false },
                { "id": "t11", "userId": "u1", "busId": "bus-1",
                  "seatNumber": "R-8", "cancelled": false },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/payment/update-status"))
        .and(body_partial_json(json!({
            "paymentId": "pi_1",
            "status": "succeeded",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = SeatMapService::new(api.clone())
        .load("bus-1", "u1")
        .await
        .unwrap();

    // R-7 и R-8 — одна пара, оба мужские
    assert!(session.toggle("R-7"));
    assert!(session.toggle("R-8"));
    session.assign_gender("R-7", Gender::Male).unwrap();
    session.assign_gender("R-8", Gender::Male).unwrap();

    let checkout = CheckoutService::new(api, "BDT");
    let context = checkout.initiate(&session).await.unwrap();
    assert_eq!(context.payment_id, "pi_1");
    assert_eq!(context.request.amount, 3000);

    let tickets = checkout.complete(&session, &context).await.unwrap();
    assert_eq!(tickets.len(), 2);
}

#[tokio::test]
async fn incomplete_gender_blocks_initiate_before_any_network_call() {
    let server = MockServer::start().await;
    mount_bus(&server, eight_seats()).await;
    mount_tickets(&server, json!({ "active": [], "past": [] })).await;

    // Платёжный мок не поднимаем: до сети дойти не должно
    let api = client(&server);
    let mut session = SeatMapService::new(api.clone())
        .load("bus-1", "u1")
        .await
        .unwrap();
    session.toggle("R-7");

    let err = CheckoutService::new(api, "BDT")
        .initiate(&session)
        .await
        .unwrap_err();
    match err {
        FlowError::Booking(BookingError::IncompleteGenderAssignment(seats)) => {
            assert_eq!(seats, vec!["R-7".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn payment_gateway_failure_is_surfaced() {
    let server = MockServer::start().await;
    mount_bus(&server, eight_seats()).await;
    mount_tickets(&server, json!({ "active": [], "past": [] })).await;

    Mock::given(method("POST"))
        .and(path("/payment/create-payment-intent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("gateway down"))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = SeatMapService::new(api.clone())
        .load("bus-1", "u1")
        .await
        .unwrap();
    session.toggle("R-3");
    session.assign_gender("R-3", Gender::Female).unwrap();

    let err = CheckoutService::new(api, "BDT")
        .initiate(&session)
        .await
        .unwrap_err();
    match err {
        FlowError::Api(ApiError::Status { status, .. }) => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_seat_number_fails_the_whole_map() {
    let server = MockServer::start().await;
    mount_bus(
        &server,
        json!([
            { "seatNumber": "R-1" },
            { "seatNumber": "broken-" },
        ]),
    )
    .await;
    mount_tickets(&server, json!({ "active": [], "past": [] })).await;

    let err = SeatMapService::new(client(&server))
        .load("bus-1", "u1")
        .await
        .unwrap_err();
    match err {
        FlowError::Booking(BookingError::SeatNumberParse(number)) => {
            assert_eq!(number, "broken-");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn backend_failure_leaves_no_session() {
    let server = MockServer::start().await;
    // Рейс есть, билеты отдают 503 — сессия не строится вовсе
    mount_bus(&server, eight_seats()).await;
    Mock::given(method("GET"))
        .and(path("/ticket/user/information/u1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = SeatMapService::new(client(&server)).load("bus-1", "u1").await;
    assert!(matches!(result, Err(FlowError::Api(_))));
}

#[tokio::test]
async fn search_validates_then_queries_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bus/search"))
        .and(query_param("from", "Dhaka"))
        .and(query_param("to", "Sylhet"))
        .and(query_param("date", "2026-09-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "bus-1",
                "name": "Green Line",
                "route": { "from": "Dhaka", "to": "Sylhet" },
                "departureTime": "2026-09-01T08:30:00Z",
                "fare": { "actualPrice": 1500 },
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let search = SearchClient::new(client(&server));
    let query = TripQuery {
        from: "Dhaka".to_string(),
        to: "Sylhet".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
    };
    let buses = search.search(&query).await.unwrap();
    assert_eq!(buses.len(), 1);
    assert_eq!(buses[0].id, "bus-1");

    // Невалидная форма до сети не доходит
    let bad = TripQuery {
        from: "Dhaka".to_string(),
        to: "Dhaka".to_string(),
        date: query.date,
    };
    assert!(search.search(&bad).await.is_err());
}

#[tokio::test]
async fn bus_location_is_fetched_for_tracking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bus/location/bus-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "lat": 23.8103, "lng": 90.4125 })),
        )
        .mount(&server)
        .await;

    let location = client(&server).get_bus_location("bus-1").await.unwrap();
    assert!((location.lat - 23.8103).abs() < f64::EPSILON);
    assert!((location.lng - 90.4125).abs() < f64::EPSILON);
}
