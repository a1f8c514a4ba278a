use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::marketplace::{
    marketplace_router, CreateJobRequest, FeedbackRequest, MarketplaceService, MemoryStore,
    RegisterRequest, SequentialIdGenerator,
};

pub(super) type TestService = MarketplaceService<SequentialIdGenerator>;

pub(super) fn seeded_service() -> (Arc<TestService>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded());
    let service = MarketplaceService::new(
        store.clone(),
        Arc::new(SequentialIdGenerator::default()),
    );
    (Arc::new(service), store)
}

pub(super) fn seeded_router() -> (axum::Router, Arc<MemoryStore>) {
    let (service, store) = seeded_service();
    (marketplace_router(service), store)
}

pub(super) fn registration(role: &str, full_name: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        role: role.to_string(),
        full_name: full_name.to_string(),
        phone: "089-000-0000".to_string(),
        email: email.to_string(),
        address: "Khon Kaen, Thailand".to_string(),
        password: "secret".to_string(),
        skills: vec!["Driving".to_string()],
        interests: vec!["Transportation".to_string()],
        biography: "Weekend driver.".to_string(),
    }
}

pub(super) fn job_request(requester_id: &str) -> CreateJobRequest {
    CreateJobRequest {
        requester_id: requester_id.to_string(),
        title: "Grocery run for elderly neighbour".to_string(),
        scheduled_on: "2025-03-02".to_string(),
        location: "Bang Rak, Bangkok".to_string(),
        meeting_point: "Soi 5 entrance".to_string(),
        description: "Pick up weekly groceries and carry them upstairs.".to_string(),
        requirements: vec!["Can lift 10kg".to_string(), "Thai speaker".to_string()],
        latitude: 13.7279,
        longitude: 100.5241,
    }
}

pub(super) fn feedback(volunteer_id: &str, rating: f64) -> FeedbackRequest {
    FeedbackRequest {
        volunteer_id: volunteer_id.to_string(),
        rating,
        comment: "Arrived early and was very patient.".to_string(),
    }
}

pub(super) fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("encode payload")))
        .expect("request builds")
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
