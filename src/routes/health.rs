use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Liveness probe. Does not touch the database.
#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "pong" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_ping_endpoint() {
        let app = test::init_service(actix_web::App::new().service(ping)).await;

        let req = test::TestRequest::get().uri("/ping").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "pong");
    }
}
