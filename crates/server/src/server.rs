use api_types::common::{Endpoints, ErrorBody, ServiceDescriptor};
use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch},
};
use tower_http::cors::{Any, CorsLayer};

use std::sync::Arc;

use crate::{houses, items, meals, people, purchases};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn log_request(request: Request, next: Next) -> Response {
    tracing::info!("Request: {} for {}", request.method(), request.uri().path());
    next.run(request).await
}

async fn root() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        message: "Bill Tracker API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: Endpoints {
            houses: "/api/houses".to_string(),
            people: "/api/people".to_string(),
            items: "/api/items".to_string(),
            purchases: "/api/purchases".to_string(),
            meals: "/api/meals".to_string(),
        },
    })
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Route not found".to_string(),
        }),
    )
}

fn api() -> Router<ServerState> {
    Router::new()
        .route("/houses", get(houses::list).post(houses::create))
        .route(
            "/houses/{id}",
            get(houses::get).put(houses::update).delete(houses::remove),
        )
        .route("/houses/{id}/members", get(houses::members))
        .route("/houses/{id}/items", get(houses::items))
        .route("/houses/{id}/purchases", get(houses::purchases))
        .route("/houses/{id}/meals", get(houses::meals))
        .route("/people", get(people::list).post(people::create))
        .route(
            "/people/{id}",
            get(people::get).put(people::update).delete(people::remove),
        )
        .route("/people/{id}/purchases", get(people::purchases))
        .route("/people/{id}/meals", get(people::meals))
        .route("/items", get(items::list).post(items::create))
        .route(
            "/items/{id}",
            get(items::get).put(items::update).delete(items::remove),
        )
        .route("/items/{id}/count", patch(items::adjust_count))
        .route("/purchases", get(purchases::list).post(purchases::create))
        .route(
            "/purchases/{id}",
            get(purchases::get)
                .put(purchases::update)
                .delete(purchases::remove),
        )
        .route(
            "/purchases/{id}/lines",
            get(purchases::lines).post(purchases::add_line),
        )
        .route(
            "/purchases/{id}/lines/{line_id}",
            delete(purchases::remove_line),
        )
        .route("/meals", get(meals::list).post(meals::create))
        .route(
            "/meals/{id}",
            get(meals::get).put(meals::update).delete(meals::remove),
        )
        .route(
            "/meals/{id}/attendees",
            get(meals::attendees).post(meals::add_attendee),
        )
        .route(
            "/meals/{id}/attendees/{user_id}",
            delete(meals::remove_attendee),
        )
        .route(
            "/meals/{id}/ingredients",
            get(meals::ingredients).post(meals::add_ingredient),
        )
        .route(
            "/meals/{id}/ingredients/{item_id}",
            delete(meals::remove_ingredient),
        )
}

/// The full application: `/` descriptor, `/api` routes, JSON 404 fallback,
/// request logging and CORS.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/", get(root))
        .nest("/api", api())
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Bill Tracker API listening on http://{}", addr);

    axum::serve(listener, router(engine)).await
}
