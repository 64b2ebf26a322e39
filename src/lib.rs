pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod restaurants;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::AuthService;
use restaurants::RestaurantStore;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        restaurants::handlers::list_restaurants,
        restaurants::handlers::filter_restaurants,
        restaurants::handlers::search_restaurants,
        restaurants::handlers::sort_restaurants,
        restaurants::handlers::get_restaurant,
        restaurants::handlers::get_restaurant_details,
        restaurants::handlers::get_restaurant_menu,
        restaurants::handlers::get_restaurant_reviews,
        auth::handlers::register_handler,
        auth::handlers::login_handler,
    ),
    components(
        schemas(
            models::Restaurant,
            models::RestaurantDetails,
            models::Review,
            models::MenuSection,
            models::MenuEntry,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::RegisterResponse,
            auth::TokenResponse,
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant discovery endpoints"),
        (name = "auth", description = "User registration and login")
    ),
    info(
        title = "Restaurant Discovery API",
        version = "0.1.0",
        description = "REST API for browsing restaurants, menus and reviews"
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub restaurants: Arc<dyn RestaurantStore>,
    pub auth: Arc<AuthService>,
}

/// Routes without documentation or middleware layers
pub fn api_routes() -> Router<AppState> {
    use restaurants::handlers::*;

    Router::new()
        .route("/api/restaurants", get(list_restaurants))
        .route("/api/restaurants/filter", get(filter_restaurants))
        .route("/api/restaurants/search", get(search_restaurants))
        .route("/api/restaurants/sort", get(sort_restaurants))
        .route("/api/restaurants/:id", get(get_restaurant))
        .route("/api/restaurants/:id/details", get(get_restaurant_details))
        .route("/api/restaurants/:id/menu", get(get_restaurant_menu))
        .route("/api/restaurants/:id/reviews", get(get_restaurant_reviews))
        .route("/register", post(auth::register_handler))
        .route("/login", post(auth::login_handler))
}

/// Creates and configures the application router
/// Adds Swagger UI, request tracing and permissive CORS
pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
