// HTTP handlers for restaurant endpoints

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};

use crate::error::ApiError;
use crate::models::{Menu, Restaurant, RestaurantDetails, Review};
use crate::query::{FilterParams, ListParams, SearchParams, SortParams};
use crate::restaurants::menu::assemble_menu;
use crate::AppState;

/// Unwraps the `:id` segment; an id that is not an `i32` names no restaurant
fn restaurant_id(
    path: Result<Path<i32>, PathRejection>,
    not_found: &str,
) -> Result<i32, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!("Rejected restaurant id: {}", rejection.body_text());
            Err(ApiError::not_found(not_found))
        }
    }
}

/// List restaurants, optionally filtered and sorted
/// GET /api/restaurants
#[utoipa::path(
    get,
    path = "/api/restaurants",
    params(ListParams),
    responses(
        (status = 200, description = "Matching restaurants", body = Vec<Restaurant>),
        (status = 400, description = "Malformed rating", body = String, example = json!({"error": "rating must be a number, got 'high'"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "A database error occurred"}))
    ),
    tag = "restaurants"
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    tracing::debug!("Listing restaurants with {:?}", params);

    let filter = params.into_filter()?;
    let restaurants = state.restaurants.find_restaurants(&filter).await?;

    tracing::debug!("Query returned {} restaurants", restaurants.len());
    Ok(Json(restaurants))
}

/// Filter restaurants by cuisine and delivery options
/// GET /api/restaurants/filter
#[utoipa::path(
    get,
    path = "/api/restaurants/filter",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching restaurants", body = Vec<Restaurant>),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "A database error occurred"}))
    ),
    tag = "restaurants"
)]
pub async fn filter_restaurants(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    tracing::debug!("Filtering restaurants with {:?}", params);

    let restaurants = state
        .restaurants
        .find_restaurants(&params.into_filter())
        .await?;

    Ok(Json(restaurants))
}

/// Search restaurants by keywords, cuisine and location
/// GET /api/restaurants/search
#[utoipa::path(
    get,
    path = "/api/restaurants/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching restaurants", body = Vec<Restaurant>),
        (status = 404, description = "Nothing matched", body = String, example = json!({"error": "No restaurants found matching the criteria"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "A database error occurred"}))
    ),
    tag = "restaurants"
)]
pub async fn search_restaurants(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    tracing::debug!("Searching restaurants with {:?}", params);

    let restaurants = state
        .restaurants
        .find_restaurants(&params.into_filter())
        .await?;

    if restaurants.is_empty() {
        return Err(ApiError::not_found("No restaurants found matching the criteria"));
    }

    Ok(Json(restaurants))
}

/// Sort all restaurants by rating or delivery options
/// GET /api/restaurants/sort
#[utoipa::path(
    get,
    path = "/api/restaurants/sort",
    params(SortParams),
    responses(
        (status = 200, description = "Sorted restaurants", body = Vec<Restaurant>),
        (status = 500, description = "Invalid sortBy or database error", body = String, example = json!({"error": "An error occurred while sorting restaurants"}))
    ),
    tag = "restaurants"
)]
pub async fn sort_restaurants(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let filter = params.into_filter()?;
    let restaurants = state.restaurants.find_restaurants(&filter).await?;

    Ok(Json(restaurants))
}

/// Fetch a single restaurant
/// GET /api/restaurants/:id
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant found", body = Restaurant),
        (status = 404, description = "Restaurant not found", body = String, example = json!({"error": "Restaurant not found"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "A database error occurred"}))
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Restaurant>, ApiError> {
    let id = restaurant_id(path, "Restaurant not found")?;
    tracing::debug!("Fetching restaurant with id: {}", id);

    let restaurant = state
        .restaurants
        .find_restaurant(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found"))?;

    Ok(Json(restaurant))
}

/// Fetch the restricted details view of a restaurant
/// GET /api/restaurants/:id/details
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/details",
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant details", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = String, example = json!({"error": "Restaurant not found"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "A database error occurred"}))
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant_details(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<RestaurantDetails>, ApiError> {
    let id = restaurant_id(path, "Restaurant not found")?;
    let details = state
        .restaurants
        .find_details(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found"))?;

    Ok(Json(details))
}

/// Fetch a restaurant's menu grouped by category
/// GET /api/restaurants/:id/menu
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/menu",
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Menu sections keyed by category id"),
        (status = 404, description = "No menu", body = String, example = json!({"error": "No menu found for this restaurant"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "A database error occurred"}))
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant_menu(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Menu>, ApiError> {
    let id = restaurant_id(path, "No menu found for this restaurant")?;
    tracing::debug!("Fetching menu for restaurant {}", id);

    let categories = state.restaurants.find_categories(id).await?;
    let items = state.restaurants.find_menu_items(id).await?;
    let menu = assemble_menu(categories, items);

    if menu.is_empty() {
        return Err(ApiError::not_found("No menu found for this restaurant"));
    }

    Ok(Json(menu))
}

/// Fetch the reviews of a restaurant
/// GET /api/restaurants/:id/reviews
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/reviews",
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Reviews", body = Vec<Review>),
        (status = 404, description = "No reviews", body = String, example = json!({"error": "No reviews found for this restaurant"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "A database error occurred"}))
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant_reviews(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let id = restaurant_id(path, "No reviews found for this restaurant")?;
    let reviews = state.restaurants.find_reviews(id).await?;

    if reviews.is_empty() {
        return Err(ApiError::not_found("No reviews found for this restaurant"));
    }

    Ok(Json(reviews))
}
