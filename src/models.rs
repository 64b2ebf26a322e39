use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A restaurant row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Restaurant {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Trattoria Roma")]
    pub name: String,
    #[schema(example = "Family-run Italian kitchen")]
    pub description: String,
    #[schema(example = "Italian")]
    pub cuisine: String,
    #[schema(example = "Downtown")]
    pub location: String,
    #[schema(example = "555-0100")]
    pub phone: String,
    #[schema(example = 4.5, minimum = 0.0, maximum = 5.0)]
    pub rating: f64,
    #[schema(example = "11:00-22:00")]
    pub open_hours: String,
    #[schema(example = "delivery")]
    pub delivery_options: String,
}

/// Restricted restaurant view served by the details endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RestaurantDetails {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub rating: f64,
    pub open_hours: String,
}

impl From<&Restaurant> for RestaurantDetails {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            name: restaurant.name.clone(),
            location: restaurant.location.clone(),
            phone: restaurant.phone.clone(),
            rating: restaurant.rating,
            open_hours: restaurant.open_hours.clone(),
        }
    }
}

/// Menu category belonging to a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub restaurant_id: i32,
    pub category_name: String,
}

/// Menu item row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MenuItem {
    pub id: i32,
    pub restaurant_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Review row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub restaurant_id: i32,
    #[schema(example = 5)]
    pub rating: i16,
    #[schema(example = "Great pasta")]
    pub comment: Option<String>,
}

/// One entry of a menu section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuEntry {
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
}

impl From<MenuItem> for MenuEntry {
    fn from(item: MenuItem) -> Self {
        Self {
            name: item.name,
            description: item.description,
            price: item.price,
        }
    }
}

/// Items grouped under one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub category_name: String,
    pub items: Vec<MenuEntry>,
}

/// A restaurant's menu keyed by category id
pub type Menu = BTreeMap<i32, MenuSection>;
