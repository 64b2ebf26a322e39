// Restaurant discovery: listing, search, details, menus and reviews

pub mod handlers;
pub mod menu;
pub mod repository;

pub use menu::assemble_menu;
pub use repository::{PgRestaurantStore, RestaurantStore};
