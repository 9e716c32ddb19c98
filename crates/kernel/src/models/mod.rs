//! Database models.

pub mod menu_item;
pub mod shop_settings;

pub use menu_item::{CreateMenuItem, MenuItem, UpdateMenuItem};
pub use shop_settings::{ShopSettings, UpdateShopSettings};
