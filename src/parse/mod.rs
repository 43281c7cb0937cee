pub(crate) mod compiled;
mod menu;
mod menu_item;
mod nutrition;
mod text;

pub use menu::extract;
pub use menu_item::MenuItem;
pub use nutrition::{Nutrient, Reading};
