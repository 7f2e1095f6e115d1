//! Custom actions for the Restaurant actor.

use crate::model::{MenuItem, NewMenuItem};

#[derive(Debug, Clone)]
pub enum RestaurantAction {
    /// Appends an item; the restaurant assigns its id.
    AddMenuItem(NewMenuItem),
    /// Reads the menu in listed order.
    Menu,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantActionResult {
    MenuItemAdded(MenuItem),
    Menu(Vec<MenuItem>),
}
