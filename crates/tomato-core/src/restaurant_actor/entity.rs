//! [`ActorEntity`] implementation for [`Restaurant`].

use super::{RestaurantAction, RestaurantActionResult, RestaurantError};
use crate::model::{
    MenuItem, MenuItemId, NewMenuItem, Restaurant, RestaurantCreate, RestaurantId,
    RestaurantUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

fn validate_rating(rating: f64) -> Result<(), RestaurantError> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(RestaurantError::Validation(format!(
            "rating {rating} is outside [0, 5]"
        )));
    }
    Ok(())
}

fn validate_item(item: &NewMenuItem) -> Result<(), RestaurantError> {
    if item.name.trim().is_empty() {
        return Err(RestaurantError::Validation(
            "menu item name must not be empty".into(),
        ));
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(RestaurantError::Validation(format!(
            "price of {:?} must be a non-negative number",
            item.name
        )));
    }
    Ok(())
}

impl Restaurant {
    fn next_menu_seq(&self) -> u32 {
        self.menu.iter().map(|m| m.id.seq).max().unwrap_or(0) + 1
    }

    fn push_menu_item(&mut self, item: NewMenuItem) -> MenuItem {
        let added = MenuItem {
            id: MenuItemId {
                restaurant: self.id,
                seq: self.next_menu_seq(),
            },
            name: item.name,
            price: item.price,
        };
        self.menu.push(added.clone());
        added
    }
}

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Update = RestaurantUpdate;
    type Action = RestaurantAction;
    type ActionResult = RestaurantActionResult;
    type Context = ();
    type Error = RestaurantError;

    /// Validates the listing and assigns menu item ids in listed order.
    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(RestaurantError::Validation("name must not be empty".into()));
        }
        if params.cuisine.trim().is_empty() {
            return Err(RestaurantError::Validation(
                "cuisine must not be empty".into(),
            ));
        }
        validate_rating(params.rating)?;
        params.menu.iter().try_for_each(validate_item)?;

        let mut restaurant = Self {
            id,
            name: params.name,
            cuisine: params.cuisine,
            rating: params.rating,
            price_range: params.price_range,
            address: params.address,
            coordinate: params.coordinate,
            image_url: params.image_url,
            added_at: params.added_at.unwrap_or_else(Utc::now),
            menu: Vec::with_capacity(params.menu.len()),
        };
        for item in params.menu {
            restaurant.push_menu_item(item);
        }
        Ok(restaurant)
    }

    async fn on_update(&mut self, update: RestaurantUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(rating) = update.rating {
            validate_rating(rating)?;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(price_range) = update.price_range {
            self.price_range = price_range;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: RestaurantAction,
        _ctx: &(),
    ) -> Result<RestaurantActionResult, Self::Error> {
        match action {
            RestaurantAction::AddMenuItem(item) => {
                validate_item(&item)?;
                Ok(RestaurantActionResult::MenuItemAdded(self.push_menu_item(item)))
            }
            RestaurantAction::Menu => Ok(RestaurantActionResult::Menu(self.menu.clone())),
        }
    }
}
