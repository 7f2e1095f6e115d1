//! # Cart
//!
//! The client-side shopping cart. Lines keep insertion order and every
//! mutation is written to [`CART_KEY`] before it becomes visible, so the
//! in-memory cart and the stored cart never disagree.

use crate::model::{MenuItem, MenuItemId};
use crate::storage::{Storage, StorageError, StorageExt, CART_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("{0} has no valid price")]
    InvalidPrice(MenuItemId),

    #[error("could not persist cart: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

pub struct Cart {
    storage: Arc<dyn Storage>,
    lines: Vec<CartLine>,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart").field("lines", &self.lines).finish()
    }
}

impl Cart {
    /// Loads the persisted cart. Unreadable contents are discarded, and lines
    /// with quantity 0 are dropped.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, CartError> {
        let lines = match storage.load::<Vec<CartLine>>(CART_KEY) {
            Ok(lines) => lines.unwrap_or_default(),
            Err(StorageError::Serde { source, .. }) => {
                warn!(error = %source, "Discarding unreadable cart");
                storage.remove(CART_KEY)?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        let lines = lines.into_iter().filter(|l| l.quantity >= 1).collect();
        Ok(Self { storage, lines })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ price × quantity, recomputed on every call.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Adds one unit, inserting a new line if needed. Returns the new quantity.
    pub fn add(&mut self, item: &MenuItem) -> Result<u32, CartError> {
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(CartError::InvalidPrice(item.id));
        }
        let mut next = self.lines.clone();
        let quantity = match next.iter_mut().find(|l| l.item.id == item.id) {
            Some(line) => {
                line.quantity += 1;
                line.quantity
            }
            None => {
                next.push(CartLine {
                    item: item.clone(),
                    quantity: 1,
                });
                1
            }
        };
        self.commit(next)?;
        debug!(item = %item.id, quantity, "Added to cart");
        Ok(quantity)
    }

    /// Adds one unit to an existing line. `None` if the item is not in the cart.
    pub fn increase(&mut self, id: MenuItemId) -> Result<Option<u32>, CartError> {
        self.adjust(id, |q| q + 1)
    }

    /// Removes one unit, never going below 1. `None` if the item is not in
    /// the cart.
    pub fn decrease(&mut self, id: MenuItemId) -> Result<Option<u32>, CartError> {
        self.adjust(id, |q| q.saturating_sub(1).max(1))
    }

    /// Deletes the line whatever its quantity.
    pub fn remove(&mut self, id: MenuItemId) -> Result<Option<CartLine>, CartError> {
        let Some(index) = self.lines.iter().position(|l| l.item.id == id) else {
            return Ok(None);
        };
        let mut next = self.lines.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        Ok(Some(removed))
    }

    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new())
    }

    fn adjust(
        &mut self,
        id: MenuItemId,
        change: impl FnOnce(u32) -> u32,
    ) -> Result<Option<u32>, CartError> {
        let mut next = self.lines.clone();
        let Some(line) = next.iter_mut().find(|l| l.item.id == id) else {
            return Ok(None);
        };
        line.quantity = change(line.quantity);
        let quantity = line.quantity;
        self.commit(next)?;
        Ok(Some(quantity))
    }

    fn commit(&mut self, next: Vec<CartLine>) -> Result<(), CartError> {
        self.storage.save(CART_KEY, &next)?;
        self.lines = next;
        Ok(())
    }
}
