//! Shopping cart endpoints.

use crate::api::models::CartItem;
use crate::api::{execute, fetch};
use crate::errors::ClientResult;
use crate::net::envelope::ENVELOPE_KEYS;
use crate::net::{RequestOptions, SessionClient, paths};
use serde_json::json;

pub struct CartApi<'a> {
    client: &'a SessionClient,
}

impl<'a> CartApi<'a> {
    pub fn new(client: &'a SessionClient) -> Self {
        CartApi { client }
    }

    /// Everything in the current user's cart.
    pub async fn list(&self) -> ClientResult<Option<Vec<CartItem>>> {
        fetch(self.client, paths::CART, RequestOptions::get(), &ENVELOPE_KEYS).await
    }

    /// The items currently selected for checkout.
    pub async fn selected(&self) -> ClientResult<Option<Vec<CartItem>>> {
        fetch(
            self.client,
            paths::CART_SELECTED,
            RequestOptions::get(),
            &ENVELOPE_KEYS,
        )
        .await
    }

    pub async fn add(&self, product_id: i64, quantity: u32) -> ClientResult<Option<()>> {
        execute(
            self.client,
            paths::CART,
            RequestOptions::post(json!({
                "productId": product_id,
                "quantity": quantity,
            })),
        )
        .await
    }

    pub async fn update_quantity(&self, cart_id: i64, quantity: u32) -> ClientResult<Option<()>> {
        execute(
            self.client,
            &paths::cart_item(cart_id),
            RequestOptions::put(json!({ "quantity": quantity })),
        )
        .await
    }

    pub async fn set_selected(&self, cart_id: i64, selected: bool) -> ClientResult<Option<()>> {
        execute(
            self.client,
            &paths::cart_item(cart_id),
            RequestOptions::put(json!({ "selected": if selected { 1 } else { 0 } })),
        )
        .await
    }

    pub async fn remove(&self, cart_id: i64) -> ClientResult<Option<()>> {
        execute(
            self.client,
            &paths::cart_item(cart_id),
            RequestOptions::delete(),
        )
        .await
    }

    /// Removes the selected items after a successful cart checkout.
    pub async fn clear_selected(&self) -> ClientResult<Option<()>> {
        execute(
            self.client,
            paths::CART_SELECTED,
            RequestOptions::delete(),
        )
        .await
    }
}
