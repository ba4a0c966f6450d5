//! Order endpoints, including the checkout submission.

use crate::api::models::{CreateOrderRequest, Order, OrderCreated, Page};
use crate::api::{execute, fetch, json_body, validated, DATA_ENVELOPE};
use crate::errors::ClientResult;
use crate::net::{RequestOptions, SessionClient, paths};
use serde_json::json;

/// Order status wire values.
pub const STATUS_PENDING_PAYMENT: i32 = 0;
pub const STATUS_PAID: i32 = 1;
pub const STATUS_SHIPPED: i32 = 2;
pub const STATUS_COMPLETED: i32 = 3;
pub const STATUS_CANCELLED: i32 = 4;

pub struct OrderApi<'a> {
    client: &'a SessionClient,
}

impl<'a> OrderApi<'a> {
    pub fn new(client: &'a SessionClient) -> Self {
        OrderApi { client }
    }

    pub async fn list(&self, page_num: u32, page_size: u32) -> ClientResult<Option<Page<Order>>> {
        let path = format!(
            "{}?pageNum={}&pageSize={}",
            paths::ORDERS,
            page_num,
            page_size
        );
        fetch(self.client, &path, RequestOptions::get(), &DATA_ENVELOPE).await
    }

    pub async fn get(&self, order_uuid: &str) -> ClientResult<Option<Order>> {
        fetch(
            self.client,
            &paths::order(order_uuid),
            RequestOptions::get(),
            &DATA_ENVELOPE,
        )
        .await
    }

    /// Submits a new order. This is the one call that survives a token expiry
    /// through the session client's refresh-and-retry path, so a slow
    /// checkout does not lose its form state to a login redirect.
    pub async fn create(&self, request: &CreateOrderRequest) -> ClientResult<Option<OrderCreated>> {
        validated(request)?;
        fetch(
            self.client,
            paths::ORDERS,
            RequestOptions::post(json_body(request)?),
            &DATA_ENVELOPE,
        )
        .await
    }

    pub async fn update_status(&self, order_uuid: &str, status: i32) -> ClientResult<Option<()>> {
        execute(
            self.client,
            &paths::order_status(order_uuid),
            RequestOptions::put(json!({ "status": status })),
        )
        .await
    }

    pub async fn cancel(&self, order_uuid: &str) -> ClientResult<Option<()>> {
        self.update_status(order_uuid, STATUS_CANCELLED).await
    }
}
