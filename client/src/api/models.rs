//! Wire models for the order-management REST backend.
//!
//! Field names follow the backend's camelCase JSON. Paged endpoints answer
//! with a `list`/`total` body (sometimes under a `data` envelope); the API
//! layer strips the envelope before these types are deserialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "content")]
    pub list: Vec<T>,
    pub total: u64,
    #[serde(default)]
    pub page_num: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub product_desc: Option<String>,
    pub price: f64,
    pub stock: i64,
    /// 0 = delisted, 1 = available.
    pub status: i32,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_available(&self) -> bool {
        self.status == 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    #[serde(default)]
    pub user_uuid: Option<String>,
    pub username: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// 0 = standard user, 1 = administrator.
    pub role: i32,
    /// 0 = disabled, 1 = active.
    pub status: i32,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub order_no: Option<String>,
    /// Public identifier used in order URLs.
    pub order_uuid: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub total_amount: f64,
    /// 0 pending payment, 1 paid, 2 shipped, 3 completed, 4 cancelled.
    pub status: i32,
    #[serde(default)]
    pub payment_method: Option<i32>,
    #[serde(default)]
    pub payment_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shipping_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub complete_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub receiver_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub item_id: Option<i64>,
    #[serde(default)]
    pub order_id: Option<i64>,
    pub product_id: i64,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub total_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub cart_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub product_id: i64,
    pub quantity: u32,
    /// 0 = not selected for checkout, 1 = selected.
    pub selected: i32,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_price: Option<f64>,
    #[serde(default)]
    pub product_stock: Option<i64>,
    #[serde(default)]
    pub product_status: Option<i32>,
}

impl CartItem {
    pub fn is_selected(&self) -> bool {
        self.selected == 1
    }
}

/// One back-office operation-log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SysLog {
    pub log_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub status_code: Option<i32>,
    #[serde(default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

/// Login request payload
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Captcha answer, required by the backend for back-office logins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
}

/// Login response carrying the token and the principal's identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: i64,
    pub user_id: i64,
}

/// Registration payload for new storefront accounts.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(email(message = "Email address is invalid"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Order creation payload, built from a product page or from selected cart
/// items.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "An order needs at least one item"))]
    pub items: Vec<NewOrderItem>,

    pub total_amount: f64,

    #[validate(length(min = 1, message = "Receiver is required"))]
    pub receiver: String,

    #[validate(length(min = 1, message = "Receiver phone is required"))]
    pub receiver_phone: String,

    #[validate(length(min = 1, message = "Delivery address is required"))]
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,

    pub from_cart: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: u32,
}

/// Order creation response. Some backend versions answer with the UUID at the
/// top level, others nest the created order; accept either.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    #[serde(default)]
    pub order_uuid: Option<String>,
    #[serde(default)]
    pub order: Option<Order>,
}

impl OrderCreated {
    /// The created order's UUID, wherever the response put it.
    pub fn order_uuid(&self) -> Option<&str> {
        self.order_uuid
            .as_deref()
            .or_else(|| self.order.as_ref().map(|order| order.order_uuid.as_str()))
    }
}

/// Product payload for back-office create/update.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpsert {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_desc: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i64,

    pub status: i32,
}
