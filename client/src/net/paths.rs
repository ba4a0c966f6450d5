//! Canonical REST paths for the order-management backend.
//!
//! One path convention (plural resource nouns under `/api`) is used for every
//! call; page code never builds endpoint strings by hand.

pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const AUTH_LOGOUT: &str = "/api/auth/logout";
pub const AUTH_REFRESH_TOKEN: &str = "/api/auth/refresh-token";
pub const AUTH_CURRENT_USER: &str = "/api/auth/current";

pub const PRODUCTS: &str = "/api/products";
pub const PRODUCTS_SEARCH: &str = "/api/products/search";

/// Order collection path. A POST here is the order-creation request, the one
/// call with the refresh-and-retry recovery on 401.
pub const ORDERS: &str = "/api/orders";

pub const CART: &str = "/api/cart";
pub const CART_SELECTED: &str = "/api/cart/selected";

pub const USERS: &str = "/api/users";
pub const SYSLOGS: &str = "/api/syslogs";

pub fn product(product_id: i64) -> String {
    format!("{}/{}", PRODUCTS, product_id)
}

/// Authenticated image resource for a product. Used as the deferred source on
/// image slots, never as a plain image URL.
pub fn product_image(product_id: i64) -> String {
    format!("{}/{}/image", PRODUCTS, product_id)
}

pub fn order(order_uuid: &str) -> String {
    format!("{}/{}", ORDERS, order_uuid)
}

pub fn order_status(order_uuid: &str) -> String {
    format!("{}/{}/status", ORDERS, order_uuid)
}

pub fn cart_item(cart_id: i64) -> String {
    format!("{}/{}", CART, cart_id)
}

pub fn user(user_id: i64) -> String {
    format!("{}/{}", USERS, user_id)
}

/// Authenticated avatar resource for a user.
pub fn user_avatar(user_id: i64) -> String {
    format!("{}/{}/avatar", USERS, user_id)
}
