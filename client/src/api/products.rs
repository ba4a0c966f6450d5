//! Product catalog endpoints: storefront browsing plus back-office upkeep.

use crate::api::models::{Page, Product, ProductUpsert};
use crate::api::{execute, fetch, json_body, validated, DATA_ENVELOPE};
use crate::errors::ClientResult;
use crate::net::envelope::ENVELOPE_KEYS;
use crate::net::{RequestOptions, SessionClient, paths};

pub struct ProductApi<'a> {
    client: &'a SessionClient,
}

impl<'a> ProductApi<'a> {
    pub fn new(client: &'a SessionClient) -> Self {
        ProductApi { client }
    }

    pub async fn list(&self, page_num: u32, page_size: u32) -> ClientResult<Option<Page<Product>>> {
        let path = format!(
            "{}?pageNum={}&pageSize={}",
            paths::PRODUCTS,
            page_num,
            page_size
        );
        fetch(self.client, &path, RequestOptions::get(), &DATA_ENVELOPE).await
    }

    /// Keyword search. The backend answers with a bare or enveloped list.
    pub async fn search(&self, name: &str) -> ClientResult<Option<Vec<Product>>> {
        let path = format!("{}?name={}", paths::PRODUCTS_SEARCH, name);
        fetch(self.client, &path, RequestOptions::get(), &ENVELOPE_KEYS).await
    }

    pub async fn get(&self, product_id: i64) -> ClientResult<Option<Product>> {
        fetch(
            self.client,
            &paths::product(product_id),
            RequestOptions::get(),
            &DATA_ENVELOPE,
        )
        .await
    }

    /// Deferred source for a product image slot. The image itself is fetched
    /// by the asset loader, never through a plain URL.
    pub fn image_path(&self, product_id: i64) -> String {
        paths::product_image(product_id)
    }

    pub async fn create(&self, product: &ProductUpsert) -> ClientResult<Option<Product>> {
        validated(product)?;
        fetch(
            self.client,
            paths::PRODUCTS,
            RequestOptions::post(json_body(product)?),
            &DATA_ENVELOPE,
        )
        .await
    }

    pub async fn update(
        &self,
        product_id: i64,
        product: &ProductUpsert,
    ) -> ClientResult<Option<Product>> {
        validated(product)?;
        fetch(
            self.client,
            &paths::product(product_id),
            RequestOptions::put(json_body(product)?),
            &DATA_ENVELOPE,
        )
        .await
    }

    pub async fn delete(&self, product_id: i64) -> ClientResult<Option<()>> {
        execute(
            self.client,
            &paths::product(product_id),
            RequestOptions::delete(),
        )
        .await
    }
}
