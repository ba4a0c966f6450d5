//! Back-office user management endpoints.

use crate::api::models::{Page, User};
use crate::api::{execute, fetch, json_body, DATA_ENVELOPE};
use crate::errors::ClientResult;
use crate::net::{RequestOptions, SessionClient, paths};

pub struct UserApi<'a> {
    client: &'a SessionClient,
}

impl<'a> UserApi<'a> {
    pub fn new(client: &'a SessionClient) -> Self {
        UserApi { client }
    }

    pub async fn list(&self, page_num: u32, page_size: u32) -> ClientResult<Option<Page<User>>> {
        let path = format!(
            "{}?pageNum={}&pageSize={}",
            paths::USERS,
            page_num,
            page_size
        );
        fetch(self.client, &path, RequestOptions::get(), &DATA_ENVELOPE).await
    }

    pub async fn get(&self, user_id: i64) -> ClientResult<Option<User>> {
        fetch(
            self.client,
            &paths::user(user_id),
            RequestOptions::get(),
            &DATA_ENVELOPE,
        )
        .await
    }

    pub async fn update(&self, user: &User) -> ClientResult<Option<User>> {
        fetch(
            self.client,
            &paths::user(user.user_id),
            RequestOptions::put(json_body(user)?),
            &DATA_ENVELOPE,
        )
        .await
    }

    pub async fn delete(&self, user_id: i64) -> ClientResult<Option<()>> {
        execute(self.client, &paths::user(user_id), RequestOptions::delete()).await
    }

    /// Deferred source for a user's avatar slot, resolved by the asset
    /// loader like product images.
    pub fn avatar_path(&self, user_id: i64) -> String {
        paths::user_avatar(user_id)
    }
}
