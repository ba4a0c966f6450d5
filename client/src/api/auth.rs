//! Authentication flows: login, registration, current-principal lookup.

use crate::api::models::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::api::{fetch, json_body, validated, DATA_ENVELOPE};
use crate::errors::ClientResult;
use crate::net::{RequestOptions, SessionClient, paths};
use crate::session::{Role, Session};

pub struct AuthApi<'a> {
    client: &'a SessionClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a SessionClient) -> Self {
        AuthApi { client }
    }

    /// Authenticates and persists the resulting session. Resolves to the new
    /// session on success, `None` when the request was auth-aborted.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<Option<Session>> {
        validated(request)?;
        let response: Option<LoginResponse> = fetch(
            self.client,
            paths::AUTH_LOGIN,
            RequestOptions::post(json_body(request)?),
            &DATA_ENVELOPE,
        )
        .await?;

        let Some(response) = response else {
            return Ok(None);
        };
        let session = Session::new(
            response.token,
            Role::from_wire(response.role),
            response.user_id,
        );
        self.client.store().set(&session).await;
        Ok(Some(session))
    }

    /// Creates a new storefront account. The caller still logs in afterwards.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<Option<User>> {
        validated(request)?;
        fetch(
            self.client,
            paths::AUTH_REGISTER,
            RequestOptions::post(json_body(request)?),
            &DATA_ENVELOPE,
        )
        .await
    }

    /// The principal behind the current session, per the backend.
    pub async fn current_user(&self) -> ClientResult<Option<User>> {
        fetch(
            self.client,
            paths::AUTH_CURRENT_USER,
            RequestOptions::get(),
            &DATA_ENVELOPE,
        )
        .await
    }
}
