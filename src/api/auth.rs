use crate::client::{Client, RequestOptions};
use crate::error::ApiResult;
use crate::models::auth::*;
use async_trait::async_trait;

/// Authentication API methods
#[async_trait]
pub trait AuthApi {
    /// Login with email and password.
    ///
    /// Returns the token pair; seed the store with
    /// [`Client::set_tokens`](crate::Client::set_tokens) before making
    /// authenticated calls.
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse>;
}

#[async_trait]
impl AuthApi for Client {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.post(
            "/auth/admin/login",
            &request,
            RequestOptions::new().no_credential(),
        )
        .await
    }
}
