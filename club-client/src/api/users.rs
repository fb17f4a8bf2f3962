//! Current member (`GET /users/me`)

use crate::{ClientResult, HttpClient};
use shared::models::UserProfile;
use shared::response::ItemEnvelope;
use std::sync::Arc;

#[derive(Debug)]
pub struct UserClient<H> {
    http: Arc<H>,
}

impl<H: HttpClient> UserClient<H> {
    pub fn new(http: Arc<H>) -> Self {
        Self { http }
    }

    pub async fn me(&self) -> ClientResult<UserProfile> {
        let raw: ItemEnvelope<UserProfile> = self.http.get("users/me").await?;
        Ok(raw.into_inner())
    }
}
