//! Favorite Commands
//!
//! Likes: the viewer's liked ids, like/unlike and the per-item counter.

use gloo_net::http::Request;

use super::{get_json, send, HttpApi};
use crate::error::ApiResult;
use crate::models::{ItemId, LikedItemSet};

const FAVORITE_ITEM: &str = "/favorite-item";
const FAVORITE_COUNTER: &str = "/favorite-counter";

impl HttpApi {
    /// Liked ids of the logged-in viewer, or of `email` when given
    pub async fn fetch_favorite_ids(&self, email: Option<&str>) -> ApiResult<LikedItemSet> {
        let url = match email {
            Some(email) => self.url(FAVORITE_ITEM, &[("email", email)]),
            None => self.path(FAVORITE_ITEM),
        };
        get_json(FAVORITE_ITEM, &url).await
    }

    pub async fn add_favorite(&self, id: &ItemId) -> ApiResult<()> {
        let url = self.url(FAVORITE_ITEM, &[("favoriteItemId", id.as_str())]);
        send(FAVORITE_ITEM, Request::post(&url)).await?;
        Ok(())
    }

    pub async fn remove_favorite(&self, id: &ItemId) -> ApiResult<()> {
        let url = self.url(FAVORITE_ITEM, &[("favoriteItemId", id.as_str())]);
        send(FAVORITE_ITEM, Request::delete(&url)).await?;
        Ok(())
    }

    pub async fn fetch_favorite_count(&self, id: &ItemId) -> ApiResult<u64> {
        let url = self.url(FAVORITE_COUNTER, &[("itemId", id.as_str())]);
        get_json(FAVORITE_COUNTER, &url).await
    }
}
