//! Item Page Commands
//!
//! Item details and comments.

use gloo_net::http::Request;

use super::{get_json, post_form, send, HttpApi};
use crate::error::ApiResult;
use crate::models::{CommentId, ItemId, ItemPageData, ItemRecord};
use crate::query::form_encode;

const ITEM_PAGE_DATA: &str = "/itempagedata";

impl HttpApi {
    pub async fn fetch_item_page(&self, id: &ItemId) -> ApiResult<ItemPageData> {
        let url = self.url(ITEM_PAGE_DATA, &[("itemId", id.as_str())]);
        get_json(ITEM_PAGE_DATA, &url).await
    }

    /// Records for `ids`, fetched concurrently. Failed lookups are logged and skipped.
    pub async fn fetch_items<'a>(&self, ids: impl IntoIterator<Item = &'a ItemId>) -> Vec<ItemRecord> {
        let lookups = ids.into_iter().map(|id| async move { (id, self.fetch_item_page(id).await) });
        futures::future::join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(page) => Some(page.item),
                Err(e) => {
                    log::warn!("[Api] Skipping item {}: {}", id, e);
                    None
                }
            })
            .collect()
    }

    pub async fn post_comment(&self, id: &ItemId, comment: &str) -> ApiResult<()> {
        let body = form_encode(&[("comment", comment), ("itemId", id.as_str())]);
        post_form(ITEM_PAGE_DATA, &self.path(ITEM_PAGE_DATA), body).await?;
        Ok(())
    }

    pub async fn delete_comment(&self, id: &CommentId) -> ApiResult<()> {
        let url = self.url(ITEM_PAGE_DATA, &[("commentId", id.as_str())]);
        send(ITEM_PAGE_DATA, Request::delete(&url)).await?;
        Ok(())
    }
}
