//! Dashboard Feed
//!
//! Paged catalog listing.

use super::{get_json, HttpApi};
use crate::error::ApiResult;
use crate::models::FeedPage;
use crate::query::FeedRequest;

impl HttpApi {
    pub async fn fetch_dashboard_page(&self, request: &FeedRequest) -> ApiResult<FeedPage> {
        let url = self.url(request.endpoint, &request.params);
        get_json(request.endpoint, &url).await
    }
}
