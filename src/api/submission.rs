//! Item Submission Commands
//!
//! OMDb title lookup, duplicate check and catalog submission.

use serde_json::Value;

use super::{get_json, post_form, HttpApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{DuplicateCheck, OmdbItem};
use crate::query::{build_url, form_encode};

const ITEM_SUBMISSION: &str = "/item-submission";
const OMDB: &str = "omdb";

/// Form body for `POST /item-submission`, one parameter per OMDb field
fn encode_submission(item: &OmdbItem) -> String {
    form_encode(&item.form_fields())
}

impl HttpApi {
    /// Look up `title` on OMDb (external metadata API)
    pub async fn lookup_omdb(&self, omdb_base: &str, api_key: &str, title: &str) -> ApiResult<OmdbItem> {
        let url = build_url(omdb_base, "/", &[("apikey", api_key), ("t", title)]);
        get_json(OMDB, &url).await
    }

    pub async fn check_duplicate(&self, imdb_id: &str) -> ApiResult<DuplicateCheck> {
        let url = self.url(ITEM_SUBMISSION, &[("imdbID", imdb_id)]);
        let value: Value = get_json(ITEM_SUBMISSION, &url).await?;
        DuplicateCheck::from_value(value).map_err(|e| ApiError::malformed(ITEM_SUBMISSION, e))
    }

    pub async fn submit_item(&self, item: &OmdbItem) -> ApiResult<()> {
        post_form(ITEM_SUBMISSION, &self.path(ITEM_SUBMISSION), encode_submission(item)).await?;
        Ok(())
    }
}
