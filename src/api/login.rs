//! Login Status

use super::{get_json, HttpApi};
use crate::error::ApiResult;
use crate::models::LoginStatus;

const LOGIN: &str = "/login";

impl HttpApi {
    pub async fn fetch_login_status(&self) -> ApiResult<LoginStatus> {
        get_json(LOGIN, &self.path(LOGIN)).await
    }
}
