//! Profile Commands
//!
//! Profile lookup and create/edit.

use serde_json::Value;

use super::{get_json, post_form, HttpApi};
use crate::error::{ApiError, ApiResult};
use crate::models::ProfileLookup;
use crate::query::form_encode;

const PROFILE_DATA: &str = "/profile-data";

/// Whose profile to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileTarget {
    /// The logged-in viewer (with recommendations)
    Viewer,
    Email(String),
    Username(String),
}

/// Create/edit profile form fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileForm {
    pub name: String,
    pub username: String,
    pub bio: String,
}

impl ProfileForm {
    /// Names of the required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [("name", &self.name), ("username", &self.username), ("bio", &self.bio)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    fn encode(&self, edit: bool) -> String {
        form_encode(&[
            ("name", self.name.trim()),
            ("username", self.username.trim()),
            ("bio", self.bio.trim()),
            ("edit", if edit { "true" } else { "false" }),
        ])
    }
}

impl HttpApi {
    pub async fn fetch_profile(&self, target: &ProfileTarget) -> ApiResult<ProfileLookup> {
        let url = match target {
            ProfileTarget::Viewer => self.path(PROFILE_DATA),
            ProfileTarget::Email(email) => self.url(PROFILE_DATA, &[("email", email)]),
            ProfileTarget::Username(username) => self.url(PROFILE_DATA, &[("username", username)]),
        };
        let value: Value = get_json(PROFILE_DATA, &url).await?;
        ProfileLookup::from_value(value).map_err(|e| ApiError::malformed(PROFILE_DATA, e))
    }

    /// `edit = false` creates the viewer's profile
    pub async fn save_profile(&self, form: &ProfileForm, edit: bool) -> ApiResult<()> {
        post_form(PROFILE_DATA, &self.path(PROFILE_DATA), form.encode(edit)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields() {
        let form = ProfileForm {
            name: "Ada".into(),
            username: "  ".into(),
            bio: String::new(),
        };
        assert_eq!(form.missing_fields(), vec!["username", "bio"]);
        assert!(!form.is_valid());
    }

    #[test]
    fn test_form_encoding() {
        let form = ProfileForm {
            name: " Ada Lovelace ".into(),
            username: "ada".into(),
            bio: "Loves films & shows".into(),
        };
        assert!(form.is_valid());
        assert_eq!(
            form.encode(true),
            "name=Ada%20Lovelace&username=ada&bio=Loves%20films%20%26%20shows&edit=true"
        );
    }
}
