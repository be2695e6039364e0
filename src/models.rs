//! Frontend Models
//!
//! Data structures matching the Entertainment Hub endpoints.
//! Loose wire shapes (Gson-encoded `Optional`s, numeric ids, empty cursors)
//! are validated here, so the render pipeline only sees checked values.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ========================
// Identifiers
// ========================

/// Id as the backend sends it: a Java `Long` or a string
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Int(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// Java `Optional` as serialized by Gson: `{}` or `{"value": ...}`
#[derive(Deserialize)]
struct OptionalValue<T> {
    #[serde(default = "Option::default")]
    value: Option<T>,
}

/// Catalog item identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawId::deserialize(deserializer)?.into_string();
        ItemId::new(raw).ok_or_else(|| serde::de::Error::custom("empty item id"))
    }
}

/// Comment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque pagination token issued by `/dashboard`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.is_empty()).then_some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Scalar id: a number or a non-empty string, anything else is unusable
fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_i64().map(|n| n.to_string()).or_else(|| n.as_u64().map(|n| n.to_string())),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Either an `Optional` wrapper or a bare id (older revisions).
/// Unusable shapes yield `None` instead of failing the whole record.
fn optional_item_id<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let raw = match &value {
        Value::Object(wrapper) => wrapper.get("value").and_then(scalar_id),
        other => scalar_id(other),
    };
    Ok(raw.and_then(ItemId::new))
}

fn optional_comment_id<'de, D>(deserializer: D) -> Result<Option<CommentId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_id(&value).and_then(CommentId::new))
}

/// Records that fail to decode are skipped so the rest of the page still renders
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<ItemRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ItemRecord>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("[Models] Dropping malformed item record: {}", e);
                None
            }
        })
        .collect())
}

fn optional_cursor<'de, D>(deserializer: D) -> Result<Option<PageCursor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(PageCursor::new))
}

/// Display strings: null, missing and "" are all treated as absent
fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

// ========================
// Catalog
// ========================

/// Entertainment item as returned by the backend
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// `None` means the record must not be rendered as a card
    #[serde(default, deserialize_with = "optional_item_id")]
    pub unique_id: Option<ItemId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "imageURL")]
    pub image_url: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub runtime: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub directors: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub writers: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub actors: Option<String>,
    #[serde(default)]
    pub number_of_likes: u64,
}

impl ItemRecord {
    /// Relative link to the item's detail page
    pub fn page_link(&self) -> Option<String> {
        self.unique_id.as_ref().map(item_page_link)
    }
}

pub fn item_page_link(id: &ItemId) -> String {
    format!("item-page.html?itemId={}", id)
}

/// One page of the dashboard feed
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FeedPage {
    #[serde(default, alias = "itemList", deserialize_with = "lenient_items")]
    pub items: Vec<ItemRecord>,
    /// `None` when the backend has no further pages
    #[serde(default, rename = "pageCursor", deserialize_with = "optional_cursor")]
    pub next_cursor: Option<PageCursor>,
}

/// Ids of the items the current viewer has liked
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LikedItemSet(HashSet<ItemId>);

impl LikedItemSet {
    pub fn contains(&self, id: &ItemId) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: ItemId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.0.remove(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.0.iter()
    }
}

impl FromIterator<ItemId> for LikedItemSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Dashboard sort order (wire values match the dashboard endpoint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortType {
    #[default]
    AscendingTitle,
    DescendingTitle,
    RecentReleaseDate,
}

impl SortType {
    pub const ALL: [SortType; 3] = [
        SortType::AscendingTitle,
        SortType::DescendingTitle,
        SortType::RecentReleaseDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortType::AscendingTitle => "ASCENDING_TITLE",
            SortType::DescendingTitle => "DESCENDING_TITLE",
            SortType::RecentReleaseDate => "RECENT_RELEASE_DATE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortType::AscendingTitle => "Title (A-Z)",
            SortType::DescendingTitle => "Title (Z-A)",
            SortType::RecentReleaseDate => "Newest releases",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Current dashboard query. `cursor` is `None` for the first page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState {
    pub search_value: String,
    pub sort_type: SortType,
    pub cursor: Option<PageCursor>,
}

impl QueryState {
    pub fn new(search_value: impl Into<String>, sort_type: SortType) -> Self {
        Self {
            search_value: search_value.into(),
            sort_type,
            cursor: None,
        }
    }

    /// Same search and sort, positioned at `cursor`
    pub fn at_cursor(&self, cursor: PageCursor) -> Self {
        Self {
            cursor: Some(cursor),
            ..self.clone()
        }
    }
}

// ========================
// Item page
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, deserialize_with = "optional_comment_id")]
    pub comment_id: Option<CommentId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub timestamp_millis: i64,
    #[serde(default)]
    pub belongs_to_user: bool,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemPageData {
    pub item: ItemRecord,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Letter avatar for an email, served by icotar
pub fn avatar_url(email: &str, size: u32) -> String {
    let initial = email
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
        .filter(char::is_ascii_alphanumeric)
        .unwrap_or('u');
    format!("https://icotar.com/avatar/{}.png?s={}", initial, size)
}

// ========================
// Accounts
// ========================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LoginStatus {
    #[serde(rename = "isUserLoggedIn", default)]
    pub is_logged_in: bool,
    #[serde(rename = "LoginURL", default)]
    pub login_url: String,
    #[serde(rename = "LogoutURL", default)]
    pub logout_url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserData {
    pub profile: UserProfile,
    #[serde(default, rename = "recommendedUsers")]
    pub recommended_users: Vec<String>,
}

/// Result of `GET /profile-data`
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    /// Logged-in viewer has not created a profile yet
    NeedsProfile,
    Found(UserData),
}

impl ProfileLookup {
    /// Accepts `{NeedsProfile: true}`, a `UserData` object, or a bare
    /// `UserProfile` (the `?email=` / `?username=` lookups).
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.get("NeedsProfile").and_then(Value::as_bool) == Some(true) {
            return Ok(ProfileLookup::NeedsProfile);
        }
        if value.get("profile").is_some() {
            return serde_json::from_value::<UserData>(value).map(ProfileLookup::Found);
        }
        let profile: UserProfile = serde_json::from_value(value)?;
        Ok(ProfileLookup::Found(UserData {
            profile,
            recommended_users: Vec::new(),
        }))
    }
}

// ========================
// Item submission
// ========================

/// OMDb title lookup result. Unmodelled fields are kept for resubmission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OmdbItem {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OmdbItem {
    /// Flat string fields for a form-encoded submission. Nested values
    /// (such as `Ratings`) are left out.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("Title".to_string(), self.title.clone()),
            ("Poster".to_string(), self.poster.clone()),
            ("Released".to_string(), self.released.clone()),
            ("imdbID".to_string(), self.imdb_id.clone()),
            ("Response".to_string(), self.response.clone()),
        ];
        fields.extend(
            self.extra
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string()))),
        );
        fields
    }

    pub fn is_found(&self) -> bool {
        !self.response.eq_ignore_ascii_case("false") && !self.imdb_id.is_empty()
    }
}

/// Result of `GET /item-submission?imdbID=`
#[derive(Debug, Clone, PartialEq)]
pub enum DuplicateCheck {
    Unique,
    /// Already in the catalog; the record is known only on newer backends
    Exists(Option<ItemRecord>),
}

impl DuplicateCheck {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Null | Value::Bool(true) => Ok(DuplicateCheck::Unique),
            Value::Bool(false) => Ok(DuplicateCheck::Exists(None)),
            other => {
                let wrapped: OptionalValue<ItemRecord> = serde_json::from_value(other)?;
                Ok(match wrapped.value {
                    Some(item) => DuplicateCheck::Exists(Some(item)),
                    None => DuplicateCheck::Unique,
                })
            }
        }
    }

    /// Link to the existing item, if its id is known
    pub fn existing_link(&self) -> Option<String> {
        match self {
            DuplicateCheck::Exists(Some(item)) => item.page_link(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    #[test]
    fn test_unique_id_shapes() {
        let wrapped_text: ItemRecord = serde_json::from_value(json!({"uniqueId": {"value": "42"}})).unwrap();
        let wrapped_num: ItemRecord = serde_json::from_value(json!({"uniqueId": {"value": 42}})).unwrap();
        let bare: ItemRecord = serde_json::from_value(json!({"uniqueId": 7})).unwrap();
        let empty_obj: ItemRecord = serde_json::from_value(json!({"uniqueId": {}})).unwrap();
        let empty_str: ItemRecord = serde_json::from_value(json!({"uniqueId": {"value": ""}})).unwrap();
        let missing: ItemRecord = serde_json::from_value(json!({"title": "x"})).unwrap();

        assert_eq!(wrapped_text.unique_id, Some(id("42")));
        assert_eq!(wrapped_num.unique_id, Some(id("42")));
        assert_eq!(bare.unique_id, Some(id("7")));
        assert_eq!(empty_obj.unique_id, None);
        assert_eq!(empty_str.unique_id, None);
        assert_eq!(missing.unique_id, None);
    }

    #[test]
    fn test_unusable_id_shapes_drop_only_that_record() {
        let page: FeedPage = serde_json::from_value(json!({
            "items": [
                {"uniqueId": {"value": 1}},
                {"uniqueId": {"value": {"nested": true}}},
                {"uniqueId": [5]},
                {"uniqueId": {"value": 3}}
            ],
            "pageCursor": "c2"
        }))
        .unwrap();

        let ids: Vec<Option<ItemId>> = page.items.iter().map(|i| i.unique_id.clone()).collect();
        assert_eq!(ids, vec![Some(id("1")), None, None, Some(id("3"))]);
        assert_eq!(page.next_cursor, PageCursor::new("c2"));
    }

    #[test]
    fn test_malformed_record_skipped() {
        let page: FeedPage = serde_json::from_value(json!({
            "items": [
                {"uniqueId": {"value": 1}, "title": "Alien"},
                {"uniqueId": {"value": 2}, "title": {"en": "Heat"}},
                {"uniqueId": {"value": 3}, "numberOfLikes": "many"},
                {"uniqueId": {"value": 4}, "title": "Up"}
            ]
        }))
        .unwrap();

        let titles: Vec<&str> = page.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Up"]);
        assert_eq!(crate::grid::layout_rows(&page.items)[0].len(), 2);
    }

    #[test]
    fn test_item_record_fields() {
        let item: ItemRecord = serde_json::from_value(json!({
            "uniqueId": {"value": 3},
            "title": "The Matrix",
            "description": "A hacker learns the truth.",
            "imageUrl": "https://img/matrix.jpg",
            "releaseDate": "1999",
            "runtime": "",
            "actors": "Keanu Reeves",
            "numberOfLikes": 5
        }))
        .unwrap();

        assert_eq!(item.title, "The Matrix");
        assert_eq!(item.image_url, "https://img/matrix.jpg");
        assert_eq!(item.release_date.as_deref(), Some("1999"));
        assert_eq!(item.runtime, None);
        assert_eq!(item.genre, None);
        assert_eq!(item.number_of_likes, 5);
        assert_eq!(item.page_link().as_deref(), Some("item-page.html?itemId=3"));
    }

    #[test]
    fn test_feed_page_cursor_and_alias() {
        let page: FeedPage = serde_json::from_value(json!({
            "items": [{"uniqueId": {"value": "1"}}],
            "pageCursor": "c2"
        }))
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_cursor, PageCursor::new("c2"));

        let last: FeedPage = serde_json::from_value(json!({
            "itemList": [{"uniqueId": {}}, {"uniqueId": {"value": 2}}],
            "pageCursor": ""
        }))
        .unwrap();
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.next_cursor, None);

        let bare: FeedPage = serde_json::from_value(json!({})).unwrap();
        assert!(bare.items.is_empty());
        assert_eq!(bare.next_cursor, None);
    }

    #[test]
    fn test_liked_item_set_from_numbers_and_strings() {
        let liked: LikedItemSet = serde_json::from_value(json!([1, "2", 3])).unwrap();
        assert_eq!(liked.len(), 3);
        assert!(liked.contains(&id("1")));
        assert!(liked.contains(&id("2")));
        assert!(!liked.contains(&id("4")));
    }

    #[test]
    fn test_sort_type_wire_values() {
        assert_eq!(serde_json::to_value(SortType::RecentReleaseDate).unwrap(), json!("RECENT_RELEASE_DATE"));
        assert_eq!(SortType::from_wire("DESCENDING_TITLE"), Some(SortType::DescendingTitle));
        assert_eq!(SortType::from_wire("title"), None);
        assert_eq!(SortType::default(), SortType::AscendingTitle);
    }

    #[test]
    fn test_profile_lookup_shapes() {
        let needs = ProfileLookup::from_value(json!({"NeedsProfile": true})).unwrap();
        assert_eq!(needs, ProfileLookup::NeedsProfile);

        let own = ProfileLookup::from_value(json!({
            "profile": {"name": "Ada", "username": "ada", "email": "ada@x.com", "bio": "hi"},
            "recommendedUsers": ["bob@x.com"]
        }))
        .unwrap();
        match own {
            ProfileLookup::Found(data) => {
                assert_eq!(data.profile.username, "ada");
                assert_eq!(data.recommended_users, vec!["bob@x.com".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }

        let other = ProfileLookup::from_value(json!({"name": "Bob", "username": "bob", "email": "bob@x.com", "bio": ""})).unwrap();
        match other {
            ProfileLookup::Found(data) => {
                assert_eq!(data.profile.email, "bob@x.com");
                assert!(data.recommended_users.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_check_shapes() {
        assert_eq!(DuplicateCheck::from_value(json!({})).unwrap(), DuplicateCheck::Unique);
        assert_eq!(DuplicateCheck::from_value(json!(true)).unwrap(), DuplicateCheck::Unique);
        assert_eq!(DuplicateCheck::from_value(json!(false)).unwrap(), DuplicateCheck::Exists(None));

        let linked = DuplicateCheck::from_value(json!({"value": {"uniqueId": {"value": 9}, "title": "Up"}})).unwrap();
        assert_eq!(linked.existing_link().as_deref(), Some("item-page.html?itemId=9"));

        let unlinked = DuplicateCheck::from_value(json!({"value": {"uniqueId": {}, "title": "Up"}})).unwrap();
        assert!(matches!(unlinked, DuplicateCheck::Exists(Some(_))));
        assert_eq!(unlinked.existing_link(), None);
    }

    #[test]
    fn test_omdb_item_keeps_unmodelled_fields() {
        let item: OmdbItem = serde_json::from_value(json!({
            "Title": "Up", "Poster": "p.jpg", "Released": "29 May 2009",
            "imdbID": "tt1049413", "Response": "True", "Genre": "Animation"
        }))
        .unwrap();
        assert!(item.is_found());
        assert_eq!(item.extra.get("Genre"), Some(&json!("Animation")));

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["Genre"], json!("Animation"));
        assert_eq!(out["imdbID"], json!("tt1049413"));

        let missing: OmdbItem = serde_json::from_value(json!({"Response": "False", "Error": "Movie not found!"})).unwrap();
        assert!(!missing.is_found());
    }

    #[test]
    fn test_avatar_url_uses_first_letter() {
        assert_eq!(avatar_url("Ada@x.com", 23), "https://icotar.com/avatar/a.png?s=23");
        assert_eq!(avatar_url("", 23), "https://icotar.com/avatar/u.png?s=23");
    }
}
