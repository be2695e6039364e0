//! Feed Controller
//!
//! Page-level owner of the current query, the viewer's liked set and
//! request sequencing. Components hold it in an `Rc` and apply the
//! [`LoadOutcome`]s it returns.

use std::cell::{Cell, RefCell};

use crate::api::CatalogApi;
use crate::error::ApiResult;
use crate::grid::RenderMode;
use crate::likes::{LikeAction, LikeOutcome};
use crate::models::{ItemId, ItemRecord, LikedItemSet, PageCursor, QueryState};
use crate::query::build_query;

/// A page ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct FeedUpdate {
    pub mode: RenderMode,
    pub items: Vec<ItemRecord>,
    /// Cursor to arm infinite scroll with; `None` is the last page
    pub next_cursor: Option<PageCursor>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(FeedUpdate),
    /// A newer request was issued while this one was in flight
    Stale,
    /// Feed request failed (already logged); the rendered grid stays as is
    Failed,
}

pub struct FeedController<A> {
    api: A,
    query: RefCell<QueryState>,
    liked: RefCell<LikedItemSet>,
    sequence: Cell<u64>,
}

impl<A: CatalogApi> FeedController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            query: RefCell::new(QueryState::default()),
            liked: RefCell::new(LikedItemSet::default()),
            sequence: Cell::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn query(&self) -> QueryState {
        self.query.borrow().clone()
    }

    pub fn liked(&self) -> LikedItemSet {
        self.liked.borrow().clone()
    }

    pub fn is_liked(&self, id: &ItemId) -> bool {
        self.liked.borrow().contains(id)
    }

    fn next_sequence(&self) -> u64 {
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);
        sequence
    }

    fn is_current(&self, sequence: u64) -> bool {
        self.sequence.get() == sequence
    }

    /// Load the first page for `query`, replacing the grid.
    /// With `refresh_liked` the viewer's liked set is fetched alongside;
    /// its failure degrades to an empty set and never blocks the feed.
    pub async fn load(&self, query: QueryState, refresh_liked: bool) -> LoadOutcome {
        let query = QueryState { cursor: None, ..query };
        let sequence = self.next_sequence();
        *self.query.borrow_mut() = query.clone();
        let request = build_query(&query);

        let page = if refresh_liked {
            let (page, liked) = futures::join!(self.api.fetch_feed(&request), self.api.fetch_liked_items());
            self.store_liked(liked);
            page
        } else {
            self.api.fetch_feed(&request).await
        };

        self.finish(sequence, page, RenderMode::Replace, "first page")
    }

    /// Load the page at `cursor` for the current query, appending to the grid
    pub async fn load_more(&self, cursor: PageCursor) -> LoadOutcome {
        let sequence = self.next_sequence();
        let query = self.query.borrow().at_cursor(cursor);
        let request = build_query(&query);
        let page = self.api.fetch_feed(&request).await;
        self.finish(sequence, page, RenderMode::Append, "next page")
    }

    fn finish(
        &self,
        sequence: u64,
        page: ApiResult<crate::models::FeedPage>,
        mode: RenderMode,
        what: &str,
    ) -> LoadOutcome {
        if !self.is_current(sequence) {
            log::debug!("[Feed] Discarding stale {} response (request #{})", what, sequence);
            return LoadOutcome::Stale;
        }
        match page {
            Ok(page) => {
                log::info!(
                    "[Feed] Loaded {} with {} items, more pages: {}",
                    what,
                    page.items.len(),
                    page.next_cursor.is_some()
                );
                LoadOutcome::Loaded(FeedUpdate {
                    mode,
                    items: page.items,
                    next_cursor: page.next_cursor,
                })
            }
            Err(e) => {
                log::error!("[Feed] Failed to fetch {}: {}", what, e);
                LoadOutcome::Failed
            }
        }
    }

    fn store_liked(&self, liked: ApiResult<LikedItemSet>) {
        let liked = liked.unwrap_or_else(|e| {
            log::warn!("[Feed] Liked items unavailable, rendering all as not liked: {}", e);
            LikedItemSet::default()
        });
        *self.liked.borrow_mut() = liked;
    }

    /// Refetch the liked set alone
    pub async fn refresh_liked(&self) {
        let liked = self.api.fetch_liked_items().await;
        self.store_liked(liked);
    }

    /// Like or unlike `id`. On success the liked set is updated and the
    /// counter refetched; on failure nothing changes.
    pub async fn toggle_like(&self, id: &ItemId, action: LikeAction) -> ApiResult<LikeOutcome> {
        match action {
            LikeAction::Like => self.api.like_item(id).await?,
            LikeAction::Unlike => self.api.unlike_item(id).await?,
        }

        {
            let mut liked = self.liked.borrow_mut();
            match action {
                LikeAction::Like => liked.insert(id.clone()),
                LikeAction::Unlike => liked.remove(id),
            };
        }

        let count = match self.api.fetch_like_count(id).await {
            Ok(count) => Some(count),
            Err(e) => {
                log::warn!("[Feed] Like count refetch failed for item {}: {}", id, e);
                None
            }
        };

        Ok(LikeOutcome {
            state: action.resulting_state(),
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::grid::{layout_rows, GridState};
    use crate::likes::{LikeButtonState, LikeState};
    use crate::models::{FeedPage, SortType};
    use crate::query::FeedRequest;
    use crate::scroll::{ScrollArm, ViewportMetrics};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use std::collections::{HashMap, HashSet, VecDeque};

    enum FeedResponse {
        Ready(ApiResult<FeedPage>),
        Gated(oneshot::Receiver<ApiResult<FeedPage>>),
    }

    #[derive(Default)]
    struct MockApi {
        feed: RefCell<VecDeque<FeedResponse>>,
        requests: RefCell<Vec<FeedRequest>>,
        liked: RefCell<Option<ApiResult<LikedItemSet>>>,
        server_likes: RefCell<HashSet<ItemId>>,
        base_counts: HashMap<ItemId, u64>,
        fail_mutations: Cell<bool>,
        fail_counter: Cell<bool>,
    }

    impl MockApi {
        fn push_page(&self, page: ApiResult<FeedPage>) {
            self.feed.borrow_mut().push_back(FeedResponse::Ready(page));
        }

        fn push_gated(&self) -> oneshot::Sender<ApiResult<FeedPage>> {
            let (tx, rx) = oneshot::channel();
            self.feed.borrow_mut().push_back(FeedResponse::Gated(rx));
            tx
        }

        fn request_urls(&self) -> Vec<String> {
            self.requests.borrow().iter().map(|r| r.to_url("")).collect()
        }
    }

    fn network_error(endpoint: &str) -> ApiError {
        ApiError::transport(endpoint, "connection refused")
    }

    #[async_trait(?Send)]
    impl CatalogApi for MockApi {
        async fn fetch_feed(&self, request: &FeedRequest) -> ApiResult<FeedPage> {
            self.requests.borrow_mut().push(request.clone());
            let next = self.feed.borrow_mut().pop_front();
            match next {
                Some(FeedResponse::Ready(page)) => page,
                Some(FeedResponse::Gated(rx)) => rx.await.unwrap_or_else(|_| Err(network_error("/dashboard"))),
                None => Err(network_error("/dashboard")),
            }
        }

        async fn fetch_liked_items(&self) -> ApiResult<LikedItemSet> {
            self.liked.borrow_mut().take().unwrap_or_else(|| Ok(LikedItemSet::default()))
        }

        async fn like_item(&self, id: &ItemId) -> ApiResult<()> {
            if self.fail_mutations.get() {
                return Err(network_error("/favorite-item"));
            }
            self.server_likes.borrow_mut().insert(id.clone());
            Ok(())
        }

        async fn unlike_item(&self, id: &ItemId) -> ApiResult<()> {
            if self.fail_mutations.get() {
                return Err(network_error("/favorite-item"));
            }
            self.server_likes.borrow_mut().remove(id);
            Ok(())
        }

        async fn fetch_like_count(&self, id: &ItemId) -> ApiResult<u64> {
            if self.fail_counter.get() {
                return Err(ApiError::Status { endpoint: "/favorite-counter".into(), status: 500 });
            }
            let base = self.base_counts.get(id).copied().unwrap_or(0);
            Ok(base + u64::from(self.server_likes.borrow().contains(id)))
        }
    }

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    fn item(raw_id: Option<&str>, title: &str) -> ItemRecord {
        ItemRecord {
            unique_id: raw_id.and_then(ItemId::new),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn page(items: Vec<ItemRecord>, cursor: &str) -> FeedPage {
        FeedPage {
            items,
            next_cursor: PageCursor::new(cursor),
        }
    }

    fn loaded(outcome: LoadOutcome) -> FeedUpdate {
        match outcome {
            LoadOutcome::Loaded(update) => update,
            other => panic!("expected a loaded page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_renders_single_card_and_arms_cursor() {
        let api = MockApi::default();
        api.push_page(Ok(page(vec![item(Some("42"), "The Matrix")], "c2")));
        let controller = FeedController::new(api);

        let update = loaded(controller.load(QueryState::new("matrix", SortType::AscendingTitle), true).await);

        assert_eq!(
            controller.api().request_urls(),
            vec!["/dashboard?cursor=&searchValue=matrix&sortType=ASCENDING_TITLE".to_string()]
        );
        assert_eq!(update.mode, RenderMode::Replace);
        let rows = layout_rows(&update.items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0][0].link(), "item-page.html?itemId=42");

        let mut arm = ScrollArm::default();
        arm.arm(update.next_cursor.clone().unwrap());
        let bottom = ViewportMetrics { scroll_y: 1000.0, viewport_height: 500.0, document_height: 1500.0 };
        assert_eq!(arm.poll(bottom), PageCursor::new("c2"));
    }

    #[tokio::test]
    async fn test_new_query_discards_cursor() {
        let api = MockApi::default();
        api.push_page(Ok(page(vec![], "")));
        let controller = FeedController::new(api);

        let mut query = QueryState::new("up", SortType::RecentReleaseDate);
        query.cursor = PageCursor::new("stale-cursor");
        controller.load(query, false).await;

        let requests = controller.api().requests.borrow();
        assert_eq!(requests[0].param("cursor"), Some(""));
        assert_eq!(controller.query().cursor, None);
    }

    #[tokio::test]
    async fn test_liked_failure_still_renders_feed() {
        let api = MockApi::default();
        api.push_page(Ok(page(vec![item(Some("1"), "A"), item(Some("2"), "B")], "")));
        *api.liked.borrow_mut() = Some(Err(ApiError::Status { endpoint: "/favorite-item".into(), status: 400 }));
        let controller = FeedController::new(api);

        let update = loaded(controller.load(QueryState::default(), true).await);

        let rows = layout_rows(&update.items);
        assert_eq!(rows[0].len(), 2);
        for card in &rows[0] {
            assert_eq!(LikeState::from_membership(controller.is_liked(&card.id)), LikeState::NotLiked);
        }
    }

    #[tokio::test]
    async fn test_liked_set_loaded_with_first_page() {
        let api = MockApi::default();
        api.push_page(Ok(page(vec![item(Some("1"), "A"), item(Some("2"), "B")], "")));
        *api.liked.borrow_mut() = Some(Ok([id("2")].into_iter().collect()));
        let controller = FeedController::new(api);

        controller.load(QueryState::default(), true).await;

        assert!(!controller.is_liked(&id("1")));
        assert!(controller.is_liked(&id("2")));
    }

    #[tokio::test]
    async fn test_feed_failure_leaves_grid_untouched() {
        let api = MockApi::default();
        api.push_page(Ok(page(vec![item(Some("1"), "A")], "c2")));
        api.push_page(Err(network_error("/dashboard")));
        let controller = FeedController::new(api);
        let mut grid = GridState::default();

        let first = loaded(controller.load(QueryState::default(), false).await);
        grid.apply_page(&first.items, first.mode);
        let before = grid.clone();

        let outcome = controller.load(QueryState::new("x", SortType::DescendingTitle), false).await;
        assert_eq!(outcome, LoadOutcome::Failed);
        if let LoadOutcome::Loaded(update) = outcome {
            grid.apply_page(&update.items, update.mode);
        }
        assert_eq!(grid, before);
    }

    #[tokio::test]
    async fn test_load_more_appends_with_current_query() {
        let api = MockApi::default();
        api.push_page(Ok(page(vec![item(Some("1"), "A")], "c2")));
        api.push_page(Ok(page(vec![item(Some("2"), "B")], "")));
        let controller = FeedController::new(api);
        let mut grid = GridState::default();

        let first = loaded(controller.load(QueryState::new("a", SortType::DescendingTitle), false).await);
        grid.apply_page(&first.items, first.mode);
        let next = loaded(controller.load_more(first.next_cursor.unwrap()).await);
        grid.apply_page(&next.items, next.mode);

        assert_eq!(next.mode, RenderMode::Append);
        assert_eq!(next.next_cursor, None);
        assert_eq!(grid.card_count(), 2);
        assert_eq!(
            controller.api().request_urls()[1],
            "/dashboard?cursor=c2&searchValue=a&sortType=DESCENDING_TITLE"
        );
    }

    #[tokio::test]
    async fn test_last_page_does_not_rearm() {
        let api = MockApi::default();
        api.push_page(Ok(page(vec![item(Some("1"), "A")], "")));
        let controller = FeedController::new(api);
        let mut arm = ScrollArm::default();

        let update = loaded(controller.load(QueryState::default(), false).await);
        match update.next_cursor {
            Some(cursor) => arm.arm(cursor),
            None => arm.disarm(),
        }

        let bottom = ViewportMetrics { scroll_y: 900.0, viewport_height: 100.0, document_height: 1000.0 };
        assert_eq!(arm.poll(bottom), None);
        assert_eq!(controller.api().requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = MockApi::default();
        let first_tx = api.push_gated();
        let second_tx = api.push_gated();
        let controller = FeedController::new(api);

        let first = controller.load(QueryState::new("ma", SortType::AscendingTitle), false);
        let second = controller.load(QueryState::new("matrix", SortType::AscendingTitle), false);
        futures::pin_mut!(first, second);
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(futures::poll!(second.as_mut()).is_pending());

        second_tx.send(Ok(page(vec![item(Some("42"), "The Matrix")], ""))).unwrap();
        let update = loaded(second.await);
        assert_eq!(update.items[0].title, "The Matrix");

        first_tx.send(Ok(page(vec![item(Some("7"), "Mad Max")], ""))).unwrap();
        assert_eq!(first.await, LoadOutcome::Stale);
    }

    #[tokio::test]
    async fn test_load_more_discarded_after_new_search() {
        let api = MockApi::default();
        api.push_page(Ok(page(vec![item(Some("1"), "A")], "c2")));
        let more_tx = api.push_gated();
        api.push_page(Ok(page(vec![item(Some("9"), "Z")], "")));
        let controller = FeedController::new(api);

        let first = loaded(controller.load(QueryState::default(), false).await);
        let more = controller.load_more(first.next_cursor.unwrap());
        futures::pin_mut!(more);
        assert!(futures::poll!(more.as_mut()).is_pending());

        let fresh = loaded(controller.load(QueryState::new("z", SortType::AscendingTitle), false).await);
        assert_eq!(fresh.mode, RenderMode::Replace);

        more_tx.send(Ok(page(vec![item(Some("2"), "B")], "c3"))).unwrap();
        assert_eq!(more.await, LoadOutcome::Stale);
    }

    #[tokio::test]
    async fn test_like_then_unlike_round_trip() {
        let mut api = MockApi::default();
        api.base_counts.insert(id("42"), 5);
        let controller = FeedController::new(api);
        let mut button = LikeButtonState::new(5);
        let before = controller.liked();

        let state = LikeState::from_membership(controller.is_liked(&id("42")));
        let action = button.begin(state).unwrap();
        let outcome = controller.toggle_like(&id("42"), action).await.unwrap();
        button.finish(action, Some(outcome));
        assert_eq!(outcome.state, LikeState::Liked);
        assert!(controller.is_liked(&id("42")));
        assert_eq!(button.count, 6);

        let action = button.begin(outcome.state).unwrap();
        let outcome = controller.toggle_like(&id("42"), action).await.unwrap();
        button.finish(action, Some(outcome));
        assert_eq!(outcome.state, LikeState::NotLiked);
        assert_eq!(controller.liked(), before);
        assert_eq!(button.count, 5);
    }

    #[tokio::test]
    async fn test_failed_like_keeps_state() {
        let api = MockApi::default();
        api.fail_mutations.set(true);
        let controller = FeedController::new(api);

        let result = controller.toggle_like(&id("3"), LikeAction::Like).await;
        assert!(result.is_err());
        assert!(!controller.is_liked(&id("3")));
    }

    #[tokio::test]
    async fn test_counter_failure_still_records_like() {
        let api = MockApi::default();
        api.fail_counter.set(true);
        let controller = FeedController::new(api);

        let outcome = controller.toggle_like(&id("3"), LikeAction::Like).await.unwrap();
        assert_eq!(outcome.state, LikeState::Liked);
        assert_eq!(outcome.count, None);
        assert!(controller.is_liked(&id("3")));
    }
}
