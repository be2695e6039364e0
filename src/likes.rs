//! Like State
//!
//! Per-card like toggle: Liked/NotLiked plus a like counter.
//! At most one mutation is in flight per widget; clicks during a request are ignored.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    NotLiked,
}

impl LikeState {
    pub fn from_membership(liked: bool) -> Self {
        if liked {
            LikeState::Liked
        } else {
            LikeState::NotLiked
        }
    }

    /// The mutation a click issues from this state
    pub fn action(self) -> LikeAction {
        match self {
            LikeState::Liked => LikeAction::Unlike,
            LikeState::NotLiked => LikeAction::Like,
        }
    }

    pub fn is_liked(self) -> bool {
        self == LikeState::Liked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    pub fn resulting_state(self) -> LikeState {
        match self {
            LikeAction::Like => LikeState::Liked,
            LikeAction::Unlike => LikeState::NotLiked,
        }
    }

    /// Local counter adjustment when no authoritative count is available
    pub fn adjust(self, count: u64) -> u64 {
        match self {
            LikeAction::Like => count.saturating_add(1),
            LikeAction::Unlike => count.saturating_sub(1),
        }
    }
}

/// Outcome of a successful server mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub state: LikeState,
    /// Authoritative count, `None` if the counter refetch failed
    pub count: Option<u64>,
}

/// Counter and in-flight flag for one like button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeButtonState {
    pub count: u64,
    in_flight: bool,
}

impl LikeButtonState {
    pub fn new(count: u64) -> Self {
        Self { count, in_flight: false }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a toggle from `current`. `None` while a request is already pending.
    pub fn begin(&mut self, current: LikeState) -> Option<LikeAction> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(current.action())
    }

    /// Finish the pending toggle. On failure (`None`) the counter stays as it was.
    pub fn finish(&mut self, action: LikeAction, outcome: Option<LikeOutcome>) {
        self.in_flight = false;
        if let Some(outcome) = outcome {
            self.count = outcome.count.unwrap_or_else(|| action.adjust(self.count));
        }
    }
}
