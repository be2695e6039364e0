//! UI Components
//!
//! Leptos components for the hub pages.

mod comment_list;
mod dashboard;
mod delete_confirm_button;
mod item_grid;
mod item_page;
mod item_submission;
mod like_button;
mod nav_bar;
mod profile;
mod profile_form;

pub use comment_list::CommentList;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use item_grid::{ItemCard, ItemGrid};
pub use item_page::ItemPage;
pub use item_submission::ItemSubmission;
pub use like_button::LikeButton;
pub use nav_bar::NavBar;
pub use profile::Profile;
pub use profile_form::ProfileForm;
