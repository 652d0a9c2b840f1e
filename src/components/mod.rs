//! UI Components
//!
//! Leptos components for the sign-in gate and the collection board.

mod login_page;
mod board_page;
mod member_selector;
mod facet_select;
mod progress_bar;
mod sync_notice;
mod photocard_grid;

pub use login_page::LoginPage;
pub use board_page::BoardPage;
pub use member_selector::MemberSelector;
pub use facet_select::FacetSelect;
pub use progress_bar::ProgressBar;
pub use sync_notice::SyncNotice;
pub use photocard_grid::PhotocardGrid;
