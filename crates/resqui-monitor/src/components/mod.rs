//! TUI components.

pub mod failed_view;
pub mod footer;
pub mod header;
pub mod pager_bar;
pub mod queue_view;
pub mod view_tabs;
pub mod worker_view;

pub use failed_view::FailedView;
pub use footer::Footer;
pub use header::Header;
pub use pager_bar::PagerBar;
pub use queue_view::QueueView;
pub use view_tabs::ViewTabs;
pub use worker_view::WorkerView;
