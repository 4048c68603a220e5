//! Headless rendition of the list page every resource screen repeats:
//! debounced search, filter selectors, paging, load state, empty states and
//! the confirm-then-mutate modal.

pub mod debounce;
pub mod modal;
pub mod page;

pub use debounce::{debounced, DebouncedSearch, SearchInput};
pub use modal::{ConfirmModal, Notification, NotificationKind, RowAction};
pub use page::{EmptyState, ListPage, LoadState};
