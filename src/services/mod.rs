pub mod alert_dismisser;
pub mod bookmark_toggle;
pub mod countdown_timer;
pub mod form_validator;
pub mod option_selector;
pub mod search_filter;

pub use alert_dismisser::{AlertDismisser, Dismissible, RemoveOnDismiss};
pub use bookmark_toggle::{BookmarkClick, BookmarkToggle};
pub use countdown_timer::CountdownTimer;
pub use form_validator::{FormValidator, ValidationVerdict};
pub use option_selector::OptionSelector;
pub use search_filter::{SearchFilter, SearchQuery};
