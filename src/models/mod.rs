pub mod bindings;
pub mod bookmark;
pub mod countdown;
pub mod fixture;
pub mod loaders;

pub use bindings::{BookmarkBinding, OptionBinding, QuizCard, SearchBinding, TimerBinding};
pub use bookmark::{BookmarkResponse, BookmarkStatus};
pub use countdown::{format_clock, Countdown, Tick};
pub use fixture::{Action, ElementSpec, PageFixture};
pub use loaders::{load_page_fixture, parse_page_fixture};
