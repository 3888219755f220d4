pub mod bookmark_client;

pub use bookmark_client::{BookmarkApi, HttpBookmarkClient};
