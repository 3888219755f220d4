//! 收藏接口的数据结构

use serde::{Deserialize, Serialize};

use crate::markup;

/// 服务端返回的收藏状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkStatus {
    Added,
    Removed,
}

impl BookmarkStatus {
    /// (需要加上的图标 class, 需要去掉的图标 class)
    pub fn icon_classes(self) -> (&'static str, &'static str) {
        match self {
            BookmarkStatus::Added => (markup::ICON_BOOKMARKED, markup::ICON_NOT_BOOKMARKED),
            BookmarkStatus::Removed => (markup::ICON_NOT_BOOKMARKED, markup::ICON_BOOKMARKED),
        }
    }
}

/// `POST /quiz/{id}/bookmark` 的成功响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub status: BookmarkStatus,
}

/// 服务端错误响应，如 `{"error": "Access denied"}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_payload() {
        let added: BookmarkResponse = serde_json::from_str(r#"{"status":"added"}"#).unwrap();
        assert_eq!(added.status, BookmarkStatus::Added);
        let removed: BookmarkResponse = serde_json::from_str(r#"{"status":"removed"}"#).unwrap();
        assert_eq!(removed.status, BookmarkStatus::Removed);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<BookmarkResponse>(r#"{"status":"maybe"}"#).is_err());
        assert!(serde_json::from_str::<BookmarkResponse>(r#"{"error":"Access denied"}"#).is_err());
    }
}
