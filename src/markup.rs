//! 页面标记约定
//!
//! 服务端模板渲染出的 class / id / data 属性名，各行为按这些名字查找元素

// --- 选项选择 ---
pub const OPTION_CONTAINER_CLASS: &str = "option-container";
pub const SELECTED_CLASS: &str = "selected";
pub const DATA_QUESTION_ID: &str = "data-question-id";
pub const DATA_OPTION_ID: &str = "data-option-id";
/// 隐藏输入框的 name 前缀，完整 name 为 `question_{question_id}`
pub const HIDDEN_INPUT_PREFIX: &str = "question_";

// --- 倒计时 ---
pub const TIMER_ID: &str = "quiz-timer";
pub const DATA_TIME_LIMIT: &str = "data-time-limit";
pub const QUIZ_FORM_ID: &str = "quiz-form";

// --- 收藏 ---
pub const BOOKMARK_BUTTON_CLASS: &str = "bookmark-btn";
pub const DATA_QUIZ_ID: &str = "data-quiz-id";
pub const BOOKMARK_ICON_TAG: &str = "i";
pub const ICON_BOOKMARKED: &str = "bi-bookmark-fill";
pub const ICON_NOT_BOOKMARKED: &str = "bi-bookmark";

// --- 表单校验 ---
pub const NEEDS_VALIDATION_CLASS: &str = "needs-validation";
pub const WAS_VALIDATED_CLASS: &str = "was-validated";

// --- 提示框 ---
pub const ALERT_CLASS: &str = "alert";
pub const ALERT_SHOW_CLASS: &str = "show";

// --- 搜索过滤 ---
pub const SEARCH_FORM_ID: &str = "quiz-search-form";
pub const SEARCH_INPUT_NAME: &str = "search";
pub const CATEGORY_SELECT_NAME: &str = "category";
pub const QUIZ_CARD_CLASS: &str = "quiz-card";
pub const CARD_TITLE_CLASS: &str = "card-title";
pub const DATA_CATEGORY: &str = "data-category";
pub const DISPLAY_SHOWN: &str = "block";
pub const DISPLAY_HIDDEN: &str = "none";
