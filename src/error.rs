use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文档操作错误
    #[error("文档错误: {0}")]
    Dom(#[from] DomError),
    /// 元素绑定错误
    #[error("绑定错误: {0}")]
    Binding(#[from] BindingError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文档相关错误
#[derive(Debug, Error)]
pub enum DomError {
    /// 选择器解析失败
    #[error("无法解析选择器 '{selector}': {reason}")]
    SelectorParse { selector: String, reason: String },
    /// 选择器没有匹配任何元素
    #[error("未找到元素: {selector}")]
    NodeNotFound { selector: String },
}

/// 元素绑定错误
///
/// 初始化时读取 data 属性失败，对应元素会被跳过
#[derive(Debug, Error)]
pub enum BindingError {
    /// 缺少必需属性
    #[error("元素 {element} 缺少属性 {attribute}")]
    MissingAttribute { element: String, attribute: String },
    /// 属性值无法解析
    #[error("元素 {element} 的属性 {attribute}='{value}' 无法转换为 {expected}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        expected: String,
    },
    /// 缺少必需子元素
    #[error("元素 {element} 内未找到 {selector}")]
    MissingChild { element: String, selector: String },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端返回非 2xx 状态
    #[error("API返回错误响应 ({endpoint}): code={code}, message={message:?}")]
    BadResponse {
        endpoint: String,
        code: u16,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// HTTP 客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    HttpClient(#[source] reqwest::Error),
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: String::new(),
            source: err,
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: err,
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: err,
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建选择器解析错误
    pub fn selector_parse(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Dom(DomError::SelectorParse {
            selector: selector.into(),
            reason: reason.into(),
        })
    }

    /// 创建元素未找到错误
    pub fn node_not_found(selector: impl Into<String>) -> Self {
        AppError::Dom(DomError::NodeNotFound {
            selector: selector.into(),
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(path: impl Into<String>, source: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_error_names_element_and_attribute() {
        let err = AppError::from(BindingError::InvalidAttribute {
            element: "div#quiz-timer".to_string(),
            attribute: "data-time-limit".to_string(),
            value: "ten".to_string(),
            expected: "u32".to_string(),
        });
        let message = err.to_string();
        assert!(message.contains("div#quiz-timer"));
        assert!(message.contains("data-time-limit"));
        assert!(message.contains("ten"));
    }

    #[test]
    fn json_error_converts_into_api_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(matches!(err, AppError::Api(ApiError::JsonParseFailed { .. })));
    }
}
