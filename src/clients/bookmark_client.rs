/// 收藏 API 客户端
///
/// 封装 `POST /quiz/{quiz_id}/bookmark` 调用
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::models::bookmark::{BookmarkResponse, BookmarkStatus, ErrorResponse};

/// 切换收藏状态的能力
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    /// 切换收藏并返回服务端给出的新状态
    async fn toggle_bookmark(&self, quiz_id: u64) -> AppResult<BookmarkStatus>;
}

/// 基于 reqwest 的实现，依赖 cookie 等会话信息由调用方的 client 提供
pub struct HttpBookmarkClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBookmarkClient {
    /// 创建新的收藏客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// 使用已有的 client（例如带登录会话的）
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, quiz_id: u64) -> String {
        format!("{}/quiz/{}/bookmark", self.base_url, quiz_id)
    }
}

#[async_trait]
impl BookmarkApi for HttpBookmarkClient {
    async fn toggle_bookmark(&self, quiz_id: u64) -> AppResult<BookmarkStatus> {
        let endpoint = self.endpoint(quiz_id);
        debug!("POST {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error);
            return Err(ApiError::BadResponse {
                endpoint,
                code: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed: BookmarkResponse = serde_json::from_str(&body)
            .map_err(|source| ApiError::JsonParseFailed {
                endpoint: endpoint.clone(),
                source,
            })?;
        debug!("收藏接口返回: {:?}", parsed.status);
        Ok(parsed.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// 只响应一次的本地 HTTP 服务，返回收到的原始请求
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn posts_to_quiz_endpoint_and_parses_status() {
        let (base_url, server) = serve_once("200 OK", r#"{"status":"added"}"#).await;
        let client = HttpBookmarkClient::with_client(reqwest::Client::new(), &base_url);

        let status = client.toggle_bookmark(42).await.unwrap();
        assert_eq!(status, BookmarkStatus::Added);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /quiz/42/bookmark HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn error_status_carries_server_message() {
        let (base_url, server) =
            serve_once("403 Forbidden", r#"{"error":"Access denied"}"#).await;
        let client = HttpBookmarkClient::with_client(reqwest::Client::new(), &base_url);

        let err = client.toggle_bookmark(7).await.unwrap_err();
        match err {
            AppError::Api(ApiError::BadResponse { code, message, .. }) => {
                assert_eq!(code, 403);
                assert_eq!(message.as_deref(), Some("Access denied"));
            }
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let (base_url, server) = serve_once("200 OK", "<html>login</html>").await;
        let client = HttpBookmarkClient::with_client(reqwest::Client::new(), &base_url);

        let err = client.toggle_bookmark(1).await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::JsonParseFailed { .. })));
        server.await.unwrap();
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = HttpBookmarkClient::with_client(reqwest::Client::new(), "http://quiz.local/");
        assert_eq!(client.endpoint(5), "http://quiz.local/quiz/5/bookmark");
    }
}
