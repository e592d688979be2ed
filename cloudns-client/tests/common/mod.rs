//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cloudns_client::{
    Client, ErrorKind, HttpRequest, HttpResponse, HttpTransport, Record, RecordData, Result,
};
use serde_json::Value;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 预设响应的模拟传输层，记录所有发出的请求
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 追加一个 200 响应
    pub fn respond(&self, body: impl Into<String>) -> &Self {
        self.push(Ok(HttpResponse {
            status: 200,
            body: body.into(),
        }))
    }

    /// 追加一个传输层错误
    pub fn fail(&self, message: &'static str) -> &Self {
        self.push(Err(ErrorKind::HttpRequest.wrap(message)))
    }

    fn push(&self, response: Result<HttpResponse>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// 已发出的请求（按顺序）
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// 尚未消费的预设响应数量
    pub fn pending(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request);

        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ErrorKind::HttpRequest.wrap("no scripted response left")))
    }
}

/// 使用模拟传输层和主账号凭据创建客户端
pub fn mock_client(transport: &Arc<MockTransport>) -> Client {
    Client::builder()
        .auth_user_id(1234, "secret")
        .transport(transport.clone())
        .build()
        .expect("mock client must build")
}

/// 请求的路径（不含 base URL 和 query）
pub fn endpoint(request: &HttpRequest) -> String {
    let path = request
        .url
        .strip_prefix(cloudns_client::DEFAULT_BASE_URL)
        .unwrap_or(&request.url);
    path.split('?').next().unwrap_or_default().to_string()
}

/// 解析 JSON 请求体
pub fn body(request: &HttpRequest) -> Value {
    serde_json::from_str(request.body.as_deref().unwrap_or("null")).expect("request body is JSON")
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 在线测试上下文 - 封装客户端和测试域名
pub struct TestContext {
    pub client: Client,
    pub domain: String,
}

impl TestContext {
    /// 从环境变量创建（`CLOUDNS_AUTH_ID`、`CLOUDNS_AUTH_PASSWORD`、`TEST_DOMAIN`）
    pub fn from_env() -> Option<Self> {
        let auth_id = env::var("CLOUDNS_AUTH_ID").ok()?.parse().ok()?;
        let password = env::var("CLOUDNS_AUTH_PASSWORD").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let client = Client::builder()
            .auth_user_id(auth_id, password)
            .build()
            .ok()?;

        Some(Self { client, domain })
    }

    /// 创建测试 TXT 记录并返回其 id
    pub async fn create_test_record(&self) -> Option<(String, u64)> {
        let host = generate_test_record_name();
        let record = Record::new(
            host.clone(),
            3600,
            RecordData::TXT {
                text: "integration-test".to_string(),
            },
        );

        let result = self
            .client
            .records()
            .create(&self.domain, &record)
            .await
            .ok()?;
        Some((host, result.id()?))
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, id: u64) {
        let _ = self.client.records().delete(&self.domain, id).await;
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self.client.records().list(&self.domain).await {
            for record in records {
                if record.host.starts_with("_test-")
                    && let Some(id) = record.id
                {
                    self.cleanup_record(id).await;
                }
            }
        }
    }
}
