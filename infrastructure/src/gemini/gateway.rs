//! Gemini judge gateway implementation

use super::credentials::ApiKey;
use super::protocol::{GenerateContentRequest, GenerateContentResponse, error_message};
use async_trait::async_trait;
use judge_application::ports::judge_gateway::{GatewayError, JudgeGateway};
use judge_domain::JudgeModel;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

/// Public Gemini API host
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Connection settings for [`GeminiJudgeGateway`]
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub api_key: ApiKey,
    pub temperature: f32,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl GeminiSettings {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            temperature: 0.0,
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

/// Judge gateway backed by the Gemini `generateContent` REST API.
///
/// One request per evaluation, no retries.
pub struct GeminiJudgeGateway {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiJudgeGateway {
    pub fn new(settings: GeminiSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .user_agent(concat!("gemini-judge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        info!(base_url = %settings.base_url, "GeminiJudgeGateway initialized");

        Ok(Self { client, settings })
    }

    fn endpoint(&self, model: JudgeModel) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model.as_str()
        )
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Connection(e.to_string())
    }
}

fn map_status(status: StatusCode, body: &str) -> GatewayError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(message),
        _ => GatewayError::RequestFailed {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl JudgeGateway for GeminiJudgeGateway {
    async fn evaluate(&self, prompt: &str, model: JudgeModel) -> Result<String, GatewayError> {
        if prompt.trim().is_empty() {
            return Err(GatewayError::InvalidPrompt);
        }

        let url = self.endpoint(model);
        let body = GenerateContentRequest::from_prompt(prompt, self.settings.temperature);
        debug!(model = %model, "POST {} ({} prompt bytes)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.settings.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            debug!(model = %model, status = status.as_u16(), "Judge request rejected");
            return Err(map_status(status, &text));
        }

        let reply: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(format!("undecodable body: {e}")))?;

        reply
            .text()
            .ok_or_else(|| GatewayError::InvalidResponse(reply.missing_text_reason()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FLASH_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn gateway(server: &MockServer) -> GeminiJudgeGateway {
        let settings = GeminiSettings::new(ApiKey::new("test-key").unwrap())
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(500));
        GeminiJudgeGateway::new(settings).unwrap()
    }

    fn reply(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_evaluate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "judge this"}]}],
                "generationConfig": {"temperature": 0.0}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("Total Rating: 4")))
            .expect(1)
            .mount(&server)
            .await;

        let text = gateway(&server)
            .evaluate("judge this", JudgeModel::Gemini25Flash)
            .await
            .unwrap();
        assert_eq!(text, "Total Rating: 4");
    }

    #[tokio::test]
    async fn test_model_selects_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let text = gateway(&server)
            .evaluate("p", JudgeModel::Gemini25Pro)
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("ok")))
            .expect(0)
            .mount(&server)
            .await;

        let err = gateway(&server)
            .evaluate("  \n", JudgeModel::Gemini25Flash)
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::InvalidPrompt);
    }

    #[tokio::test]
    async fn test_authentication_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "Permission denied.", "status": "PERMISSION_DENIED"}
            })))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .evaluate("p", JudgeModel::Gemini25Flash)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Authentication("Permission denied.".to_string())
        );
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .evaluate("p", JudgeModel::Gemini25Flash)
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::RateLimited("slow down".to_string()));
    }

    #[tokio::test]
    async fn test_server_error_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
            })))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .evaluate("p", JudgeModel::Gemini25Flash)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::RequestFailed {
                status: 503,
                message: "The model is overloaded.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .evaluate("p", JudgeModel::Gemini25Flash)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(msg) if msg.contains("SAFETY")));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .evaluate("p", JudgeModel::Gemini25Flash)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply("late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = gateway(&server)
            .evaluate("p", JudgeModel::Gemini25Flash)
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let settings = GeminiSettings::new(ApiKey::new("k").unwrap())
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2));
        let err = GeminiJudgeGateway::new(settings)
            .unwrap()
            .evaluate("p", JudgeModel::Gemini25Flash)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Connection(_)));
    }
}
