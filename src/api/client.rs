use super::types::*;
use super::utils::{check_response_status, fetch_with_retry};
use super::{ApiRequest, Transport};
use crate::error::{RestavoError, Result};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde_json::json;

pub const CHAT_FALLBACK_ERROR: &str = "Sorry, something went wrong while handling your request.";

/// Typed access to the backend endpoints. Only `chat` goes through the backoff fetcher;
/// everything else fails on the first non-2xx.
pub struct BackendClient<T: Transport> {
    transport: T,
    max_chat_attempts: u32,
}

impl<T: Transport> BackendClient<T> {
    pub fn new(transport: T, max_chat_attempts: u32) -> Self {
        Self {
            transport,
            max_chat_attempts,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let response = self.transport.send(&request).await?;
        let response = check_response_status(response)?;
        response.json()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.call(ApiRequest::post("/login", json!(credentials)))
            .await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<MessageResponse> {
        self.call(ApiRequest::post("/register", json!(credentials)))
            .await
    }

    pub async fn logout(&self) -> Result<MessageResponse> {
        self.call(ApiRequest::post_empty("/logout")).await
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        self.call(ApiRequest::get("/status")).await
    }

    pub async fn toggle_favorite(
        &self,
        request: &ToggleFavoriteRequest,
    ) -> Result<ToggleFavoriteResponse> {
        self.call(ApiRequest::post("/favorites/toggle", json!(request)))
            .await
    }

    pub async fn favorites(&self) -> Result<Vec<FavoriteRecord>> {
        self.call(ApiRequest::get("/favorites")).await
    }

    pub async fn create_booking(&self, request: &BookingRequest) -> Result<CreateBookingResponse> {
        self.call(ApiRequest::post("/booking", json!(request)))
            .await
    }

    pub async fn bookings(&self) -> Result<Vec<BookingRecord>> {
        self.call(ApiRequest::get("/bookings")).await
    }

    pub async fn cancel_booking(&self, booking_id: i64) -> Result<MessageResponse> {
        self.call(ApiRequest::delete(format!("/booking/{}", booking_id)))
            .await
    }

    pub async fn analyze_booking(&self, booking_id: i64) -> Result<BookingAnalysis> {
        self.call(ApiRequest::post(
            "/gemini/analyze",
            json!(AnalyzeRequest { booking_id }),
        ))
        .await
    }

    /// Relay a single prompt to the assistant.
    ///
    /// A non-2xx reply that still carries a `response` text comes back as `ServerRejected`
    /// with that text as the message; otherwise the message is the generic fallback.
    /// A body that is not JSON at all is a `Json` error, whatever the status.
    pub async fn chat<R: Rng>(&self, prompt: &str, rng: &mut R) -> Result<String> {
        let request = ApiRequest::post(
            "/gemini/chat",
            json!(ChatRequest {
                prompt: prompt.to_string()
            }),
        );
        let response =
            fetch_with_retry(&self.transport, &request, self.max_chat_attempts, rng).await?;

        let body: ChatResponse = response.json()?;
        let text = body.response.filter(|t| !t.trim().is_empty());

        match text {
            Some(text) if response.is_success() => Ok(text),
            Some(text) => Err(RestavoError::ServerRejected {
                status: response.status,
                message: text,
            }),
            None => {
                tracing::warn!(status = response.status, "Chat reply had no response text");
                Err(RestavoError::ServerRejected {
                    status: response.status,
                    message: CHAT_FALLBACK_ERROR.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockReply, MockTransport};
    use crate::api::Method;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn client() -> BackendClient<MockTransport> {
        BackendClient::new(MockTransport::new(), 5)
    }

    #[tokio::test]
    async fn test_login_sends_credentials() {
        let client = client();
        client.transport().script(
            "POST /login",
            MockReply::ok(json!({"message": "Welcome", "user_id": 3, "username": "amal@example.com"})),
        );

        let response = client
            .login(&Credentials {
                username: "amal@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.user_id, 3);
        let sent = client.transport().requests_to("POST /login");
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].body,
            Some(json!({"username": "amal@example.com", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_rejection_surfaces_server_message() {
        let client = client();
        client.transport().script(
            "POST /login",
            MockReply::status(401, r#"{"message": "Wrong username or password"}"#),
        );

        let result = client
            .login(&Credentials {
                username: "a".to_string(),
                password: "b".to_string(),
            })
            .await;

        match result {
            Err(RestavoError::ServerRejected { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Wrong username or password");
            }
            other => panic!("Expected ServerRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried_outside_chat() {
        let client = client();
        client
            .transport()
            .script("GET /bookings", MockReply::status(429, "{}"));

        let result = client.bookings().await;

        assert!(matches!(
            result,
            Err(RestavoError::ServerRejected { status: 429, .. })
        ));
        assert_eq!(client.transport().call_count("GET /bookings"), 1);
    }

    #[tokio::test]
    async fn test_cancel_booking_path() {
        let client = client();
        client.transport().script(
            "DELETE /booking/42",
            MockReply::ok(json!({"message": "Booking cancelled"})),
        );

        let response = client.cancel_booking(42).await.unwrap();
        assert_eq!(response.message, "Booking cancelled");

        let sent = client.transport().requests();
        assert_eq!(sent[0].method, Method::Delete);
        assert!(sent[0].body.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_carries_only_prompt() {
        let client = client();
        client.transport().script(
            "POST /gemini/chat",
            MockReply::ok(json!({"response": "Try the Corniche at sunset."})),
        );

        let mut rng = StdRng::seed_from_u64(9);
        let reply = client.chat("What to do in Abu Dhabi?", &mut rng).await.unwrap();

        assert_eq!(reply, "Try the Corniche at sunset.");
        let sent = client.transport().requests_to("POST /gemini/chat");
        assert_eq!(sent[0].body, Some(json!({"prompt": "What to do in Abu Dhabi?"})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_non_json_body_is_json_error() {
        let client = client();
        client
            .transport()
            .script("POST /gemini/chat", MockReply::status(200, "<html>gateway</html>"));

        let mut rng = StdRng::seed_from_u64(12);
        let result = client.chat("hello", &mut rng).await;

        assert!(matches!(result, Err(RestavoError::Json(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_error_reply_text() {
        let client = client();
        client.transport().script(
            "POST /gemini/chat",
            MockReply::status(500, r#"{"response": "Assistant unavailable"}"#),
        );
        client.transport().script(
            "POST /gemini/chat",
            MockReply::status(400, r#"{"message": "Prompt required"}"#),
        );

        let mut rng = StdRng::seed_from_u64(10);
        let first = client.chat("hello", &mut rng).await;
        assert!(matches!(
            first,
            Err(RestavoError::ServerRejected { ref message, .. }) if message == "Assistant unavailable"
        ));

        let second = client.chat("hello", &mut rng).await;
        assert!(matches!(
            second,
            Err(RestavoError::ServerRejected { ref message, .. }) if message == CHAT_FALLBACK_ERROR
        ));
    }
}
