use crate::{
    errors::{ChatError, ChatResult},
    logging::log_api_call,
    models::{ApiCallLog, AskRequest},
};
use chrono::Utc;
use futures::{future::BoxFuture, stream::BoxStream, StreamExt, TryStreamExt};
use reqwest::{header, Client};
use std::time::Instant;

/// Raw body chunks of one answer, in arrival order.
pub type AnswerStream = BoxStream<'static, ChatResult<Vec<u8>>>;

/// Sends a question and hands back the answer body as a byte stream.
pub trait Transport: Send + Sync {
    fn ask(&self, question: String) -> BoxFuture<'static, ChatResult<AnswerStream>>;
}

/// Posts questions to the `/ask` endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Transport for HttpTransport {
    fn ask(&self, question: String) -> BoxFuture<'static, ChatResult<AnswerStream>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        Box::pin(async move {
            let summary = format!("ask ({} chars)", question.chars().count());
            let start_time = Instant::now();

            let response = client
                .post(&endpoint)
                .header(header::CONTENT_TYPE, "application/json")
                .json(&AskRequest { question })
                .send()
                .await?;

            let status = response.status();
            log_api_call(&ApiCallLog {
                timestamp: Utc::now(),
                endpoint: endpoint.clone(),
                request_summary: summary,
                response_status: status.as_u16(),
                response_time_ms: start_time.elapsed().as_millis(),
            });

            // The body is rendered whatever the status; the server decides what the user sees.
            if !status.is_success() {
                log::warn!("{} answered with status {}", endpoint, status);
            }

            let body = response
                .bytes_stream()
                .map_ok(|bytes| bytes.to_vec())
                .map_err(ChatError::from)
                .boxed();

            Ok(body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn collect(stream: AnswerStream) -> ChatResult<Vec<u8>> {
        stream
            .try_fold(Vec::new(), |mut acc, chunk| async move {
                acc.extend_from_slice(&chunk);
                Ok(acc)
            })
            .await
    }

    #[tokio::test]
    async fn test_ask_posts_question_as_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "question": "What is 2+2?" })))
            .respond_with(ResponseTemplate::new(200).set_body_string("4"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(format!("{}/ask", mock_server.uri()));
        let stream = transport.ask("What is 2+2?".to_string()).await.unwrap();

        assert_eq!(collect(stream).await.unwrap(), b"4");
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_streamed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream failed"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(format!("{}/ask", mock_server.uri()));
        let stream = transport.ask("anything".to_string()).await.unwrap();

        assert_eq!(collect(stream).await.unwrap(), b"upstream failed");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = HttpTransport::new(format!("http://127.0.0.1:{}/ask", port));
        let result = transport.ask("hello".to_string()).await;

        assert!(matches!(result, Err(ChatError::Request(_))));
    }
}
