//! Error type for API calls with status-aware messages.

use reqwest::StatusCode;

/// Errors returned by the knowledgebase API client.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    Http { status: u16, body: String },
    /// Connection failure, timeout, or an undecodable response body.
    Transport(reqwest::Error),
    /// Rejected locally before any request was sent.
    InvalidInput(String),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidInput(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// Response body of a failed request; empty for non-HTTP errors.
    pub fn body(&self) -> &str {
        match self {
            ApiError::Http { body, .. } => body,
            _ => "",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http { status, body } => {
                let detail = body.trim();
                let summary = match StatusCode::from_u16(*status) {
                    Ok(StatusCode::UNAUTHORIZED) => {
                        "Authentication failed. Check your API key".to_string()
                    }
                    Ok(StatusCode::FORBIDDEN) => {
                        "Access forbidden. Your API key may lack access to this resource"
                            .to_string()
                    }
                    Ok(StatusCode::NOT_FOUND) => "Not found".to_string(),
                    Ok(StatusCode::TOO_MANY_REQUESTS) => {
                        "Rate limit exceeded. Try again later".to_string()
                    }
                    Ok(s) if s.is_server_error() => "Server error".to_string(),
                    _ => "Request failed".to_string(),
                };
                if detail.is_empty() {
                    write!(f, "HTTP {}: {}", status, summary)
                } else {
                    write!(f, "HTTP {}: {}: {}", status, summary, detail)
                }
            }
            ApiError::Transport(e) => {
                if e.is_decode() {
                    write!(f, "Failed to parse JSON response: {}", e)
                } else if e.is_timeout() {
                    write!(f, "Request timed out: {}", e)
                } else {
                    write!(f, "Failed to send request: {}", e)
                }
            }
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> ApiError {
        ApiError::Http {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_http_error_display_includes_status() {
        let err = http(500, "internal failure");
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("Server error"));
        assert!(msg.contains("internal failure"));
    }

    #[test]
    fn test_http_error_display_classified() {
        assert!(http(401, "").to_string().contains("API key"));
        assert!(http(403, "").to_string().contains("forbidden"));
        assert!(http(404, "").to_string().contains("Not found"));
        assert!(http(429, "").to_string().contains("Rate limit"));
        assert_eq!(http(418, "").to_string(), "HTTP 418: Request failed");
    }

    #[test]
    fn test_http_error_accessors() {
        let err = http(404, "{\"error\":\"unknown kb\"}");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(err.body(), "{\"error\":\"unknown kb\"}");

        let err = http(500, "");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_input_has_no_status() {
        let err = ApiError::InvalidInput("knowledgebase name is empty".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), "");
        assert!(err.to_string().contains("knowledgebase name is empty"));
    }

    #[tokio::test]
    async fn test_transport_error_from_refused_connection() {
        // Grab a free port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = reqwest::Client::new()
            .get(format!("http://{}/", addr))
            .send()
            .await;
        let err = ApiError::from(result.unwrap_err());

        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().contains("Failed to send request"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
