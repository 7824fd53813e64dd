//! Session configuration shared by every request of a probe run.

/// Identifying agent string sent with every request.
pub const USER_AGENT: &str = "suiknit-test-client/1.0";

/// Bearer token plus the fixed headers derived from it.
///
/// The token is opaque and never validated locally; a bad token simply
/// shows up as 401s in the report.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    token: String,
}

impl SessionConfig {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn default_headers(&self) -> Vec<(String, String)> {
        vec![
            ("authorization".to_string(), format!("Bearer {}", self.token)),
            ("accept".to_string(), "application/json".to_string()),
            ("content-type".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
        ]
    }
}
