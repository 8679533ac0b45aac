use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Chart and table order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Positive" => Ok(Sentiment::Positive),
            "Negative" => Ok(Sentiment::Negative),
            "Neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment '{other}'")),
        }
    }
}

/// Admin table filter. `All` is the select's default entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentimentFilter {
    #[default]
    All,
    Only(Sentiment),
}

impl SentimentFilter {
    pub fn matches(self, sentiment: Sentiment) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::Only(wanted) => wanted == sentiment,
        }
    }

    /// Query string for `/all_feedback`, empty for `All`.
    pub fn query(self) -> String {
        match self {
            SentimentFilter::All => String::new(),
            SentimentFilter::Only(sentiment) => format!("?sentiment={sentiment}"),
        }
    }
}

impl fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentFilter::All => f.write_str("All"),
            SentimentFilter::Only(sentiment) => f.write_str(sentiment.as_str()),
        }
    }
}

impl FromStr for SentimentFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "All" => Ok(SentimentFilter::All),
            other => other.parse().map(SentimentFilter::Only),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "guest" => Ok(Role::Guest),
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err("role must be 'guest', 'user' or 'admin'".to_string()),
        }
    }
}

/// Per-category counts. Missing fields decode as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SentimentSummary {
    #[serde(rename = "Positive", default)]
    pub positive: u64,
    #[serde(rename = "Negative", default)]
    pub negative: u64,
    #[serde(rename = "Neutral", default)]
    pub neutral: u64,
}

impl SentimentSummary {
    pub fn count(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        let slot = match sentiment {
            Sentiment::Positive => &mut self.positive,
            Sentiment::Negative => &mut self.negative,
            Sentiment::Neutral => &mut self.neutral,
        };
        *slot = slot.saturating_add(1);
    }

    /// Values in `Sentiment::ALL` order.
    pub fn values(&self) -> [u64; 3] {
        Sentiment::ALL.map(|sentiment| self.count(sentiment))
    }

    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.neutral)
    }
}

// Persisted backend data.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub salt: String,
    pub password_digest: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: u64,
    pub user_id: Option<u64>,
    pub message: String,
    pub sentiment: Sentiment,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub feedback: Vec<FeedbackRecord>,
    #[serde(default)]
    pub last_user_id: u64,
    #[serde(default)]
    pub last_feedback_id: u64,
}

// Wire shapes.

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SentimentResponse {
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

/// A feedback row as served by the listing endpoints. History rows carry no
/// `user_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub message: String,
    pub sentiment: Sentiment,
    pub timestamp: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct FeedbackQuery {
    pub sentiment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_missing_fields_default_to_zero() {
        let summary: SentimentSummary = serde_json::from_str(r#"{"Positive": 4}"#).unwrap();
        assert_eq!(summary.values(), [4, 0, 0]);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn filter_query_strings() {
        assert_eq!(SentimentFilter::All.query(), "");
        let neutral: SentimentFilter = "Neutral".parse().unwrap();
        assert_eq!(neutral.query(), "?sentiment=Neutral");
        assert!("Mixed".parse::<SentimentFilter>().is_err());
    }

    #[test]
    fn role_parses_blank_as_guest_and_rejects_unknown() {
        assert_eq!("".parse::<Role>().unwrap(), Role::Guest);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn history_rows_omit_user_name() {
        let row = Feedback {
            id: 1,
            user_name: None,
            message: "ok".into(),
            sentiment: Sentiment::Neutral,
            timestamp: "2026-01-05T10:00:00".into(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert!(value.get("user_name").is_none());
        assert_eq!(value["sentiment"], "Neutral");
    }
}
