use crate::charts::ChartBinder;
use crate::controller::{Route, TableState, View};
use crate::models::{Feedback, LoginRequest, RegisterRequest, Sentiment, SentimentFilter, SentimentSummary};
use crate::notify::{Message, MessageArea};
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::time::Duration;

const LOGIN_REQUIRED_TEXT: &str = "You must be logged in to view your history. Please login at /login.";
const ACCESS_DENIED_TEXT: &str = "Access Denied: you must be logged in as an administrator to view this page.";

#[derive(Debug)]
pub struct PageModel {
    pub route: Route,
    pub register: RegisterRequest,
    pub login: LoginRequest,
    pub feedback_input: String,
    pub filter: SentimentFilter,
    /// Answer given to every confirmation prompt.
    pub confirm_answer: bool,
    pub prompts: Vec<String>,
    pub last_sentiment: Option<Sentiment>,
    pub history_link_visible: bool,
    pub history_heading: Option<String>,
    pub history: TableState,
    pub feedback_table: TableState,
    pub stat_cards: Option<SentimentSummary>,
    pub access_denied: bool,
    pub pending_redirect: Option<(Route, Duration)>,
    pub chart_redraws: u32,
    pub messages: Arc<MessageArea>,
}

impl PageModel {
    pub fn new(route: Route, messages: Arc<MessageArea>) -> Self {
        Self {
            route,
            register: RegisterRequest::default(),
            login: LoginRequest::default(),
            feedback_input: String::new(),
            filter: SentimentFilter::All,
            confirm_answer: false,
            prompts: Vec::new(),
            last_sentiment: None,
            history_link_visible: false,
            history_heading: None,
            history: TableState::default(),
            feedback_table: TableState::default(),
            stat_cards: None,
            access_denied: false,
            pending_redirect: None,
            chart_redraws: 0,
            messages,
        }
    }

    /// The message currently visible in the message area.
    pub fn message(&self) -> Option<Message> {
        self.messages.visible()
    }

    /// History table body, one line per row: date, message, sentiment.
    pub fn history_lines(&self) -> Vec<String> {
        table_lines(&self.history, "Loading history...", |row| {
            format!(
                "{} | {} | {}",
                display_timestamp(&row.timestamp),
                row.message,
                row.sentiment
            )
        })
    }

    /// Admin table body, one line per row: name, message, sentiment, time, id.
    pub fn feedback_lines(&self) -> Vec<String> {
        if self.access_denied {
            return vec![ACCESS_DENIED_TEXT.to_string()];
        }
        table_lines(&self.feedback_table, "Loading feedback...", |row| {
            format!(
                "{} | {} | {} | {} | delete #{}",
                row.user_name.as_deref().unwrap_or("Guest"),
                row.message,
                row.sentiment,
                display_timestamp(&row.timestamp),
                row.id
            )
        })
    }
}

fn table_lines(table: &TableState, loading: &str, row: impl Fn(&Feedback) -> String) -> Vec<String> {
    match table {
        TableState::Loading => vec![loading.to_string()],
        TableState::LoginRequired => vec![LOGIN_REQUIRED_TEXT.to_string()],
        TableState::Empty(text) | TableState::Failed(text) => vec![text.clone()],
        TableState::Rows(rows) => rows.iter().map(row).collect(),
    }
}

/// `2026-01-05T10:00:00.123456` -> `2026-01-05 10:00:00`; anything that does
/// not parse is shown as sent.
pub fn display_timestamp(raw: &str) -> String {
    raw.parse::<NaiveDateTime>()
        .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

impl View for PageModel {
    fn register_form(&self) -> RegisterRequest {
        self.register.clone()
    }

    fn login_form(&self) -> LoginRequest {
        self.login.clone()
    }

    fn feedback_input(&self) -> String {
        self.feedback_input.clone()
    }

    fn sentiment_filter(&self) -> SentimentFilter {
        self.filter
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }

    fn clear_register_form(&mut self) {
        self.register = RegisterRequest::default();
    }

    fn clear_feedback_input(&mut self) {
        self.feedback_input.clear();
    }

    fn show_sentiment(&mut self, sentiment: Sentiment) {
        self.last_sentiment = Some(sentiment);
    }

    fn show_history_link(&mut self, visible: bool) {
        self.history_link_visible = visible;
    }

    fn set_history_heading(&mut self, heading: &str) {
        self.history_heading = Some(heading.to_string());
    }

    fn render_history(&mut self, table: TableState) {
        self.history = table;
    }

    fn render_feedback_table(&mut self, table: TableState) {
        self.feedback_table = table;
    }

    fn render_stat_cards(&mut self, summary: &SentimentSummary) {
        self.stat_cards = Some(*summary);
    }

    fn deny_admin_access(&mut self) {
        self.access_denied = true;
    }

    fn schedule_redirect(&mut self, route: Route, delay: Duration) {
        self.pending_redirect = Some((route, delay));
    }

    fn navigate(&mut self, route: Route) {
        self.pending_redirect = None;
        self.route = route;
    }

    fn charts_changed(&mut self, _charts: &ChartBinder) {
        self.chart_redraws += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, user_name: Option<&str>) -> Feedback {
        Feedback {
            id,
            user_name: user_name.map(str::to_string),
            message: "Great service".into(),
            sentiment: Sentiment::Positive,
            timestamp: "2026-01-05T10:00:00.123456".into(),
        }
    }

    #[test]
    fn timestamps_are_shown_without_fraction() {
        assert_eq!(display_timestamp("2026-01-05T10:00:00.123456"), "2026-01-05 10:00:00");
        assert_eq!(display_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn table_lines_follow_state() {
        let mut page = PageModel::new(Route::History, Arc::new(MessageArea::new()));
        assert_eq!(page.history_lines(), vec!["Loading history..."]);

        page.render_history(TableState::Rows(vec![row(1, None)]));
        assert_eq!(
            page.history_lines(),
            vec!["2026-01-05 10:00:00 | Great service | Positive"]
        );

        page.render_feedback_table(TableState::Rows(vec![row(4, Some("Ana")), row(5, None)]));
        let lines = page.feedback_lines();
        assert_eq!(lines[0], "Ana | Great service | Positive | 2026-01-05 10:00:00 | delete #4");
        assert!(lines[1].starts_with("Guest |"));
    }

    #[test]
    fn navigate_cancels_pending_redirect() {
        let mut page = PageModel::new(Route::Login, Arc::new(MessageArea::new()));
        page.schedule_redirect(Route::Feedback, Duration::from_millis(1500));
        page.navigate(Route::Home);
        assert!(page.pending_redirect.is_none());
        assert_eq!(page.route, Route::Home);
    }
}
