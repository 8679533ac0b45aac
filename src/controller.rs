use crate::api_client::{ApiClient, Transport};
use crate::charts::{ChartBinder, ChartSpec, ADMIN_BAR_CANVAS, ADMIN_PIE_CANVAS, FEEDBACK_CANVAS};
use crate::models::{
    Feedback, LoginRequest, RegisterRequest, Sentiment, SentimentFilter, SentimentSummary,
};
use crate::notify::{Message, Notifier};
use crate::session::{Session, SessionProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Delay before following a redirect after register or login.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Register,
    Login,
    Feedback,
    History,
    Admin,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Register => "/register",
            Route::Login => "/login",
            Route::Feedback => "/feedback",
            Route::History => "/history",
            Route::Admin => "/admin",
        }
    }
}

/// Content of a feedback table body. Every render replaces the previous one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TableState {
    #[default]
    Loading,
    LoginRequired,
    Empty(String),
    Rows(Vec<Feedback>),
    Failed(String),
}

/// A render target: where inputs come from and results go.
pub trait View {
    fn register_form(&self) -> RegisterRequest;
    fn login_form(&self) -> LoginRequest;
    fn feedback_input(&self) -> String;
    fn sentiment_filter(&self) -> SentimentFilter;
    fn confirm(&mut self, prompt: &str) -> bool;

    fn clear_register_form(&mut self);
    fn clear_feedback_input(&mut self);
    fn show_sentiment(&mut self, sentiment: Sentiment);
    fn show_history_link(&mut self, visible: bool);
    fn set_history_heading(&mut self, heading: &str);
    fn render_history(&mut self, table: TableState);
    fn render_feedback_table(&mut self, table: TableState);
    fn render_stat_cards(&mut self, summary: &SentimentSummary);
    fn deny_admin_access(&mut self);
    fn schedule_redirect(&mut self, route: Route, delay: Duration);
    fn navigate(&mut self, route: Route);

    /// Called after the chart registry changed so the target can redraw.
    fn charts_changed(&mut self, _charts: &ChartBinder) {}
}

pub struct ViewController<T, S, V> {
    api: ApiClient<T>,
    session: S,
    view: V,
    page: Route,
    notifier: Arc<dyn Notifier + Send + Sync>,
    charts: ChartBinder,
}

impl<T, S, V> ViewController<T, S, V>
where
    T: Transport,
    S: SessionProvider,
    V: View,
{
    pub fn new(api: ApiClient<T>, session: S, view: V, page: Route) -> Self {
        let notifier = api.notifier();
        Self {
            api,
            session,
            view,
            page,
            notifier,
            charts: ChartBinder::new(),
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn charts(&self) -> &ChartBinder {
        &self.charts
    }

    /// Page initialisation.
    pub async fn load(&mut self) {
        match self.page {
            Route::Feedback => {
                let signed_in = self.session.get().is_some();
                self.view.show_history_link(signed_in);
                self.refresh_charts(false).await;
            }
            Route::History => self.load_history().await,
            Route::Admin => {
                if self.admin_gate() {
                    self.refresh_charts(true).await;
                    let filter = self.view.sentiment_filter();
                    self.fetch_all_feedback(filter).await;
                }
            }
            Route::Home | Route::Register | Route::Login => {}
        }
    }

    pub async fn submit_register(&mut self) {
        let form = self.view.register_form();
        let Ok(response) = self.api.register(&form).await else {
            return;
        };

        let text = response
            .message
            .unwrap_or_else(|| "Registration successful! Redirecting to login.".to_string());
        self.notifier.notify(Message::success(text));
        self.view.clear_register_form();
        self.view.schedule_redirect(Route::Login, REDIRECT_DELAY);
    }

    pub async fn submit_login(&mut self) {
        let form = self.view.login_form();
        let Ok(response) = self.api.login(&form).await else {
            return;
        };
        let Some(user) = response.user else {
            warn!("login succeeded without a user in the response");
            self.notifier
                .notify(Message::error("Login response did not include a user."));
            return;
        };

        let session = Session::from(user);
        let target = if session.is_admin() {
            Route::Admin
        } else {
            Route::Feedback
        };
        self.notifier.notify(Message::success(format!(
            "Welcome back, {}! Logging you in...",
            session.name
        )));
        self.session.set(session);
        self.view.schedule_redirect(target, REDIRECT_DELAY);
    }

    pub async fn submit_feedback(&mut self) {
        let input = self.view.feedback_input();
        let message = input.trim();
        if message.is_empty() {
            debug!("ignoring empty feedback submission");
            return;
        }

        let session = self.session.get();
        let Ok(response) = self
            .api
            .submit_feedback(message, session.as_ref().map(|s| s.id))
            .await
        else {
            return;
        };

        let label = response
            .sentiment
            .map(Sentiment::as_str)
            .unwrap_or("Unknown");
        let mut notice = Message::success(format!(
            "Feedback submitted! Sentiment analyzed as: {label}."
        ));
        if session.is_some() {
            notice = notice.with_link("View your history", Route::History);
        }
        self.notifier.notify(notice);
        self.view.clear_feedback_input();
        if let Some(sentiment) = response.sentiment {
            self.view.show_sentiment(sentiment);
        }

        self.refresh_charts(false).await;
    }

    pub async fn load_history(&mut self) {
        let Some(session) = self.session.get() else {
            self.view.render_history(TableState::LoginRequired);
            return;
        };

        self.view
            .set_history_heading(&format!("{}'s Feedback History", session.name));
        self.view.render_history(TableState::Loading);

        let table = match self.api.history(session.id).await {
            Ok(rows) if rows.is_empty() => {
                TableState::Empty("You have not submitted any feedback yet.".to_string())
            }
            Ok(rows) => TableState::Rows(rows),
            Err(err) => {
                warn!("failed to fetch feedback history: {err}");
                TableState::Failed("Error fetching your feedback history.".to_string())
            }
        };
        self.view.render_history(table);
    }

    /// Fetches the summary once and pushes it into every chart on the page.
    /// On failure the previous charts stay as they were.
    pub async fn refresh_charts(&mut self, update_stats: bool) {
        let targets = chart_targets(self.page);
        if targets.is_empty() {
            return;
        }

        let summary = match self.api.summary().await {
            Ok(summary) => summary,
            Err(err) => {
                warn!("could not load sentiment summary for charts: {err}");
                return;
            }
        };

        if update_stats {
            self.view.render_stat_cards(&summary);
        }
        for &(canvas, spec) in targets {
            self.charts.render_summary(canvas, spec(), &summary);
        }
        self.view.charts_changed(&self.charts);
    }

    /// Handler for the admin filter select.
    pub async fn change_filter(&mut self) {
        if !self.admin_gate() {
            return;
        }
        let filter = self.view.sentiment_filter();
        self.fetch_all_feedback(filter).await;
    }

    /// Replaces the admin table with the feedback matching `filter`.
    pub async fn fetch_all_feedback(&mut self, filter: SentimentFilter) {
        self.view.render_feedback_table(TableState::Loading);

        let result = self.api.all_feedback(filter).await;
        // Row charts belong to the table body being replaced.
        self.charts
            .render_row_charts(result.as_deref().unwrap_or_default());
        self.view.charts_changed(&self.charts);

        let table = match result {
            Ok(rows) if rows.is_empty() => TableState::Empty(match filter {
                SentimentFilter::All => "No feedback found.".to_string(),
                SentimentFilter::Only(sentiment) => format!("No {sentiment} feedback found."),
            }),
            Ok(rows) => TableState::Rows(rows),
            Err(err) => {
                warn!("failed to fetch all feedback: {err}");
                TableState::Failed("Failed to load feedback data.".to_string())
            }
        };
        self.view.render_feedback_table(table);
    }

    pub async fn delete_feedback(&mut self, id: u64) {
        if !self.admin_gate() {
            return;
        }
        let prompt = format!("Are you sure you want to permanently delete feedback ID: {id}?");
        if !self.view.confirm(&prompt) {
            return;
        }

        match self.api.delete_feedback(id).await {
            Ok(response) => {
                let text = response
                    .message
                    .unwrap_or_else(|| format!("Feedback ID {id} deleted."));
                self.notifier.notify(Message::success(text));
                let filter = self.view.sentiment_filter();
                self.fetch_all_feedback(filter).await;
                self.refresh_charts(true).await;
            }
            Err(err) => warn!("failed to delete feedback {id}: {err}"),
        }
    }

    pub fn logout(&mut self) {
        self.session.clear();
        self.view.navigate(Route::Home);
    }

    /// Client-side role check for the admin page. Purely cosmetic: the API
    /// itself does not enforce it.
    fn admin_gate(&mut self) -> bool {
        let allowed = self.session.get().is_some_and(|session| session.is_admin());
        if !allowed {
            self.view.deny_admin_access();
        }
        allowed
    }
}

type ChartTarget = (&'static str, fn() -> ChartSpec);

const FEEDBACK_CHARTS: &[ChartTarget] = &[(FEEDBACK_CANVAS, ChartSpec::feedback_pie)];
const ADMIN_CHARTS: &[ChartTarget] = &[
    (ADMIN_PIE_CANVAS, ChartSpec::admin_pie),
    (ADMIN_BAR_CANVAS, ChartSpec::admin_bar),
];

fn chart_targets(page: Route) -> &'static [ChartTarget] {
    match page {
        Route::Feedback => FEEDBACK_CHARTS,
        Route::Admin => ADMIN_CHARTS,
        _ => &[],
    }
}
