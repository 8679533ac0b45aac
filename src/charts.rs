use crate::models::{Feedback, Sentiment, SentimentSummary};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Feedback page pie chart.
pub const FEEDBACK_CANVAS: &str = "sentimentChart";
/// Admin distribution pie chart.
pub const ADMIN_PIE_CANVAS: &str = "sentimentPieChart";
/// Admin comparison bar chart.
pub const ADMIN_BAR_CANVAS: &str = "sentimentBarChart";

const ROW_CANVAS_PREFIX: &str = "chart-";

pub fn sentiment_color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "rgba(76, 175, 80, 0.8)",
        Sentiment::Negative => "rgba(244, 67, 54, 0.8)",
        Sentiment::Neutral => "rgba(255, 193, 7, 0.8)",
    }
}

pub fn sentiment_border_color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "rgba(76, 175, 80, 1)",
        Sentiment::Negative => "rgba(244, 67, 54, 1)",
        Sentiment::Neutral => "rgba(255, 193, 7, 1)",
    }
}

pub fn row_canvas_id(feedback_id: u64) -> String {
    format!("{ROW_CANVAS_PREFIX}{feedback_id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Top,
    Right,
    Hidden,
}

/// Construction-time settings; fixed for the life of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub legend: LegendPosition,
    pub title: Option<String>,
    pub dataset_label: Option<String>,
    pub bordered: bool,
    pub begin_at_zero: bool,
}

impl ChartSpec {
    pub fn feedback_pie() -> Self {
        Self {
            kind: ChartKind::Pie,
            legend: LegendPosition::Top,
            title: Some("Overall Feedback Sentiment Distribution".to_string()),
            dataset_label: None,
            bordered: false,
            begin_at_zero: false,
        }
    }

    pub fn admin_pie() -> Self {
        Self {
            kind: ChartKind::Pie,
            legend: LegendPosition::Right,
            title: None,
            dataset_label: None,
            bordered: false,
            begin_at_zero: false,
        }
    }

    pub fn admin_bar() -> Self {
        Self {
            kind: ChartKind::Bar,
            legend: LegendPosition::Hidden,
            title: None,
            dataset_label: Some("Total Count".to_string()),
            bordered: true,
            begin_at_zero: true,
        }
    }

    pub fn row_doughnut() -> Self {
        Self {
            kind: ChartKind::Doughnut,
            legend: LegendPosition::Hidden,
            title: None,
            dataset_label: None,
            bordered: false,
            begin_at_zero: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    Rendered,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Unique per construction; a rebuilt chart gets a new one.
    pub instance: u64,
    pub spec: ChartSpec,
    pub labels: [&'static str; 3],
    pub data: [u64; 3],
    pub background: [&'static str; 3],
    pub border: Option<[&'static str; 3]>,
    pub state: ChartState,
    pub redraws: u32,
}

impl Chart {
    pub fn total(&self) -> u64 {
        self.data.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("no chart is rendered on canvas '{0}'")]
    NotRendered(String),
}

#[derive(Debug, Default)]
pub struct ChartBinder {
    charts: BTreeMap<String, Chart>,
    next_instance: u64,
}

impl ChartBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs the chart on first use of `canvas`, otherwise replaces the
    /// dataset of the existing instance and redraws it.
    pub fn render(&mut self, canvas: &str, spec: ChartSpec, data: [u64; 3]) -> &Chart {
        if self.charts.contains_key(canvas) {
            self.apply(canvas, data);
        } else {
            self.construct(canvas, spec, data);
        }
        &self.charts[canvas]
    }

    pub fn render_summary(&mut self, canvas: &str, spec: ChartSpec, summary: &SentimentSummary) -> &Chart {
        self.render(canvas, spec, summary.values())
    }

    /// In-place dataset update. A destroyed or never-rendered canvas must be
    /// rendered again first.
    pub fn update(&mut self, canvas: &str, data: [u64; 3]) -> Result<&Chart, ChartError> {
        if !self.charts.contains_key(canvas) {
            return Err(ChartError::NotRendered(canvas.to_string()));
        }
        self.apply(canvas, data);
        Ok(&self.charts[canvas])
    }

    /// Destroys any existing instance, then constructs a fresh one.
    pub fn rebuild(&mut self, canvas: &str, spec: ChartSpec, data: [u64; 3]) -> &Chart {
        self.destroy(canvas);
        self.construct(canvas, spec, data);
        &self.charts[canvas]
    }

    pub fn destroy(&mut self, canvas: &str) -> Option<Chart> {
        let removed = self.charts.remove(canvas);
        if let Some(chart) = &removed {
            debug!(canvas, instance = chart.instance, "destroyed chart");
        }
        removed
    }

    /// Replaces every per-row mini chart with one doughnut per row. Row charts
    /// are never updated in place.
    pub fn render_row_charts(&mut self, rows: &[Feedback]) {
        self.charts.retain(|canvas, _| !canvas.starts_with(ROW_CANVAS_PREFIX));
        for row in rows {
            let data = Sentiment::ALL.map(|sentiment| u64::from(sentiment == row.sentiment));
            self.construct(&row_canvas_id(row.id), ChartSpec::row_doughnut(), data);
        }
    }

    pub fn get(&self, canvas: &str) -> Option<&Chart> {
        self.charts.get(canvas)
    }

    pub fn canvases(&self) -> impl Iterator<Item = &str> {
        self.charts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    fn construct(&mut self, canvas: &str, spec: ChartSpec, data: [u64; 3]) {
        self.next_instance += 1;
        let border = spec
            .bordered
            .then(|| Sentiment::ALL.map(sentiment_border_color));
        let chart = Chart {
            instance: self.next_instance,
            spec,
            labels: Sentiment::ALL.map(Sentiment::as_str),
            data,
            background: Sentiment::ALL.map(sentiment_color),
            border,
            state: ChartState::Rendered,
            redraws: 0,
        };
        debug!(canvas, instance = chart.instance, kind = ?chart.spec.kind, "constructed chart");
        self.charts.insert(canvas.to_string(), chart);
    }

    fn apply(&mut self, canvas: &str, data: [u64; 3]) {
        if let Some(chart) = self.charts.get_mut(canvas) {
            chart.data = data;
            chart.state = ChartState::Updated;
            chart.redraws += 1;
        }
    }
}
