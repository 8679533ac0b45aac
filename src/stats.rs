use crate::models::{AppData, Feedback, FeedbackRecord, SentimentFilter, SentimentSummary};

const GUEST_NAME: &str = "Guest";

pub fn build_summary(data: &AppData) -> SentimentSummary {
    let mut summary = SentimentSummary::default();
    for record in &data.feedback {
        summary.record(record.sentiment);
    }
    summary
}

/// All feedback matching `filter`, newest first, with the author's name
/// resolved. `None` matches nothing.
pub fn list_feedback(data: &AppData, filter: Option<SentimentFilter>) -> Vec<Feedback> {
    let Some(filter) = filter else {
        return Vec::new();
    };

    newest_first(data.feedback.iter().filter(|record| filter.matches(record.sentiment)))
        .into_iter()
        .map(|record| Feedback {
            user_name: Some(author_name(data, record.user_id)),
            ..to_row(record)
        })
        .collect()
}

pub fn user_history(data: &AppData, user_id: u64) -> Vec<Feedback> {
    newest_first(
        data.feedback
            .iter()
            .filter(|record| record.user_id == Some(user_id)),
    )
    .into_iter()
    .map(to_row)
    .collect()
}

/// Parses the admin filter query value. Absent or `All` means no filter; an
/// unknown label yields `None`.
pub fn parse_filter(raw: Option<&str>) -> Option<SentimentFilter> {
    match raw {
        None => Some(SentimentFilter::All),
        Some(value) => value.parse().ok(),
    }
}

fn newest_first<'a>(records: impl Iterator<Item = &'a FeedbackRecord>) -> Vec<&'a FeedbackRecord> {
    let mut records: Vec<_> = records.collect();
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    records
}

fn to_row(record: &FeedbackRecord) -> Feedback {
    Feedback {
        id: record.id,
        user_name: None,
        message: record.message.clone(),
        sentiment: record.sentiment,
        timestamp: record.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    }
}

fn author_name(data: &AppData, user_id: Option<u64>) -> String {
    user_id
        .and_then(|id| data.users.iter().find(|user| user.id == id))
        .map(|user| user.name.clone())
        .unwrap_or_else(|| GUEST_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, Sentiment, UserRecord};
    use chrono::{Duration, NaiveDate};

    fn sample() -> AppData {
        let base = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut data = AppData::default();
        data.users.push(UserRecord {
            id: 1,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: Role::User,
            salt: String::new(),
            password_digest: String::new(),
        });
        let rows = [
            (Some(1), Sentiment::Positive),
            (None, Sentiment::Negative),
            (Some(1), Sentiment::Neutral),
            (Some(7), Sentiment::Positive),
        ];
        for (index, (user_id, sentiment)) in rows.into_iter().enumerate() {
            data.feedback.push(FeedbackRecord {
                id: index as u64 + 1,
                user_id,
                message: format!("message {index}"),
                sentiment,
                timestamp: base + Duration::minutes(index as i64),
            });
        }
        data.last_feedback_id = 4;
        data
    }

    #[test]
    fn summary_counts_every_category() {
        let summary = build_summary(&sample());
        assert_eq!(summary.values(), [2, 1, 1]);
    }

    #[test]
    fn listing_is_newest_first_with_names() {
        let rows = list_feedback(&sample(), Some(SentimentFilter::All));
        let ids: Vec<u64> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
        assert_eq!(rows[0].user_name.as_deref(), Some("Guest"));
        assert_eq!(rows[1].user_name.as_deref(), Some("Ana"));
        assert_eq!(rows[2].user_name.as_deref(), Some("Guest"));
    }

    #[test]
    fn listing_applies_filter() {
        let filter = parse_filter(Some("Positive"));
        let rows = list_feedback(&sample(), filter);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.sentiment == Sentiment::Positive));

        assert_eq!(parse_filter(Some("All")), Some(SentimentFilter::All));
        assert!(list_feedback(&sample(), parse_filter(Some("Mixed"))).is_empty());
    }

    #[test]
    fn history_only_includes_owner_rows() {
        let rows = user_history(&sample(), 1);
        let ids: Vec<u64> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(rows.iter().all(|row| row.user_name.is_none()));
        assert_eq!(rows[1].timestamp, "2026-01-05T08:00:00.000000");
    }
}
