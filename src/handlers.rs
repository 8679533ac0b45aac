use crate::credentials::{new_credentials, verify_password};
use crate::errors::AppError;
use crate::models::{
    Feedback, FeedbackQuery, FeedbackRecord, FeedbackRequest, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest, Role, SentimentResponse, SentimentSummary, UserInfo,
    UserRecord,
};
use crate::sentiment::classify;
use crate::state::AppState;
use crate::stats::{build_summary, list_feedback, parse_filter, user_history};
use crate::storage::persist_data;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let name = payload.name.trim();
    let email = payload.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(AppError::bad_request("name, email and password are required"));
    }
    let role: Role = payload.role.parse().map_err(AppError::bad_request)?;

    let mut data = state.data.lock().await;
    if data.users.iter().any(|user| user.email == email) {
        return Err(AppError::bad_request("Email already exists"));
    }

    let (salt, password_digest) = new_credentials(&payload.password);
    let mut next = data.clone();
    next.last_user_id += 1;
    let id = next.last_user_id;
    next.users.push(UserRecord {
        id,
        name: name.to_string(),
        email,
        role,
        salt,
        password_digest,
    });
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(user_id = id, role = role.as_str(), "registered user");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: Some("User registered successfully".to_string()),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    let data = state.data.lock().await;
    let user = data
        .users
        .iter()
        .find(|user| user.email == email)
        .filter(|user| verify_password(&user.salt, &user.password_digest, &payload.password))
        .ok_or_else(|| {
            warn!("rejected login attempt");
            AppError::unauthorized("Invalid email or password")
        })?;

    Ok(Json(LoginResponse {
        user: Some(UserInfo {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }),
    }))
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<Json<SentimentResponse>, AppError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::bad_request("Feedback message is required"));
    }

    let sentiment = classify(message);
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.last_feedback_id += 1;
    let id = next.last_feedback_id;
    next.feedback.push(FeedbackRecord {
        id,
        user_id: payload.user_id,
        message: message.to_string(),
        sentiment,
        timestamp: Utc::now().naive_utc(),
    });
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(feedback_id = id, %sentiment, "stored feedback");
    Ok(Json(SentimentResponse {
        sentiment: Some(sentiment),
    }))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<SentimentSummary>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_summary(&data)))
}

pub async fn get_all_feedback(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<Vec<Feedback>>, AppError> {
    let filter = parse_filter(query.sentiment.as_deref());
    let data = state.data.lock().await;
    Ok(Json(list_feedback(&data, filter)))
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<Vec<Feedback>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(user_history(&data, user_id)))
}

pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut data = state.data.lock().await;
    let position = data
        .feedback
        .iter()
        .position(|record| record.id == feedback_id)
        .ok_or_else(|| AppError::not_found("Feedback not found"))?;
    let mut next = data.clone();
    next.feedback.remove(position);
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(feedback_id, "deleted feedback");
    Ok(Json(MessageResponse {
        message: Some("Feedback deleted".to_string()),
    }))
}
