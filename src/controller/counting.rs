use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::AppError, middleware::auth::TokenGuard, model::api::ResetCountDto, state::AppState,
};

/// GET /api/counting/status - Get the counting game status
///
/// # Returns
/// - `200 OK`: CountingStatusDto with current count, next expected number, last
///   contributor, and whether the count was recovered from history yet
pub async fn get_status(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let status = state.counting.status().await;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

/// POST /api/counting/reset - Force the count to a value
///
/// Bypasses validation and clears the last contributor, so anyone may post the next
/// number. The body is optional; without it the count is reset to 0.
///
/// # Authentication
/// Requires `Authorization: Bearer <ADMIN_API_TOKEN>`
///
/// # Request Body
/// - `count`: Count to continue from (default 0)
///
/// # Returns
/// - `200 OK`: CountingStatusDto after the reset
/// - `401 Unauthorized`: Missing or wrong bearer token
/// - `403 Forbidden`: No admin token configured
pub async fn reset_count(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<ResetCountDto>>,
) -> Result<impl IntoResponse, AppError> {
    TokenGuard::new(state.admin_api_token.as_deref(), &headers).require()?;

    let count = body.map(|Json(dto)| dto.count).unwrap_or_default();
    let status = state.counting.force_reset(count).await;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::AUTHORIZATION, HeaderValue};
    use serenity::async_trait;
    use std::sync::Arc;

    use crate::{
        bot::voice_label::LogOnlyPublisher,
        error::platform::PlatformError,
        model::counting::HistoryMessage,
        service::counting::{platform::ChatPlatform, CountingService},
    };

    /// Platform with an empty channel where every call succeeds.
    struct EmptyChannel;

    #[async_trait]
    impl ChatPlatform for EmptyChannel {
        async fn fetch_history(
            &self,
            _channel_id: u64,
            _limit: u16,
        ) -> Result<Vec<HistoryMessage>, PlatformError> {
            Ok(Vec::new())
        }

        async fn mark_success(&self, _: u64, _: u64) -> Result<(), PlatformError> {
            Ok(())
        }

        async fn delete_message(&self, _: u64, _: u64) -> Result<(), PlatformError> {
            Ok(())
        }

        async fn notify_user_ephemeral(&self, _: u64, _: &str) -> Result<(), PlatformError> {
            Ok(())
        }

        async fn send_notice(&self, _: u64, _: &str) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    fn state(token: Option<&str>) -> AppState {
        let counting = CountingService::new(
            1,
            200,
            Arc::new(EmptyChannel),
            Arc::new(LogOnlyPublisher),
        );

        AppState::new(Arc::new(counting), token.map(str::to_string))
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    /// Tests resetting the count with a valid token.
    ///
    /// Expected: 200 OK and the new count visible through the status endpoint
    #[tokio::test]
    async fn resets_count_with_valid_token() {
        let state = state(Some("secret"));

        let response = reset_count(
            State(state.clone()),
            bearer("secret"),
            Some(Json(ResetCountDto { count: 41 })),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let status = state.counting.status().await;
        assert_eq!(status.current_count, 41);
        assert_eq!(status.next_expected, 42);
    }

    /// Tests that a reset without a body goes back to zero.
    ///
    /// Expected: count 0
    #[tokio::test]
    async fn resets_to_zero_without_body() {
        let state = state(Some("secret"));
        state.counting.force_reset(10).await;

        reset_count(State(state.clone()), bearer("secret"), None)
            .await
            .unwrap();

        assert_eq!(state.counting.status().await.current_count, 0);
    }

    /// Tests resets with a wrong token or without a configured token.
    ///
    /// Expected: 401 and 403 responses, count untouched
    #[tokio::test]
    async fn refuses_unauthorized_reset() {
        let state_with_token = state(Some("secret"));
        let wrong = reset_count(State(state_with_token.clone()), bearer("guess"), None)
            .await
            .map(|_| ())
            .unwrap_err()
            .into_response();

        let disabled = reset_count(State(state(None)), bearer("secret"), None)
            .await
            .map(|_| ())
            .unwrap_err()
            .into_response();

        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(disabled.status(), StatusCode::FORBIDDEN);
        assert!(!state_with_token.counting.status().await.initialized);
    }

    /// Tests the status endpoint of a fresh game.
    ///
    /// Expected: 200 OK
    #[tokio::test]
    async fn returns_status() {
        let response = get_status(State(state(None)))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
