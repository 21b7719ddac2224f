use axum::http::StatusCode;
use axum::response::IntoResponse;

use api::error::AppError;

#[test]
fn statuses_follow_the_error_taxonomy() {
    let cases = [
        (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
        (
            AppError::Unauthenticated("login required".into()),
            StatusCode::UNAUTHORIZED,
        ),
        (AppError::Forbidden("no".into()), StatusCode::FORBIDDEN),
        (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
        (
            AppError::Upstream("ocr down".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            AppError::Internal("oops".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.status(), expected, "{error}");
    }
}

#[tokio::test]
async fn client_errors_carry_their_message() {
    let response = AppError::Forbidden("administrator access required".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["error"], "administrator access required");
}

#[tokio::test]
async fn server_errors_hide_details_from_the_caller() {
    let response = AppError::Internal("connection pool exhausted".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["error"], "internal error");
}
