use actix_web::{web, HttpResponse, HttpRequest, http::header};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::auth::LOGIN_SUCCESS;
use crate::error::AppError;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Raw `Authorization` header value, if present and readable.
pub fn authorization_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
}

pub async fn login(
    body: Option<web::Json<LoginRequest>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.map(web::Json::into_inner).unwrap_or_default();
    info!("Received login request");

    let token = state.auth.login(req.username.as_deref(), req.password.as_deref())?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: LOGIN_SUCCESS.to_string(),
        token,
    }))
}
