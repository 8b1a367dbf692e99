use actix_web::{web, HttpResponse, HttpRequest};
use serde::Deserialize;
use crate::AppState;
use crate::auth::handlers::authorization_header;
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    pub pokemon_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TypeRequest {
    pub pokemon_type: Option<String>,
}

// The token is checked before the body, so an unreadable body from an
// unauthenticated caller still answers 403.

pub async fn search(
    req: HttpRequest,
    body: Option<web::Json<SearchRequest>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = state.auth.authorize(authorization_header(&req), "search")?;
    let body = body.map(web::Json::into_inner).unwrap_or_default();

    let result = state.pokedex.search(&username, body.pokemon_name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn roulette(
    req: HttpRequest,
    body: Option<web::Json<TypeRequest>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = state.auth.authorize(authorization_header(&req), "roulette")?;
    let body = body.map(web::Json::into_inner).unwrap_or_default();

    let summary = state.pokedex.roulette(&username, body.pokemon_type.as_deref()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

pub async fn longest_name(
    req: HttpRequest,
    body: Option<web::Json<TypeRequest>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = state.auth.authorize(authorization_header(&req), "longest name")?;
    let body = body.map(web::Json::into_inner).unwrap_or_default();

    let summary = state.pokedex.longest_name(&username, body.pokemon_type.as_deref()).await?;
    Ok(HttpResponse::Ok().json(summary))
}
