use actix_web::{post, web, HttpResponse, Responder};

use crate::{
    auth::{LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest},
    error::AppError,
    routes::message,
    services::Authenticator,
    store::Store,
};

/// Register a new user
///
/// Creates the account and answers `201`. No token is returned; the caller
/// logs in separately.
#[post("/register/")]
pub async fn register(
    store: web::Data<dyn Store>,
    authenticator: web::Data<Authenticator>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    authenticator
        .register(store.get_ref(), register_data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(message("User registered successfully")))
}

/// Login user
///
/// Returns `{access, refresh, user}` on success, `401` on bad credentials.
#[post("/login/")]
pub async fn login(
    store: web::Data<dyn Store>,
    authenticator: web::Data<Authenticator>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let response = authenticator
        .login(store.get_ref(), login_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Exchange a refresh token for a new access token.
#[post("/token/refresh/")]
pub async fn refresh(
    store: web::Data<dyn Store>,
    authenticator: web::Data<Authenticator>,
    refresh_data: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    let access = authenticator
        .refresh(store.get_ref(), &refresh_data.refresh)
        .await?;

    Ok(HttpResponse::Ok().json(RefreshResponse { access }))
}
