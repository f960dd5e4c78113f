use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::Role;

/// The authenticated caller, derived from the verified access token.
///
/// Handlers take this as an argument; nothing reads identity from ambient
/// state. `AuthMiddleware` must run first and place the token `Claims` in the
/// request extensions, otherwise extraction fails with `401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub role: Role,
}

impl From<&Claims> for Identity {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

impl FromRequest for Identity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<Claims>().map(Identity::from);
        match identity {
            Some(identity) => ready(Ok(identity)),
            None => {
                let err = AppError::Unauthorized("Authentication credentials were not provided".into());
                ready(Err(err.into()))
            }
        }
    }
}
