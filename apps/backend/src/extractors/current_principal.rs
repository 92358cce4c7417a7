use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::Principal;
use crate::error::AppError;

/// The authenticated principal of the current request.
///
/// Reads the [`Principal`] that `BearerAuth` stored in request extensions;
/// handlers never look at the `Authorization` header themselves. Used on a
/// route outside the gate it fails with the same 401 as a bad token.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl Deref for CurrentPrincipal {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentPrincipal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(AppError::unauthorized);
        ready(principal)
    }
}
