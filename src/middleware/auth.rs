use crate::state::AppState;
use crate::utils::AppError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Verifies the session token in `Authorization` and stores its
/// [`Claims`](crate::services::session::Claims) in the request extensions.
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthService { service }))
    }
}

pub struct SessionAuthService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                log::warn!("❌ {} {} rejected: {}", req.method(), req.path(), e);
                let (request, _payload) = req.into_parts();
                let response =
                    ServiceResponse::new(request, e.error_response().map_into_right_body::<B>());
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<crate::services::session::Claims, AppError> {
    let token = session_token(req.headers())?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state is not registered".to_string()))?;

    state.sessions.verify(token)
}

/// The raw token from `Authorization`; a `Bearer ` prefix is tolerated.
fn session_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AppError::MissingCredential)?
        .to_str()
        .map_err(|_| AppError::InvalidCredential)?
        .trim();

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err(AppError::MissingCredential);
    }

    Ok(token)
}
