use crate::auth::{verify, Session};
use crate::error::{AppError, AppResult};
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, HttpRequest,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};

/// Paths reachable without a bearer token
const PUBLIC_PATHS: &[&str] = &["/api/health", "/api/login", "/api/logout"];

/// Authentication middleware that validates the bearer token and attaches the session to the request
pub struct AuthenticationMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthenticationMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthenticationMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationMiddlewareService { service }))
    }
}

pub struct AuthenticationMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();
        let public = PUBLIC_PATHS.contains(&path.as_str());
        tracing::info!(
            "Incoming request: {} {} (auth required: {})",
            req.method(),
            path,
            !public
        );

        if public {
            return Box::pin(self.service.call(req));
        }

        let jwt_secret = match req.app_data::<web::Data<crate::handlers::AppState>>() {
            Some(state) => state.config.jwt_secret().to_string(),
            None => {
                return Box::pin(async {
                    Err(AppError::Internal("Application state not configured".to_string()).into())
                });
            }
        };

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match verify(header, &jwt_secret) {
            Some(session) => {
                tracing::debug!("Auth successful for database {}", session.db_path);
                req.extensions_mut().insert(session);
                Box::pin(self.service.call(req))
            }
            None => Box::pin(async { Err(AppError::unauthorized().into()) }),
        }
    }
}

/// Session attached by [`AuthenticationMiddleware`]
pub fn session_from_request(req: &HttpRequest) -> AppResult<Session> {
    req.extensions()
        .get::<Session>()
        .cloned()
        .ok_or_else(AppError::unauthorized)
}
