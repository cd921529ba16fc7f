use crate::services::session::{SessionManager, SESSION_COOKIE};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

pub const LOGIN_PATH: &str = "/login";

/// Lets the request through only with a valid session cookie.
///
/// The restored `SessionUser` is put in the request extensions (read it with
/// `web::ReqData<SessionUser>`); anything else is redirected to `/login`.
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware { service }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
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
        let user = match (
            req.app_data::<web::Data<SessionManager>>(),
            req.cookie(SESSION_COOKIE),
        ) {
            (Some(sessions), Some(cookie)) => match sessions.user_from_cookie(cookie.value()) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("🔒 {} {} - rejected session: {}", req.method(), req.path(), e);
                    None
                }
            },
            (None, _) => {
                log::error!("❌ SessionManager missing from app data");
                None
            }
            (_, None) => None,
        };

        match user {
            Some(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            None => {
                log::info!("🔒 {} {} - not authenticated, redirecting", req.method(), req.path());
                let response = HttpResponse::Found()
                    .insert_header((header::LOCATION, LOGIN_PATH))
                    .finish()
                    .map_into_right_body();
                Box::pin(async move { Ok(req.into_response(response)) })
            }
        }
    }
}
