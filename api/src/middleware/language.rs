use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::config::ErrorConfig;
use crate::handlers::error::extract_language;

/// Middleware storing the request's [`Language`](sid_shared::Language) in its extensions
///
/// The language comes from `Accept-Language`; without a supported one the
/// configured default applies.
pub struct LanguageMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LanguageMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = LanguageMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LanguageMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct LanguageMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for LanguageMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let default = req
            .app_data::<web::Data<ErrorConfig>>()
            .map(|config| config.default_language)
            .unwrap_or_default();
        let language = extract_language(req.request(), default);
        req.extensions_mut().insert(language);

        Box::pin(async move { service.call(req).await })
    }
}
