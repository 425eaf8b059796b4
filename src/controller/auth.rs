use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};

use crate::dto::auth::{LoginRequest, RegisterRequest};
use crate::repository::user::UserRepository;
use crate::service::auth::AuthService;
use crate::util::error::BusinessError;
use crate::util::{AppError, ResponseBuilder};

#[derive(Clone)]
pub struct AuthController<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    service: Arc<AuthService<R>>,
}

impl<R> AuthController<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(service: AuthService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn configure(cfg: &mut web::ServiceConfig, controller: AuthController<R>) {
        let controller = web::Data::new(controller);
        cfg.app_data(controller.clone())
            .route("/auth/register", web::post().to(Self::register))
            .route("/auth/login", web::post().to(Self::login))
            .route("/auth/profile", web::get().to(Self::profile));
    }

    async fn register(
        controller: web::Data<AuthController<R>>,
        payload: web::Json<RegisterRequest>,
    ) -> Result<HttpResponse, AppError> {
        controller.service.register(payload.into_inner()).await?;
        ResponseBuilder::empty()
    }

    async fn login(
        controller: web::Data<AuthController<R>>,
        payload: web::Json<LoginRequest>,
    ) -> Result<HttpResponse, AppError> {
        let login = controller.service.login(payload.into_inner()).await?;
        ResponseBuilder::ok(login)
    }

    async fn profile(
        controller: web::Data<AuthController<R>>,
        identity: Identity,
    ) -> Result<HttpResponse, AppError> {
        let user_id = identity
            .user_id
            .ok_or_else(|| AppError::from(BusinessError::InvalidCredentials))?;
        let profile = controller.service.profile(user_id).await?;
        ResponseBuilder::ok(profile)
    }
}

/// Caller identity resolved by the excluded session layer; carried here as a
/// plain header so the profile route stays testable in isolation.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Option<i64>,
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get("X-User-Id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok());
        ready(Ok(Identity { user_id }))
    }
}
