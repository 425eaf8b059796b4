use std::sync::Arc;

use actix_web::{HttpResponse, web};

use crate::dto::snippet::{CreateSnippetRequest, SnippetCreatedResponse};
use crate::repository::SnippetRepository;
use crate::service::snippet::SnippetService;
use crate::util::{AppError, ResponseBuilder};

#[derive(Clone)]
pub struct SnippetController<R>
where
    R: SnippetRepository + Send + Sync + 'static,
{
    service: Arc<SnippetService<R>>,
}

impl<R> SnippetController<R>
where
    R: SnippetRepository + Send + Sync + 'static,
{
    pub fn new(service: SnippetService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn configure(cfg: &mut web::ServiceConfig, controller: SnippetController<R>) {
        let controller = web::Data::new(controller);
        // "/snippets/latest" must register before the id capture
        cfg.app_data(controller.clone())
            .route("/snippets", web::post().to(Self::create))
            .route("/snippets/latest", web::get().to(Self::latest))
            .route("/snippets/{id}", web::get().to(Self::get));
    }

    async fn create(
        controller: web::Data<SnippetController<R>>,
        payload: web::Json<CreateSnippetRequest>,
    ) -> Result<HttpResponse, AppError> {
        let id = controller.service.create(payload.into_inner()).await?;
        ResponseBuilder::ok(SnippetCreatedResponse { id })
    }

    async fn get(
        controller: web::Data<SnippetController<R>>,
        path: web::Path<i64>,
    ) -> Result<HttpResponse, AppError> {
        let snippet = controller.service.get(path.into_inner()).await?;
        ResponseBuilder::ok(snippet)
    }

    async fn latest(
        controller: web::Data<SnippetController<R>>,
    ) -> Result<HttpResponse, AppError> {
        let snippets = controller.service.latest().await?;
        ResponseBuilder::ok(snippets)
    }
}
