use std::path::Path;

use poem::{
    EndpointExt, Route, Server as PoemServer,
    endpoint::{BoxEndpoint, StaticFilesEndpoint},
    listener::TcpListener,
    middleware::{Cors, Tracing},
};
use poem_openapi::OpenApiService;

use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub struct Server;

impl Server {
    /// Routes: the API under `/api`, Swagger UI under `/docs`, the OpenAPI
    /// document at `/openapi.json` and the static front-end at `/`.
    pub fn app(
        container: DependencyContainer,
        static_dir: &Path,
        cors: Cors,
        server_url: String,
    ) -> BoxEndpoint<'static> {
        let api_service = OpenApiService::new(
            (container.health_api, container.product_api),
            "Grocery List API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(server_url);
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        Route::new()
            .nest("/api", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .nest(
                "/",
                StaticFilesEndpoint::new(static_dir.to_path_buf()).index_file("index.html"),
            )
            .with(cors)
            .with(Tracing)
            .boxed()
    }

    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let app = Self::app(
            container,
            &config.storage.static_dir,
            config.cors,
            format!("http://{}/api", addr),
        );
        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}
