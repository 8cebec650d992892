use std::io::{Error, ErrorKind};
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::web::{get, post, scope, Data};
use actix_web::{App, HttpServer};

use tokio::signal::unix::{signal, SignalKind};

use chrono::Utc;
use log::info;

use titlecash::api::{health, AppState};

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().json().init();

    // @NOTE: server configuration
    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("SERVER_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid SERVER_PORT"))?;

    // @NOTE: store appstate
    let appstate = Arc::new(AppState::new()?);

    // @NOTE: spawn new http server
    let server = HttpServer::new(move || {
        App::new()
            // @NOTE: monitoring
            .wrap(appstate.prometheus().clone())
            .wrap(Logger::default())
            // @NOTE: health-check
            .route("/health", get().to(health))
            // @NOTE: crawler surface
            .route("/sitemap.xml", get().to(titlecash::api::seo::v1::sitemap))
            .route("/robots.txt", get().to(titlecash::api::seo::v1::robots))
            // @NOTE: APIs of page view models
            .service(
                scope("/api/pages")
                    .route(
                        "/v1/navigation",
                        get().to(titlecash::api::pages::v1::get_navigation),
                    )
                    .route("/v1/home", get().to(titlecash::api::pages::v1::get_home))
                    .route(
                        "/v1/services",
                        get().to(titlecash::api::pages::v1::get_services),
                    )
                    .route(
                        "/v1/services/{slug}",
                        get().to(titlecash::api::pages::v1::get_service),
                    )
                    .route(
                        "/v1/locations",
                        get().to(titlecash::api::pages::v1::get_locations),
                    )
                    .route(
                        "/v1/locations/{state}",
                        get().to(titlecash::api::pages::v1::get_state),
                    )
                    .route(
                        "/v1/locations/{state}/{city}",
                        get().to(titlecash::api::pages::v1::get_city),
                    )
                    .route(
                        "/v1/static/{page}",
                        get().to(titlecash::api::pages::v1::get_static),
                    ),
            )
            // @NOTE: APIs of lead capture
            .service(
                scope("/api/leads")
                    .route("/v1/submit", post().to(titlecash::api::leads::v1::submit)),
            )
            // @NOTE: AppState
            .app_data(Data::new(appstate.clone()))
    })
    .bind((host.as_str(), port))
    .map_err(|e| {
        Error::new(
            ErrorKind::AddrInUse,
            format!("Failed to bind to {}:{}: {}", host, port, e),
        )
    })?
    .shutdown_timeout(30)
    .run();

    let handler = server.handle();

    info!(
        "Server started at {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    );

    // @NOTE: graceful shutdown
    actix_rt::spawn(async move {
        let mut sigint = signal(SignalKind::interrupt()).unwrap();
        let mut sigterm = signal(SignalKind::terminate()).unwrap();

        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }

        info!("Shutting down...");
        handler.stop(true).await;
    });

    server.await
}
