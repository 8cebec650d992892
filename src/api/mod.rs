use std::io::{Error, ErrorKind, Result as AppStateResult};
use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{HttpResponse, Result as HttpResult};
use actix_web_prometheus::{PrometheusMetrics, PrometheusMetricsBuilder};

use chrono::Utc;
use prometheus::{IntCounterVec, Opts};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::entities::Content;
use crate::schemas::{Cms, CmsConfig};

pub mod leads;
pub mod pages;
pub mod seo;

/// Process configuration, read from the environment exactly once at boot.
/// The content-store address and staleness window travel with the client
/// instead of being re-read ambiently.
#[derive(Debug, Clone)]
pub struct Config {
    pub site_url: String,
    pub cms: CmsConfig,
    pub webhook_new_lead: Option<String>,
}

impl Config {
    pub fn from_env() -> AppStateResult<Config> {
        let site_url =
            std::env::var("SITE_URL").unwrap_or_else(|_| "https://titlecash.com".to_string());
        let base_url =
            std::env::var("CMS_URL").unwrap_or_else(|_| "http://localhost:3000/api".to_string());
        let timeout = std::env::var("CMS_TIMEOUT")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid CMS_TIMEOUT"))?;
        let revalidate = std::env::var("CMS_REVALIDATE")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid CMS_REVALIDATE"))?;

        Ok(Config {
            site_url,
            cms: CmsConfig {
                base_url,
                timeout,
                revalidate,
            },
            webhook_new_lead: std::env::var("WEBHOOK_NEW_LEAD").ok(),
        })
    }
}

pub struct AppState {
    config: Config,
    content: Content,
    prometheus: PrometheusMetrics,
    webhook: HttpClient,
}

impl AppState {
    pub fn new() -> AppStateResult<AppState> {
        Self::with_config(Config::from_env()?)
    }

    pub fn with_config(config: Config) -> AppStateResult<AppState> {
        let prometheus = PrometheusMetricsBuilder::new("api")
            .endpoint("/metrics")
            .build()
            .map_err(|e| {
                Error::new(
                    ErrorKind::Other,
                    format!("Failed to build prometheus metrics: {:?}", e),
                )
            })?;

        let fetches = IntCounterVec::new(
            Opts::new("cms_fetch_total", "CMS fetches by collection and outcome"),
            &["collection", "outcome"],
        )
        .map_err(|e| {
            Error::new(
                ErrorKind::Other,
                format!("Failed to build fetch counter: {:?}", e),
            )
        })?;
        prometheus
            .registry
            .register(Box::new(fetches.clone()))
            .map_err(|e| {
                Error::new(
                    ErrorKind::Other,
                    format!("Failed to register fetch counter: {:?}", e),
                )
            })?;

        let cms = Arc::new(Cms::new(config.cms.clone(), Some(Arc::new(fetches))));

        Ok(AppState {
            content: Content::new(cms, config.site_url.clone()),
            config,
            prometheus,
            webhook: HttpClient::default(),
        })
    }

    pub fn prometheus(&self) -> &PrometheusMetrics {
        &self.prometheus
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn webhook(&self) -> &HttpClient {
        &self.webhook
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct Status {
    current: i64,
    status: bool,
}

pub async fn health(_appstate: Data<Arc<AppState>>) -> HttpResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(Status {
        current: Utc::now().timestamp(),
        status: true,
    }))
}
