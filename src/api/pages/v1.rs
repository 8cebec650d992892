//! View-model endpoints consumed by the page renderer. Collection pages
//! degrade to empty listings when the content store is down; single-record
//! pages answer 404 for a missing slug and 503 for a failed fetch.

use std::sync::Arc;

use actix_web::web::{Data, Path};
use actix_web::{HttpResponse, Result};

use log::error;
use serde::Serialize;

use crate::api::AppState;

#[derive(Serialize, Clone, Debug)]
pub struct ErrorBody {
    error: String,
}

pub async fn get_navigation(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(appstate.content().navigation().await))
}

pub async fn get_home(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(appstate.content().home().await))
}

pub async fn get_services(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(appstate.content().services_index().await))
}

pub async fn get_service(
    appstate: Data<Arc<AppState>>,
    path: Path<String>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();

    match appstate.content().service(&slug).await {
        Ok(Some(view)) => Ok(HttpResponse::Ok().json(view)),
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorBody {
            error: "Service Not Found".to_string(),
        })),
        Err(error) => {
            error!("Fail to fetch service {}: {}", slug, error);

            Ok(HttpResponse::ServiceUnavailable().json(ErrorBody {
                error: error.to_string(),
            }))
        }
    }
}

pub async fn get_locations(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(appstate.content().locations_index().await))
}

pub async fn get_state(appstate: Data<Arc<AppState>>, path: Path<String>) -> Result<HttpResponse> {
    let slug = path.into_inner();

    match appstate.content().state(&slug).await {
        Ok(Some(view)) => Ok(HttpResponse::Ok().json(view)),
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorBody {
            error: "State Not Found".to_string(),
        })),
        Err(error) => {
            error!("Fail to fetch state page {}: {}", slug, error);

            Ok(HttpResponse::ServiceUnavailable().json(ErrorBody {
                error: error.to_string(),
            }))
        }
    }
}

pub async fn get_city(
    appstate: Data<Arc<AppState>>,
    path: Path<(String, String)>,
) -> Result<HttpResponse> {
    let (state_slug, city_slug) = path.into_inner();

    match appstate.content().city(&state_slug, &city_slug).await {
        Ok(Some(view)) => Ok(HttpResponse::Ok().json(view)),
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorBody {
            error: "City Not Found".to_string(),
        })),
        Err(error) => {
            error!("Fail to fetch city page {}: {}", city_slug, error);

            Ok(HttpResponse::ServiceUnavailable().json(ErrorBody {
                error: error.to_string(),
            }))
        }
    }
}

pub async fn get_static(appstate: Data<Arc<AppState>>, path: Path<String>) -> Result<HttpResponse> {
    let name = path.into_inner();

    match appstate.content().static_page(&name) {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Ok(HttpResponse::NotFound().json(ErrorBody {
            error: "Page Not Found".to_string(),
        })),
    }
}
