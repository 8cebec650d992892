//! Crawler-facing endpoints. The sitemap is rebuilt from the content store
//! on every request so new city pages surface without a redeploy.

use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{HttpResponse, Result};

use chrono::Utc;
use log::error;

use crate::api::AppState;

pub async fn sitemap(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    match appstate.content().sitemap(Utc::now()).await {
        Ok(xml) => Ok(HttpResponse::Ok()
            .content_type("application/xml")
            .body(xml)),
        Err(error) => {
            error!("Fail to render sitemap: {}", error);

            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}

pub async fn robots(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    let body = format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        appstate.content().site_url(),
    );

    Ok(HttpResponse::Ok().content_type("text/plain").body(body))
}
