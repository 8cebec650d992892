//! Lead capture. Stores the submission in the CMS, then forwards the stored
//! record to the configured webhook without blocking the response. Webhook
//! delivery is best-effort only, a failure is logged and never retried.

use std::sync::Arc;

use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Result};

use log::{error, info};
use serde::Serialize;

use crate::api::AppState;
use crate::schemas::collections::required_fields;
use crate::schemas::{Lead, LEADS};

#[derive(Serialize, Clone, Debug)]
pub struct ErrorBody {
    error: String,
}

/// First required field the submission left blank, if any. Presence is
/// enforced by deserialization already; this catches empty strings.
fn blank_required_field(lead: &Lead) -> Option<&'static str> {
    required_fields(LEADS).into_iter().find(|field| {
        let value = match *field {
            "name" => lead.name.as_str(),
            "phone" => lead.phone.as_str(),
            _ => return false,
        };

        value.trim().is_empty()
    })
}

pub async fn submit(appstate: Data<Arc<AppState>>, lead: Json<Lead>) -> Result<HttpResponse> {
    let lead = lead.into_inner();

    if let Some(field) = blank_required_field(&lead) {
        return Ok(HttpResponse::UnprocessableEntity().json(ErrorBody {
            error: format!("Missing required field: {}", field),
        }));
    }

    match appstate.content().submit_lead(&lead).await {
        Ok(doc) => {
            info!("New lead received: {} {}", lead.name, lead.phone);

            if let Some(url) = appstate.config().webhook_new_lead.clone() {
                let client = appstate.webhook().clone();
                let record = doc.clone();

                actix_rt::spawn(async move {
                    match client.post(&url).json(&record).send().await {
                        Ok(resp) if !resp.status().is_success() => {
                            error!("Webhook at {} answered {}", url, resp.status());
                        }
                        Ok(_) => {}
                        Err(err) => {
                            error!("Webhook at {} failed: {}", url, err);
                        }
                    }
                });
            }

            Ok(HttpResponse::Ok().json(doc))
        }
        Err(err) => {
            error!("Fail to store lead: {}", err);

            Ok(HttpResponse::ServiceUnavailable().json(ErrorBody {
                error: err.to_string(),
            }))
        }
    }
}
