use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use prometheus::IntCounterVec;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::records::{CityPage, Lead, Location, Service, StatePage};
use super::{CITY_PAGES, LEADS, LOCATIONS, SERVICES, STATE_PAGES};

// Payload-style page cap used by every collection listing.
const LIST_LIMIT: u32 = 100;

// Expansion depth that inlines a city page's location, state page and
// nearby locations in one fetch.
const CITY_DEPTH: u32 = 2;

#[derive(Debug, Clone)]
pub struct CmsError {
    message: String,
}

impl CmsError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for CmsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CmsError {}

#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub base_url: String,
    pub timeout: u64,
    pub revalidate: u64,
}

/// Envelope every collection endpoint answers with.
#[derive(Debug, Deserialize)]
struct FindPage<T> {
    #[serde(default = "Vec::new")]
    docs: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CreatePage {
    #[serde(default)]
    doc: Option<serde_json::Value>,
}

/// Read/write client for the headless CMS. List operations degrade to the
/// empty list on any transport or decode failure so callers only ever need
/// an is-empty check; single-record operations keep "no match" (`Ok(None)`)
/// distinct from "store unreachable" (`Err`).
pub struct Cms {
    config: CmsConfig,
    client: HttpClient,
    fetches: Option<Arc<IntCounterVec>>,
}

impl Cms {
    pub fn new(config: CmsConfig, fetches: Option<Arc<IntCounterVec>>) -> Self {
        Self {
            config,
            client: HttpClient::default(),
            fetches,
        }
    }

    pub async fn list_services(&self) -> Vec<Service> {
        let query = vec![
            ("sort".to_string(), "order".to_string()),
            ("limit".to_string(), LIST_LIMIT.to_string()),
        ];

        self.find_all(SERVICES, query).await
    }

    pub async fn list_locations(&self) -> Vec<Location> {
        let query = vec![
            ("sort".to_string(), "city".to_string()),
            ("limit".to_string(), LIST_LIMIT.to_string()),
        ];

        self.find_all(LOCATIONS, query).await
    }

    /// Bulk city-page listing for aggregation. Only published pages are
    /// visible on this path; the by-slug lookup below stays unfiltered.
    pub async fn list_city_pages(&self) -> Vec<CityPage> {
        let query = vec![
            ("where[status][equals]".to_string(), "published".to_string()),
            ("limit".to_string(), LIST_LIMIT.to_string()),
            ("depth".to_string(), CITY_DEPTH.to_string()),
        ];

        self.find_all(CITY_PAGES, query).await
    }

    /// One state's slice of the published city pages. The store keeps the
    /// state relation behind an expansion, so the cut happens client-side
    /// on the inlined location.
    pub async fn list_city_pages_by_state(&self, state_code: &str) -> Vec<CityPage> {
        self.list_city_pages()
            .await
            .into_iter()
            .filter(|page| {
                page.location
                    .as_ref()
                    .map(|location| location.state_code == state_code)
                    .unwrap_or(false)
            })
            .collect()
    }

    pub async fn get_service(&self, slug: &str) -> Result<Option<Service>, CmsError> {
        self.find_one(SERVICES, slug, None).await
    }

    pub async fn get_state_page(&self, slug: &str) -> Result<Option<StatePage>, CmsError> {
        self.find_one(STATE_PAGES, slug, None).await
    }

    pub async fn get_city_page(&self, slug: &str) -> Result<Option<CityPage>, CmsError> {
        self.find_one(CITY_PAGES, slug, Some(CITY_DEPTH)).await
    }

    /// Creates the lead with status `new` and hands back the stored record
    /// so the caller can forward it to the outbound webhook.
    pub async fn create_lead(&self, lead: &Lead) -> Result<serde_json::Value, CmsError> {
        let url = format!("{}/{}", self.config.base_url, LEADS);
        let lead = Lead {
            status: Some("new".to_string()),
            ..lead.clone()
        };

        let resp = self
            .client
            .post(&url)
            .json(&lead)
            .timeout(Duration::from_secs(self.config.timeout))
            .send()
            .await
            .map_err(|error| self.fail(LEADS, format!("Create lead at {} failed: {}", url, error)))?;

        if !resp.status().is_success() {
            return Err(self.fail(
                LEADS,
                format!("Create lead at {} failed: {}", url, resp.status()),
            ));
        }

        let page = resp
            .json::<CreatePage>()
            .await
            .map_err(|error| self.fail(LEADS, format!("Decode lead response failed: {}", error)))?;

        self.count(LEADS, "ok");

        match page.doc {
            Some(doc) => Ok(doc),
            None => serde_json::to_value(&lead)
                .map_err(|error| CmsError::new(format!("Encode lead failed: {}", error))),
        }
    }

    async fn find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        slug: &str,
        depth: Option<u32>,
    ) -> Result<Option<T>, CmsError> {
        let mut query = vec![
            ("where[slug][equals]".to_string(), slug.to_string()),
            ("limit".to_string(), "1".to_string()),
        ];

        if let Some(depth) = depth {
            query.push(("depth".to_string(), depth.to_string()));
        }

        Ok(self.find_docs(collection, query).await?.into_iter().next())
    }

    async fn find_all<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: Vec<(String, String)>,
    ) -> Vec<T> {
        match self.find_docs(collection, query).await {
            Ok(docs) => docs,
            Err(error) => {
                warn!("Serve {} without content: {}", collection, error);
                Vec::new()
            }
        }
    }

    async fn find_docs<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: Vec<(String, String)>,
    ) -> Result<Vec<T>, CmsError> {
        let url = format!("{}/{}", self.config.base_url, collection);
        let resp = self
            .client
            .get(&url)
            .query(&query)
            .header("Cache-Control", format!("max-age={}", self.config.revalidate))
            .timeout(Duration::from_secs(self.config.timeout))
            .send()
            .await
            .map_err(|error| self.fail(collection, format!("Fetch {} failed: {}", url, error)))?;

        if !resp.status().is_success() {
            return Err(self.fail(collection, format!("Fetch {} failed: {}", url, resp.status())));
        }

        let page = resp
            .json::<FindPage<T>>()
            .await
            .map_err(|error| self.fail(collection, format!("Decode {} failed: {}", url, error)))?;

        self.count(collection, "ok");
        Ok(page.docs)
    }

    fn fail(&self, collection: &str, message: String) -> CmsError {
        self.count(collection, "error");
        CmsError::new(message)
    }

    fn count(&self, collection: &str, outcome: &str) {
        if let Some(fetches) = &self.fetches {
            fetches.with_label_values(&[collection, outcome]).inc();
        }
    }
}
