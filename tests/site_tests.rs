//! End-to-end coverage against a fixture content store on loopback. The
//! fixture answers Payload-style `{"docs": [...]}` envelopes, honors the
//! slug and status filters the client sends, and records lead and webhook
//! traffic for inspection.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::web::{get, post, Data, Json, Path, Query};
use actix_web::{App, HttpResponse, HttpServer};

use chrono::{TimeZone, Utc};
use lazy_static::lazy_static;
use serde_json::{json, Value};

use titlecash::api::leads::v1::submit;
use titlecash::api::pages::v1::{get_service, get_state, get_static};
use titlecash::api::seo::v1::robots;
use titlecash::api::{AppState, Config};
use titlecash::entities::Content;
use titlecash::schemas::{Cms, CmsConfig, Lead};

lazy_static! {
    static ref STORED_LEADS: Mutex<Vec<Value>> = Mutex::new(vec![]);
    static ref WEBHOOK_CALLS: Mutex<Vec<Value>> = Mutex::new(vec![]);
    static ref OUTAGE_LEADS: Mutex<Vec<Value>> = Mutex::new(vec![]);
}

fn services_docs() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Auto Title Loans",
            "slug": "auto-title-loans",
            "shortDescription": "Use your car title to get cash in minutes.",
            "fullDescription": "Borrow against your paid-off vehicle and keep driving it.",
            "benefits": [{ "title": "Keep driving your car" }],
            "howItWorks": [{ "step": 1, "title": "Apply online" }],
            "faqs": [{
                "question": "How fast can I get funded?",
                "answer": "Most customers are funded the same day."
            }],
            "order": 1
        }),
        json!({
            "id": 2,
            "name": "Title Loan Refinancing",
            "slug": "title-loan-refinancing",
            "shortDescription": "Lower the rate on a title loan you already have.",
            "order": 2
        }),
    ]
}

fn locations_docs() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "city": "Los Angeles",
            "state": "California",
            "stateCode": "CA",
            "county": "Los Angeles",
            "slug": "los-angeles-ca",
            "areaCode": "213",
            "population": 3898747,
            "latitude": 34.0522,
            "longitude": -118.2437,
            "localFacts": {
                "landmarks": [{ "name": "Crypto.com Arena" }],
                "highways": [{ "name": "I-110" }],
                "exits": [{ "name": "Exit 22" }],
                "neighboringCities": [{ "name": "Glendale" }]
            }
        }),
        json!({
            "id": 2,
            "city": "Miami",
            "state": "Florida",
            "stateCode": "FL",
            "county": "Miami-Dade",
            "slug": "miami-fl",
            "areaCode": "305",
            "population": 442241,
            "latitude": 25.7617,
            "longitude": -80.1918,
            "localFacts": {
                "landmarks": [{ "name": "Bayside Marketplace" }],
                "highways": [{ "name": "I-95" }],
                "exits": [{ "name": "Exit 2A" }],
                "neighboringCities": [{ "name": "Hialeah" }, { "name": "Coral Gables" }]
            }
        }),
        json!({
            "id": 3,
            "city": "Tampa",
            "state": "Florida",
            "stateCode": "FL",
            "county": "Hillsborough",
            "slug": "tampa-fl",
            "areaCode": "813",
            "localFacts": {}
        }),
    ]
}

fn state_pages_docs() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "state": "California",
            "stateCode": "CA",
            "slug": "california",
            "legalStatus": "Title loans are legal in California for amounts over $2,500.",
            "regulations": {
                "maxAPR": "No cap on loans over $2,500",
                "licensingRequired": true,
                "regulatoryBody": "Department of Financial Protection and Innovation"
            },
            "consumerProtections": [
                { "protection": "Lenders must hold a California Financing Law license" },
                { "protection": "10-day notice before a repossession sale" }
            ],
            "cityPageContent": {
                "keyPoints": [
                    { "point": "California lenders must hold a CFL license." }
                ]
            }
        }),
        json!({
            "id": 2,
            "state": "Florida",
            "stateCode": "FL",
            "slug": "florida",
            "legalStatus": "Title loans are legal in Florida under the Florida Title Loan Act.",
            "regulations": {
                "maxAPR": "30% annually on the first $2,000",
                "maxLoanTerm": "30 days, renewable",
                "licensingRequired": true,
                "regulatoryBody": "Office of Financial Regulation"
            },
            "fees": { "originationFee": "None beyond permitted interest" },
            "consumerProtections": [
                { "protection": "30-day minimum loan term" },
                { "protection": "Right to cure before repossession" },
                { "protection": "Surplus from a vehicle sale returns to the borrower" },
                { "protection": "Written notice required before repossession" }
            ],
            "disclaimer": "Florida title loans are regulated by the Office of Financial \
                           Regulation (OFR). Verify current rules with the OFR before borrowing.",
            "cityPageContent": {
                "headline": "Fast Title Loans Across Florida",
                "keyPoints": [
                    { "point": "Interest is capped at 30% on the first $2,000." },
                    { "point": "Lenders must register with the OFR." }
                ]
            },
            "sources": [{
                "title": "Florida Title Loan Act",
                "url": "https://www.flsenate.gov/Laws/Statutes/2024/Chapter537"
            }]
        }),
    ]
}

fn city_pages_docs() -> Vec<Value> {
    let locations = locations_docs();
    let states = state_pages_docs();

    vec![
        json!({
            "id": 1,
            "title": "Title Loans in Miami, FL",
            "slug": "miami-fl",
            "status": "published",
            "location": locations[1].clone(),
            "statePage": states[1].clone(),
            "metaTitle": "Title Loans Miami FL - Same Day Cash",
            "heroHeadline": "Miami Title Loans Done Right",
            "napContent": {
                "businessName": "TitleCash Miami Downtown",
                "address": "200 Biscayne Blvd, Miami, FL 33131",
                "phone": "(305) 555-0188",
                "hours": "Mon-Sat 9:00 AM - 7:00 PM"
            },
            "faqs": [{
                "question": "Where do you park?",
                "answer": "Validated parking on NE 2nd St."
            }],
            "nearbyLocations": [locations[2].clone()]
        }),
        json!({
            "id": 2,
            "title": "Title Loans in Tampa, FL",
            "slug": "tampa-fl",
            "status": "published",
            "location": locations[2].clone()
        }),
        json!({
            "id": 3,
            "title": "Title Loans in Jacksonville, FL",
            "slug": "jacksonville-fl",
            "status": "draft",
            "location": {
                "id": 9,
                "city": "Jacksonville",
                "state": "Florida",
                "stateCode": "FL",
                "county": "Duval",
                "slug": "jacksonville-fl",
                "areaCode": "904",
                "localFacts": {}
            }
        }),
        json!({
            "id": 4,
            "title": "Title Loans in Los Angeles, CA",
            "slug": "los-angeles-ca",
            "status": "published",
            "location": locations[0].clone(),
            "statePage": states[0].clone()
        }),
    ]
}

fn filtered(docs: Vec<Value>, query: HashMap<String, String>) -> HttpResponse {
    let docs: Vec<Value> = docs
        .into_iter()
        .filter(|doc| match query.get("where[slug][equals]") {
            Some(slug) => doc["slug"].as_str() == Some(slug.as_str()),
            None => true,
        })
        .filter(|doc| match query.get("where[status][equals]") {
            Some(status) => doc["status"].as_str() == Some(status.as_str()),
            None => true,
        })
        .collect();

    HttpResponse::Ok().json(json!({ "docs": docs }))
}

async fn serve_services(query: Query<HashMap<String, String>>) -> HttpResponse {
    filtered(services_docs(), query.into_inner())
}

async fn serve_locations(query: Query<HashMap<String, String>>) -> HttpResponse {
    filtered(locations_docs(), query.into_inner())
}

async fn serve_state_pages(query: Query<HashMap<String, String>>) -> HttpResponse {
    filtered(state_pages_docs(), query.into_inner())
}

async fn serve_city_pages(query: Query<HashMap<String, String>>) -> HttpResponse {
    filtered(city_pages_docs(), query.into_inner())
}

async fn store_lead(lead: Json<Value>) -> HttpResponse {
    let mut doc = lead.into_inner();
    doc["id"] = json!(501);

    STORED_LEADS.lock().unwrap().push(doc.clone());
    HttpResponse::Ok().json(json!({ "doc": doc, "message": "Lead successfully created." }))
}

async fn record_webhook(body: Json<Value>) -> HttpResponse {
    WEBHOOK_CALLS.lock().unwrap().push(body.into_inner());
    HttpResponse::Ok().finish()
}

async fn store_outage_lead(lead: Json<Value>) -> HttpResponse {
    let mut doc = lead.into_inner();
    doc["id"] = json!(502);

    OUTAGE_LEADS.lock().unwrap().push(doc.clone());
    HttpResponse::Ok().json(json!({ "doc": doc, "message": "Lead successfully created." }))
}

fn spawn_store() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture addr").to_string();

    let server = HttpServer::new(|| {
        App::new()
            .route("/api/services", get().to(serve_services))
            .route("/api/locations", get().to(serve_locations))
            .route("/api/state-pages", get().to(serve_state_pages))
            .route("/api/city-pages", get().to(serve_city_pages))
            .route("/api/leads", post().to(store_lead))
            .route("/webhook", post().to(record_webhook))
    })
    .workers(1)
    .listen(listener)
    .expect("listen on fixture addr")
    .run();

    actix_rt::spawn(server);
    addr
}

// Lead-only store with its own log, kept apart from the counts the
// happy-path submission test asserts on.
fn spawn_lead_store() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture addr").to_string();

    let server = HttpServer::new(|| App::new().route("/api/leads", post().to(store_outage_lead)))
        .workers(1)
        .listen(listener)
        .expect("listen on fixture addr")
        .run();

    actix_rt::spawn(server);
    addr
}

// A port that was free a moment ago and has nothing listening on it.
fn dead_store_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve a free port");
    listener.local_addr().expect("reserved addr").to_string()
}

fn content_for(addr: &str) -> Content {
    Content::new(
        Arc::new(Cms::new(
            CmsConfig {
                base_url: format!("http://{}/api", addr),
                timeout: 5,
                revalidate: 0,
            },
            None,
        )),
        "https://titlecash.test".to_string(),
    )
}

fn appstate_for(addr: &str) -> Data<Arc<AppState>> {
    appstate_with_webhook(addr, Some(format!("http://{}/webhook", addr)))
}

fn appstate_with_webhook(addr: &str, webhook_new_lead: Option<String>) -> Data<Arc<AppState>> {
    let config = Config {
        site_url: "https://titlecash.test".to_string(),
        cms: CmsConfig {
            base_url: format!("http://{}/api", addr),
            timeout: 5,
            revalidate: 0,
        },
        webhook_new_lead,
    };

    Data::new(Arc::new(AppState::with_config(config).expect("appstate")))
}

fn lead(name: &str, phone: &str) -> Lead {
    Lead {
        name: name.to_string(),
        phone: phone.to_string(),
        email: Some("jane@example.com".to_string()),
        city: Some("Miami".to_string()),
        state: Some("FL".to_string()),
        vehicle_year: Some("2019".to_string()),
        vehicle_make: Some("Toyota".to_string()),
        vehicle_model: Some("Camry".to_string()),
        loan_amount: Some("5000".to_string()),
        source: Some("city-page".to_string()),
        source_page: Some("/locations/florida/miami-fl".to_string()),
        status: None,
        notes: None,
    }
}

async fn eventually(check: impl Fn() -> bool) -> bool {
    for _ in 0..40 {
        if check() {
            return true;
        }

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    false
}

#[actix_rt::test]
async fn test_navigation_and_home_compose_from_the_store() {
    let addr = spawn_store();
    let content = content_for(&addr);

    let nav = content.navigation().await;
    assert_eq!(nav.services.len(), 2);
    assert_eq!(nav.states.len(), 2);
    assert_eq!(nav.states[0].slug, "california");
    assert_eq!(nav.states[1].city_count, 2);
    assert!(nav.states[1].cities.is_empty());

    let home = content.home().await;
    assert_eq!(home.services[0].route, "/services/auto-title-loans");
    assert_eq!(home.states[1].cities.len(), 2);
    assert_eq!(home.states[1].cities[0].route, "/locations/florida/miami-fl");
    assert_eq!(home.markup.len(), 2);
}

#[actix_rt::test]
async fn test_single_record_lookups_keep_missing_separate_from_down() {
    let addr = spawn_store();
    let content = content_for(&addr);

    let view = content
        .service("auto-title-loans")
        .await
        .expect("store is up")
        .expect("service exists");
    assert_eq!(view.related.len(), 1);
    assert_eq!(view.related[0].slug, "title-loan-refinancing");
    assert_eq!(view.markup.len(), 2);

    assert!(content
        .service("boat-title-loans")
        .await
        .expect("store is up")
        .is_none());
    assert!(content
        .city("florida", "hialeah-fl")
        .await
        .expect("store is up")
        .is_none());
}

#[actix_rt::test]
async fn test_state_route_merges_groups_regulations_and_city_pages() {
    let addr = spawn_store();
    let content = content_for(&addr);

    let florida = content
        .state("florida")
        .await
        .expect("store is up")
        .expect("state page exists");

    assert_eq!(florida.name, "Florida");
    assert_eq!(florida.cities_served, 2);
    assert!(florida.hero.badge.contains("2 Cities"));
    assert_eq!(florida.cities.len(), 2);
    assert_eq!(florida.cities[0].route, "/locations/florida/miami-fl");
    assert_eq!(florida.cities[1].county, "Hillsborough");
    assert_eq!(
        florida.regulations.max_apr.as_deref(),
        Some("30% annually on the first $2,000"),
    );
    assert_eq!(florida.protections.len(), 4);
    assert!(florida
        .consumer_information
        .contains("Office of Financial Regulation"));
    assert_eq!(florida.faqs.len(), 3);

    assert!(content
        .state("texas")
        .await
        .expect("store is up")
        .is_none());
}

#[actix_rt::test]
async fn test_city_route_resolves_relationships_and_fallbacks() {
    let addr = spawn_store();
    let content = content_for(&addr);

    let miami = content
        .city("florida", "miami-fl")
        .await
        .expect("store is up")
        .expect("city page exists");

    assert_eq!(miami.meta.title, "Title Loans Miami FL - Same Day Cash");
    assert_eq!(miami.county, "Miami-Dade");
    assert_eq!(miami.phone.display, "(305) 555-1234");
    assert_eq!(miami.nap.business_name, "TitleCash Miami Downtown");
    assert_eq!(miami.compliance.protections.len(), 3);
    assert_eq!(miami.nearby.len(), 1);
    assert_eq!(miami.nearby[0].route, "/locations/florida/tampa-fl");
    assert_eq!(miami.markup[0]["@type"], "FinancialService");
    assert_eq!(miami.markup[0]["telephone"], "(305) 555-0188");
    assert_eq!(miami.markup.len(), 2);

    let tampa = content
        .city("florida", "tampa-fl")
        .await
        .expect("store is up")
        .expect("city page exists");

    assert_eq!(tampa.meta.title, "Title Loans in Tampa, FL");
    assert!(tampa.local_proof.text.contains("Tampa branch"));
    assert_eq!(
        tampa.services.text,
        "All title loan services available at this location.",
    );
    assert_eq!(tampa.phone.display, "(813) 555-1234");

    // Drafts never show up in listings but stay reachable by direct slug.
    assert!(content
        .city("florida", "jacksonville-fl")
        .await
        .expect("store is up")
        .is_some());
}

#[actix_rt::test]
async fn test_sitemap_covers_every_published_route() {
    let addr = spawn_store();
    let content = content_for(&addr);

    let now = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
    let xml = content.sitemap(now).await.expect("sitemap renders");

    assert_eq!(xml.matches("<url>").count(), 13);
    assert!(xml.contains("<loc>https://titlecash.test</loc>"));
    assert!(xml.contains("<loc>https://titlecash.test/services/title-loan-refinancing</loc>"));
    assert!(xml.contains("<loc>https://titlecash.test/locations/california/los-angeles-ca</loc>"));
    assert!(xml.contains("<loc>https://titlecash.test/locations/florida/miami-fl</loc>"));
    assert!(xml.contains("<changefreq>daily</changefreq>"));
    assert!(xml.contains("<lastmod>2026-01-15T00:00:00Z</lastmod>"));
    assert!(!xml.contains("jacksonville"));
}

#[actix_rt::test]
async fn test_store_outage_degrades_listings_and_surfaces_unavailable() {
    let content = content_for(&dead_store_addr());

    let home = content.home().await;
    assert!(home.services.is_empty());
    assert!(home.states.is_empty());

    assert!(content.state("florida").await.is_err());
    assert!(content.service("auto-title-loans").await.is_err());

    // Static routes keep the sitemap alive through an outage.
    let xml = content.sitemap(Utc::now()).await.expect("sitemap renders");
    assert_eq!(xml.matches("<url>").count(), 6);
}

#[actix_rt::test]
async fn test_handlers_translate_outcomes_to_status_codes() {
    let addr = spawn_store();
    let data = appstate_for(&addr);

    let resp = get_service(data.clone(), Path::from("auto-title-loans".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_service(data.clone(), Path::from("gone".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = get_static(data.clone(), Path::from("about".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_static(data.clone(), Path::from("careers".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let down = appstate_for(&dead_store_addr());
    let resp = get_state(down.clone(), Path::from("florida".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let resp = robots(down).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    assert!(std::str::from_utf8(&body)
        .unwrap()
        .contains("Sitemap: https://titlecash.test/sitemap.xml"));
}

#[actix_rt::test]
async fn test_lead_submission_stores_then_notifies_the_webhook() {
    let addr = spawn_store();
    let data = appstate_for(&addr);

    let resp = submit(data.clone(), Json(lead("Jane Doe", "305-555-0000")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(eventually(|| WEBHOOK_CALLS.lock().unwrap().len() == 1).await);

    {
        let stored = STORED_LEADS.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["name"], "Jane Doe");
        assert_eq!(stored[0]["status"], "new");

        let delivered = WEBHOOK_CALLS.lock().unwrap();
        assert_eq!(delivered[0]["id"], 501);
        assert_eq!(delivered[0]["status"], "new");
    }

    // Blank required fields bounce before the store sees them.
    let resp = submit(data, Json(lead("", "305-555-0000"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(STORED_LEADS.lock().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_webhook_outage_never_blocks_the_submission() {
    let addr = spawn_lead_store();
    let data = appstate_with_webhook(
        &addr,
        Some(format!("http://{}/webhook", dead_store_addr())),
    );

    let resp = submit(data, Json(lead("Walter Fields", "813-555-0101")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(doc["name"], "Walter Fields");
    assert_eq!(doc["status"], "new");

    let stored = OUTAGE_LEADS.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["name"], "Walter Fields");
    assert_eq!(stored[0]["status"], "new");
}
