//! City landing page composition. Every optional CMS field resolves to a
//! templated fallback at compose time, so a thin row still yields a complete
//! page and the renderer never branches on missing copy.

use serde::Serialize;
use serde_json::Value;

use crate::schemas::{CityPage, ConsumerProtection, Faq, LocalFacts, Regulations, Service};

use super::markup::{self, BranchSchema};
use super::pages::{home_crumb, local_phone, Breadcrumb, Hero, PageMeta, Phone, ServiceTeaser};
use super::states::{regulator, state_code_for_slug, state_name_for_slug, state_slug};

#[derive(Debug, Clone, Serialize)]
pub struct NearbyCity {
    pub city: String,
    pub slug: String,
    pub state_slug: String,
    pub route: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalProof {
    pub heading: String,
    pub text: String,
}

/// Name, address, phone block. Display fields only; the structured data
/// equivalent lives in the page markup.
#[derive(Debug, Clone, Serialize)]
pub struct Nap {
    pub business_name: String,
    pub address: String,
    pub phone: Phone,
    pub hours: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicesSection {
    pub heading: String,
    pub text: String,
    pub services: Vec<ServiceTeaser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceSection {
    pub heading: String,
    pub text: String,
    pub regulations: Regulations,
    pub protections: Vec<ConsumerProtection>,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityView {
    pub slug: String,
    pub city: String,
    pub state: String,
    pub state_code: String,
    pub state_slug: String,
    pub route: String,
    pub meta: PageMeta,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub hero: Hero,
    pub phone: Phone,
    pub local_proof: LocalProof,
    pub facts: LocalFacts,
    pub county: String,
    pub population: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub branch_photo_url: Option<String>,
    pub nap: Nap,
    pub services: ServicesSection,
    pub compliance: ComplianceSection,
    pub faqs: Vec<Faq>,
    pub nearby: Vec<NearbyCity>,
    pub markup: Vec<Value>,
}

/// Shape a city page row into its view. The location and state page
/// relationships may be unpopulated; identity then falls back to the route's
/// state slug and the page's own slug.
pub fn compose(
    page: &CityPage,
    services: &[Service],
    site_url: &str,
    route_state_slug: &str,
) -> CityView {
    let location = page.location.as_ref();

    let city = location.map(|l| l.city.clone()).unwrap_or_default();
    let state = location
        .map(|l| l.state.clone())
        .unwrap_or_else(|| state_name_for_slug(route_state_slug));
    let state_code = location
        .map(|l| l.state_code.clone())
        .unwrap_or_else(|| state_code_for_slug(route_state_slug));
    let route = format!("/locations/{}/{}", route_state_slug, page.slug);

    let phone = local_phone(location.map(|l| l.area_code.as_str()));
    let facts = location.map(|l| l.local_facts.clone()).unwrap_or_default();
    let county = location.and_then(|l| l.county.clone()).unwrap_or_default();

    let local_proof = LocalProof {
        heading: format!("Where to Find Us in {}", city),
        text: page
            .local_proof_content
            .clone()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                let mut text = format!(
                    "Our {} branch is conveniently located in {} County",
                    city, county,
                );
                if let Some(landmark) = facts.landmarks.first() {
                    text.push_str(&format!(", near {}", landmark.name));
                }
                if let Some(highway) = facts.highways.first() {
                    text.push_str(&format!(". Easy access from {}", highway.name));
                }
                if let Some(exit) = facts.exits.first() {
                    text.push_str(&format!(" via {}", exit.name));
                }
                text.push('.');
                text
            }),
    };

    let nap = Nap {
        business_name: page
            .nap_content
            .business_name
            .clone()
            .unwrap_or_else(|| format!("TitleCash {}", city)),
        address: page
            .nap_content
            .address
            .clone()
            .unwrap_or_else(|| format!("{}, {}", city, state_code)),
        phone: phone.clone(),
        hours: page
            .nap_content
            .hours
            .clone()
            .unwrap_or_else(|| "Mon-Fri 9:00 AM - 6:00 PM".to_string()),
    };

    let state_page = page.state_page.as_ref();
    let compliance = ComplianceSection {
        heading: format!("Understanding Title Loans in {}", state),
        text: page
            .compliance_content
            .clone()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Residents of {} are protected by {} lending regulations. We are a \
                     licensed lender and comply with all state requirements.",
                    city, state,
                )
            }),
        regulations: state_page
            .map(|page| page.regulations.clone())
            .unwrap_or_default(),
        protections: state_page
            .map(|page| page.consumer_protections.iter().take(3).cloned().collect())
            .unwrap_or_default(),
        disclaimer: state_page
            .and_then(|page| page.disclaimer.clone())
            .unwrap_or_else(|| {
                format!(
                    "This information is for general guidance only. {} title loans are \
                     regulated by {}. Consult with a licensed attorney or contact the \
                     regulatory body for the most current information.",
                    state,
                    regulator(&state_code),
                )
            }),
    };

    let nearby = page
        .nearby_locations
        .iter()
        .take(4)
        .map(|neighbor| {
            let neighbor_state = state_slug(&neighbor.state_code);
            NearbyCity {
                city: neighbor.city.clone(),
                slug: neighbor.slug.clone(),
                route: format!("/locations/{}/{}", neighbor_state, neighbor.slug),
                state_slug: neighbor_state,
            }
        })
        .collect();

    let services = ServicesSection {
        heading: format!("Services Available in {}", city),
        text: page
            .services_content
            .clone()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "All title loan services available at this location.".to_string()),
        services: services.iter().take(4).map(ServiceTeaser::from).collect(),
    };

    // Structured data prefers the CMS phone and raw address over the display
    // fallbacks used in the NAP block.
    let telephone = page
        .nap_content
        .phone
        .clone()
        .unwrap_or_else(|| phone.display.clone());
    let mut markup = vec![markup::financial_service(
        site_url,
        &BranchSchema {
            business_name: &nap.business_name,
            city: &city,
            state: &state,
            state_code: &state_code,
            address: page.nap_content.address.as_deref().unwrap_or_default(),
            phone: &telephone,
            latitude: location.and_then(|l| l.latitude),
            longitude: location.and_then(|l| l.longitude),
            url: &route,
        },
    )];
    if !page.faqs.is_empty() {
        markup.push(markup::faq_page(&page.faqs));
    }

    CityView {
        meta: PageMeta::new(
            page.meta_title
                .clone()
                .unwrap_or_else(|| format!("Title Loans in {}, {}", city, state_code)),
            page.meta_description.clone().unwrap_or_else(|| {
                format!(
                    "Get fast title loans in {}, {}. Licensed lender, same-day funding. \
                     Apply online or visit our local branch.",
                    city, state_code,
                )
            }),
        ),
        breadcrumbs: vec![
            home_crumb(),
            Breadcrumb::new("Locations", "/locations"),
            Breadcrumb::new(state.clone(), format!("/locations/{}", route_state_slug)),
            Breadcrumb::new(
                if city.is_empty() {
                    page.slug.clone()
                } else {
                    city.clone()
                },
                route.clone(),
            ),
        ],
        hero: Hero {
            badge: format!("{}, {} Branch", city, state_code),
            headline: page
                .hero_headline
                .clone()
                .unwrap_or_else(|| format!("Title Loans in {}, {}", city, state_code)),
            subheadline: page.hero_subheadline.clone().unwrap_or_else(|| {
                format!(
                    "Get fast cash using your car title at our {} location. Licensed \
                     lender, same-day funding available.",
                    city,
                )
            }),
        },
        slug: page.slug.clone(),
        city,
        state,
        state_code,
        state_slug: route_state_slug.to_string(),
        route,
        phone,
        local_proof,
        county,
        population: location.and_then(|l| l.population),
        latitude: location.and_then(|l| l.latitude),
        longitude: location.and_then(|l| l.longitude),
        branch_photo_url: page.branch_photo_url.clone(),
        facts,
        nap,
        services,
        compliance,
        faqs: page.faqs.clone(),
        nearby,
        markup,
    }
}
