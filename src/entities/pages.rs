//! View models for every route the renderer serves. Composition is pure:
//! callers fetch the records, these functions shape them. Optional CMS copy
//! always falls back to templated text so the renderer never null-checks.

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::Value;

use crate::schemas::{
    Benefit, CityPage, ConsumerProtection, Faq, HowItWorksStep, Regulations, Service, StatePage,
};

use super::markup;
use super::states::{regulator, regulator_short, StateGroup};

pub const SITE_NAME: &str = "TitleCash";

#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
}

impl Breadcrumb {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

pub fn home_crumb() -> Breadcrumb {
    Breadcrumb::new("Home", "/")
}

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub badge: String,
    pub headline: String,
    pub subheadline: String,
}

/// Local phone pair: human-readable display plus the `tel:` href. Branches
/// without an area code fall back to the national 800 line.
#[derive(Debug, Clone, Serialize)]
pub struct Phone {
    pub display: String,
    pub href: String,
}

pub fn local_phone(area_code: Option<&str>) -> Phone {
    let area = match area_code {
        Some(area) if !area.is_empty() => area,
        _ => "800",
    };

    Phone {
        display: format!("({}) 555-1234", area),
        href: format!("tel:+1{}5551234", area),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceTeaser {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub route: String,
}

impl From<&Service> for ServiceTeaser {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            slug: service.slug.clone(),
            short_description: service.short_description.clone().unwrap_or_default(),
            route: format!("/services/{}", service.slug),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CityLink {
    pub city: String,
    pub slug: String,
    pub route: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateTeaser {
    pub name: String,
    pub slug: String,
    pub state_code: String,
    pub route: String,
    pub city_count: usize,
    pub cities: Vec<CityLink>,
}

fn state_teaser(group: &StateGroup, city_cap: usize) -> StateTeaser {
    StateTeaser {
        name: group.name.clone(),
        slug: group.slug.clone(),
        state_code: group.state_code.clone(),
        route: format!("/locations/{}", group.slug),
        city_count: group.cities.len(),
        cities: group
            .cities
            .iter()
            .take(city_cap)
            .map(|location| CityLink {
                city: location.city.clone(),
                slug: location.slug.clone(),
                route: format!("/locations/{}/{}", group.slug, location.slug),
            })
            .collect(),
    }
}

/// Header/footer data plus the site-wide default metadata.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    pub meta: PageMeta,
    pub services: Vec<ServiceTeaser>,
    pub states: Vec<StateTeaser>,
}

pub fn navigation_view(services: &[Service], states: &[StateGroup]) -> NavigationView {
    NavigationView {
        meta: PageMeta::new(
            "TitleCash - Fast Title Loans | Get Cash Today",
            "Get fast cash with a title loan. Keep driving your car while you repay. \
             Licensed lender serving California and Florida. Bad credit OK. Same day funding.",
        ),
        services: services.iter().map(ServiceTeaser::from).collect(),
        states: states.iter().map(|group| state_teaser(group, 0)).collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub meta: PageMeta,
    pub hero: Hero,
    pub services: Vec<ServiceTeaser>,
    pub states: Vec<StateTeaser>,
    pub faqs: Vec<Faq>,
    pub markup: Vec<Value>,
}

pub fn home_view(site_url: &str, services: &[Service], states: &[StateGroup]) -> HomeView {
    let faqs = homepage_faqs();

    HomeView {
        meta: PageMeta::new(
            "Get Cash Fast with Auto Title Loans | Licensed & Trusted",
            "Need cash today? Get approved for a title loan in minutes. Keep driving \
             your car while you borrow. Licensed lenders in California and Florida. Bad credit OK.",
        ),
        hero: Hero {
            badge: "Licensed Lenders - Fast Approval".to_string(),
            headline: "Get Cash Today with Your Car Title".to_string(),
            subheadline: "Borrow up to $25,000 using your car as collateral. Keep driving \
                          while you repay. Bad credit OK. Get approved in minutes, funded in hours."
                .to_string(),
        },
        services: services.iter().take(4).map(ServiceTeaser::from).collect(),
        states: states.iter().map(|group| state_teaser(group, 4)).collect(),
        markup: vec![
            markup::organization(
                site_url,
                "Licensed title loan services in California and Florida. Fast approval, \
                 same-day funding, bad credit OK.",
                &["California", "Florida"],
            ),
            markup::faq_page(&faqs),
        ],
        faqs,
    }
}

fn homepage_faqs() -> Vec<Faq> {
    let copy = [
        (
            "What is a title loan?",
            "A title loan is a secured loan where you use your car's title as collateral. \
             You can borrow money based on your car's value while continuing to drive it. \
             The lender holds onto the title until you repay the loan in full.",
        ),
        (
            "How much can I borrow?",
            "You can typically borrow between $1,000 and $25,000 depending on your car's \
             value, condition, and mileage. The loan amount is usually 25-50% of your \
             vehicle's current market value.",
        ),
        (
            "Can I get approved with bad credit?",
            "Yes! Title loans are secured by your vehicle, so your credit score is not the \
             primary factor. We approve customers with all credit types, including bad \
             credit, no credit, bankruptcy, or repossession.",
        ),
        (
            "What do I need to apply?",
            "You'll need: (1) A clear car title in your name, (2) Valid government-issued \
             ID, (3) Proof of income, (4) Proof of residence, (5) Vehicle insurance, and \
             (6) References. The application takes about 5 minutes to complete.",
        ),
        (
            "Do I have to give up my car?",
            "No! You keep driving your car throughout the entire loan period. We only hold \
             the title as collateral. Once you repay the loan in full, we return your \
             title immediately.",
        ),
    ];

    copy.iter()
        .map(|(question, answer)| Faq {
            id: None,
            question: question.to_string(),
            answer: answer.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicesIndexView {
    pub meta: PageMeta,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub services: Vec<ServiceTeaser>,
}

pub fn services_index_view(services: &[Service]) -> ServicesIndexView {
    ServicesIndexView {
        meta: PageMeta::new(
            "Our Services - Title Loan Options",
            "Explore our title loan services including auto title loans, car title loans, \
             emergency title loans, and more. Licensed lender in California and Florida.",
        ),
        breadcrumbs: vec![home_crumb(), Breadcrumb::new("Services", "/services")],
        services: services.iter().map(ServiceTeaser::from).collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub meta: PageMeta,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub hero: Hero,
    pub name: String,
    pub slug: String,
    pub route: String,
    pub full_description: String,
    pub benefits: Vec<Benefit>,
    pub how_it_works: Vec<HowItWorksStep>,
    pub faqs: Vec<Faq>,
    pub related: Vec<ServiceTeaser>,
    pub markup: Vec<Value>,
}

pub fn service_view(site_url: &str, service: &Service, all_services: &[Service]) -> ServiceView {
    let route = format!("/services/{}", service.slug);
    let short = service.short_description.clone().unwrap_or_default();

    let mut markup = vec![markup::service(site_url, &service.name, &short, &route)];
    if !service.faqs.is_empty() {
        markup.push(markup::faq_page(&service.faqs));
    }

    ServiceView {
        meta: PageMeta::new(
            format!("{} - Fast Approval, Same Day Funding", service.name),
            short.clone(),
        ),
        breadcrumbs: vec![
            home_crumb(),
            Breadcrumb::new("Services", "/services"),
            Breadcrumb::new(service.name.clone(), route.clone()),
        ],
        hero: Hero {
            badge: "Licensed in CA & FL".to_string(),
            headline: service.name.clone(),
            subheadline: short,
        },
        name: service.name.clone(),
        slug: service.slug.clone(),
        route,
        full_description: service.full_description.clone().unwrap_or_default(),
        benefits: service.benefits.clone(),
        how_it_works: service.how_it_works.clone(),
        faqs: service.faqs.clone(),
        related: all_services
            .iter()
            .filter(|other| other.slug != service.slug)
            .take(3)
            .map(ServiceTeaser::from)
            .collect(),
        markup,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationsIndexView {
    pub meta: PageMeta,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub states: Vec<StateTeaser>,
}

pub fn locations_index_view(states: &[StateGroup]) -> LocationsIndexView {
    LocationsIndexView {
        meta: PageMeta::new(
            "Locations - Find Title Loans Near You",
            "Find title loan locations in California and Florida. Fast approval, same-day \
             funding. Licensed lender serving major cities.",
        ),
        breadcrumbs: vec![home_crumb(), Breadcrumb::new("Locations", "/locations")],
        states: states.iter().map(|group| state_teaser(group, 8)).collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StateCityLink {
    pub city: String,
    pub county: String,
    pub slug: String,
    pub route: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateView {
    pub meta: PageMeta,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub hero: Hero,
    pub name: String,
    pub state_code: String,
    pub slug: String,
    pub route: String,
    pub cities_served: usize,
    pub services: Vec<ServiceTeaser>,
    pub cities: Vec<StateCityLink>,
    pub legal_status: String,
    pub regulations: Regulations,
    pub protections: Vec<ConsumerProtection>,
    pub consumer_information: String,
    pub faqs: Vec<Faq>,
}

pub fn state_view(
    page: &StatePage,
    groups: &[StateGroup],
    city_pages: &[CityPage],
    services: &[Service],
) -> StateView {
    let name = page.state.clone();
    let slug = page.slug.clone();
    let route = format!("/locations/{}", slug);

    let cities_served = groups
        .iter()
        .find(|group| group.slug == slug)
        .map(|group| group.cities.len())
        .filter(|count| *count > 0)
        .unwrap_or(city_pages.len());

    let cities = city_pages
        .iter()
        .map(|city_page| {
            let location = city_page.location.as_ref();
            StateCityLink {
                city: location.map(|l| l.city.clone()).unwrap_or_default(),
                county: location.and_then(|l| l.county.clone()).unwrap_or_default(),
                slug: city_page.slug.clone(),
                route: format!("/locations/{}/{}", slug, city_page.slug),
            }
        })
        .collect();

    let key_points = &page.city_page_content.key_points;
    let faqs = if key_points.is_empty() {
        Vec::new()
    } else {
        vec![
            Faq {
                id: None,
                question: format!("Are title loans legal in {}?", name),
                answer: page.legal_status.clone().unwrap_or_default(),
            },
            Faq {
                id: None,
                question: format!("How do I apply for a title loan in {}?", name),
                answer: format!(
                    "Apply online or visit any of our {} locations. Bring your car title, \
                     ID, proof of income, and proof of residence. Most applications are \
                     approved within 30 minutes.",
                    name,
                ),
            },
            Faq {
                id: None,
                question: format!("What are my rights as a {} borrower?", name),
                answer: key_points
                    .iter()
                    .take(3)
                    .map(|key_point| key_point.point.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            },
        ]
    };

    StateView {
        meta: PageMeta::new(
            page.meta_title.clone().unwrap_or_else(|| {
                format!("Title Loans in {} - {} Locations", name, page.state_code)
            }),
            page.meta_description.clone().unwrap_or_else(|| {
                format!(
                    "Find title loans in {}. Licensed lender serving cities across {}. \
                     Fast approval, same-day funding.",
                    name, page.state_code,
                )
            }),
        ),
        breadcrumbs: vec![
            home_crumb(),
            Breadcrumb::new("Locations", "/locations"),
            Breadcrumb::new(name.clone(), route.clone()),
        ],
        hero: Hero {
            badge: format!("Serving {} Cities in {}", cities_served, page.state_code),
            headline: format!("Title Loans in {}", name),
            subheadline: format!(
                "Get fast title loans at any of our {} locations. Licensed by {}. \
                 Same-day funding available.",
                name,
                regulator_short(&page.state_code),
            ),
        },
        name: name.clone(),
        state_code: page.state_code.clone(),
        slug,
        route,
        cities_served,
        services: services.iter().take(4).map(ServiceTeaser::from).collect(),
        cities,
        legal_status: page.legal_status.clone().unwrap_or_default(),
        regulations: page.regulations.clone(),
        protections: page.consumer_protections.iter().take(5).cloned().collect(),
        consumer_information: format!(
            "This information is for general guidance only. {} title loans are regulated \
             by {}. Consult with a licensed attorney or contact the regulatory body for \
             the most current information.",
            name,
            regulator(&page.state_code),
        ),
        faqs,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaticView {
    pub meta: PageMeta,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub markup: Vec<Value>,
}

lazy_static! {
    static ref STATIC_PAGES: Vec<(&'static str, &'static str, &'static str)> = vec![
        (
            "about",
            "About Us - TitleCash | Licensed Title Loan Lender",
            "Learn about TitleCash, a licensed title loan lender serving California and \
             Florida. Our mission is to provide fast, fair, and transparent title loans.",
        ),
        (
            "contact",
            "Contact Us - TitleCash | Get in Touch",
            "Contact TitleCash for questions about title loans. Call us, email us, or \
             visit one of our California or Florida locations.",
        ),
        (
            "apply",
            "Apply for a Title Loan - TitleCash | Fast Approval",
            "Apply for a title loan online with TitleCash. Fast approval, same-day \
             funding. Licensed lender serving California and Florida.",
        ),
    ];
}

/// Metadata for the fixed marketing pages. Unknown names signal 404.
pub fn static_page_view(site_url: &str, name: &str) -> Option<StaticView> {
    let (slug, title, description) = STATIC_PAGES
        .iter()
        .find(|(slug, _, _)| *slug == name)
        .copied()?;

    let markup = if slug == "about" {
        vec![markup::organization(
            site_url,
            "Licensed title loan lender serving California and Florida. Fast approval, \
             same-day funding, transparent terms.",
            &["California", "Florida"],
        )]
    } else {
        Vec::new()
    };

    Some(StaticView {
        meta: PageMeta::new(title, description),
        breadcrumbs: vec![
            home_crumb(),
            Breadcrumb::new(capitalize(slug), format!("/{}", slug)),
        ],
        markup,
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
