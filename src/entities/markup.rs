//! schema.org JSON-LD blocks embedded in the view models. The renderer
//! inlines them verbatim inside `application/ld+json` script tags.

use serde_json::{json, Value};

use crate::schemas::Faq;

/// Inputs for the per-branch FinancialService block.
#[derive(Debug, Clone)]
pub struct BranchSchema<'a> {
    pub business_name: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub state_code: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub url: &'a str,
}

pub fn financial_service(site_url: &str, branch: &BranchSchema) -> Value {
    let id = format!("{}{}", site_url, branch.url);
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "FinancialService",
        "name": branch.business_name,
        "@id": id,
        "url": id,
        "telephone": branch.phone,
        "priceRange": "$",
        "address": {
            "@type": "PostalAddress",
            "streetAddress": branch.address,
            "addressLocality": branch.city,
            "addressRegion": branch.state_code,
            "addressCountry": "US",
        },
        "openingHoursSpecification": {
            "@type": "OpeningHoursSpecification",
            "dayOfWeek": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
            "opens": "09:00",
            "closes": "18:00",
        },
        "parentOrganization": {
            "@type": "Organization",
            "name": "TitleCash",
            "url": site_url,
        },
        "areaServed": {
            "@type": "City",
            "name": branch.city,
            "containedIn": {
                "@type": "State",
                "name": branch.state,
            },
        },
        "serviceType": "Title Loans",
        "description": format!(
            "Fast title loans in {}, {}. Get cash using your car title as collateral. Licensed lender, same-day funding.",
            branch.city, branch.state_code,
        ),
    });

    if let (Some(latitude), Some(longitude)) = (branch.latitude, branch.longitude) {
        schema["geo"] = json!({
            "@type": "GeoCoordinates",
            "latitude": latitude,
            "longitude": longitude,
        });
    }

    schema
}

pub fn service(site_url: &str, name: &str, description: &str, url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "name": name,
        "description": description,
        "provider": {
            "@type": "Organization",
            "name": "TitleCash",
            "url": site_url,
        },
        "url": format!("{}{}", site_url, url),
        "areaServed": [
            { "@type": "State", "name": "California" },
            { "@type": "State", "name": "Florida" },
        ],
    })
}

pub fn faq_page(faqs: &[Faq]) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": faqs
            .iter()
            .map(|faq| {
                json!({
                    "@type": "Question",
                    "name": faq.question,
                    "acceptedAnswer": {
                        "@type": "Answer",
                        "text": faq.answer,
                    },
                })
            })
            .collect::<Vec<_>>(),
    })
}

pub fn organization(site_url: &str, description: &str, area_served: &[&str]) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": "TitleCash",
        "url": site_url,
        "description": description,
        "contactPoint": {
            "@type": "ContactPoint",
            "telephone": "+1-800-555-1234",
            "contactType": "customer service",
            "availableLanguage": ["English", "Spanish"],
        },
        "areaServed": area_served
            .iter()
            .map(|state| json!({ "@type": "State", "name": state }))
            .collect::<Vec<_>>(),
        "sameAs": [],
    })
}
