use serde::{Deserialize, Serialize};

/// Single row of a named-item array (landmarks, highways, exits, neighboring
/// cities). The CMS wraps each entry in an object carrying a row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalFacts {
    #[serde(default)]
    pub landmarks: Vec<NamedItem>,

    #[serde(default)]
    pub highways: Vec<NamedItem>,

    #[serde(default)]
    pub exits: Vec<NamedItem>,

    #[serde(rename = "neighboringCities", default)]
    pub neighboring_cities: Vec<NamedItem>,
}

/// Physical branch record. One row per city served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub city: String,
    pub state: String,

    #[serde(rename = "stateCode")]
    pub state_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,

    pub slug: String,

    #[serde(rename = "areaCode")]
    pub area_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(rename = "localFacts", default)]
    pub local_facts: LocalFacts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Regulations {
    #[serde(rename = "maxAPR", default, skip_serializing_if = "Option::is_none")]
    pub max_apr: Option<String>,

    #[serde(
        rename = "maxLoanAmount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_loan_amount: Option<String>,

    #[serde(
        rename = "maxLoanTerm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_loan_term: Option<String>,

    #[serde(rename = "maxLTV", default, skip_serializing_if = "Option::is_none")]
    pub max_ltv: Option<String>,

    #[serde(
        rename = "licensingRequired",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub licensing_required: Option<bool>,

    #[serde(
        rename = "regulatoryBody",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub regulatory_body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fees {
    #[serde(
        rename = "originationFee",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub origination_fee: Option<String>,

    #[serde(
        rename = "latePaymentFee",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub late_payment_fee: Option<String>,

    #[serde(
        rename = "prepaymentPenalty",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub prepayment_penalty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerProtection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub protection: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub point: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub warning: String,
}

/// Pre-written per-state copy reused on every city page of that state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityPageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    #[serde(rename = "keyPoints", default)]
    pub key_points: Vec<KeyPoint>,

    #[serde(default)]
    pub warnings: Vec<Warning>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,
    pub url: String,
}

/// Regulatory page record, one row per state the lender operates in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatePage {
    pub id: i64,
    pub state: String,

    #[serde(rename = "stateCode")]
    pub state_code: String,

    pub slug: String,

    #[serde(rename = "metaTitle", default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,

    #[serde(
        rename = "metaDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub meta_description: Option<String>,

    #[serde(
        rename = "legalStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub legal_status: Option<String>,

    #[serde(default)]
    pub regulations: Regulations,

    #[serde(default)]
    pub fees: Fees,

    #[serde(rename = "consumerProtections", default)]
    pub consumer_protections: Vec<ConsumerProtection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    #[serde(rename = "cityPageContent", default)]
    pub city_page_content: CityPageContent,

    #[serde(default)]
    pub sources: Vec<SourceLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NapContent {
    #[serde(
        rename = "businessName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub business_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub question: String,
    pub answer: String,
}

/// City landing page record. Relationships come back inlined when the fetch
/// depth covers them, so `location` and `state_page` are full objects here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityPage {
    pub id: i64,
    pub title: String,
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(rename = "statePage", default, skip_serializing_if = "Option::is_none")]
    pub state_page: Option<StatePage>,

    #[serde(rename = "metaTitle", default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,

    #[serde(
        rename = "metaDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub meta_description: Option<String>,

    #[serde(
        rename = "heroHeadline",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_headline: Option<String>,

    #[serde(
        rename = "heroSubheadline",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_subheadline: Option<String>,

    #[serde(
        rename = "branchPhotoUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub branch_photo_url: Option<String>,

    #[serde(
        rename = "localProofContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub local_proof_content: Option<String>,

    #[serde(
        rename = "servicesContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub services_content: Option<String>,

    #[serde(
        rename = "complianceContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub compliance_content: Option<String>,

    #[serde(rename = "napContent", default)]
    pub nap_content: NapContent,

    #[serde(default)]
    pub faqs: Vec<Faq>,

    #[serde(rename = "nearbyLocations", default)]
    pub nearby_locations: Vec<Location>,

    #[serde(
        rename = "schemaType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benefit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HowItWorksStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Loan product record (title loan, refinance, buyout and so on).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub slug: String,

    #[serde(
        rename = "shortDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub short_description: Option<String>,

    #[serde(
        rename = "fullDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub full_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub benefits: Vec<Benefit>,

    #[serde(rename = "howItWorks", default)]
    pub how_it_works: Vec<HowItWorksStep>,

    #[serde(default)]
    pub faqs: Vec<Faq>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Inbound loan application, pushed to the CMS and forwarded to the webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(
        rename = "vehicleYear",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_year: Option<String>,

    #[serde(
        rename = "vehicleMake",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_make: Option<String>,

    #[serde(
        rename = "vehicleModel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_model: Option<String>,

    #[serde(
        rename = "loanAmount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub loan_amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(
        rename = "sourcePage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_page: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
