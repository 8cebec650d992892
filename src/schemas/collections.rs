//! Collection layout of the headless CMS, mirrored as declarative
//! configuration. Nothing here executes against the store; the catalog
//! feeds lead validation and the SEO length caps applied to page metadata.

use super::{CITY_PAGES, LEADS, LOCATIONS, SERVICES, STATE_PAGES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Number,
    Checkbox,
    Select,
    Group,
    Array,
    Relationship,
}

/// Who may perform a collection operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anyone,
    Authenticated,
    /// Admin or editor role.
    Editors,
    Admins,
}

#[derive(Debug, Clone, Copy)]
pub struct AccessRules {
    pub read: Access,
    pub create: Access,
    pub update: Access,
    pub delete: Access,
}

const OPEN_ACCESS: AccessRules = AccessRules {
    read: Access::Anyone,
    create: Access::Anyone,
    update: Access::Anyone,
    delete: Access::Anyone,
};

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub unique: bool,
    pub max_length: Option<u32>,
    pub default_value: Option<&'static str>,
    pub options: &'static [&'static str],
    pub fields: &'static [FieldDef],
}

impl FieldDef {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            unique: false,
            max_length: None,
            default_value: None,
            options: &[],
            fields: &[],
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    const fn max_length(mut self, limit: u32) -> Self {
        self.max_length = Some(limit);
        self
    }

    const fn default_value(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    const fn fields(mut self, fields: &'static [FieldDef]) -> Self {
        self.fields = fields;
        self
    }
}

const fn text(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldKind::Text)
}

const fn textarea(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldKind::Textarea)
}

const fn number(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldKind::Number)
}

const fn array(name: &'static str, fields: &'static [FieldDef]) -> FieldDef {
    FieldDef::new(name, FieldKind::Array).fields(fields)
}

const fn group(name: &'static str, fields: &'static [FieldDef]) -> FieldDef {
    FieldDef::new(name, FieldKind::Group).fields(fields)
}

#[derive(Debug, Clone)]
pub struct CollectionDef {
    pub slug: &'static str,
    pub access: AccessRules,
    pub fields: &'static [FieldDef],
}

const NAMED_ROW: &[FieldDef] = &[text("name").required()];

const FAQ_ROW: &[FieldDef] = &[
    text("question").required(),
    textarea("answer").required(),
];

const SERVICE_FIELDS: &[FieldDef] = &[
    text("name").required(),
    text("slug").required().unique(),
    textarea("shortDescription").max_length(200),
    textarea("fullDescription"),
    text("icon"),
    array(
        "benefits",
        &[text("title").required(), text("description")],
    ),
    array(
        "howItWorks",
        &[
            number("step").required(),
            text("title").required(),
            text("description"),
        ],
    ),
    array("faqs", FAQ_ROW),
    number("order"),
];

const LOCATION_FIELDS: &[FieldDef] = &[
    text("city").required(),
    text("state").required(),
    text("stateCode").required().max_length(2),
    text("county"),
    text("slug").required().unique(),
    text("areaCode").required().max_length(3),
    number("population"),
    number("latitude"),
    number("longitude"),
    group(
        "localFacts",
        &[
            array("landmarks", NAMED_ROW),
            array("highways", NAMED_ROW),
            array("exits", NAMED_ROW),
            array("neighboringCities", NAMED_ROW),
        ],
    ),
];

const STATE_PAGE_FIELDS: &[FieldDef] = &[
    text("state").required(),
    text("stateCode").required().unique().max_length(2),
    text("slug").required().unique(),
    text("metaTitle").max_length(70),
    textarea("metaDescription").max_length(160),
    text("legalStatus"),
    group(
        "regulations",
        &[
            text("maxAPR"),
            text("maxLoanAmount"),
            text("maxLoanTerm"),
            text("maxLTV"),
            FieldDef::new("licensingRequired", FieldKind::Checkbox).default_value("true"),
            text("regulatoryBody"),
        ],
    ),
    group(
        "fees",
        &[
            text("originationFee"),
            text("latePaymentFee"),
            text("prepaymentPenalty"),
        ],
    ),
    array(
        "consumerProtections",
        &[text("protection").required(), textarea("description")],
    ),
    textarea("disclaimer"),
    group(
        "cityPageContent",
        &[
            text("headline"),
            textarea("intro"),
            array("keyPoints", &[text("point").required()]),
            array("warnings", &[text("warning").required()]),
            textarea("disclaimer"),
        ],
    ),
    array(
        "sources",
        &[text("title").required(), text("url").required()],
    ),
];

const CITY_PAGE_FIELDS: &[FieldDef] = &[
    text("title").required(),
    text("slug").required().unique(),
    FieldDef::new("location", FieldKind::Relationship).required(),
    FieldDef::new("statePage", FieldKind::Relationship),
    text("metaTitle").max_length(70),
    textarea("metaDescription").max_length(160),
    text("heroHeadline"),
    text("heroSubheadline"),
    text("branchPhotoUrl"),
    textarea("localProofContent"),
    textarea("servicesContent"),
    textarea("complianceContent"),
    group(
        "napContent",
        &[
            text("businessName"),
            text("address"),
            text("phone"),
            text("hours"),
        ],
    ),
    array("faqs", FAQ_ROW),
    FieldDef::new("nearbyLocations", FieldKind::Relationship),
    FieldDef::new("schemaType", FieldKind::Select)
        .default_value("FinancialService")
        .options(&["FinancialService", "LocalBusiness"]),
    FieldDef::new("status", FieldKind::Select)
        .default_value("draft")
        .options(&["draft", "published"]),
];

const LEAD_FIELDS: &[FieldDef] = &[
    text("name").required(),
    FieldDef::new("email", FieldKind::Email),
    text("phone").required(),
    text("city"),
    text("state"),
    text("vehicleYear"),
    text("vehicleMake"),
    text("vehicleModel"),
    text("loanAmount"),
    text("source"),
    text("sourcePage"),
    FieldDef::new("status", FieldKind::Select)
        .default_value("new")
        .options(&["new", "contacted", "qualified", "converted", "closed"]),
    textarea("notes"),
];

const CATALOG: &[CollectionDef] = &[
    CollectionDef {
        slug: SERVICES,
        access: OPEN_ACCESS,
        fields: SERVICE_FIELDS,
    },
    CollectionDef {
        slug: LOCATIONS,
        access: OPEN_ACCESS,
        fields: LOCATION_FIELDS,
    },
    CollectionDef {
        slug: STATE_PAGES,
        access: OPEN_ACCESS,
        fields: STATE_PAGE_FIELDS,
    },
    CollectionDef {
        slug: CITY_PAGES,
        access: OPEN_ACCESS,
        fields: CITY_PAGE_FIELDS,
    },
    CollectionDef {
        slug: LEADS,
        access: AccessRules {
            read: Access::Authenticated,
            create: Access::Anyone,
            update: Access::Editors,
            delete: Access::Admins,
        },
        fields: LEAD_FIELDS,
    },
];

pub fn catalog() -> &'static [CollectionDef] {
    CATALOG
}

pub fn collection(slug: &str) -> Option<&'static CollectionDef> {
    CATALOG.iter().find(|def| def.slug == slug)
}

/// Names of the top-level fields a submission must carry. Relationship
/// fields are excluded; they are wired by the store, not by submitters.
pub fn required_fields(slug: &str) -> Vec<&'static str> {
    match collection(slug) {
        Some(def) => def
            .fields
            .iter()
            .filter(|field| field.required && field.kind != FieldKind::Relationship)
            .map(|field| field.name)
            .collect(),
        None => Vec::new(),
    }
}

pub fn field_max_length(slug: &str, field: &str) -> Option<u32> {
    collection(slug)?
        .fields
        .iter()
        .find(|def| def.name == field)?
        .max_length
}
