mod cms;
mod records;

pub mod collections;

pub use cms::{Cms, CmsConfig, CmsError};
pub use records::*;

// Collection slugs as the CMS exposes them.
pub const SERVICES: &str = "services";
pub const LOCATIONS: &str = "locations";
pub const STATE_PAGES: &str = "state-pages";
pub const CITY_PAGES: &str = "city-pages";
pub const LEADS: &str = "leads";
