use std::collections::HashMap;

use itertools::Itertools;
use lazy_static::lazy_static;
use serde::Serialize;

use crate::schemas::Location;

lazy_static! {
    // Slug mapping used everywhere a state code turns into a URL segment.
    // Historically this lived at three call sites; keep it in one place.
    static ref STATE_SLUGS: HashMap<&'static str, (&'static str, &'static str)> = {
        let mut m = HashMap::new();
        m.insert("CA", ("california", "California"));
        m.insert("FL", ("florida", "Florida"));
        m
    };

    static ref REGULATORS: HashMap<&'static str, (&'static str, &'static str)> = {
        let mut m = HashMap::new();
        m.insert(
            "CA",
            ("the Department of Financial Protection and Innovation (DFPI)", "DFPI"),
        );
        m.insert("FL", ("the Office of Financial Regulation (OFR)", "OFR"));
        m
    };
}

/// URL segment for a state code: "CA" maps to "california", "FL" to
/// "florida", anything else to the lowercased code.
pub fn state_slug(code: &str) -> String {
    match STATE_SLUGS.get(code.to_uppercase().as_str()) {
        Some((slug, _)) => slug.to_string(),
        None => code.to_lowercase(),
    }
}

/// Inverse of [`state_slug`], for route handlers that start from the URL.
pub fn state_code_for_slug(slug: &str) -> String {
    for (code, (known, _)) in STATE_SLUGS.iter() {
        if *known == slug {
            return code.to_string();
        }
    }

    slug.to_uppercase()
}

/// Display name for a state slug when no record supplies one.
pub fn state_name_for_slug(slug: &str) -> String {
    for (_, (known, name)) in STATE_SLUGS.iter() {
        if *known == slug {
            return name.to_string();
        }
    }

    slug.to_uppercase()
}

/// Full name of the state lending regulator, used in compliance copy.
pub fn regulator(code: &str) -> String {
    match REGULATORS.get(code.to_uppercase().as_str()) {
        Some((full, _)) => full.to_string(),
        None => "the state financial regulator".to_string(),
    }
}

/// Short regulator name for hero copy ("Licensed by DFPI").
pub fn regulator_short(code: &str) -> String {
    match REGULATORS.get(code.to_uppercase().as_str()) {
        Some((_, short)) => short.to_string(),
        None => "the state regulator".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StateGroup {
    pub name: String,
    pub slug: String,
    pub state_code: String,
    pub cities: Vec<Location>,
}

/// Groups the full location collection into one StateGroup per state code.
///
/// The first occurrence of a code fixes the group's display name and code;
/// cities keep their fetch order (the fetch itself sorts by city name).
/// Unknown codes still produce a usable group keyed by the lowercased
/// code. Output is sorted by display name ascending.
pub fn group_locations(locations: Vec<Location>) -> Vec<StateGroup> {
    let mut groups: HashMap<String, StateGroup> = HashMap::new();

    for location in locations {
        let key = location.state_code.to_lowercase();
        let group = groups.entry(key).or_insert_with(|| StateGroup {
            name: location.state.clone(),
            slug: state_slug(&location.state_code),
            state_code: location.state_code.clone(),
            cities: Vec::new(),
        });

        group.cities.push(location);
    }

    groups
        .into_values()
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect()
}
