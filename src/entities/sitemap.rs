//! Sitemap composition. Entry order is fixed: home, the static pages,
//! service pillars, state hubs, then city pages grouped by state.

use std::fmt;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::schemas::{CityPage, Service};

use super::states::StateGroup;

const XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let freq = match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        };
        write!(f, "{}", freq)
    }
}

#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub loc: String,
    pub freq: ChangeFrequency,
    pub priority: f64,
    pub lastmod: DateTime<Utc>,
}

/// Build the full entry list. `cities_per_state` must be parallel to
/// `states`; the output length is always 1 + 5 + |services| + |states| +
/// the total city count.
pub fn compose(
    now: DateTime<Utc>,
    site_url: &str,
    services: &[Service],
    states: &[StateGroup],
    cities_per_state: &[Vec<CityPage>],
) -> Vec<SitemapEntry> {
    let entry = |loc: String, freq: ChangeFrequency, priority: f64| SitemapEntry {
        loc,
        freq,
        priority,
        lastmod: now,
    };

    let mut entries = vec![
        entry(site_url.to_string(), ChangeFrequency::Daily, 1.0),
        entry(
            format!("{}/services", site_url),
            ChangeFrequency::Weekly,
            0.9,
        ),
        entry(
            format!("{}/locations", site_url),
            ChangeFrequency::Weekly,
            0.8,
        ),
        entry(format!("{}/about", site_url), ChangeFrequency::Monthly, 0.5),
        entry(
            format!("{}/contact", site_url),
            ChangeFrequency::Monthly,
            0.6,
        ),
        entry(format!("{}/apply", site_url), ChangeFrequency::Monthly, 0.8),
    ];

    for service in services {
        entries.push(entry(
            format!("{}/services/{}", site_url, service.slug),
            ChangeFrequency::Weekly,
            0.9,
        ));
    }

    for state in states {
        entries.push(entry(
            format!("{}/locations/{}", site_url, state.slug),
            ChangeFrequency::Weekly,
            0.85,
        ));
    }

    for (state, cities) in states.iter().zip(cities_per_state) {
        for city in cities {
            entries.push(entry(
                format!("{}/locations/{}/{}", site_url, state.slug, city.slug),
                ChangeFrequency::Weekly,
                0.8,
            ));
        }
    }

    entries
}

pub fn to_xml(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", XMLNS));
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        leaf(&mut writer, "loc", &entry.loc)?;
        leaf(
            &mut writer,
            "lastmod",
            &entry.lastmod.to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;
        leaf(&mut writer, "changefreq", &entry.freq.to_string())?;
        leaf(&mut writer, "priority", &entry.priority.to_string())?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn leaf<W: std::io::Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service(slug: &str) -> Service {
        Service {
            id: 0,
            name: slug.to_string(),
            slug: slug.to_string(),
            short_description: None,
            full_description: None,
            icon: None,
            benefits: Vec::new(),
            how_it_works: Vec::new(),
            faqs: Vec::new(),
            order: None,
        }
    }

    fn group(name: &str, slug: &str, code: &str) -> StateGroup {
        StateGroup {
            name: name.to_string(),
            slug: slug.to_string(),
            state_code: code.to_string(),
            cities: Vec::new(),
        }
    }

    fn city_page(slug: &str) -> CityPage {
        CityPage {
            id: 0,
            title: slug.to_string(),
            slug: slug.to_string(),
            location: None,
            state_page: None,
            meta_title: None,
            meta_description: None,
            hero_headline: None,
            hero_subheadline: None,
            branch_photo_url: None,
            local_proof_content: None,
            services_content: None,
            compliance_content: None,
            nap_content: Default::default(),
            faqs: Vec::new(),
            nearby_locations: Vec::new(),
            schema_type: None,
            status: None,
        }
    }

    fn fixture() -> Vec<SitemapEntry> {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        compose(
            now,
            "https://titlecash.com",
            &[service("auto-title-loans"), service("emergency-title-loans")],
            &[
                group("California", "california", "CA"),
                group("Florida", "florida", "FL"),
            ],
            &[
                vec![city_page("los-angeles-ca")],
                vec![city_page("miami-fl"), city_page("tampa-fl")],
            ],
        )
    }

    #[test]
    fn test_entry_count_covers_every_page_exactly_once() {
        // 1 home + 5 static + 2 services + 2 states + 3 cities
        assert_eq!(fixture().len(), 13);
    }

    #[test]
    fn test_entries_keep_the_fixed_section_order() {
        let locs: Vec<String> = fixture().into_iter().map(|entry| entry.loc).collect();

        assert_eq!(
            locs,
            vec![
                "https://titlecash.com",
                "https://titlecash.com/services",
                "https://titlecash.com/locations",
                "https://titlecash.com/about",
                "https://titlecash.com/contact",
                "https://titlecash.com/apply",
                "https://titlecash.com/services/auto-title-loans",
                "https://titlecash.com/services/emergency-title-loans",
                "https://titlecash.com/locations/california",
                "https://titlecash.com/locations/florida",
                "https://titlecash.com/locations/california/los-angeles-ca",
                "https://titlecash.com/locations/florida/miami-fl",
                "https://titlecash.com/locations/florida/tampa-fl",
            ]
        );
    }

    #[test]
    fn test_priorities_rank_home_over_hubs_over_cities() {
        let entries = fixture();

        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[0].freq, ChangeFrequency::Daily);
        assert_eq!(entries[6].priority, 0.9);
        assert_eq!(entries[8].priority, 0.85);
        assert_eq!(entries[12].priority, 0.8);
        assert_eq!(entries[3].freq, ChangeFrequency::Monthly);
    }

    #[test]
    fn test_xml_serializes_the_urlset() {
        let xml = to_xml(&fixture()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://titlecash.com/locations/florida/miami-fl</loc>"));
        assert!(xml.contains("<lastmod>2026-01-15T00:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>1</priority>"));
        assert!(xml.contains("<priority>0.85</priority>"));
        assert!(xml.ends_with("</urlset>"));
    }
}
