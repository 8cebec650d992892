//! Derived content layer: raw CMS collections in, composed view models out.

pub mod city;
pub mod markup;
pub mod pages;
pub mod sitemap;
pub mod states;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::{join, join4, join_all};

use crate::schemas::{CityPage, Cms, CmsError, Lead};

pub use city::CityView;
pub use pages::{
    HomeView, LocationsIndexView, NavigationView, ServiceView, ServicesIndexView, StateView,
    StaticView,
};
pub use sitemap::SitemapEntry;
pub use states::{group_locations, StateGroup};

/// Read side of the site. Holds the CMS client and the canonical site URL;
/// one instance is shared across all workers.
pub struct Content {
    cms: Arc<Cms>,
    site_url: String,
}

impl Content {
    pub fn new(cms: Arc<Cms>, site_url: String) -> Self {
        Self { cms, site_url }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub async fn navigation(&self) -> NavigationView {
        let (services, locations) = join(self.cms.list_services(), self.cms.list_locations()).await;
        pages::navigation_view(&services, &group_locations(locations))
    }

    pub async fn home(&self) -> HomeView {
        let (services, locations) = join(self.cms.list_services(), self.cms.list_locations()).await;
        pages::home_view(&self.site_url, &services, &group_locations(locations))
    }

    pub async fn services_index(&self) -> ServicesIndexView {
        pages::services_index_view(&self.cms.list_services().await)
    }

    pub async fn service(&self, slug: &str) -> Result<Option<ServiceView>, CmsError> {
        let (service, all) = join(self.cms.get_service(slug), self.cms.list_services()).await;
        Ok(service?.map(|service| pages::service_view(&self.site_url, &service, &all)))
    }

    pub async fn locations_index(&self) -> LocationsIndexView {
        pages::locations_index_view(&group_locations(self.cms.list_locations().await))
    }

    pub async fn state(&self, slug: &str) -> Result<Option<StateView>, CmsError> {
        let (page, locations, services, cities) = join4(
            self.cms.get_state_page(slug),
            self.cms.list_locations(),
            self.cms.list_services(),
            self.city_pages_for_state(slug),
        )
        .await;

        Ok(page?
            .map(|page| pages::state_view(&page, &group_locations(locations), &cities, &services)))
    }

    pub async fn city(
        &self,
        state_slug: &str,
        city_slug: &str,
    ) -> Result<Option<CityView>, CmsError> {
        let (page, services) = join(self.cms.get_city_page(city_slug), self.cms.list_services()).await;
        Ok(page?.map(|page| city::compose(&page, &services, &self.site_url, state_slug)))
    }

    pub fn static_page(&self, name: &str) -> Option<StaticView> {
        pages::static_page_view(&self.site_url, name)
    }

    /// Store the lead and hand back the created record for webhook delivery.
    pub async fn submit_lead(&self, lead: &Lead) -> Result<serde_json::Value, CmsError> {
        self.cms.create_lead(lead).await
    }

    /// Render the full sitemap. City lists are fetched per state so one
    /// failed fetch empties only that state's sub-list.
    pub async fn sitemap(&self, now: DateTime<Utc>) -> anyhow::Result<String> {
        let (services, locations) = join(self.cms.list_services(), self.cms.list_locations()).await;
        let states = group_locations(locations);

        let cities_per_state = join_all(
            states
                .iter()
                .map(|state| self.city_pages_for_state(&state.slug)),
        )
        .await;

        sitemap::to_xml(&sitemap::compose(
            now,
            &self.site_url,
            &services,
            &states,
            &cities_per_state,
        ))
    }

    async fn city_pages_for_state(&self, state_slug: &str) -> Vec<CityPage> {
        let code = states::state_code_for_slug(state_slug);
        self.cms.list_city_pages_by_state(&code).await
    }
}
