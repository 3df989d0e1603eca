//! Per-request page data: the route plus everything a layout needs around
//! it.

use crate::navigation::NavError;
use crate::path::slug_to_pathname;
use crate::site::Site;
use crate::translations::pick_lang;
use crate::types::{NavEntry, Route};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteData<'a> {
    #[serde(flatten)]
    pub route: &'a Route,
    pub site_title: String,
    pub site_title_href: String,
    pub is_full_width_layout: bool,
    pub nav_bar: Vec<NavEntry>,
}

/// Site title for `lang`, falling back to the default language's title,
/// then to any configured title.
pub fn site_title(site: &Site, lang: &str) -> String {
    let titles = &site.config.title;
    pick_lang(titles, lang)
        .or_else(|| pick_lang(titles, &site.locales.default_locale().lang))
        .or_else(|| titles.values().map(String::as_str).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .to_string()
}

/// Link of the site title: the home page of `locale`.
pub fn site_title_href(site: &Site, locale: Option<&str>) -> String {
    site.formatter.format(&slug_to_pathname(locale.unwrap_or_default()))
}

pub fn generate_route_data<'a>(
    site: &Site,
    route: &'a Route,
    pathname: &str,
) -> Result<RouteData<'a>, NavError> {
    Ok(RouteData {
        site_title: site_title(site, route.lang()),
        site_title_href: site_title_href(site, route.locale()),
        is_full_width_layout: route.entry.data.layout_full_width,
        nav_bar: site.nav_bar(pathname, route.locale())?,
        route,
    })
}
