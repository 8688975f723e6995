//! Fake catalog pages and helpers shared by the integration tests

#![allow(dead_code)]

use audioteka_provider::Config;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SEARCH_PATH: &str = "/pl/search";

/// A search result entry as rendered by the catalog
pub struct Entry<'a> {
    pub id: Option<&'a str>,
    pub title: &'a str,
    pub href: Option<&'a str>,
    pub author: &'a str,
    pub rating: &'a str,
}

impl<'a> Entry<'a> {
    pub fn new(title: &'a str, href: &'a str) -> Self {
        Self {
            id: None,
            title,
            href: Some(href),
            author: "Frank Herbert",
            rating: "4.5",
        }
    }
}

/// Renders a search results page
pub fn search_page(entries: &[Entry<'_>]) -> String {
    let items: Vec<String> = entries
        .iter()
        .map(|entry| {
            let id_attr = entry
                .id
                .map(|id| format!(r#" data-item-id="{}""#, id))
                .unwrap_or_default();
            let link = entry
                .href
                .map(|href| {
                    format!(
                        r#"<a class="teaser_mainLink__YBhax" href="{}">Zobacz</a>"#,
                        href
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="adtk-item teaser_teaser__kRYek"{}>
                     {}
                     <img class="teaser_cover__2EVLn" src="https://img.test/{}-small.jpg">
                     <h2 class="teaser_title__CZ9eq">{}</h2>
                     <p class="teaser_author__BV8Ke">{}</p>
                     <span class="teaser_rating__ksFn3">{}</span>
                   </div>"#,
                id_attr, link, entry.id.unwrap_or("x"), entry.title, entry.author, entry.rating
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html><html><head><title>Szukaj</title></head><body><main>{}</main></body></html>",
        items.join("\n")
    )
}

/// Renders a detail page with the given narrator and duration
pub fn detail_page(narrator: &str, duration: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><body>
             <img class="ProductTop-styled__Cover-sc-aae7c7ba-0" src="https://img.test/large.jpg">
             <span class="StarIcon__Label-sc-96b8391b-2">4.9</span>
             <div class="Collections__CollectionList-sc-cd06413d-1"><a href="/pl/cykl/1">Kroniki Diuny</a></div>
             <table>
               <tr><td>Głosy</td><td><a href="/pl/lektor/1">{}</a></td></tr>
               <tr><td>Długość</td><td>{}</td></tr>
               <tr><td>Wydawca</td><td><a href="/pl/wydawca/1">Rebis</a></td></tr>
               <tr><td>Typ</td><td>Audiobook</td></tr>
               <tr><td>Kategoria</td><td><a href="/pl/k/1">Fantastyka</a></td></tr>
             </table>
           </body></html>"#,
        narrator, duration
    )
}

/// A 200 response with an HTML body
pub fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Provider configuration pointing at the mock catalog
pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = server.uri();
    config.http.request_timeout_secs = Some(10);
    config
}

/// Mounts a search results page for `query`
pub async fn mount_search(server: &MockServer, query: &str, entries: &[Entry<'_>]) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", query))
        .respond_with(html(search_page(entries)))
        .mount(server)
        .await;
}

/// Mounts a detail page at `detail_path`, optionally delayed
pub async fn mount_detail(
    server: &MockServer,
    detail_path: &str,
    narrator: &str,
    delay: Option<Duration>,
) {
    let mut response = html(detail_page(narrator, "10 godz. 5 min"));
    if let Some(delay) = delay {
        response = response.set_delay(delay);
    }

    Mock::given(method("GET"))
        .and(path(detail_path))
        .respond_with(response)
        .mount(server)
        .await;
}
