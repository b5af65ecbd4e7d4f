use super::{escape, layout};
use crate::services::SearchResults;

/// Which listing a search runs against; decides the form target and links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Venues,
    Artists,
}

impl SearchKind {
    fn path(self) -> &'static str {
        match self {
            SearchKind::Venues => "venues",
            SearchKind::Artists => "artists",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            SearchKind::Venues => "Find a venue",
            SearchKind::Artists => "Find an artist",
        }
    }
}

pub fn search_box(kind: SearchKind, term: &str) -> String {
    format!(
        r#"<form class="search" method="post" action="/{path}/search">
            <input type="search" name="search_term" value="{term}" placeholder="{placeholder}">
            <button type="submit">Search</button>
        </form>"#,
        path = kind.path(),
        term = escape(term),
        placeholder = kind.placeholder(),
    )
}

pub fn results(kind: SearchKind, results: &SearchResults, term: &str) -> String {
    let items: String = results
        .data
        .iter()
        .map(|hit| {
            format!(
                r#"<li><a href="/{path}/{id}">{name}</a> <span class="count">{count} upcoming shows</span></li>"#,
                path = kind.path(),
                id = hit.id,
                name = escape(&hit.name),
                count = hit.upcoming_show_count,
            )
        })
        .collect();

    let body = format!(
        r#"{search_box}
        <h3>Number of search results for "{term}": {count}</h3>
        <ul class="items">{items}</ul>"#,
        search_box = search_box(kind, term),
        term = escape(term),
        count = results.count,
    );

    layout("Search", None, &body)
}
