//! HTML rendering for every page the server returns.
//!
//! Pages are plain `format!` templates around a shared [`layout`]. Every
//! value that came from the database or a form goes through [`escape`].

pub mod artists;
pub mod errors;
pub mod forms;
pub mod home;
pub mod search;
pub mod shows;
pub mod venues;

use chrono::{DateTime, Utc};

use crate::http_server::flash::Flash;
use crate::services::{ShowEntry, ShowSchedule};

const MEDIUM_DATE_FORMAT: &str = "%a %m, %d, %Y %I:%M%p";
const FULL_DATE_FORMAT: &str = "%A %B, %-d, %Y at %I:%M%p";

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            background-color: #f7f7f7;
            color: #222;
            line-height: 1.5;
        }
        nav {
            background-color: #222;
            padding: 12px 24px;
            display: flex;
            gap: 18px;
            align-items: center;
        }
        nav a { color: #eee; text-decoration: none; }
        nav .brand { font-weight: 700; margin-right: auto; }
        main { max-width: 960px; margin: 0 auto; padding: 24px; }
        .flash { padding: 10px 14px; border-radius: 4px; margin-bottom: 18px; }
        .flash-success { background-color: #dff0d8; color: #3c763d; }
        .flash-error { background-color: #f2dede; color: #a94442; }
        .items { list-style: none; padding: 0; }
        .items li { padding: 8px 0; border-bottom: 1px solid #ddd; }
        .items img, .show img { width: 48px; height: 48px; object-fit: cover; border-radius: 50%; vertical-align: middle; margin-right: 10px; }
        .count { color: #777; font-size: 0.9em; }
        .genres span { display: inline-block; background: #e0e0e0; border-radius: 10px; padding: 2px 10px; margin: 2px; }
        .seeking { background-color: #fff8e1; padding: 10px; border-radius: 4px; }
        .form-group { margin-bottom: 14px; }
        .form-group label { display: block; font-weight: 600; }
        .form-group input[type=text], .form-group select { width: 100%; padding: 6px; }
        .errors { color: #a94442; margin: 4px 0; padding-left: 18px; }
        .search { margin-bottom: 18px; }
"#;

/// Escape text for use in element content and quoted attributes.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// `Tue 05, 21, 2019 09:30PM`
pub fn format_medium(value: &DateTime<Utc>) -> String {
    value.format(MEDIUM_DATE_FORMAT).to_string()
}

/// `Tuesday May, 21, 2019 at 09:30PM`
pub fn format_full(value: &DateTime<Utc>) -> String {
    value.format(FULL_DATE_FORMAT).to_string()
}

/// `<img>` tag for an optional image link, empty when there is none.
fn image(link: Option<&str>, alt: &str) -> String {
    match link {
        Some(link) => format!(
            r#"<img src="{}" alt="{}">"#,
            escape(link),
            escape(alt)
        ),
        None => String::new(),
    }
}

fn genre_tags(genres: &[String]) -> String {
    let tags: String = genres
        .iter()
        .map(|genre| format!("<span>{}</span>", escape(genre)))
        .collect();
    format!(r#"<p class="genres">{tags}</p>"#)
}

/// Optional contact line, skipped when the value is missing.
fn detail_line(label: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("<p><strong>{label}:</strong> {}</p>", escape(value)),
        None => String::new(),
    }
}

/// Past and upcoming shows of a detail page. `counterpart_path` is where
/// the entries link to (`artists` on a venue page, `venues` on an artist
/// page).
fn schedule(schedule: &ShowSchedule, counterpart_path: &str) -> String {
    let section = |title: &str, count: usize, entries: &[ShowEntry]| {
        let items: String = entries
            .iter()
            .map(|entry| {
                format!(
                    r#"<li class="show">{image}<a href="/{counterpart_path}/{id}">{name}</a> <span class="count">{start}</span></li>"#,
                    image = image(entry.counterpart_image_link.as_deref(), &entry.counterpart_name),
                    id = entry.counterpart_id,
                    name = escape(&entry.counterpart_name),
                    start = format_full(&entry.start_time),
                )
            })
            .collect();
        format!(
            r#"<section>
            <h2>{count} {title}</h2>
            <ul class="items">{items}</ul>
        </section>"#
        )
    };

    format!(
        "{}\n{}",
        section(
            "Upcoming Shows",
            schedule.upcoming_shows_count(),
            &schedule.upcoming_shows
        ),
        section(
            "Past Shows",
            schedule.past_shows_count(),
            &schedule.past_shows
        )
    )
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            flash.level.as_str(),
            escape(&flash.message)
        ),
        None => String::new(),
    }
}

/// Wrap page content in the shared document shell. `body` must already be
/// escaped.
pub fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Venue Booker</title>
    <style>{STYLE}</style>
</head>
<body>
    <nav>
        <a class="brand" href="/">Venue Booker</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
    </nav>
    <main>
        {flash}
        {body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        flash = flash_banner(flash),
    )
}
