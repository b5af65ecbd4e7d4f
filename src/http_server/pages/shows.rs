use super::{escape, format_medium, image, layout};
use crate::http_server::flash::Flash;
use crate::services::show::ShowListing;

pub fn list(shows: &[ShowListing], flash: Option<&Flash>) -> String {
    let items: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"<li class="show">{image}<a href="/artists/{artist_id}">{artist_name}</a> playing at <a href="/venues/{venue_id}">{venue_name}</a> <span class="count">{start}</span></li>"#,
                image = image(show.artist_image_link.as_deref(), &show.artist_name),
                artist_id = show.artist_id,
                artist_name = escape(&show.artist_name),
                venue_id = show.venue_id,
                venue_name = escape(&show.venue_name),
                start = format_medium(&show.start_time),
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Shows</h1>
        <ul class="items">{items}</ul>
        <p><a href="/shows/create">Book a show</a></p>"#
    );

    layout("Shows", flash, &body)
}
