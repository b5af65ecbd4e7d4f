use super::search::{SearchKind, search_box};
use super::{detail_line, escape, genre_tags, image, layout, schedule};
use crate::entities;
use crate::http_server::flash::Flash;
use crate::services::artist::ArtistDetail;

pub fn list(artists: &[entities::artist::Model], flash: Option<&Flash>) -> String {
    let items: String = artists
        .iter()
        .map(|artist| {
            format!(
                r#"<li>{image}<a href="/artists/{id}">{name}</a></li>"#,
                image = image(artist.image_link.as_deref(), &artist.name),
                id = artist.id,
                name = escape(&artist.name),
            )
        })
        .collect();

    let body = format!(
        r#"{search}
        <h1>Artists</h1>
        <ul class="items">{items}</ul>
        <p><a href="/artists/create">List a new artist</a></p>"#,
        search = search_box(SearchKind::Artists, ""),
    );

    layout("Artists", flash, &body)
}

pub fn detail(detail: &ArtistDetail, flash: Option<&Flash>) -> String {
    let artist = &detail.artist;

    let seeking = if artist.seeking_venue {
        format!(
            r#"<div class="seeking"><strong>Currently seeking performance venues</strong><p>{}</p></div>"#,
            escape(artist.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="count">Not currently seeking performance venues</p>"#.to_string()
    };

    let body = format!(
        r#"<h1>{image}{name}</h1>
        <p class="count">ID: {id}</p>
        {genres}
        <p>{city}, {state}</p>
        {phone}
        {website}
        {facebook}
        {seeking}
        {schedule}
        <p><a href="/artists/{id}/edit">Edit artist</a></p>"#,
        image = image(artist.image_link.as_deref(), &artist.name),
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_tags(&detail.genres),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = detail_line("Phone", artist.phone.as_deref()),
        website = detail_line("Website", artist.website_link.as_deref()),
        facebook = detail_line("Facebook", artist.facebook_link.as_deref()),
        schedule = schedule(&detail.schedule, "venues"),
    );

    layout(&artist.name, flash, &body)
}
