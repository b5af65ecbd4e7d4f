use super::search::{SearchKind, search_box};
use super::{detail_line, escape, genre_tags, image, layout, schedule};
use crate::http_server::flash::Flash;
use crate::services::venue::{VenueArea, VenueDetail};

pub fn list(areas: &[VenueArea], flash: Option<&Flash>) -> String {
    let groups: String = areas
        .iter()
        .map(|area| {
            let venues: String = area
                .venues
                .iter()
                .map(|venue| {
                    format!(
                        r#"<li><a href="/venues/{id}">{name}</a> <span class="count">{count} upcoming shows</span></li>"#,
                        id = venue.id,
                        name = escape(&venue.name),
                        count = venue.upcoming_show_count,
                    )
                })
                .collect();
            format!(
                r#"<h3>{city}, {state}</h3>
        <ul class="items">{venues}</ul>"#,
                city = escape(&area.city),
                state = escape(&area.state),
            )
        })
        .collect();

    let body = format!(
        r#"{search}
        <h1>Venues</h1>
        {groups}
        <p><a href="/venues/create">List a new venue</a></p>"#,
        search = search_box(SearchKind::Venues, ""),
    );

    layout("Venues", flash, &body)
}

pub fn detail(detail: &VenueDetail, flash: Option<&Flash>) -> String {
    let venue = &detail.venue;

    let seeking = if venue.seeking_talent {
        format!(
            r#"<div class="seeking"><strong>Currently seeking talent</strong><p>{}</p></div>"#,
            escape(venue.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="count">Not currently seeking talent</p>"#.to_string()
    };

    let body = format!(
        r#"<h1>{image}{name}</h1>
        <p class="count">ID: {id}</p>
        {genres}
        <p>{address}<br>{city}, {state}</p>
        {phone}
        {website}
        {facebook}
        {seeking}
        {schedule}
        <p><a href="/venues/{id}/edit">Edit venue</a></p>"#,
        image = image(venue.image_link.as_deref(), &venue.name),
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_tags(&detail.genres),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = detail_line("Phone", venue.phone.as_deref()),
        website = detail_line("Website", venue.website_link.as_deref()),
        facebook = detail_line("Facebook", venue.facebook_link.as_deref()),
        schedule = schedule(&detail.schedule, "artists"),
    );

    layout(&venue.name, flash, &body)
}
