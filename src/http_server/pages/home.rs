use super::layout;
use crate::http_server::flash::Flash;

pub fn home(flash: Option<&Flash>) -> String {
    layout(
        "Home",
        flash,
        r#"<h1>Venue Booker</h1>
        <p>Find a venue for your next gig, or the right artist for your stage.</p>
        <ul class="items">
            <li><a href="/venues/create">List a new venue</a></li>
            <li><a href="/artists/create">List a new artist</a></li>
            <li><a href="/shows/create">Book a show</a></li>
        </ul>"#,
    )
}
