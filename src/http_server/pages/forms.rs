//! Create and edit forms, re-rendered with the submitted values and
//! field-level errors after a failed validation.

use super::{escape, layout};
use crate::forms::FieldErrors;
use crate::forms::artist::ArtistForm;
use crate::forms::choices::{GENRES, STATES};
use crate::forms::show::ShowForm;
use crate::forms::venue::VenueForm;

fn error_list(errors: &FieldErrors, field: &str) -> String {
    let messages = errors.get(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>", escape(message)))
        .collect();
    format!(r#"<ul class="errors">{items}</ul>"#)
}

fn text_field(name: &str, label: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        r#"<div class="form-group">
            <label for="{name}">{label}</label>
            <input type="text" id="{name}" name="{name}" value="{value}">
            {errors}
        </div>"#,
        value = escape(value),
        errors = error_list(errors, name),
    )
}

fn select_field<S: AsRef<str>>(
    name: &str,
    label: &str,
    choices: &[&str],
    selected: &[S],
    multiple: bool,
    errors: &FieldErrors,
) -> String {
    let is_selected = |choice: &str| selected.iter().any(|value| value.as_ref() == choice);
    let blank = if multiple {
        ""
    } else {
        r#"<option value="">Select...</option>"#
    };
    let options: String = choices
        .iter()
        .map(|choice| {
            format!(
                r#"<option value="{value}"{selected}>{value}</option>"#,
                value = escape(choice),
                selected = if is_selected(choice) { " selected" } else { "" },
            )
        })
        .collect();

    format!(
        r#"<div class="form-group">
            <label for="{name}">{label}</label>
            <select id="{name}" name="{name}"{multiple}>{blank}{options}</select>
            {errors}
        </div>"#,
        multiple = if multiple { " multiple" } else { "" },
        errors = error_list(errors, name),
    )
}

fn checkbox_field(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<div class="form-group">
            <label><input type="checkbox" name="{name}" value="y"{checked}> {label}</label>
        </div>"#,
        checked = if checked { " checked" } else { "" },
    )
}

fn form_page(title: &str, action: &str, fields: &str) -> String {
    let body = format!(
        r#"<h1>{heading}</h1>
        <form method="post" action="{action}">
            {fields}
            <button type="submit">Submit</button>
        </form>"#,
        heading = escape(title),
        action = escape(action),
    );
    layout(title, None, &body)
}

fn venue_fields(form: &VenueForm, errors: &FieldErrors) -> String {
    [
        text_field("name", "Name", &form.name, errors),
        text_field("city", "City", &form.city, errors),
        select_field("state", "State", STATES, &[&form.state], false, errors),
        text_field("address", "Address", &form.address, errors),
        text_field("phone", "Phone", &form.phone, errors),
        select_field("genres", "Genres", GENRES, &form.genres, true, errors),
        text_field("image_link", "Image Link", &form.image_link, errors),
        text_field("facebook_link", "Facebook Link", &form.facebook_link, errors),
        text_field("website_link", "Website Link", &form.website_link, errors),
        checkbox_field("seeking_talent", "Seeking Talent", form.is_seeking_talent()),
        text_field(
            "seeking_description",
            "Seeking Description",
            &form.seeking_description,
            errors,
        ),
    ]
    .join("\n")
}

fn artist_fields(form: &ArtistForm, errors: &FieldErrors) -> String {
    [
        text_field("name", "Name", &form.name, errors),
        text_field("city", "City", &form.city, errors),
        select_field("state", "State", STATES, &[&form.state], false, errors),
        text_field("phone", "Phone", &form.phone, errors),
        select_field("genres", "Genres", GENRES, &form.genres, true, errors),
        text_field("image_link", "Image Link", &form.image_link, errors),
        text_field("facebook_link", "Facebook Link", &form.facebook_link, errors),
        text_field("website_link", "Website Link", &form.website_link, errors),
        checkbox_field("seeking_venue", "Seeking Venue", form.is_seeking_venue()),
        text_field(
            "seeking_description",
            "Seeking Description",
            &form.seeking_description,
            errors,
        ),
    ]
    .join("\n")
}

pub fn new_venue(form: &VenueForm, errors: &FieldErrors) -> String {
    form_page("List a new venue", "/venues/create", &venue_fields(form, errors))
}

pub fn edit_venue(venue_id: i64, form: &VenueForm, errors: &FieldErrors) -> String {
    form_page(
        &format!("Edit venue {}", form.name),
        &format!("/venues/{venue_id}/edit"),
        &venue_fields(form, errors),
    )
}

pub fn new_artist(form: &ArtistForm, errors: &FieldErrors) -> String {
    form_page("List a new artist", "/artists/create", &artist_fields(form, errors))
}

pub fn edit_artist(artist_id: i64, form: &ArtistForm, errors: &FieldErrors) -> String {
    form_page(
        &format!("Edit artist {}", form.name),
        &format!("/artists/{artist_id}/edit"),
        &artist_fields(form, errors),
    )
}

pub fn new_show(form: &ShowForm, errors: &FieldErrors) -> String {
    let fields = [
        text_field("artist_id", "Artist ID", &form.artist_id, errors),
        text_field("venue_id", "Venue ID", &form.venue_id, errors),
        text_field("start_time", "Start Time", &form.start_time, errors),
    ]
    .join("\n");

    form_page("Book a show", "/shows/create", &fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_marks_submitted_values() {
        let html = select_field(
            "genres",
            "Genres",
            GENRES,
            &["Jazz".to_string(), "R&B".to_string()],
            true,
            &FieldErrors::default(),
        );

        assert!(html.contains(r#"<option value="Jazz" selected>Jazz</option>"#));
        assert!(html.contains(r#"<option value="R&amp;B" selected>R&amp;B</option>"#));
        assert!(html.contains(r#"<option value="Blues">Blues</option>"#));
        assert!(html.contains(" multiple>"));
        assert!(!html.contains("Select..."));
    }

    #[test]
    fn test_errors_render_next_to_field() {
        let mut errors = FieldErrors::default();
        errors.add("phone", "Phone number should only contain digits");
        let form = VenueForm {
            phone: "555-0100".into(),
            ..Default::default()
        };

        let html = new_venue(&form, &errors);

        assert!(html.contains(r#"value="555-0100""#));
        assert!(html.contains("<li>Phone number should only contain digits</li>"));
        assert_eq!(html.matches(r#"class="errors""#).count(), 1);
    }

    #[test]
    fn test_edit_form_posts_back_to_record() {
        let form = ArtistForm {
            name: "Matt Quevedo".into(),
            seeking_venue: Some("y".into()),
            ..Default::default()
        };

        let html = edit_artist(5, &form, &FieldErrors::default());

        assert!(html.contains(r#"action="/artists/5/edit""#));
        assert!(html.contains("<h1>Edit artist Matt Quevedo</h1>"));
        assert!(html.contains(r#"name="seeking_venue" value="y" checked"#));
    }
}
