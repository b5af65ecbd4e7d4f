use serde::Deserialize;

use super::{
    FieldErrors, check_genres, check_phone, check_state, check_url, checkbox, non_empty, require,
};
use crate::entities;
use crate::services::venue::VenueInput;

/// Raw venue form as submitted, also used to re-render the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn validate(&self) -> Result<VenueInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let input = VenueInput {
            name: require(&mut errors, "name", &self.name),
            city: require(&mut errors, "city", &self.city),
            state: check_state(&mut errors, &self.state),
            address: require(&mut errors, "address", &self.address),
            phone: check_phone(&mut errors, &self.phone),
            genres: check_genres(&mut errors, &self.genres),
            image_link: non_empty(&self.image_link),
            facebook_link: check_url(&mut errors, "facebook_link", &self.facebook_link),
            website_link: check_url(&mut errors, "website_link", &self.website_link),
            seeking_talent: checkbox(&self.seeking_talent),
            seeking_description: non_empty(&self.seeking_description),
        };

        errors.into_result(input)
    }

    pub fn is_seeking_talent(&self) -> bool {
        checkbox(&self.seeking_talent)
    }
}

impl From<&entities::venue::Model> for VenueForm {
    fn from(venue: &entities::venue::Model) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            genres: venue.genre_list(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website_link.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }
}
