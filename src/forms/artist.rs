use serde::Deserialize;

use super::{
    FieldErrors, check_genres, check_phone, check_state, check_url, checkbox, non_empty, require,
};
use crate::entities;
use crate::services::artist::ArtistInput;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn validate(&self) -> Result<ArtistInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let input = ArtistInput {
            name: require(&mut errors, "name", &self.name),
            city: require(&mut errors, "city", &self.city),
            state: check_state(&mut errors, &self.state),
            phone: check_phone(&mut errors, &self.phone),
            genres: check_genres(&mut errors, &self.genres),
            image_link: non_empty(&self.image_link),
            facebook_link: check_url(&mut errors, "facebook_link", &self.facebook_link),
            website_link: check_url(&mut errors, "website_link", &self.website_link),
            seeking_venue: checkbox(&self.seeking_venue),
            seeking_description: non_empty(&self.seeking_description),
        };

        errors.into_result(input)
    }

    pub fn is_seeking_venue(&self) -> bool {
        checkbox(&self.seeking_venue)
    }
}

impl From<&entities::artist::Model> for ArtistForm {
    fn from(artist: &entities::artist::Model) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            genres: artist.genre_list(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website_link.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let form = ArtistForm {
            name: " Matt Quevedo ".into(),
            city: "New York".into(),
            state: "NY".into(),
            phone: "3004005000".into(),
            genres: vec!["Jazz".into()],
            facebook_link: "https://www.facebook.com/mattquevedo923251523".into(),
            ..Default::default()
        };

        let input = form.validate().unwrap();
        assert_eq!(input.name, "Matt Quevedo");
        assert_eq!(input.genres, vec!["Jazz"]);
        assert!(!input.seeking_venue);
    }

    #[test]
    fn test_no_address_required() {
        let errors = ArtistForm::default().validate().unwrap_err();

        assert!(!errors.contains("address"));
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["city", "genres", "name", "phone", "state"]
        );
    }
}
