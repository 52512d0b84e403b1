use serde::{Deserialize, Serialize};

use crate::wire;

/// A movie as embedded in a terminal option's suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotten_tomatoes_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metacritic_rating: Option<f64>,
}

impl Movie {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            year: None,
            director: None,
            genres: Vec::new(),
            thumbnail: None,
            description: None,
            imdb_rating: None,
            rotten_tomatoes_rating: None,
            metacritic_rating: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }
}

/// One suggested movie plus the reason it fits the path the visitor took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSuggestion {
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub movie: Movie,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub reason: String,
}

impl MovieSuggestion {
    pub fn new(movie: Movie, reason: impl Into<String>) -> Self {
        Self {
            id: None,
            movie,
            reason: reason.into(),
        }
    }
}
