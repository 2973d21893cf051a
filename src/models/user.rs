use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{ArtistId, MovieId, UserId};
use super::vocab::{Genre, TvType};

/// A movie the user has watched, with the date it was watched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedMovie {
    pub movie: MovieId,
    pub date: NaiveDate,
}

/// A subscribed user.
///
/// The taste collections hold *references* to taste edges (the weighted
/// edges themselves live in the entity store under their composite keys);
/// the watched list is append-only and unique per movie id. The ranked
/// proposal is not stored here: it lives in the proposal cache and is
/// invalidated by every taste-affecting mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub birth_year: Option<i32>,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub tv_types: Vec<TvType>,
    /// Whether already-watched movies may be suggested again
    #[serde(default)]
    pub repeat_choice: bool,
    #[serde(default)]
    pub watched: Vec<WatchedMovie>,
    #[serde(default)]
    pub taste_movies: Vec<MovieId>,
    #[serde(default)]
    pub taste_artists: Vec<ArtistId>,
    #[serde(default)]
    pub taste_genres: Vec<Genre>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            birth_year: None,
            gender: None,
            tv_types: vec![TvType::Free],
            repeat_choice: false,
            watched: Vec::new(),
            taste_movies: Vec::new(),
            taste_artists: Vec::new(),
            taste_genres: Vec::new(),
        }
    }

    /// Appends to the watched list; a movie already watched is a no-op.
    pub fn add_watched(&mut self, movie: MovieId, date: NaiveDate) {
        if !self.watched.iter().any(|w| w.movie == movie) {
            self.watched.push(WatchedMovie { movie, date });
        }
    }

    pub fn has_watched(&self, movie: &MovieId) -> bool {
        self.watched.iter().any(|w| &w.movie == movie)
    }

    /// Replaces the tv-type list, deduplicating while preserving order.
    pub fn set_tv_types(&mut self, types: Vec<TvType>) {
        let mut deduped = Vec::new();
        for t in types {
            if !deduped.contains(&t) {
                deduped.push(t);
            }
        }
        self.tv_types = deduped;
    }
}
