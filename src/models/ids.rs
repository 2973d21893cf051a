use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

static MOVIE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tt\d{7}$").expect("movie id pattern"));
static ARTIST_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^nm\d{7}$").expect("artist id pattern"));

/// External catalog id of a movie (e.g. "tt0133093")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn parse(id: &str) -> AppResult<Self> {
        if MOVIE_ID_PATTERN.is_match(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(AppError::InvalidInput(format!("malformed movie id: {}", id)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External catalog id of an artist (e.g. "nm0000206")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(String);

impl ArtistId {
    pub fn parse(id: &str) -> AppResult<Self> {
        if ARTIST_ID_PATTERN.is_match(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(AppError::InvalidInput(format!(
                "malformed artist id: {}",
                id
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ArtistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable account id of a user (email-like string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An external catalog id routed to the entity kind its pattern denotes.
///
/// The collaborator layer receives bare id strings and uses this to decide
/// whether a lookup refers to a movie or an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogId {
    Movie(MovieId),
    Artist(ArtistId),
}

impl CatalogId {
    pub fn parse(id: &str) -> AppResult<Self> {
        if MOVIE_ID_PATTERN.is_match(id) {
            Ok(CatalogId::Movie(MovieId(id.to_string())))
        } else if ARTIST_ID_PATTERN.is_match(id) {
            Ok(CatalogId::Artist(ArtistId(id.to_string())))
        } else {
            Err(AppError::InvalidInput(format!(
                "unrecognized catalog id: {}",
                id
            )))
        }
    }
}
