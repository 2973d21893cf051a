use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::ids::{ArtistId, MovieId, UserId};
use super::vocab::Genre;

/// What a taste edge points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TasteTarget {
    Movie(MovieId),
    Artist(ArtistId),
    Genre(Genre),
}

impl Display for TasteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TasteTarget::Movie(id) => write!(f, "movie:{}", id),
            TasteTarget::Artist(id) => write!(f, "artist:{}", id),
            TasteTarget::Genre(genre) => write!(f, "genre:{}", genre),
        }
    }
}

/// Composite identity of a taste edge: at most one edge may exist per
/// (user, target) pair. A pair of typed ids, never a concatenated string,
/// so no id class can collide with another by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TasteKey {
    pub user: UserId,
    pub target: TasteTarget,
}

impl TasteKey {
    pub fn new(user: UserId, target: TasteTarget) -> Self {
        Self { user, target }
    }
}

impl Display for TasteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.target, self.user)
    }
}

/// A directed, weighted preference edge from a user to a movie, artist or
/// genre. `explicit` is true when the user asked for this target directly;
/// propagated edges carry `explicit = false` until an explicit vote lands
/// on them. An edge whose weight falls to zero or below is deleted, never
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TasteEdge {
    pub key: TasteKey,
    pub weight: f64,
    pub explicit: bool,
}

impl TasteEdge {
    pub fn new(key: TasteKey, weight: f64, explicit: bool) -> Self {
        Self {
            key,
            weight,
            explicit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_namespaces_do_not_collide() {
        let user = UserId::new("test@example.com");
        let movie = TasteKey::new(
            user.clone(),
            TasteTarget::Movie(MovieId::parse("tt0000001").unwrap()),
        );
        let artist = TasteKey::new(
            user,
            TasteTarget::Artist(ArtistId::parse("nm0000001").unwrap()),
        );
        assert_ne!(movie.to_string(), artist.to_string());
        assert!(movie.to_string().starts_with("movie:"));
        assert!(artist.to_string().starts_with("artist:"));
    }

    #[test]
    fn test_key_equality_is_structural() {
        let a = TasteKey::new(
            UserId::new("a@example.com"),
            TasteTarget::Genre(Genre::Drama),
        );
        let b = TasteKey::new(
            UserId::new("a@example.com"),
            TasteTarget::Genre(Genre::Drama),
        );
        assert_eq!(a, b);
    }
}
