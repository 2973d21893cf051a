use serde::{Deserialize, Serialize};

use super::ids::{ArtistId, MovieId};
use super::vocab::Genre;

/// A film record as retrieved from the external metadata catalog.
///
/// Created on first retrieval and mutated only by appending to the artist
/// relations; the core never deletes movies. Every attribute the upstream
/// payload may omit is an explicit `Option` so absent and empty stay
/// distinguishable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub simple_plot: Option<String>,
    pub plot: Option<String>,
    pub plot_it: Option<String>,
    pub genres: Vec<Genre>,
    pub year: Option<String>,
    pub run_times: Option<String>,
    pub rated: Option<String>,
    pub countries: Vec<String>,
    pub trailer: Option<String>,
    pub poster: Option<String>,
    pub directors: Vec<ArtistId>,
    pub writers: Vec<ArtistId>,
    pub actors: Vec<ArtistId>,
}

impl Movie {
    pub fn new(id: MovieId) -> Self {
        Self {
            id,
            title: None,
            original_title: None,
            simple_plot: None,
            plot: None,
            plot_it: None,
            genres: Vec::new(),
            year: None,
            run_times: None,
            rated: None,
            countries: Vec::new(),
            trailer: None,
            poster: None,
            directors: Vec::new(),
            writers: Vec::new(),
            actors: Vec::new(),
        }
    }

    /// Appends an actor relation; adding an already-present artist is a no-op.
    pub fn add_actor(&mut self, actor: ArtistId) {
        if !self.actors.contains(&actor) {
            self.actors.push(actor);
        }
    }

    /// Appends a director relation; adding an already-present artist is a no-op.
    pub fn add_director(&mut self, director: ArtistId) {
        if !self.directors.contains(&director) {
            self.directors.push(director);
        }
    }

    /// Appends a writer relation; adding an already-present artist is a no-op.
    pub fn add_writer(&mut self, writer: ArtistId) {
        if !self.writers.contains(&writer) {
            self.writers.push(writer);
        }
    }

    /// Appends a genre, keeping the list an insertion-ordered set.
    pub fn add_genre(&mut self, genre: Genre) {
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
        }
    }
}

/// An artist record (actor, director or writer).
///
/// Created on first retrieval; immutable afterwards except for cosmetic
/// field fixes. Never deleted by the core. The artist's filmography is a
/// derived query over movie records, not a stored back-pointer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Artist {
    pub fn new(id: ArtistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            photo: None,
            roles: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        Movie::new(MovieId::parse("tt0133093").unwrap())
    }

    #[test]
    fn test_add_actor_idempotent() {
        let mut m = movie();
        let keanu = ArtistId::parse("nm0000206").unwrap();
        m.add_actor(keanu.clone());
        m.add_actor(keanu.clone());
        assert_eq!(m.actors, vec![keanu]);
    }

    #[test]
    fn test_relations_preserve_insertion_order() {
        let mut m = movie();
        let first = ArtistId::parse("nm0000206").unwrap();
        let second = ArtistId::parse("nm0000401").unwrap();
        m.add_director(first.clone());
        m.add_director(second.clone());
        m.add_director(first.clone());
        assert_eq!(m.directors, vec![first, second]);
    }

    #[test]
    fn test_add_genre_dedups() {
        let mut m = movie();
        m.add_genre(Genre::Action);
        m.add_genre(Genre::SciFi);
        m.add_genre(Genre::Action);
        assert_eq!(m.genres, vec![Genre::Action, Genre::SciFi]);
    }
}
