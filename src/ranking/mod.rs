use rand::seq::SliceRandom;

use crate::models::{Movie, ScheduledMovie, User};
use crate::taste::TasteSnapshot;

/// A schedule row resolved to its stored movie record. Resolution happens
/// in the service layer; rows with no stored counterpart never reach the
/// ranker.
#[derive(Debug, Clone)]
pub struct ResolvedCandidate {
    pub slot: ScheduledMovie,
    pub movie: Movie,
}

/// A scored candidate in final presentation order.
#[derive(Debug, Clone)]
pub struct Ranked {
    pub slot: ScheduledMovie,
    pub movie: Movie,
    pub points: f64,
}

/// Scores the candidate list against the user's taste snapshot and orders
/// it for presentation.
///
/// Each artist credit contributes its edge weight per role; an artist who
/// both directs and stars counts twice. Genres contribute their edge
/// weights once each. When no candidate in the whole batch hits any edge
/// there is nothing to order by, so the filtered list is shuffled instead
/// of echoing the upstream listing order; otherwise the list is
/// stable-sorted by points, descending.
pub fn rank(user: &User, tastes: &TasteSnapshot, candidates: Vec<ResolvedCandidate>) -> Vec<Ranked> {
    let mut has_signal = false;
    let mut ranked = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let movie = &candidate.movie;

        if !user.repeat_choice && user.has_watched(&movie.id) {
            tracing::info!(user = %user.id, movie = %movie.id, "Skipping already watched movie");
            continue;
        }

        let mut points = 0.0;

        for artist in movie
            .actors
            .iter()
            .chain(movie.directors.iter())
            .chain(movie.writers.iter())
        {
            if let Some(weight) = tastes.artists.get(artist) {
                tracing::debug!(artist = %artist, weight, "Artist taste matched");
                points += weight;
                has_signal = true;
            }
        }

        for genre in &movie.genres {
            if let Some(weight) = tastes.genres.get(genre) {
                tracing::debug!(genre = %genre, weight, "Genre taste matched");
                points += weight;
                has_signal = true;
            }
        }

        tracing::debug!(
            movie = %movie.id,
            title = movie.original_title.as_deref().unwrap_or(""),
            points,
            "Candidate scored"
        );

        ranked.push(Ranked {
            slot: candidate.slot,
            movie: candidate.movie,
            points,
        });
    }

    if has_signal {
        // Stable: candidates with equal points keep their scan order.
        ranked.sort_by(|a, b| {
            b.points
                .partial_cmp(&a.points)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    } else {
        ranked.shuffle(&mut rand::rng());
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtistId, Genre, MovieId, UserId};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn slot(title: &str) -> ScheduledMovie {
        serde_json::from_str(&format!(
            r#"{{"title": "{}", "channel": "Rai 1", "time": "21:00"}}"#,
            title
        ))
        .unwrap()
    }

    fn candidate(id: &str, title: &str) -> ResolvedCandidate {
        let mut movie = Movie::new(MovieId::parse(id).unwrap());
        movie.original_title = Some(title.to_string());
        ResolvedCandidate {
            slot: slot(title),
            movie,
        }
    }

    fn user() -> User {
        User::new(UserId::new("test@example.com"), "Test")
    }

    fn snapshot_with_actor(id: &str, weight: f64) -> TasteSnapshot {
        let mut tastes = TasteSnapshot::default();
        tastes.artists.insert(ArtistId::parse(id).unwrap(), weight);
        tastes
    }

    #[test]
    fn test_matching_candidate_ranks_first() {
        let tastes = snapshot_with_actor("nm0000001", 0.2);

        let mut starring = candidate("tt0000002", "Starring");
        starring
            .movie
            .add_actor(ArtistId::parse("nm0000001").unwrap());
        let unrelated = candidate("tt0000001", "Unrelated");

        let ranked = rank(&user(), &tastes, vec![unrelated, starring]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].movie.id, MovieId::parse("tt0000002").unwrap());
        assert!((ranked[0].points - 0.2).abs() < 1e-9);
        assert_eq!(ranked[1].points, 0.0);
    }

    #[test]
    fn test_multi_role_artist_counts_per_role() {
        let tastes = snapshot_with_actor("nm0000001", 0.5);

        let mut c = candidate("tt0000001", "Auteur Piece");
        let auteur = ArtistId::parse("nm0000001").unwrap();
        c.movie.add_actor(auteur.clone());
        c.movie.add_director(auteur.clone());
        c.movie.add_writer(auteur);

        let ranked = rank(&user(), &tastes, vec![c]);
        assert!((ranked[0].points - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_genre_weights_accumulate() {
        let mut tastes = TasteSnapshot::default();
        tastes.genres.insert(Genre::Action, 0.15);
        tastes.genres.insert(Genre::SciFi, 0.3);

        let mut c = candidate("tt0000001", "Genre Piece");
        c.movie.add_genre(Genre::Action);
        c.movie.add_genre(Genre::SciFi);
        c.movie.add_genre(Genre::Drama);

        let ranked = rank(&user(), &tastes, vec![c]);
        assert!((ranked[0].points - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_ordering_is_deterministic_with_signal() {
        let tastes = snapshot_with_actor("nm0000001", 0.2);

        let build = || {
            let mut hit = candidate("tt0000001", "Hit");
            hit.movie.add_actor(ArtistId::parse("nm0000001").unwrap());
            vec![
                candidate("tt0000002", "B"),
                hit,
                candidate("tt0000003", "C"),
                candidate("tt0000004", "D"),
            ]
        };

        let first: Vec<MovieId> = rank(&user(), &tastes, build())
            .into_iter()
            .map(|r| r.movie.id)
            .collect();
        for _ in 0..20 {
            let again: Vec<MovieId> = rank(&user(), &tastes, build())
                .into_iter()
                .map(|r| r.movie.id)
                .collect();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let tastes = snapshot_with_actor("nm0000009", 0.2);

        let mut hit = candidate("tt0000009", "Hit");
        hit.movie.add_actor(ArtistId::parse("nm0000009").unwrap());

        // Three zero-point candidates plus one hit; the zeros must retain
        // their relative order behind it.
        let ranked = rank(
            &user(),
            &tastes,
            vec![
                candidate("tt0000001", "A"),
                candidate("tt0000002", "B"),
                hit,
                candidate("tt0000003", "C"),
            ],
        );
        let ids: Vec<&str> = ranked.iter().map(|r| r.movie.id.as_str()).collect();
        assert_eq!(ids, vec!["tt0000009", "tt0000001", "tt0000002", "tt0000003"]);
    }

    #[test]
    fn test_no_signal_shuffles() {
        let tastes = TasteSnapshot::default();

        let build = || {
            (1..=8)
                .map(|i| candidate(&format!("tt000000{}", i), &format!("Movie {}", i)))
                .collect::<Vec<_>>()
        };

        let mut seen = HashSet::new();
        for _ in 0..50 {
            let order: Vec<String> = rank(&user(), &tastes, build())
                .into_iter()
                .map(|r| r.movie.id.to_string())
                .collect();
            seen.insert(order);
        }
        // 8! orderings; 50 identical draws would mean the shuffle is a
        // no-op.
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_watched_movies_are_excluded_not_zero_scored() {
        let tastes = snapshot_with_actor("nm0000001", 0.2);

        let mut watched_user = user();
        watched_user.add_watched(
            MovieId::parse("tt0000001").unwrap(),
            NaiveDate::from_ymd_opt(2015, 3, 1).unwrap(),
        );

        let mut hit = candidate("tt0000001", "Seen It");
        hit.movie.add_actor(ArtistId::parse("nm0000001").unwrap());

        let ranked = rank(
            &watched_user,
            &tastes,
            vec![hit.clone(), candidate("tt0000002", "Fresh")],
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].movie.id, MovieId::parse("tt0000002").unwrap());

        // With repeat_choice the watched movie is scored again.
        let mut repeat_user = watched_user.clone();
        repeat_user.repeat_choice = true;
        let ranked = rank(
            &repeat_user,
            &tastes,
            vec![hit, candidate("tt0000002", "Fresh")],
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].movie.id, MovieId::parse("tt0000001").unwrap());
    }
}
