use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::cache::ProposalCache;
use crate::config::TasteWeights;
use crate::error::{AppError, AppResult};
use crate::models::{
    ArtistId, Genre, Movie, MovieId, TasteEdge, TasteKey, TasteTarget, User, UserId,
};
use crate::store::EntityStore;

/// Weight applied when a user votes for a target directly.
const EXPLICIT_WEIGHT: f64 = 1.0;

/// Weights are sums of repeated f64 constants; comparisons against zero and
/// one tolerate representation error so an exhausted edge cannot survive on
/// residue.
const WEIGHT_EPSILON: f64 = 1e-9;

/// Maintains the per-user weighted preference graph.
///
/// Every mutation runs under the owning user's lock together with the
/// proposal-cache invalidation, so a concurrent ranking read can never
/// observe post-mutation weights behind a pre-mutation proposal. Mutations
/// for different users never contend.
///
/// The ledger assumes referenced Movie/Artist records are already stored;
/// retrieval from the metadata source is an upstream responsibility. A
/// missing record fails the operation with a consistency error.
pub struct TasteLedger {
    store: Arc<dyn EntityStore>,
    proposals: ProposalCache,
    weights: TasteWeights,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

/// A read-only view of one user's artist and genre weights, used by the
/// ranker. Built once per ranking run; never written back.
#[derive(Debug, Default, Clone)]
pub struct TasteSnapshot {
    pub artists: HashMap<ArtistId, f64>,
    pub genres: HashMap<Genre, f64>,
}

impl TasteLedger {
    pub fn new(
        store: Arc<dyn EntityStore>,
        proposals: ProposalCache,
        weights: TasteWeights,
    ) -> Self {
        Self {
            store,
            proposals,
            weights,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Votes for a movie and propagates per-relation weight bumps to its
    /// artists and genres. The movie edge itself is upserted at the given
    /// weight; derived edges accumulate across movies.
    pub async fn add_taste_movie(
        &self,
        user_id: &UserId,
        movie_id: &MovieId,
        weight: f64,
    ) -> AppResult<()> {
        let _guard = self.lock_user(user_id).await;
        let mut user = self.require_user(user_id).await?;
        let movie = self.require_movie(movie_id).await?;

        let key = TasteKey::new(user_id.clone(), TasteTarget::Movie(movie_id.clone()));
        let explicit = is_explicit(weight);
        self.store
            .put_edge(&TasteEdge::new(key, weight, explicit))
            .await?;
        if !user.taste_movies.contains(movie_id) {
            user.taste_movies.push(movie_id.clone());
        }

        self.propagate(&mut user, &movie, 1.0).await?;

        self.store.put_user(&user).await?;
        self.proposals.clear(user_id).await;
        tracing::debug!(user = %user_id, movie = %movie_id, weight, "Movie taste added");
        Ok(())
    }

    /// Votes for an artist directly, or reinforces an edge propagation
    /// already created. No further propagation happens here.
    pub async fn add_taste_artist(
        &self,
        user_id: &UserId,
        artist_id: &ArtistId,
        weight: f64,
    ) -> AppResult<()> {
        let _guard = self.lock_user(user_id).await;
        let mut user = self.require_user(user_id).await?;

        self.adjust_artist(&mut user, artist_id, weight).await?;

        self.store.put_user(&user).await?;
        self.proposals.clear(user_id).await;
        Ok(())
    }

    /// Votes for a genre. A string outside the closed genre vocabulary is a
    /// silent no-op.
    pub async fn add_taste_genre(
        &self,
        user_id: &UserId,
        genre: &str,
        weight: f64,
    ) -> AppResult<()> {
        let Ok(genre) = genre.parse::<Genre>() else {
            tracing::debug!(user = %user_id, genre, "Ignoring unknown genre");
            return Ok(());
        };

        let _guard = self.lock_user(user_id).await;
        let mut user = self.require_user(user_id).await?;

        self.apply_genre(&mut user, genre, weight).await?;

        self.store.put_user(&user).await?;
        self.proposals.clear(user_id).await;
        Ok(())
    }

    /// Removes a movie vote and unwinds its propagation: every derived
    /// artist/genre edge loses the constant the addition granted, and any
    /// edge whose weight falls to zero or below is deleted.
    pub async fn remove_taste_movie(&self, user_id: &UserId, movie_id: &MovieId) -> AppResult<()> {
        let _guard = self.lock_user(user_id).await;
        let mut user = self.require_user(user_id).await?;

        let key = TasteKey::new(user_id.clone(), TasteTarget::Movie(movie_id.clone()));
        if self.store.get_edge(&key).await?.is_some() {
            let movie = self.require_movie(movie_id).await?;

            self.store.delete_edge(&key).await?;
            user.taste_movies.retain(|m| m != movie_id);

            self.propagate(&mut user, &movie, -1.0).await?;
            self.store.put_user(&user).await?;
            tracing::debug!(user = %user_id, movie = %movie_id, "Movie taste removed");
        }

        self.proposals.clear(user_id).await;
        Ok(())
    }

    /// Removes an explicit artist vote. A multiply-reinforced edge loses
    /// one explicit layer instead of disappearing.
    pub async fn remove_taste_artist(
        &self,
        user_id: &UserId,
        artist_id: &ArtistId,
    ) -> AppResult<()> {
        let _guard = self.lock_user(user_id).await;
        let mut user = self.require_user(user_id).await?;

        let key = TasteKey::new(user_id.clone(), TasteTarget::Artist(artist_id.clone()));
        if let Some(mut edge) = self.store.get_edge(&key).await? {
            if edge.weight <= EXPLICIT_WEIGHT + WEIGHT_EPSILON {
                self.store.delete_edge(&key).await?;
                user.taste_artists.retain(|a| a != artist_id);
            } else {
                edge.weight -= EXPLICIT_WEIGHT;
                edge.explicit = false;
                self.store.put_edge(&edge).await?;
            }
            self.store.put_user(&user).await?;
        }

        self.proposals.clear(user_id).await;
        Ok(())
    }

    /// Removes an explicit genre vote, with the same peel-one-layer policy
    /// as artists. Unknown genre strings are a silent no-op.
    pub async fn remove_taste_genre(&self, user_id: &UserId, genre: &str) -> AppResult<()> {
        let Ok(genre) = genre.parse::<Genre>() else {
            return Ok(());
        };

        let _guard = self.lock_user(user_id).await;
        let mut user = self.require_user(user_id).await?;

        let key = TasteKey::new(user_id.clone(), TasteTarget::Genre(genre));
        if let Some(mut edge) = self.store.get_edge(&key).await? {
            if edge.weight <= EXPLICIT_WEIGHT + WEIGHT_EPSILON {
                self.store.delete_edge(&key).await?;
                user.taste_genres.retain(|g| g != &genre);
            } else {
                edge.weight -= EXPLICIT_WEIGHT;
                edge.explicit = false;
                self.store.put_edge(&edge).await?;
            }
            self.store.put_user(&user).await?;
        }

        self.proposals.clear(user_id).await;
        Ok(())
    }

    /// Collects the user's current artist and genre weights for ranking.
    /// A dangling edge reference is logged and skipped, never fatal.
    pub async fn snapshot(&self, user: &User) -> AppResult<TasteSnapshot> {
        let mut snapshot = TasteSnapshot::default();

        for artist_id in &user.taste_artists {
            let key = TasteKey::new(user.id.clone(), TasteTarget::Artist(artist_id.clone()));
            match self.store.get_edge(&key).await? {
                Some(edge) => {
                    snapshot.artists.insert(artist_id.clone(), edge.weight);
                }
                None => {
                    tracing::error!(user = %user.id, artist = %artist_id, "Dangling artist taste reference");
                }
            }
        }

        for genre in &user.taste_genres {
            let key = TasteKey::new(user.id.clone(), TasteTarget::Genre(*genre));
            match self.store.get_edge(&key).await? {
                Some(edge) => {
                    snapshot.genres.insert(*genre, edge.weight);
                }
                None => {
                    tracing::error!(user = %user.id, genre = %genre, "Dangling genre taste reference");
                }
            }
        }

        Ok(snapshot)
    }

    /// Applies the per-relation constants for every credit of `movie`,
    /// scaled by `sign` (+1 on add, -1 on remove).
    async fn propagate(&self, user: &mut User, movie: &Movie, sign: f64) -> AppResult<()> {
        for actor in &movie.actors {
            self.adjust_artist(user, actor, sign * self.weights.actor)
                .await?;
        }
        for director in &movie.directors {
            self.adjust_artist(user, director, sign * self.weights.director)
                .await?;
        }
        for writer in &movie.writers {
            self.adjust_artist(user, writer, sign * self.weights.writer)
                .await?;
        }
        for genre in &movie.genres {
            self.apply_genre(user, *genre, sign * self.weights.genre)
                .await?;
        }
        Ok(())
    }

    /// Upsert-or-increment for an artist edge. A resulting weight at or
    /// below zero deletes the edge, which also prunes the transient
    /// negative edge created when a removal finds nothing to subtract from.
    async fn adjust_artist(
        &self,
        user: &mut User,
        artist_id: &ArtistId,
        delta: f64,
    ) -> AppResult<()> {
        self.require_artist(artist_id).await?;

        let key = TasteKey::new(user.id.clone(), TasteTarget::Artist(artist_id.clone()));
        let edge = match self.store.get_edge(&key).await? {
            Some(mut edge) => {
                edge.weight += delta;
                if is_explicit(delta) {
                    edge.explicit = true;
                }
                edge
            }
            None => TasteEdge::new(key.clone(), delta, is_explicit(delta)),
        };

        if edge.weight <= WEIGHT_EPSILON {
            self.store.delete_edge(&key).await?;
            user.taste_artists.retain(|a| a != artist_id);
        } else {
            self.store.put_edge(&edge).await?;
            if !user.taste_artists.contains(artist_id) {
                user.taste_artists.push(artist_id.clone());
            }
        }
        Ok(())
    }

    /// Upsert-or-increment for a genre edge, mirroring `adjust_artist`.
    async fn apply_genre(&self, user: &mut User, genre: Genre, delta: f64) -> AppResult<()> {
        let key = TasteKey::new(user.id.clone(), TasteTarget::Genre(genre));
        let edge = match self.store.get_edge(&key).await? {
            Some(mut edge) => {
                edge.weight += delta;
                if is_explicit(delta) {
                    edge.explicit = true;
                }
                edge
            }
            None => TasteEdge::new(key.clone(), delta, is_explicit(delta)),
        };

        if edge.weight <= WEIGHT_EPSILON {
            self.store.delete_edge(&key).await?;
            user.taste_genres.retain(|g| g != &genre);
        } else {
            self.store.put_edge(&edge).await?;
            if !user.taste_genres.contains(&genre) {
                user.taste_genres.push(genre);
            }
        }
        Ok(())
    }

    async fn require_user(&self, id: &UserId) -> AppResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} is not subscribed", id)))
    }

    async fn require_movie(&self, id: &MovieId) -> AppResult<Movie> {
        self.store
            .get_movie(id)
            .await?
            .ok_or_else(|| AppError::Consistency(format!("movie {} not in store", id)))
    }

    async fn require_artist(&self, id: &ArtistId) -> AppResult<()> {
        self.store
            .get_artist(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::Consistency(format!("artist {} not in store", id)))
    }

    /// Serializes mutations per user; the guard is held across the store
    /// writes and the proposal invalidation.
    async fn lock_user(&self, user_id: &UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.user_locks.lock().await;
            locks
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

fn is_explicit(weight: f64) -> bool {
    (weight - EXPLICIT_WEIGHT).abs() < WEIGHT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{AppCache, MemoryCache};
    use crate::models::Artist;
    use crate::store::MemoryStore;

    const ACTOR: f64 = 0.2;
    const DIRECTOR: f64 = 0.12;
    const WRITER: f64 = 0.1;
    const GENRE: f64 = 0.15;

    struct Fixture {
        store: Arc<MemoryStore>,
        proposals: ProposalCache,
        ledger: TasteLedger,
        user: UserId,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let proposals = ProposalCache::new(AppCache::new(Arc::new(MemoryCache::new())));
        let ledger = TasteLedger::new(
            store.clone(),
            proposals.clone(),
            TasteWeights::default(),
        );
        let user = UserId::new("test@example.com");
        store
            .put_user(&User::new(user.clone(), "Test"))
            .await
            .unwrap();
        Fixture {
            store,
            proposals,
            ledger,
            user,
        }
    }

    async fn seed_artist(store: &MemoryStore, id: &str) -> ArtistId {
        let artist_id = ArtistId::parse(id).unwrap();
        store
            .put_artist(&Artist::new(artist_id.clone(), "Artist"))
            .await
            .unwrap();
        artist_id
    }

    /// One actor, one director (same person also writes), two genres.
    async fn seed_movie(store: &MemoryStore) -> Movie {
        let actor = seed_artist(store, "nm0000001").await;
        let director = seed_artist(store, "nm0000002").await;

        let mut movie = Movie::new(MovieId::parse("tt0000001").unwrap());
        movie.title = Some("Matrix".to_string());
        movie.original_title = Some("The Matrix".to_string());
        movie.add_actor(actor);
        movie.add_director(director.clone());
        movie.add_writer(director);
        movie.add_genre(Genre::Action);
        movie.add_genre(Genre::SciFi);
        store.put_movie(&movie).await.unwrap();
        movie
    }

    async fn edge_weight(fx: &Fixture, target: TasteTarget) -> Option<f64> {
        fx.store
            .get_edge(&TasteKey::new(fx.user.clone(), target))
            .await
            .unwrap()
            .map(|e| e.weight)
    }

    #[tokio::test]
    async fn test_add_taste_movie_propagates_weights() {
        let fx = fixture().await;
        let movie = seed_movie(&fx.store).await;

        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();

        let movie_edge = fx
            .store
            .get_edge(&TasteKey::new(
                fx.user.clone(),
                TasteTarget::Movie(movie.id.clone()),
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(movie_edge.weight, 1.0);
        assert!(movie_edge.explicit);

        let actor = edge_weight(&fx, TasteTarget::Artist(movie.actors[0].clone()))
            .await
            .unwrap();
        assert!((actor - ACTOR).abs() < 1e-9);

        // Director and writer are the same artist: both constants land on
        // one edge.
        let director = edge_weight(&fx, TasteTarget::Artist(movie.directors[0].clone()))
            .await
            .unwrap();
        assert!((director - (DIRECTOR + WRITER)).abs() < 1e-9);

        let action = edge_weight(&fx, TasteTarget::Genre(Genre::Action))
            .await
            .unwrap();
        assert!((action - GENRE).abs() < 1e-9);

        let user = fx.store.get_user(&fx.user).await.unwrap().unwrap();
        assert_eq!(user.taste_movies, vec![movie.id.clone()]);
        assert_eq!(user.taste_artists.len(), 2);
        assert_eq!(user.taste_genres, vec![Genre::Action, Genre::SciFi]);
    }

    #[tokio::test]
    async fn test_add_twice_keeps_single_edge_per_target() {
        let fx = fixture().await;
        let movie = seed_movie(&fx.store).await;

        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();
        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();

        let user = fx.store.get_user(&fx.user).await.unwrap().unwrap();
        assert_eq!(user.taste_movies.len(), 1);
        assert_eq!(user.taste_artists.len(), 2);

        // The movie edge is an upsert; derived edges reinforce.
        let movie_edge = edge_weight(&fx, TasteTarget::Movie(movie.id.clone()))
            .await
            .unwrap();
        assert_eq!(movie_edge, 1.0);
        let actor = edge_weight(&fx, TasteTarget::Artist(movie.actors[0].clone()))
            .await
            .unwrap();
        assert!((actor - 2.0 * ACTOR).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_remove_round_trip_restores_derived_edges() {
        let fx = fixture().await;
        let movie = seed_movie(&fx.store).await;

        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();
        fx.ledger
            .remove_taste_movie(&fx.user, &movie.id)
            .await
            .unwrap();

        assert!(edge_weight(&fx, TasteTarget::Movie(movie.id.clone()))
            .await
            .is_none());
        assert!(
            edge_weight(&fx, TasteTarget::Artist(movie.actors[0].clone()))
                .await
                .is_none()
        );
        assert!(
            edge_weight(&fx, TasteTarget::Artist(movie.directors[0].clone()))
                .await
                .is_none()
        );
        assert!(edge_weight(&fx, TasteTarget::Genre(Genre::Action))
            .await
            .is_none());

        let user = fx.store.get_user(&fx.user).await.unwrap().unwrap();
        assert!(user.taste_movies.is_empty());
        assert!(user.taste_artists.is_empty());
        assert!(user.taste_genres.is_empty());
    }

    #[tokio::test]
    async fn test_remove_keeps_edges_reinforced_by_other_movies() {
        let fx = fixture().await;
        let movie = seed_movie(&fx.store).await;

        // Second movie sharing the actor.
        let mut other = Movie::new(MovieId::parse("tt0000002").unwrap());
        other.original_title = Some("Reloaded".to_string());
        other.add_actor(movie.actors[0].clone());
        other.add_genre(Genre::Action);
        fx.store.put_movie(&other).await.unwrap();

        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();
        fx.ledger
            .add_taste_movie(&fx.user, &other.id, 1.0)
            .await
            .unwrap();
        fx.ledger
            .remove_taste_movie(&fx.user, &movie.id)
            .await
            .unwrap();

        // The shared actor keeps the other movie's contribution.
        let actor = edge_weight(&fx, TasteTarget::Artist(movie.actors[0].clone()))
            .await
            .unwrap();
        assert!((actor - ACTOR).abs() < 1e-9);
        let action = edge_weight(&fx, TasteTarget::Genre(Genre::Action))
            .await
            .unwrap();
        assert!((action - GENRE).abs() < 1e-9);

        // Targets only the removed movie contributed are gone.
        assert!(
            edge_weight(&fx, TasteTarget::Artist(movie.directors[0].clone()))
                .await
                .is_none()
        );
        assert!(edge_weight(&fx, TasteTarget::Genre(Genre::SciFi))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_no_edge_survives_with_non_positive_weight() {
        let fx = fixture().await;
        let movie = seed_movie(&fx.store).await;

        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();

        // Simulate a dangling state: the actor edge disappears while the
        // movie edge is still present. Removal then subtracts from nothing
        // and the transient negative edge must be pruned, not stored.
        let actor = movie.actors[0].clone();
        fx.store
            .delete_edge(&TasteKey::new(
                fx.user.clone(),
                TasteTarget::Artist(actor.clone()),
            ))
            .await
            .unwrap();

        fx.ledger
            .remove_taste_movie(&fx.user, &movie.id)
            .await
            .unwrap();

        assert!(edge_weight(&fx, TasteTarget::Artist(actor)).await.is_none());
        let user = fx.store.get_user(&fx.user).await.unwrap().unwrap();
        assert!(user.taste_artists.is_empty());
        assert!(user.taste_genres.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_artist_add_and_peel() {
        let fx = fixture().await;
        let artist = seed_artist(&fx.store, "nm0000003").await;

        fx.ledger
            .add_taste_artist(&fx.user, &artist, 1.0)
            .await
            .unwrap();
        fx.ledger
            .add_taste_artist(&fx.user, &artist, 1.0)
            .await
            .unwrap();

        let edge = fx
            .store
            .get_edge(&TasteKey::new(
                fx.user.clone(),
                TasteTarget::Artist(artist.clone()),
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(edge.weight, 2.0);
        assert!(edge.explicit);

        // Removing peels one layer and clears the explicit flag.
        fx.ledger
            .remove_taste_artist(&fx.user, &artist)
            .await
            .unwrap();
        let edge = fx
            .store
            .get_edge(&TasteKey::new(
                fx.user.clone(),
                TasteTarget::Artist(artist.clone()),
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(edge.weight, 1.0);
        assert!(!edge.explicit);

        // A second removal exhausts the edge.
        fx.ledger
            .remove_taste_artist(&fx.user, &artist)
            .await
            .unwrap();
        assert!(edge_weight(&fx, TasteTarget::Artist(artist)).await.is_none());
    }

    #[tokio::test]
    async fn test_explicit_vote_on_propagated_edge_is_additive() {
        let fx = fixture().await;
        let movie = seed_movie(&fx.store).await;
        let actor = movie.actors[0].clone();

        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();
        fx.ledger
            .add_taste_artist(&fx.user, &actor, 1.0)
            .await
            .unwrap();

        let edge = fx
            .store
            .get_edge(&TasteKey::new(
                fx.user.clone(),
                TasteTarget::Artist(actor),
            ))
            .await
            .unwrap()
            .unwrap();
        assert!((edge.weight - (ACTOR + 1.0)).abs() < 1e-9);
        assert!(edge.explicit);
    }

    #[tokio::test]
    async fn test_unknown_genre_is_silently_ignored() {
        let fx = fixture().await;

        fx.ledger
            .add_taste_genre(&fx.user, "Telenovela", 1.0)
            .await
            .unwrap();
        fx.ledger
            .remove_taste_genre(&fx.user, "Telenovela")
            .await
            .unwrap();

        let user = fx.store.get_user(&fx.user).await.unwrap().unwrap();
        assert!(user.taste_genres.is_empty());
    }

    #[tokio::test]
    async fn test_missing_movie_is_consistency_error() {
        let fx = fixture().await;
        let missing = MovieId::parse("tt9999999").unwrap();

        let err = fx
            .ledger
            .add_taste_movie(&fx.user, &missing, 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Consistency(_)));
    }

    #[tokio::test]
    async fn test_missing_artist_record_fails_propagation() {
        let fx = fixture().await;
        let mut movie = Movie::new(MovieId::parse("tt0000005").unwrap());
        movie.add_actor(ArtistId::parse("nm7777777").unwrap());
        fx.store.put_movie(&movie).await.unwrap();

        let err = fx
            .ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Consistency(_)));
    }

    #[tokio::test]
    async fn test_mutation_invalidates_cached_proposal() {
        let fx = fixture().await;
        let movie = seed_movie(&fx.store).await;

        fx.proposals.set(&fx.user, &[]).await;
        assert!(fx.proposals.get(&fx.user).await.is_some());

        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();
        assert!(fx.proposals.get(&fx.user).await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_collects_current_weights() {
        let fx = fixture().await;
        let movie = seed_movie(&fx.store).await;

        fx.ledger
            .add_taste_movie(&fx.user, &movie.id, 1.0)
            .await
            .unwrap();

        let user = fx.store.get_user(&fx.user).await.unwrap().unwrap();
        let snapshot = fx.ledger.snapshot(&user).await.unwrap();
        assert_eq!(snapshot.artists.len(), 2);
        assert_eq!(snapshot.genres.len(), 2);
        assert!((snapshot.genres[&Genre::Action] - GENRE).abs() < 1e-9);
    }
}
