use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::{Artist, ArtistId, Movie, MovieId, TasteEdge, TasteKey, User, UserId};

use super::EntityStore;

/// In-memory entity store used by tests and redis-less local runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    movies: HashMap<MovieId, Movie>,
    artists: HashMap<ArtistId, Artist>,
    users: HashMap<UserId, User>,
    edges: HashMap<TasteKey, TasteEdge>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_movie(&self, id: &MovieId) -> AppResult<Option<Movie>> {
        Ok(self.inner.read().await.movies.get(id).cloned())
    }

    async fn put_movie(&self, movie: &Movie) -> AppResult<()> {
        self.inner
            .write()
            .await
            .movies
            .insert(movie.id.clone(), movie.clone());
        Ok(())
    }

    async fn find_movie_by_title(
        &self,
        title: &str,
        original_title: Option<&str>,
    ) -> AppResult<Option<Movie>> {
        let inner = self.inner.read().await;
        if let Some(original) = original_title {
            let hit = inner
                .movies
                .values()
                .find(|m| m.original_title.as_deref() == Some(original));
            if let Some(movie) = hit {
                return Ok(Some(movie.clone()));
            }
        }
        Ok(inner
            .movies
            .values()
            .find(|m| m.title.as_deref() == Some(title))
            .cloned())
    }

    async fn get_artist(&self, id: &ArtistId) -> AppResult<Option<Artist>> {
        Ok(self.inner.read().await.artists.get(id).cloned())
    }

    async fn put_artist(&self, artist: &Artist) -> AppResult<()> {
        self.inner
            .write()
            .await
            .artists
            .insert(artist.id.clone(), artist.clone());
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn put_user(&self, user: &User) -> AppResult<()> {
        self.inner
            .write()
            .await
            .users
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> AppResult<()> {
        self.inner.write().await.users.remove(id);
        Ok(())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn get_edge(&self, key: &TasteKey) -> AppResult<Option<TasteEdge>> {
        Ok(self.inner.read().await.edges.get(key).cloned())
    }

    async fn put_edge(&self, edge: &TasteEdge) -> AppResult<()> {
        self.inner
            .write()
            .await
            .edges
            .insert(edge.key.clone(), edge.clone());
        Ok(())
    }

    async fn delete_edge(&self, key: &TasteKey) -> AppResult<()> {
        self.inner.write().await.edges.remove(key);
        Ok(())
    }
}
