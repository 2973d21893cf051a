pub mod memory;
pub mod redis;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Artist, ArtistId, Movie, MovieId, TasteEdge, TasteKey, User, UserId};

pub use memory::MemoryStore;
pub use redis::RedisStore;

/// Key-value persistence for movies, artists, users and taste edges.
///
/// Every record is keyed by its natural id and written with upsert
/// semantics. Storage failures propagate unchanged; retrying belongs to
/// the caller, not here.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_movie(&self, id: &MovieId) -> AppResult<Option<Movie>>;
    async fn put_movie(&self, movie: &Movie) -> AppResult<()>;

    /// Exact-title resolution for schedule candidates: a movie matches when
    /// its original title equals `original_title` or its localized title
    /// equals `title`. Original title wins; first match is returned.
    async fn find_movie_by_title(
        &self,
        title: &str,
        original_title: Option<&str>,
    ) -> AppResult<Option<Movie>>;

    async fn get_artist(&self, id: &ArtistId) -> AppResult<Option<Artist>>;
    async fn put_artist(&self, artist: &Artist) -> AppResult<()>;

    async fn get_user(&self, id: &UserId) -> AppResult<Option<User>>;
    async fn put_user(&self, user: &User) -> AppResult<()>;
    async fn delete_user(&self, id: &UserId) -> AppResult<()>;
    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn get_edge(&self, key: &TasteKey) -> AppResult<Option<TasteEdge>>;
    async fn put_edge(&self, edge: &TasteEdge) -> AppResult<()>;
    async fn delete_edge(&self, key: &TasteKey) -> AppResult<()>;
}
