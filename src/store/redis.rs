use std::fmt::Display;

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{Artist, ArtistId, Movie, MovieId, TasteEdge, TasteKey, User, UserId};

use super::EntityStore;

/// Set holding every subscribed user id, for enumeration by the daily task.
const USERS_SET: &str = "users";

/// Namespaced storage keys. Each entity kind gets its own prefix, and the
/// taste key embeds its typed composite id, so no two kinds can collide.
enum StoreKey<'a> {
    Movie(&'a MovieId),
    Artist(&'a ArtistId),
    User(&'a UserId),
    Taste(&'a TasteKey),
    OriginalTitle(&'a str),
    LocalTitle(&'a str),
}

impl Display for StoreKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::Movie(id) => write!(f, "movie:{}", id),
            StoreKey::Artist(id) => write!(f, "artist:{}", id),
            StoreKey::User(id) => write!(f, "user:{}", id),
            StoreKey::Taste(key) => write!(f, "taste:{}", key),
            StoreKey::OriginalTitle(title) => write!(f, "title:original:{}", title),
            StoreKey::LocalTitle(title) => write!(f, "title:local:{}", title),
        }
    }
}

/// Redis-backed entity store: JSON values under namespaced keys, with
/// title-index keys maintained on movie writes.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    pub fn new(redis_url: &str) -> anyhow::Result<Self> {
        let client = Client::open(redis_url)?;
        Ok(Self { client })
    }

    async fn get_json<T: DeserializeOwned>(&self, key: StoreKey<'_>) -> AppResult<Option<T>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(key.to_string()).await?;
        match raw {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Store deserialization error: {}", e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put_json<T: Serialize>(&self, key: StoreKey<'_>, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Store serialization error: {}", e)))?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key.to_string(), json).await?;
        Ok(())
    }

    async fn delete(&self, key: StoreKey<'_>) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(key.to_string()).await?;
        Ok(())
    }
}

#[async_trait]
impl EntityStore for RedisStore {
    async fn get_movie(&self, id: &MovieId) -> AppResult<Option<Movie>> {
        self.get_json(StoreKey::Movie(id)).await
    }

    async fn put_movie(&self, movie: &Movie) -> AppResult<()> {
        self.put_json(StoreKey::Movie(&movie.id), movie).await?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        if let Some(original) = movie.original_title.as_deref() {
            let _: () = conn
                .set(
                    StoreKey::OriginalTitle(original).to_string(),
                    movie.id.as_str(),
                )
                .await?;
        }
        if let Some(title) = movie.title.as_deref() {
            let _: () = conn
                .set(StoreKey::LocalTitle(title).to_string(), movie.id.as_str())
                .await?;
        }
        Ok(())
    }

    async fn find_movie_by_title(
        &self,
        title: &str,
        original_title: Option<&str>,
    ) -> AppResult<Option<Movie>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        if let Some(original) = original_title {
            let hit: Option<String> = conn
                .get(StoreKey::OriginalTitle(original).to_string())
                .await?;
            if let Some(raw) = hit {
                let id = MovieId::parse(&raw)?;
                return self.get_movie(&id).await;
            }
        }

        let hit: Option<String> = conn.get(StoreKey::LocalTitle(title).to_string()).await?;
        match hit {
            Some(raw) => {
                let id = MovieId::parse(&raw)?;
                self.get_movie(&id).await
            }
            None => Ok(None),
        }
    }

    async fn get_artist(&self, id: &ArtistId) -> AppResult<Option<Artist>> {
        self.get_json(StoreKey::Artist(id)).await
    }

    async fn put_artist(&self, artist: &Artist) -> AppResult<()> {
        self.put_json(StoreKey::Artist(&artist.id), artist).await
    }

    async fn get_user(&self, id: &UserId) -> AppResult<Option<User>> {
        self.get_json(StoreKey::User(id)).await
    }

    async fn put_user(&self, user: &User) -> AppResult<()> {
        self.put_json(StoreKey::User(&user.id), user).await?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.sadd(USERS_SET, user.id.as_str()).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> AppResult<()> {
        self.delete(StoreKey::User(id)).await?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.srem(USERS_SET, id.as_str()).await?;
        Ok(())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let ids: Vec<String> = conn.smembers(USERS_SET).await?;

        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(user) = self.get_user(&UserId::new(id)).await? {
                users.push(user);
            }
        }
        Ok(users)
    }

    async fn get_edge(&self, key: &TasteKey) -> AppResult<Option<TasteEdge>> {
        self.get_json(StoreKey::Taste(key)).await
    }

    async fn put_edge(&self, edge: &TasteEdge) -> AppResult<()> {
        self.put_json(StoreKey::Taste(&edge.key), edge).await
    }

    async fn delete_edge(&self, key: &TasteKey) -> AppResult<()> {
        self.delete(StoreKey::Taste(key)).await
    }
}
