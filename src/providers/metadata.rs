use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{Artist, ArtistId, Genre, Movie, MovieId};

/// Looks a movie up by title in the external film-database API, returning
/// the movie record together with every credited artist so the caller can
/// store them in one pass.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn lookup(&self, title: &str) -> AppResult<RetrievedMovie>;
}

/// A movie and the artist records credited in it.
#[derive(Debug, Clone)]
pub struct RetrievedMovie {
    pub movie: Movie,
    pub artists: Vec<Artist>,
}

// Upstream payload types. The API returns an array of matches; we request
// a single result by title.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMovie {
    #[serde(rename = "idIMDB")]
    id_imdb: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    original_title: Option<String>,
    #[serde(default)]
    simple_plot: Option<String>,
    #[serde(default)]
    plot: Option<String>,
    #[serde(default)]
    plot_localized: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    runtime: Vec<String>,
    #[serde(default)]
    rated: Option<String>,
    #[serde(default)]
    countries: Vec<String>,
    #[serde(default)]
    url_poster: Option<String>,
    #[serde(default)]
    trailer: Option<ApiTrailer>,
    #[serde(default)]
    directors: Vec<ApiCredit>,
    #[serde(default)]
    writers: Vec<ApiCredit>,
    #[serde(default)]
    actors: Vec<ApiCredit>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTrailer {
    #[serde(default)]
    video_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCredit {
    id: String,
    name: String,
    #[serde(default)]
    url_photo: Option<String>,
}

/// HTTP client for the film-database JSON API.
pub struct HttpMetadataProvider {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl HttpMetadataProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl MetadataProvider for HttpMetadataProvider {
    async fn lookup(&self, title: &str) -> AppResult<RetrievedMovie> {
        let mut query: Vec<(&str, &str)> = vec![
            ("title", title),
            ("format", "json"),
            ("limit", "1"),
            ("actors", "S"),
            ("trailer", "1"),
        ];
        if !self.api_key.is_empty() {
            query.push(("token", self.api_key.as_str()));
        }

        tracing::debug!(title, "Looking up movie metadata");
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(title, status = %status, "Metadata API request failed");
            return Err(AppError::Upstream(format!(
                "metadata API returned status {}",
                status
            )));
        }

        let matches: Vec<ApiMovie> = response.json().await?;
        let payload = matches
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Upstream(format!("no metadata match for '{}'", title)))?;

        let retrieved = map_payload(payload)?;
        tracing::info!(
            movie = %retrieved.movie.id,
            artists = retrieved.artists.len(),
            "Movie metadata retrieved"
        );
        Ok(retrieved)
    }
}

/// Maps an upstream payload into the stored record shapes. Credits with
/// malformed ids and genres outside the vocabulary are dropped with a log
/// line; everything else is cleaned up and kept.
fn map_payload(payload: ApiMovie) -> AppResult<RetrievedMovie> {
    let id = MovieId::parse(&payload.id_imdb)
        .map_err(|_| AppError::Upstream(format!("malformed movie id '{}'", payload.id_imdb)))?;

    let mut movie = Movie::new(id);
    movie.title = payload.title;
    movie.original_title = payload.original_title;
    movie.simple_plot = payload.simple_plot;
    movie.plot = payload.plot;
    movie.plot_it = payload.plot_localized;
    movie.year = payload.year;
    movie.run_times = payload.runtime.into_iter().next();
    movie.rated = payload.rated;
    movie.countries = payload.countries;
    movie.poster = payload.url_poster.as_deref().and_then(clean_image_url);
    movie.trailer = payload.trailer.and_then(|t| t.video_url);

    for raw in payload.genres {
        match raw.parse::<Genre>() {
            Ok(genre) => movie.add_genre(genre),
            Err(()) => tracing::debug!(genre = %raw, "Dropping unknown genre"),
        }
    }

    let mut artists = Vec::new();
    collect_credits(&mut movie, &mut artists, payload.directors, Movie::add_director);
    collect_credits(&mut movie, &mut artists, payload.writers, Movie::add_writer);
    collect_credits(&mut movie, &mut artists, payload.actors, Movie::add_actor);

    Ok(RetrievedMovie { movie, artists })
}

fn collect_credits(
    movie: &mut Movie,
    artists: &mut Vec<Artist>,
    credits: Vec<ApiCredit>,
    relation: fn(&mut Movie, ArtistId),
) {
    for credit in credits {
        match ArtistId::parse(&credit.id) {
            Ok(artist_id) => {
                relation(movie, artist_id.clone());
                let mut artist = Artist::new(artist_id, credit.name);
                artist.photo = credit.url_photo.as_deref().and_then(clean_image_url);
                artists.push(artist);
            }
            Err(_) => {
                tracing::warn!(id = %credit.id, name = %credit.name, "Dropping credit with malformed artist id");
            }
        }
    }
}

/// Strips the size-variant suffix from catalog image urls; an empty url is
/// treated as absent.
fn clean_image_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    let end = url.find("._").unwrap_or(url.len());
    Some(url[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_image_url() {
        assert_eq!(
            clean_image_url("http://img.example.com/MV5BMjE@._V1_SX300.jpg"),
            Some("http://img.example.com/MV5BMjE@".to_string())
        );
        assert_eq!(
            clean_image_url("http://img.example.com/plain.jpg"),
            Some("http://img.example.com/plain.jpg".to_string())
        );
        assert_eq!(clean_image_url(""), None);
    }

    #[test]
    fn test_map_payload_full() {
        let payload: ApiMovie = serde_json::from_str(
            r#"{
                "idIMDB": "tt0133093",
                "title": "Matrix",
                "originalTitle": "The Matrix",
                "simplePlot": "A hacker learns the truth.",
                "genres": ["Action", "Sci-Fi", "Cyberpunk"],
                "year": "1999",
                "runtime": ["136 min"],
                "rated": "R",
                "countries": ["USA"],
                "urlPoster": "http://img.example.com/poster._V1_SX300.jpg",
                "trailer": {"videoUrl": "http://example.com/trailer"},
                "directors": [{"id": "nm0905154", "name": "Lana Wachowski"}],
                "writers": [{"id": "nm0905154", "name": "Lana Wachowski"}],
                "actors": [
                    {"id": "nm0000206", "name": "Keanu Reeves",
                     "urlPhoto": "http://img.example.com/keanu._V1.jpg"},
                    {"id": "bogus", "name": "Broken Credit"}
                ]
            }"#,
        )
        .unwrap();

        let retrieved = map_payload(payload).unwrap();
        let movie = &retrieved.movie;

        assert_eq!(movie.id.as_str(), "tt0133093");
        // Unknown genre dropped, known ones kept in order.
        assert_eq!(movie.genres, vec![Genre::Action, Genre::SciFi]);
        assert_eq!(movie.run_times.as_deref(), Some("136 min"));
        assert_eq!(
            movie.poster.as_deref(),
            Some("http://img.example.com/poster")
        );
        assert_eq!(movie.trailer.as_deref(), Some("http://example.com/trailer"));

        // Same artist directing and writing lands in both relations once.
        assert_eq!(movie.directors.len(), 1);
        assert_eq!(movie.writers.len(), 1);
        // The malformed actor credit is dropped.
        assert_eq!(movie.actors.len(), 1);
        assert_eq!(movie.actors[0].as_str(), "nm0000206");

        // Artist records: director listed twice (director + writer pass),
        // actor once; the broken credit never materializes.
        assert!(retrieved
            .artists
            .iter()
            .any(|a| a.id.as_str() == "nm0000206"
                && a.photo.as_deref() == Some("http://img.example.com/keanu")));
    }

    #[test]
    fn test_map_payload_minimal() {
        let payload: ApiMovie =
            serde_json::from_str(r#"{"idIMDB": "tt0000001"}"#).unwrap();
        let retrieved = map_payload(payload).unwrap();
        assert_eq!(retrieved.movie.title, None);
        assert_eq!(retrieved.movie.poster, None);
        assert!(retrieved.artists.is_empty());
    }

    #[test]
    fn test_map_payload_rejects_malformed_movie_id() {
        let payload: ApiMovie =
            serde_json::from_str(r#"{"idIMDB": "not-an-id"}"#).unwrap();
        assert!(matches!(
            map_payload(payload),
            Err(AppError::Upstream(_))
        ));
    }
}
