use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// TV schedule listing base URL
    #[serde(default = "default_schedule_url")]
    pub schedule_url: String,

    /// Film metadata API base URL
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,

    /// Film metadata API key
    #[serde(default)]
    pub metadata_api_key: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of proposal rows sent per suggestion
    #[serde(default = "default_number_suggestions")]
    pub number_suggestions: usize,

    /// Propagated weight for a movie's actors
    #[serde(default = "default_actor_weight")]
    pub actor_weight: f64,

    /// Propagated weight for a movie's directors
    #[serde(default = "default_director_weight")]
    pub director_weight: f64,

    /// Propagated weight for a movie's writers
    #[serde(default = "default_writer_weight")]
    pub writer_weight: f64,

    /// Propagated weight for a movie's genres
    #[serde(default = "default_genre_weight")]
    pub genre_weight: f64,
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_schedule_url() -> String {
    "http://localhost:8081/schedule".to_string()
}

fn default_metadata_url() -> String {
    "http://localhost:8082/imdb".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_number_suggestions() -> usize {
    3
}

fn default_actor_weight() -> f64 {
    0.2
}

fn default_director_weight() -> f64 {
    0.12
}

fn default_writer_weight() -> f64 {
    0.1
}

fn default_genre_weight() -> f64 {
    0.15
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Propagation weights as passed to the taste ledger
    pub fn taste_weights(&self) -> TasteWeights {
        TasteWeights {
            actor: self.actor_weight,
            director: self.director_weight,
            writer: self.writer_weight,
            genre: self.genre_weight,
        }
    }
}

/// Per-relation propagation increments applied when a movie taste changes.
/// Passed explicitly into the taste ledger rather than read from globals.
#[derive(Debug, Clone, Copy)]
pub struct TasteWeights {
    pub actor: f64,
    pub director: f64,
    pub writer: f64,
    pub genre: f64,
}

impl Default for TasteWeights {
    fn default() -> Self {
        Self {
            actor: default_actor_weight(),
            director: default_director_weight(),
            writer: default_writer_weight(),
            genre: default_genre_weight(),
        }
    }
}
