use serde::{Deserialize, Serialize};

/// One row of the upstream TV listing for a day and tv-type.
///
/// This is the ranker's candidate input: a scraped record that may or may
/// not resolve to a stored movie. Optional fields stay optional; an
/// upstream row without an original title is not the same as one with an
/// empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMovie {
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    pub channel: String,
    pub time: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub director: Option<Vec<String>>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub movie_url: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

impl ScheduledMovie {
    /// The title used for catalog resolution: original title when present,
    /// localized title otherwise.
    pub fn resolution_title(&self) -> &str {
        self.original_title.as_deref().unwrap_or(&self.title)
    }
}
