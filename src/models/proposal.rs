use serde::{Deserialize, Serialize};

use super::ids::MovieId;
use super::movie::Movie;
use super::schedule::ScheduledMovie;

/// One ranked suggestion handed to the notifier and served by the proposal
/// endpoint. Combines catalog metadata with the airing slot it was ranked
/// for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id_catalog: MovieId,
    pub original_title: Option<String>,
    pub title: Option<String>,
    pub poster: Option<String>,
    pub channel: String,
    pub time: String,
    pub run_times: Option<String>,
    pub simple_plot: Option<String>,
    pub italian_plot: Option<String>,
}

impl Proposal {
    pub fn from_ranked(movie: &Movie, slot: &ScheduledMovie) -> Self {
        Self {
            id_catalog: movie.id.clone(),
            original_title: movie.original_title.clone(),
            title: movie.title.clone(),
            poster: movie.poster.clone(),
            channel: slot.channel.clone(),
            time: slot.time.clone(),
            run_times: movie.run_times.clone(),
            simple_plot: movie.simple_plot.clone(),
            italian_plot: movie.plot_it.clone(),
        }
    }
}
