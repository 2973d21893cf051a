pub mod ids;
pub mod movie;
pub mod proposal;
pub mod schedule;
pub mod taste;
pub mod user;
pub mod vocab;

pub use ids::{ArtistId, CatalogId, MovieId, UserId};
pub use movie::{Artist, Movie};
pub use proposal::Proposal;
pub use schedule::ScheduledMovie;
pub use taste::{TasteEdge, TasteKey, TasteTarget};
pub use user::{Gender, User, WatchedMovie};
pub use vocab::{Day, Genre, TvType};
