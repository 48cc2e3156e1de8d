pub mod profile;
pub mod providers;
pub mod search;

pub use providers::{ModelProvider, OpenAiProvider};
pub use search::search_podcasts;
