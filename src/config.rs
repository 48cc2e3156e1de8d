use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OpenAI API key
    pub openai_api_key: String,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat model used to generate the ideal-podcast profile
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Embedding model used for vector queries
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Path to the podcast identity table (CSV)
    #[serde(default = "default_pods_path")]
    pub pods_path: String,

    /// Path to the podcast advertising-stats table (CSV)
    #[serde(default = "default_stats_path")]
    pub stats_path: String,

    /// Path to the precomputed embeddings index (JSONL)
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Number of podcast matches returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_pods_path() -> String {
    "data/pods.csv".to_string()
}

fn default_stats_path() -> String {
    "data/pods_stats.csv".to_string()
}

fn default_index_path() -> String {
    "data/pods_index.jsonl".to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
