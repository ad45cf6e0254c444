use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("invalid search config: {0}")]
    InvalidConfig(String),
    #[error("unable to read search config")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("unable to parse search config")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("unable to start rollout workers")]
    ThreadPool {
        #[from]
        source: rayon::ThreadPoolBuildError,
    },
}
