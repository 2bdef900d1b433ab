use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlowtideError {
    #[error("could not decode stored preferences: {0}")]
    PreferencesDecode(#[source] serde_json::Error),
    #[error("could not encode preferences: {0}")]
    PreferencesEncode(#[source] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("unknown {kind} `{value}`")]
    UnknownName { kind: &'static str, value: String },
    #[error("`{0}` is not a number")]
    InvalidAnswer(String),
}

pub type Result<T> = std::result::Result<T, SlowtideError>;
