use thiserror::Error;

pub type Result<T> = std::result::Result<T, SceneError>;

/// Failures the host can act on. Cosmetic problems (missing textures,
/// parked vehicles, stray taps) never surface here; they degrade quietly.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("cannot start the scene without a selected vehicle")]
    NoVehicle,

    #[error("invalid scene configuration: {0}")]
    Config(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
