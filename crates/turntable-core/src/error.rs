use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no tracks")]
    Empty,
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid colour {value:?}: expected #rgb or #rrggbb")]
    InvalidColor { value: String },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be greater than zero (got {value})")]
    NonPositiveDuration { name: &'static str, value: f64 },
    #[error("spin-down ({down_ms}ms) must not be shorter than spin-up ({up_ms}ms)")]
    SpinDownTooFast { up_ms: f64, down_ms: f64 },
    #[error("{name} must lie in (0, 1) (got {value})")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("peak speed {peak} must exceed cruise speed {cruise} > 0")]
    SpeedOrdering { cruise: f32, peak: f32 },
}
