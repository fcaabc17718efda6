use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown chain: no effector with role '{role}'")]
    UnknownChain { role: String },

    #[cfg(feature = "json")]
    #[error("failed to parse IK config JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("unknown rotation order '{value}' for joint '{bone}'")]
    JsonUnknownRotationOrder { bone: String, value: String },

    #[cfg(feature = "json")]
    #[error("rotation limit {value} for joint '{bone}' is outside [-pi, pi]")]
    JsonRotationLimitOutOfRange { bone: String, value: f32 },
}
