//! Error handling

use axum::response::IntoResponse;
use tracing::info;

/// definitions for the sceneforge application.
#[derive(Debug)]
pub enum SceneForgeError {
    /// When you didn't do the right thing
    BadRequest,
    /// Missing or invalid session
    Unauthorized,
    /// A required input was missing or unusable, caught before any network call
    Validation(String),
    /// The generation service refused the request on content-policy grounds
    Blocked {
        /// Block reason reported by the service
        reason: String,
        /// Optional human-readable detail accompanying the block
        message: Option<String>,
    },
    /// The generation service finished abnormally
    GenerationFailed(String),
    /// The service responded without any inline image payload
    NoImage,
    /// Transport or protocol failure talking to the generation service
    Upstream(String),
    /// Local image decode/encode failure during format conversion
    Rendering(String),
    /// When a requested resource is not found
    NotFound(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl std::fmt::Display for SceneForgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest => write!(f, "Bad request"),
            Self::Unauthorized => write!(f, "Unauthorized: invalid or missing session."),
            Self::Validation(message) => write!(f, "{message}"),
            Self::Blocked { reason, message } => {
                write!(f, "Image generation was blocked. Reason: {reason}.")?;
                if let Some(message) = message {
                    write!(f, " {message}")?;
                }
                Ok(())
            }
            Self::GenerationFailed(reason) => {
                write!(f, "Image generation failed. Reason: {reason}")
            }
            Self::NoImage => write!(
                f,
                "Image generation failed or the response did not contain an image."
            ),
            Self::Upstream(message) => {
                write!(f, "The generation service could not be reached: {message}")
            }
            Self::Rendering(message) => write!(f, "Image conversion failed: {message}"),
            Self::NotFound(what) => write!(f, "Not found: {what}"),
            Self::InternalServerError(message) => write!(f, "Internal server error: {message}"),
        }
    }
}

impl From<reqwest::Error> for SceneForgeError {
    fn from(err: reqwest::Error) -> Self {
        SceneForgeError::Upstream(err.to_string())
    }
}

impl From<image::ImageError> for SceneForgeError {
    fn from(err: image::ImageError) -> Self {
        SceneForgeError::Rendering(err.to_string())
    }
}

impl From<std::io::Error> for SceneForgeError {
    fn from(err: std::io::Error) -> Self {
        SceneForgeError::InternalServerError(err.to_string())
    }
}

impl From<axum::http::Error> for SceneForgeError {
    fn from(err: axum::http::Error) -> Self {
        SceneForgeError::InternalServerError(err.to_string())
    }
}

impl IntoResponse for SceneForgeError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            SceneForgeError::BadRequest | SceneForgeError::Validation(_) => {
                info!("Bad request: {}", self);
                axum::http::StatusCode::BAD_REQUEST
            }
            SceneForgeError::Unauthorized => {
                info!("Unauthorized request received");
                axum::http::StatusCode::UNAUTHORIZED
            }
            SceneForgeError::Blocked { .. }
            | SceneForgeError::GenerationFailed(_)
            | SceneForgeError::NoImage
            | SceneForgeError::Upstream(_) => {
                tracing::error!("Generation service error: {}", self);
                axum::http::StatusCode::BAD_GATEWAY
            }
            SceneForgeError::Rendering(message) => {
                tracing::error!("Rendering error: {}", message);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
            SceneForgeError::NotFound(what) => {
                tracing::error!("404 {what}");
                axum::http::StatusCode::NOT_FOUND
            }
            SceneForgeError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let mut response = axum::response::Response::new(axum::body::Body::from(self.to_string()));
        *response.status_mut() = status;
        response
    }
}
