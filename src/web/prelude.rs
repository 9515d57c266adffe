pub(crate) use crate::error::SceneForgeError;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use tower_sessions::Session;
