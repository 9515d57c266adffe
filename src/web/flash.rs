use serde::{Deserialize, Serialize};

use super::prelude::*;

const FLASH_KEY: &str = "flash";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct FlashMessage {
    pub(crate) text: String,
    pub(crate) class: String,
}

pub(crate) async fn set_flash(
    session: &Session,
    class: &str,
    text: &str,
) -> Result<(), SceneForgeError> {
    session
        .insert(
            FLASH_KEY,
            FlashMessage {
                text: text.to_string(),
                class: class.to_string(),
            },
        )
        .await
        .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?;
    Ok(())
}

pub(crate) async fn take_flash_message(
    session: &Session,
) -> Result<Option<FlashMessage>, SceneForgeError> {
    session
        .remove::<FlashMessage>(FLASH_KEY)
        .await
        .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))
}
