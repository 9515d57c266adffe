use super::prelude::*;
use crate::catalogue::{
    Action, AspectRatio, CameraAngle, CameraZoom, ColorGrade, CrowdOption, FilmEffect, Hairstyle,
    MovieEra, TimeOfDay,
};

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) hairstyles: &'static [Hairstyle],
    pub(crate) actions: &'static [Action],
    pub(crate) zooms: &'static [CameraZoom],
    pub(crate) angles: &'static [CameraAngle],
    pub(crate) eras: &'static [MovieEra],
    pub(crate) times: &'static [TimeOfDay],
    pub(crate) crowds: &'static [CrowdOption],
    pub(crate) grades: &'static [ColorGrade],
    pub(crate) effects: &'static [FilmEffect],
    pub(crate) ratios: &'static [AspectRatio],
    pub(crate) companion_actions_json: String,
    pub(crate) csrf_token: String,
    pub(crate) has_flash: bool,
    pub(crate) flash_message: String,
    pub(crate) flash_class: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub(crate) struct ResultTemplate {
    pub(crate) has_error: bool,
    pub(crate) error_message: String,
}
