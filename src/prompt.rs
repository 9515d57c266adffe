//! Shot-list prompt composition.
//!
//! `compose` is a pure function of the attached images and the option
//! selection: identical inputs always yield a byte-identical document.

use crate::catalogue::{
    Action, AspectRatio, CameraAngle, CameraZoom, ColorGrade, CrowdOption, FilmEffect, Hairstyle,
    MovieEra, TimeOfDay,
};
use crate::constants::COMPANION_DEPENDENT_ACTIONS;
use crate::intake::SceneImages;

/// One submission's worth of scene options, every axis independently chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Movie era styling
    pub movie_era: MovieEra,
    /// Time of day
    pub time_of_day: TimeOfDay,
    /// Background crowd presence
    pub crowd: CrowdOption,
    /// Main character action
    pub action: Action,
    /// Main character hairstyle
    pub hairstyle: Hairstyle,
    /// Camera zoom
    pub camera_zoom: CameraZoom,
    /// Camera angle
    pub camera_angle: CameraAngle,
    /// Free-text camera direction; overrides zoom and angle when non-blank
    pub camera_prompt: String,
    /// Output aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Color grading
    pub color_grade: ColorGrade,
    /// Film effect
    pub film_effect: FilmEffect,
    /// Free-text background description; overrides the crowd option when non-blank
    pub background_description: String,
}

impl Selection {
    /// Applies the companion-dependent action guard.
    ///
    /// Actions listed in [`COMPANION_DEPENDENT_ACTIONS`] are only valid
    /// while a sub-character image is attached; without one the action
    /// resets to the default. No other field is touched.
    pub fn normalized(mut self, companion_present: bool) -> Self {
        if !companion_present && COMPANION_DEPENDENT_ACTIONS.contains(&self.action.value()) {
            self.action = Action::default();
        }
        self
    }
}

/// Composes the shot-list document sent alongside the reference images.
pub fn compose(images: &SceneImages, selection: &Selection) -> String {
    let mut source_elements: Vec<String> = Vec::new();
    let mut scene_composition: Vec<String> = Vec::new();
    let mut cinematography: Vec<String> = Vec::new();

    // 1. Source elements, in the same positional order the images are attached.
    source_elements.push(
        "*   **Image 1 (The Person):** Use the person from this image. It is critical to \
         preserve their face, skin, and body shape exactly as they appear."
            .to_string(),
    );
    source_elements.push(
        "*   **Image 2 (The Outfit):** Use the complete outfit from this image. This outfit \
         must fully replace any clothing on the person from Image 1."
            .to_string(),
    );
    if images.has_companion() {
        source_elements.push(
            "*   **Image 3 (The Companion):** Use the person from this image as the companion \
             character."
                .to_string(),
        );
    }

    // 2. Scene composition.
    scene_composition.push(format!("*   **Action:** {}", selection.action.sentence()));

    let background = selection.background_description.trim();
    let setting = if !background.is_empty() {
        background
    } else {
        selection
            .crowd
            .setting_sentence()
            .unwrap_or("Default setting.")
    };
    scene_composition.push(format!("*   **Setting:** {setting}"));

    scene_composition.push(format!(
        "*   **Character Details:** {}",
        selection.hairstyle.description()
    ));

    scene_composition
        .push("*   **Legwear:** The Person is barefoot, with no shoes or hosiery.".to_string());

    // 3. Cinematography. A free-text camera prompt replaces zoom and angle entirely.
    let camera_prompt = selection.camera_prompt.trim();
    let shot_type = if !camera_prompt.is_empty() {
        camera_prompt.to_string()
    } else {
        format!(
            "{}, filmed {}.",
            selection.camera_zoom.fragment(),
            selection.camera_angle.fragment()
        )
    };
    cinematography.push(format!("*   **Shot Type:** {shot_type}"));

    let mut style_elements: Vec<String> = Vec::new();
    if let Some(era) = selection.movie_era.style_phrase() {
        style_elements.push(era);
    }
    if let Some(time) = selection.time_of_day.style_phrase() {
        style_elements.push(time.to_string());
    }
    if let Some(grade) = selection.color_grade.style_phrase() {
        style_elements.push(grade.to_string());
    }
    if let Some(effect) = selection.film_effect.style_phrase() {
        style_elements.push(effect.to_string());
    }
    if !style_elements.is_empty() {
        cinematography.push(format!(
            "*   **Visual Style:** The image has {}.",
            style_elements.join(", ")
        ));
    }

    cinematography.push(format!(
        "*   **Aspect Ratio:** {}.",
        selection.aspect_ratio.ratio()
    ));

    format!(
        "This is a detailed shot list for creating a single, photorealistic image.\n\
         \n\
         **1. Source Elements:**\n\
         {}\n\
         \n\
         **2. Scene Composition:**\n\
         {}\n\
         \n\
         **3. Cinematography:**\n\
         {}\n\
         \n\
         **Final Image Requirements:**\n\
         *   Produce a single, coherent, high-quality photorealistic image.\n\
         *   Do not include any text, watermarks, or collage-like artifacts.",
        source_elements.join("\n"),
        scene_composition.join("\n"),
        cinematography.join("\n")
    )
}
