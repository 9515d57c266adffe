//! Option catalogue: the finite set of scene options offered by the form.
//!
//! Every axis is a plain enum with a `Default` sentinel. Lookups are total:
//! unknown form values resolve to the default variant, and every fragment
//! accessor either returns a non-empty fallback or an explicit `None`
//! meaning "omit this aspect from the prompt". Nothing here can fail.

/// Main character hairstyle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Hairstyle {
    /// Fallback: very long, voluminous hair
    #[default]
    Default,
    /// A sleek ponytail
    Ponytail,
    /// A sharp short bob
    ShortBob,
    /// Long, straight hair
    LongStraight,
    /// A single braid
    Braid,
    /// An elegant bun
    Bun,
    /// A stylish pixie cut
    PixieCut,
    /// A hime cut
    HimeCut,
    /// Twin-tails
    TwinTails,
    /// Half-up, half-down
    HalfUp,
}

impl Hairstyle {
    /// Every selectable hairstyle, in form order.
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::Ponytail,
        Self::ShortBob,
        Self::LongStraight,
        Self::Braid,
        Self::Bun,
        Self::PixieCut,
        Self::HimeCut,
        Self::TwinTails,
        Self::HalfUp,
    ];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "ponytail" => Self::Ponytail,
            "short_bob" => Self::ShortBob,
            "long_straight" => Self::LongStraight,
            "braid" => Self::Braid,
            "bun" => Self::Bun,
            "pixie_cut" => Self::PixieCut,
            "hime_cut" => Self::HimeCut,
            "twin_tails" => Self::TwinTails,
            "half_up" => Self::HalfUp,
            _ => Self::Default,
        }
    }

    /// The form value for this hairstyle.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ponytail => "ponytail",
            Self::ShortBob => "short_bob",
            Self::LongStraight => "long_straight",
            Self::Braid => "braid",
            Self::Bun => "bun",
            Self::PixieCut => "pixie_cut",
            Self::HimeCut => "hime_cut",
            Self::TwinTails => "twin_tails",
            Self::HalfUp => "half_up",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default (Goddess Hair)",
            Self::Ponytail => "Ponytail",
            Self::ShortBob => "Short Bob",
            Self::LongStraight => "Long Straight",
            Self::Braid => "Braid",
            Self::Bun => "Bun",
            Self::PixieCut => "Pixie Cut",
            Self::HimeCut => "Hime Cut",
            Self::TwinTails => "Twin-tails",
            Self::HalfUp => "Half-up",
        }
    }

    /// Short style fragment, `None` for the default.
    pub fn styled_as(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Ponytail => Some("a sleek ponytail"),
            Self::ShortBob => Some("a sharp short bob"),
            Self::LongStraight => Some("long, straight hair"),
            Self::Braid => Some("a single braid"),
            Self::Bun => Some("an elegant bun"),
            Self::PixieCut => Some("a stylish pixie cut"),
            Self::HimeCut => Some("a hime cut"),
            Self::TwinTails => Some("twin-tails"),
            Self::HalfUp => Some("a half-up, half-down style"),
        }
    }

    /// Full character-details sentence, original hair color always preserved.
    pub fn description(&self) -> String {
        match self.styled_as() {
            Some(style) => format!(
                "The Person's hair is styled as {style}, maintaining its original color."
            ),
            None => {
                "The Person's hair is styled to be very long and voluminous (Goddess Hair), \
                 maintaining its original color."
                    .to_string()
            }
        }
    }
}

/// Main character action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Action {
    /// Fallback: standing still, facing the camera
    #[default]
    Default,
    /// Walking forward
    Walking,
    /// Running
    Running,
    /// Kneeling on one knee
    Kneeling,
    /// Sitting on the ground
    SittingGround,
    /// Fallen down, pained expression
    FallenDown,
    /// Asleep in a chair, head tilted back
    SleepingInChair,
    /// Turned to face the sub-character; needs a companion image
    FacingSub,
}

impl Action {
    /// Every selectable action, in form order.
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::Walking,
        Self::Running,
        Self::Kneeling,
        Self::SittingGround,
        Self::FallenDown,
        Self::SleepingInChair,
        Self::FacingSub,
    ];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "walking" => Self::Walking,
            "running" => Self::Running,
            "kneeling" => Self::Kneeling,
            "sitting_ground" => Self::SittingGround,
            "fallen_down" => Self::FallenDown,
            "sleeping_in_chair" => Self::SleepingInChair,
            "facing_sub" => Self::FacingSub,
            _ => Self::Default,
        }
    }

    /// The form value for this action.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Walking => "walking",
            Self::Running => "running",
            Self::Kneeling => "kneeling",
            Self::SittingGround => "sitting_ground",
            Self::FallenDown => "fallen_down",
            Self::SleepingInChair => "sleeping_in_chair",
            Self::FacingSub => "facing_sub",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default Pose",
            Self::Walking => "Walking",
            Self::Running => "Running",
            Self::Kneeling => "Kneeling",
            Self::SittingGround => "Sitting on Ground",
            Self::FallenDown => "Fallen Down (Pained)",
            Self::SleepingInChair => "Sleeping in Chair (Head back)",
            Self::FacingSub => "Facing Sub-character",
        }
    }

    /// Action sentence for the shot list, never empty.
    pub fn sentence(&self) -> &'static str {
        match self {
            Self::Default => "The Person is standing still, looking towards the camera.",
            Self::Walking => "The Person is walking forward.",
            Self::Running => "The Person is running.",
            Self::Kneeling => "The Person is kneeling on one knee.",
            Self::SittingGround => "The Person is sitting on the ground.",
            Self::FallenDown => {
                "The Person is on the ground, having fallen, with a pained expression."
            }
            Self::SleepingInChair => {
                "The Person is asleep in a chair, with their head tilted back."
            }
            Self::FacingSub => "The Person is standing, turned to face The Companion.",
        }
    }
}

/// Camera zoom level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraZoom {
    /// Fallback: medium shot
    #[default]
    Default,
    /// Full body
    FullBody,
    /// Waist up
    UpperBody,
    /// Shoulders up
    Bust,
    /// Close-up on the face
    CloseUp,
    /// Extreme close-up on the face
    ExtremeCloseUp,
}

impl CameraZoom {
    /// Every selectable zoom, in form order.
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::FullBody,
        Self::UpperBody,
        Self::Bust,
        Self::CloseUp,
        Self::ExtremeCloseUp,
    ];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "full_body" => Self::FullBody,
            "upper_body" => Self::UpperBody,
            "bust" => Self::Bust,
            "close_up" => Self::CloseUp,
            "extreme_close_up" => Self::ExtremeCloseUp,
            _ => Self::Default,
        }
    }

    /// The form value for this zoom.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::FullBody => "full_body",
            Self::UpperBody => "upper_body",
            Self::Bust => "bust",
            Self::CloseUp => "close_up",
            Self::ExtremeCloseUp => "extreme_close_up",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default Zoom",
            Self::FullBody => "Full Body Shot",
            Self::UpperBody => "Upper Body Shot",
            Self::Bust => "Bust Shot",
            Self::CloseUp => "Close-up Shot",
            Self::ExtremeCloseUp => "Extreme Close-up (Face)",
        }
    }

    /// Shot fragment, never empty.
    pub fn fragment(&self) -> &'static str {
        match self {
            Self::Default => "Medium shot",
            Self::FullBody => "Full body shot",
            Self::UpperBody => "Upper body shot (waist up)",
            Self::Bust => "Bust shot (shoulders up)",
            Self::CloseUp => "Close-up on face",
            Self::ExtremeCloseUp => "Extreme close-up on face",
        }
    }
}

/// Camera angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraAngle {
    /// Fallback: eye level
    #[default]
    Default,
    /// From above
    HighAngle,
    /// Eye level, focused on the face
    FaceHighlight,
    /// From below
    LowAngle,
}

impl CameraAngle {
    /// Every selectable angle, in form order.
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::HighAngle,
        Self::FaceHighlight,
        Self::LowAngle,
    ];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "high_angle" => Self::HighAngle,
            "face_highlight" => Self::FaceHighlight,
            "low_angle" => Self::LowAngle,
            _ => Self::Default,
        }
    }

    /// The form value for this angle.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::HighAngle => "high_angle",
            Self::FaceHighlight => "face_highlight",
            Self::LowAngle => "low_angle",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default Angle",
            Self::HighAngle => "High Angle",
            Self::FaceHighlight => "Face Highlight",
            Self::LowAngle => "Low Angle",
        }
    }

    /// Angle fragment, never empty.
    pub fn fragment(&self) -> &'static str {
        match self {
            Self::Default => "at eye-level",
            Self::HighAngle => "from a high angle",
            Self::FaceHighlight => "at eye-level, focused on face",
            Self::LowAngle => "from a low angle",
        }
    }
}

/// Movie era styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovieEra {
    /// No era styling
    #[default]
    Default,
    /// 1950s
    Fifties,
    /// 1960s
    Sixties,
    /// 1970s
    Seventies,
    /// 1980s
    Eighties,
    /// 1990s
    Nineties,
    /// 2000s
    TwoThousands,
    /// 2010s
    TwentyTens,
    /// 2020s
    TwentyTwenties,
}

impl MovieEra {
    /// Every selectable era, in form order.
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::Fifties,
        Self::Sixties,
        Self::Seventies,
        Self::Eighties,
        Self::Nineties,
        Self::TwoThousands,
        Self::TwentyTens,
        Self::TwentyTwenties,
    ];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "1950s" => Self::Fifties,
            "1960s" => Self::Sixties,
            "1970s" => Self::Seventies,
            "1980s" => Self::Eighties,
            "1990s" => Self::Nineties,
            "2000s" => Self::TwoThousands,
            "2010s" => Self::TwentyTens,
            "2020s" => Self::TwentyTwenties,
            _ => Self::Default,
        }
    }

    /// The form value for this era.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fifties => "1950s",
            Self::Sixties => "1960s",
            Self::Seventies => "1970s",
            Self::Eighties => "1980s",
            Self::Nineties => "1990s",
            Self::TwoThousands => "2000s",
            Self::TwentyTens => "2010s",
            Self::TwentyTwenties => "2020s",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default Style",
            Self::Fifties => "50s Movie Style",
            Self::Sixties => "60s Movie Style",
            Self::Seventies => "70s Movie Style",
            Self::Eighties => "80s Movie Style",
            Self::Nineties => "90s Movie Style",
            Self::TwoThousands => "2000s Movie Style",
            Self::TwentyTens => "2010s Movie Style",
            Self::TwentyTwenties => "2020s Movie Style",
        }
    }

    /// Visual-style phrase, `None` for the default.
    pub fn style_phrase(&self) -> Option<String> {
        match self {
            Self::Default => None,
            _ => Some(format!("the aesthetic of a {} film", self.value())),
        }
    }
}

/// Time of day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeOfDay {
    /// Unspecified
    #[default]
    Default,
    /// Daytime
    Day,
    /// Nighttime
    Night,
}

impl TimeOfDay {
    /// Every selectable time of day, in form order.
    pub const ALL: &'static [Self] = &[Self::Default, Self::Day, Self::Night];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "day" => Self::Day,
            "night" => Self::Night,
            _ => Self::Default,
        }
    }

    /// The form value for this time of day.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Day => "day",
            Self::Night => "night",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }

    /// Visual-style phrase, `None` for the default.
    pub fn style_phrase(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Day => Some("daytime lighting"),
            Self::Night => Some("nighttime lighting"),
        }
    }
}

/// Background crowd presence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrowdOption {
    /// Unspecified
    #[default]
    Default,
    /// A crowd in the distance
    WithCrowd,
    /// Nobody else in frame
    WithoutCrowd,
}

impl CrowdOption {
    /// Every selectable crowd option, in form order.
    pub const ALL: &'static [Self] = &[Self::Default, Self::WithCrowd, Self::WithoutCrowd];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "with_crowd" => Self::WithCrowd,
            "without_crowd" => Self::WithoutCrowd,
            _ => Self::Default,
        }
    }

    /// The form value for this crowd option.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::WithCrowd => "with_crowd",
            Self::WithoutCrowd => "without_crowd",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::WithCrowd => "With Crowd",
            Self::WithoutCrowd => "Without Crowd",
        }
    }

    /// Setting sentence, `None` when the crowd aspect is unspecified.
    pub fn setting_sentence(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::WithCrowd => Some("A location with a crowd of people in the distance."),
            Self::WithoutCrowd => Some("An empty location with no other people visible."),
        }
    }
}

/// Color grading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorGrade {
    /// No grading
    #[default]
    Default,
    /// Cool cyan tint
    CoolBlue,
    /// Warm sepia tone
    WarmSepia,
}

impl ColorGrade {
    /// Every selectable color grade, in form order.
    pub const ALL: &'static [Self] = &[Self::Default, Self::CoolBlue, Self::WarmSepia];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "cool_blue" => Self::CoolBlue,
            "warm_sepia" => Self::WarmSepia,
            _ => Self::Default,
        }
    }

    /// The form value for this color grade.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CoolBlue => "cool_blue",
            Self::WarmSepia => "warm_sepia",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::CoolBlue => "Cool (Cyan Tint)",
            Self::WarmSepia => "Warm (Sepia Tone)",
        }
    }

    /// Visual-style phrase, `None` for the default.
    pub fn style_phrase(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::CoolBlue => Some("a cool, cyan color grade"),
            Self::WarmSepia => Some("a warm, sepia color grade"),
        }
    }
}

/// Film effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilmEffect {
    /// No effect
    #[default]
    Default,
    /// Subtle VHS look
    Vhs,
}

impl FilmEffect {
    /// Every selectable film effect, in form order.
    pub const ALL: &'static [Self] = &[Self::Default, Self::Vhs];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "vhs" => Self::Vhs,
            _ => Self::Default,
        }
    }

    /// The form value for this film effect.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Vhs => "vhs",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "None",
            Self::Vhs => "VHS Style",
        }
    }

    /// Visual-style phrase, `None` for the default.
    pub fn style_phrase(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Vhs => Some("a subtle VHS effect"),
        }
    }
}

/// Output aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AspectRatio {
    /// Square
    #[default]
    Default,
    /// Tall
    Portrait,
    /// Wide
    Landscape,
}

impl AspectRatio {
    /// Every selectable aspect ratio, in form order.
    pub const ALL: &'static [Self] = &[Self::Default, Self::Portrait, Self::Landscape];

    /// Resolves a form value; unknown values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value {
            "portrait" => Self::Portrait,
            "landscape" => Self::Landscape,
            _ => Self::Default,
        }
    }

    /// The form value for this aspect ratio.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Label shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default (Square 1:1)",
            Self::Portrait => "Portrait (9:16)",
            Self::Landscape => "Landscape (16:9)",
        }
    }

    /// Literal ratio token, always emitted.
    pub fn ratio(&self) -> &'static str {
        match self {
            Self::Default => "1:1",
            Self::Portrait => "9:16",
            Self::Landscape => "16:9",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_values_fall_back_to_default() {
        assert_eq!(Hairstyle::from_value("mohawk"), Hairstyle::Default);
        assert_eq!(Action::from_value("backflip"), Action::Default);
        assert_eq!(CameraZoom::from_value(""), CameraZoom::Default);
        assert_eq!(CameraAngle::from_value("dutch"), CameraAngle::Default);
        assert_eq!(MovieEra::from_value("1840s"), MovieEra::Default);
        assert_eq!(AspectRatio::from_value("4:3"), AspectRatio::Default);
    }

    #[test]
    fn values_round_trip_through_from_value() {
        for action in Action::ALL {
            assert_eq!(Action::from_value(action.value()), *action);
        }
        for hairstyle in Hairstyle::ALL {
            assert_eq!(Hairstyle::from_value(hairstyle.value()), *hairstyle);
        }
        for era in MovieEra::ALL {
            assert_eq!(MovieEra::from_value(era.value()), *era);
        }
    }

    #[test]
    fn fragments_are_never_empty() {
        for action in Action::ALL {
            assert!(!action.sentence().is_empty());
        }
        for zoom in CameraZoom::ALL {
            assert!(!zoom.fragment().is_empty());
        }
        for angle in CameraAngle::ALL {
            assert!(!angle.fragment().is_empty());
        }
        for hairstyle in Hairstyle::ALL {
            assert!(!hairstyle.description().is_empty());
        }
        for ratio in AspectRatio::ALL {
            assert!(!ratio.ratio().is_empty());
        }
    }

    #[test]
    fn aspect_ratio_mapping() {
        assert_eq!(AspectRatio::from_value("default").ratio(), "1:1");
        assert_eq!(AspectRatio::from_value("portrait").ratio(), "9:16");
        assert_eq!(AspectRatio::from_value("landscape").ratio(), "16:9");
        assert_eq!(AspectRatio::from_value("banner").ratio(), "1:1");
    }

    #[test]
    fn recognized_hairstyles_preserve_original_color() {
        for hairstyle in Hairstyle::ALL {
            assert!(hairstyle.description().contains("original color"));
        }
    }
}
