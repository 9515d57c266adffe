//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "SCENEFORGE_DEBUG")]
    /// Enable debug logging. Env: SCENEFORGE_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "9000", env = "SCENEFORGE_PORT")]
    /// http listener, defaults to `9000`.
    /// Env: SCENEFORGE_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "SCENEFORGE_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: SCENEFORGE_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, required = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    /// Gemini API key, required before any generation is attempted.
    /// Env: GEMINI_API_KEY
    pub gemini_api_key: String,

    #[clap(long, short, env = "SCENEFORGE_MODEL")]
    /// Override the image model, eg `gemini-2.5-flash-image`.
    /// Env: SCENEFORGE_MODEL
    pub model: Option<String>,
}
