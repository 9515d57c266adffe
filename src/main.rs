use clap::Parser;
use sceneforge::config::setup_logging;
use sceneforge::constants::DEFAULT_IMAGE_MODEL;
use tracing::error;

#[tokio::main(flavor = "multi_thread", worker_threads = 32)]
async fn main() {
    let cli = sceneforge::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let model = cli
        .model
        .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

    if let Err(err) = sceneforge::web::setup_server(
        &cli.listen_address,
        cli.port,
        cli.gemini_api_key,
        model,
    )
    .await
    {
        error!("Application error: {}", err);
    }
}
