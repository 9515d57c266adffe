//! Web server: the form, the synthesis endpoint, and result delivery.

use std::collections::HashMap;
use std::num::NonZeroU16;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Local;
use time::Duration;
use tokio::sync::RwLock;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use tracing::{error, info};

use crate::catalogue::{
    Action, AspectRatio, CameraAngle, CameraZoom, ColorGrade, CrowdOption, FilmEffect, Hairstyle,
    MovieEra, TimeOfDay,
};
use crate::constants::{
    COMPANION_DEPENDENT_ACTIONS, CSRF_SESSION_LENGTH, DOWNLOAD_FILENAME_PREFIX,
    DOWNLOAD_TIMESTAMP_FORMAT, MAX_UPLOAD_BYTES,
};
use crate::error::SceneForgeError;
use crate::gemini::SynthesisClient;
use crate::intake::{self, EncodedImage, SceneImages};
use crate::prompt::{self, Selection};

mod csrf;
mod flash;
mod prelude;
mod views;

use csrf::{csrf_token, validate_csrf};
use views::{HomeTemplate, ResultTemplate};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    client: SynthesisClient,
    result: Arc<RwLock<Option<Vec<u8>>>>,
    busy: Arc<AtomicBool>,
}

impl AppState {
    fn new(client: SynthesisClient) -> Self {
        Self {
            client,
            result: Arc::new(RwLock::new(None)),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Clears the in-flight flag when the request finishes, however it finishes.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
            .then(|| Self(flag.clone()))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

async fn root_handler(session: Session) -> Result<HomeTemplate, SceneForgeError> {
    let csrf_token = csrf_token(&session).await?;
    let flash = flash::take_flash_message(&session).await?;
    let (has_flash, flash_message, flash_class) = match flash {
        Some(message) => (true, message.text, message.class),
        None => (false, String::new(), String::new()),
    };
    let companion_actions_json = serde_json::to_string(COMPANION_DEPENDENT_ACTIONS)
        .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?;

    Ok(HomeTemplate {
        hairstyles: Hairstyle::ALL,
        actions: Action::ALL,
        zooms: CameraZoom::ALL,
        angles: CameraAngle::ALL,
        eras: MovieEra::ALL,
        times: TimeOfDay::ALL,
        crowds: CrowdOption::ALL,
        grades: ColorGrade::ALL,
        effects: FilmEffect::ALL,
        ratios: AspectRatio::ALL,
        companion_actions_json,
        csrf_token,
        has_flash,
        flash_message,
        flash_class,
    })
}

fn selection_from_options(options: &HashMap<String, String>) -> Selection {
    let value = |key: &str| options.get(key).map(String::as_str).unwrap_or_default();
    Selection {
        movie_era: MovieEra::from_value(value("movie_era")),
        time_of_day: TimeOfDay::from_value(value("time_of_day")),
        crowd: CrowdOption::from_value(value("crowd_option")),
        action: Action::from_value(value("action")),
        hairstyle: Hairstyle::from_value(value("hairstyle")),
        camera_zoom: CameraZoom::from_value(value("camera_zoom")),
        camera_angle: CameraAngle::from_value(value("camera_angle")),
        camera_prompt: value("camera_prompt").to_string(),
        aspect_ratio: AspectRatio::from_value(value("aspect_ratio")),
        color_grade: ColorGrade::from_value(value("color_grade")),
        film_effect: FilmEffect::from_value(value("film_effect")),
        background_description: value("background_description").to_string(),
    }
}

async fn synthesize_handler(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Response, SceneForgeError> {
    let mut csrf_token_value: Option<String> = None;
    let mut person: Option<EncodedImage> = None;
    let mut outfit: Option<EncodedImage> = None;
    let mut companion: Option<EncodedImage> = None;
    let mut options: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "csrf_token" => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?;
                csrf_token_value = Some(value);
            }
            "main_character" | "clothing_reference" | "sub_character" => {
                let media_type = field
                    .content_type()
                    .map(str::to_owned)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?;
                if bytes.is_empty() {
                    // slot left empty in the form
                    continue;
                }
                let image = match EncodedImage::ingest(&media_type, bytes.to_vec()) {
                    Ok(image) => image,
                    Err(err) => {
                        flash::set_flash(&session, "error", &err.to_string()).await?;
                        return Ok(Redirect::to("/").into_response());
                    }
                };
                match name.as_str() {
                    "main_character" => person = Some(image),
                    "clothing_reference" => outfit = Some(image),
                    _ => companion = Some(image),
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?;
                options.insert(name, value);
            }
        }
    }

    let csrf_token_value = csrf_token_value.ok_or(SceneForgeError::Unauthorized)?;
    validate_csrf(&session, &csrf_token_value).await?;

    let (Some(person), Some(outfit)) = (person, outfit) else {
        flash::set_flash(
            &session,
            "error",
            "Please upload the Main Character and Clothing Reference images.",
        )
        .await?;
        return Ok(Redirect::to("/").into_response());
    };

    let images = SceneImages {
        person,
        outfit,
        companion,
    };
    let selection = selection_from_options(&options).normalized(images.has_companion());
    let prompt = prompt::compose(&images, &selection);

    let Some(_busy) = BusyGuard::acquire(&state.busy) else {
        flash::set_flash(&session, "info", "A generation is already in progress.").await?;
        return Ok(Redirect::to("/").into_response());
    };

    // A new attempt discards whatever the previous one produced.
    *state.result.write().await = None;

    info!(
        "Submitting synthesis request with {} reference images",
        images.in_role_order().len()
    );
    match state.client.synthesize(&images, &prompt).await {
        Ok(png) => {
            *state.result.write().await = Some(png);
            Ok(ResultTemplate {
                has_error: false,
                error_message: String::new(),
            }
            .into_response())
        }
        Err(
            err @ (SceneForgeError::Blocked { .. }
            | SceneForgeError::GenerationFailed(_)
            | SceneForgeError::NoImage
            | SceneForgeError::Upstream(_)),
        ) => {
            error!("Synthesis failed: {}", err);
            Ok(ResultTemplate {
                has_error: true,
                error_message: err.to_string(),
            }
            .into_response())
        }
        Err(err) => Err(err),
    }
}

async fn result_image_handler(State(state): State<AppState>) -> Result<Response, SceneForgeError> {
    let stored = state.result.read().await;
    let Some(png) = stored.as_ref() else {
        return Err(SceneForgeError::NotFound("generated image".to_string()));
    };
    Response::builder()
        .header(CONTENT_TYPE, "image/png")
        .body(Body::from(png.clone()))
        .map_err(SceneForgeError::from)
}

async fn download_handler(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<Response, SceneForgeError> {
    let (extension, content_type) = match format.as_str() {
        "png" => ("png", "image/png"),
        "jpg" => ("jpg", "image/jpeg"),
        _ => return Err(SceneForgeError::BadRequest),
    };

    let stored = state.result.read().await.clone();
    let Some(png) = stored else {
        return Err(SceneForgeError::NotFound("generated image".to_string()));
    };

    let bytes = if extension == "jpg" {
        intake::to_opaque_jpeg(&png)?
    } else {
        png
    };

    let timestamp = Local::now().format(DOWNLOAD_TIMESTAMP_FORMAT);
    let filename = format!("{DOWNLOAD_FILENAME_PREFIX}_{timestamp}.{extension}");

    Response::builder()
        .header(CONTENT_TYPE, content_type)
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(bytes))
        .map_err(SceneForgeError::from)
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

async fn script_handler() -> impl IntoResponse {
    const SCRIPT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/app.js"));
    ([(CONTENT_TYPE, "application/javascript")], SCRIPT)
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(root_handler))
        .route("/synthesize", axum::routing::post(synthesize_handler))
        .route("/result/image", axum::routing::get(result_image_handler))
        .route("/download/{format}", axum::routing::get(download_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .route("/static/app.js", axum::routing::get(script_handler))
        // three reference images plus multipart framing
        .layer(axum::extract::DefaultBodyLimit::max(MAX_UPLOAD_BYTES * 4))
}

fn session_layer() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(CSRF_SESSION_LENGTH)))
}

/// Starts the web server on the given address.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    api_key: String,
    model: String,
) -> Result<(), anyhow::Error> {
    let client = SynthesisClient::new(api_key, model);
    info!("Generating with model {}", client.model());

    let app = create_router()
        .with_state(AppState::new(client))
        .layer(session_layer());

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use std::io::Cursor;
    use tower::ServiceExt;

    fn setup_state() -> AppState {
        AppState::new(SynthesisClient::new(
            "test-key".to_string(),
            "test-model".to_string(),
        ))
    }

    fn test_app(state: AppState) -> Router {
        create_router().with_state(state).layer(session_layer())
    }

    async fn read_body(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8_lossy(&bytes).to_string()
    }

    async fn read_body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes()
            .to_vec()
    }

    fn sample_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png fixture");
        bytes
    }

    fn multipart_request(cookie: Option<&str>, fields: &[(&str, &str)]) -> Request<Body> {
        let boundary = "sceneforge-test-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        let mut builder = Request::builder()
            .method("POST")
            .uri("/synthesize")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body)).expect("build request")
    }

    fn extract_csrf_token(body: &str) -> String {
        body.split("name=\"csrf_token\" value=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .expect("csrf token in form")
            .to_string()
    }

    fn session_cookie(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .expect("cookie header utf8")
            .split(';')
            .next()
            .expect("cookie value")
            .to_string()
    }

    #[tokio::test]
    async fn homepage_renders_catalogue_options() {
        let app = test_app(setup_state());

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("send request");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("Default (Goddess Hair)"));
        assert!(body.contains("Facing Sub-character"));
        assert!(body.contains("VHS Style"));
        assert!(body.contains("Portrait (9:16)"));
        assert!(body.contains("name=\"csrf_token\""));
        assert!(body.contains("facing_sub"));
    }

    #[tokio::test]
    async fn synthesize_without_session_is_unauthorized() {
        let app = test_app(setup_state());

        let request = multipart_request(None, &[("csrf_token", "bogus"), ("action", "default")]);
        let response = app.oneshot(request).await.expect("send request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_required_images_redirects_with_message() {
        let app = test_app(setup_state());

        let form_request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .expect("build request");
        let form_response = app.clone().oneshot(form_request).await.expect("get form");
        let cookie = session_cookie(&form_response);
        let token = extract_csrf_token(&read_body(form_response).await);

        let request = multipart_request(
            Some(&cookie),
            &[("csrf_token", &token), ("action", "default")],
        );
        let response = app.clone().oneshot(request).await.expect("post form");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .expect("redirect target"),
            "/"
        );

        let followup = Request::builder()
            .method("GET")
            .uri("/")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .expect("build request");
        let followup_response = app.oneshot(followup).await.expect("get form again");
        let body = read_body(followup_response).await;
        assert!(body.contains("Please upload the Main Character and Clothing Reference images."));
    }

    #[tokio::test]
    async fn download_without_a_result_is_not_found() {
        let app = test_app(setup_state());

        let request = Request::builder()
            .method("GET")
            .uri("/download/png")
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("send request");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_download_format_is_a_bad_request() {
        let app = test_app(setup_state());

        let request = Request::builder()
            .method("GET")
            .uri("/download/bmp")
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("send request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn png_download_serves_the_stored_result() {
        let state = setup_state();
        let png = sample_png();
        *state.result.write().await = Some(png.clone());
        let app = test_app(state);

        let request = Request::builder()
            .method("GET")
            .uri("/download/png")
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("send request");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("content type"),
            "image/png"
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .expect("content disposition")
            .to_str()
            .expect("disposition utf8")
            .to_string();
        assert!(disposition.contains("synthesized_"));
        assert!(disposition.ends_with(".png\""));
        assert_eq!(read_body_bytes(response).await, png);
    }

    #[tokio::test]
    async fn jpg_download_re_encodes_the_stored_result() {
        let state = setup_state();
        *state.result.write().await = Some(sample_png());
        let app = test_app(state);

        let request = Request::builder()
            .method("GET")
            .uri("/download/jpg")
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("send request");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("content type"),
            "image/jpeg"
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .expect("content disposition")
            .to_str()
            .expect("disposition utf8")
            .to_string();
        assert!(disposition.ends_with(".jpg\""));

        let bytes = read_body_bytes(response).await;
        assert_eq!(
            image::guess_format(&bytes).expect("guess format"),
            image::ImageFormat::Jpeg
        );
    }

    #[tokio::test]
    async fn result_image_is_served_inline() {
        let state = setup_state();
        let png = sample_png();
        *state.result.write().await = Some(png.clone());
        let app = test_app(state);

        let request = Request::builder()
            .method("GET")
            .uri("/result/image")
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("send request");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("content type"),
            "image/png"
        );
        assert_eq!(read_body_bytes(response).await, png);
    }

    #[tokio::test]
    async fn static_assets_are_served() {
        let app = test_app(setup_state());

        let request = Request::builder()
            .method("GET")
            .uri("/static/styles.css")
            .body(Body::empty())
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("content type"),
            "text/css"
        );

        let request = Request::builder()
            .method("GET")
            .uri("/static/app.js")
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("send request");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("content type"),
            "application/javascript"
        );
    }

    #[test]
    fn busy_guard_is_exclusive_until_dropped() {
        let flag = Arc::new(AtomicBool::new(false));

        let first = BusyGuard::acquire(&flag).expect("first acquire");
        assert!(BusyGuard::acquire(&flag).is_none());
        drop(first);
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}
