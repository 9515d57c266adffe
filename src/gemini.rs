//! Gemini `generateContent` client used for scene synthesis.
//!
//! One request per attempt: the reference images as inline-data parts in
//! fixed role order, then the composed shot list as a text part, asking for
//! image-modality output only.

use base64::Engine;
use base64::engine::general_purpose;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::GEMINI_API_BASE;
use crate::error::SceneForgeError;
use crate::intake::SceneImages;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

// Variant order matters for `#[serde(untagged)]` decoding; the trailing
// catch-all keeps unknown part shapes from failing the whole response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

/// Client for the image-generation endpoint.
#[derive(Clone, Debug)]
pub struct SynthesisClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl SynthesisClient {
    /// Builds a client for the given credential and model.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// The model this client generates with.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model)
    }

    fn build_request(images: &SceneImages, prompt: &str) -> GenerateContentRequest {
        let mut parts: Vec<Part> = images
            .in_role_order()
            .into_iter()
            .map(|image| Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.media_type.clone(),
                    data: general_purpose::STANDARD.encode(&image.bytes),
                },
            })
            .collect();
        parts.push(Part::Text {
            text: prompt.to_string(),
        });

        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        }
    }

    /// Sends one synthesis request and returns the generated image bytes.
    pub async fn synthesize(
        &self,
        images: &SceneImages,
        prompt: &str,
    ) -> Result<Vec<u8>, SceneForgeError> {
        let request = Self::build_request(images, prompt);
        debug!("Requesting synthesis from model {}", self.model);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SceneForgeError::Upstream(format!(
                "generation service returned HTTP {status}: {body}"
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_image(parsed)
    }
}

/// Walks the response for the first inline image payload; otherwise turns
/// the service feedback into a distinguishable failure.
fn extract_image(response: GenerateContentResponse) -> Result<Vec<u8>, SceneForgeError> {
    let first_candidate = response.candidates.first();

    if let Some(candidate) = first_candidate
        && let Some(content) = &candidate.content
    {
        for part in &content.parts {
            if let Part::InlineData { inline_data } = part {
                return general_purpose::STANDARD
                    .decode(&inline_data.data)
                    .map_err(|err| {
                        SceneForgeError::Upstream(format!(
                            "failed to decode image payload: {err}"
                        ))
                    });
            }
        }
    }

    if let Some(feedback) = response.prompt_feedback
        && let Some(reason) = feedback.block_reason
    {
        return Err(SceneForgeError::Blocked {
            reason,
            message: feedback.block_reason_message,
        });
    }

    if let Some(candidate) = first_candidate
        && let Some(reason) = &candidate.finish_reason
        && reason != "STOP"
    {
        return Err(SceneForgeError::GenerationFailed(reason.clone()));
    }

    Err(SceneForgeError::NoImage)
}
