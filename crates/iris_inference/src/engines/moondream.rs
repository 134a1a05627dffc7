use std::fmt;
use std::io::Cursor;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageBuffer, ImageFormat, Rgb};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use iris_core::{DecodedImage, Error, Result};

use super::InferenceEngine;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: Vec<String>,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Adapter for a moondream model served over the Ollama generate API. The
/// image travels as base64-encoded PNG inside the request body.
pub struct MoondreamEngine {
    client: Client,
    endpoint: Url,
    model: String,
}

impl MoondreamEngine {
    pub fn new(endpoint: Url, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
        }
    }
}

impl fmt::Debug for MoondreamEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoondreamEngine")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish()
    }
}

fn encode_png(image: &DecodedImage) -> Result<Vec<u8>> {
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(image.width, image.height, image.pixels.clone()).ok_or_else(
            || Error::InvalidImage("pixel buffer does not match dimensions".to_string()),
        )?;
    let mut out = Cursor::new(Vec::new());
    buffer
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| Error::InvalidImage(e.to_string()))?;
    Ok(out.into_inner())
}

#[async_trait]
impl InferenceEngine for MoondreamEngine {
    fn name(&self) -> &str {
        "Moondream"
    }

    async fn query(&self, image: &DecodedImage, question: &str) -> Result<String> {
        let png = encode_png(image)?;
        let request = GenerateRequest {
            model: &self.model,
            prompt: question,
            images: vec![STANDARD.encode(&png)],
            stream: false,
        };

        let url = self
            .endpoint
            .join("api/generate")
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::EngineFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::EngineFailure(format!(
                "engine returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| Error::EngineFailure(e.to_string()))?;

        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_round_trips_through_the_wire_encoding() {
        let image = DecodedImage {
            width: 3,
            height: 2,
            pixels: vec![7; 3 * 2 * 3],
        };

        let png = encode_png(&image).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.into_raw(), image.pixels);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let image = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 5],
        };
        assert!(matches!(
            encode_png(&image).unwrap_err(),
            Error::InvalidImage(_)
        ));
    }
}
