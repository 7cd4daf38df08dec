use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use signcap_common::config::{ExtractorConfig, TranslatorConfig};
use signcap_common::frame::Frame;
use signcap_common::keypoints::{ExtractionResult, Keypoints};
use signcap_sampler::{
    ExtractorError, HistoryBuffers, LandmarkExtractor, Translator, TranslatorError,
};
use std::time::Duration;
use tracing::debug;

use crate::CaptureError;

/// Extractor response body.
///
/// ```json
/// { "pose_4d": [[x, y, z, visibility], ...],
///   "face_3d": [[x, y, z], ...],
///   "lh_3d":   [[x, y, z], ...],
///   "rh_3d":   [[x, y, z], ...] }
/// ```
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    pose_4d: Vec<[f32; 4]>,
    face_3d: Vec<[f32; 3]>,
    lh_3d: Vec<[f32; 3]>,
    rh_3d: Vec<[f32; 3]>,
}

impl From<ExtractResponse> for ExtractionResult {
    fn from(r: ExtractResponse) -> Self {
        Self {
            pose: Keypoints::from_points(&r.pose_4d),
            face: Keypoints::from_points(&r.face_3d),
            left_hand: Keypoints::from_points(&r.lh_3d),
            right_hand: Keypoints::from_points(&r.rh_3d),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    text: String,
}

/// Landmark extractor served over HTTP.
///
/// Sends the raw RGB8 pixels as `POST {endpoint}?width=W&height=H`.
pub struct HttpExtractor {
    client: Client,
    endpoint: String,
}

impl HttpExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self, CaptureError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(CaptureError::HttpConnect)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl LandmarkExtractor for HttpExtractor {
    fn extract(&mut self, frame: &Frame) -> Result<ExtractionResult, ExtractorError> {
        let url = format!(
            "{}?width={}&height={}",
            self.endpoint, frame.width, frame.height
        );
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(frame.pixels().to_vec())
            .send()
            .map_err(|e| ExtractorError::Backend(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ExtractorError::Backend(format!("HTTP status {}", resp.status())));
        }

        let body: ExtractResponse = resp
            .json()
            .map_err(|e| ExtractorError::Response(e.to_string()))?;
        debug!(
            seq = frame.seq,
            pose_points = body.pose_4d.len(),
            "extractor responded"
        );
        Ok(body.into())
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Translator served over HTTP: `POST {endpoint}` with the history as JSON,
/// answered by `{"text": "..."}`.
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
}

impl HttpTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, CaptureError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(CaptureError::HttpConnect)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Translator for HttpTranslator {
    fn translate(&mut self, history: &HistoryBuffers) -> Result<String, TranslatorError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(history)
            .send()
            .map_err(|e| TranslatorError::Backend(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(TranslatorError::Backend(format!("HTTP status {}", resp.status())));
        }

        let body: TranslateResponse = resp
            .json()
            .map_err(|e| TranslatorError::Response(e.to_string()))?;
        Ok(body.text)
    }

    fn name(&self) -> &str {
        "http"
    }
}
