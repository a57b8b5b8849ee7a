use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};

use crate::utils::{Error, Result};

const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image:generateContent";

/// One conversational image-generation session. Refinement turns are sent
/// against the accumulated history so the model can iterate on its own
/// previous output.
pub struct Session {
    client: reqwest::blocking::Client,
    api_key: String,
    contents: Vec<Value>,
}

impl Session {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|err| Error::Generation(err.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            contents: Vec::new(),
        })
    }

    pub fn turns(&self) -> usize {
        self.contents.len()
    }

    /// Sends `instruction` as the next user turn and returns the decoded
    /// image bytes. A failed turn is rolled back so the session can be
    /// retried without duplicating history.
    pub fn request(&mut self, instruction: &str) -> Result<Vec<u8>> {
        self.contents
            .push(json!({ "role": "user", "parts": [{ "text": instruction }] }));

        let body = json!({
            "contents": self.contents.clone(),
            "generationConfig": {
                "responseModalities": ["IMAGE"],
                "imageConfig": { "aspectRatio": "1:1" },
            },
        });

        let response = self
            .client
            .post(ENDPOINT)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|err| self.fail(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let payload: Value = response.json().unwrap_or_default();
            let message = payload
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("request failed with status {status}"));
            return Err(self.fail(message));
        }

        let payload: Value = response
            .json()
            .map_err(|err| self.fail(err.to_string()))?;
        let Some(data) = extract_image(&payload) else {
            return Err(self.fail(String::from("no image data received")));
        };
        let bytes = BASE64
            .decode(data)
            .map_err(|err| self.fail(format!("invalid image payload: {err}")))?;

        self.contents.push(json!({
            "role": "model",
            "parts": [{ "inlineData": { "mimeType": "image/png", "data": data } }],
        }));
        Ok(bytes)
    }

    fn fail(&mut self, message: String) -> Error {
        self.contents.pop();
        Error::Generation(message)
    }
}

fn extract_image(payload: &Value) -> Option<&str> {
    // one-shot shape
    if let Some(data) = payload
        .pointer("/generatedImages/0/image/imageBytes")
        .and_then(Value::as_str)
    {
        return Some(data);
    }
    // conversational shape
    payload
        .pointer("/candidates/0/content/parts")?
        .as_array()?
        .iter()
        .find_map(|part| part.pointer("/inlineData/data").and_then(Value::as_str))
}
