//! Request bodies.
//!
//! Field names are PascalCase on the wire.

use serde::{Deserialize, Serialize};

/// Body of `POST /processImage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessImageRequest {
    /// Base64 image bytes, optionally with a data-URI prefix.
    #[serde(rename = "ImageData")]
    pub image_data: String,

    /// 16 `;`-separated numbers, dot or comma decimal.
    #[serde(rename = "TransformMatrix")]
    pub transform_matrix: String,
}

/// Body of `POST /processImageBrightness`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessImageBrightnessRequest {
    #[serde(rename = "ImageData")]
    pub image_data: String,

    /// Decimal factor as text, `.` separator only.
    #[serde(rename = "BrightnessFactor")]
    pub brightness_factor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_image_request_uses_pascal_case() {
        let request: ProcessImageRequest = serde_json::from_str(
            r#"{"ImageData":"aGk=","TransformMatrix":"1;0;0;0;0;1;0;0;0;0;1;0;0;0;0;1"}"#,
        )
        .unwrap();
        assert_eq!(request.image_data, "aGk=");
        assert_eq!(request.transform_matrix.split(';').count(), 16);
    }

    #[test]
    fn brightness_request_uses_pascal_case() {
        let request: ProcessImageBrightnessRequest =
            serde_json::from_str(r#"{"ImageData":"aGk=","BrightnessFactor":"1.5"}"#).unwrap();
        assert_eq!(request.brightness_factor, "1.5");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["BrightnessFactor"], "1.5");
    }

    #[test]
    fn missing_field_is_rejected() {
        let result: Result<ProcessImageRequest, _> = serde_json::from_str(r#"{"ImageData":"aGk="}"#);
        assert!(result.is_err());
    }

    #[test]
    fn snake_case_fields_are_not_accepted() {
        let result: Result<ProcessImageBrightnessRequest, _> =
            serde_json::from_str(r#"{"image_data":"aGk=","brightness_factor":"1"}"#);
        assert!(result.is_err());
    }
}
