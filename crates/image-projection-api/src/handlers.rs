//! Endpoint handlers.
//!
//! Pixel work is CPU-bound, so each request runs its pipeline on the
//! blocking pool and the handler only awaits the result.

use axum::extract::State;
use axum::Json;
use image_projection_core::pipeline::{process_brightness, process_projection_with_canvas};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::router::AppState;
use crate::types::{ProcessImageBrightnessRequest, ProcessImageRequest};

/// `POST /processImage`
///
/// # Returns
/// Raw base64 PNG as `text/plain`.
///
/// # Errors
/// 400 for undecodable input or an unusable matrix, 500 for encoder or
/// worker failures.
pub async fn process_image(
    State(state): State<AppState>,
    Json(request): Json<ProcessImageRequest>,
) -> Result<String, ApiError> {
    let canvas = state.canvas;
    let encoded = tokio::task::spawn_blocking(move || {
        process_projection_with_canvas(&request.image_data, &request.transform_matrix, canvas)
    })
    .await??;
    Ok(encoded)
}

/// `POST /processImageBrightness`
///
/// # Returns
/// Raw base64 PNG as `text/plain`.
pub async fn process_image_brightness(
    Json(request): Json<ProcessImageBrightnessRequest>,
) -> Result<String, ApiError> {
    let encoded = tokio::task::spawn_blocking(move || {
        process_brightness(&request.image_data, &request.brightness_factor)
    })
    .await??;
    Ok(encoded)
}

pub async fn status_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{header, StatusCode};
    use axum::response::{IntoResponse, Response};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use image::{ImageFormat, RgbaImage};
    use image_projection_core::CanvasSize;
    use std::io::Cursor;

    const IDENTITY: &str = "1;0;0;0;0;1;0;0;0;0;1;0;0;0;0;1";

    fn small_state() -> AppState {
        AppState {
            canvas: CanvasSize::new(8, 10),
        }
    }

    fn png_base64(width: u32, height: u32, rgba: [u8; 4]) -> String {
        let img = RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        STANDARD.encode(bytes.into_inner())
    }

    fn decode_png(text: &str) -> RgbaImage {
        let bytes = STANDARD.decode(text).unwrap();
        image::load_from_memory(&bytes).unwrap().to_rgba8()
    }

    fn into_parts(result: Result<String, ApiError>) -> (StatusCode, Response) {
        let response = result.into_response();
        (response.status(), response)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn process_image_returns_plain_base64_png() {
        let request = ProcessImageRequest {
            image_data: png_base64(8, 10, [10, 20, 30, 255]),
            transform_matrix: IDENTITY.to_string(),
        };
        let (status, response) =
            into_parts(process_image(State(small_state()), Json(request)).await);
        assert_eq!(status, StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let body = body_text(response).await;
        assert!(!body.starts_with("data:"));
        let image = decode_png(&body);
        assert_eq!(image.dimensions(), (8, 10));
        assert_eq!(image.get_pixel(3, 4).0, [10, 20, 30, 255]);
    }

    #[tokio::test]
    async fn process_image_resizes_to_canvas() {
        let request = ProcessImageRequest {
            image_data: png_base64(3, 2, [200, 0, 0, 255]),
            transform_matrix: IDENTITY.to_string(),
        };
        let body = process_image(State(small_state()), Json(request))
            .await
            .unwrap();
        assert_eq!(decode_png(&body).dimensions(), (8, 10));
    }

    #[tokio::test]
    async fn process_image_bad_matrix_is_400() {
        let request = ProcessImageRequest {
            image_data: png_base64(8, 10, [0, 0, 0, 255]),
            transform_matrix: "1;2;3".to_string(),
        };
        let (status, _) =
            into_parts(process_image(State(small_state()), Json(request)).await);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn process_image_bad_base64_is_400() {
        let request = ProcessImageRequest {
            image_data: "%%% not base64 %%%".to_string(),
            transform_matrix: IDENTITY.to_string(),
        };
        let (status, response) =
            into_parts(process_image(State(small_state()), Json(request)).await);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn brightness_scales_color_channels() {
        let request = ProcessImageBrightnessRequest {
            image_data: png_base64(4, 4, [100, 50, 200, 255]),
            brightness_factor: "0.5".to_string(),
        };
        let body = process_image_brightness(Json(request)).await.unwrap();
        let image = decode_png(&body);
        assert_eq!(image.dimensions(), (4, 4));
        assert_eq!(image.get_pixel(0, 0).0, [50, 25, 100, 255]);
    }

    #[tokio::test]
    async fn brightness_bad_factor_is_400() {
        let request = ProcessImageBrightnessRequest {
            image_data: png_base64(4, 4, [100, 50, 200, 255]),
            brightness_factor: "1,5".to_string(),
        };
        let (status, _) = into_parts(process_image_brightness(Json(request)).await);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn brightness_non_image_is_400() {
        let request = ProcessImageBrightnessRequest {
            image_data: STANDARD.encode(b"plain text"),
            brightness_factor: "1".to_string(),
        };
        let (status, _) = into_parts(process_image_brightness(Json(request)).await);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_reports_version() {
        let Json(body) = status_handler().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
