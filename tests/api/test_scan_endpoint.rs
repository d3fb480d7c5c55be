// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Scan endpoint tests for POST /api/scan
//!
//! These tests drive the full router and verify that the endpoint:
//! - Reads the image from the `file` multipart file part
//! - Answers `{"answers": ...}` for decodable sheets
//! - Answers `{"error": "invalid image"}` with HTTP 200 for anything else
//! - Rejects requests that carry no image at the transport level

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use exam_scanner::api::{create_app, AppState};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use std::io::Cursor;
use tower::util::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "exam-scanner-test-boundary";

/// Helper: Router backed by the standard template
fn setup_app() -> Router {
    create_app(AppState::with_standard_template().expect("standard template is valid"))
}

/// Helper: PNG of a 400x400 sheet with the given (x, y) 40px bubbles filled
fn sheet_png(filled: &[(u32, u32)]) -> Vec<u8> {
    let mut sheet = RgbImage::from_pixel(400, 400, Rgb([255, 255, 255]));
    for &(x0, y0) in filled {
        for y in y0..y0 + 40 {
            for x in x0..x0 + 40 {
                sheet.put_pixel(x, y, Rgb([20, 20, 20]));
            }
        }
    }

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(sheet)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Helper: binary PPM (P6) of the same sheet
fn sheet_ppm(filled: &[(u32, u32)]) -> Vec<u8> {
    let png = sheet_png(filled);
    let sheet = image::load_from_memory(&png).unwrap().to_rgb8();

    let mut bytes = format!("P6\n{} {}\n255\n", sheet.width(), sheet.height()).into_bytes();
    bytes.extend_from_slice(sheet.as_raw());
    bytes
}

/// Helper: multipart body with a single part
fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
        None => format!("form-data; name=\"{}\"", field),
    };

    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: {}\r\nContent-Type: application/octet-stream\r\n\r\n",
            BOUNDARY, disposition
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Helper: POST a multipart body to /api/scan
async fn post_scan(app: Router, body: Vec<u8>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/scan")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[cfg(test)]
mod scan_endpoint_tests {
    use super::*;

    // =============================================================================
    // Successful scans
    // =============================================================================

    /// Test 1: Blank sheet answers null for every question
    #[tokio::test]
    async fn test_blank_sheet() {
        let body = multipart_body("file", Some("sheet.png"), &sheet_png(&[]));
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"answers": {"1": null, "2": null}}));
    }

    /// Test 2: Filled bubbles are reported per question
    #[tokio::test]
    async fn test_marked_sheet() {
        // Question 1 option B, question 2 option D
        let png = sheet_png(&[(160, 200), (280, 260)]);
        let body = multipart_body("file", Some("sheet.png"), &png);
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"answers": {"1": "B", "2": "D"}}));
    }

    /// Test 3: Binary PPM uploads are scanned like any other format
    #[tokio::test]
    async fn test_ppm_upload() {
        let body = multipart_body("file", Some("sheet.ppm"), &sheet_ppm(&[(100, 260)]));
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"answers": {"1": null, "2": "A"}}));
    }

    // =============================================================================
    // Invalid images (reported in the body, HTTP 200)
    // =============================================================================

    /// Test 4: Non-image bytes
    #[tokio::test]
    async fn test_invalid_image() {
        let body = multipart_body("file", Some("notes.txt"), b"these are not pixels");
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"error": "invalid image"}));
    }

    /// Test 5: Empty upload
    #[tokio::test]
    async fn test_empty_upload() {
        let body = multipart_body("file", Some("empty.png"), &[]);
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"error": "invalid image"}));
    }

    // =============================================================================
    // Transport errors
    // =============================================================================

    /// Test 6: Form without any file part
    #[tokio::test]
    async fn test_missing_file_field() {
        let body = multipart_body("comment", None, b"hello");
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error_type"], "validation_error");
        assert_eq!(json["details"]["field"], "file");
    }

    /// Test 7: A file part under another name does not stand in for `file`
    #[tokio::test]
    async fn test_file_part_under_other_name() {
        let body = multipart_body("image", Some("sheet.png"), &sheet_png(&[(100, 260)]));
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error_type"], "validation_error");
        assert_eq!(json["details"]["field"], "file");
    }

    /// Test 8: A plain `file` value without a file name is not an upload
    #[tokio::test]
    async fn test_file_field_without_filename() {
        let body = multipart_body("file", None, &sheet_png(&[(100, 260)]));
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error_type"], "validation_error");
        assert_eq!(json["details"]["field"], "file");
    }

    /// Test 9: Body that is not multipart at all
    #[tokio::test]
    async fn test_non_multipart_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/scan")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"file": "abc"}"#))
            .unwrap();

        let response = setup_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error_type"], "invalid_request");
    }

    /// Test 10: Uploads above axum's default 2MB body limit are accepted
    #[tokio::test]
    async fn test_large_upload_not_limited() {
        let mut padded = b"not an image".to_vec();
        padded.resize(3 * 1024 * 1024, 0);
        let body = multipart_body("file", Some("big.bin"), &padded);
        let (status, json) = post_scan(setup_app(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"error": "invalid image"}));
    }

    /// Test 11: Same upload twice gives the same body
    #[tokio::test]
    async fn test_repeat_scan_is_identical() {
        let png = sheet_png(&[(220, 200)]);
        let (_, first) = post_scan(setup_app(), multipart_body("file", Some("a.png"), &png)).await;
        let (_, second) = post_scan(setup_app(), multipart_body("file", Some("a.png"), &png)).await;

        assert_eq!(first, second);
        assert_eq!(first, json!({"answers": {"1": "C", "2": null}}));
    }
}
