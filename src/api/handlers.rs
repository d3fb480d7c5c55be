// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};

use super::http_server::AppState;
use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Questions in the loaded answer template
    pub questions: usize,
}

/// Upload page: pick or photograph a sheet, post it to /api/scan, show the JSON
const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Exam Scanner</title>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>
</head>
<body>

<h2>Exam Scanner</h2>

<input type="file" id="file" accept="image/*" capture="environment"/>
<button onclick="upload()">Scan</button>

<pre id="result"></pre>

<script>
async function upload() {
  const input = document.getElementById("file");
  if (!input.files.length) return;

  const form = new FormData();
  form.append("file", input.files[0]);

  const res = await fetch("/api/scan", { method: "POST", body: form });
  const data = await res.json();

  document.getElementById("result").textContent = JSON.stringify(data, null, 2);
}
</script>

</body>
</html>
"#;

/// GET / - Browser upload form
pub async fn home_handler() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// GET /health - Static status message
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: version::SERVICE_NAME.to_string(),
        version: version::VERSION.to_string(),
        questions: state.template.len(),
    })
}
