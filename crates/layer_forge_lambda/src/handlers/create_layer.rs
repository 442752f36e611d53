use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use layer_forge_core::contract::{
    normalize_request, BuildRequest, NormalizedBuildRequest, PublishedLayerBody,
    ARCHIVE_OBJECT_KEY, COMPATIBLE_RUNTIMES,
};
use layer_forge_core::layout::site_packages_dir;

use crate::adapters::installer::PackageInstaller;
use crate::adapters::object_store::ArtifactStore;
use crate::adapters::publisher::LayerPublisher;
use crate::archive::write_layer_archive;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Per-invocation settings resolved by the binary and passed in explicitly.
/// The staging root and archive path live under the execution environment's
/// ephemeral temp storage and are never cleaned up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub bucket: String,
    pub staging_root: PathBuf,
    pub archive_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildError {
    stage: &'static str,
    message: String,
}

impl BuildError {
    fn new(stage: &'static str, message: String) -> Self {
        Self { stage, message }
    }
}

/// Runs the full build sequence: validate, stage, install, archive, upload,
/// publish. Strictly sequential; the first failing stage terminates the
/// invocation with a tagged error body and nothing is rolled back.
pub fn handle_create_layer_event(
    event: Value,
    config: &BuildConfig,
    installer: &dyn PackageInstaller,
    store: &dyn ArtifactStore,
    publisher: &dyn LayerPublisher,
) -> ApiGatewayResponse {
    let payload = match normalize_apigw_event(event) {
        Ok(value) => value,
        Err(message) => return error_response(400, &message),
    };

    let request = match serde_json::from_value::<BuildRequest>(payload) {
        Ok(value) => value,
        Err(error) => return error_response(400, &format!("Malformed request: {error}")),
    };

    let request = match normalize_request(request) {
        Ok(value) => value,
        Err(error) => return error_response(400, error.message()),
    };

    let started_at = Instant::now();
    log_build_info(
        "build_started",
        json!({
            "layer_name": request.layer_name.clone(),
            "packages": request.packages.clone(),
            "bucket": config.bucket.clone(),
        }),
    );

    match run_build(&request, config, installer, store, publisher) {
        Ok(body) => {
            log_build_info(
                "layer_published",
                json!({
                    "layer_name": request.layer_name.clone(),
                    "layer_version_arn": body.layer_version_arn.clone(),
                    "duration_ms": started_at.elapsed().as_millis(),
                }),
            );
            success_response(body)
        }
        Err(error) => {
            log_build_error(
                "build_failed",
                json!({
                    "layer_name": request.layer_name.clone(),
                    "stage": error.stage,
                    "error": error.message.clone(),
                    "duration_ms": started_at.elapsed().as_millis(),
                }),
            );
            error_response(500, &error.message)
        }
    }
}

fn run_build(
    request: &NormalizedBuildRequest,
    config: &BuildConfig,
    installer: &dyn PackageInstaller,
    store: &dyn ArtifactStore,
    publisher: &dyn LayerPublisher,
) -> Result<PublishedLayerBody, BuildError> {
    let site_packages = site_packages_dir(&config.staging_root);
    fs::create_dir_all(&site_packages).map_err(|error| {
        BuildError::new(
            "staging",
            format!("Error preparing staging directory: {error}"),
        )
    })?;

    for package in &request.packages {
        installer
            .install(package, &site_packages)
            .map_err(|error| {
                BuildError::new("install", format!("Error during pip install: {error}"))
            })?;
        log_build_info("package_installed", json!({ "package": package.clone() }));
    }

    let entry_count = write_layer_archive(&config.staging_root, &config.archive_path)
        .map_err(|error| BuildError::new("archive", format!("Error creating zip file: {error}")))?;
    log_build_info(
        "archive_written",
        json!({
            "archive_path": config.archive_path.display().to_string(),
            "entries": entry_count,
        }),
    );

    let archive_bytes = fs::read(&config.archive_path).map_err(|error| {
        BuildError::new("upload", format!("Error uploading file to S3: {error}"))
    })?;
    store
        .write_object(ARCHIVE_OBJECT_KEY, &archive_bytes)
        .map_err(|error| {
            BuildError::new("upload", format!("Error uploading file to S3: {error}"))
        })?;
    log_build_info(
        "artifact_uploaded",
        json!({
            "bucket": config.bucket.clone(),
            "key": ARCHIVE_OBJECT_KEY,
            "bytes": archive_bytes.len(),
        }),
    );

    let layer_version_arn = publisher
        .publish_layer_version(
            &request.layer_name,
            &request.description,
            &config.bucket,
            ARCHIVE_OBJECT_KEY,
            COMPATIBLE_RUNTIMES,
        )
        .map_err(|error| {
            BuildError::new("publish", format!("Error creating Lambda Layer: {error}"))
        })?;

    Ok(PublishedLayerBody {
        message: format!(
            "Successfully uploaded {ARCHIVE_OBJECT_KEY} to {}",
            config.bucket
        ),
        layer_version_arn,
    })
}

fn normalize_apigw_event(event: Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => {
            serde_json::from_str(text).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        _ => Err("Request body must be a JSON object".to_string()),
    }
}

fn success_response(payload: impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 200,
        headers: json!({"Content-Type": "application/json"}),
        body: serde_json::to_string(&payload).expect("response payload should serialize"),
    }
}

// Error bodies are JSON-encoded strings, mirroring the success body's
// json-in-a-string transport shape.
fn error_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: Value::String(message.to_string()).to_string(),
    }
}

fn log_build_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "create_layer_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_build_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "create_layer_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
