use serde::{Deserialize, Serialize};

pub const DEFAULT_LAYER_NAME: &str = "custom_layer";
pub const DEFAULT_DESCRIPTION: &str = "Custom Lambda Layer created by Lambda function";

/// Fixed object key the archive is uploaded under. Successive builds
/// overwrite the same key; only the published layer versions accumulate.
pub const ARCHIVE_OBJECT_KEY: &str = "layer.zip";

pub const PYTHON_RUNTIME: &str = "python3.12";
pub const COMPATIBLE_RUNTIMES: &[&str] = &[PYTHON_RUNTIME];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildRequest {
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub layer_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedBuildRequest {
    pub packages: Vec<String>,
    pub layer_name: String,
    pub description: String,
}

/// Success body returned to the caller after the layer version is published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishedLayerBody {
    pub message: String,
    #[serde(rename = "layerVersionArn")]
    pub layer_version_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn normalize_request(payload: BuildRequest) -> Result<NormalizedBuildRequest, ValidationError> {
    if payload.packages.is_empty() {
        return Err(ValidationError::new("No packages specified in the event"));
    }

    let mut packages = Vec::with_capacity(payload.packages.len());
    for package in payload.packages {
        let trimmed = package.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                "package identifiers must be non-empty strings",
            ));
        }
        packages.push(trimmed.to_string());
    }

    let layer_name = match payload.layer_name {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => DEFAULT_LAYER_NAME.to_string(),
    };
    let description = payload
        .description
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    Ok(NormalizedBuildRequest {
        packages,
        layer_name,
        description,
    })
}
