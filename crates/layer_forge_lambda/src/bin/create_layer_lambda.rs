use aws_sdk_lambda::types::{LayerVersionContentInput, Runtime};
use aws_sdk_s3::primitives::ByteStream;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use layer_forge_lambda::adapters::installer::PipInstaller;
use layer_forge_lambda::adapters::object_store::ArtifactStore;
use layer_forge_lambda::adapters::publisher::LayerPublisher;
use layer_forge_lambda::handlers::create_layer::{
    handle_create_layer_event, ApiGatewayResponse, BuildConfig,
};

struct S3ArtifactStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl ArtifactStore for S3ArtifactStore {
    fn write_object(&self, key: &str, body: &[u8]) -> Result<(), String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }
}

struct LambdaLayerPublisher {
    lambda_client: aws_sdk_lambda::Client,
}

impl LayerPublisher for LambdaLayerPublisher {
    fn publish_layer_version(
        &self,
        layer_name: &str,
        description: &str,
        bucket: &str,
        key: &str,
        compatible_runtimes: &[&str],
    ) -> Result<String, String> {
        let client = self.lambda_client.clone();
        let layer_name = layer_name.to_string();
        let description = description.to_string();
        let bucket = bucket.to_string();
        let key = key.to_string();
        let runtimes: Vec<Runtime> = compatible_runtimes
            .iter()
            .map(|runtime| Runtime::from(*runtime))
            .collect();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let response = client
                    .publish_layer_version()
                    .layer_name(layer_name)
                    .description(description)
                    .content(
                        LayerVersionContentInput::builder()
                            .s3_bucket(bucket)
                            .s3_key(key)
                            .build(),
                    )
                    .set_compatible_runtimes(Some(runtimes))
                    .send()
                    .await
                    .map_err(|error| format!("failed to publish layer version: {error}"))?;

                response
                    .layer_version_arn()
                    .map(str::to_string)
                    .ok_or_else(|| "publish response carried no layer version arn".to_string())
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let bucket = std::env::var("BUCKET_NAME")
        .map_err(|_| Error::from("BUCKET_NAME must be configured"))?;

    let config = BuildConfig {
        bucket: bucket.clone(),
        staging_root: std::env::temp_dir().join("package_dir"),
        archive_path: std::env::temp_dir().join("layer.zip"),
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3ArtifactStore {
        bucket,
        s3_client: aws_sdk_s3::Client::new(&aws_config),
    };
    let publisher = LambdaLayerPublisher {
        lambda_client: aws_sdk_lambda::Client::new(&aws_config),
    };

    Ok(handle_create_layer_event(
        event.payload,
        &config,
        &PipInstaller,
        &store,
        &publisher,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
