pub trait LayerPublisher {
    /// Publishes the uploaded archive as a new layer version and returns the
    /// version ARN exactly as the platform reported it.
    fn publish_layer_version(
        &self,
        layer_name: &str,
        description: &str,
        bucket: &str,
        key: &str,
        compatible_runtimes: &[&str],
    ) -> Result<String, String>;
}
