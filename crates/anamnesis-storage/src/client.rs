use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;

/// Build an S3 client from the default credential chain, optionally
/// pinning the region.
pub async fn build_client(region: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    let config = loader.load().await;
    Client::new(&config)
}
