pub use aws_sdk_s3::Error;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};

use crate::config;

/// Configured S3 client.
#[derive(Clone)]
pub struct ConfiguredClient {
    config: config::S3Storage,
    client: Client,
}

impl ConfiguredClient {
    /// Create new [`ConfiguredClient`] from the provided [`S3Storage`] configuration.
    ///
    /// [`S3Storage`]: config::S3Storage
    pub async fn new(config: &config::S3Storage) -> ConfiguredClient {
        let sdk_config = aws_config::from_env()
            .endpoint_url(&config.endpoint_url)
            .region(Region::new(config.region.clone()))
            .credentials_provider(Credentials::new(
                &config.access_key_id,
                &config.secret_access_key,
                None,
                None,
                "s3-client",
            ))
            .load()
            .await;

        ConfiguredClient {
            config: config.clone(),
            client: Client::new(&sdk_config),
        }
    }

    /// Upload a file with the provided object key.
    pub async fn upload_file<F>(&self, key: &str, content_type: &str, file: F) -> Result<(), Error>
    where
        ByteStream: From<F>,
    {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(file))
            .send()
            .await?;

        Ok(())
    }

    /// Delete a file with the provided object key.
    pub async fn delete_file(&self, key: &str) -> Result<(), Error> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await?;

        Ok(())
    }
}
