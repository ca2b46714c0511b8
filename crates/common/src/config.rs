use std::{net::SocketAddr, path::PathBuf};

use byte_unit::n_mib_bytes;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[cfg(feature = "logging")]
use tracing_subscriber::filter::LevelFilter;

/// Database configuration.
#[derive(Deserialize)]
pub struct Database {
    /// Database URL string.
    pub url: String,
}

/// HTTP server configuration.
#[derive(Deserialize)]
pub struct Server {
    /// Address, that HTTP server will listen on.
    pub address: SocketAddr,
}

/// Implementation of [`serde`]'s deserializer for [`FromStr`] types.
#[cfg(feature = "logging")]
fn deserialize_from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error,
    D: serde::de::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
}

/// Logging configuration.
#[cfg(feature = "logging")]
#[derive(Deserialize)]
pub struct Logging {
    /// Log level.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub level: LevelFilter,
}

#[cfg(feature = "logging")]
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
        }
    }
}

/// Cross-origin request configuration.
#[derive(Deserialize)]
pub struct Cors {
    /// Origin of the web application that is allowed to send credentialed requests.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl Default for Cors {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
        }
    }
}

fn default_allowed_origin() -> String {
    String::from("http://localhost:5173")
}

/// User authentication configuration.
#[derive(Deserialize)]
pub struct Auth {
    /// Cost factor used to hash user passwords with bcrypt.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    12
}

/// AWS S3-compatible storage configuration.
#[derive(Clone, Deserialize)]
pub struct S3Storage {
    /// Access key identifier.
    pub access_key_id: String,

    /// Secret access key.
    pub secret_access_key: String,

    /// S3 region name.
    pub region: String,

    /// S3 endpoint URL.
    pub endpoint_url: String,

    /// S3 bucket name for uploaded listing files.
    pub bucket: String,
}

/// Uploaded file storage configuration.
#[derive(Clone, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum Storage {
    /// Files are written to a local directory and served by the API server.
    Local {
        /// Directory in which uploaded files are stored.
        path: PathBuf,
    },

    /// Files are uploaded to an S3-compatible bucket.
    S3(S3Storage),
}

impl Default for Storage {
    fn default() -> Self {
        Storage::Local {
            path: PathBuf::from("uploads"),
        }
    }
}

/// Request and upload size limits.
#[derive(Deserialize)]
pub struct Limits {
    /// Max size of a single uploaded file, in bytes.
    #[serde(default = "default_file_size_limit")]
    pub file_size: usize,

    /// Max size of a whole request body, in bytes.
    #[serde(default = "default_request_size_limit")]
    pub request_size: usize,

    /// Max count of listing images per request.
    #[serde(default = "default_max_images")]
    pub max_images: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            file_size: default_file_size_limit(),
            request_size: default_request_size_limit(),
            max_images: default_max_images(),
        }
    }
}

fn default_file_size_limit() -> usize {
    n_mib_bytes!(10) as usize
}

// Five new images, five replaced existing images and both proof documents
// at the max file size, with some room left for text fields.
fn default_request_size_limit() -> usize {
    n_mib_bytes!(128) as usize
}

fn default_max_images() -> usize {
    5
}

/// Agricultural news feed configuration.
#[derive(Deserialize)]
pub struct News {
    /// RSS search endpoint URL.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Search terms every query starts with.
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Interface language parameter.
    #[serde(default = "default_language")]
    pub language: String,

    /// Country parameter.
    #[serde(default = "default_country")]
    pub country: String,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for News {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            topic: default_topic(),
            language: default_language(),
            country: default_country(),
            timeout: default_timeout(),
        }
    }
}

fn default_feed_url() -> String {
    String::from("https://news.google.com/rss/search")
}

fn default_topic() -> String {
    String::from("agriculture india")
}

fn default_language() -> String {
    String::from("en-IN")
}

fn default_country() -> String {
    String::from("IN")
}

fn default_timeout() -> u64 {
    10
}

/// Generative AI chat assistant configuration.
#[derive(Deserialize)]
pub struct Assistant {
    /// API key of the generative language API.
    ///
    /// Chat routes respond with an error if the key is not set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Generative language API base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout, in seconds.
    #[serde(default = "default_assistant_timeout")]
    pub timeout: u64,
}

impl Default for Assistant {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout: default_assistant_timeout(),
        }
    }
}

fn default_model() -> String {
    String::from("gemini-2.0-flash")
}

fn default_endpoint() -> String {
    String::from("https://generativelanguage.googleapis.com/v1beta")
}

fn default_assistant_timeout() -> u64 {
    30
}

/// General configuration.
#[derive(Deserialize)]
pub struct Config {
    /// General database configuration.
    pub database: Database,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: Option<Server>,

    /// Logging configuration.
    #[cfg(feature = "logging")]
    #[serde(default)]
    pub logging: Logging,

    /// Cross-origin request configuration.
    #[serde(default)]
    pub cors: Cors,

    /// User authentication configuration.
    #[serde(default)]
    pub auth: Auth,

    /// Storage configuration.
    #[serde(default)]
    pub storage: Storage,

    /// Upload limits.
    #[serde(default)]
    pub limits: Limits,

    /// News feed configuration.
    #[serde(default)]
    pub news: News,

    /// Chat assistant configuration.
    #[serde(default)]
    pub assistant: Assistant,
}

impl Config {
    /// Create new config using default configuration file or environment variables.
    ///
    /// See [`Env`] for more details on how to use environment variables configuration.
    ///
    /// [`Env`]: figment::providers::Env
    pub fn new(path: Option<PathBuf>) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path.unwrap_or(PathBuf::from("Config.toml"))))
            .merge(Env::prefixed("CONFIG_").split("_"))
            .extract()
    }

    /// Create new config suitable for running unit tests.
    #[cfg(feature = "test-utils")]
    pub fn for_tests() -> Self {
        Self {
            database: Database {
                url: String::from("sqlite::memory:"),
            },
            server: Some(Server {
                address: "127.0.0.1:3000".parse().unwrap(),
            }),
            #[cfg(feature = "logging")]
            logging: Logging::default(),
            cors: Cors::default(),
            auth: Auth { bcrypt_cost: 4 },
            storage: Storage::Local {
                path: std::env::temp_dir().join("farmbazaar-uploads"),
            },
            limits: Limits::default(),
            news: News::default(),
            assistant: Assistant::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::{
        providers::{Format, Toml},
        Figment,
    };

    use super::{Config, Storage};

    #[test]
    fn defaults() {
        let config: Config = Figment::new()
            .merge(Toml::string(
                r#"
                [database]
                url = "postgres://localhost/farmbazaar"
                "#,
            ))
            .extract()
            .unwrap();

        assert!(matches!(config.storage, Storage::Local { .. }));
        assert_eq!(config.limits.file_size, 10 * 1024 * 1024);
        assert_eq!(config.limits.max_images, 5);
        assert!(
            config.limits.request_size
                > (2 * config.limits.max_images + 2) * config.limits.file_size
        );
        assert_eq!(config.cors.allowed_origin, "http://localhost:5173");
        assert!(config.assistant.api_key.is_none());
    }

    #[test]
    fn s3_storage() {
        let config: Config = Figment::new()
            .merge(Toml::string(
                r#"
                [database]
                url = "postgres://localhost/farmbazaar"

                [storage]
                backend = "s3"
                access_key_id = "key"
                secret_access_key = "secret"
                region = "ap-south-1"
                endpoint_url = "http://localhost:9000"
                bucket = "listings"
                "#,
            ))
            .extract()
            .unwrap();

        match config.storage {
            Storage::S3(storage) => assert_eq!(storage.bucket, "listings"),
            Storage::Local { .. } => panic!("expected s3 storage"),
        }
    }
}
