use std::{error::Error, io::Cursor, net::SocketAddr, path::Path, sync::Arc, time::Duration};

use axum::{
    async_trait,
    body::Body,
    http::{request::Builder, Request},
    Router, Server,
};
use common::{
    config::{Config, Storage},
    storage::FileStorage,
};
use common_multipart_rfc7578::client::multipart;
use db::{token, user, ActiveValue, Database, DatabaseConnection, EntityTrait};
use hyper::body::{self, Bytes, HttpBody};
use migration::MigratorTrait;
use serde::Serialize;
use tempfile::TempDir;

pub(crate) const TEST_PASSWORD: &str = "harvest-2024";

pub(crate) async fn create_database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("unable to create test database");

    migration::Migrator::up(&db, None)
        .await
        .expect("unable to run migrations");

    db
}

/// Create an application router that stores uploads inside of a temporary directory.
///
/// The returned directory must be kept alive for the duration of a test.
pub(crate) fn create_app(db: DatabaseConnection, mut config: Config) -> (Router, TempDir) {
    let uploads = tempfile::tempdir().expect("unable to create uploads directory");

    config.storage = Storage::Local {
        path: uploads.path().to_path_buf(),
    };

    let storage = FileStorage::Local {
        root: uploads.path().to_path_buf(),
    };

    (
        crate::app_router(Arc::new(db), Arc::new(config), storage),
        uploads,
    )
}

/// Create a user with [`TEST_PASSWORD`] and return it alongside of an authentication token.
pub(crate) async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    role: user::Role,
) -> (user::Model, String) {
    let user = user::Entity::insert(user::ActiveModel {
        name: ActiveValue::Set(String::from("Test User")),
        email: ActiveValue::Set(email.to_string()),
        password_hash: ActiveValue::Set(
            bcrypt::hash(TEST_PASSWORD, 4).expect("unable to hash password"),
        ),
        role: ActiveValue::Set(role),
        created_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create user");

    let (model, token) = token::generate_token(user.id);

    token::Entity::insert(model)
        .exec_without_returning(db)
        .await
        .expect("unable to create authentication token");

    (user, token)
}

/// Request builder with a bearer authentication token.
pub(crate) fn authorized(token: &str) -> Builder {
    Request::builder().header("Authorization", format!("Bearer {token}"))
}

/// Add a file field to a multipart form.
pub(crate) fn add_file(
    form: &mut multipart::Form<'static>,
    name: &str,
    file_name: &str,
    mime: mime::Mime,
    contents: Vec<u8>,
) {
    form.add_reader_file_with_mime(name.to_string(), Cursor::new(contents), file_name, mime);
}

/// Multipart form with every required contract listing field filled in.
pub(crate) fn contract_form() -> multipart::Form<'static> {
    let mut form = multipart::Form::default();

    for (name, value) in [
        ("cropName", "Wheat"),
        ("cropVariety", "HD-2967"),
        ("cropCategory", "Grains"),
        ("quantity", "1000"),
        ("expectedYieldDate", "2030-03-15"),
        ("address", "12 Canal Road"),
        ("state", "Punjab"),
        ("district", "Ludhiana"),
        ("village", "Khanna"),
        ("pinCode", "141401"),
        ("farmArea", "5"),
        ("expectedPrice", "25"),
        ("minPrice", "20"),
        ("paymentMode", "Bank Transfer"),
        ("preferredBuyerType", "Wholesaler"),
        ("contractDuration", "6 months"),
        ("deliveryResponsibility", "Farmer"),
        ("deliveryLocation", "Khanna Mandi"),
        ("bankName", "State Bank of India"),
        ("accountNumber", "12345678901"),
        ("accountHolderName", "Test User"),
        ("ifscCode", "sbin0001234"),
    ] {
        form.add_text(name, value);
    }

    add_file(
        &mut form,
        "idProof",
        "aadhaar.pdf",
        mime::APPLICATION_PDF,
        b"%PDF-1.4".to_vec(),
    );

    form
}

/// Build a multipart request with a bearer authentication token.
pub(crate) fn multipart_request(
    method: &str,
    uri: &str,
    token: &str,
    form: multipart::Form<'static>,
) -> Request<Body> {
    authorized(token)
        .method(method)
        .uri(uri)
        .header("Content-Type", form.content_type())
        .body(Body::wrap_stream(multipart::Body::from(form)))
        .unwrap()
}

/// Serve the provided router on a random local port.
pub(crate) async fn serve(router: Router) -> SocketAddr {
    let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(router.into_make_service());

    let address = server.local_addr();

    tokio::spawn(server);

    address
}

/// Count files inside of a directory.
pub(crate) fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|dir| dir.count()).unwrap_or(0)
}

/// Wait for background tasks to bring the file count of a directory to the expected value.
pub(crate) async fn wait_for_files(dir: &Path, expected: usize) {
    for _ in 0..100 {
        if count_files(dir) == expected {
            return;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(count_files(dir), expected);
}

pub(crate) trait RequestBodyExt: Sized {
    fn from_json<B: Serialize>(val: B) -> Self;
}

impl<T> RequestBodyExt for T
where
    T: HttpBody + From<Vec<u8>>,
{
    fn from_json<B: Serialize>(val: B) -> Self {
        T::from(serde_json::to_vec(&val).expect("unable to serialize"))
    }
}

#[async_trait(?Send)]
pub(crate) trait ResponseBodyExt {
    async fn bytes(self) -> Bytes;

    async fn text(self) -> String;

    async fn json(self) -> serde_json::Value;
}

#[async_trait(?Send)]
impl<T> ResponseBodyExt for T
where
    T: HttpBody,
    T::Error: Error,
{
    async fn bytes(self) -> Bytes {
        body::to_bytes(self)
            .await
            .expect("unable to convert to bytes")
    }

    async fn text(self) -> String {
        String::from_utf8(self.bytes().await.to_vec()).expect("unable to convert to text")
    }

    async fn json(self) -> serde_json::Value {
        serde_json::from_slice(&self.bytes().await).expect("unable to convert to json")
    }
}
