use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use common::chain;
use db::{
    agreement, contract, user, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use validator::Validate;

use super::{draft::parse_date, format_date, OwnerData};
use crate::{
    auth::AuthenticatedUserId,
    error::{error_response, ResponseError},
    validation::ValidatedJson,
};

/// A single agreement data.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AgreementData {
    id: i64,
    contract_id: i64,
    buyer_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    buyer: Option<OwnerData>,
    quantity: f64,
    agreed_price: f64,
    buyer_wallet_address: Option<String>,
    farmer_wallet_address: Option<String>,
    blockchain: Option<contract::Blockchain>,
    transaction_hash: Option<String>,
    delivery_date: Option<String>,
    notes: Option<String>,
    created_at: i64,
}

impl AgreementData {
    fn new(model: agreement::Model, buyer: Option<user::Model>) -> Self {
        Self {
            id: model.id,
            contract_id: model.contract_id,
            buyer_id: model.buyer_id,
            buyer: buyer.map(OwnerData::from),
            quantity: model.quantity,
            agreed_price: model.agreed_price,
            buyer_wallet_address: model.buyer_wallet_address,
            farmer_wallet_address: model.farmer_wallet_address,
            blockchain: model.blockchain,
            transaction_hash: model.transaction_hash,
            delivery_date: model.delivery_date.map(format_date),
            notes: model.notes,
            created_at: model.created_at.assume_utc().unix_timestamp(),
        }
    }
}

/// Errors that may occur during the agreement creation process.
#[derive(Debug, Display, From, Error)]
pub(super) enum AgreementCreateError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "Contract not found")]
    ContractNotFound,

    #[display(fmt = "Not authorized to view this contract")]
    Forbidden,

    #[display(fmt = "You cannot create an agreement for your own listing")]
    OwnListing,

    #[display(fmt = "This listing is not accepting agreements")]
    NotActive,

    /// Agreement terms do not match the listing.
    #[from(ignore)]
    #[display(fmt = "{}", _0)]
    InvalidTerms(#[error(not(source))] &'static str),
}

impl ResponseError for AgreementCreateError {
    fn status(&self) -> StatusCode {
        match self {
            AgreementCreateError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AgreementCreateError::ContractNotFound => StatusCode::NOT_FOUND,
            AgreementCreateError::Forbidden | AgreementCreateError::OwnListing => {
                StatusCode::FORBIDDEN
            }
            AgreementCreateError::NotActive | AgreementCreateError::InvalidTerms(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

error_response!(AgreementCreateError);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct AgreementRequest {
    #[serde(deserialize_with = "number")]
    quantity: f64,

    #[serde(deserialize_with = "number")]
    agreed_price: f64,

    #[serde(default)]
    accept_terms: bool,

    #[serde(default)]
    buyer_wallet_address: Option<String>,

    /// Expected delivery date, `YYYY-MM-DD`.
    #[serde(default)]
    delivery_date: Option<String>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Notes must not exceed 2000 characters"))]
    notes: Option<String>,
}

/// Accept numbers submitted either as JSON numbers or as form input strings.
fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    let val = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(val) => val,
        NumberOrString::String(val) => val
            .trim()
            .parse::<f64>()
            .map_err(<D::Error as serde::de::Error>::custom)?,
    };

    if val.is_finite() {
        Ok(val)
    } else {
        Err(serde::de::Error::custom("expected a finite number"))
    }
}

#[derive(Serialize)]
pub(super) struct AgreementResponse {
    status: &'static str,
    agreement: AgreementData,
}

fn non_empty(val: Option<String>) -> Option<String> {
    val.map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Agree to the terms of a listing as a buyer.
///
/// Agreements on smart contract listings are settled on a simulated chain.
pub(super) async fn create(
    Path(id): Path<i64>,
    Extension(current_user): Extension<AuthenticatedUserId>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<AgreementRequest>,
) -> Result<(StatusCode, Json<AgreementResponse>), AgreementCreateError> {
    let contract = contract::Entity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or(AgreementCreateError::ContractNotFound)?;

    if !contract.allow_visibility && contract.user_id != current_user.id() {
        return Err(AgreementCreateError::Forbidden);
    }

    if contract.user_id == current_user.id() {
        return Err(AgreementCreateError::OwnListing);
    }

    if contract.status != contract::Status::Active {
        return Err(AgreementCreateError::NotActive);
    }

    if !request.accept_terms {
        return Err(AgreementCreateError::InvalidTerms(
            "You must accept the contract terms",
        ));
    }

    if request.quantity <= 0.0 {
        return Err(AgreementCreateError::InvalidTerms(
            "Quantity must be greater than zero",
        ));
    }

    if request.quantity > contract.quantity {
        return Err(AgreementCreateError::InvalidTerms(
            "Quantity exceeds the available quantity",
        ));
    }

    if request.agreed_price < contract.min_price {
        return Err(AgreementCreateError::InvalidTerms(
            "Agreed price cannot be below the minimum price",
        ));
    }

    let buyer_wallet_address = non_empty(request.buyer_wallet_address);

    if contract.use_smart_contract && buyer_wallet_address.is_none() {
        return Err(AgreementCreateError::InvalidTerms(
            "Buyer wallet address is required for smart contract listings",
        ));
    }

    let delivery_date = non_empty(request.delivery_date)
        .map(|val| {
            parse_date(&val).ok_or(AgreementCreateError::InvalidTerms("Invalid delivery date"))
        })
        .transpose()?;

    let (farmer_wallet_address, blockchain, transaction_hash) = if contract.use_smart_contract {
        (
            contract.wallet_address,
            contract.preferred_blockchain,
            Some(chain::mock_transaction_hash()),
        )
    } else {
        (None, None, None)
    };

    let agreement = agreement::Entity::insert(agreement::ActiveModel {
        contract_id: ActiveValue::Set(contract.id),
        buyer_id: ActiveValue::Set(current_user.id()),
        quantity: ActiveValue::Set(request.quantity),
        agreed_price: ActiveValue::Set(request.agreed_price),
        buyer_wallet_address: ActiveValue::Set(buyer_wallet_address),
        farmer_wallet_address: ActiveValue::Set(farmer_wallet_address),
        blockchain: ActiveValue::Set(blockchain),
        transaction_hash: ActiveValue::Set(transaction_hash),
        delivery_date: ActiveValue::Set(delivery_date),
        notes: ActiveValue::Set(non_empty(request.notes)),
        created_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_with_returning(&*db)
    .await?;

    info!(
        buyer_id = current_user.id(),
        contract_id = contract.id,
        agreement_id = agreement.id,
        "created agreement"
    );

    Ok((
        StatusCode::CREATED,
        Json(AgreementResponse {
            status: "success",
            agreement: AgreementData::new(agreement, None),
        }),
    ))
}

#[derive(Debug, Display, From, Error)]
pub(super) enum AgreementListError {
    DatabaseError(DbErr),

    #[display(fmt = "Contract not found")]
    ContractNotFound,

    #[display(fmt = "Not authorized to view agreements for this contract")]
    Forbidden,
}

impl ResponseError for AgreementListError {
    fn status(&self) -> StatusCode {
        match self {
            AgreementListError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AgreementListError::ContractNotFound => StatusCode::NOT_FOUND,
            AgreementListError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

error_response!(AgreementListError);

#[derive(Serialize)]
pub(super) struct AgreementListResponse {
    status: &'static str,
    results: usize,
    agreements: Vec<AgreementData>,
}

/// List agreements made on a listing owned by the current user.
pub(super) async fn list(
    Path(id): Path<i64>,
    Extension(current_user): Extension<AuthenticatedUserId>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<AgreementListResponse>, AgreementListError> {
    let owner_id = contract::Entity::find_by_id(id)
        .select_only()
        .column(contract::Column::UserId)
        .into_tuple::<i64>()
        .one(&*db)
        .await?
        .ok_or(AgreementListError::ContractNotFound)?;

    if owner_id != current_user.id() {
        return Err(AgreementListError::Forbidden);
    }

    let agreements: Vec<AgreementData> = agreement::Entity::find()
        .filter(agreement::Column::ContractId.eq(id))
        .order_by_desc(agreement::Column::CreatedAt)
        .order_by_desc(agreement::Column::Id)
        .find_also_related(user::Entity)
        .stream(&*db)
        .await?
        .map_ok(|(agreement, buyer)| AgreementData::new(agreement, buyer))
        .try_collect()
        .await?;

    Ok(Json(AgreementListResponse {
        status: "success",
        results: agreements.len(),
        agreements,
    }))
}

#[cfg(test)]
mod tests {
    use crate::{
        handlers::contracts::details::tests::create_contract,
        testing::{
            authorized, create_app, create_database, create_user, RequestBodyExt,
            ResponseBodyExt,
        },
    };

    use axum::{body::Body, http::StatusCode, Router};
    use common::config::Config;
    use db::{
        agreement,
        contract::{self, Status},
        user, ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn agree(app: Router, token: &str, contract_id: i64, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                authorized(token)
                    .method("POST")
                    .uri(format!("/api/v1/contracts/{contract_id}/create-agreement"))
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        (response.status(), response.json().await)
    }

    async fn enable_smart_contract(db: &DatabaseConnection, model: contract::Model) {
        let mut model: contract::ActiveModel = model.into();
        model.use_smart_contract = ActiveValue::Set(true);
        model.wallet_address = ActiveValue::Set(Some(String::from("0xfarmer")));
        model.preferred_blockchain = ActiveValue::Set(Some(contract::Blockchain::Ethereum));
        model.update(db).await.expect("unable to update contract");
    }

    #[tokio::test]
    async fn create() {
        let db = create_database().await;
        let (farmer, _) = create_user(&db, "farmer@example.com", user::Role::Farmer).await;
        let (buyer, token) = create_user(&db, "buyer@example.com", user::Role::Buyer).await;

        let contract = create_contract(&db, farmer.id, Status::Active, true).await;

        let (app, _uploads) = create_app(db.clone(), Config::for_tests());

        let (status, body) = agree(
            app,
            &token,
            contract.id,
            json!({
                "quantity": "200",
                "agreedPrice": 75,
                "acceptTerms": true,
                "deliveryDate": "2030-11-01",
                "notes": "  Deliver in jute bags  ",
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "success");

        let agreement = &body["agreement"];
        assert_eq!(agreement["contractId"], contract.id);
        assert_eq!(agreement["buyerId"], buyer.id);
        assert_eq!(agreement["quantity"], 200.0);
        assert_eq!(agreement["agreedPrice"], 75.0);
        assert_eq!(agreement["deliveryDate"], "2030-11-01");
        assert_eq!(agreement["notes"], "Deliver in jute bags");
        assert_eq!(agreement["transactionHash"], Value::Null);
        assert_eq!(agreement["blockchain"], Value::Null);

        assert_eq!(agreement::Entity::find().all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn smart_contract() {
        let db = create_database().await;
        let (farmer, _) = create_user(&db, "farmer@example.com", user::Role::Farmer).await;
        let (_, token) = create_user(&db, "buyer@example.com", user::Role::Buyer).await;

        let contract = create_contract(&db, farmer.id, Status::Active, true).await;
        let id = contract.id;
        enable_smart_contract(&db, contract).await;

        let (app, _uploads) = create_app(db, Config::for_tests());

        let (status, body) = agree(
            app.clone(),
            &token,
            id,
            json!({
                "quantity": 100,
                "agreedPrice": 70,
                "acceptTerms": true,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Buyer wallet address is required for smart contract listings"
        );

        let (status, body) = agree(
            app,
            &token,
            id,
            json!({
                "quantity": 100,
                "agreedPrice": 70,
                "acceptTerms": true,
                "buyerWalletAddress": "0xbuyer",
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);

        let agreement = &body["agreement"];
        assert_eq!(agreement["buyerWalletAddress"], "0xbuyer");
        assert_eq!(agreement["farmerWalletAddress"], "0xfarmer");
        assert_eq!(agreement["blockchain"], "Ethereum");

        let hash = agreement["transactionHash"].as_str().unwrap();
        assert_eq!(hash.len(), 66);
        assert!(hash.starts_with("0x"));
    }

    #[tokio::test]
    async fn invalid_terms() {
        let db = create_database().await;
        let (farmer, _) = create_user(&db, "farmer@example.com", user::Role::Farmer).await;
        let (_, token) = create_user(&db, "buyer@example.com", user::Role::Buyer).await;

        let contract = create_contract(&db, farmer.id, Status::Active, true).await;

        let (app, _uploads) = create_app(db, Config::for_tests());

        for (body, message) in [
            (
                json!({ "quantity": 100, "agreedPrice": 75 }),
                "You must accept the contract terms",
            ),
            (
                json!({ "quantity": 0, "agreedPrice": 75, "acceptTerms": true }),
                "Quantity must be greater than zero",
            ),
            (
                json!({ "quantity": 501, "agreedPrice": 75, "acceptTerms": true }),
                "Quantity exceeds the available quantity",
            ),
            (
                json!({ "quantity": 100, "agreedPrice": 69.5, "acceptTerms": true }),
                "Agreed price cannot be below the minimum price",
            ),
            (
                json!({
                    "quantity": 100,
                    "agreedPrice": 75,
                    "acceptTerms": true,
                    "deliveryDate": "next week",
                }),
                "Invalid delivery date",
            ),
        ] {
            let (status, body) = agree(app.clone(), &token, contract.id, body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["status"], "fail");
            assert_eq!(body["message"], message);
        }
    }

    #[tokio::test]
    async fn unavailable_listings() {
        let db = create_database().await;
        let (farmer, farmer_token) =
            create_user(&db, "farmer@example.com", user::Role::Farmer).await;
        let (_, token) = create_user(&db, "buyer@example.com", user::Role::Buyer).await;

        let hidden = create_contract(&db, farmer.id, Status::Active, false).await;
        let completed = create_contract(&db, farmer.id, Status::Completed, true).await;
        let own = create_contract(&db, farmer.id, Status::Active, true).await;

        let (app, _uploads) = create_app(db, Config::for_tests());

        let body = json!({ "quantity": 100, "agreedPrice": 75, "acceptTerms": true });

        let (status, response) = agree(app.clone(), &token, hidden.id, body.clone()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(response["message"], "Not authorized to view this contract");

        let (status, response) = agree(app.clone(), &token, completed.id, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response["message"],
            "This listing is not accepting agreements"
        );

        let (status, response) = agree(app.clone(), &farmer_token, own.id, body.clone()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            response["message"],
            "You cannot create an agreement for your own listing"
        );

        let (status, _) = agree(app, &token, 42, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list() {
        let db = create_database().await;
        let (farmer, farmer_token) =
            create_user(&db, "farmer@example.com", user::Role::Farmer).await;
        let (buyer, token) = create_user(&db, "buyer@example.com", user::Role::Buyer).await;

        let contract = create_contract(&db, farmer.id, Status::Active, true).await;

        let (app, _uploads) = create_app(db, Config::for_tests());

        let (status, _) = agree(
            app.clone(),
            &token,
            contract.id,
            json!({ "quantity": 100, "agreedPrice": 75, "acceptTerms": true }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(
                authorized(&farmer_token)
                    .uri(format!("/api/v1/contracts/{}/agreements", contract.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.json().await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["results"], 1);
        assert_eq!(body["agreements"][0]["buyerId"], buyer.id);
        assert_eq!(body["agreements"][0]["buyer"]["email"], "buyer@example.com");

        let response = app
            .oneshot(
                authorized(&token)
                    .uri(format!("/api/v1/contracts/{}/agreements", contract.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.json().await["message"],
            "Not authorized to view agreements for this contract"
        );
    }
}
