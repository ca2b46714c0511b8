use std::collections::HashMap;

use axum::http::StatusCode;
use db::{
    contract::{self, Blockchain, EscrowPercentage, Status},
    ActiveValue, Date,
};
use derive_more::{Display, Error};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use time::macros::format_description;

use crate::error::ResponseError;

static PIN_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[1-9][0-9]{5}$").expect("invalid regex string"));

static IFSC_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Z]{4}0[A-Z0-9]{6}$").expect("invalid regex string"));

/// Listing form validation error.
///
/// Carries every problem found, joined into a single message.
#[derive(Debug, Display, Error)]
#[display(fmt = "{}", _0)]
pub(crate) struct ContractValidationError(#[error(not(source))] String);

impl ResponseError for ContractValidationError {
    fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Parse a `YYYY-MM-DD` date, ignoring any time part.
pub(crate) fn parse_date(value: &str) -> Option<Date> {
    let date = value.split('T').next().unwrap_or(value);

    Date::parse(date, format_description!("[year]-[month]-[day]")).ok()
}

/// Listing that is being created or updated.
///
/// A draft starts either from listing defaults or from an existing listing,
/// receives submitted form fields and is validated as a whole afterwards.
#[derive(Debug, Clone)]
pub(crate) struct ContractDraft {
    pub crop_name: Option<String>,
    pub crop_variety: Option<String>,
    pub crop_category: Option<String>,
    pub quantity: Option<f64>,
    pub quantity_unit: String,
    pub expected_yield_date: Option<Date>,
    pub sowing_date: Option<Date>,

    pub address: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
    pub pin_code: Option<String>,
    pub farm_area: Option<f64>,
    pub area_unit: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,

    pub expected_price: Option<f64>,
    pub min_price: Option<f64>,
    pub requires_advance: bool,
    pub advance_amount: Option<f64>,
    pub payment_mode: Option<String>,
    pub preferred_buyer_type: Option<String>,

    pub contract_duration: Option<String>,
    pub delivery_responsibility: Option<String>,
    pub delivery_location: Option<String>,
    pub penalty_clauses: Option<String>,

    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_holder_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub upi_id: Option<String>,

    pub use_smart_contract: bool,
    pub wallet_address: Option<String>,
    pub preferred_blockchain: Option<Blockchain>,
    pub escrow_required: bool,
    pub escrow_percentage: Option<EscrowPercentage>,
    pub automatic_payout: bool,

    pub images: Vec<String>,
    pub id_proof_document: Option<String>,
    pub land_proof_document: Option<String>,

    pub status: Status,
    pub allow_visibility: bool,
}

impl Default for ContractDraft {
    fn default() -> Self {
        Self {
            crop_name: None,
            crop_variety: None,
            crop_category: None,
            quantity: None,
            quantity_unit: String::from("kg"),
            expected_yield_date: None,
            sowing_date: None,
            address: None,
            state: None,
            district: None,
            village: None,
            pin_code: None,
            farm_area: None,
            area_unit: String::from("acres"),
            latitude: None,
            longitude: None,
            expected_price: None,
            min_price: None,
            requires_advance: false,
            advance_amount: None,
            payment_mode: None,
            preferred_buyer_type: None,
            contract_duration: None,
            delivery_responsibility: None,
            delivery_location: None,
            penalty_clauses: None,
            bank_name: None,
            account_number: None,
            account_holder_name: None,
            ifsc_code: None,
            upi_id: None,
            use_smart_contract: false,
            wallet_address: None,
            preferred_blockchain: Some(Blockchain::default()),
            escrow_required: false,
            escrow_percentage: Some(EscrowPercentage::default()),
            automatic_payout: true,
            images: Vec::new(),
            id_proof_document: None,
            land_proof_document: None,
            status: Status::Active,
            allow_visibility: true,
        }
    }
}

impl ContractDraft {
    /// Start a draft from an existing listing and its images.
    pub fn from_model(model: &contract::Model, images: Vec<String>) -> Self {
        Self {
            crop_name: Some(model.crop_name.clone()),
            crop_variety: model.crop_variety.clone(),
            crop_category: Some(model.crop_category.clone()),
            quantity: Some(model.quantity),
            quantity_unit: model.quantity_unit.clone(),
            expected_yield_date: Some(model.expected_yield_date),
            sowing_date: model.sowing_date,
            address: Some(model.address.clone()),
            state: Some(model.state.clone()),
            district: Some(model.district.clone()),
            village: Some(model.village.clone()),
            pin_code: Some(model.pin_code.clone()),
            farm_area: Some(model.farm_area),
            area_unit: model.area_unit.clone(),
            latitude: model.latitude.clone(),
            longitude: model.longitude.clone(),
            expected_price: Some(model.expected_price),
            min_price: Some(model.min_price),
            requires_advance: model.requires_advance,
            advance_amount: model.advance_amount,
            payment_mode: Some(model.payment_mode.clone()),
            preferred_buyer_type: Some(model.preferred_buyer_type.clone()),
            contract_duration: Some(model.contract_duration.clone()),
            delivery_responsibility: Some(model.delivery_responsibility.clone()),
            delivery_location: Some(model.delivery_location.clone()),
            penalty_clauses: model.penalty_clauses.clone(),
            bank_name: Some(model.bank_name.clone()),
            account_number: Some(model.account_number.clone()),
            account_holder_name: Some(model.account_holder_name.clone()),
            ifsc_code: Some(model.ifsc_code.clone()),
            upi_id: model.upi_id.clone(),
            use_smart_contract: model.use_smart_contract,
            wallet_address: model.wallet_address.clone(),
            preferred_blockchain: model.preferred_blockchain,
            escrow_required: model.escrow_required,
            escrow_percentage: model.escrow_percentage,
            automatic_payout: model.automatic_payout,
            images,
            id_proof_document: Some(model.id_proof_document.clone()),
            land_proof_document: model.land_proof_document.clone(),
            status: model.status,
            allow_visibility: model.allow_visibility,
        }
    }

    /// Apply submitted text fields.
    ///
    /// Fields that were not submitted keep their current values, while empty
    /// ones clear them.
    pub fn apply(&mut self, fields: &HashMap<String, String>) -> Result<(), ContractValidationError> {
        let form = FormFields(fields);

        form.text("cropName", &mut self.crop_name);
        form.text("cropVariety", &mut self.crop_variety);
        form.text("cropCategory", &mut self.crop_category);
        form.number("quantity", &mut self.quantity)?;
        form.unit("quantityUnit", &mut self.quantity_unit);
        form.date("expectedYieldDate", &mut self.expected_yield_date)?;
        form.date("sowingDate", &mut self.sowing_date)?;

        form.text("address", &mut self.address);
        form.text("state", &mut self.state);
        form.text("district", &mut self.district);
        form.text("village", &mut self.village);
        form.text("pinCode", &mut self.pin_code);
        form.number("farmArea", &mut self.farm_area)?;
        form.unit("areaUnit", &mut self.area_unit);
        form.text("latitude", &mut self.latitude);
        form.text("longitude", &mut self.longitude);

        form.number("expectedPrice", &mut self.expected_price)?;
        form.number("minPrice", &mut self.min_price)?;
        form.flag("requiresAdvance", &mut self.requires_advance)?;
        form.number("advanceAmount", &mut self.advance_amount)?;
        form.text("paymentMode", &mut self.payment_mode);
        form.text("preferredBuyerType", &mut self.preferred_buyer_type);

        form.text("contractDuration", &mut self.contract_duration);
        form.text("deliveryResponsibility", &mut self.delivery_responsibility);
        form.text("deliveryLocation", &mut self.delivery_location);
        form.text("penaltyClauses", &mut self.penalty_clauses);

        form.text("bankName", &mut self.bank_name);
        form.text("accountNumber", &mut self.account_number);
        form.text("accountHolderName", &mut self.account_holder_name);
        form.text("ifscCode", &mut self.ifsc_code);
        form.text("upiId", &mut self.upi_id);

        form.flag("useSmartContract", &mut self.use_smart_contract)?;
        form.text("walletAddress", &mut self.wallet_address);
        form.choice("preferredBlockchain", &mut self.preferred_blockchain)?;
        form.flag("escrowRequired", &mut self.escrow_required)?;
        form.choice("escrowPercentage", &mut self.escrow_percentage)?;
        form.flag("automaticPayout", &mut self.automatic_payout)?;

        let mut status = Some(self.status);
        form.choice("status", &mut status)?;
        self.status = status.unwrap_or_default();

        form.flag("allowVisibility", &mut self.allow_visibility)?;

        Ok(())
    }

    /// Public paths of every file the draft references.
    pub fn files(&self) -> impl Iterator<Item = &String> {
        self.images
            .iter()
            .chain(self.id_proof_document.as_ref())
            .chain(self.land_proof_document.as_ref())
    }

    /// Validate the draft and convert it into a listing model.
    ///
    /// Owner, identifier and creation timestamp are left for the caller to fill in.
    pub fn build(self) -> Result<(contract::ActiveModel, Vec<String>), ContractValidationError> {
        let mut draft = self;

        if draft.use_smart_contract && !draft.escrow_required {
            draft.escrow_percentage = None;
        }

        let mut errors = Vec::new();

        let crop_name = required(&mut errors, draft.crop_name, "Crop name is required");
        let crop_category = required(&mut errors, draft.crop_category, "Crop category is required");
        let quantity = required(&mut errors, draft.quantity, "Quantity is required");
        let expected_yield_date = draft.expected_yield_date.unwrap_or_else(|| {
            errors.push(String::from("Expected yield date is required"));
            Date::MIN
        });

        let address = required(&mut errors, draft.address, "Address is required");
        let state = required(&mut errors, draft.state, "State is required");
        let district = required(&mut errors, draft.district, "District is required");
        let village = required(&mut errors, draft.village, "Village is required");
        let pin_code = required(&mut errors, draft.pin_code, "Pin code is required");
        let farm_area = required(&mut errors, draft.farm_area, "Farm area is required");

        let expected_price = required(&mut errors, draft.expected_price, "Expected price is required");
        let min_price = required(&mut errors, draft.min_price, "Minimum price is required");
        let payment_mode = required(&mut errors, draft.payment_mode, "Payment mode is required");
        let preferred_buyer_type = required(
            &mut errors,
            draft.preferred_buyer_type,
            "Preferred buyer type is required",
        );

        let contract_duration = required(
            &mut errors,
            draft.contract_duration,
            "Contract duration is required",
        );
        let delivery_responsibility = required(
            &mut errors,
            draft.delivery_responsibility,
            "Delivery responsibility is required",
        );
        let delivery_location = required(
            &mut errors,
            draft.delivery_location,
            "Delivery location is required",
        );

        let bank_name = required(&mut errors, draft.bank_name, "Bank name is required");
        let account_number = required(&mut errors, draft.account_number, "Account number is required");
        let account_holder_name = required(
            &mut errors,
            draft.account_holder_name,
            "Account holder name is required",
        );
        let ifsc_code = required(&mut errors, draft.ifsc_code, "IFSC code is required").to_uppercase();

        let id_proof_document = required(
            &mut errors,
            draft.id_proof_document,
            "ID proof document is required",
        );

        for (value, name) in [
            (Some(quantity), "Quantity"),
            (Some(farm_area), "Farm area"),
            (Some(expected_price), "Expected price"),
            (Some(min_price), "Minimum price"),
            (draft.advance_amount, "Advance amount"),
        ] {
            if value.map_or(false, |value| value < 0.0) {
                errors.push(format!("{name} cannot be negative"));
            }
        }

        if !pin_code.is_empty() && !PIN_CODE.is_match(&pin_code) {
            errors.push(String::from("Pin code must be a valid 6-digit PIN code"));
        }

        if !ifsc_code.is_empty() && !IFSC_CODE.is_match(&ifsc_code) {
            errors.push(String::from("IFSC code is invalid"));
        }

        if draft.use_smart_contract {
            if draft.wallet_address.is_none() {
                errors.push(String::from("Wallet address is required for smart contracts"));
            }

            if draft.preferred_blockchain.is_none() {
                errors.push(String::from(
                    "Preferred blockchain is required for smart contracts",
                ));
            }
        }

        if draft.escrow_required && draft.escrow_percentage.is_none() {
            errors.push(String::from(
                "Escrow percentage is required when escrow is enabled",
            ));
        }

        if !errors.is_empty() {
            return Err(ContractValidationError(errors.join(", ")));
        }

        let model = contract::ActiveModel {
            crop_name: ActiveValue::Set(crop_name),
            crop_variety: ActiveValue::Set(draft.crop_variety),
            crop_category: ActiveValue::Set(crop_category),
            quantity: ActiveValue::Set(quantity),
            quantity_unit: ActiveValue::Set(draft.quantity_unit),
            expected_yield_date: ActiveValue::Set(expected_yield_date),
            sowing_date: ActiveValue::Set(draft.sowing_date),
            address: ActiveValue::Set(address),
            state: ActiveValue::Set(state),
            district: ActiveValue::Set(district),
            village: ActiveValue::Set(village),
            pin_code: ActiveValue::Set(pin_code),
            farm_area: ActiveValue::Set(farm_area),
            area_unit: ActiveValue::Set(draft.area_unit),
            latitude: ActiveValue::Set(draft.latitude),
            longitude: ActiveValue::Set(draft.longitude),
            expected_price: ActiveValue::Set(expected_price),
            min_price: ActiveValue::Set(min_price),
            requires_advance: ActiveValue::Set(draft.requires_advance),
            advance_amount: ActiveValue::Set(draft.advance_amount),
            payment_mode: ActiveValue::Set(payment_mode),
            preferred_buyer_type: ActiveValue::Set(preferred_buyer_type),
            contract_duration: ActiveValue::Set(contract_duration),
            delivery_responsibility: ActiveValue::Set(delivery_responsibility),
            delivery_location: ActiveValue::Set(delivery_location),
            penalty_clauses: ActiveValue::Set(draft.penalty_clauses),
            bank_name: ActiveValue::Set(bank_name),
            account_number: ActiveValue::Set(account_number),
            account_holder_name: ActiveValue::Set(account_holder_name),
            ifsc_code: ActiveValue::Set(ifsc_code),
            upi_id: ActiveValue::Set(draft.upi_id),
            use_smart_contract: ActiveValue::Set(draft.use_smart_contract),
            wallet_address: ActiveValue::Set(draft.wallet_address),
            preferred_blockchain: ActiveValue::Set(draft.preferred_blockchain),
            escrow_required: ActiveValue::Set(draft.escrow_required),
            escrow_percentage: ActiveValue::Set(draft.escrow_percentage),
            automatic_payout: ActiveValue::Set(draft.automatic_payout),
            id_proof_document: ActiveValue::Set(id_proof_document),
            land_proof_document: ActiveValue::Set(draft.land_proof_document),
            status: ActiveValue::Set(draft.status),
            allow_visibility: ActiveValue::Set(draft.allow_visibility),
            updated_at: ActiveValue::Set(db::now()),
            ..Default::default()
        };

        Ok((model, draft.images))
    }
}

fn required<T: Default>(errors: &mut Vec<String>, value: Option<T>, message: &str) -> T {
    value.unwrap_or_else(|| {
        errors.push(message.to_string());
        T::default()
    })
}

/// Submitted text fields of a listing form.
struct FormFields<'a>(&'a HashMap<String, String>);

impl FormFields<'_> {
    fn value(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|value| value.trim())
    }

    fn text(&self, name: &str, target: &mut Option<String>) {
        if let Some(value) = self.value(name) {
            *target = Some(value)
                .filter(|value| !value.is_empty())
                .map(str::to_string);
        }
    }

    /// Units fall back to their current value when left empty.
    fn unit(&self, name: &str, target: &mut String) {
        if let Some(value) = self.value(name).filter(|value| !value.is_empty()) {
            *target = value.to_string();
        }
    }

    fn number(&self, name: &str, target: &mut Option<f64>) -> Result<(), ContractValidationError> {
        let Some(value) = self.value(name) else {
            return Ok(());
        };

        if value.is_empty() {
            *target = None;
            return Ok(());
        }

        match serde_plain::from_str::<f64>(value) {
            Ok(number) if number.is_finite() => {
                *target = Some(number);
                Ok(())
            }
            _ => Err(ContractValidationError(format!("{name} must be a number"))),
        }
    }

    fn date(&self, name: &str, target: &mut Option<Date>) -> Result<(), ContractValidationError> {
        let Some(value) = self.value(name) else {
            return Ok(());
        };

        if value.is_empty() {
            *target = None;
            return Ok(());
        }

        *target = Some(
            parse_date(value)
                .ok_or_else(|| ContractValidationError(format!("{name} must be a valid date")))?,
        );

        Ok(())
    }

    fn flag(&self, name: &str, target: &mut bool) -> Result<(), ContractValidationError> {
        *target = match self.value(name).map(str::to_ascii_lowercase).as_deref() {
            None | Some("") => return Ok(()),
            Some("true" | "1" | "yes" | "on") => true,
            Some("false" | "0" | "no" | "off") => false,
            Some(_) => {
                return Err(ContractValidationError(format!(
                    "{name} must be true or false"
                )))
            }
        };

        Ok(())
    }

    fn choice<T: DeserializeOwned>(
        &self,
        name: &str,
        target: &mut Option<T>,
    ) -> Result<(), ContractValidationError> {
        let Some(value) = self.value(name) else {
            return Ok(());
        };

        if value.is_empty() {
            *target = None;
            return Ok(());
        }

        *target = Some(
            serde_plain::from_str(value)
                .map_err(|_| ContractValidationError(format!("{name} has an invalid value")))?,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use db::{
        contract::{Blockchain, EscrowPercentage, Status},
        ActiveValue,
    };
    use time::macros::date;

    use super::{parse_date, ContractDraft};

    fn fields(values: &[(&str, &str)]) -> HashMap<String, String> {
        values
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn complete_fields() -> HashMap<String, String> {
        fields(&[
            ("cropName", "Wheat"),
            ("cropCategory", "Grains"),
            ("quantity", "1000"),
            ("expectedYieldDate", "2030-03-15"),
            ("address", "12 Canal Road"),
            ("state", "Punjab"),
            ("district", "Ludhiana"),
            ("village", "Khanna"),
            ("pinCode", "141401"),
            ("farmArea", "5.5"),
            ("expectedPrice", "25"),
            ("minPrice", "20"),
            ("paymentMode", "Bank Transfer"),
            ("preferredBuyerType", "Wholesaler"),
            ("contractDuration", "6 months"),
            ("deliveryResponsibility", "Farmer"),
            ("deliveryLocation", "Khanna Mandi"),
            ("bankName", "State Bank of India"),
            ("accountNumber", "12345678901"),
            ("accountHolderName", "Ramesh Kumar"),
            ("ifscCode", "sbin0001234"),
        ])
    }

    fn complete_draft() -> ContractDraft {
        let mut draft = ContractDraft {
            id_proof_document: Some(String::from("uploads/aadhaar.pdf")),
            ..Default::default()
        };

        draft.apply(&complete_fields()).unwrap();
        draft
    }

    #[test]
    fn dates() {
        assert_eq!(parse_date("2030-03-15"), Some(date!(2030 - 03 - 15)));
        assert_eq!(
            parse_date("2030-03-15T00:00:00.000Z"),
            Some(date!(2030 - 03 - 15))
        );
        assert_eq!(parse_date("15/03/2030"), None);
        assert_eq!(parse_date("2030-02-30"), None);
    }

    #[test]
    fn defaults() {
        let (model, images) = complete_draft().build().unwrap();

        assert!(images.is_empty());
        assert_eq!(model.quantity_unit, ActiveValue::Set(String::from("kg")));
        assert_eq!(model.area_unit, ActiveValue::Set(String::from("acres")));
        assert_eq!(model.farm_area, ActiveValue::Set(5.5));
        assert_eq!(
            model.expected_yield_date,
            ActiveValue::Set(date!(2030 - 03 - 15))
        );
        assert_eq!(model.ifsc_code, ActiveValue::Set(String::from("SBIN0001234")));
        assert_eq!(model.status, ActiveValue::Set(Status::Active));
        assert_eq!(
            model.preferred_blockchain,
            ActiveValue::Set(Some(Blockchain::Polygon))
        );
        assert_eq!(
            model.escrow_percentage,
            ActiveValue::Set(Some(EscrowPercentage::Ten))
        );
        assert_eq!(model.automatic_payout, ActiveValue::Set(true));
        assert_eq!(model.allow_visibility, ActiveValue::Set(true));
    }

    #[test]
    fn missing_fields() {
        let mut draft = ContractDraft::default();

        draft
            .apply(&fields(&[("cropName", "  "), ("cropCategory", "Grains")]))
            .unwrap();

        let err = draft.build().unwrap_err().to_string();

        assert!(err.starts_with("Crop name is required, Quantity is required"));
        assert!(!err.contains("Crop category"));
        assert!(err.ends_with("ID proof document is required"));
    }

    #[test]
    fn invalid_values() {
        let mut draft = complete_draft();

        assert_eq!(
            draft
                .apply(&fields(&[("quantity", "a lot")]))
                .unwrap_err()
                .to_string(),
            "quantity must be a number"
        );

        assert_eq!(
            draft
                .apply(&fields(&[("preferredBlockchain", "Bitcoin")]))
                .unwrap_err()
                .to_string(),
            "preferredBlockchain has an invalid value"
        );

        assert_eq!(
            draft
                .apply(&fields(&[("useSmartContract", "maybe")]))
                .unwrap_err()
                .to_string(),
            "useSmartContract must be true or false"
        );

        let mut draft = complete_draft();

        draft
            .apply(&fields(&[
                ("minPrice", "-1"),
                ("pinCode", "041401"),
                ("ifscCode", "SBI0001234"),
            ]))
            .unwrap();

        assert_eq!(
            draft.build().unwrap_err().to_string(),
            "Minimum price cannot be negative, Pin code must be a valid 6-digit PIN code, IFSC code is invalid"
        );
    }

    #[test]
    fn smart_contract_requirements() {
        let mut draft = complete_draft();

        draft
            .apply(&fields(&[
                ("useSmartContract", "true"),
                ("preferredBlockchain", ""),
            ]))
            .unwrap();

        assert_eq!(
            draft.build().unwrap_err().to_string(),
            "Wallet address is required for smart contracts, Preferred blockchain is required for smart contracts"
        );

        let mut draft = complete_draft();

        draft
            .apply(&fields(&[
                ("useSmartContract", "on"),
                ("walletAddress", "0xabc"),
                ("preferredBlockchain", "Binance Smart Chain"),
                ("escrowPercentage", "25"),
            ]))
            .unwrap();

        let (model, _) = draft.build().unwrap();

        assert_eq!(
            model.preferred_blockchain,
            ActiveValue::Set(Some(Blockchain::BinanceSmartChain))
        );
        assert_eq!(model.escrow_percentage, ActiveValue::Set(None));
    }

    #[test]
    fn escrow_requirements() {
        let mut draft = complete_draft();

        draft
            .apply(&fields(&[
                ("useSmartContract", "true"),
                ("walletAddress", "0xabc"),
                ("escrowRequired", "true"),
                ("escrowPercentage", ""),
            ]))
            .unwrap();

        assert_eq!(
            draft.build().unwrap_err().to_string(),
            "Escrow percentage is required when escrow is enabled"
        );

        let mut draft = complete_draft();

        draft
            .apply(&fields(&[
                ("useSmartContract", "true"),
                ("walletAddress", "0xabc"),
                ("escrowRequired", "1"),
                ("escrowPercentage", "15"),
            ]))
            .unwrap();

        let (model, _) = draft.build().unwrap();

        assert_eq!(
            model.escrow_percentage,
            ActiveValue::Set(Some(EscrowPercentage::Fifteen))
        );
    }

    #[test]
    fn referenced_files() {
        let mut draft = complete_draft();
        draft.images = vec![String::from("uploads/a.png"), String::from("uploads/b.png")];
        draft.land_proof_document = Some(String::from("uploads/land.pdf"));

        let files: Vec<&String> = draft.files().collect();

        assert_eq!(
            files,
            [
                "uploads/a.png",
                "uploads/b.png",
                "uploads/aadhaar.pdf",
                "uploads/land.pdf"
            ]
        );
    }
}
