use serde::{Deserialize, Serialize};

//--------------------------------------  Caller input  ----------------------------------------------------------------

/// The properties of a loyalty class that callers control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyClassInput {
    pub program_name: String,
    pub issuer_name: String,
    pub logo_uri: String,
}

/// The properties of a loyalty object that callers control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyObjectInput {
    /// Encoded into the pass's QR code.
    pub qr_code_link: String,
    pub account_id: String,
    pub full_name: String,
    /// Only used when patching. New objects always start with zero points.
    pub points: Option<i64>,
}

//--------------------------------------  Wire resources  --------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[serde(alias = "underReview")]
    UnderReview,
    #[serde(alias = "draft")]
    Draft,
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "rejected")]
    Rejected,
    #[serde(other)]
    ReviewStatusUnspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassState {
    #[serde(alias = "active")]
    Active,
    #[serde(alias = "expired")]
    Expired,
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "inactive")]
    Inactive,
    #[serde(other)]
    StateUnspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarcodeType {
    #[serde(alias = "qrCode")]
    QrCode,
    #[serde(other)]
    BarcodeTypeUnspecified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barcode {
    #[serde(rename = "type")]
    pub kind: BarcodeType,
    pub value: String,
}

impl Barcode {
    pub fn qr_code(value: &str) -> Self {
        Self { kind: BarcodeType::QrCode, value: value.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUri {
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub source_uri: ImageUri,
}

impl Image {
    pub fn from_uri(uri: &str) -> Self {
        Self { source_uri: ImageUri { uri: uri.to_string() } }
    }
}

/// A points balance is either a string or an int. The wire format is `{"string": "..."}` or `{"int": 123}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyPointsBalance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyPoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<LoyaltyPointsBalance>,
}

impl LoyaltyPoints {
    pub fn string(label: &str, value: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            balance: Some(LoyaltyPointsBalance { string: Some(value.to_string()), int: None }),
        }
    }

    pub fn int(label: &str, value: i64) -> Self {
        Self { label: Some(label.to_string()), balance: Some(LoyaltyPointsBalance { string: None, int: Some(value) }) }
    }
}

/// A loyalty class resource. Only the fields this crate reads or writes are modelled; anything else the API returns
/// is ignored. Unset fields are left out of request bodies, so a value of this type doubles as a PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyClass {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_logo: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,
}

/// A loyalty object resource (a single cardholder's pass). As with [`LoyaltyClass`], only the fields this crate touches
/// are modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PassState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_points: Option<LoyaltyPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_loyalty_points: Option<LoyaltyPoints>,
}
