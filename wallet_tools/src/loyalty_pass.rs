//! Create, patch and expire loyalty classes and objects.
//!
//! Every operation first checks whether the resource exists and then issues at most one write:
//!
//! * the lookup succeeds: `create_*` stops there ([`UpsertResult::AlreadyExists`]); `patch_*` and `expire_object`
//!   go on to patch,
//! * the lookup reports not-found: `create_*` inserts; `patch_*` and `expire_object` stop ([`UpsertResult::NotFound`]),
//! * the lookup fails for any other reason: nothing is written ([`UpsertResult::Failed`]).
//!
//! Nothing here returns an error or retries. Failures are logged and reported in the [`UpsertResult`], which always
//! carries the composed resource id.
use std::fmt::{Debug, Display};

use log::*;

use crate::{
    config::WalletConfig,
    data_objects::{
        Barcode,
        Image,
        LoyaltyClass,
        LoyaltyClassInput,
        LoyaltyObject,
        LoyaltyObjectInput,
        LoyaltyPoints,
        PassState,
        ReviewStatus,
    },
    traits::WalletObjects,
    WalletApiError,
};

/// Label of the left-hand balance column. Its value is the account id, not a points count.
pub const PRIMARY_POINTS_LABEL: &str = "Code";
/// Label of the right-hand balance column on newly created passes.
pub const NEW_SECONDARY_POINTS_LABEL: &str = "Puntos";
/// Label of the right-hand balance column after a patch.
pub const SECONDARY_POINTS_LABEL: &str = "Points";

#[derive(Debug, Clone)]
pub enum UpsertResult {
    /// The resource did not exist and was inserted.
    Created { id: String },
    /// The resource existed and was patched.
    Updated { id: String },
    /// A create was requested, but the resource already exists. Nothing was written.
    AlreadyExists { id: String },
    /// A patch was requested, but the resource does not exist. Nothing was written.
    NotFound { id: String },
    /// The lookup or the write failed.
    Failed { id: String, error: WalletApiError },
}

impl UpsertResult {
    pub fn id(&self) -> &str {
        match self {
            Self::Created { id }
            | Self::Updated { id }
            | Self::AlreadyExists { id }
            | Self::NotFound { id }
            | Self::Failed { id, .. } => id,
        }
    }

    /// True unless the operation failed. `NotFound` and `AlreadyExists` are successful no-ops.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// True if a write was made.
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Updated { .. })
    }

    pub fn error(&self) -> Option<&WalletApiError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl Display for UpsertResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created { id } => write!(f, "{id} created"),
            Self::Updated { id } => write!(f, "{id} updated"),
            Self::AlreadyExists { id } => write!(f, "{id} already exists"),
            Self::NotFound { id } => write!(f, "{id} not found"),
            Self::Failed { id, error } => write!(f, "{id} failed. {error}"),
        }
    }
}

/// Outcome of the existence check that starts every operation.
enum Lookup<T> {
    Found(T),
    Missing,
    Failed(WalletApiError),
}

impl<T> Lookup<T> {
    fn from_result(result: Result<T, WalletApiError>) -> Self {
        match result {
            Ok(v) => Lookup::Found(v),
            Err(e) if e.is_not_found() => Lookup::Missing,
            Err(e) => Lookup::Failed(e),
        }
    }
}

/// The `LoyaltyPassApi` manages the loyalty classes and objects of a single issuer.
pub struct LoyaltyPassApi<B> {
    issuer_id: String,
    backend: B,
}

impl<B: Debug> Debug for LoyaltyPassApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LoyaltyPassApi ({}, {:?})", self.issuer_id, self.backend)
    }
}

impl<B> LoyaltyPassApi<B>
where B: WalletObjects
{
    pub fn new(config: &WalletConfig, backend: B) -> Self {
        Self { issuer_id: config.issuer_id.clone(), backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn class_id(&self, class_suffix: &str) -> String {
        format!("{}.{class_suffix}", self.issuer_id)
    }

    pub fn object_id(&self, object_suffix: &str) -> String {
        format!("{}.{object_suffix}", self.issuer_id)
    }

    /// Creates the class `issuerId.class_suffix` unless it already exists. An existing class is left untouched.
    pub async fn create_class(&self, class_suffix: &str, input: &LoyaltyClassInput) -> UpsertResult {
        let id = self.class_id(class_suffix);
        match Lookup::from_result(self.backend.fetch_class(&id).await) {
            Lookup::Found(_) => {
                info!("🎫️ Class {id} already exists!");
                return UpsertResult::AlreadyExists { id };
            },
            Lookup::Failed(error) => {
                error!("🎫️ Could not check whether class {id} exists. {error}");
                return UpsertResult::Failed { id, error };
            },
            Lookup::Missing => {},
        }
        let class = class_body(&id, input);
        match self.backend.insert_class(&class).await {
            Ok(_) => {
                info!("🎫️ Class {id} created");
                UpsertResult::Created { id }
            },
            Err(error) => {
                error!("🎫️ Could not insert class {id}. {error}");
                UpsertResult::Failed { id, error }
            },
        }
    }

    /// Patches an existing class. The review status is always reset to `UNDER_REVIEW`, which the API requires for
    /// class updates.
    pub async fn patch_class(&self, class_suffix: &str, input: &LoyaltyClassInput) -> UpsertResult {
        let id = self.class_id(class_suffix);
        match Lookup::from_result(self.backend.fetch_class(&id).await) {
            Lookup::Found(_) => {},
            Lookup::Missing => {
                warn!("🎫️ Class {id} not found!");
                return UpsertResult::NotFound { id };
            },
            Lookup::Failed(error) => {
                error!("🎫️ Could not fetch class {id}. {error}");
                return UpsertResult::Failed { id, error };
            },
        }
        let patch = class_body(&id, input);
        match self.backend.patch_class(&id, &patch).await {
            Ok(_) => {
                info!("🎫️ Class {id} patched");
                UpsertResult::Updated { id }
            },
            Err(error) => {
                error!("🎫️ Could not patch class {id}. {error}");
                UpsertResult::Failed { id, error }
            },
        }
    }

    /// Creates the object `issuerId.object_suffix`, belonging to class `issuerId.class_suffix`, unless it already
    /// exists. New objects are active and start with zero points.
    pub async fn create_object(
        &self,
        class_suffix: &str,
        object_suffix: &str,
        input: &LoyaltyObjectInput,
    ) -> UpsertResult {
        let id = self.object_id(object_suffix);
        match Lookup::from_result(self.backend.fetch_object(&id).await) {
            Lookup::Found(_) => {
                info!("🎫️ Object {id} already exists!");
                return UpsertResult::AlreadyExists { id };
            },
            Lookup::Failed(error) => {
                error!("🎫️ Could not check whether object {id} exists. {error}");
                return UpsertResult::Failed { id, error };
            },
            Lookup::Missing => {},
        }
        let object = LoyaltyObject {
            id: Some(id.clone()),
            class_id: Some(self.class_id(class_suffix)),
            state: Some(PassState::Active),
            secondary_loyalty_points: Some(LoyaltyPoints::int(NEW_SECONDARY_POINTS_LABEL, 0)),
            ..account_fields(input)
        };
        match self.backend.insert_object(&object).await {
            Ok(_) => {
                info!("🎫️ Object {id} created");
                UpsertResult::Created { id }
            },
            Err(error) => {
                error!("🎫️ Could not insert object {id}. {error}");
                UpsertResult::Failed { id, error }
            },
        }
    }

    /// Updates the barcode, account details and points of an existing object. Missing points are written as zero.
    pub async fn patch_object(&self, object_suffix: &str, input: &LoyaltyObjectInput) -> UpsertResult {
        let id = self.object_id(object_suffix);
        if let Some(result) = self.ensure_object_exists(&id).await {
            return result;
        }
        let points = input.points.unwrap_or_default();
        let patch = LoyaltyObject {
            secondary_loyalty_points: Some(LoyaltyPoints::int(SECONDARY_POINTS_LABEL, points)),
            ..account_fields(input)
        };
        self.apply_object_patch(id, &patch).await
    }

    /// Marks an existing object as expired. Only the `state` field is written.
    pub async fn expire_object(&self, object_suffix: &str) -> UpsertResult {
        let id = self.object_id(object_suffix);
        if let Some(result) = self.ensure_object_exists(&id).await {
            return result;
        }
        let patch = LoyaltyObject { state: Some(PassState::Expired), ..Default::default() };
        self.apply_object_patch(id, &patch).await
    }

    /// Returns `Some(result)` if the object cannot be patched, either because it does not exist or because the lookup
    /// failed.
    async fn ensure_object_exists(&self, id: &str) -> Option<UpsertResult> {
        match Lookup::from_result(self.backend.fetch_object(id).await) {
            Lookup::Found(_) => None,
            Lookup::Missing => {
                warn!("🎫️ Object {id} not found!");
                Some(UpsertResult::NotFound { id: id.to_string() })
            },
            Lookup::Failed(error) => {
                error!("🎫️ Could not fetch object {id}. {error}");
                Some(UpsertResult::Failed { id: id.to_string(), error })
            },
        }
    }

    async fn apply_object_patch(&self, id: String, patch: &LoyaltyObject) -> UpsertResult {
        match self.backend.patch_object(&id, patch).await {
            Ok(_) => {
                info!("🎫️ Object {id} patched");
                UpsertResult::Updated { id }
            },
            Err(error) => {
                error!("🎫️ Could not patch object {id}. {error}");
                UpsertResult::Failed { id, error }
            },
        }
    }
}

fn class_body(id: &str, input: &LoyaltyClassInput) -> LoyaltyClass {
    LoyaltyClass {
        id: Some(id.to_string()),
        issuer_name: Some(input.issuer_name.clone()),
        program_name: Some(input.program_name.clone()),
        program_logo: Some(Image::from_uri(&input.logo_uri)),
        review_status: Some(ReviewStatus::UnderReview),
    }
}

/// The object fields shared by inserts and patches. The primary balance shows the account id.
fn account_fields(input: &LoyaltyObjectInput) -> LoyaltyObject {
    LoyaltyObject {
        barcode: Some(Barcode::qr_code(&input.qr_code_link)),
        account_id: Some(input.account_id.clone()),
        account_name: Some(input.full_name.clone()),
        loyalty_points: Some(LoyaltyPoints::string(PRIMARY_POINTS_LABEL, &input.account_id)),
        ..Default::default()
    }
}
