//! The lookup-failure and write-failure branches of the upsert flows. None of them may write, panic or return an
//! error; the failure is reported in the result instead.
use mockall::{mock, predicate::eq};
use wallet_tools::{
    data_objects::{LoyaltyClass, LoyaltyClassInput, LoyaltyObject, LoyaltyObjectInput, PassState},
    test_utils::{prepare_test_env, test_config},
    LoyaltyPassApi,
    UpsertResult,
    WalletApiError,
    WalletObjects,
};

mock! {
    pub Wallet {}
    impl WalletObjects for Wallet {
        async fn fetch_class(&self, resource_id: &str) -> Result<LoyaltyClass, WalletApiError>;
        async fn insert_class(&self, class: &LoyaltyClass) -> Result<LoyaltyClass, WalletApiError>;
        async fn patch_class(&self, resource_id: &str, patch: &LoyaltyClass) -> Result<LoyaltyClass, WalletApiError>;
        async fn fetch_object(&self, resource_id: &str) -> Result<LoyaltyObject, WalletApiError>;
        async fn insert_object(&self, object: &LoyaltyObject) -> Result<LoyaltyObject, WalletApiError>;
        async fn patch_object(&self, resource_id: &str, patch: &LoyaltyObject) -> Result<LoyaltyObject, WalletApiError>;
    }
}

const CLASS_ID: &str = "3388000000022222222.my-loyalty-class";
const OBJECT_ID: &str = "3388000000022222222.my-loyalty-object";

fn server_error() -> WalletApiError {
    WalletApiError::QueryError { status: 503, message: "Backend unavailable".to_string() }
}

fn api(mock: MockWallet) -> LoyaltyPassApi<MockWallet> {
    prepare_test_env();
    LoyaltyPassApi::new(&test_config(), mock)
}

fn object_input() -> LoyaltyObjectInput {
    LoyaltyObjectInput {
        qr_code_link: "https://example.com/qr".to_string(),
        account_id: "SQ-13579A".to_string(),
        full_name: "John Doe".to_string(),
        points: Some(10),
    }
}

fn assert_failed_with_server_error(result: &UpsertResult, id: &str) {
    assert_eq!(result.id(), id);
    assert!(!result.is_success());
    assert!(!result.wrote());
    match result.error() {
        Some(WalletApiError::QueryError { status, .. }) => assert_eq!(*status, 503),
        other => panic!("Expected a 503 QueryError, got {other:?}"),
    }
}

#[tokio::test]
async fn create_class_lookup_failure_does_not_insert() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_class().with(eq(CLASS_ID)).times(1).returning(|_| Err(server_error()));
    mock.expect_insert_class().never();
    let result = api(mock).create_class("my-loyalty-class", &LoyaltyClassInput::default()).await;
    assert_failed_with_server_error(&result, CLASS_ID);
}

#[tokio::test]
async fn create_class_insert_failure_is_reported() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_class().returning(|id| Err(WalletApiError::NotFound(id.to_string())));
    mock.expect_insert_class().times(1).returning(|_| Err(server_error()));
    let result = api(mock).create_class("my-loyalty-class", &LoyaltyClassInput::default()).await;
    assert_failed_with_server_error(&result, CLASS_ID);
}

#[tokio::test]
async fn create_class_sends_full_body() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_class().returning(|id| Err(WalletApiError::NotFound(id.to_string())));
    mock.expect_insert_class()
        .withf(|class| {
            class.id.as_deref() == Some(CLASS_ID) &&
                class.program_name.as_deref() == Some("Program") &&
                class.review_status.is_some()
        })
        .times(1)
        .returning(|class| Ok(class.clone()));
    let input = LoyaltyClassInput { program_name: "Program".into(), ..Default::default() };
    let result = api(mock).create_class("my-loyalty-class", &input).await;
    assert!(matches!(result, UpsertResult::Created { .. }));
}

#[tokio::test]
async fn patch_class_lookup_failure_does_not_patch() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_class().times(1).returning(|_| Err(server_error()));
    mock.expect_patch_class().never();
    let result = api(mock).patch_class("my-loyalty-class", &LoyaltyClassInput::default()).await;
    assert_failed_with_server_error(&result, CLASS_ID);
}

#[tokio::test]
async fn patch_class_write_failure_is_reported() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_class().returning(|_| Ok(LoyaltyClass::default()));
    mock.expect_patch_class().with(eq(CLASS_ID), mockall::predicate::always()).times(1).returning(|_, _| {
        Err(server_error())
    });
    let result = api(mock).patch_class("my-loyalty-class", &LoyaltyClassInput::default()).await;
    assert_failed_with_server_error(&result, CLASS_ID);
}

#[tokio::test]
async fn create_object_lookup_failure_does_not_insert() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_object().with(eq(OBJECT_ID)).times(1).returning(|_| Err(server_error()));
    mock.expect_insert_object().never();
    let result = api(mock).create_object("my-loyalty-class", "my-loyalty-object", &object_input()).await;
    assert_failed_with_server_error(&result, OBJECT_ID);
}

#[tokio::test]
async fn create_object_insert_failure_is_reported() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_object().returning(|id| Err(WalletApiError::NotFound(id.to_string())));
    mock.expect_insert_object()
        .withf(|object| object.id.as_deref() == Some(OBJECT_ID) && object.class_id.as_deref() == Some(CLASS_ID))
        .times(1)
        .returning(|_| Err(server_error()));
    let result = api(mock).create_object("my-loyalty-class", "my-loyalty-object", &object_input()).await;
    assert_failed_with_server_error(&result, OBJECT_ID);
}

#[tokio::test]
async fn patch_object_write_failure_is_reported() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_object().returning(|_| Ok(LoyaltyObject::default()));
    mock.expect_patch_object()
        .withf(|id, patch| id == OBJECT_ID && patch.account_name.as_deref() == Some("John Doe"))
        .times(1)
        .returning(|_, _| Err(server_error()));
    let result = api(mock).patch_object("my-loyalty-object", &object_input()).await;
    assert_failed_with_server_error(&result, OBJECT_ID);
}

#[tokio::test]
async fn patch_object_lookup_failure_does_not_patch() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_object().times(1).returning(|_| Err(server_error()));
    mock.expect_patch_object().never();
    let result = api(mock).patch_object("my-loyalty-object", &object_input()).await;
    assert_failed_with_server_error(&result, OBJECT_ID);
}

#[tokio::test]
async fn expire_object_lookup_failure_does_not_patch() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_object().times(1).returning(|_| Err(server_error()));
    mock.expect_patch_object().never();
    let result = api(mock).expire_object("my-loyalty-object").await;
    assert_failed_with_server_error(&result, OBJECT_ID);
}

#[tokio::test]
async fn expire_object_sends_only_the_state() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_object().returning(|_| Ok(LoyaltyObject::default()));
    mock.expect_patch_object()
        .withf(|id, patch| {
            id == OBJECT_ID && *patch == LoyaltyObject { state: Some(PassState::Expired), ..Default::default() }
        })
        .times(1)
        .returning(|_, patch| Ok(patch.clone()));
    let result = api(mock).expire_object("my-loyalty-object").await;
    assert!(matches!(result, UpsertResult::Updated { .. }));
}

#[tokio::test]
async fn expire_object_write_failure_is_reported() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_object().returning(|_| Ok(LoyaltyObject::default()));
    mock.expect_patch_object().times(1).returning(|_, _| Err(server_error()));
    let result = api(mock).expire_object("my-loyalty-object").await;
    assert_failed_with_server_error(&result, OBJECT_ID);
}

#[tokio::test]
async fn auth_failures_are_remote_errors() {
    let mut mock = MockWallet::new();
    mock.expect_fetch_object().returning(|_| Err(WalletApiError::AuthError("invalid_grant".to_string())));
    mock.expect_insert_object().never();
    let result = api(mock).create_object("c", "o", &object_input()).await;
    assert!(matches!(result.error(), Some(WalletApiError::AuthError(_))));
    assert_eq!(result.id(), "3388000000022222222.o");
}
