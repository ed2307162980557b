use anyhow::{anyhow, Result};
use log::*;
use wallet_tools::{
    data_objects::{LoyaltyClassInput, LoyaltyObjectInput},
    DeepLinkIssuer,
    LoyaltyPassApi,
    UpsertResult,
    WalletConfig,
    WalletObjectsApi,
};

use crate::{ClassParams, CreateObjectParams, PassParams, PatchObjectParams};

const DEMO_LOGO_URI: &str = concat!(
    "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c1/",
    "Google_%22G%22_logo.svg/150px-Google_%22G%22_logo.svg.png"
);
const DEMO_RENEWED_LOGO_URI: &str = "https://upload.wikimedia.org/wikipedia/commons/f/fa/Apple_logo_black.svg";
const DEMO_QR_CODE_LINK: &str = "https://www.qrstuff.com/images/default_qrcode.png";

pub enum UpsertCommand {
    CreateClass(ClassParams),
    PatchClass(ClassParams),
    CreateObject(CreateObjectParams),
    PatchObject(PatchObjectParams),
    ExpireObject(String),
}

fn load_config() -> Result<WalletConfig> {
    WalletConfig::try_from_env().map_err(|e| anyhow!("{e} Run `loyaltytools env` to check your configuration."))
}

fn passes_api(config: &WalletConfig) -> Result<LoyaltyPassApi<WalletObjectsApi>> {
    let client = WalletObjectsApi::new(config)?;
    Ok(LoyaltyPassApi::new(config, client))
}

fn class_input(params: &ClassParams) -> LoyaltyClassInput {
    LoyaltyClassInput {
        program_name: params.program_name.clone(),
        issuer_name: params.issuer_name.clone(),
        logo_uri: params.logo_uri.clone(),
    }
}

fn object_input(params: &PassParams, points: Option<i64>) -> LoyaltyObjectInput {
    LoyaltyObjectInput {
        qr_code_link: params.qr_code_link.clone(),
        account_id: params.account_id.clone(),
        full_name: params.full_name.clone(),
        points,
    }
}

pub async fn run_upsert(command: UpsertCommand) -> Result<()> {
    let config = load_config()?;
    let api = passes_api(&config)?;
    let result = match command {
        UpsertCommand::CreateClass(p) => api.create_class(&p.class_suffix, &class_input(&p)).await,
        UpsertCommand::PatchClass(p) => api.patch_class(&p.class_suffix, &class_input(&p)).await,
        UpsertCommand::CreateObject(p) => {
            api.create_object(&p.class_suffix, &p.object_suffix, &object_input(&p.pass, None)).await
        },
        UpsertCommand::PatchObject(p) => {
            api.patch_object(&p.object_suffix, &object_input(&p.pass, Some(p.points))).await
        },
        UpsertCommand::ExpireObject(object_suffix) => api.expire_object(&object_suffix).await,
    };
    report(&result)
}

fn report(result: &UpsertResult) -> Result<()> {
    println!("{result}");
    match result.error() {
        Some(e) => Err(anyhow!("Operation on {} failed. {e}", result.id())),
        None => Ok(()),
    }
}

pub fn print_save_link(class_suffix: &str, object_suffix: &str) -> Result<()> {
    let config = load_config()?;
    let issuer = DeepLinkIssuer::new(&config)?;
    let link = issuer.create_jwt_existing_object(class_suffix, object_suffix)?;
    println!("------------------------- Add to Google Wallet -------------------------");
    println!("class:  {}", config.resource_id(class_suffix));
    println!("object: {}", config.resource_id(object_suffix));
    println!("link:\n{link}");
    println!("------------------------------------------------------------------------");
    Ok(())
}

/// Walks a demo class and pass through their whole lifecycle: create both, issue a link, update both, and finally
/// expire the pass. Failures are reported, but don't stop the remaining steps.
pub async fn run_demo(class_suffix: &str, object_suffix: &str) -> Result<()> {
    let config = load_config()?;
    let api = passes_api(&config)?;
    let issuer = DeepLinkIssuer::new(&config)?;
    let pass = LoyaltyObjectInput {
        qr_code_link: DEMO_QR_CODE_LINK.to_string(),
        account_id: "SQ-13579A".to_string(),
        full_name: "John Doe".to_string(),
        points: None,
    };
    let mut results = Vec::with_capacity(5);

    let class = LoyaltyClassInput {
        program_name: "My Loyalty Program".to_string(),
        issuer_name: "My Company".to_string(),
        logo_uri: DEMO_LOGO_URI.to_string(),
    };
    results.push(api.create_class(class_suffix, &class).await);
    results.push(api.create_object(class_suffix, object_suffix, &pass).await);

    let link = issuer.create_jwt_existing_object(class_suffix, object_suffix)?;
    println!("Add to Google Wallet link:\n{link}");

    let renewed = LoyaltyClassInput {
        program_name: "Loyalty Program Renewed!".to_string(),
        issuer_name: "My Company Renewed".to_string(),
        logo_uri: DEMO_RENEWED_LOGO_URI.to_string(),
    };
    results.push(api.patch_class(class_suffix, &renewed).await);
    results.push(api.patch_object(object_suffix, &LoyaltyObjectInput { points: Some(100), ..pass }).await);
    results.push(api.expire_object(object_suffix).await);

    results.iter().for_each(|r| println!("{r}"));
    let failures = results.iter().filter(|r| !r.is_success()).count();
    if failures > 0 {
        warn!("🎫️ {failures} demo steps failed");
        return Err(anyhow!("{failures} of {} demo steps failed", results.len()));
    }
    Ok(())
}
