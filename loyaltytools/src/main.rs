use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use log::info;

mod commands;
mod env_info;

use crate::commands::{print_save_link, run_demo, run_upsert, UpsertCommand};

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Manage Google Wallet loyalty classes and passes")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "create-class", about = "Create a loyalty class, unless it already exists")]
    CreateClass(ClassParams),
    #[clap(name = "patch-class", about = "Update an existing loyalty class")]
    PatchClass(ClassParams),
    #[clap(name = "create-object", about = "Create a loyalty pass, unless it already exists")]
    CreateObject(CreateObjectParams),
    #[clap(name = "patch-object", about = "Update an existing loyalty pass")]
    PatchObject(PatchObjectParams),
    #[clap(name = "expire-object", about = "Mark a loyalty pass as expired")]
    ExpireObject {
        /// The developer-defined suffix of the pass id
        #[arg(short = 'o', long = "object")]
        object_suffix: String,
    },
    #[clap(name = "link", about = "Print an 'Add to Google Wallet' link for an existing pass")]
    Link {
        /// The developer-defined suffix of the class id
        #[arg(short = 'c', long = "class")]
        class_suffix: String,
        /// The developer-defined suffix of the pass id
        #[arg(short = 'o', long = "object")]
        object_suffix: String,
    },
    #[clap(name = "demo", about = "Run through the whole lifecycle of a demo class and pass")]
    Demo {
        #[arg(short = 'c', long = "class", default_value = "my-loyalty-class")]
        class_suffix: String,
        #[arg(short = 'o', long = "object", default_value = "my-loyalty-object")]
        object_suffix: String,
    },
    #[clap(name = "env", about = "Show the (non-secret) configuration taken from the environment")]
    Env,
}

#[derive(Debug, Args)]
pub struct ClassParams {
    /// The developer-defined suffix of the class id
    #[arg(short = 'c', long = "class")]
    pub class_suffix: String,
    #[arg(short = 'p', long = "program-name")]
    pub program_name: String,
    #[arg(short = 'i', long = "issuer-name")]
    pub issuer_name: String,
    /// Public URL of the program logo
    #[arg(short = 'l', long = "logo-uri")]
    pub logo_uri: String,
}

#[derive(Debug, Args)]
pub struct PassParams {
    #[arg(short = 'a', long = "account-id")]
    pub account_id: String,
    /// The cardholder's full name
    #[arg(short = 'n', long = "full-name")]
    pub full_name: String,
    /// The value encoded in the pass's QR code
    #[arg(short = 'q', long = "qr-code-link")]
    pub qr_code_link: String,
}

#[derive(Debug, Args)]
pub struct CreateObjectParams {
    /// The developer-defined suffix of the class the pass belongs to
    #[arg(short = 'c', long = "class")]
    pub class_suffix: String,
    /// The developer-defined suffix of the pass id
    #[arg(short = 'o', long = "object")]
    pub object_suffix: String,
    #[command(flatten)]
    pub pass: PassParams,
}

#[derive(Debug, Args)]
pub struct PatchObjectParams {
    /// The developer-defined suffix of the pass id
    #[arg(short = 'o', long = "object")]
    pub object_suffix: String,
    #[command(flatten)]
    pub pass: PassParams,
    /// The new points balance. It replaces the current balance
    #[arg(short = 'x', long = "points")]
    pub points: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    info!("🚀️ Running {:?}", cli.command);
    match cli.command {
        Command::CreateClass(params) => run_upsert(UpsertCommand::CreateClass(params)).await,
        Command::PatchClass(params) => run_upsert(UpsertCommand::PatchClass(params)).await,
        Command::CreateObject(params) => run_upsert(UpsertCommand::CreateObject(params)).await,
        Command::PatchObject(params) => run_upsert(UpsertCommand::PatchObject(params)).await,
        Command::ExpireObject { object_suffix } => run_upsert(UpsertCommand::ExpireObject(object_suffix)).await,
        Command::Link { class_suffix, object_suffix } => print_save_link(&class_suffix, &object_suffix),
        Command::Demo { class_suffix, object_suffix } => run_demo(&class_suffix, &object_suffix).await,
        Command::Env => {
            env_info::display_envs();
            Ok(())
        },
    }
}
