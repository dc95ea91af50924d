use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use slateboard_authz::PgPermissionStore;
use slateboard_cli::commands;
use slateboard_models::{Action, Feature, Role};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slateboard-cli")]
#[command(about = "Slateboard CLI - Administrative tools for the permission model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed default permission records for all six roles
    InitPermissions {
        /// Overwrite roles that already have a record
        #[arg(long)]
        force: bool,
    },
    /// Print a role's permission record as JSON
    ShowPermissions {
        /// Role to inspect (admin, teacher, student, clark, parent, staff)
        role: Role,
    },
    /// Allow a feature/action for a role
    Grant {
        role: Role,
        /// Feature name, e.g. attendance, fees, userManagement
        feature: Feature,
        /// Action name: view, create, update, delete, export
        action: Action,
    },
    /// Deny a feature/action for a role
    Revoke {
        role: Role,
        feature: Feature,
        action: Action,
    },
    /// Activate or deactivate a role's record without touching its grants
    SetActive {
        role: Role,
        /// `--active true` or `--active false`
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Delete a role's permission record
    DeletePermissions { role: Role },
    /// Mint a document or transaction identifier
    GenerateId {
        /// Type tag, e.g. cheque, notice, certificate
        tag: String,
        /// Use the longer financial-transaction suffix
        #[arg(long)]
        transaction: bool,
    },
}

fn init_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("slateboard_cli={log_level},sqlx=warn")));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    // GenerateId needs no database; handle it before opening a pool.
    if let Commands::GenerateId { tag, transaction } = &cli.command {
        let suffix_len = if *transaction {
            slateboard_idgen::TRANSACTION_SUFFIX_LEN
        } else {
            slateboard_idgen::DOCUMENT_SUFFIX_LEN
        };
        println!("{}", slateboard_idgen::generate(tag, suffix_len)?);
        return Ok(());
    }

    let pool = slateboard_db::init_db_pool().await;
    let store = PgPermissionStore::new(pool);

    match cli.command {
        Commands::InitPermissions { force } => {
            let seeded = commands::init_permissions(&store, force).await?;
            println!("Seeded {seeded} role(s)");
        }
        Commands::ShowPermissions { role } => {
            println!("{}", commands::show_permissions(&store, role).await?);
        }
        Commands::Grant {
            role,
            feature,
            action,
        } => {
            commands::set_grant(&store, role, feature, action, true).await?;
            println!("Granted {action} on {feature} to {role}");
        }
        Commands::Revoke {
            role,
            feature,
            action,
        } => {
            commands::set_grant(&store, role, feature, action, false).await?;
            println!("Revoked {action} on {feature} from {role}");
        }
        Commands::SetActive { role, active } => {
            commands::set_active(&store, role, active).await?;
            println!(
                "Record for {role} is now {}",
                if active { "active" } else { "inactive" }
            );
        }
        Commands::DeletePermissions { role } => {
            if commands::delete_permissions(&store, role).await? {
                println!("Deleted permission record for {role}");
            } else {
                println!("No permission record for {role}");
            }
        }
        Commands::GenerateId { .. } => unreachable!("handled above"),
    }

    Ok(())
}
