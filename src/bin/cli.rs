use campusdesk::authz::PermissionModel;
use campusdesk::cli::{create_admin, format_grants};
use campusdesk_config::AuthzConfig;
use campusdesk_db::{init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusdesk-cli")]
#[command(about = "CampusDesk CLI - Administrative tools for CampusDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create an account holding the super-role
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Print the capability set of a role
    Grants {
        /// Role identifier
        #[arg(short = 'r', long)]
        role: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool().await?;

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => {
            let name = match name {
                Some(name) => name,
                None => Input::new().with_prompt("Name").interact_text()?,
            };
            let email = match email {
                Some(email) => email,
                None => Input::new().with_prompt("Email address").interact_text()?,
            };
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let role = AuthzConfig::from_env().super_role;
            let user = create_admin(&pool, &name, &email, &password, &role)
                .await
                .map_err(|e| anyhow::anyhow!("Error creating admin: {}", e.error))?;

            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", user.email);
            println!("   Role: {}", user.role);
        }
        Commands::Grants { role } => {
            let authz = AuthzConfig::from_env();
            let model = PermissionModel::load(&pool, &authz.super_role)
                .await
                .map_err(|e| anyhow::anyhow!("Error loading permissions: {}", e.error))?;

            if model.is_super_role(&role) {
                println!("{} is the super-role and passes every granular check", role);
            }

            let lines = format_grants(&model, &role);
            if lines.is_empty() {
                println!("{} holds no grants", role);
            }
            for line in lines {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}
