use admin_dashboard_rust::{cli, commands, config, error, logging};
use clap::Parser;
use cli::{Cli, Commands, ProfileAction, UserAction};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Currency { view, refresh, browse } => {
            commands::currency(&config, &view, refresh, browse).await?;
        }

        Commands::Users { action } => match action {
            UserAction::List { view, browse } => {
                commands::users_list(&config, &view, browse).await?;
            }
            UserAction::Show { id } => commands::users_show(&config, id).await?,
            UserAction::Create { name, email } => {
                commands::users_create(&config, name, email).await?;
            }
            UserAction::Update { id, name, email } => {
                commands::users_update(&config, id, name, email).await?;
            }
            UserAction::Delete { id, yes } => commands::users_delete(&config, id, yes).await?,
        },

        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile_show(&config).await?,
            ProfileAction::Update { name, email, password } => {
                commands::profile_update(&config, name, email, password).await?;
            }
        },

        Commands::Login { token, role } => commands::login(config, token, role)?,

        Commands::Logout => commands::logout(config)?,

        Commands::Config { base_url, page_size, show } => {
            commands::configure(config, base_url, page_size, show)?;
        }
    }

    Ok(())
}
