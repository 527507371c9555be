use clap::Parser;
use tracing_subscriber::EnvFilter;
use villa_admin::{cli, commands, config, error};
use cli::{Cli, Commands, ImageAction};
use commands::Session;
use config::Config;
use error::Result;

fn init_tracing(verbose: bool) {
    // RUST_LOG wins over --verbose
    let default = if verbose { "villa_admin=debug,villa_admin_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;

    if let Commands::Config { set_url, set_hydration, show } = &cli.command {
        let mut changed = false;
        if let Some(url) = set_url {
            config.set_base_url(url)?;
            println!("✔ URL du serveur: {}", config.base_url);
            changed = true;
        }
        if let Some(hydration) = set_hydration {
            config.hydration = *hydration;
            println!("✔ Hydratation: {}", hydration.as_str());
            changed = true;
        }
        if changed {
            config.save()?;
        }
        if *show || !changed {
            println!("Fichier: {}", Config::config_path()?.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        return Ok(());
    }

    let session = Session {
        base_url: config.resolve_base_url(cli.base_url.as_deref())?,
        timeout: config.timeout(),
        hydration: config.hydration,
        assume_yes: cli.yes,
    };
    tracing::debug!(base_url = %session.base_url, "session ready");

    match cli.command {
        Commands::Pdf { file, images, dry_run, hydration } => {
            let session = Session {
                hydration: hydration.unwrap_or(session.hydration),
                ..session
            };
            commands::pdf(&session, &file, &images, dry_run).await?;
        }

        Commands::Save { from, values } => {
            commands::save(&session, from.as_deref(), &values).await?;
        }

        Commands::Images { action } => match action {
            ImageAction::Upload { paths, gallery } => {
                commands::upload_images(&session, &paths, &gallery).await?;
            }
            ImageAction::Delete { filenames } => {
                commands::delete_images(&session, &filenames).await?;
            }
        },

        Commands::Enhance { field, text } => {
            commands::enhance(&session, &field, &text).await?;
        }

        Commands::Reset { confirm } => {
            commands::reset(&session, confirm).await?;
        }

        Commands::Show => {
            commands::show(&session).await?;
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}
