//! reference-importer: turn a DOI into a reference note inside a markdown vault.
//!
//! `import-doi` is the one real command; `config` stands in for a settings
//! panel and `list` shows what has been imported so far.

use clap::{Parser, Subcommand};
use crossref_client::CrossrefClient;
use dotenv::dotenv;
use reference_importer::config::Config;
use reference_importer::editor::{ArgumentSelection, FileSelection};
use reference_importer::models::{FilenamePolicy, ImporterSettings};
use reference_importer::notes::VaultStore;
use reference_importer::notice::ConsoleNotifier;
use reference_importer::{ImportOutcome, ReferenceImporter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "reference-importer")]
#[command(author, version, about = "Import Crossref references into a markdown vault")]
#[command(propagate_version = true)]
struct Cli {
    /// Vault root (default: $REFERENCE_VAULT_DIR, else the current directory)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// Settings file (default: <vault>/.reference-importer/settings.ron)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import reference from DOI
    ImportDoi {
        /// The selected DOI
        doi: String,

        /// Markdown file holding the selection; its first occurrence becomes the note link
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List reference notes in the configured folder
    List,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,

    /// Where would you like to save reference notes?
    SetPath {
        /// Vault folder, e.g. /references
        folder: String,
    },

    /// How note file names are derived from titles
    SetFilenamePolicy {
        /// raw | sanitize
        policy: FilenamePolicy,
    },

    /// Contact address sent to Crossref
    SetMailto {
        #[arg(required_unless_present = "clear")]
        email: Option<String>,

        /// Remove the stored address
        #[arg(long, conflicts_with = "email")]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(vault) = cli.vault {
        config = config.with_vault_dir(vault);
    }
    if let Some(settings_path) = cli.settings {
        config.settings_path = settings_path;
    }

    log::debug!("reference-importer v{}", env!("CARGO_PKG_VERSION"));
    log::debug!(
        "[CONFIG] vault: {}, settings: {}",
        config.vault_dir.display(),
        config.settings_path.display()
    );

    let settings = ImporterSettings::load(&config.settings_path);

    match cli.command {
        Commands::ImportDoi { doi, file } => {
            let settings = settings.with_env_overrides(&config);
            import_doi(&config, &settings, doi, file).await
        }
        Commands::Config { action } => configure(&config, settings, action),
        Commands::List => list(&config, &settings),
    }
}

async fn import_doi(
    config: &Config,
    settings: &ImporterSettings,
    doi: String,
    file: Option<PathBuf>,
) -> ExitCode {
    let mut client = CrossrefClient::new(&settings.crossref_api_url);
    if let Some(mailto) = &settings.mailto {
        client = client.with_mailto(mailto);
    }
    let store = VaultStore::new(config.vault_dir.clone());
    let notifier = ConsoleNotifier;
    let importer = ReferenceImporter::new(settings, &client, &store, &notifier);

    let outcome = match file {
        Some(path) => {
            let mut selection = match FileSelection::open(&path, doi.trim()) {
                Ok(selection) => selection,
                Err(e) => {
                    log::error!("[IMPORT] {}", e);
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            };
            importer.import(&mut selection).await
        }
        None => {
            let mut selection = ArgumentSelection::new(doi);
            let outcome = importer.import(&mut selection).await;
            if let Some(link) = selection.replacement() {
                println!("{}", link);
            }
            outcome
        }
    };

    if let ImportOutcome::Created { path, .. } = &outcome {
        eprintln!("Created {}", path);
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn configure(config: &Config, mut settings: ImporterSettings, action: ConfigAction) -> ExitCode {
    match action {
        ConfigAction::Show => {
            println!("settings file:       {}", config.settings_path.display());
            println!("reference_note_path: {}", settings.reference_note_path);
            println!("filename_policy:     {}", settings.filename_policy);
            println!("crossref_api_url:    {}", settings.crossref_api_url);
            println!(
                "mailto:              {}",
                settings.mailto.as_deref().unwrap_or("-")
            );
            return ExitCode::SUCCESS;
        }
        ConfigAction::SetPath { folder } => settings.reference_note_path = folder,
        ConfigAction::SetFilenamePolicy { policy } => settings.filename_policy = policy,
        ConfigAction::SetMailto { email, clear } => {
            settings.mailto = if clear { None } else { email };
        }
    }

    match settings.save(&config.settings_path) {
        Ok(()) => {
            log::info!("[CONFIG] Saved {}", config.settings_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("[CONFIG] {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn list(config: &Config, settings: &ImporterSettings) -> ExitCode {
    let store = VaultStore::new(config.vault_dir.clone());
    match store.list_references(&settings.reference_note_path) {
        Ok(refs) if refs.is_empty() => {
            println!("No reference notes in {}", settings.reference_note_path);
            ExitCode::SUCCESS
        }
        Ok(refs) => {
            for r in refs {
                println!(
                    "{} | {} | {}",
                    r.title,
                    r.doi.as_deref().unwrap_or("-"),
                    r.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("[NOTES] {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
