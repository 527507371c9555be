use clap::{Parser, Subcommand};
use std::path::PathBuf;
use villa_admin_common::Hydration;

#[derive(Parser)]
#[command(name = "villa-admin")]
#[command(about = "Administration de l'annonce villa: PDF, photos, textes IA, réinitialisation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Detailed logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server URL (overrides config and VILLA_ADMIN_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a listing from a PDF, attach photos, then save it
    Pdf {
        /// PDF brochure of the villa
        #[arg(required = true)]
        file: PathBuf,

        /// Photos (files or folders) to add to the gallery before saving
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,

        /// Print the extracted fields and stop without saving
        #[arg(long)]
        dry_run: bool,

        /// Override the configured hydration (deferred/immediate)
        #[arg(long)]
        hydration: Option<Hydration>,
    },

    /// Save the listing from typed values
    Save {
        /// JSON object of field values
        #[arg(long)]
        from: Option<PathBuf>,

        /// Single field, e.g. --set title="Villa Palmeraie"
        #[arg(long = "set", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },

    /// Manage gallery images
    Images {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Propose an AI rewrite of a field's text
    Enhance {
        /// Field name, e.g. description
        #[arg(required = true)]
        field: String,

        /// Current text of the field
        #[arg(required = true)]
        text: String,
    },

    /// Delete the listing and every image
    Reset {
        /// Confirmation phrase; prompted for when omitted
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Show the persisted listing
    Show,

    /// Show/edit settings
    Config {
        /// Server URL
        #[arg(long)]
        set_url: Option<String>,

        /// Default hydration for `pdf` (deferred/immediate)
        #[arg(long)]
        set_hydration: Option<Hydration>,

        /// Print the settings
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum ImageAction {
    /// Upload images one after another
    Upload {
        /// Image files or folders
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Target gallery (pdf/manual)
        #[arg(long, default_value = "manual")]
        gallery: String,
    },

    /// Delete images by server filename
    Delete {
        #[arg(required = true)]
        filenames: Vec<String>,
    },
}

/// `key=value`
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Expected key=value, got: {}", s)),
    }
}
