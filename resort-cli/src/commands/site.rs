//! `site` command: show or edit the site content record.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::{Args, Subcommand, ValueEnum};
use resort::{Database, SiteContent, SiteContentPatch};
use std::time::SystemTime;

/// Show or edit landing page captions, contact details and social links.
#[derive(Args, Debug)]
pub struct SiteCommand {
    #[command(subcommand)]
    pub action: SiteAction,
}

/// Site subcommands.
#[derive(Subcommand, Debug)]
pub enum SiteAction {
    /// Print the current site content
    Show(ShowArgs),
    /// Change one or more fields
    Set(SetArgs),
}

/// Formats for `site show`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SiteFormat {
    /// YAML document.
    #[default]
    Yaml,
    /// JSON object.
    Json,
}

/// Arguments for `site show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = SiteFormat::Yaml)]
    pub format: SiteFormat,
}

/// Arguments for `site set`. Unset flags leave the field unchanged.
#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// First slide headline
    #[arg(long, value_name = "TEXT")]
    pub slide1_title: Option<String>,
    /// First slide subtitle
    #[arg(long, value_name = "TEXT")]
    pub slide1_subtitle: Option<String>,
    /// Second slide headline
    #[arg(long, value_name = "TEXT")]
    pub slide2_title: Option<String>,
    /// Second slide subtitle
    #[arg(long, value_name = "TEXT")]
    pub slide2_subtitle: Option<String>,
    /// Third slide headline
    #[arg(long, value_name = "TEXT")]
    pub slide3_title: Option<String>,
    /// Third slide subtitle
    #[arg(long, value_name = "TEXT")]
    pub slide3_subtitle: Option<String>,
    /// Front desk phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: Option<String>,
    /// Public contact email
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,
    /// Postal address
    #[arg(long, value_name = "TEXT")]
    pub address: Option<String>,
    /// Link to a map of the resort
    #[arg(long, value_name = "URL")]
    pub map_link: Option<String>,
    /// Facebook page URL (empty to clear)
    #[arg(long, value_name = "URL")]
    pub facebook: Option<String>,
    /// Instagram profile URL (empty to clear)
    #[arg(long, value_name = "URL")]
    pub instagram: Option<String>,
    /// Twitter profile URL (empty to clear)
    #[arg(long, value_name = "URL")]
    pub twitter: Option<String>,

    /// Validate and show the result without saving
    #[arg(long)]
    pub dry_run: bool,
}

impl SetArgs {
    fn patch(self) -> SiteContentPatch {
        SiteContentPatch {
            slide1_title: self.slide1_title,
            slide1_subtitle: self.slide1_subtitle,
            slide2_title: self.slide2_title,
            slide2_subtitle: self.slide2_subtitle,
            slide3_title: self.slide3_title,
            slide3_subtitle: self.slide3_subtitle,
            phone: self.phone,
            email: self.email,
            address: self.address,
            map_link: self.map_link,
            facebook: self.facebook,
            instagram: self.instagram,
            twitter: self.twitter,
        }
    }
}

impl SiteCommand {
    /// Execute the site command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let now = SystemTime::now();

        match self.action {
            SiteAction::Show(args) => {
                // Reading may store the defaults, so take the write lock.
                let tx = db.begin_transaction()?;
                let content = Database::site_content(&tx, now)?;
                tx.commit()
                    .map_err(resort::Error::from)
                    .map_err(CliError::from)?;
                print_content(&content, args.format)
            }
            SiteAction::Set(args) => {
                let dry_run = args.dry_run;
                let patch = args.patch();
                if patch == SiteContentPatch::default() {
                    return Err(CliError::InvalidArguments(
                        "Nothing to change: pass at least one field".to_string(),
                    ));
                }

                let tx = db.begin_transaction()?;
                let next = Database::site_content(&tx, now)?.patched(&patch)?;
                if dry_run {
                    if !global.quiet {
                        eprintln!("Dry run - site content would become:");
                    }
                    return print_content(&next, SiteFormat::Yaml);
                }

                let saved = Database::save_site_content(&tx, &next, now)?;
                tx.commit()
                    .map_err(resort::Error::from)
                    .map_err(CliError::from)?;
                if !global.quiet {
                    eprintln!("Site content updated");
                }
                print_content(&saved, SiteFormat::Yaml)
            }
        }
    }
}

fn print_content(content: &SiteContent, format: SiteFormat) -> Result<(), CliError> {
    let text = match format {
        SiteFormat::Yaml => serde_yaml::to_string(content)
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
        SiteFormat::Json => {
            let mut json = serde_json::to_string_pretty(content)
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            json.push('\n');
            json
        }
    };
    print!("{text}");
    Ok(())
}
