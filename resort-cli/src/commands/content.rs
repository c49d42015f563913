//! `content` command: manage gallery images, explore cards and hero slides.
//!
//! Every collection shares the same lifecycle: items are added, edited,
//! moved to the recycle bin, restored from it, or purged for good.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, media_store, open_database, output_format,
    parse_output_format, run_plan, GlobalOptions, Records,
};
use clap::{Args, Subcommand};
use resort::config::OutputFormat;
use resort::operations::ContentPlan;
use resort::{
    ContentFields, ContentItem, ContentKind, ContentLifecycle, ContentPatch, ListScope,
    NewContent,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Manage a content collection.
#[derive(Args, Debug)]
pub struct ContentCommand {
    #[command(subcommand)]
    pub action: ContentAction,
}

/// Content subcommands.
#[derive(Subcommand, Debug)]
pub enum ContentAction {
    /// Add an item
    Add(AddArgs),
    /// Change fields of a live item
    Update(UpdateArgs),
    /// List items
    List(ListArgs),
    /// Move an item to the recycle bin
    Delete(ItemArgs),
    /// Bring an item back from the recycle bin
    Restore(ItemArgs),
    /// Permanently delete an item from the recycle bin
    Purge(ItemArgs),
    /// Store an image file and print its URL
    Upload(UploadArgs),
}

/// Kind-specific text fields.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Title or headline
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Image URL or uploads path
    #[arg(long, value_name = "URL", conflicts_with = "image")]
    pub image_url: Option<String>,

    /// Image file to upload and use
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Card teaser text (explore)
    #[arg(long, value_name = "TEXT")]
    pub short_description: Option<String>,

    /// Card body text (explore)
    #[arg(long, value_name = "TEXT")]
    pub full_description: Option<String>,

    /// Line under the headline (hero)
    #[arg(long, value_name = "TEXT")]
    pub subtitle: Option<String>,
}

/// Arguments for `content add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// gallery, explore or hero
    #[arg(value_name = "KIND")]
    pub kind: ContentKind,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Display position
    #[arg(long, default_value_t = 0)]
    pub order: u32,

    /// Keep the item off the public site
    #[arg(long)]
    pub hidden: bool,

    /// Show the plan without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `content update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// gallery, explore or hero
    #[arg(value_name = "KIND")]
    pub kind: ContentKind,

    /// Item id
    #[arg(value_name = "ID")]
    pub id: i64,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// New display position
    #[arg(long)]
    pub order: Option<u32>,

    /// Show the item on the public site
    #[arg(long, conflicts_with = "hide")]
    pub show: bool,

    /// Hide the item from the public site
    #[arg(long)]
    pub hide: bool,

    /// Show the plan without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `content list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// gallery, explore or hero
    #[arg(value_name = "KIND")]
    pub kind: ContentKind,

    /// Include hidden items
    #[arg(long)]
    pub all: bool,

    /// List the recycle bin instead
    #[arg(long)]
    pub deleted: bool,

    /// Output format: table, json, csv or tsv
    #[arg(long, value_name = "FORMAT", value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,
}

/// Arguments naming one item.
#[derive(Args, Debug)]
pub struct ItemArgs {
    /// gallery, explore or hero
    #[arg(value_name = "KIND")]
    pub kind: ContentKind,

    /// Item id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Show the plan without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `content upload`.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// gallery, explore or hero
    #[arg(value_name = "KIND")]
    pub kind: ContentKind,

    /// Image file (JPEG, PNG, GIF or WebP)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl ContentCommand {
    /// Execute the content command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            ContentAction::Add(args) => add(global, args),
            ContentAction::Update(args) => update(global, args),
            ContentAction::List(args) => list(global, &args),
            ContentAction::Delete(args) => {
                change(global, &args, ContentPlan::soft_delete(args.kind, args.id), "Deleted")
            }
            ContentAction::Restore(args) => {
                change(global, &args, ContentPlan::restore(args.kind, args.id), "Restored")
            }
            ContentAction::Purge(args) => {
                change(global, &args, ContentPlan::purge(args.kind, args.id), "Purged")
            }
            ContentAction::Upload(args) => upload(global, &args),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The image URL to store: an uploaded file's URL, or the given one.
///
/// A dry run checks the file but does not store it.
fn resolve_image(
    global: &GlobalOptions,
    kind: ContentKind,
    fields: &FieldArgs,
    dry_run: bool,
) -> Result<Option<String>, CliError> {
    let Some(path) = fields.image.as_ref() else {
        return Ok(fields.image_url.clone());
    };

    let config = load_configuration(global)?;
    let store = media_store(global, &config)?;
    let bytes = fs::read(path)?;
    let name = file_name(path);

    if dry_run {
        let format = store.check(&bytes)?;
        if !global.quiet {
            eprintln!("Would upload {} as {format}", path.display());
        }
        return Ok(Some(format!("/uploads/{}/{name}", kind.upload_dir())));
    }

    let stored = store.store(kind, &name, &bytes)?;
    Ok(Some(stored.url))
}

fn new_fields(kind: ContentKind, fields: FieldArgs, image_url: String) -> ContentFields {
    match kind {
        ContentKind::GalleryImage => ContentFields::gallery_image(fields.title, image_url),
        ContentKind::ExploreCard => ContentFields::explore_card(
            fields.title.unwrap_or_default(),
            fields.short_description.unwrap_or_default(),
            fields.full_description.unwrap_or_default(),
            image_url,
        ),
        ContentKind::HeroSlide => ContentFields::hero_slide(
            fields.title.unwrap_or_default(),
            fields.subtitle.unwrap_or_default(),
            image_url,
        ),
    }
}

fn add(global: &GlobalOptions, args: AddArgs) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;

    // Check the fields before writing any upload to disk.
    let fields = new_fields(args.kind, args.fields.clone(), "pending".to_string());
    fields.validate()?;

    let image_url = resolve_image(global, args.kind, &args.fields, args.dry_run)?
        .unwrap_or_default();
    let new = NewContent::new(new_fields(args.kind, args.fields, image_url))
        .with_order(args.order)
        .with_active(!args.hidden);

    let plan = ContentPlan::create(new);
    let Some(result) = run_plan(&mut db, global, args.dry_run, |conn| plan.build_plan(conn))?
    else {
        return Ok(());
    };
    report(global, result.content.as_ref(), "Added")
}

fn update(global: &GlobalOptions, args: UpdateArgs) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;

    // Fail on a missing item before storing an upload.
    match ContentLifecycle::new(db.connection(), args.kind).get(args.id)? {
        Some(item) if !item.in_recycle_bin() => {}
        _ => {
            return Err(resort::Error::not_found(format!("{} #{}", args.kind, args.id)).into());
        }
    }

    let image_url = resolve_image(global, args.kind, &args.fields, args.dry_run)?;
    let is_active = match (args.show, args.hide) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let patch = ContentPatch {
        title: args.fields.title,
        image_url,
        short_description: args.fields.short_description,
        full_description: args.fields.full_description,
        subtitle: args.fields.subtitle,
        order: args.order,
        is_active,
    };

    let plan = ContentPlan::update(args.kind, args.id, patch);
    let Some(result) = run_plan(&mut db, global, args.dry_run, |conn| plan.build_plan(conn))?
    else {
        return Ok(());
    };
    report(global, result.content.as_ref(), "Updated")
}

fn change(
    global: &GlobalOptions,
    args: &ItemArgs,
    plan: ContentPlan,
    verb: &str,
) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;

    let Some(result) = run_plan(&mut db, global, args.dry_run, |conn| plan.build_plan(conn))?
    else {
        return Ok(());
    };
    if result.actions_taken.is_empty() {
        return Ok(());
    }
    report(global, result.content.as_ref(), verb)
}

/// Prints the item id on stdout and a summary on stderr.
fn report(global: &GlobalOptions, item: Option<&ContentItem>, verb: &str) -> Result<(), CliError> {
    let Some(item) = item else {
        return Ok(());
    };
    println!("{}", item.id);
    if !global.quiet {
        eprintln!("{verb} {} #{} \"{}\"", item.kind(), item.id, item.fields.title());
    }
    Ok(())
}

fn list(global: &GlobalOptions, args: &ListArgs) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;

    let scope = ListScope::from_flags(args.deleted, args.all);
    let items = ContentLifecycle::new(db.connection(), args.kind).list(scope)?;

    let format = output_format(args.format, &config);
    records(scope, &items).write(format, &mut std::io::stdout().lock())?;

    if !global.quiet && format == OutputFormat::Table {
        eprintln!("{} {} item(s) ({scope})", items.len(), args.kind);
    }
    Ok(())
}

fn records(scope: ListScope, items: &[ContentItem]) -> Records {
    let mut headers = vec!["id", "order", "active", "title", "image_url"];
    if scope == ListScope::Deleted {
        headers.push("deleted_at");
    }

    let rows = items
        .iter()
        .map(|item| {
            let mut row = vec![
                item.id.to_string(),
                item.order.to_string(),
                if item.is_active { "yes" } else { "no" }.to_string(),
                item.fields.title().to_string(),
                item.fields.image_url().to_string(),
            ];
            if scope == ListScope::Deleted {
                row.push(item.deleted_at.map(format_timestamp).unwrap_or_default());
            }
            row
        })
        .collect();

    Records { headers, rows }
}

fn upload(global: &GlobalOptions, args: &UploadArgs) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let store = media_store(global, &config)?;

    let bytes = fs::read(&args.file)?;
    let stored = store.store(args.kind, &file_name(&args.file), &bytes)?;

    println!("{}", stored.url);
    if !global.quiet {
        eprintln!("Stored {} image at {}", stored.format, stored.path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_title_defaults() {
        let fields = new_fields(
            ContentKind::GalleryImage,
            FieldArgs::default(),
            "/uploads/gallery/a.jpg".into(),
        );
        assert_eq!(fields.title(), "Resort View");
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_missing_required_text_fails_validation() {
        let fields = FieldArgs {
            title: Some("Sunrise".into()),
            ..Default::default()
        };
        let fields = new_fields(ContentKind::HeroSlide, fields, "/x.jpg".into());
        assert!(fields.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_deleted_at_column_only_for_recycle_bin() {
        assert_eq!(records(ListScope::Deleted, &[]).headers.last(), Some(&"deleted_at"));
        assert!(!records(ListScope::All, &[]).headers.contains(&"deleted_at"));
    }
}
