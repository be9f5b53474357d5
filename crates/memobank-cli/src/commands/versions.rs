//! Version history CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use memobank_api::AppState;
use memobank_core::error::AppError;
use memobank_entity::version::{DiffEntry, FileVersion};

/// Arguments for version commands
#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Version subcommand
    #[command(subcommand)]
    pub command: VersionsCommand,
}

/// Version subcommands
#[derive(Debug, Subcommand)]
pub enum VersionsCommand {
    /// List the versions of a file, newest first
    List {
        /// Project name
        project: String,
        /// File name
        file: String,
    },
    /// Print one version with its content
    Show {
        /// Project name
        project: String,
        /// File name
        file: String,
        /// Version number
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        version: i32,
    },
    /// Line diff between two versions
    Diff {
        /// Project name
        project: String,
        /// File name
        file: String,
        /// Base version
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        version1: i32,
        /// Compared version
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        version2: i32,
    },
    /// Restore an older version's content as a new version
    Revert {
        /// Project name
        project: String,
        /// File name
        file: String,
        /// Version to restore
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        version: i32,
    },
    /// Apply the retention rules to one project, or to every project
    Cleanup {
        /// Project name; all projects when omitted
        project: Option<String>,
        /// Keep this many newest versions per file
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_versions: Option<u32>,
    },
}

/// Version display row for table output
#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    /// Version number
    version: i32,
    /// Size in bytes
    size: i64,
    /// Content checksum
    checksum: String,
    /// Auto save flag
    auto_save: bool,
    /// Change description
    description: String,
    /// Created at
    created_at: String,
}

impl From<&FileVersion> for VersionRow {
    fn from(v: &FileVersion) -> Self {
        let (auto_save, description) = v
            .metadata
            .as_ref()
            .map(|m| (m.is_auto_save, m.change_description.clone().unwrap_or_default()))
            .unwrap_or_default();

        Self {
            version: v.version,
            size: v.size,
            checksum: v.checksum.chars().take(12).collect(),
            auto_save,
            description,
            created_at: v.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Diff display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DiffRow {
    /// Line number
    line: usize,
    /// Change kind
    kind: String,
    /// Change content
    content: String,
}

impl From<&DiffEntry> for DiffRow {
    fn from(d: &DiffEntry) -> Self {
        Self {
            line: d.line,
            kind: format!("{:?}", d.kind).to_lowercase(),
            content: d.content.clone(),
        }
    }
}

/// Execute version commands
pub async fn execute(
    args: &VersionsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let db = super::connect_database(&config).await?;
    let state = AppState::with_database(config, db.clone());
    let versions = state.version_service.as_ref();

    match &args.command {
        VersionsCommand::List { project, file } => {
            let history = versions.get_file_versions(project, file).await?;
            let rows: Vec<VersionRow> = history.iter().map(VersionRow::from).collect();
            output::print_list(&rows, format);
        }
        VersionsCommand::Show {
            project,
            file,
            version,
        } => {
            let found = versions
                .get_file_version(project, file, *version)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("Version {} of '{}' not found", version, file))
                })?;

            match format {
                OutputFormat::Json => output::print_json(&found),
                OutputFormat::Table => {
                    output::print_kv("Project", &found.project_name);
                    output::print_kv("File", &found.file_name);
                    output::print_kv("Version", &found.version.to_string());
                    output::print_kv("Size", &found.size.to_string());
                    output::print_kv("Checksum", &found.checksum);
                    output::print_kv("Created", &found.created_at.to_rfc3339());
                    println!();
                    println!("{}", found.content);
                }
            }
        }
        VersionsCommand::Diff {
            project,
            file,
            version1,
            version2,
        } => {
            let comparison = versions
                .compare_file_versions(project, file, *version1, *version2)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!(
                        "Cannot compare versions {} and {} of '{}'",
                        version1, version2, file
                    ))
                })?;

            match format {
                OutputFormat::Json => output::print_json(&comparison),
                OutputFormat::Table => {
                    let rows: Vec<DiffRow> =
                        comparison.differences.iter().map(DiffRow::from).collect();
                    output::print_list(&rows, format);
                }
            }
        }
        VersionsCommand::Revert {
            project,
            file,
            version,
        } => {
            let created = versions
                .revert_to_version(project, file, *version)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!(
                        "Cannot revert '{}' to version {}",
                        file, version
                    ))
                })?;
            output::print_success(&format!(
                "Reverted '{}' to version {} as version {}",
                file, version, created.version
            ));
        }
        VersionsCommand::Cleanup {
            project,
            max_versions,
        } => {
            let deleted = match project {
                Some(project) => versions.cleanup_old_versions(project, *max_versions).await?,
                None => versions.cleanup_all_projects(*max_versions).await?,
            };
            let kept = versions.retention_config(*max_versions).max_versions_per_file;
            output::print_success(&format!(
                "Deleted {} version(s), keeping at most {} per file",
                deleted, kept
            ));
        }
    }

    db.close().await;
    Ok(())
}
