use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::archive::{
    BackupReport, BackupRequest, default_backup_filename, default_export_filename,
    format_for_copy, render_conversation_json,
};
use crate::filters::{TypeFilter, parse_type_filter};
use crate::models::{NormalizedMessage, Project, ProjectMatch};
use crate::service::HistoryService;
use crate::utils::terminal::strip_ansi_codes;
use crate::utils::{format_path_with_tilde, get_projects_dir};

const SNIPPET_CHARS: usize = 160;

#[derive(Parser)]
#[command(name = "ai-history-viewer")]
#[command(version = "0.1.0")]
#[command(about = "Browse, search and back up Claude conversation logs", long_about = None)]
pub struct Cli {
    /// Conversation storage root [default: ~/.claude/projects]
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects
    Projects {
        #[arg(long)]
        json: bool,
    },
    /// List the conversations of a project, newest first
    Conversations {
        project: String,
        #[arg(long)]
        json: bool,
    },
    /// Print a conversation
    Show {
        project: String,
        conversation: String,
        /// Message contents only, separated by blank lines
        #[arg(long, conflicts_with = "json")]
        plain: bool,
        /// The export document (pretty JSON array)
        #[arg(long)]
        json: bool,
        /// Message types to show, e.g. `user,claude` or `+tool_use` [default: all]
        #[arg(long, value_name = "TYPES")]
        types: Option<String>,
    },
    /// Search a project, or a single conversation with --conversation
    Search {
        project: String,
        term: String,
        #[arg(long, value_name = "ID")]
        conversation: Option<String>,
        /// Message types to search, e.g. `all` or `-thinking,+tool_result`
        #[arg(long, value_name = "TYPES")]
        types: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Export a conversation as JSON
    Export {
        project: String,
        conversation: String,
        /// Output file [default: claude-conversation-<ID>-<DATE>.json]
        destination: Option<PathBuf>,
    },
    /// Back up every conversation of a project into a zip archive
    Backup {
        project: String,
        /// Output file [default: <NAME>-backup-<DATE>.zip]
        destination: Option<PathBuf>,
        /// Project name for the manifest [default: last path segment]
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Open a previously exported conversation file
    Open {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let root = match cli.root {
        Some(root) => root,
        None => get_projects_dir()?,
    };
    let service = HistoryService::new(root);
    let today = Utc::now().date_naive();

    match command {
        Commands::Projects { json } => list_projects(&service, json).await,
        Commands::Conversations { project, json } => {
            list_conversations(&service, &project, json).await
        }
        Commands::Show { project, conversation, plain, json, types } => {
            show_conversation(&service, &project, &conversation, plain, json, types.as_deref())
                .await
        }
        Commands::Search { project, term, conversation, types, json } => {
            let filter = match types.as_deref() {
                Some(spec) => parse_type_filter(spec)?,
                None => TypeFilter::default(),
            };
            match conversation {
                Some(conversation) => {
                    search_conversation(&service, &project, &conversation, &term, &filter, json)
                        .await
                }
                None => search_project(&service, &project, &term, &filter, json).await,
            }
        }
        Commands::Export { project, conversation, destination } => {
            export(&service, &project, &conversation, destination, today).await
        }
        Commands::Backup { project, destination, name, json } => {
            backup(&service, &project, destination, name, json, today).await
        }
        Commands::Open { file, json } => open_saved(&service, &file, json).await,
    }
}

async fn list_projects(service: &HistoryService, json: bool) -> Result<()> {
    let projects = service.list_projects().await.with_context(|| {
        format!("Failed to list projects in {}", format_path_with_tilde(service.root()))
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    println!("Projects in {}", format_path_with_tilde(service.root()));
    println!("================================");
    for project in &projects {
        println!("{:<24} {}", sanitize(&project.name), sanitize(&project.id));
    }
    println!();
    println!("Total projects: {}", projects.len());

    Ok(())
}

async fn list_conversations(service: &HistoryService, project_id: &str, json: bool) -> Result<()> {
    let conversations = service
        .list_conversations(project_id)
        .await
        .with_context(|| format!("Failed to list conversations of {}", project_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&conversations)?);
        return Ok(());
    }

    for conversation in &conversations {
        println!(
            "{}  {}  {:>5} messages  {}",
            conversation.last_modified.format("%Y-%m-%d %H:%M"),
            sanitize(&conversation.id),
            conversation.message_count,
            snippet(&conversation.preview)
        );
    }
    println!();
    println!("Total conversations: {}", conversations.len());

    Ok(())
}

async fn show_conversation(
    service: &HistoryService,
    project_id: &str,
    conversation_id: &str,
    plain: bool,
    json: bool,
    types: Option<&str>,
) -> Result<()> {
    let filter = match types {
        Some(spec) => parse_type_filter(spec)?,
        None => TypeFilter::all(),
    };
    let messages: Vec<NormalizedMessage> = service
        .read_conversation(project_id, conversation_id)
        .await
        .with_context(|| format!("Failed to read conversation {}", conversation_id))?
        .into_iter()
        .filter(|m| filter.is_enabled(m.message_type))
        .collect();

    if json {
        println!("{}", render_conversation_json(&messages)?);
    } else if plain {
        println!("{}", sanitize(&format_for_copy(&messages)));
    } else {
        for message in &messages {
            print_message(message);
        }
    }

    Ok(())
}

async fn search_conversation(
    service: &HistoryService,
    project_id: &str,
    conversation_id: &str,
    term: &str,
    filter: &TypeFilter,
    json: bool,
) -> Result<()> {
    let messages = service
        .read_conversation(project_id, conversation_id)
        .await
        .with_context(|| format!("Failed to read conversation {}", conversation_id))?;
    let matches = service.search_in_conversation(&messages, term, filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No results found in this conversation");
        return Ok(());
    }

    let total = matches.len();
    for (index, message) in matches.iter().enumerate() {
        println!("Match {}/{}", index + 1, total);
        print_message(message);
    }

    Ok(())
}

async fn search_project(
    service: &HistoryService,
    project_id: &str,
    term: &str,
    filter: &TypeFilter,
    json: bool,
) -> Result<()> {
    let results = service
        .search_in_project(project_id, term, filter)
        .await
        .with_context(|| format!("Failed to search project {}", project_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results.matches)?);
        return Ok(());
    }

    println!("{}", results.summary());
    if results.conversations_failed > 0 {
        println!("Skipped {} unreadable conversations", results.conversations_failed);
    }
    println!();

    for hit in &results.matches {
        print_project_match(hit);
    }

    Ok(())
}

async fn export(
    service: &HistoryService,
    project_id: &str,
    conversation_id: &str,
    destination: Option<PathBuf>,
    today: NaiveDate,
) -> Result<()> {
    let destination = destination
        .unwrap_or_else(|| PathBuf::from(default_export_filename(conversation_id, today)));

    let outcome = service
        .export_conversation(project_id, conversation_id, &destination)
        .await
        .context("Failed to export conversation")?;

    println!("Exported to {}", outcome.saved_path.display());
    Ok(())
}

async fn backup(
    service: &HistoryService,
    project_id: &str,
    destination: Option<PathBuf>,
    name: Option<String>,
    json: bool,
    today: NaiveDate,
) -> Result<()> {
    let name = name.unwrap_or_else(|| Project::from_id(project_id).name);
    let destination =
        destination.unwrap_or_else(|| PathBuf::from(default_backup_filename(&name, today)));

    let report = service
        .backup_project(BackupRequest::new(project_id, name, destination))
        .await
        .context("Failed to backup project")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_backup_report(&report);
    }

    Ok(())
}

async fn open_saved(service: &HistoryService, file: &Path, json: bool) -> Result<()> {
    let saved = service
        .open_saved_conversation(file)
        .await
        .with_context(|| format!("Failed to open {}", file.display()))?;

    if json {
        println!("{}", render_conversation_json(&saved.messages)?);
        return Ok(());
    }

    println!("{}", sanitize(&saved.name));
    println!("  Messages: {}", saved.message_count);
    println!("  Last modified: {}", saved.last_modified.format("%Y-%m-%d %H:%M:%S"));
    println!("  Preview: {}", snippet(&saved.preview));

    Ok(())
}

fn print_message(message: &NormalizedMessage) {
    let timestamp = message.timestamp.as_ref().map(|t| match t.as_str() {
        Some(s) => s.to_string(),
        None => t.to_string(),
    });
    println!("[{}] {}", message.message_type, timestamp.unwrap_or_default());
    println!("{}", sanitize(&message.content));
    println!();
}

fn print_project_match(hit: &ProjectMatch) {
    println!(
        "[{}] {} ({})",
        hit.message.message_type,
        sanitize(&hit.conversation_id),
        hit.conversation_date.format("%Y-%m-%d")
    );
    println!("  {}", snippet(&hit.message.content));
}

fn print_backup_report(report: &BackupReport) {
    println!("Project backup completed!");
    println!();
    println!("Saved to: {}", report.saved_path.display());
    println!("Conversations: {}", report.conversation_count);
    println!("Size: {}", report.total_size_display());

    if !report.errors.is_empty() {
        println!();
        println!("Warning: {} conversation(s) failed to backup", report.errors.len());
        for error in &report.errors {
            println!("  {}: {}", sanitize(&error.file), sanitize(&error.error));
        }
    }
}

fn sanitize(text: &str) -> String {
    strip_ansi_codes(text)
}

/// First line of `text`, sanitized and cut to a terminal-friendly length
fn snippet(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let mut snippet: String = first_line.chars().take(SNIPPET_CHARS).collect();
    if first_line.chars().count() > SNIPPET_CHARS || text.lines().nth(1).is_some() {
        snippet.push_str("...");
    }
    sanitize(&snippet)
}
