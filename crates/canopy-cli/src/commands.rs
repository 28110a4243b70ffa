use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use canopy_explorer::Explorer;
use canopy_remote::{AuthMethod, GitlabRemote, TokenRecord};
use canopy_stage::{FileUpload, TreeNode};
use chrono::Utc;
use colored::Colorize;

use crate::cli::{ApplyArgs, Cli, Command, LoginArgs};
use crate::config::{self, CliConfig};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Login(args) => cmd_login(args),
        Command::Tree(_) => cmd_tree(cli.config.as_deref()).await,
        Command::Apply(args) => cmd_apply(cli.config.as_deref(), args).await,
    }
}

fn cmd_login(args: LoginArgs) -> anyhow::Result<()> {
    let record = match args.expires_in {
        Some(seconds) => TokenRecord::with_expiry(args.token, seconds, Utc::now()),
        None => TokenRecord::new(args.token),
    };
    let path = config::save_token(&record, None)?;
    println!("{} Token stored at {}", "✓".green().bold(), path.display());
    if let Some(expires_at) = record.expires_at {
        println!("  Expires: {}", expires_at.to_rfc3339().yellow());
    }
    Ok(())
}

async fn cmd_tree(config_path: Option<&Path>) -> anyhow::Result<()> {
    let (mut explorer, settings) = build_explorer(config_path)?;
    let snapshot = explorer.refresh().await?;

    if !settings.repository_path.is_empty() {
        println!(
            "{} {} ({})",
            settings.repository_path.bold(),
            format!("/{}", settings.root_path).cyan(),
            settings.branch.yellow()
        );
    }
    if snapshot.roots.is_empty() {
        println!("(empty tree)");
        return Ok(());
    }
    print_nodes(&snapshot.roots, 1);
    Ok(())
}

async fn cmd_apply(config_path: Option<&Path>, args: ApplyArgs) -> anyhow::Result<()> {
    let (mut explorer, settings) = build_explorer(config_path)?;
    if settings.repository_path.is_empty() {
        bail!("no repository_path configured; set it in the config file");
    }
    explorer.refresh().await?;

    for spec in &args.mkdir {
        let (parent, name) = parse_mkdir_spec(spec);
        explorer
            .create_folder(parent, name)
            .with_context(|| format!("failed to stage folder {spec:?}"))?;
    }
    for spec in &args.upload {
        let (local, parent) = parse_upload_spec(spec);
        let content = std::fs::read(local).with_context(|| format!("failed to read {local}"))?;
        let name = Path::new(local)
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("no usable file name in {local:?}"))?;
        explorer
            .create_files(parent, vec![FileUpload::new(name, content)])
            .with_context(|| format!("failed to stage upload {spec:?}"))?;
    }
    for path in &args.delete {
        explorer
            .delete(path)
            .with_context(|| format!("failed to stage deletion of {path:?}"))?;
    }

    let message = explorer.begin_commit()?.message.clone();
    println!("{}", "Staged changes:".bold());
    for line in message.lines() {
        println!("  {line}");
    }

    if args.dry_run {
        explorer.cancel_commit();
        println!("\n{} Dry run; nothing submitted.", "✓".green());
        return Ok(());
    }
    if !args.yes {
        explorer.cancel_commit();
        println!("\nRe-run with {} to submit.", "--yes".bold());
        return Ok(());
    }

    let (commit, _) = explorer.submit_commit().await?;
    println!(
        "\n{} Commit {} accepted on {}",
        "✓".green().bold(),
        commit.id.yellow(),
        settings.branch.bold()
    );
    Ok(())
}

fn build_explorer(config_path: Option<&Path>) -> anyhow::Result<(Explorer, CliConfig)> {
    let settings = config::load(config_path)?;
    let remote = GitlabRemote::new(&settings.base_url, resolve_auth()?);
    let explorer = Explorer::new(settings.explorer_config(), Arc::new(remote));
    Ok((explorer, settings))
}

/// Token resolution order: `CANOPY_TOKEN`, then the persisted record, then
/// anonymous access.
fn resolve_auth() -> anyhow::Result<AuthMethod> {
    if let Ok(token) = std::env::var("CANOPY_TOKEN") {
        if !token.is_empty() {
            return Ok(AuthMethod::Bearer(token));
        }
    }
    match config::load_token(None)? {
        Some(record) => {
            if record.is_expired(Utc::now()) {
                bail!("stored token has expired; run `canopy login` again");
            }
            Ok(record.auth_method())
        }
        None => Ok(AuthMethod::Anonymous),
    }
}

/// Folders before files; relative order within each group is preserved.
fn print_nodes(nodes: &[TreeNode], depth: usize) {
    let mut ordered: Vec<&TreeNode> = nodes.iter().collect();
    ordered.sort_by_key(|tree_node| !tree_node.node.kind.is_folder());

    for tree_node in ordered {
        let node = &tree_node.node;
        let indent = "  ".repeat(depth);
        let label = if node.kind.is_folder() {
            format!("{}/", node.name).blue().bold()
        } else if node.flags.deleted {
            node.name.red().strikethrough()
        } else if node.flags.new {
            node.name.green()
        } else {
            node.name.normal()
        };
        let marker = if node.flags.deleted {
            "-".red()
        } else if node.flags.new {
            "+".green()
        } else {
            " ".normal()
        };
        println!("{indent}{marker} {label}");
        print_nodes(&tree_node.children, depth + 1);
    }
}

fn parse_mkdir_spec(spec: &str) -> (&str, &str) {
    match spec.split_once(':') {
        Some((parent, name)) => (parent, name),
        None => ("", spec),
    }
}

fn parse_upload_spec(spec: &str) -> (&str, &str) {
    match spec.split_once(':') {
        Some((local, parent)) => (local, parent),
        None => (spec, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mkdir_spec_with_parent() {
        assert_eq!(parse_mkdir_spec("docs:images"), ("docs", "images"));
    }

    #[test]
    fn mkdir_spec_at_root() {
        assert_eq!(parse_mkdir_spec("images"), ("", "images"));
    }

    #[test]
    fn upload_spec_with_parent() {
        assert_eq!(
            parse_upload_spec("local.png:docs/images"),
            ("local.png", "docs/images")
        );
    }

    #[test]
    fn upload_spec_at_root() {
        assert_eq!(parse_upload_spec("notes.txt"), ("notes.txt", ""));
    }
}
