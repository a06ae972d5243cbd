//! Implementation of the `bmsync init` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;

use crate::adapters::sqlite::{database_url, initialize_database};
use crate::cli::display::{action_failure, action_success, output, CommandOutput};
use crate::infrastructure::config::{ConfigLoader, CONFIG_DIR};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config.yaml
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_path: PathBuf,
    pub config_written: bool,
    pub database_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![if self.success {
            action_success(&self.message)
        } else {
            action_failure(&self.message)
        }];
        if self.config_written {
            lines.push(format!("  config:   {}", self.config_path.display()));
        }
        if self.success {
            lines.push(format!("  database: {}", self.database_path.display()));
            lines.push(String::new());
            lines.push(
                "Fill in auth and goals in config.yaml, then run `bmsync status`.".to_string(),
            );
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let out = run(args).await?;
    output(&out, json_mode);
    Ok(())
}

async fn run(args: InitArgs) -> Result<InitOutput> {
    let target = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let config_dir = target.join(CONFIG_DIR);
    let config_path = ConfigLoader::config_path(&config_dir);
    let database_path = config_dir.join("bmsync.db");

    if config_path.exists() && !args.force {
        return Ok(InitOutput {
            success: false,
            message: "Already initialized. Use --force to overwrite config.yaml.".to_string(),
            config_path,
            config_written: false,
            database_path,
        });
    }

    fs::create_dir_all(&config_dir)
        .await
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    fs::write(&config_path, ConfigLoader::template())
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    initialize_database(&database_url(&database_path.display().to_string()))
        .await
        .context("Failed to initialize database")?;

    Ok(InitOutput {
        success: true,
        message: if args.force {
            "Reinitialized bmsync.".to_string()
        } else {
            "Initialized bmsync.".to_string()
        },
        config_path,
        config_written: true,
        database_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_writes_config_and_database() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(InitArgs {
            force: false,
            path: dir.path().to_path_buf(),
        })
        .await
        .unwrap();

        assert!(out.success);
        assert!(out.config_path.exists());
        assert!(out.database_path.exists());
        ConfigLoader::load_from_file(&out.config_path).unwrap();
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let args = || InitArgs {
            force: false,
            path: dir.path().to_path_buf(),
        };
        run(args()).await.unwrap();
        std::fs::write(
            dir.path().join(CONFIG_DIR).join("config.yaml"),
            "auth:\n  user: alice\n",
        )
        .unwrap();

        let second = run(args()).await.unwrap();
        assert!(!second.success);
        let kept = std::fs::read_to_string(second.config_path).unwrap();
        assert!(kept.contains("alice"));

        let forced = run(InitArgs {
            force: true,
            path: dir.path().to_path_buf(),
        })
        .await
        .unwrap();
        assert!(forced.success);
    }
}
