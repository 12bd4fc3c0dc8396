//! The `loupe config` command for configuration management.

use clap::{Args, Subcommand};
use loupe_core::Config;
use std::path::Path;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved extraction settings
    Show {
        /// Dump raw TOML instead of the summary
        #[arg(long)]
        toml: bool,
    },

    /// Print the config file path
    Path,

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    let path = Config::default_path();
    match args.command {
        ConfigCommand::Show { toml } => {
            let config = Config::load()?;
            if toml {
                print!("{}", config.to_toml()?);
            } else {
                print!("{}", render_summary(&config, &path));
            }
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (pass --force to overwrite)",
                    path.display()
                );
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, Config::default().to_toml()?)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

/// One line per setting: the resolved values the next `inspect` run will
/// actually use, plus where they came from.
fn render_summary(config: &Config, path: &Path) -> String {
    let origin = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found; using defaults)", path.display())
    };

    let mut out = String::new();
    out.push_str(&format!("Config file:      {origin}\n"));
    out.push_str(&format!(
        "Extensions:       {}\n",
        config.filter.extensions.join(", ")
    ));
    out.push_str(&format!(
        "Size cap:         {} MiB\n",
        config.filter.max_file_size_mb
    ));
    out.push_str(&format!(
        "Parallel fetches: {}\n",
        config.extraction.parallel_fetches
    ));
    out.push_str(&format!(
        "Fetch timeout:    {} ms\n",
        config.extraction.fetch_timeout_ms
    ));
    out.push_str(&format!(
        "Output:           {}{}\n",
        config.output.format,
        if config.output.pretty { " (pretty)" } else { "" }
    ));
    out.push_str(&format!(
        "Logging:          {} ({})\n",
        config.logging.level, config.logging.format
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_extractor_settings() {
        let path = Path::new("/nonexistent/loupe/config.toml");
        let summary = render_summary(&Config::default(), path);

        assert!(summary.contains("Extensions:       png, jpg, jpeg, webp"));
        assert!(summary.contains("Size cap:         10 MiB"));
        assert!(summary.contains("Parallel fetches: 4"));
        assert!(summary.contains("Fetch timeout:    30000 ms"));
        assert!(summary.contains("Output:           text"));
    }

    #[test]
    fn test_summary_marks_missing_file_as_defaults() {
        let path = Path::new("/nonexistent/loupe/config.toml");
        let summary = render_summary(&Config::default(), path);
        assert!(summary.contains("(not found; using defaults)"));
    }

    #[test]
    fn test_summary_shows_path_when_file_exists() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let summary = render_summary(&Config::default(), file.path());
        assert!(summary.contains(&file.path().display().to_string()));
        assert!(!summary.contains("not found"));
    }

    #[test]
    fn test_summary_flags_pretty_output() {
        let mut config = Config::default();
        config.output.format = "json".to_string();
        config.output.pretty = true;

        let summary = render_summary(&config, Path::new("/nonexistent"));
        assert!(summary.contains("Output:           json (pretty)"));
    }
}
