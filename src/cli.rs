#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use clap::Parser;
use eyre::{Context, Result};

use crate::config::{self, Configuration, load_configuration, lookup_config_path, validate};

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"Shows agent reminders and notifications pushed by the blog server

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/agent-notifier/config.toml
    * $HOME/.config/agent-notifier/config.toml
    * $HOME/.agent-notifier.toml
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Origin of the web application, e.g. https://blog.example.com
    #[arg(short, long, value_name = "URL")]
    origin: Option<String>,

    /// Print start-up progress to stderr
    #[arg(long)]
    verbose: bool,

    /// Show the version
    #[arg(short, long)]
    version: bool,
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        let mut config = if config_path.is_empty() {
            // No config path is specified just use the default config
            Configuration::default()
        } else {
            load_configuration(config_path.as_str()).wrap_err("loading configuration")?
        };

        if let Some(origin) = &self.origin {
            config.server.origin = origin.clone();
        }
        if self.verbose {
            config.general.verbose = true;
        }
        validate(&config).wrap_err("validating configuration")?;
        Ok(config)
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }
}
