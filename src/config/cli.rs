use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "comic-recap")]
#[command(about = "Recaps the story so far for a Marvel comic issue")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "MARVEL_PUBLIC", hide_env_values = true)]
    pub marvel_public: Option<String>,

    #[arg(long, global = true, env = "MARVEL_PRIVATE", hide_env_values = true)]
    pub marvel_private: Option<String>,

    #[arg(long, global = true, env = "OLLAMA_LOCAL_HOST")]
    pub ollama_host: Option<String>,

    #[arg(long, global = true, help = "Model used to write the recap")]
    pub model: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print a recap for the issue with the given UPC
    Recap {
        #[arg(long)]
        upc: String,

        #[arg(long, help = "Print {\"message\": ...} instead of plain text")]
        json: bool,
    },
    /// Serve POST /recap over HTTP
    #[cfg(feature = "server")]
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

impl CliConfig {
    /// 讀取設定檔 (若有)，再以命令列與環境變數覆寫
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        #[cfg(feature = "server")]
        {
            if let Command::Serve { bind: Some(bind) } = &self.command {
                config.server.bind = bind.clone();
            }
        }
        if let Some(public) = &self.marvel_public {
            config.catalog.public_key = public.clone();
        }
        if let Some(private) = &self.marvel_private {
            config.catalog.private_key = private.clone();
        }
        if let Some(host) = &self.ollama_host {
            config.llm.host = host.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
    }
}
