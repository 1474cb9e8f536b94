use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::domain::model::{ApplicationStatus, DatabaseType, MediaType, Requirement};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "asm3")]
#[command(about = "Client for the campaign management backend")]
pub struct CliConfig {
    #[arg(long, help = "Backend base URL [default: http://localhost:8000]")]
    pub base_url: Option<String>,

    #[arg(long, value_enum, help = "Database backend [default: postgres]")]
    pub db: Option<DatabaseType>,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Request timeout in seconds [default: 30]")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// 合併預設值、設定檔與命令列參數並驗證
    pub fn resolve(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path.display());
            config = TomlConfig::from_file(path)?.apply_to(config);
        }

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(db) = self.db {
            config.db_type = db;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Manage organizations
    Organizations {
        #[command(subcommand)]
        action: OrganizationCommand,
    },
    /// Manage campaigns
    Campaigns {
        #[command(subcommand)]
        action: CampaignCommand,
    },
    /// Manage campaign applications
    Applications {
        #[command(subcommand)]
        action: ApplicationCommand,
    },
}

#[derive(Clone, Subcommand)]
pub enum UserCommand {
    List,
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

// 密碼不寫進日誌
impl fmt::Debug for UserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const REDACTED: &str = "***";
        match self {
            UserCommand::List => f.write_str("List"),
            UserCommand::Create {
                username, email, ..
            } => f
                .debug_struct("Create")
                .field("username", username)
                .field("email", email)
                .field("password", &REDACTED)
                .finish(),
            UserCommand::Update {
                id,
                username,
                email,
                password,
            } => f
                .debug_struct("Update")
                .field("id", id)
                .field("username", username)
                .field("email", email)
                .field("password", &password.as_ref().map(|_| REDACTED))
                .finish(),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum OrganizationCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CampaignCommand {
    List {
        #[arg(long)]
        organization_id: Option<i64>,
    },
    Create {
        #[arg(long)]
        organizer_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long = "requirement", value_parser = parse_requirement, help = "MEDIA:COUNT, e.g. photo:3")]
        requirements: Vec<Requirement>,
    },
    Update {
        id: i64,
        #[arg(long)]
        organizer_id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "requirement", value_parser = parse_requirement, help = "MEDIA:COUNT, e.g. photo:3")]
        requirements: Vec<Requirement>,
    },
    /// List applications submitted to one campaign
    Applications { campaign_id: i64 },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ApplicationCommand {
    List {
        #[arg(long)]
        campaign_id: Option<i64>,
        #[arg(long)]
        user_id: Option<i64>,
    },
    Create {
        #[arg(long)]
        campaign_id: i64,
        #[arg(long)]
        user_id: i64,
        #[arg(long, value_enum)]
        status: ApplicationStatus,
    },
    Update {
        id: i64,
        #[arg(long)]
        campaign_id: Option<i64>,
        #[arg(long)]
        user_id: Option<i64>,
        #[arg(long, value_enum)]
        status: Option<ApplicationStatus>,
    },
}

/// 解析 `photo:3` 形式的素材需求
pub fn parse_requirement(raw: &str) -> std::result::Result<Requirement, String> {
    let (media, count) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected MEDIA:COUNT, got '{}'", raw))?;
    let media_type: MediaType = media.trim().parse().map_err(|e| format!("{}", e))?;
    let count: f64 = count
        .trim()
        .parse()
        .map_err(|_| format!("invalid count '{}'", count))?;
    Ok(Requirement { media_type, count })
}
