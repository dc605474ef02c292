use clap::Parser;
use sqlx::mysql::MySqlConnectOptions;
use std::{env, fmt, str::FromStr};
use thiserror::Error;

const DATABASE_VARS: [&str; 4] = ["DB_HOST", "DB_USER", "DB_PASSWORD", "DB_NAME"];
const OBJECT_STORE_VARS: [&str; 4] = [
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_REGION",
    "S3_BUCKET_NAME",
];

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub database: DatabaseConfig,
    pub object_store: ObjectStoreConfig,
}

/// Connection settings for the MySQL product store.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

/// Credentials and location of the banner object.
#[derive(Clone)]
pub struct ObjectStoreConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
    pub object_key: String,
}

/// Command-line configuration. Required credentials only come from the environment.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Product listing page with a signed banner link")]
pub struct Args {
    /// Host to bind to (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory served under /static (overrides STATIC_DIR)
    #[arg(long)]
    pub static_dir: Option<String>,

    /// Object key to sign on every request (overrides S3_OBJECT_KEY)
    #[arg(long)]
    pub object_key: Option<String>,

    /// Maximum pooled database connections (overrides DB_POOL_MAX)
    #[arg(long)]
    pub pool_max: Option<u32>,

    /// Create the products table and exit
    #[arg(long)]
    pub migrate: bool,
}

/// A group of required variables that must be supplied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigGroup {
    Database,
    ObjectStore,
}

impl fmt::Display for ConfigGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigGroup::Database => write!(f, "database"),
            ConfigGroup::ObjectStore => write!(f, "object store"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingGroup {
    pub group: ConfigGroup,
    pub vars: Vec<&'static str>,
}

impl fmt::Display for MissingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} configuration is incomplete (missing {})",
            self.group,
            self.vars.join(", ")
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}", join_missing(.0))]
    Incomplete(Vec<MissingGroup>),
    #[error("invalid value `{value}` for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    /// Groups that failed validation, empty for malformed optional values.
    pub fn incomplete_groups(&self) -> Vec<ConfigGroup> {
        match self {
            ConfigError::Incomplete(missing) => missing.iter().map(|m| m.group).collect(),
            ConfigError::Invalid { .. } => Vec::new(),
        }
    }
}

fn join_missing(missing: &[MissingGroup]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool), ConfigError> {
        let args = Args::parse();
        Self::resolve(args, |name| env::var(name).ok())
    }

    /// Merge CLI args over values produced by `lookup`.
    ///
    /// Every required group is checked before returning, so a single error
    /// names all incomplete groups at once.
    pub fn resolve<F>(args: Args, lookup: F) -> Result<(Self, bool), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let database = required_group(&lookup, ConfigGroup::Database, DATABASE_VARS, &mut missing);
        let object_store = required_group(
            &lookup,
            ConfigGroup::ObjectStore,
            OBJECT_STORE_VARS,
            &mut missing,
        );

        let (Some([db_host, db_user, db_password, db_name]), Some([access, secret, region, bucket])) =
            (database, object_store)
        else {
            return Err(ConfigError::Incomplete(missing));
        };

        let env_host = optional(&lookup, "HOST").unwrap_or_else(|| "0.0.0.0".into());
        let env_port = parse_optional(&lookup, "PORT", 3000u16)?;
        let db_port = parse_optional(&lookup, "DB_PORT", 3306u16)?;
        let env_pool_max = parse_optional(&lookup, "DB_POOL_MAX", 10u32)?;
        let env_static = optional(&lookup, "STATIC_DIR").unwrap_or_else(|| "./public".into());
        let env_key = optional(&lookup, "S3_OBJECT_KEY").unwrap_or_else(|| "banner.jpg".into());

        let max_connections = args.pool_max.unwrap_or(env_pool_max);
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_POOL_MAX",
                value: max_connections.to_string(),
                reason: "must be at least 1".into(),
            });
        }

        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            static_dir: args.static_dir.unwrap_or(env_static),
            database: DatabaseConfig {
                host: db_host,
                port: db_port,
                user: db_user,
                password: db_password,
                name: db_name,
                max_connections,
            },
            object_store: ObjectStoreConfig {
                access_key_id: access,
                secret_access_key: secret,
                region,
                bucket,
                object_key: args.object_key.unwrap_or(env_key),
            },
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

// Secrets stay out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("static_dir", &self.static_dir)
            .field("database", &self.database)
            .field("object_store", &self.object_store)
            .finish()
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl fmt::Debug for ObjectStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("object_key", &self.object_key)
            .finish()
    }
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn parse_optional<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, name) {
        Some(value) => value.trim().parse::<T>().map_err(|err| ConfigError::Invalid {
            name,
            reason: err.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

/// Returns the group's values in declaration order, or records which are absent.
fn required_group<F>(
    lookup: &F,
    group: ConfigGroup,
    names: [&'static str; 4],
    missing: &mut Vec<MissingGroup>,
) -> Option<[String; 4]>
where
    F: Fn(&str) -> Option<String>,
{
    let values = names.map(|name| optional(lookup, name));
    let absent: Vec<&'static str> = names
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();

    if !absent.is_empty() {
        missing.push(MissingGroup {
            group,
            vars: absent,
        });
        return None;
    }

    Some(values.map(Option::unwrap_or_default))
}
