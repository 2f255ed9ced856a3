use clap::{ArgAction, Parser, builder::BoolishValueParser};
use oapi_core::loaders::LoaderConfig;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "oapi-mcpd", version, about = "OpenAPI catalog MCP daemon.")]
#[allow(clippy::struct_excessive_bools)]
struct CliArgs {
    #[arg(long, env = "OAPI_REGISTRY_URL")]
    registry_url: Option<String>,

    #[arg(long, env = "OAPI_SPEC_URLS", value_delimiter = ',')]
    spec_urls: Vec<String>,

    #[arg(long, env = "OAPI_SPECS_DIR")]
    specs_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "OAPI_FETCH_TIMEOUT_SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS
    )]
    fetch_timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "OAPI_ENABLE_STDIO",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long = "http",
        env = "OAPI_MCP_SERVE",
        default_value_t = false,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "OAPI_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "OAPI_MCP_STATELESS",
        default_value_t = false,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateless: bool,

    #[arg(
        long,
        env = "OAPI_LOG_JSON",
        default_value_t = false,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    log_json: bool,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct OapiConfig {
    pub registry_url: Option<Url>,
    pub spec_urls: Vec<Url>,
    pub specs_dir: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub mcp_stateless: bool,
    pub log_json: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl OapiConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Source settings handed to the spec loader.
    pub fn loader_config(&self) -> LoaderConfig {
        let mut config = LoaderConfig::new()
            .with_spec_urls(self.spec_urls.clone())
            .with_fetch_timeout(self.fetch_timeout);
        if let Some(registry_url) = &self.registry_url {
            config = config.with_registry_url(registry_url.clone());
        }
        if let Some(specs_dir) = &self.specs_dir {
            config = config.with_specs_dir(specs_dir.clone());
        }
        config
    }
}

impl TryFrom<CliArgs> for OapiConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let registry_url = args
            .registry_url
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_http_url("OAPI_REGISTRY_URL", &value))
            .transpose()?;

        let spec_urls = args
            .spec_urls
            .iter()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(|value| parse_http_url("OAPI_SPEC_URLS", value))
            .collect::<Result<Vec<_>, _>>()?;

        let specs_dir = args
            .specs_dir
            .filter(|path| !path.as_os_str().is_empty());
        if let Some(dir) = specs_dir.as_ref() {
            check_specs_dir(dir)?;
        }

        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::MissingSetting("OAPI_ENABLE_STDIO or OAPI_MCP_SERVE"));
        }

        if args.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "OAPI_FETCH_TIMEOUT_SECS",
                value: args.fetch_timeout_secs.to_string(),
            });
        }

        let config = Self {
            registry_url,
            spec_urls,
            specs_dir,
            fetch_timeout: Duration::from_secs(args.fetch_timeout_secs),
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateless: args.mcp_stateless,
            log_json: args.log_json,
        };
        if !config.loader_config().has_sources() {
            return Err(ConfigError::MissingSetting(
                "OAPI_REGISTRY_URL, OAPI_SPEC_URLS, or OAPI_SPECS_DIR",
            ));
        }
        Ok(config)
    }
}

fn parse_http_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidSetting {
        name,
        value: value.to_string(),
    };
    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(invalid())
    }
}

fn check_specs_dir(dir: &std::path::Path) -> Result<(), ConfigError> {
    let readable = dir.is_dir() && std::fs::read_dir(dir).is_ok();
    if readable {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting {
            name: "OAPI_SPECS_DIR",
            value: dir.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            registry_url: None,
            spec_urls: Vec::new(),
            specs_dir: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            enable_stdio: true,
            mcp_serve: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            mcp_stateless: false,
            log_json: false,
        }
    }

    #[test]
    fn requires_at_least_one_source() {
        let err = OapiConfig::try_from(base_args()).expect_err("no sources configured");
        assert!(matches!(err, ConfigError::MissingSetting(_)));

        let mut args = base_args();
        args.registry_url = Some("   ".to_string());
        args.spec_urls = vec![String::new()];
        assert!(OapiConfig::try_from(args).is_err());
    }

    #[test]
    fn parses_url_sources() {
        let mut args = base_args();
        args.registry_url = Some("https://registry.test/index.json".to_string());
        args.spec_urls = vec![
            " https://specs.test/a.json".to_string(),
            "http://specs.test/b.yaml".to_string(),
        ];

        let config = OapiConfig::try_from(args).expect("config should parse");
        let loader = config.loader_config();

        assert_eq!(config.spec_urls.len(), 2);
        assert!(loader.registry_url.is_some());
        assert_eq!(loader.spec_urls[0].as_str(), "https://specs.test/a.json");
        assert!(loader.specs_dir.is_none());
    }

    #[test]
    fn rejects_non_http_urls() {
        let mut args = base_args();
        args.spec_urls = vec!["ftp://specs.test/a.json".to_string()];
        let err = OapiConfig::try_from(args).expect_err("ftp is not supported");
        assert!(matches!(
            err,
            ConfigError::InvalidSetting { name: "OAPI_SPEC_URLS", .. }
        ));
    }

    #[test]
    fn validates_specs_dir() {
        let dir = tempfile::tempdir().expect("tempdir");

        let mut args = base_args();
        args.specs_dir = Some(dir.path().to_path_buf());
        let config = OapiConfig::try_from(args).expect("existing folder is accepted");
        assert_eq!(config.specs_dir.as_deref(), Some(dir.path()));

        let mut args = base_args();
        args.specs_dir = Some(dir.path().join("missing"));
        let err = OapiConfig::try_from(args).expect_err("missing folder is fatal");
        assert!(matches!(
            err,
            ConfigError::InvalidSetting { name: "OAPI_SPECS_DIR", .. }
        ));
    }

    #[test]
    fn requires_a_transport() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut args = base_args();
        args.specs_dir = Some(dir.path().to_path_buf());
        args.enable_stdio = false;

        let err = OapiConfig::try_from(args).expect_err("no transport enabled");
        assert!(matches!(err, ConfigError::MissingSetting(_)));
    }
}
