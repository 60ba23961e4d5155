use crate::*;
use ini::Ini;
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::level_filters::LevelFilter;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
/// How the SMTP relay connection is secured
pub enum SmtpSecurity {
    /// Plain, unencrypted connection
    #[default]
    None,

    /// Plain connection upgraded with STARTTLS
    StartTls,

    /// Implicit TLS (SMTPS)
    Tls,
}


impl FromStr for SmtpSecurity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "none" | "plain" => Ok(SmtpSecurity::None),
            "starttls" => Ok(SmtpSecurity::StartTls),
            "tls" | "ssl" | "smtps" => Ok(SmtpSecurity::Tls),
            unknown => Err(format!("Unknown SMTP security mode: '{}'", unknown)),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// SMTP settings used to deliver failure reports
pub struct EmailConfig {
    /// SMTP relay host name
    pub smtp_host: String,

    /// SMTP relay port, defaults depend on security mode
    pub smtp_port: Option<u16>,

    /// Connection security
    pub smtp_security: SmtpSecurity,

    /// SMTP user name
    pub smtp_username: Option<String>,

    /// SMTP password
    #[serde(skip_serializing)]
    pub smtp_password: Option<String>,

    /// Sender address
    pub from_email: String,

    /// Recipient address
    pub to_email: String,
}


impl EmailConfig {
    /// SMTP port to connect to
    pub fn port(&self) -> u16 {
        self.smtp_port.unwrap_or(match self.smtp_security {
            SmtpSecurity::None => SMTP_PORT,
            SmtpSecurity::StartTls => SMTP_STARTTLS_PORT,
            SmtpSecurity::Tls => SMTP_TLS_PORT,
        })
    }


    /// Credentials pair, only when both user name and password are given
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.smtp_username, &self.smtp_password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Watchdog configuration, loaded once per run
pub struct Config {
    /// Email notification settings
    pub email: EmailConfig,

    /// Retries after a failed connection attempt
    pub retries: usize,

    /// Pause between connection attempts in seconds
    pub secs_between_retries: u64,

    /// Path to the site list
    pub sites_file: PathBuf,

    /// Per attempt timeout in seconds
    pub check_timeout: u64,

    /// Follow 3xx redirects instead of reporting them
    pub follow_redirects: bool,

    /// Check sites on a thread pool
    pub parallel_checks: bool,

    /// Log level for the watchdog
    pub log_level: Option<String>,
}


impl Config {
    /// Find the configuration file: env override first, then well known locations
    pub fn locate() -> Result<PathBuf, WatchdogError> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            debug!("Using configuration file from {}: {}", CONFIG_ENV, path);
            return Ok(PathBuf::from(path));
        }

        let mut candidates = vec![PathBuf::from(SYSTEM_CONFIG_FILE)];
        if let Some(exe_dir) = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(CONFIG_FILE_NAME));
        }
        candidates.push(PathBuf::from(CONFIG_FILE_NAME));
        trace!("Configuration candidates: {:?}", candidates);

        candidates
            .iter()
            .find(|candidate| candidate.exists())
            .cloned()
            .ok_or_else(|| {
                WatchdogError::Config(
                    CONFIG_FILE_NAME.to_string(),
                    format!(
                        "No configuration file found. Set {} or create one of: {:?}",
                        CONFIG_ENV, candidates
                    ),
                )
            })
    }


    /// Load watchdog configuration file
    pub fn load(path: &Path) -> Result<Config, WatchdogError> {
        let source = path.display().to_string();
        debug!("Loading configuration from: {}", source);
        let ini = Ini::load_from_file(path)
            .map_err(|err| WatchdogError::Config(source.clone(), err.to_string()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_ini(&ini, base_dir, &source)
    }


    /// Load watchdog configuration from INI text. Relative site list paths are resolved against base_dir
    pub fn load_from_str(contents: &str, base_dir: &Path) -> Result<Config, WatchdogError> {
        let ini = Ini::load_from_str(contents)
            .map_err(|err| WatchdogError::Config("<inline>".to_string(), err.to_string()))?;
        Self::from_ini(&ini, base_dir, "<inline>")
    }


    fn from_ini(ini: &Ini, base_dir: &Path, source: &str) -> Result<Config, WatchdogError> {
        let (smtp_host, smtp_port) =
            split_smtp_server(required(ini, source, EMAIL_SECTION, "smtp_server")?)
                .map_err(|err| WatchdogError::Config(source.to_string(), err))?;
        let smtp_security = optional(ini, EMAIL_SECTION, "smtp_security")
            .map(SmtpSecurity::from_str)
            .transpose()
            .map_err(|err| WatchdogError::Config(source.to_string(), err))?
            .unwrap_or_default();

        let email = EmailConfig {
            smtp_host,
            smtp_port,
            smtp_security,
            smtp_username: optional(ini, EMAIL_SECTION, "smtp_username").map(String::from),
            smtp_password: optional(ini, EMAIL_SECTION, "smtp_password").map(String::from),
            from_email: required(ini, source, EMAIL_SECTION, "from_email")?.to_string(),
            to_email: required(ini, source, EMAIL_SECTION, "to_email")?.to_string(),
        };

        let sites_file = PathBuf::from(required(
            ini,
            source,
            WATCHDOG_SECTION,
            "config_file_path",
        )?);
        let sites_file = if sites_file.is_relative() {
            base_dir.join(sites_file)
        } else {
            sites_file
        };

        // 0 means "no timeout" for Curl
        let check_timeout = match optional(ini, WATCHDOG_SECTION, "check_timeout") {
            Some(value) => {
                match parse_number(source, "check_timeout", value)? {
                    0 => {
                        return Err(WatchdogError::Config(
                            source.to_string(),
                            format!(
                                "Value of 'check_timeout' must be a positive integer, got: '{}'",
                                value
                            ),
                        ))
                    }
                    seconds => seconds,
                }
            }
            None => CHECK_TIMEOUT,
        };

        Ok(Config {
            email,
            retries: parse_number(
                source,
                "retries",
                required(ini, source, WATCHDOG_SECTION, "retries")?,
            )?,
            secs_between_retries: parse_number(
                source,
                "secs_between_retries",
                required(ini, source, WATCHDOG_SECTION, "secs_between_retries")?,
            )?,
            sites_file,
            check_timeout,
            follow_redirects: parse_flag(ini, source, "follow_redirects")?,
            parallel_checks: parse_flag(ini, source, "parallel_checks")?,
            log_level: optional(ini, WATCHDOG_SECTION, "log_level").map(String::from),
        })
    }


    /// Get LevelFilter (log level) from configuration
    pub fn get_log_level(&self) -> LevelFilter {
        let level = self.log_level.clone().unwrap_or_default().to_uppercase();
        match &level[..] {
            "OFF" => LevelFilter::OFF,
            "ERROR" => LevelFilter::ERROR,
            "WARN" => LevelFilter::WARN,
            "INFO" => LevelFilter::INFO,
            "DEBUG" => LevelFilter::DEBUG,
            "TRACE" => LevelFilter::TRACE,
            _ => LevelFilter::INFO,
        }
    }
}


fn optional<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.section(Some(section))
        .and_then(|properties| properties.get(key))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}


fn required<'a>(
    ini: &'a Ini,
    source: &str,
    section: &str,
    key: &str,
) -> Result<&'a str, WatchdogError> {
    optional(ini, section, key).ok_or_else(|| {
        WatchdogError::Config(
            source.to_string(),
            format!("Missing value: '{}' in section: [{}]", key, section),
        )
    })
}


fn parse_number<T: FromStr>(source: &str, key: &str, value: &str) -> Result<T, WatchdogError> {
    value.parse().map_err(|_| {
        WatchdogError::Config(
            source.to_string(),
            format!("Value of '{}' must be a non negative integer, got: '{}'", key, value),
        )
    })
}


fn parse_flag(ini: &Ini, source: &str, key: &str) -> Result<bool, WatchdogError> {
    match optional(ini, WATCHDOG_SECTION, key).map(str::to_lowercase).as_deref() {
        None | Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some(other) => {
            Err(WatchdogError::Config(
                source.to_string(),
                format!("Value of '{}' must be a boolean, got: '{}'", key, other),
            ))
        }
    }
}


/// Split "host", "host:port", "[v6-address]" or "[v6-address]:port"
fn split_smtp_server(server: &str) -> Result<(String, Option<u16>), String> {
    if let Some(bracketed) = server.strip_prefix('[') {
        return match bracketed.split_once(']') {
            Some((host, "")) if !host.is_empty() => Ok((host.to_string(), None)),
            Some((host, rest)) if !host.is_empty() => {
                match rest.strip_prefix(':') {
                    Some(port) => parse_smtp_port(server, port).map(|port| (host.to_string(), Some(port))),
                    None => Err(format!("Invalid SMTP server: '{}'", server)),
                }
            }
            _ => Err(format!("Invalid SMTP server: '{}'", server)),
        };
    }
    match server.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => {
            parse_smtp_port(server, port).map(|port| (host.to_string(), Some(port)))
        }
        Some(_) => Err(format!("Invalid SMTP server: '{}'", server)),
        None => Ok((server.to_string(), None)),
    }
}


fn parse_smtp_port(server: &str, port: &str) -> Result<u16, String> {
    port.parse()
        .map_err(|_| format!("Invalid SMTP port: '{}' in: '{}'", port, server))
}
