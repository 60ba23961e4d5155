//
// Default configuration and default values:
//


/// Environment variable pointing to the watchdog configuration file:
pub const CONFIG_ENV: &str = "WATCHDOG_CONFIG";

/// Default configuration file name:
pub const CONFIG_FILE_NAME: &str = "watchdog.ini";

/// System wide configuration file:
pub const SYSTEM_CONFIG_FILE: &str = "/etc/website-watchdog/watchdog.ini";


/// INI section with SMTP settings
pub const EMAIL_SECTION: &str = "Email Notifications";

/// INI section with checker settings
pub const WATCHDOG_SECTION: &str = "Watchdog Configuration";


/// Site list field delimiter
pub const SITES_DELIMITER: u8 = b';';


/// Check timeout in seconds (applied to every attempt)
pub const CHECK_TIMEOUT: u64 = 30;

/// Max redirections followed when following redirects is enabled
pub const CHECK_MAX_REDIRECTIONS: u32 = 10;

/// The only HTTP code considered a success
pub const CHECK_SUCCESSFUL_HTTP_CODE: u32 = 200;

/// User agent name
pub const DEFAULT_AGENT_NAME: &str = "Website-Watchdog";


/// Default SMTP port for plain connections
pub const SMTP_PORT: u16 = 25;

/// Default SMTP port for STARTTLS connections
pub const SMTP_STARTTLS_PORT: u16 = 587;

/// Default SMTP port for implicit TLS connections
pub const SMTP_TLS_PORT: u16 = 465;

/// SMTP connection timeout in seconds
pub const SMTP_TIMEOUT: u64 = 60;


/// Notification subject
pub const NOTIFICATION_SUBJECT: &str = "[WebSite Watchdog] Failure";

/// First words of the notification body
pub const NOTIFICATION_HEADER: &str = "The following sites seemed to have a problem at";

/// Notification timestamp format (always UTC)
pub const NOTIFICATION_TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";
