use crate::{config::EmailConfig, products::report::RunReport, *};
use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use std::{fmt, time::Duration};


/// Delivery channel for failure reports
pub trait Deliver {
    /// Deliver a message with given subject and body
    fn deliver(&self, subject: &str, body: &str) -> Result<(), WatchdogError>;
}


/// Sends failure reports through an SMTP relay
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
    relay: String,
}


impl SmtpMailer {
    /// Build mailer from email settings. Nothing is sent (nor connected) here
    pub fn new(email: &EmailConfig) -> Result<SmtpMailer, WatchdogError> {
        let from = parse_mailbox("from_email", &email.from_email)?;
        let to = parse_mailbox("to_email", &email.to_email)?;

        let builder = match email.smtp_security {
            SmtpSecurity::None => SmtpTransport::builder_dangerous(&email.smtp_host),
            SmtpSecurity::StartTls => {
                SmtpTransport::starttls_relay(&email.smtp_host).map_err(|err| {
                    WatchdogError::Config(EMAIL_SECTION.to_string(), err.to_string())
                })?
            }
            SmtpSecurity::Tls => {
                SmtpTransport::relay(&email.smtp_host).map_err(|err| {
                    WatchdogError::Config(EMAIL_SECTION.to_string(), err.to_string())
                })?
            }
        }
        .port(email.port())
        .timeout(Some(Duration::from_secs(SMTP_TIMEOUT)));

        let builder = match email.credentials() {
            Some((username, password)) => {
                debug!("Using SMTP credentials of user: {}", username);
                builder.credentials(Credentials::new(username, password))
            }
            None => builder,
        };

        Ok(SmtpMailer {
            transport: builder.build(),
            from,
            to,
            relay: format!("{}:{}", email.smtp_host, email.port()),
        })
    }
}


impl Deliver for SmtpMailer {
    fn deliver(&self, subject: &str, body: &str) -> Result<(), WatchdogError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|err| WatchdogError::Notification(err.to_string()))?;

        debug!("Sending notification through SMTP relay: {}", self.relay);
        self.transport
            .send(&message)
            .map(|response| trace!("SMTP response: {:?}", response))
            .map_err(|err| {
                WatchdogError::Notification(format!(
                    "Couldn't send email through: {}. Error details: {}",
                    self.relay, err
                ))
            })
    }
}


impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("relay", &self.relay)
            .field("from", &self.from.to_string())
            .field("to", &self.to.to_string())
            .finish()
    }
}


fn parse_mailbox(key: &str, address: &str) -> Result<Mailbox, WatchdogError> {
    address.parse().map_err(|err| {
        WatchdogError::Config(
            EMAIL_SECTION.to_string(),
            format!("Invalid address in '{}': '{}'. Details: {}", key, address, err),
        )
    })
}


/// Failure report body, None when every site passed
pub fn failure_report(report: &RunReport, moment: DateTime<Utc>) -> Option<String> {
    if !report.has_failures() {
        return None;
    }
    let failures = report
        .failures()
        .map(|(url, result)| format!("{}: {}\n\n", url, result.reason))
        .collect::<String>();
    Some(format!(
        "{} {}\n\n{}",
        NOTIFICATION_HEADER,
        report_timestamp(moment),
        failures
    ))
}


/// Send failure report if any site failed
pub fn notify<D: Deliver + ?Sized>(deliverer: &D, report: &RunReport) -> Result<(), WatchdogError> {
    match failure_report(report, Utc::now()) {
        Some(body) => {
            info!(
                "Sending FAILURE notification about {} site(s)",
                report.failures().count()
            );
            debug!("Notification body: {}", body);
            deliverer.deliver(NOTIFICATION_SUBJECT, &body)
        }
        None => {
            info!("All {} site(s) seem up. No notification needed.", report.length());
            Ok(())
        }
    }
}
