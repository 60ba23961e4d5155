use crate::{
    checks::Checker,
    products::{check_result::CheckResult, expected::Expected, unexpected::Unexpected},
    *,
};
use curl::{easy::Easy2, Error as CurlError};
use http::StatusCode;
use retry::{delay::Fixed, retry_with_index, Error as RetryError, OperationResult};
use std::time::Duration;
use url::Url;


#[derive(Debug, Clone, PartialEq, Eq)]
/// Page returned by a successful connection attempt
pub struct PageResponse {
    /// HTTP response code
    pub code: u32,

    /// Reason phrase from the status line (may be empty)
    pub status_text: String,

    /// Decoded page content
    pub content: String,
}


impl PageResponse {
    /// Status as "<code> <reason>", ex. "404 Not Found"
    pub fn status(&self) -> String {
        let reason = if self.status_text.is_empty() {
            canonical_reason(self.code)
        } else {
            self.status_text.clone()
        };
        format!("{} {}", self.code, reason).trim_end().to_string()
    }
}


/// Site checker performing GET requests with Curl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteChecker {
    timeout: Duration,
    retries: usize,
    secs_between_retries: u64,
    follow_redirects: bool,
}


impl SiteChecker {
    /// New checker using timeout and retry policy from the configuration
    pub fn new(config: &Config) -> SiteChecker {
        SiteChecker {
            // 0 would disable Curl timeouts
            timeout: Duration::from_secs(match config.check_timeout {
                0 => CHECK_TIMEOUT,
                seconds => seconds,
            }),
            retries: config.retries,
            secs_between_retries: config.secs_between_retries,
            follow_redirects: config.follow_redirects,
        }
    }


    /// Single connection attempt. Every call uses a fresh Curl handle
    pub fn fetch(&self, url: &Url) -> Result<PageResponse, CurlError> {
        let mut curl = Easy2::new(Collector::default());
        curl.url(url.as_str())?;
        trace!("Curl URL: {}", url);

        curl.get(true)?;
        curl.useragent(&format!(
            "{name}/{version}",
            name = DEFAULT_AGENT_NAME,
            version = env!("CARGO_PKG_VERSION")
        ))?;

        if self.follow_redirects {
            trace!("Enabled following redirects.");
            curl.follow_location(true)?;
            curl.max_redirections(CHECK_MAX_REDIRECTIONS)?;
        } else {
            trace!("Disabled following redirects.");
            curl.follow_location(false)?;
        }

        // Same timeout for connection and the whole transfer, on every attempt
        curl.connect_timeout(self.timeout)?;
        curl.timeout(self.timeout)?;

        // Empty value: accept (and decode) every encoding Curl supports
        curl.accept_encoding("")?;

        curl.perform()?;
        let code = curl.response_code()?;
        let collector = curl.get_ref();
        trace!("Response from: {}: {:?}", url, collector);
        Ok(PageResponse {
            code,
            status_text: collector.status_text(),
            content: collector.content(),
        })
    }


    /// Fetch page, retrying transport failures up to configured amount of times.
    /// Any other Curl error ends the check at once
    pub fn fetch_with_retries(&self, url: &Url) -> Result<PageResponse, RetryError<CurlError>> {
        let attempts = self.retries + 1;
        let delays = Fixed::from_millis(self.secs_between_retries.saturating_mul(1000)).take(self.retries);
        retry_with_index(delays, |attempt| {
            debug!("Attempt {} of {} for: {}", attempt, attempts, url);
            match self.fetch(url) {
                Ok(response) => OperationResult::Ok(response),
                Err(err) if is_transport_failure(&err) => {
                    warn!(
                        "Attempt {} of {} to contact: {} failed. Details: {}",
                        attempt,
                        attempts,
                        url,
                        describe_curl_error(&err)
                    );
                    OperationResult::Retry(err)
                }
                Err(err) => {
                    warn!(
                        "Request to: {} failed without retry. Details: {}",
                        url,
                        describe_curl_error(&err)
                    );
                    OperationResult::Err(err)
                }
            }
        })
    }


    /// Validate HTTP code, then every required content in order. First failure wins
    pub fn validate(response: &PageResponse, required: &[String]) -> CheckResult {
        if response.code != CHECK_SUCCESSFUL_HTTP_CODE {
            return CheckResult::error(Unexpected::HttpCodeInvalid(response.status()));
        }
        required
            .iter()
            .find(|content| !response.content.contains(content.as_str()))
            .map(|missing| CheckResult::error(Unexpected::ContentInvalid(missing.to_string())))
            .unwrap_or_else(|| CheckResult::success(Expected::SiteUp))
    }
}


impl Checker for SiteChecker {
    #[instrument(skip(self, required))]
    fn check(&self, url: &str, required: &[String]) -> CheckResult {
        let page_url = match parse_url(url) {
            Ok(page_url) => page_url,
            Err(unexpected) => {
                error!("{}", unexpected);
                return CheckResult::error(unexpected);
            }
        };

        let result = match self.fetch_with_retries(&page_url) {
            Ok(response) => Self::validate(&response, required),
            Err(RetryError::Operation { error, .. }) if !is_transport_failure(&error) => {
                CheckResult::error(Unexpected::RequestFailed(describe_curl_error(&error)))
            }
            Err(RetryError::Operation { error, tries, .. }) => {
                error!(
                    "Giving up on: {} after {} attempt(s). Last error: {}",
                    url,
                    tries,
                    describe_curl_error(&error)
                );
                CheckResult::error(Unexpected::ContactFailed)
            }
            Err(RetryError::Internal(details)) => {
                error!("Retry failure for: {}. Details: {}", url, details);
                CheckResult::error(Unexpected::ContactFailed)
            }
        };

        if result.failed {
            error!("{}: {}", url, result.reason);
        } else {
            info!("{}: {}", url, result.reason);
        }
        result
    }
}


/// Parse URL, accept only HTTP(S) with a host
fn parse_url(url: &str) -> Result<Url, Unexpected> {
    let parsed =
        Url::parse(url).map_err(|err| Unexpected::InvalidUrl(url.to_string(), err.to_string()))?;
    match (parsed.scheme(), parsed.host_str()) {
        ("http" | "https", Some(host)) if !host.is_empty() => Ok(parsed),
        ("http" | "https", _) => {
            Err(Unexpected::InvalidUrl(
                url.to_string(),
                "missing host".to_string(),
            ))
        }
        (scheme, _) => {
            Err(Unexpected::InvalidUrl(
                url.to_string(),
                format!("unsupported scheme: {}", scheme),
            ))
        }
    }
}


fn canonical_reason(code: u32) -> String {
    u16::try_from(code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
        .to_string()
}


/// Connection level failures worth another attempt
fn is_transport_failure(err: &CurlError) -> bool {
    err.is_couldnt_resolve_host()
        || err.is_couldnt_resolve_proxy()
        || err.is_couldnt_connect()
        || err.is_operation_timedout()
        || err.is_got_nothing()
        || err.is_send_error()
        || err.is_recv_error()
        || err.is_partial_file()
        || err.is_ssl_connect_error()
        || err.is_peer_failed_verification()
        || err.is_http2_error()
        || err.is_http2_stream_error()
}


/// Curl error with the name of its CURLE_* code
fn describe_curl_error(err: &CurlError) -> String {
    let reason = if err.is_couldnt_resolve_host() {
        "CURLE_COULDNT_RESOLVE_HOST"
    } else if err.is_couldnt_connect() {
        "CURLE_COULDNT_CONNECT"
    } else if err.is_operation_timedout() {
        "CURLE_OPERATION_TIMEDOUT"
    } else if err.is_got_nothing() {
        "CURLE_GOT_NOTHING"
    } else if err.is_send_error() {
        "CURLE_SEND_ERROR"
    } else if err.is_recv_error() {
        "CURLE_RECV_ERROR"
    } else if err.is_ssl_connect_error() {
        "CURLE_SSL_CONNECT_ERROR"
    } else if err.is_peer_failed_verification() {
        "CURLE_PEER_FAILED_VERIFICATION"
    } else if err.is_too_many_redirects() {
        "CURLE_TOO_MANY_REDIRECTS"
    } else if err.is_bad_content_encoding() {
        "CURLE_BAD_CONTENT_ENCODING"
    } else if err.is_url_malformed() {
        "CURLE_URL_MALFORMAT"
    } else if err.is_unsupported_protocol() {
        "CURLE_UNSUPPORTED_PROTOCOL"
    } else {
        "CURLE_OTHER"
    };
    format!("{} ({})", err, reason)
}
