/// Single site check over HTTP(S)
pub mod site;

/// All sites check
pub mod batch;


use crate::products::check_result::CheckResult;


/// Anything able to check a site for reachability and content
pub trait Checker: Sync {
    /// Check page under url for each of required contents, in order
    fn check(&self, url: &str, required: &[String]) -> CheckResult;
}
