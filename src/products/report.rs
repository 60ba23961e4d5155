use crate::products::check_result::CheckResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Results of a single run, keyed by site URL
pub struct RunReport(BTreeMap<String, CheckResult>);


impl RunReport {
    /// New empty report
    pub fn empty() -> RunReport {
        RunReport(BTreeMap::new())
    }


    /// Store result of a site. Later results for the same URL replace earlier ones
    pub fn insert(&mut self, url: String, result: CheckResult) {
        self.0.insert(url, result);
    }


    /// Result for given URL
    pub fn get(&self, url: &str) -> Option<&CheckResult> {
        self.0.get(url)
    }


    /// Report length
    pub fn length(&self) -> usize {
        self.0.len()
    }


    /// Report has no results
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// Checked URLs in order
    pub fn urls(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }


    /// Failed results only
    pub fn failures(&self) -> impl Iterator<Item = (&String, &CheckResult)> {
        self.0.iter().filter(|(_, result)| result.failed)
    }


    /// At least one site failed
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}


impl FromIterator<(String, CheckResult)> for RunReport {
    fn from_iter<I: IntoIterator<Item = (String, CheckResult)>>(results: I) -> Self {
        RunReport(results.into_iter().collect())
    }
}
