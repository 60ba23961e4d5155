use crate::*;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, io::Read, path::Path};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Site check definition
pub struct SiteSpec {
    /// Site URL
    pub url: String,

    /// Substrings expected in the page, checked in order
    pub checks: Vec<String>,
}


/// Sites keyed by URL
pub type Sites = BTreeMap<String, SiteSpec>;


/// Load site list from file: "url;check1;check2;…" per line
pub fn load_sites(path: &Path) -> Result<Sites, WatchdogError> {
    let source = path.display().to_string();
    debug!("Loading site list from: {}", source);
    let reader = ReaderBuilder::new()
        .delimiter(SITES_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| WatchdogError::SiteList(source.clone(), err.to_string()))?;
    read_sites(reader, &source)
}


/// Load site list from any reader
pub fn load_sites_from<R: Read>(input: R) -> Result<Sites, WatchdogError> {
    let reader = ReaderBuilder::new()
        .delimiter(SITES_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    read_sites(reader, "<reader>")
}


fn read_sites<R: Read>(mut reader: csv::Reader<R>, source: &str) -> Result<Sites, WatchdogError> {
    let mut sites = Sites::new();
    for record in reader.records() {
        let record = record.map_err(|err| WatchdogError::SiteList(source.to_string(), err.to_string()))?;
        let mut fields = record.iter();
        match fields.next() {
            Some(url) if !url.is_empty() => {
                let site = SiteSpec {
                    url: url.to_string(),
                    checks: fields.map(String::from).collect(),
                };
                trace!("Site loaded: {:?}", site);
                if sites.insert(site.url.clone(), site).is_some() {
                    warn!("Duplicated site: {}. Last definition wins.", url);
                }
            }
            _ => {
                warn!("Line without URL skipped in: {}", source);
            }
        }
    }
    Ok(sites)
}
