use crate::{checks::Checker, inputs::sites::Sites, products::report::RunReport, *};
use rayon::prelude::*;


/// Check all sites and collect one result per site
pub fn run_all<C: Checker>(checker: &C, sites: &Sites, parallel: bool) -> RunReport {
    info!(
        "Checking {} site(s){}…",
        sites.len(),
        if parallel { " in parallel" } else { "" }
    );
    let report: RunReport = if parallel {
        sites
            .par_iter()
            .map(|(url, site)| (url.clone(), checker.check(url, &site.checks)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    } else {
        sites
            .iter()
            .map(|(url, site)| (url.clone(), checker.check(url, &site.checks)))
            .collect()
    };
    debug!(
        "Run finished with {} result(s), {} failure(s)",
        report.length(),
        report.failures().count()
    );
    trace!("Run report: {}", serde_json::to_string(&report).unwrap_or_default());
    report
}
