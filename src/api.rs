use crate::{
    checks::{batch::run_all, site::SiteChecker},
    inputs::sites::load_sites,
    notificator::{notify, Deliver},
    products::report::RunReport,
    *,
};


/**
    Public library API for Website Watchdog functionality
 **/


/// Run the monitor once: load sites, check them all, notify about failures
pub fn run_monitor<D: Deliver + ?Sized>(
    config: &Config,
    deliverer: &D,
) -> Result<RunReport, WatchdogError> {
    let sites = load_sites(&config.sites_file)?;
    if sites.is_empty() {
        warn!(
            "No sites defined in: '{}'! Nothing to check.",
            config.sites_file.display()
        );
    }

    let checker = SiteChecker::new(config);
    let report = run_all(&checker, &sites, config.parallel_checks);
    notify(deliverer, &report)?;
    Ok(report)
}
