/// Successful check results
pub mod expected;

/// Failed check results
pub mod unexpected;

/// Per site check result
pub mod check_result;

/// Per run report
pub mod report;
