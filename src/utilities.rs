use crate::*;
use chrono::{DateTime, Utc};


/// Format moment of the run for the failure report (always UTC)
pub fn report_timestamp(moment: DateTime<Utc>) -> String {
    moment.format(NOTIFICATION_TIMESTAMP_FORMAT).to_string()
}
