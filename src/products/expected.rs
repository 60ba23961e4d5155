use serde::{Deserialize, Serialize};
use std::fmt;


#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Expected (successful) check result
pub enum Expected {
    /// Site answered 200 and contains every required content
    SiteUp,
}


impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::SiteUp => write!(f, "Site Seems Up"),
        }
    }
}
