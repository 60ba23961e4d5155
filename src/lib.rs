//! "Website Watchdog" utility

//! Crate docs

#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    unstable_features,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    bad_style,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    unused_extern_crates
)]
#![warn(dead_code, unused_imports, unused_variables)]

// For development:
// #![allow(dead_code, unused_imports, unused_variables, deprecated)]


/// Use MiMalloc as default allocator:
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;


pub use crate::api::*;
pub use crate::checks::{batch::*, site::*, Checker};
pub use crate::config::*;
pub use crate::configuration::*;
pub use crate::error::*;
pub use crate::inputs::sites::*;
pub use crate::notificator::*;
pub use crate::products::{check_result::*, expected::*, report::*, unexpected::*};
pub use crate::utilities::*;
use core::fmt::{Debug, Formatter};
use curl::easy::{Handler, WriteError};
use std::fmt;
pub use tracing::{debug, error, info, instrument, trace, warn};


/// Collects content and status line from Curl:
#[derive(Default)]
pub struct Collector {
    content: Vec<u8>,
    status_line: Option<String>,
}


impl Collector {
    /// Reason phrase from the last status line, ex. "Not Found"
    pub fn status_text(&self) -> String {
        self.status_line
            .as_deref()
            .and_then(|line| line.splitn(3, ' ').nth(2))
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }


    /// Collected content, as text
    pub fn content(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}


impl Handler for Collector {
    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        self.content.extend_from_slice(data);
        Ok(data.len())
    }


    fn header(&mut self, data: &[u8]) -> bool {
        let line = String::from_utf8_lossy(data);
        // every response (redirect, 100-continue) starts with a status line. Keep the last one
        if line.starts_with("HTTP/") {
            self.status_line = Some(line.trim_end().to_string());
        }
        true
    }
}


impl Debug for Collector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("status_line", &self.status_line)
            .field(
                "content (first 50 in hex)",
                &self
                    .content
                    .iter()
                    .take(50)
                    .map(|c| format!("{:x}", c))
                    .collect::<String>(),
            )
            .finish()
    }
}


//
// Public modules:
//

/// Configuration defaults:
pub mod configuration;

/// Dynamic config:
pub mod config;

/// Fatal errors:
pub mod error;

/// Utilities and helpers:
pub mod utilities;

/// Check inputs:
pub mod inputs;

/// Checks:
pub mod checks;

/// Check products:
pub mod products;

/// Failure report delivery:
pub mod notificator;

/// Run API functions:
pub mod api;

//
// Private modules:
//
