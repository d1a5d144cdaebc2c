//! Link safety for user-supplied URLs.
//!
//! Attachment URLs, submission files and message links come straight from
//! users. Before anything is rendered as a clickable link it goes through
//! [`is_safe_url`], which accepts relative paths and a small set of schemes
//! and rejects everything that could execute (`javascript:`, `data:`,
//! `vbscript:`, ...).
//!
//! ```
//! assert!(links::is_safe_url("https://example.com/report.pdf"));
//! assert!(links::is_safe_url("uploads/report.pdf"));
//! assert!(!links::is_safe_url("javascript:alert(1)"));
//!
//! let shown: Vec<_> = links::filter_safe(["/a.pdf", "data:text/html,x", "b.pdf"]).collect();
//! assert_eq!(shown, ["/a.pdf", "b.pdf"]);
//! ```

mod attachments;
mod classify;

pub use attachments::{filter_safe, partition_links};
pub use classify::{ALLOWED_SCHEMES, LinkVerdict, classify, is_safe_url};
