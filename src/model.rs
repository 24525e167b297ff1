//! Document shapes shared by the console, the remote client, and the editor.

use std::cmp::Ordering;

pub mod clusters;
pub mod config;
pub mod connection;
pub mod documents;

pub use clusters::{ClusterDocument, GROUP_ORGANISATIONS, GROUP_USER_APIS, REQUIRED_USER_APIS};
pub use config::{ConsoleConfig, ConsoleState, RemoteConfig};
pub use connection::{ConnectionParts, compose_connection_string, split_connection_string};
pub use documents::{ConfigurationDocument, Organisation};

/// Identifier carried by a record that has not been persisted yet. The server
/// assigns the real id on create.
pub const NEW_DOCUMENT_ID: &str = "new";

/// Server-maintained bookkeeping keys, skipped by change detection.
pub const AUDIT_KEYS: &[&str] = &["created", "lastUpdated", "createdBy", "lastUpdatedBy"];

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum NaturalPiece {
    Number { magnitude: usize, digits: String },
    Text(String),
}

fn natural_key(s: &str) -> Vec<NaturalPiece> {
    let mut out = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut digits = String::new();
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            let stripped = digits.trim_start_matches('0');
            let stripped = if stripped.is_empty() { "0" } else { stripped };
            out.push(NaturalPiece::Number {
                magnitude: stripped.len(),
                digits: stripped.to_string(),
            });
        } else {
            let mut text = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    break;
                }
                text.extend(d.to_lowercase());
                chars.next();
            }
            out.push(NaturalPiece::Text(text));
        }
    }
    out
}

/// Case-insensitive, digit-run-aware name ordering, so "Org 2" sorts before
/// "Org 10". Ties fall back to byte order to keep the sort total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b)).then_with(|| a.cmp(b))
}

/// Picks the next free placeholder name by counting siblings that already
/// carry the placeholder prefix.
pub fn next_placeholder_name<'a>(
    prefix: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> String {
    let taken = existing.into_iter().filter(|n| n.starts_with(prefix)).count();
    format!("{} {}", prefix, taken + 1)
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
