//! The SQL connection string is the wire truth for an organisation's database
//! settings; the console edits its four variable parts as separate fields.

/// The four editable parts of an organisation connection string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionParts {
    pub server: String,
    pub database: String,
    pub user_id: String,
    pub password: String,
}

/// Renders the canonical connection string. The trailing flags are fixed and
/// always emitted in this exact form.
pub fn compose_connection_string(
    server: &str,
    database: &str,
    user_id: &str,
    password: &str,
) -> String {
    format!(
        "Server={}; Database={}; User ID={}; Password={}; Trusted_Connection=false; MultipleActiveResultSets=true; Trust Server Certificate=true;",
        server, database, user_id, password
    )
}

/// Recovers the editable parts from a stored connection string by scanning
/// `;`-separated segments for the four known `Key=` prefixes. Unknown
/// segments (the fixed flags included) are ignored, so strings written by
/// other tools still split cleanly as long as they use the same keys.
pub fn split_connection_string(raw: &str) -> ConnectionParts {
    let mut parts = ConnectionParts::default();
    for segment in raw.split(';') {
        let segment = segment.trim();
        if let Some(value) = segment.strip_prefix("Server=") {
            parts.server = value.to_string();
        } else if let Some(value) = segment.strip_prefix("Database=") {
            parts.database = value.to_string();
        } else if let Some(value) = segment.strip_prefix("User ID=") {
            parts.user_id = value.to_string();
        } else if let Some(value) = segment.strip_prefix("Password=") {
            parts.password = value.to_string();
        }
    }
    parts
}

#[cfg(test)]
#[path = "../tests/connection_tests.rs"]
mod tests;
