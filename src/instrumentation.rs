//! Tags outgoing write batches with library-identity metadata.
//!
//! The backend accepts a diagnostic record nested in an entry's JSON payload
//! that names the client libraries which produced the data. This module
//! decides, for each batch handed to [`Log::write`](crate::client::Log::write),
//! whether to merge this library's identity into a record some entry already
//! carries, or to append one freshly synthesized diagnostic entry. A
//! process-wide flag makes the synthesized entry a once-per-process event;
//! merging into caller-provided records happens on every call.

use crate::api::entry::LogEntry;
use crate::api::LogSeverity;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};

/// JSON payload key holding the diagnostic record.
pub const DIAGNOSTIC_INFO_KEY: &str = "logging.googleapis.com/diagnostic";

/// Key within the diagnostic record holding the list of library identities.
pub const INSTRUMENTATION_SOURCE_KEY: &str = "instrumentation_source";

/// Identifies this runtime's library family. An instrumentation record is
/// only merged when its name carries this prefix.
pub const LIBRARY_NAME_PREFIX: &str = "rust";

// Longer names and versions are cut to 13 characters plus a trailing marker.
const MAX_DIAGNOSTIC_VALUE_LEN: usize = 14;

// A merged record holds at most this many identities, own identity included.
const MAX_INSTRUMENTATION_COUNT: usize = 3;

static INSTRUMENTATION_ADDED: AtomicBool = AtomicBool::new(false);

lazy_static! {
    // Resolved from the package metadata once, then held for the process
    // lifetime.
    static ref LIBRARY_VERSION: String = env!("CARGO_PKG_VERSION").to_string();
}

/// The identity of one client library that contributed to a log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentationInfo {
    pub name: String,
    pub version: String,
}

impl InstrumentationInfo {
    // Lenient mapping from a raw payload element. Missing or non-string
    // fields become empty strings, which the validity check rejects while the
    // element still holds its position in the list.
    pub(crate) fn from_value(value: &Value) -> Self {
        Self {
            name: value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            version: value
                .get("version")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Inspects a batch of outgoing entries and attaches instrumentation data.
///
/// Entries already carrying a diagnostic record get that record merged with
/// this library's identity. If no entry carries one and no record was emitted
/// by this process before, a single synthesized diagnostic entry is appended
/// to the batch. Returns the batch (entries in their original order, mutated
/// where a record was merged) and whether any instrumentation data was added
/// or updated by this call.
pub fn populate_instrumentation_info(entries: Vec<LogEntry>) -> (Vec<LogEntry>, bool) {
    let mut already_written = set_instrumentation_status(true);
    let mut info_added = false;
    let mut output = Vec::with_capacity(entries.len() + 1);
    for mut entry in entries {
        if let Some(existing) = entry.instrumentation_source() {
            entry.set_instrumentation_source(validate_and_update_instrumentation(&existing));
            info_added = true;
            already_written = true;
        }
        output.push(entry);
    }
    if !already_written {
        output.push(create_diagnostic_entry(None, None));
        info_added = true;
    }
    (output, info_added)
}

/// Creates a standalone diagnostic entry carrying a single library identity.
///
/// A `library_name` without the expected family prefix is replaced by the
/// bare prefix; an absent `library_version` falls back to this crate's own
/// version. Both values are stored truncated.
pub fn create_diagnostic_entry(
    library_name: Option<&str>,
    library_version: Option<&str>,
) -> LogEntry {
    let name = match library_name {
        Some(name) if name.starts_with(LIBRARY_NAME_PREFIX) => name,
        _ => LIBRARY_NAME_PREFIX,
    };
    let version = match library_version {
        Some(v) => v,
        None => self::library_version(),
    };
    let mut entry = LogEntry {
        severity: Some(LogSeverity::Info),
        ..Default::default()
    };
    entry.set_instrumentation_source(vec![InstrumentationInfo {
        name: truncate_value(name),
        version: truncate_value(version),
    }]);
    entry
}

/// This library's own released version, resolved once per process.
pub fn library_version() -> &'static str {
    LIBRARY_VERSION.as_str()
}

/// Atomically swaps the process-wide emitted flag, returning its prior value.
/// Also serves as a reset hook for test harnesses.
pub fn set_instrumentation_status(value: bool) -> bool {
    INSTRUMENTATION_ADDED.swap(value, Ordering::SeqCst)
}

// Rebuilds an existing record list around this library's own identity. The
// own identity always takes the first slot, untruncated input values never
// survive, and invalid elements are dropped. The cutoff counts elements
// visited, not elements accepted: after two input elements the scan stops,
// whether or not they were valid.
fn validate_and_update_instrumentation(existing: &[InstrumentationInfo]) -> Vec<InstrumentationInfo> {
    let mut merged = vec![InstrumentationInfo {
        name: LIBRARY_NAME_PREFIX.to_string(),
        version: library_version().to_string(),
    }];
    let mut visited = 1;
    for info in existing {
        if is_valid_info(info) {
            merged.push(InstrumentationInfo {
                name: truncate_value(&info.name),
                version: truncate_value(&info.version),
            });
        }
        visited += 1;
        if visited == MAX_INSTRUMENTATION_COUNT {
            break;
        }
    }
    merged
}

fn is_valid_info(info: &InstrumentationInfo) -> bool {
    !info.name.is_empty()
        && !info.version.is_empty()
        && info.name.starts_with(LIBRARY_NAME_PREFIX)
}

fn truncate_value(value: &str) -> String {
    if value.chars().count() > MAX_DIAGNOSTIC_VALUE_LEN {
        let mut truncated: String = value.chars().take(MAX_DIAGNOSTIC_VALUE_LEN - 1).collect();
        truncated.push('*');
        truncated
    } else {
        value.to_string()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::set_instrumentation_status;
    use std::sync::Mutex;

    lazy_static! {
        static ref FLAG_GUARD: Mutex<()> = Mutex::new(());
    }

    // The emitted flag is process-wide and the test harness runs threads in
    // parallel, so every test touching it serializes here and starts from a
    // cleared flag.
    pub(crate) fn with_cleared_emitted_flag<T>(test: impl FnOnce() -> T) -> T {
        let _lock = FLAG_GUARD.lock().unwrap();
        set_instrumentation_status(false);
        test()
    }
}
