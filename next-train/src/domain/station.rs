//! Station records.

use serde::{Deserialize, Serialize};

/// A parent station on the line.
///
/// `id` is the feed's stop identifier for the parent-station record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Strip trailing "Station" and agency-name words from a stop name.
///
/// Suffixes are removed repeatedly, so "Palo Alto Caltrain Station" loses
/// both. A name made only of suffix words is returned unchanged.
///
/// # Examples
///
/// ```
/// use next_train::domain::display_name;
///
/// assert_eq!(display_name("San Francisco Caltrain Station", "Caltrain"), "San Francisco");
/// assert_eq!(display_name("Hillsdale Caltrain", "Caltrain"), "Hillsdale");
/// assert_eq!(display_name("Gilroy", "Caltrain"), "Gilroy");
/// ```
pub fn display_name(raw: &str, agency: &str) -> String {
    let mut name = raw.trim();
    loop {
        let stripped = strip_word_suffix(name, "Station")
            .or_else(|| strip_word_suffix(name, agency));
        match stripped {
            Some(rest) if !rest.is_empty() => name = rest,
            _ => break,
        }
    }
    name.to_string()
}

/// Remove `suffix` from the end of `name` when it stands as a separate word.
fn strip_word_suffix<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    if suffix.is_empty() {
        return None;
    }
    let rest = name.strip_suffix(suffix)?;
    if rest.is_empty() || rest.ends_with(char::is_whitespace) {
        Some(rest.trim_end())
    } else {
        None
    }
}
