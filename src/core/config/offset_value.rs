//! The user's overlap offset preference
//!
//! The offset is kept as text, the way it is typed, and only committed once
//! it reads as a whole number. Listeners hear about every committed change.

use std::fmt;

/// Offset used when nothing has been configured
pub const DEFAULT_OFFSET: &str = "-30";

/// Clean up typed offset text
///
/// Spaces are removed, an empty entry becomes `"0"`, `"-0"` becomes `"0"`,
/// and apart from one leading minus every non-digit is dropped. The result
/// can still be a lone `"-"` while the user is typing.
pub fn sanitize_offset_text(raw: &str) -> String {
    let text: String = raw.chars().filter(|c| *c != ' ').collect();
    if text.is_empty() || text == "-0" {
        return "0".to_string();
    }
    let sign = if text.starts_with('-') { "-" } else { "" };
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    format!("{sign}{digits}")
}

type Listener = Box<dyn Fn(i64) + Send + Sync>;

/// Offset text with get/set and change notification
pub struct OffsetValue {
    text: String,
    listeners: Vec<Listener>,
}

impl OffsetValue {
    /// Start from previously stored text; anything unusable falls back to
    /// [`DEFAULT_OFFSET`]
    pub fn new(stored: &str) -> Self {
        let text = sanitize_offset_text(stored);
        let text = if parse_offset(&text).is_some() {
            text
        } else {
            DEFAULT_OFFSET.to_string()
        };
        Self {
            text,
            listeners: Vec::new(),
        }
    }

    /// The committed text
    pub fn get(&self) -> &str {
        &self.text
    }

    /// The committed offset
    pub fn magnitude(&self) -> i64 {
        parse_offset(&self.text).unwrap_or(0)
    }

    /// Sanitize and commit typed text
    ///
    /// Returns whether the value was committed. Incomplete entries like a
    /// lone `"-"` are not committed and nobody is notified.
    pub fn set(&mut self, raw: &str) -> bool {
        let text = sanitize_offset_text(raw);
        let Some(value) = parse_offset(&text) else {
            return false;
        };
        self.text = text;
        for listener in &self.listeners {
            listener(value);
        }
        true
    }

    /// Register a callback for committed changes
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }
}

impl Default for OffsetValue {
    fn default() -> Self {
        Self::new(DEFAULT_OFFSET)
    }
}

impl fmt::Debug for OffsetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetValue")
            .field("text", &self.text)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn parse_offset(text: &str) -> Option<i64> {
    if text.is_empty() || text.ends_with('-') {
        return None;
    }
    text.parse().ok()
}
