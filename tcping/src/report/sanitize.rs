//! Error text clean-up for display.
//!
//! Probe lines already name the target, so an `ip:port` repeated inside the
//! underlying error message is noise. This is a pure string transform; the
//! executor keeps the raw text and only the report strips it.

/// Remove every occurrence of `target` from `message` and tidy the gaps.
///
/// Returns the message unchanged when it does not mention the target, or
/// when nothing would be left after stripping.
#[must_use]
pub fn strip_target(message: &str, target: &str) -> String {
    if target.is_empty() || !message.contains(target) {
        return message.to_string();
    }

    let collapsed = message.replace(target, " ").split_whitespace().collect::<Vec<_>>().join(" ");
    let tidied = collapsed.replace(" :", ":");
    let tidied = tidied.trim_matches(|c: char| c == ':' || c.is_whitespace());

    if tidied.is_empty() {
        message.to_string()
    } else {
        tidied.to_string()
    }
}
