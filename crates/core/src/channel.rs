//! Channel URL handling: normalisation to the videos tab and extraction
//! of a filesystem-safe channel name.

use url::Url;

/// Name used when a channel name cannot be derived from the URL.
pub const UNKNOWN_CHANNEL: &str = "unknown_channel";

/// Path suffix of a channel's uploads listing.
const VIDEOS_TAB: &str = "videos";

/// Point a YouTube channel URL at its videos tab.
///
/// Non-YouTube URLs and URLs already containing `/videos` are returned
/// trimmed but otherwise unchanged.
pub fn normalize_channel_url(input: &str) -> String {
    let trimmed = input.trim();
    if !trimmed.contains("youtube.com") || trimmed.contains("/videos") {
        return trimmed.to_string();
    }
    if trimmed.ends_with('/') {
        format!("{trimmed}{VIDEOS_TAB}")
    } else {
        format!("{trimmed}/{VIDEOS_TAB}")
    }
}

/// Path part of a channel reference.
///
/// Accepts full URLs, scheme-less URLs (`www.youtube.com/@x`), and bare
/// paths or handles (`@x`), which are taken as the path itself.
fn channel_path(input: &str) -> String {
    if let Ok(parsed) = Url::parse(input) {
        return parsed.path().to_string();
    }

    let host = input.split('/').next().unwrap_or_default();
    if host.contains('.') && !host.starts_with('@') {
        if let Ok(parsed) = Url::parse(&format!("https://{input}")) {
            return parsed.path().to_string();
        }
    }

    input.split(['?', '#']).next().unwrap_or_default().to_string()
}

/// Derive a clean channel name from a channel URL.
///
/// Handles `@handle`, `c/name`, `channel/ID`, and `user/name` paths, with
/// or without a scheme or host; any other path is flattened with `_`.
/// Only alphanumerics, `-`, and `_` are kept.
pub fn extract_channel_name(channel_url: &str) -> String {
    let url_path = channel_path(channel_url.trim());
    let path = url_path.trim_matches('/');
    let segments: Vec<&str> = path.split('/').collect();

    let raw_name = if let Some(handle) = path.strip_prefix('@') {
        handle.split('/').next().unwrap_or_default().to_string()
    } else if matches!(segments.first(), Some(&("c" | "channel" | "user"))) {
        segments.get(1).copied().unwrap_or_default().to_string()
    } else {
        path.replace('/', "_")
    };

    let clean: String = raw_name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if clean.is_empty() {
        UNKNOWN_CHANNEL.to_string()
    } else {
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_videos_tab() {
        assert_eq!(
            normalize_channel_url("https://www.youtube.com/@veritasium"),
            "https://www.youtube.com/@veritasium/videos"
        );
        assert_eq!(
            normalize_channel_url(" https://www.youtube.com/@veritasium/ "),
            "https://www.youtube.com/@veritasium/videos"
        );
    }

    #[test]
    fn keeps_existing_videos_tab_and_foreign_urls() {
        assert_eq!(
            normalize_channel_url("https://www.youtube.com/@x/videos"),
            "https://www.youtube.com/@x/videos"
        );
        assert_eq!(
            normalize_channel_url("https://vimeo.com/someone"),
            "https://vimeo.com/someone"
        );
    }

    #[test]
    fn name_from_handle() {
        assert_eq!(
            extract_channel_name("https://www.youtube.com/@veritasium/videos"),
            "veritasium"
        );
    }

    #[test]
    fn name_from_legacy_paths() {
        assert_eq!(
            extract_channel_name("https://www.youtube.com/c/SomeName/videos"),
            "SomeName"
        );
        assert_eq!(
            extract_channel_name("https://www.youtube.com/channel/UC123abc"),
            "UC123abc"
        );
        assert_eq!(
            extract_channel_name("https://www.youtube.com/user/oldname"),
            "oldname"
        );
    }

    #[test]
    fn name_strips_unsafe_characters() {
        assert_eq!(
            extract_channel_name("https://www.youtube.com/@we.ird!name"),
            "weirdname"
        );
    }

    #[test]
    fn name_from_input_without_scheme() {
        for input in ["@veritasium", "youtube.com/@veritasium", "www.youtube.com/@veritasium"] {
            assert_eq!(
                extract_channel_name(&normalize_channel_url(input)),
                "veritasium",
                "{input}"
            );
        }
        assert_eq!(extract_channel_name("www.youtube.com/c/SomeName"), "SomeName");
        assert_eq!(extract_channel_name("@handle?si=abc"), "handle");
    }

    #[test]
    fn bare_path_is_flattened() {
        assert_eq!(extract_channel_name("some/channel name"), "some_channelname");
    }

    #[test]
    fn empty_path_is_unknown() {
        assert_eq!(extract_channel_name(""), UNKNOWN_CHANNEL);
        assert_eq!(extract_channel_name("  "), UNKNOWN_CHANNEL);
        assert_eq!(extract_channel_name("https://www.youtube.com/"), UNKNOWN_CHANNEL);
    }
}
