//! HTML rendering
//!
//! Pages are composed with `format!` from plain data; every value that came
//! from a user or the database passes through [`escape`] first.

pub mod errors;
pub mod forms;
pub mod pages;

/// Stylesheet served at `/static/booking.css`
pub const STYLESHEET: &str = include_str!("../../static/booking.css");

/// Flash-style message shown above page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

/// Escape text for use in element content and quoted attributes
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared document shell
pub fn layout(title: &str, notice: Option<&Notice>, content: &str) -> String {
    let notice = notice
        .map(|n| format!(r#"<div class="{}">{}</div>"#, n.css_class(), escape(&n.message)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Booking</title>
    <link rel="stylesheet" href="/static/booking.css">
</head>
<body>
    <header>
        <div class="header-content">
            <a class="brand" href="/">Booking</a>
            <nav>
                <a href="/venues">Venues</a>
                <a href="/artists">Artists</a>
                <a href="/shows">Shows</a>
            </nav>
        </div>
    </header>
    <div class="content">
        {notice}
        {content}
    </div>
    <footer>booking-web v{version} [{git_hash}] built {build_timestamp} ({build_profile})</footer>
</body>
</html>
"#,
        title = escape(title),
        notice = notice,
        content = content,
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        build_timestamp = env!("BUILD_TIMESTAMP"),
        build_profile = env!("BUILD_PROFILE"),
    )
}

/// Link text or a muted placeholder when the value is absent
fn link_or_dash(value: Option<&str>) -> String {
    match value {
        Some(url) if !url.is_empty() => {
            let url = escape(url);
            format!(r#"<a href="{url}" target="_blank" rel="noopener">{url}</a>"#)
        }
        _ => r#"<span class="muted">No link</span>"#.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
        assert_eq!(escape("Park Square"), "Park Square");
    }

    #[test]
    fn test_layout_includes_notice() {
        let html = layout("Home", Some(&Notice::success("Venue deleted successfully")), "<p>hi</p>");
        assert!(html.contains("<title>Home | Booking</title>"));
        assert!(html.contains(r#"<div class="notice notice-success">Venue deleted successfully</div>"#));
        assert!(html.contains("<p>hi</p>"));
    }

    #[test]
    fn test_layout_escapes_notice() {
        let html = layout("Home", Some(&Notice::error("Could not add <b>")), "");
        assert!(html.contains("Could not add &lt;b&gt;"));
    }

    #[test]
    fn test_link_or_dash() {
        assert!(link_or_dash(None).contains("No link"));
        assert!(link_or_dash(Some("https://a.example.com")).contains(r#"href="https://a.example.com""#));
    }
}
