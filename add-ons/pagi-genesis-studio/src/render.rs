//! HTML fragments returned to the page. All user-visible text goes through [`html_escape`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Warning,
    Error,
    Info,
}

impl Notice {
    fn class(self) -> &'static str {
        match self {
            Notice::Success => "notice notice-success",
            Notice::Warning => "notice notice-warning",
            Notice::Error => "notice notice-error",
            Notice::Info => "notice notice-info",
        }
    }
}

pub fn notice(kind: Notice, message: &str) -> String {
    format!(
        r#"<div class="{}">{}</div>"#,
        kind.class(),
        html_escape(message)
    )
}

/// "List Generated Files" output.
pub fn file_list(files: &[String]) -> String {
    if files.is_empty() {
        return notice(Notice::Info, "No files generated yet");
    }
    let items: String = files
        .iter()
        .map(|f| format!("<li><code>{}</code></li>", html_escape(f)))
        .collect();
    format!(
        r#"<p><strong>Generated Files:</strong></p><ul class="file-list">{}</ul>"#,
        items
    )
}

/// Project files section: selector plus the first file's content, or the empty-state hint.
pub fn file_browser(files: &[String], first_content: Option<&str>) -> String {
    if files.is_empty() {
        return notice(
            Notice::Info,
            "No project files generated yet. Enter a prompt above to get started!",
        );
    }
    let options: String = files
        .iter()
        .map(|f| {
            let f = html_escape(f);
            format!(r#"<option value="{}">{}</option>"#, f, f)
        })
        .collect();
    let viewer = match first_content {
        Some(content) => file_content(&files[0], content),
        None => String::new(),
    };
    format!(
        r#"<label for="file-select">Select a file to view:</label>
<select id="file-select" onchange="viewFile(this.value)">{}</select>
<div id="file-content">{}</div>"#,
        options, viewer
    )
}

pub fn file_content(path: &str, content: &str) -> String {
    format!(
        r#"<label>Content of <code>{}</code>:</label><textarea class="viewer" rows="20" readonly>{}</textarea>"#,
        html_escape(path),
        html_escape(content)
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
