use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Schemes a link or image in an answer may point to
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render an assistant answer to HTML. Raw HTML in the answer is shown as
/// text, and link or image targets with any other scheme than
/// http(s)/mailto are blanked.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

fn safe_destination(dest_url: CowStr<'_>) -> CowStr<'_> {
    if is_allowed_destination(&dest_url) {
        dest_url
    } else {
        CowStr::Borrowed("")
    }
}

/// Relative targets and the allowed schemes pass. Browsers ignore
/// whitespace and control characters inside a scheme, so those are
/// stripped before looking at it.
fn is_allowed_destination(dest_url: &str) -> bool {
    let normalized: String = dest_url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match normalized.find([':', '/', '?', '#']) {
        Some(index) if normalized[index..].starts_with(':') => {
            let scheme = normalized[..index].to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let html = render_markdown("It is a **summary**.");
        assert_eq!(html, "<p>It is a <strong>summary</strong>.</p>\n");
    }

    #[test]
    fn test_escapes_raw_html() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let inline = render_markdown("click <img src=x onerror=alert(1)> here");
        assert!(!inline.contains("<img"));
    }

    #[test]
    fn test_script_links_are_blanked() {
        let html = render_markdown("[Open the source](javascript:alert(document.cookie))");
        assert!(!html.contains("javascript"));
        assert!(html.contains("Open the source"));

        let image = render_markdown("![chart](data:text/html;base64,PHNjcmlwdD4=)");
        assert!(!image.contains("data:"));
    }

    #[test]
    fn test_web_and_relative_links_are_kept() {
        let html = render_markdown("[docs](https://example.com/a?b=c#d)");
        assert!(html.contains(r#"href="https://example.com/a?b=c#d""#));

        assert!(render_markdown("[mail](mailto:team@example.com)").contains("mailto:team@example.com"));
        assert!(render_markdown("[page 3](#page-3)").contains(r##"href="#page-3""##));
        assert!(render_markdown("[rel](notes/a:b)").contains(r#"href="notes/a:b""#));
    }

    #[test]
    fn test_allowed_destination() {
        assert!(is_allowed_destination("HTTPS://example.com"));
        assert!(is_allowed_destination("/relative/path"));
        assert!(!is_allowed_destination("JavaScript:alert(1)"));
        assert!(!is_allowed_destination(" vbscript:msgbox"));
        assert!(!is_allowed_destination("java\tscript:alert(1)"));
        assert!(!is_allowed_destination("file:///etc/passwd"));
    }
}
