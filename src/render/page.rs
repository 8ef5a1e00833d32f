//! Wraps a rendered SVG in a standalone HTML page.
//!
//! The page is a single template with `{{TOKEN}}` placeholders. Tokens that
//! no caller filled are blanked so raw placeholders never reach a browser.

const TEMPLATE: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{{TITLE}}</title>
<style>
body { font-family: sans-serif; margin: 24px; color: #333; }
h1 { font-size: 16px; font-weight: 600; }
.caption { font-size: 12px; color: #999; }
svg { border: 1px solid #f0f2f5; background: #fff; }
</style>
</head>
<body>
<h1>{{TITLE}}</h1>
<p class=\"caption\">{{CAPTION}}</p>
{{SVG}}
</body>
</html>
";

/// Renders the page. `caption` is escaped; `svg` is embedded verbatim.
pub fn render_page(title: &str, caption: &str, svg: &str) -> String {
    let html = TEMPLATE
        .replace("{{TITLE}}", &escape(title))
        .replace("{{CAPTION}}", &escape(caption))
        .replace("{{SVG}}", svg);
    blank_remaining(html)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_svg_and_escapes_text() {
        let html = render_page("nn <1>", "edges: 2 & more", "<svg></svg>");
        assert!(html.contains("<title>nn &lt;1&gt;</title>"));
        assert!(html.contains("edges: 2 &amp; more"));
        assert!(html.contains("<svg></svg>"));
        assert!(!html.contains("{{"));
    }
}
