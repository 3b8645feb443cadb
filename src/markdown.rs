//! Markdown helpers: note-syntax rewriting, reading time, HTML rendering.

use pulldown_cmark::{Options, Parser, html as md_html};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\[([^\]|]+)(?:\|(\d+)(?:x(\d+))?)?\]\]").expect("embed pattern")
});
static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("wiki link pattern"));

/// Rewrite note-taking syntax into plain markdown.
///
/// - `![[photo.png]]` → `![photo.png](/blog/<slug>/photo.png)`
/// - `![[photo.png|400]]` → `<img … width="400" />`
/// - `![[photo.png|400x300]]` → `<img … width="400" height="300" />`
/// - `[[Other Note]]` → `**Other Note**` (internal links have no page here)
pub fn rewrite_note_syntax(content: &str, slug: &str) -> String {
    let embedded = EMBED.replace_all(content, |caps: &Captures| {
        let file = &caps[1];
        let src = format!("/blog/{slug}/{file}");
        match (caps.get(2), caps.get(3)) {
            (Some(w), Some(h)) => format!(
                r#"<img src="{src}" alt="{file}" width="{}" height="{}" />"#,
                w.as_str(),
                h.as_str()
            ),
            (Some(w), None) => {
                format!(r#"<img src="{src}" alt="{file}" width="{}" />"#, w.as_str())
            }
            _ => format!("![{file}]({src})"),
        }
    });
    WIKI_LINK
        .replace_all(&embedded, |caps: &Captures| format!("**{}**", &caps[1]))
        .into_owned()
}

/// Reading time estimate, e.g. `"3 min read"`. Never less than one minute.
pub fn reading_time(text: &str, words_per_minute: u32) -> String {
    let words = text.split_whitespace().count() as u64;
    let wpm = u64::from(words_per_minute.max(1));
    let minutes = words.div_ceil(wpm).max(1);
    format!("{minutes} min read")
}

/// Render markdown to HTML. Raw HTML in the source is passed through.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut out, parser);
    out
}

/// Text of the first `# heading` line, if any.
pub fn first_heading(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .filter(|t| !t.is_empty())
}
