//! Restricted Markdown rendering for untrusted comment text
//!
//! Comments get a prose-only dialect: paragraphs, emphasis, inline code,
//! code blocks, lists, block quotes, tables and links. Everything else is
//! rewritten in the event stream before it reaches the HTML writer:
//!
//! - raw HTML (block or inline) becomes text and is escaped
//! - images become a literal `!` followed by a plain link
//! - headings and thematic breaks stay as literal paragraph text
//! - links to `javascript:`, `vbscript:`, `file:` and `data:` keep only their text
//!
//! Bare `http(s)://` URLs, `www.` hosts and domains under common generic
//! TLDs (`example.com`) in text are turned into links.

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "file:", "data:"];

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"', ')', ']'];

/// Regex for bare URLs in prose
fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"(?ix)
            \b(?:https?://|www\.)[^\s<>]+
            | \b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+
              (?:com|net|org|edu|gov|info|biz|io|dev|app)\b
              (?:[/?\#][^\s<>]*)?",
        )
        .unwrap()
    })
}

/// Render comment Markdown to sanitized HTML.
pub fn to_html(markdown: &str) -> Result<String, fmt::Error> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).into_offset_iter();
    let events = TextMergeStream::new(literal_headings(markdown, parser).into_iter());
    let events = restrict(events);

    let mut output = String::with_capacity(markdown.len() * 2);
    html::write_html_fmt(&mut output, events.into_iter())?;
    Ok(output)
}

/// Turn headings back into paragraphs that show their source markers:
/// `## Title` keeps its hashes, a setext `Title` keeps its underline.
fn literal_headings<'a>(
    source: &str,
    parser: impl Iterator<Item = (Event<'a>, Range<usize>)>,
) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut underline: Option<String> = None;

    for (event, range) in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                events.push(Event::Start(Tag::Paragraph));
                let heading = source.get(range).unwrap_or_default();
                if heading.trim_start().starts_with('#') {
                    let marker = format!("{} ", "#".repeat(level as usize));
                    events.push(Event::Text(marker.into()));
                } else {
                    // Inside a block quote the underline line carries `>` markers
                    underline = heading.trim_end().lines().last().map(|line| {
                        line.trim_start_matches(|c: char| c == '>' || c.is_whitespace())
                            .trim_end()
                            .to_string()
                    });
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(line) = underline.take() {
                    events.push(Event::SoftBreak);
                    events.push(Event::Text(line.into()));
                }
                events.push(Event::End(TagEnd::Paragraph));
            }
            other => events.push(other),
        }
    }

    events
}

/// Rewrite the event stream down to the allowed subset
fn restrict<'a>(parser: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    // One entry per open link or image: whether its start tag was emitted
    let mut links: Vec<bool> = Vec::new();
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

            Event::Start(Tag::HtmlBlock) => events.push(Event::Start(Tag::Paragraph)),
            Event::End(TagEnd::HtmlBlock) => events.push(Event::End(TagEnd::Paragraph)),

            Event::Rule => {
                events.push(Event::Start(Tag::Paragraph));
                events.push(Event::Text("---".into()));
                events.push(Event::End(TagEnd::Paragraph));
            }

            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                events.push(Event::Text("!".into()));
                push_link_start(&mut events, &mut links, link_type, dest_url, title, id);
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => push_link_start(&mut events, &mut links, link_type, dest_url, title, id),
            Event::End(TagEnd::Image) | Event::End(TagEnd::Link) => {
                if links.pop().unwrap_or(false) {
                    events.push(Event::End(TagEnd::Link));
                }
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                events.push(Event::Start(Tag::CodeBlock(kind)));
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                events.push(Event::End(TagEnd::CodeBlock));
            }

            Event::Text(text) if !in_code_block && links.is_empty() => {
                push_linkified(&mut events, text)
            }

            other => events.push(other),
        }
    }

    events
}

fn push_link_start<'a>(
    events: &mut Vec<Event<'a>>,
    links: &mut Vec<bool>,
    link_type: LinkType,
    dest_url: CowStr<'a>,
    title: CowStr<'a>,
    id: CowStr<'a>,
) {
    let allowed = is_allowed_destination(&dest_url);
    if allowed {
        events.push(Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }));
    }
    links.push(allowed);
}

fn is_allowed_destination(dest: &str) -> bool {
    // Browsers ignore embedded whitespace and control characters in schemes
    let normalized: String = dest
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    !BLOCKED_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

/// Strip trailing punctuation. A `)` stays when it closes a `(` in the URL.
fn trim_url(url: &str) -> &str {
    let mut url = url;
    while let Some(last) = url.chars().last() {
        if !TRAILING_PUNCTUATION.contains(&last) {
            break;
        }
        if last == ')' && url.matches('(').count() >= url.matches(')').count() {
            break;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
    url
}

fn has_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Push `text`, splitting out bare URLs as autolinks
fn push_linkified<'a>(events: &mut Vec<Event<'a>>, text: CowStr<'a>) {
    let urls: Vec<(usize, usize)> = url_regex()
        .find_iter(&text)
        // `user@example.com` is an address, not a link
        .filter(|m| !text[..m.start()].ends_with('@'))
        .filter_map(|m| {
            let url = trim_url(m.as_str());
            let host_start = if url.to_ascii_lowercase().starts_with("www.") {
                "www.".len()
            } else {
                url.find("://").map_or(0, |i| i + "://".len())
            };
            (url.len() > host_start).then(|| (m.start(), m.start() + url.len()))
        })
        .collect();

    if urls.is_empty() {
        events.push(Event::Text(text));
        return;
    }

    let mut last = 0;
    for (start, end) in urls {
        if start > last {
            events.push(Event::Text(text[last..start].to_string().into()));
        }

        let url = &text[start..end];
        let href = if has_scheme(url) {
            url.to_string()
        } else {
            format!("http://{}", url)
        };
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(url.to_string().into()));
        events.push(Event::End(TagEnd::Link));

        last = end;
    }
    if last < text.len() {
        events.push(Event::Text(text[last..].to_string().into()));
    }
}
