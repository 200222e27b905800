//! A small HTML pretty-printer over the html5gum token stream: one tag or
//! text run per line, children indented under their parent. Content of `pre`,
//! `script`, `style` and `textarea` keeps its whitespace.

use html5gum::{DefaultEmitter, Doctype, HtmlString, StartTag, Token, Tokenizer};
use regex_lite::Regex;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["pre", "script", "style", "textarea"];

/// Elements whose text the tokenizer hands back unescaped and unparsed.
const SCRIPT_LIKE_ELEMENTS: &[&str] = &["script", "style"];

/// Pretty-print `html` and strip the whitespace run that tends to collect
/// before `</textarea>`.
pub fn make_readable(html: &str, indent: usize) -> String {
    let pretty = prettify(html, indent);
    let re = Regex::new(r"[ \n]{2,}</textarea>").expect("valid regex");
    re.replace_all(&pretty, "</textarea>").into_owned()
}

pub fn prettify(html: &str, indent: usize) -> String {
    let mut emitter = DefaultEmitter::default();
    emitter.switch_states(true);

    let mut out = String::with_capacity(html.len() + html.len() / 4);
    let mut open: Vec<String> = Vec::new();
    let mut text = String::new();
    // Raw-text element being collected onto a single line: (name, line so far).
    let mut verbatim: Option<(String, String)> = None;

    for token in Tokenizer::new_with_emitter(html, emitter).infallible() {
        if let Some((name, mut line)) = verbatim.take() {
            match token {
                Token::EndTag(tag) if lossy(&tag.name) == name => {
                    line.push_str(&format!("</{name}>"));
                    push_line(&mut out, open.len(), indent, &line);
                }
                token => {
                    append_verbatim(&mut line, &name, token);
                    verbatim = Some((name, line));
                }
            }
            continue;
        }

        match token {
            Token::String(s) => text.push_str(&lossy(&s)),
            Token::StartTag(tag) => {
                flush_text(&mut out, &mut text, open.len(), indent);
                let name = lossy(&tag.name);
                let rendered = start_tag(&tag);
                if RAW_TEXT_ELEMENTS.contains(&name.as_str()) && !tag.self_closing {
                    verbatim = Some((name, rendered));
                } else {
                    push_line(&mut out, open.len(), indent, &rendered);
                    if !tag.self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                        open.push(name);
                    }
                }
            }
            Token::EndTag(tag) => {
                flush_text(&mut out, &mut text, open.len(), indent);
                let name = lossy(&tag.name);
                // Unmatched end tags are printed but leave nesting alone.
                if let Some(pos) = open.iter().rposition(|o| *o == name) {
                    open.truncate(pos);
                }
                push_line(&mut out, open.len(), indent, &format!("</{name}>"));
            }
            Token::Comment(comment) => {
                flush_text(&mut out, &mut text, open.len(), indent);
                push_line(
                    &mut out,
                    open.len(),
                    indent,
                    &format!("<!--{}-->", lossy(&comment)),
                );
            }
            Token::Doctype(doctype) => {
                flush_text(&mut out, &mut text, open.len(), indent);
                push_line(&mut out, open.len(), indent, &doctype_line(&doctype));
            }
            Token::Error(_) => {}
        }
    }

    if let Some((_, line)) = verbatim {
        push_line(&mut out, open.len(), indent, &line);
    }
    flush_text(&mut out, &mut text, open.len(), indent);
    out
}

fn append_verbatim(line: &mut String, element: &str, token: Token) {
    match token {
        Token::String(s) if SCRIPT_LIKE_ELEMENTS.contains(&element) => line.push_str(&lossy(&s)),
        Token::String(s) => line.push_str(&escape_text(&lossy(&s))),
        Token::StartTag(tag) => line.push_str(&start_tag(&tag)),
        Token::EndTag(tag) => line.push_str(&format!("</{}>", lossy(&tag.name))),
        Token::Comment(comment) => line.push_str(&format!("<!--{}-->", lossy(&comment))),
        Token::Doctype(_) | Token::Error(_) => {}
    }
}

fn flush_text(out: &mut String, text: &mut String, depth: usize, indent: usize) {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        push_line(out, depth, indent, &escape_text(&collapsed));
    }
    text.clear();
}

fn push_line(out: &mut String, depth: usize, indent: usize, line: &str) {
    for _ in 0..depth * indent {
        out.push(' ');
    }
    out.push_str(line);
    out.push('\n');
}

fn lossy(s: &HtmlString) -> String {
    String::from_utf8_lossy(&**s).into_owned()
}

fn start_tag(tag: &StartTag) -> String {
    let mut rendered = format!("<{}", lossy(&tag.name));
    for (key, value) in &tag.attributes {
        rendered.push(' ');
        rendered.push_str(&lossy(key));
        if !value.is_empty() {
            rendered.push_str("=\"");
            rendered.push_str(&escape_attribute(&lossy(value)));
            rendered.push('"');
        }
    }
    rendered.push_str(if tag.self_closing { "/>" } else { ">" });
    rendered
}

fn doctype_line(doctype: &Doctype) -> String {
    let mut line = format!("<!DOCTYPE {}", lossy(&doctype.name));
    if let Some(public) = &doctype.public_identifier {
        line.push_str(&format!(" PUBLIC \"{}\"", lossy(public)));
    }
    if let Some(system) = &doctype.system_identifier {
        if doctype.public_identifier.is_none() {
            line.push_str(" SYSTEM");
        }
        line.push_str(&format!(" \"{}\"", lossy(system)));
    }
    line.push('>');
    line
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
