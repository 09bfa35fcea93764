// src/render.rs
//
// Markdown-lite: only bullets (`*` / `-`) and `**bold**` spans are recognised.
// Every other character is passed through as text.

use std::str::Split;

const BOLD: &str = "**";

/// An inline run of text inside a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Emphasis(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(text) | Span::Emphasis(text) => text,
        }
    }
}

/// One display unit, produced per source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    LineBreak,
    /// `lead` is the bold label of `* **Label** rest` bullets.
    Bullet { lead: Option<String>, body: Vec<Span> },
    Paragraph(Vec<Span>),
}

/// How a trimmed line is displayed. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Empty,
    LabelledBullet { lead: &'a str, rest: &'a str },
    Bullet { body: &'a str },
    Emphasized,
    Plain,
}

pub fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Empty;
    }

    if let Some(body) = strip_bullet_marker(line) {
        if let Some((lead, rest)) = leading_bold(body) {
            return LineKind::LabelledBullet { lead, rest };
        }
        return LineKind::Bullet { body };
    }

    if line.contains(BOLD) {
        LineKind::Emphasized
    } else {
        LineKind::Plain
    }
}

/// `"* rest"` / `"- rest"` -> `rest`. The marker needs at least one
/// whitespace character after it.
fn strip_bullet_marker(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('*').or_else(|| line.strip_prefix('-'))?;
    let body = rest.trim_start();
    if body.len() == rest.len() {
        return None;
    }
    Some(body)
}

/// `"**lead**rest"` -> `(lead, rest)`, closing on the first `**`.
fn leading_bold(body: &str) -> Option<(&str, &str)> {
    let inner = body.strip_prefix(BOLD)?;
    let close = inner.find(BOLD)?;
    Some((&inner[..close], &inner[close + BOLD.len()..]))
}

/// Splits `text` on paired `**` delimiters. An opening `**` without a
/// closing partner is kept as literal text.
pub fn inline_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    loop {
        let Some(open) = rest.find(BOLD) else { break };
        let after_open = &rest[open + BOLD.len()..];
        let Some(close) = after_open.find(BOLD) else { break };

        push_plain(&mut spans, &rest[..open]);
        let bold = &after_open[..close];
        if !bold.is_empty() {
            spans.push(Span::Emphasis(bold.to_string()));
        }
        rest = &after_open[close + BOLD.len()..];
    }

    push_plain(&mut spans, rest);
    spans
}

fn push_plain(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::Plain(text.to_string()));
    }
}

pub fn render_line(line: &str) -> Fragment {
    let line = line.trim();
    match classify(line) {
        LineKind::Empty => Fragment::LineBreak,
        LineKind::LabelledBullet { lead, rest } => {
            let mut body = Vec::new();
            push_plain(&mut body, rest);
            Fragment::Bullet {
                lead: Some(lead.to_string()),
                body,
            }
        }
        LineKind::Bullet { body } => Fragment::Bullet {
            lead: None,
            body: inline_spans(body),
        },
        LineKind::Emphasized => Fragment::Paragraph(inline_spans(line)),
        LineKind::Plain => Fragment::Paragraph(vec![Span::Plain(line.to_string())]),
    }
}

/// Lazy fragment sequence over an assistant reply. Clone it to start over.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    lines: Split<'a, char>,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        self.lines.next().map(render_line)
    }
}

/// Renders `text` one fragment per `\n`-separated line. Never fails.
pub fn render(text: &str) -> Fragments<'_> {
    Fragments {
        lines: text.split('\n'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> Span {
        Span::Plain(s.to_string())
    }

    fn bold(s: &str) -> Span {
        Span::Emphasis(s.to_string())
    }

    #[test]
    fn test_empty_input_is_one_line_break() {
        assert_eq!(render("").collect::<Vec<_>>(), vec![Fragment::LineBreak]);
    }

    #[test]
    fn test_whitespace_line_is_line_break() {
        assert_eq!(render_line("   \t"), Fragment::LineBreak);
    }

    #[test]
    fn test_labelled_bullet() {
        let fragments: Vec<_> = render("* **Foo** bar").collect();
        assert_eq!(
            fragments,
            vec![Fragment::Bullet {
                lead: Some("Foo".to_string()),
                body: vec![plain(" bar")],
            }]
        );
    }

    #[test]
    fn test_labelled_bullet_rest_is_not_reparsed() {
        assert_eq!(
            render_line("- **Acme** - used **Rust**"),
            Fragment::Bullet {
                lead: Some("Acme".to_string()),
                body: vec![plain(" - used **Rust**")],
            }
        );
    }

    #[test]
    fn test_plain_bullet_gets_inline_emphasis() {
        assert_eq!(
            render_line("-   built with **Laravel** and PHP"),
            Fragment::Bullet {
                lead: None,
                body: vec![plain("built with "), bold("Laravel"), plain(" and PHP")],
            }
        );
    }

    #[test]
    fn test_bullet_with_unclosed_lead_falls_back() {
        assert_eq!(
            render_line("* **Foo bar"),
            Fragment::Bullet {
                lead: None,
                body: vec![plain("**Foo bar")],
            }
        );
    }

    #[test]
    fn test_marker_needs_whitespace() {
        assert_eq!(
            render_line("**React** is great"),
            Fragment::Paragraph(vec![bold("React"), plain(" is great")])
        );
        assert_eq!(
            render_line("-5 degrees"),
            Fragment::Paragraph(vec![plain("-5 degrees")])
        );
        assert_eq!(render_line("* "), Fragment::Paragraph(vec![plain("*")]));
    }

    #[test]
    fn test_paragraph_with_inline_bold() {
        let fragments: Vec<_> = render("plain text **bold** more").collect();
        assert_eq!(
            fragments,
            vec![Fragment::Paragraph(vec![
                plain("plain text "),
                bold("bold"),
                plain(" more"),
            ])]
        );
    }

    #[test]
    fn test_unpaired_delimiters_stay_literal() {
        assert_eq!(
            inline_spans("a **b** c ** d"),
            vec![plain("a "), bold("b"), plain(" c ** d")]
        );
        assert_eq!(inline_spans("****"), Vec::<Span>::new());
        assert_eq!(inline_spans("x***y**"), vec![plain("x"), bold("*y")]);
    }

    #[test]
    fn test_plain_line_is_trimmed() {
        assert_eq!(
            render_line("  hello there  \r"),
            Fragment::Paragraph(vec![plain("hello there")])
        );
    }

    #[test]
    fn test_one_fragment_per_line() {
        let text = "Here you go:\n\n* **Acme** - intern\n- Rust\nThanks!";
        let fragments: Vec<_> = render(text).collect();
        assert_eq!(fragments.len(), 5);
        assert_eq!(fragments[1], Fragment::LineBreak);
        assert!(matches!(fragments[2], Fragment::Bullet { lead: Some(_), .. }));
        assert!(matches!(fragments[3], Fragment::Bullet { lead: None, .. }));
    }

    #[test]
    fn test_fragments_restart_by_clone() {
        let fragments = render("a\nb");
        let first: Vec<_> = fragments.clone().collect();
        let second: Vec<_> = fragments.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let fragments: Vec<_> = render("• **héllo** wörld 😅\n* **ü**").collect();
        assert_eq!(fragments.len(), 2);
        assert_eq!(
            fragments[1],
            Fragment::Bullet {
                lead: Some("ü".to_string()),
                body: vec![],
            }
        );
    }
}
