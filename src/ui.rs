// src/ui.rs
//
// Terminal presentation of a conversation session.

use crate::constants::{BULLET, HEADER_WIDTH, QUICK_QUESTIONS};
use crate::models::ChatMessage;
use crate::profile::Profile;
use crate::render::{render, Fragment, Span};
use colored::Colorize;

const HEAVY_HORIZONTAL: char = '━';

pub fn banner(profile: &Profile) -> Vec<String> {
    let rule = HEAVY_HORIZONTAL.to_string().repeat(HEADER_WIDTH);
    vec![
        rule.cyan().to_string(),
        format!(" {} · AI Assistant", profile.display_name())
            .bold()
            .to_string(),
        " Ask me anything!".dimmed().to_string(),
        rule.cyan().to_string(),
    ]
}

pub fn quick_questions() -> Vec<String> {
    let mut lines = vec!["Quick questions:".dimmed().to_string()];
    for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
        lines.push(format!("  {} {}", format!("/{}", i + 1).yellow(), question));
    }
    lines
}

pub fn help() -> Vec<String> {
    vec![
        "Type a question and press Enter.".to_string(),
        format!(
            "{}  quick question   {}  hide chat   {}  show chat   {}  leave",
            format!("/1-/{}", QUICK_QUESTIONS.len()).yellow(),
            "/close".yellow(),
            "/open".yellow(),
            "/quit".yellow()
        ),
    ]
}

fn spans_to_string(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.clone(),
            Span::Emphasis(text) => text.bold().blue().to_string(),
        })
        .collect()
}

pub fn fragment_line(fragment: &Fragment) -> String {
    match fragment {
        Fragment::LineBreak => String::new(),
        Fragment::Bullet { lead, body } => {
            let mut line = format!("  {} ", BULLET.to_string().blue());
            if let Some(lead) = lead {
                line.push_str(&lead.bold().blue().to_string());
            }
            line.push_str(&spans_to_string(body));
            line
        }
        Fragment::Paragraph(spans) => spans_to_string(spans),
    }
}

/// A message as printable lines: header, body, footer.
pub fn message_lines(message: &ChatMessage) -> Vec<String> {
    let (who, indent) = if message.is_assistant() {
        ("assistant".green().bold(), "")
    } else {
        ("you".yellow().bold(), "    ")
    };

    let mut lines = vec![format!(
        "{}┌─ {} {}",
        indent,
        who,
        message.time_label().dimmed()
    )];

    if message.is_assistant() {
        for fragment in render(message.text()) {
            lines.push(format!("{}│ {}", indent, fragment_line(&fragment)));
        }
    } else {
        for line in message.text().lines() {
            lines.push(format!("{}│ {}", indent, line));
        }
    }

    lines.push(format!("{}╰─", indent));
    lines
}

pub fn typing_message(profile: &Profile) -> String {
    format!("{} is typing...", profile.display_name())
}

pub fn unknown_command(command: &str) -> String {
    format!(
        "Unknown command {}. Use /1-/{} for quick questions or /help.",
        command,
        QUICK_QUESTIONS.len()
    )
}
