use anyhow::Context;
use colored::Colorize;
use folio::{
    config::load_config, constants::QUICK_QUESTIONS, logging::init_logging, ui,
    ConversationSession, GeminiClient, Profile, SendOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::sync::Arc;
use std::time::Duration;

enum Command<'a> {
    Quit,
    Open,
    Close,
    Help,
    Quick(usize),
    Unknown(&'a str),
    Ask(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "/quit" | "/exit" => Command::Quit,
        "/open" => Command::Open,
        "/close" => Command::Close,
        "/help" => Command::Help,
        other => match other.strip_prefix('/') {
            Some(rest) => match rest.parse::<usize>() {
                Ok(n) if (1..=QUICK_QUESTIONS.len()).contains(&n) => Command::Quick(n - 1),
                _ => Command::Unknown(other),
            },
            None => Command::Ask(other),
        },
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

/// Prints every transcript message from `from` on, returns the new length.
fn print_since(session: &ConversationSession, from: usize) -> usize {
    let transcript = session.transcript();
    for message in transcript.iter().skip(from) {
        print_lines(ui::message_lines(message));
    }
    transcript.len()
}

async fn run_turn(session: &ConversationSession, command: Command<'_>) -> SendOutcome {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(ui::typing_message(session.profile()));
    pb.enable_steady_tick(Duration::from_millis(80));

    let outcome = match command {
        Command::Quick(index) => session.send_quick(index).await,
        Command::Ask(text) => session.send(text).await,
        _ => SendOutcome::Ignored,
    };

    pb.finish_and_clear();
    outcome
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = load_config().context("failed to load configuration")?;
    init_logging(&config.log_level);

    let profile = Profile::load_or_bundled(config.profile_path.as_deref())
        .context("failed to load profile")?;
    let generator = Arc::new(GeminiClient::new(&config)?);
    info!("Using model {}", config.model);

    let session = ConversationSession::new(profile, generator);
    session.open();

    print_lines(ui::banner(session.profile()));
    let mut shown = print_since(&session, 0);
    print_lines(ui::quick_questions());

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("→ ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => print_lines(ui::help()),
            Command::Unknown(command) => println!("{}", ui::unknown_command(command).yellow()),
            Command::Close => {
                session.close();
                println!("{}", "Chat hidden. Type /open to continue.".dimmed());
            }
            Command::Open => {
                if !session.is_open() {
                    session.open();
                    shown = 0;
                }
                print_lines(ui::banner(session.profile()));
                shown = print_since(&session, shown);
            }
            command if session.is_open() => {
                if run_turn(&session, command).await != SendOutcome::Ignored {
                    shown = print_since(&session, shown);
                }
            }
            _ => println!("{}", "Chat is hidden. Type /open to continue.".dimmed()),
        }
    }

    println!("{}", "Bye! 👋".cyan());
    Ok(())
}
