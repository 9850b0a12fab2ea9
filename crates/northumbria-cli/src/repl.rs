use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use northumbria_client::{
    ActivityFlags, AgentClientTrait, Attachment, AttachmentKind, ChatSession, SendOutcome,
};

use crate::render;

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Attach {
        path: &'a str,
        kind: Option<AttachmentKind>,
    },
    Detach,
    State,
    New,
    Help,
    Unknown(&'a str),
    Empty,
    Text(&'a str),
}

fn parse_line(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        return Input::Quit;
    }
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Input::Text(line);
    };

    let mut words = command.split_whitespace();
    match words.next().unwrap_or("") {
        "attach" => match (words.next(), words.next()) {
            (Some(path), None) => Input::Attach { path, kind: None },
            (Some(path), Some("id")) => Input::Attach {
                path,
                kind: Some(AttachmentKind::IdCard),
            },
            (Some(path), Some("live")) => Input::Attach {
                path,
                kind: Some(AttachmentKind::LiveImage),
            },
            _ => Input::Unknown(line),
        },
        "detach" => Input::Detach,
        "state" => Input::State,
        "new" => Input::New,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(line),
    }
}

pub async fn run_interactive_chat<C: AgentClientTrait>(
    mut session: ChatSession<C>,
) -> anyhow::Result<()> {
    render::header();
    if let Some(thread_id) = session.context().thread_id() {
        println!("{}", format!("Resuming thread {}", thread_id).dimmed());
    } else {
        render::welcome();
    }
    println!("{}", "Type /help for commands, 'exit' to leave".dimmed());
    println!();

    loop {
        print!("{} ", "You:".cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let input = parse_line(&line);
        let typed = match outgoing_text(&input, session.attachment().is_some()) {
            Some(text) => text,
            None => {
                if !run_command(&mut session, input).await {
                    break;
                }
                continue;
            }
        };

        let shown = session.transcript().len();
        let indicator = tokio::spawn(show_activity(session.activity()));
        let outcome = session.submit(&typed).await;
        if indicator.await.unwrap_or(false) {
            println!();
        }

        if matches!(outcome, SendOutcome::Rejected) {
            continue;
        }
        // Echo the user's message only when it differs from what was typed.
        let skip = if session.transcript().messages()[shown].content == typed {
            shown + 1
        } else {
            shown
        };
        for message in &session.transcript().messages()[skip..] {
            render::message(message);
        }
        println!();
    }

    Ok(())
}

/// Text to submit for this line, if it is a message rather than a command.
/// A blank line still sends when a file is waiting.
fn outgoing_text(input: &Input<'_>, has_attachment: bool) -> Option<String> {
    match input {
        Input::Text(text) => Some(text.to_string()),
        Input::Empty if has_attachment => Some(String::new()),
        _ => None,
    }
}

/// Runs a non-message line. Returns `false` when the user asked to leave.
async fn run_command<C: AgentClientTrait>(session: &mut ChatSession<C>, input: Input<'_>) -> bool {
    match input {
        Input::Quit => {
            println!("{}", "👋 Goodbye!".cyan());
            return false;
        }
        Input::Help => render::help(),
        Input::State => render::context(session.context()),
        Input::New => {
            session.restart();
            println!("{}", "Started a new conversation.".dimmed());
            render::welcome();
        }
        Input::Detach => match session.detach() {
            Some(file) => println!("{}", format!("Removed {}", file.file_name).dimmed()),
            None => println!("{}", "Nothing attached.".dimmed()),
        },
        Input::Attach { path, kind } => match Attachment::from_path(path).await {
            Ok(attachment) => {
                let attachment = match kind {
                    Some(kind) => attachment.with_kind(kind),
                    None => attachment,
                };
                render::attachment(&attachment);
                session.attach(attachment);
            }
            Err(e) => println!("{}", format!("❌ {}", e).red()),
        },
        Input::Unknown(command) => {
            println!("{}", format!("Unknown command: {}", command).red());
        }
        Input::Empty | Input::Text(_) => {}
    }
    true
}

/// Prints a thinking indicator while a send is in flight. Returns whether
/// anything was printed.
async fn show_activity(activity: ActivityFlags) -> bool {
    tokio::time::sleep(Duration::from_millis(200)).await;
    if !activity.is_loading() {
        return false;
    }

    let label = if activity.is_uploading() {
        "Uploading... AskNorthumbria is thinking"
    } else {
        "AskNorthumbria is thinking"
    };
    print!("{}", label.dimmed());
    let _ = io::stdout().flush();

    while activity.is_loading() {
        print!("{}", ".".dimmed());
        let _ = io::stdout().flush();
        tokio::time::sleep(Duration::from_millis(400)).await;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words_quit() {
        assert_eq!(parse_line("exit\n"), Input::Quit);
        assert_eq!(parse_line("QUIT"), Input::Quit);
        assert_eq!(parse_line("/quit"), Input::Quit);
    }

    #[test]
    fn attach_with_kind() {
        assert_eq!(
            parse_line("/attach ./card.jpg id"),
            Input::Attach {
                path: "./card.jpg",
                kind: Some(AttachmentKind::IdCard)
            }
        );
        assert_eq!(
            parse_line("/attach selfie.jpg live"),
            Input::Attach {
                path: "selfie.jpg",
                kind: Some(AttachmentKind::LiveImage)
            }
        );
        assert_eq!(
            parse_line("/attach fees.pdf"),
            Input::Attach {
                path: "fees.pdf",
                kind: None
            }
        );
    }

    #[test]
    fn malformed_commands_are_unknown() {
        assert_eq!(parse_line("/attach"), Input::Unknown("/attach"));
        assert_eq!(parse_line("/attach a.jpg passport"), Input::Unknown("/attach a.jpg passport"));
        assert_eq!(parse_line("/dance"), Input::Unknown("/dance"));
    }

    #[test]
    fn plain_text_is_trimmed() {
        assert_eq!(parse_line("  What are the tuition fees?  \n"), Input::Text("What are the tuition fees?"));
        assert_eq!(parse_line("   \n"), Input::Empty);
    }

    #[test]
    fn blank_line_sends_only_with_pending_file() {
        assert_eq!(outgoing_text(&parse_line("\n"), false), None);
        assert_eq!(outgoing_text(&parse_line("\n"), true), Some(String::new()));
    }

    #[test]
    fn text_is_sent_and_commands_are_not() {
        assert_eq!(
            outgoing_text(&parse_line("2\n"), false),
            Some("2".to_string())
        );
        assert_eq!(outgoing_text(&parse_line("/detach"), true), None);
        assert_eq!(outgoing_text(&parse_line("quit"), true), None);
    }
}
