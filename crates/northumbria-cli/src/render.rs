use colored::Colorize;
use northumbria_client::format::{segments, Segment};
use northumbria_client::welcome::{
    ASSISTANT_NAME, FOOTER, GREETING, INTRO, PROMPT, QUICK_ACTIONS, TAGLINE,
};
use northumbria_client::{Attachment, Message, SessionContext};

pub fn header() {
    println!(
        "{} {}",
        ASSISTANT_NAME.cyan().bold(),
        format!("- {}", TAGLINE).dimmed()
    );
    println!("{}", "─".repeat(50).dimmed());
}

pub fn welcome() {
    println!();
    println!("{}", GREETING.bold());
    println!("{}", INTRO);
    println!();
    println!("{}", PROMPT.dimmed());
    for action in QUICK_ACTIONS.iter() {
        println!(
            "  {} {}  {}",
            "•".cyan(),
            action.title.bold(),
            action.description.dimmed()
        );
    }
    println!();
    println!("{}", FOOTER.dimmed());
    println!();
}

pub fn message(message: &Message) {
    if message.role.is_user() {
        println!("{} {}", "You:".cyan().bold(), body(&message.content));
    } else {
        println!(
            "{} {}",
            format!("{}:", ASSISTANT_NAME).green().bold(),
            body(&message.content)
        );
    }
}

fn body(text: &str) -> String {
    segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.to_string(),
            Segment::Link { url, trailing } => format!("{}{}", url.blue().underline(), trailing),
        })
        .collect()
}

pub fn attachment(attachment: &Attachment) {
    let kind = attachment
        .kind
        .map(|kind| format!(" [{}]", kind.as_str()))
        .unwrap_or_default();
    println!(
        "{}",
        format!(
            "📎 {} ({}){}",
            attachment.file_name,
            attachment.size_kb(),
            kind
        )
        .yellow()
    );
}

pub fn context(context: &SessionContext) {
    println!(
        "{} {}",
        "Thread:".dimmed(),
        context.thread_id().unwrap_or("(none yet)")
    );
    println!("{}\n{:#}", "State:".dimmed(), context.state());
}

pub fn help() {
    println!("{}", "Commands:".bold());
    println!("  /attach <path> [id|live]  attach a file (optionally as an ID card or live image)");
    println!("  /detach                   drop the pending attachment");
    println!("  /state                    show the thread id and agent state");
    println!("  /new                      start a new conversation");
    println!("  /help                     show this help");
    println!("  exit | quit               leave");
}
