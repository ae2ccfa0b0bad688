//! Line-based terminal output.

use chrono::Local;

use crate::models::{ChatMessage, Stream, User};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// ```text
/// alice · LIVE
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
}

pub fn print_separator() {
    println!("{}", "─".repeat(LINE_WIDTH));
}

pub fn print_field(label: &str, value: &str) {
    println!("  {:<11}{}", format!("{}:", label), value);
}

pub fn print_success(message: &str) {
    println!("  ✓ {}", message);
}

pub fn print_error(message: &str) {
    eprintln!("  ✗ {}", message);
}

pub fn print_info(message: &str) {
    println!("  · {}", message);
}

/// One row of a stream listing.
///
/// ```text
///   ● alice        42 viewers  Speedrun
/// ```
pub fn print_stream_row(stream: &Stream) {
    let marker = if stream.live { "●" } else { "○" };
    println!(
        "  {} {:<12} {:>5} viewers  {}",
        marker,
        stream.username,
        stream.viewers,
        stream.display_title()
    );
}

pub fn print_stream(stream: &Stream) {
    let state = if stream.live { "LIVE" } else { "offline" };
    print_header(&format!("{} · {}", stream.username, state));
    print_field("Title", stream.display_title());
    print_field("Viewers", &stream.viewers.to_string());
    if let Some(started) = &stream.started_at {
        print_field("Started", started);
    }
}

pub fn print_user(user: &User, following: Option<bool>) {
    print_header(&user.username);
    print_field("Bio", user.bio.as_deref().unwrap_or("-"));
    print_field("Followers", &user.followers_count.to_string());
    print_field("Joined", &user.created_at);
    if user.has_profile_picture() {
        let size = user.profile_pic.as_ref().map_or(0, Vec::len);
        print_field("Picture", &format!("{} bytes", size));
    }
    if let Some(following) = following {
        print_field("Following", if following { "yes" } else { "no" });
    }
}

/// `[14:02] alice: hello`, using local time when `at` parses.
pub fn print_chat_message(message: &ChatMessage) {
    println!("{}", format_chat_message(message));
}

pub fn format_chat_message(message: &ChatMessage) -> String {
    let time = message
        .timestamp()
        .map(|ts| ts.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| message.at.clone());
    format!("[{}] {}: {}", time, message.username, message.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_chat_message_keeps_unparsed_time() {
        let message = ChatMessage::new("bob", "hi", "sometime");
        assert_eq!(format_chat_message(&message), "[sometime] bob: hi");
    }

    #[test]
    fn test_format_chat_message_parsed_time() {
        let message = ChatMessage::new("bob", "hi", "2024-01-01T12:30:00Z");
        let line = format_chat_message(&message);
        assert!(line.ends_with("] bob: hi"));
        assert_eq!(line.find(']'), Some(6));
    }
}
