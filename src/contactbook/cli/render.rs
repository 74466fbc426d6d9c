use colored::Colorize;
use contactbook::commands::{CmdMessage, MessageLevel};
use contactbook::config::ContactBookConfig;
use contactbook::model::Contact;
use unicode_width::UnicodeWidthStr;

const NAME_WIDTH: usize = 15;
const PHONE_WIDTH: usize = 17;
const RULE_WIDTH: usize = 90;
const EMPTY_BOOK: &str = "No contacts in address book.";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_contacts(contacts: &[Contact]) {
    print!("{}", contacts_table(contacts));
}

pub fn print_config(config: &ContactBookConfig) {
    for key in ContactBookConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

/// Renders contacts as a fixed-width table, one line per contact.
pub fn contacts_table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return format!("{}\n", EMPTY_BOOK);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}  {}  {}\n",
        pad("Last", NAME_WIDTH),
        pad("First", NAME_WIDTH),
        pad("Phone", PHONE_WIDTH),
        "Email"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for contact in contacts {
        let line = format!(
            "{}  {}  {}  {}",
            pad(contact.last_name(), NAME_WIDTH),
            pad(contact.first_name(), NAME_WIDTH),
            pad(&format_phone(contact.phone_number()), PHONE_WIDTH),
            contact.email().unwrap_or_default()
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Displays a canonical number in groups: `+393445554466` → `+39 344 555 4466`.
pub fn format_phone(phone: &str) -> String {
    match (phone.get(..3), phone.get(3..6), phone.get(6..9), phone.get(9..)) {
        (Some(prefix), Some(a), Some(b), Some(rest)) if !rest.is_empty() => {
            format!("{} {} {} {}", prefix, a, b, rest)
        }
        _ => phone.to_string(),
    }
}

fn pad(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(value.width());
    format!("{}{}", value, " ".repeat(padding))
}
