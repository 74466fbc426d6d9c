//! Interactive, menu-driven session.
//!
//! The shell is generic over its input and output so tests can drive it with
//! in-memory buffers. End of input at any prompt ends the session without
//! saving.

use super::render::contacts_table;
use contactbook::book::AddressBook;
use contactbook::commands::{self, CmdResult, ContactInput, ContactPatch};
use contactbook::error::{ContactError, Result, ValidationError};
use contactbook::model::Contact;
use contactbook::store::ContactStore;
use contactbook::validators::{validate_email, validate_name, validate_phone_number};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const START_MENU: &str = "\nStarting menu commands:

new: start a new address book.
load: load from json file.
clear: clear the screen
exit: exit from the program.
";

const MAIN_MENU: &str = "\nCommands:

add: add a new contact
list: list all contacts
search: search a contact
edit: edit a contact
delete: delete a contact
save: save the changes
clear: clear the screen
exit: exit from the application
";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Typed in the email field while editing to remove the email.
const CLEAR_EMAIL: &str = "-";

pub struct ShellOptions {
    /// Used when the user leaves a path prompt blank
    pub default_path: PathBuf,
    pub confirm_delete: bool,
}

enum Flow {
    Continue,
    Done,
}

pub struct Shell<'a, S: ContactStore, R: BufRead, W: Write> {
    book: &'a mut AddressBook<S>,
    input: R,
    output: W,
    options: ShellOptions,
}

impl<'a, S: ContactStore, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(book: &'a mut AddressBook<S>, input: R, output: W, options: ShellOptions) -> Self {
        Self {
            book,
            input,
            output,
            options,
        }
    }

    pub fn run(mut self) -> Result<()> {
        if let Flow::Done = self.start_menu()? {
            return Ok(());
        }
        self.main_menu()
    }

    fn start_menu(&mut self) -> Result<Flow> {
        loop {
            write!(self.output, "{}", START_MENU)?;
            let Some(cmd) = self.prompt("> ")? else {
                return Ok(Flow::Done);
            };

            match cmd.trim().to_lowercase().as_str() {
                "new" => {
                    self.say("Started a new address book.")?;
                    return Ok(Flow::Continue);
                }
                "load" => {
                    let Some(path) = self.prompt_path("Path to JSON")? else {
                        return Ok(Flow::Done);
                    };
                    match self.book.load(&path) {
                        Ok(()) => {
                            let loaded = self.book.size();
                            self.say(&format!(
                                "Loaded {} contacts from {}.",
                                loaded,
                                path.display()
                            ))?;
                            return Ok(Flow::Continue);
                        }
                        Err(e) => self.say(&format!("Error: {}", e))?,
                    }
                }
                "clear" => self.clear_screen()?,
                "exit" => {
                    self.say("\nExiting from the contact book.")?;
                    return Ok(Flow::Done);
                }
                _ => self.say("Invalid command.")?,
            }
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MAIN_MENU)?;
            let Some(cmd) = self.prompt("> ")? else {
                return Ok(());
            };

            let flow = match cmd.trim().to_lowercase().as_str() {
                "add" => self.add()?,
                "list" => self.list()?,
                "search" => self.search()?,
                "edit" => self.edit()?,
                "delete" => self.delete()?,
                "save" => self.save()?,
                "clear" => {
                    self.clear_screen()?;
                    Flow::Continue
                }
                "exit" => self.exit()?,
                _ => {
                    self.say("Invalid command.")?;
                    Flow::Continue
                }
            };

            if let Flow::Done = flow {
                return Ok(());
            }
        }
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(first) = self.ask("First name (required): ", validate_name)? else {
            return Ok(Flow::Done);
        };
        let Some(last) = self.ask("Last name (required): ", validate_name)? else {
            return Ok(Flow::Done);
        };
        let Some(phone) = self.ask("Phone number (required): ", validate_phone_number)? else {
            return Ok(Flow::Done);
        };
        let Some(email) = self.ask("Email (optional): ", validate_email)? else {
            return Ok(Flow::Done);
        };

        let input = ContactInput::new(first, last, phone, email.unwrap_or_default());
        let outcome = commands::add::run(self.book, &input);
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<Flow> {
        let result = commands::list::run(self.book)?;
        write!(self.output, "{}", contacts_table(&result.listed_contacts))?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(query) = self.prompt("\nSearch contact: ")? else {
            return Ok(Flow::Done);
        };

        let result = commands::search::run(self.book, &query)?;
        if !result.listed_contacts.is_empty() {
            write!(self.output, "{}", contacts_table(&result.listed_contacts))?;
        }
        self.report(Ok(result))?;
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> Result<Flow> {
        let Some(current) = self.select("Select the contact you want to edit: ")? else {
            return Ok(Flow::Continue);
        };

        self.say("\nCurrent contact informations:")?;
        self.say(&format!("First: {}", current.first_name()))?;
        self.say(&format!("Last:  {}", current.last_name()))?;
        self.say(&format!("Phone: {}", current.phone_number()))?;
        self.say(&format!("Email: {}", current.email().unwrap_or_default()))?;
        self.say(&format!(
            "\nAdd new contact data (leave blank to keep, '{}' removes the email): ",
            CLEAR_EMAIL
        ))?;

        let mut fields = Vec::with_capacity(4);
        for label in ["First name: ", "Last name: ", "Phone number: ", "Email: "] {
            match self.prompt(label)? {
                Some(value) => fields.push(value),
                None => return Ok(Flow::Done),
            }
        }
        let email = fields.pop().unwrap_or_default();
        let phone = fields.pop();
        let last_name = fields.pop();
        let first_name = fields.pop();

        let clear_email = email.trim() == CLEAR_EMAIL;
        let patch = ContactPatch {
            first_name,
            last_name,
            phone,
            email: (!clear_email).then_some(email),
            clear_email,
        };

        let outcome = commands::edit::apply(self.book, current, &patch);
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(target) = self.select("Search contact: ")? else {
            return Ok(Flow::Continue);
        };
        write!(self.output, "{}", contacts_table(std::slice::from_ref(&target)))?;

        if self.options.confirm_delete {
            let question = format!(
                "\nAre you sure to remove '{}'? [y/N]: ",
                target.full_name()
            );
            let Some(choice) = self.prompt(&question)? else {
                return Ok(Flow::Done);
            };
            match choice.trim().to_lowercase().as_str() {
                "y" => {}
                "" | "n" => return Ok(Flow::Continue),
                _ => {
                    self.say("Invalid choice.")?;
                    return Ok(Flow::Continue);
                }
            }
        }

        let outcome = commands::delete::remove(self.book, &target);
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> Result<Flow> {
        let Some(path) = self.prompt_path("Path to save JSON")? else {
            return Ok(Flow::Done);
        };
        match self.book.save(&path) {
            Ok(()) => self.say(&format!("Saved to '{}'.", path.display()))?,
            Err(e) => self.say(&format!("Error: {}", e))?,
        }
        Ok(Flow::Continue)
    }

    fn exit(&mut self) -> Result<Flow> {
        if self.book.is_dirty() {
            let Some(answer) =
                self.prompt("You have unsaved changes. Save before exit? [y/N] ")?
            else {
                return Ok(Flow::Done);
            };

            match answer.trim().to_lowercase().as_str() {
                "y" => {
                    let Some(path) = self.prompt_path("Path to save JSON")? else {
                        return Ok(Flow::Done);
                    };
                    if let Err(e) = self.book.save(&path) {
                        self.say(&format!("Error: {}", e))?;
                        return Ok(Flow::Continue);
                    }
                    self.say("\nChanges saved correctly.")?;
                }
                "" | "n" => {}
                _ => {
                    self.say("Invalid choice.")?;
                    return Ok(Flow::Continue);
                }
            }
        }

        self.say("\nExiting from the contact book.")?;
        Ok(Flow::Done)
    }

    /// Narrows a search down to one contact, asking the user to refine or
    /// retry as needed. `None` means the user gave up.
    fn select(&mut self, label: &str) -> Result<Option<Contact>> {
        let Some(mut query) = self.prompt(label)? else {
            return Ok(None);
        };

        loop {
            let found: Result<Vec<Contact>> = self
                .book
                .search(&query)
                .map(|contacts| contacts.into_iter().cloned().collect());

            match found {
                Ok(mut contacts) if contacts.len() == 1 => return Ok(contacts.pop()),
                Ok(contacts) => {
                    self.say("\nMultiple contacts found:")?;
                    write!(self.output, "{}", contacts_table(&contacts))?;
                    self.say("\nThe query is too generic, refine it:")?;
                    match self.prompt("New search: ")? {
                        Some(next) if !next.trim().is_empty() => query = next,
                        _ => return Ok(None),
                    }
                }
                Err(e) if e.is_not_found() => {
                    self.say("No contacts found.")?;
                    let Some(choice) = self.prompt("Try again? (y/N): ")? else {
                        return Ok(None);
                    };
                    if choice.trim().to_lowercase() != "y" {
                        return Ok(None);
                    }
                    match self.prompt("\nSearch contact: ")? {
                        Some(next) => query = next,
                        None => return Ok(None),
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Prompts until `validate` accepts the input, printing each rejection.
    fn ask<T>(
        &mut self,
        label: &str,
        validate: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            match validate(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    fn prompt_path(&mut self, label: &str) -> Result<Option<PathBuf>> {
        let default = self.options.default_path.clone();
        let question = format!("{} [{}]: ", label, default.display());
        Ok(self.prompt(&question)?.map(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                default
            } else {
                PathBuf::from(raw)
            }
        }))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(
            line.trim_end_matches(|c| c == '\n' || c == '\r').to_string(),
        ))
    }

    /// Prints the messages of a command, or the error it failed with.
    fn report(&mut self, outcome: Result<CmdResult>) -> Result<()> {
        match outcome {
            Ok(result) => {
                for message in &result.messages {
                    writeln!(self.output, "{}", message.content)?;
                }
            }
            Err(ContactError::Io(e)) => return Err(ContactError::Io(e)),
            Err(e) => self.say(&format!("Error: {}", e))?,
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        write!(self.output, "{}", CLEAR_SCREEN)?;
        Ok(())
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}
