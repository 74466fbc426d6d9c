use super::render::{print_config, print_contacts, print_messages};
use super::setup::{Cli, Commands};
use super::shell::{Shell, ShellOptions};
use clap::Parser;
use contactbook::commands::{self, config::ConfigAction, ContactInput, ContactPatch};
use contactbook::error::Result;
use contactbook::init::{initialize, BookContext};
use tracing_subscriber::EnvFilter;

/// Filter directive for log output, e.g. `CONTACTBOOK_LOG=contactbook=trace`.
const LOG_ENV: &str = "CONTACTBOOK_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = initialize(cli.file.as_deref())?;

    match cli.command {
        Some(Commands::Add {
            first,
            last,
            phone,
            email,
        }) => handle_add(&mut ctx, ContactInput::new(first, last, phone, email)),
        Some(Commands::List) => handle_list(&mut ctx),
        Some(Commands::Search { query }) => handle_search(&mut ctx, query.join(" ")),
        Some(Commands::Edit {
            query,
            first,
            last,
            phone,
            email,
            clear_email,
        }) => {
            let patch = ContactPatch {
                first_name: first,
                last_name: last,
                phone,
                email,
                clear_email,
            };
            handle_edit(&mut ctx, query.join(" "), patch)
        }
        Some(Commands::Delete { query }) => handle_delete(&mut ctx, query.join(" ")),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Shell) | None => handle_shell(&mut ctx),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "contactbook=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_add(ctx: &mut BookContext, input: ContactInput) -> Result<()> {
    ctx.open_existing()?;
    let result = commands::add::run(&mut ctx.book, &input)?;
    ctx.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut BookContext) -> Result<()> {
    ctx.open_existing()?;
    let result = commands::list::run(&ctx.book)?;
    print_contacts(&result.listed_contacts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut BookContext, query: String) -> Result<()> {
    ctx.open_existing()?;
    let result = commands::search::run(&ctx.book, &query)?;
    if !result.listed_contacts.is_empty() {
        print_contacts(&result.listed_contacts);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut BookContext, query: String, patch: ContactPatch) -> Result<()> {
    ctx.open_existing()?;
    let result = commands::edit::run(&mut ctx.book, &query, &patch)?;
    if ctx.book.is_dirty() {
        ctx.save()?;
    }
    print_contacts(&result.affected_contacts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut BookContext, query: String) -> Result<()> {
    ctx.open_existing()?;
    let result = commands::delete::run(&mut ctx.book, &query)?;
    ctx.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &BookContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = commands::config::run(&ctx.data_dir, action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_shell(ctx: &mut BookContext) -> Result<()> {
    let options = ShellOptions {
        default_path: ctx.book_path.clone(),
        confirm_delete: ctx.config.confirm_delete,
    };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(&mut ctx.book, stdin.lock(), stdout.lock(), options).run()
}
