use clap::Parser;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};
use remind_core::error::CoreError;
use remind_core::store::ReminderStore;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::new().unwrap_or_default();
    let store = ReminderStore::new(config.data_file.clone());

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_series(&store, command, &config),
        cli::Commands::List(command) => commands::list::list_instances(&store, command, &config),
        cli::Commands::Show(command) => commands::show::show_series(&store, command),
        cli::Commands::Done(command) => commands::done::done(&store, command, &config),
        cli::Commands::Undone(command) => commands::done::undone(&store, command, &config),
        cli::Commands::Edit(command) => commands::edit::edit(&store, command, &config),
        cli::Commands::Delete(command) => {
            let resolved = util::load_and_resolve(&store, &command.id);
            match resolved {
                Ok((map, id)) => match &command.on {
                    Some(on) => commands::delete::delete_instance(&store, id, on),
                    None => {
                        let title = map[&id].title.clone();
                        let confirmed = command.force
                            || Confirm::new()
                                .with_prompt(format!(
                                    "Are you sure you want to delete '{}' and all of its history?",
                                    title
                                ))
                                .default(false)
                                .interact()
                                .unwrap_or(false);
                        if confirmed {
                            commands::delete::delete_series(&store, id)
                        } else {
                            println!("Deletion cancelled.");
                            Ok(())
                        }
                    }
                },
                Err(e) => Err(e),
            }
        }
        cli::Commands::Split(command) => commands::split::split(&store, command),
        cli::Commands::Next(command) => commands::next::next(&store, command, &config),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::NotRecurring(s) => {
                eprintln!(
                    "{} Series {} is not recurring.",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
            CoreError::AmbiguousId(candidates) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in candidates {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
