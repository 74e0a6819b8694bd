use clap::{CommandFactory, Parser};
use class_notes::application::{
    init, list_lectures, ConfigService, ModifyService, UploadService,
};
use class_notes::cli::{
    format_lecture_list, format_links, format_modify_report, gather_schedule, Cli, Commands,
    ModifyAction,
};
use class_notes::domain::{parse_date, LedgerEdit};
use class_notes::error::NotesError;
use class_notes::infrastructure::{
    DirectoryUploader, FileSystemRepository, NotesRepository, UploadSettings,
};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr, filtered by NOTES_LOG (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_env("NOTES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), NotesError> {
    match cli.command {
        Some(Commands::Init {
            path,
            days,
            first,
            last,
            title,
        }) => {
            // Refuse before prompting for anything
            if FileSystemRepository::new(path.clone()).is_initialized() {
                return Err(NotesError::AlreadyInitialized(path));
            }

            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            let schedule = gather_schedule(days, first, last, &mut input, &mut output)?;

            let report = init(&path, schedule, title)?;
            println!("Initialized notes at {}", report.root.display());
            println!("Meeting days: {}", schedule.days);
            println!("Lectures: {}", report.lectures);
            if report.adopted > 0 {
                println!("Kept {} existing note file(s)", report.adopted);
            }
            Ok(())
        }
        Some(Commands::Modify { action, dry_run }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ModifyService::new(repo);

            let report = match action {
                ModifyAction::Insert { date } => {
                    service.execute(LedgerEdit::Insert(parse_date(&date)?), dry_run)?
                }
                ModifyAction::Remove { number } => {
                    service.execute(LedgerEdit::Remove(number), dry_run)?
                }
                ModifyAction::Redate { number, date } => {
                    service.execute(LedgerEdit::Redate(number, parse_date(&date)?), dry_run)?
                }
                ModifyAction::Regenerate => service.regenerate(dry_run)?,
            };

            print!("{}", format_modify_report(&report));
            Ok(())
        }
        Some(Commands::List) => {
            let repo = FileSystemRepository::discover()?;
            let listing = list_lectures(&repo)?;
            print!("{}", format_lecture_list(&listing));
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("title = {}", config.title);
                println!("author = {}", config.author.unwrap_or_default());
                println!("document_class = {}", config.document_class);
                println!("date_format = {}", config.date_format);
                if let Some(upload) = config.upload {
                    println!("upload.directory = {}", upload.directory.display());
                    println!(
                        "upload.link_prefix = {}",
                        upload.link_prefix.unwrap_or_default()
                    );
                }
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: notes config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: title, author, document_class, date_format, \
                    upload.directory, upload.link_prefix"
                );
                Ok(())
            }
        }
        Some(Commands::Upload { to, link_prefix }) => {
            let repo = FileSystemRepository::discover()?;
            let configured = repo.load_config()?.upload;

            let settings = match (to, configured) {
                (Some(directory), configured) => UploadSettings {
                    directory,
                    link_prefix: link_prefix.or(configured.and_then(|c| c.link_prefix)),
                },
                (None, Some(mut configured)) => {
                    if link_prefix.is_some() {
                        configured.link_prefix = link_prefix;
                    }
                    configured
                }
                (None, None) => {
                    return Err(NotesError::Config(
                        "No upload target. Pass --to <DIR> or run \
                        'notes config upload.directory <DIR>'"
                            .to_string(),
                    ))
                }
            };

            let service = UploadService::new(repo, DirectoryUploader::new(&settings));
            let links = service.execute()?;
            print!("{}", format_links(&links));
            Ok(())
        }
        Some(Commands::Version) => {
            println!("class-notes v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Help) | None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
