use blogforge::application::{
    init, CommentThreadService, ConfigService, ListTagsService, SiteDataService,
};
use blogforge::cli::{format_comment_thread, format_tag_list, Cli, Commands};
use blogforge::error::BlogError;
use blogforge::infrastructure::FileSystemRepository;
use clap::Parser;
use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), BlogError> {
    match cli.command {
        Commands::Init { path, allowed_tags } => init::init(&path, allowed_tags),
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("posts_dir = {}", config.posts_dir.display());
                println!("comments_dir = {}", config.comments_dir.display());
                println!("allowed_tags = {}", config.allowed_tags.join(","));
                println!("reserved_tags = {}", config.reserved_tags.join(","));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: blogforge config [--list | <key> [<value>]]");
                println!("Valid keys: posts_dir, comments_dir, allowed_tags, reserved_tags");
                Ok(())
            }
        }
        Commands::Tags { audience } => {
            let repo = FileSystemRepository::discover()?;
            let tags = ListTagsService::new(repo).execute(audience)?;
            print!("{}", format_tag_list(&tags));
            if tags.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Comments { slug, json } => {
            let repo = FileSystemRepository::discover()?;
            let thread = CommentThreadService::new(repo).execute(&slug)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&thread)?);
            } else {
                print!("{}", format_comment_thread(&thread));
                if thread.is_empty() {
                    println!();
                }
            }
            Ok(())
        }
        Commands::Build { output } => {
            let repo = FileSystemRepository::discover()?;
            let service = SiteDataService::new(repo);
            let data = service.build()?;

            match output {
                Some(path) => {
                    let written = service.write(&data, &path)?;
                    println!("Wrote site data to {}", written.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&data)?),
            }
            Ok(())
        }
    }
}
