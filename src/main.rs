//! # ramendir
//!
//! Command-line client for the ramen directory.
//!
//! ## Usage
//!
//! ```bash
//! ramendir login alice
//! ramendir ranking --prefecture 13 --genre tonkotsu --min-score 4
//! ramendir restaurant 42
//! ramendir comment add 42 --food-score 4 --environment-score 5 --visiting-score 3
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ramendir::commands;
use ramendir::commands::comment::{CommentArgs, CommentForm};
use ramendir::commands::config::ThemeArgs;
use ramendir::config::ThemeMode;
use ramendir::query::browse::DEFAULT_TOP_LIMIT;

/// Initialize logger based on verbose flag
fn init_logger(verbose: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();
    if verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Theme {
    Light,
    Dark,
}

impl From<Theme> for ThemeMode {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemeMode::Light,
            Theme::Dark => ThemeMode::Dark,
        }
    }
}

/// Main CLI structure
#[derive(Parser)]
#[command(name = "ramendir")]
#[command(about = "Browse, rank and review ramen restaurants", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the token
    Login {
        username: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// CAPTCHA answer, when the server asks for one
        #[arg(long)]
        recaptcha: Option<String>,
    },
    /// Create an account and sign in
    Register {
        username: String,
        #[arg(long)]
        password: Option<String>,
        /// CAPTCHA answer; without it the site key is printed
        #[arg(long)]
        recaptcha: Option<String>,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show server, session and theme status
    Status,
    /// Rank restaurants by filters
    Ranking {
        #[arg(long, value_name = "ID")]
        prefecture: Option<u64>,
        /// Area of the chosen prefecture
        #[arg(long, value_name = "ID")]
        area: Option<u64>,
        /// Genre filter (repeatable), e.g. tonkotsu
        #[arg(long = "genre", value_name = "GENRE")]
        genres: Vec<String>,
        /// Soup base filter (repeatable), e.g. pork
        #[arg(long = "soup-base", value_name = "SOUP")]
        soup_bases: Vec<String>,
        /// Minimum score, 0 to 5
        #[arg(long, default_value = "0")]
        min_score: f64,
        /// score or name
        #[arg(long, default_value = "score")]
        sort: String,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        direction: String,
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,
        /// Restaurants per page
        #[arg(long)]
        size: Option<u32>,
    },
    /// Search restaurants by name
    Search {
        term: String,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Show one restaurant
    Restaurant { id: u64 },
    /// Show the best-rated restaurants
    Top {
        #[arg(long, short = 'n', default_value_t = DEFAULT_TOP_LIMIT)]
        limit: u32,
    },
    /// Show the front-page restaurant cards
    Frontpage,
    /// List a restaurant's comments, newest first
    Comments {
        restaurant_id: u64,
        #[arg(long, default_value = "1")]
        page: u32,
        /// Every comment at once instead of one page
        #[arg(long)]
        all: bool,
    },
    /// Write, edit, delete or report a comment
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Browse a restaurant's photo gallery
    Photos {
        restaurant_id: u64,
        /// List every photo instead of the preview
        #[arg(long)]
        all: bool,
        /// Open the viewer on this photo (starting at 1)
        #[arg(long, value_name = "N")]
        view: Option<usize>,
        /// Steps to move the viewer; negative goes back
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        step: i64,
    },
    /// List genres, soup bases, prefectures and areas
    Options {
        /// Only list the areas of this prefecture
        #[arg(long, value_name = "ID")]
        prefecture: Option<u64>,
    },
    /// Show or change the theme preference
    Theme {
        #[arg(long, conflicts_with = "set")]
        toggle: bool,
        #[arg(long, value_enum)]
        set: Option<Theme>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args)]
struct FormFlags {
    #[arg(long)]
    food: Option<String>,
    #[arg(long)]
    environment: Option<String>,
    #[arg(long)]
    visiting: Option<String>,
    #[arg(long, value_name = "1-5")]
    food_score: Option<u8>,
    #[arg(long, value_name = "1-5")]
    environment_score: Option<u8>,
    #[arg(long, value_name = "1-5")]
    visiting_score: Option<u8>,
    /// JPEG or PNG to attach (repeatable, at most 7 per comment)
    #[arg(long = "photo", value_name = "FILE")]
    photos: Vec<PathBuf>,
}

impl From<FormFlags> for CommentForm {
    fn from(flags: FormFlags) -> Self {
        CommentForm {
            food: flags.food,
            environment: flags.environment,
            visiting: flags.visiting,
            food_score: flags.food_score,
            environment_score: flags.environment_score,
            visiting_score: flags.visiting_score,
            photos: flags.photos,
        }
    }
}

#[derive(Subcommand)]
enum CommentCommands {
    /// Comment on a restaurant
    Add {
        restaurant_id: u64,
        #[command(flatten)]
        form: FormFlags,
    },
    /// Edit one of your comments
    Edit {
        comment_id: u64,
        #[command(flatten)]
        form: FormFlags,
        /// Existing photo to drop, by position starting at 1 (repeatable)
        #[arg(long = "remove-photo", value_name = "N")]
        remove_photos: Vec<usize>,
    },
    /// Delete one of your comments
    Delete {
        comment_id: u64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Report a comment to the moderators
    Report {
        comment_id: u64,
        /// Why the comment should be reviewed (5 to 1000 characters)
        reason: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Store the server base URL
    SetUrl { url: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let exit_code = run_command(cli.command).await;
    std::process::exit(exit_code);
}

async fn run_command(command: Commands) -> i32 {
    use ramendir::exit_codes::*;

    let result = match command {
        Commands::Login {
            username,
            password,
            recaptcha,
        } => {
            commands::login::execute_login(commands::login::LoginArgs {
                username,
                password,
                recaptcha,
            })
            .await
        }
        Commands::Register {
            username,
            password,
            recaptcha,
        } => {
            commands::login::execute_register(commands::login::LoginArgs {
                username,
                password,
                recaptcha,
            })
            .await
        }
        Commands::Logout => commands::login::execute_logout(),
        Commands::Status => commands::status::execute().await,
        Commands::Ranking {
            prefecture,
            area,
            genres,
            soup_bases,
            min_score,
            sort,
            direction,
            page,
            size,
        } => {
            let args = commands::ranking::RankingArgs {
                prefecture,
                area,
                genres,
                soup_bases,
                min_score,
                sort,
                direction,
                page,
                size,
            };
            commands::ranking::execute(args).await
        }
        Commands::Search { term, page } => {
            commands::search::execute(commands::search::SearchArgs { term, page }).await
        }
        Commands::Restaurant { id } => commands::restaurant::execute_detail(id).await,
        Commands::Top { limit } => commands::restaurant::execute_top(limit).await,
        Commands::Frontpage => commands::restaurant::execute_frontpage().await,
        Commands::Comments {
            restaurant_id,
            page,
            all,
        } => {
            let args = commands::comments::CommentsArgs {
                restaurant_id,
                page,
                all,
            };
            commands::comments::execute_comments(args).await
        }
        Commands::Comment { command } => {
            let args = match command {
                CommentCommands::Add {
                    restaurant_id,
                    form,
                } => CommentArgs::Add {
                    restaurant_id,
                    form: form.into(),
                },
                CommentCommands::Edit {
                    comment_id,
                    form,
                    remove_photos,
                } => CommentArgs::Edit {
                    comment_id,
                    form: form.into(),
                    remove_photos,
                },
                CommentCommands::Delete { comment_id, yes } => {
                    CommentArgs::Delete { comment_id, yes }
                }
                CommentCommands::Report { comment_id, reason } => {
                    CommentArgs::Report { comment_id, reason }
                }
            };
            commands::comment::execute(args).await
        }
        Commands::Photos {
            restaurant_id,
            all,
            view,
            step,
        } => {
            let args = commands::comments::PhotosArgs {
                restaurant_id,
                all,
                view,
                step,
            };
            commands::comments::execute_photos(args).await
        }
        Commands::Options { prefecture } => {
            commands::options::execute(commands::options::OptionsArgs { prefecture }).await
        }
        Commands::Theme { toggle, set } => {
            let args = match (toggle, set) {
                (true, _) => ThemeArgs::Toggle,
                (false, Some(theme)) => ThemeArgs::Set(theme.into()),
                (false, None) => ThemeArgs::Show,
            };
            commands::config::execute_theme(args)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::execute_show(),
            ConfigCommands::SetUrl { url } => commands::config::execute_set_url(url),
        },
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    }
}
