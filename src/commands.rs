use crate::cli::{Commands, EmojiAction};
use crate::config::{ensure_data_dir, get_log_file_path};
use crate::error::{PostlineError, Result};
use crate::models::{parse_publish_date, Field, Post, PostId};
use crate::session::Session;
use crate::store::{DurableStore, FileStore};
use crate::ui::display_post_editor;
use std::fs::OpenOptions;
use std::path::Path;

pub fn handle_command(data_dir: &Path, command: Option<Commands>) -> Result<()> {
    let interactive = matches!(command, None | Some(Commands::Edit));
    init_logging(data_dir, interactive);

    let mut session = Session::open(FileStore::new(data_dir));
    match command {
        None | Some(Commands::Edit) => display_post_editor(&mut session),
        Some(command) => handle_subcommand(&mut session, command),
    }
}

/// Log to a file under the data directory while the terminal UI owns the screen.
fn init_logging(data_dir: &Path, interactive: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if interactive {
        let file = ensure_data_dir(data_dir).ok().and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(get_log_file_path(data_dir))
                .ok()
        });
        match file {
            Some(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            // Nowhere to write without garbling the screen
            None => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

/// Reject a `--date` that is neither empty, `YYYY-MM-DD`, nor RFC 3339.
fn validate_date(date: &str) -> Result<()> {
    if date.is_empty() || parse_publish_date(date).is_some() {
        Ok(())
    } else {
        Err(PostlineError::InvalidArgument(format!(
            "invalid publish date '{}', expected YYYY-MM-DD",
            date
        )))
    }
}

fn handle_subcommand<S: DurableStore>(session: &mut Session<S>, command: Commands) -> Result<()> {
    match command {
        Commands::Edit => display_post_editor(session),
        Commands::Add {
            title,
            content,
            date,
            publish,
        } => {
            let date = date.unwrap_or_default();
            validate_date(&date)?;
            session.edit(Field::Title, title, None);
            session.edit(Field::Content, content, None);
            session.edit(Field::PublishDate, date, None);
            if publish {
                session.toggle_publish();
            }
            let id = session.save_post()?;
            println!("Post {} added successfully", id);
            Ok(())
        }
        Commands::Update {
            id,
            title,
            content,
            date,
            publish,
            unpublish,
        } => {
            let id = PostId(id);
            if let Some(date) = &date {
                validate_date(date)?;
            }
            session.load_post(id)?;
            if let Some(title) = title {
                session.edit(Field::Title, title, None);
            }
            if let Some(content) = content {
                session.edit(Field::Content, content, None);
            }
            if let Some(date) = date {
                session.edit(Field::PublishDate, date, None);
            }
            let published = session.draft().is_published;
            if (publish && !published) || (unpublish && published) {
                session.toggle_publish();
            }
            session.save_post()?;
            println!("Post {} updated successfully", id);
            Ok(())
        }
        Commands::Delete { id } => {
            session.delete_post(PostId(id))?;
            println!("Post {} deleted successfully", id);
            Ok(())
        }
        Commands::List => {
            print_posts(&session.list_items());
            Ok(())
        }
        Commands::Timeline => {
            print_posts(&session.timeline_items());
            Ok(())
        }
        Commands::Emoji { action } => handle_emoji(session, action),
    }
}

fn handle_emoji<S: DurableStore>(session: &mut Session<S>, action: EmojiAction) -> Result<()> {
    match action {
        EmojiAction::Recent => println!("{}", session.emojis().recent().join(" ")),
        EmojiAction::Favorites => println!("{}", session.emojis().favorites().join(" ")),
        EmojiAction::Favorite { glyph } => {
            if session.toggle_favorite(&glyph)? {
                println!("Added {} to favorites", glyph);
            } else {
                println!("Removed {} from favorites", glyph);
            }
        }
    }
    Ok(())
}

fn print_posts(posts: &[&Post]) {
    if posts.is_empty() {
        println!("No posts found. Add one with: postline add --title <title> --content <text>");
        return;
    }
    for post in posts {
        println!("{}", format_post_line(post));
    }
}

/// One-line summary: id, publish marker, title and date.
pub fn format_post_line(post: &Post) -> String {
    let marker = if post.is_published { "📢 " } else { "" };
    let date = if post.publish_date.is_empty() {
        "-"
    } else {
        post.publish_date.as_str()
    };
    format!("{:>13}  {:<10}  {}{}", post.id.0, date, marker, post.title)
}
