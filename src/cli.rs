use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "postline - draft, schedule and publish short posts",
    long_about = "postline keeps post drafts, publish dates and emoji history in local JSON files \
                  and edits them in the terminal."
)]
pub struct Postline {
    #[clap(
        long,
        global = true,
        help = "Directory holding saved posts and emoji lists (default: ~/.postline)"
    )]
    pub data_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub commands: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive editor (default)
    Edit,
    /// Add a new post
    Add {
        #[clap(long, short = 't', help = "Post title")]
        title: String,

        #[clap(long, short = 'c', help = "Post content")]
        content: String,

        #[clap(long, short = 'd', help = "Publish date (YYYY-MM-DD)")]
        date: Option<String>,

        #[clap(long, short = 'p', help = "Mark the post as published")]
        publish: bool,
    },
    /// Update an existing post by id
    Update {
        #[clap(long, help = "Id of the post to update")]
        id: u64,

        #[clap(long, short = 't', help = "New title")]
        title: Option<String>,

        #[clap(long, short = 'c', help = "New content")]
        content: Option<String>,

        #[clap(long, short = 'd', help = "New publish date (YYYY-MM-DD)")]
        date: Option<String>,

        #[clap(long, short = 'p', conflicts_with = "unpublish", help = "Mark as published")]
        publish: bool,

        #[clap(long, help = "Mark as draft")]
        unpublish: bool,
    },
    /// Delete a post by id
    Delete {
        #[clap(long, help = "Id of the post to delete")]
        id: u64,
    },
    /// List all posts, newest publish date first
    List,
    /// Show published posts only
    Timeline,
    /// Inspect or change the emoji lists
    Emoji {
        #[clap(subcommand)]
        action: EmojiAction,
    },
}

#[derive(Subcommand)]
pub enum EmojiAction {
    /// Print recently used emojis, most recent first
    Recent,
    /// Print favorite emojis
    Favorites,
    /// Add or remove a favorite emoji
    Favorite {
        #[clap(help = "The emoji to toggle")]
        glyph: String,
    },
}
