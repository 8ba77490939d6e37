//! Postline - a terminal editor for drafting, scheduling and publishing short posts.
//!
//! Posts and emoji history are kept in a local key-value store of JSON files.
//! Emoji are inserted into the post body at the last known caret position.

pub mod cli;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod emoji;
pub mod error;
pub mod input;
pub mod models;
pub mod picker;
pub mod repository;
pub mod session;
pub mod store;
pub mod ui;
pub mod view;

// Re-export
pub use cli::{Commands, EmojiAction, Postline};
pub use commands::handle_command;
pub use config::{get_data_dir, resolve_data_dir};
pub use cursor::TextInserter;
pub use editor::PostEditor;
pub use emoji::{EmojiHistory, MAX_RECENT_EMOJIS};
pub use error::{PostlineError, Result};
pub use models::{Draft, DraftId, Field, Post, PostId};
pub use picker::{EmojiPicker, PickerEvent};
pub use repository::PostRepository;
pub use session::Session;
pub use store::{load_json, save_json, DurableStore, FileStore, MemoryStore};
pub use ui::display_post_editor;
pub use view::{list_items, timeline_items, ExpansionSet};
