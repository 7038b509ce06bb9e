use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "nota")]
#[command(about = "Folder-organized notes with inline cropped images")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the local store file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session flag
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,
        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Log out and clear the session flag
    Logout,
    /// Show login status and store contents
    Status,
    /// Initialize the store, optionally seeding the starter data
    Init {
        /// Seed the starter folders and notes
        #[arg(long)]
        sample_data: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long)]
        title: String,
        /// Note content
        #[arg(short, long)]
        content: String,
        /// Target folder (ID, unique ID prefix, or name)
        #[arg(short, long)]
        folder: Option<String>,
    },
    /// List notes, newest first
    List {
        /// Restrict to one folder (ID, unique ID prefix, or name)
        #[arg(long)]
        folder: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search notes by title or content
    Search {
        /// Search text
        query: String,
        /// Restrict to one folder (ID, unique ID prefix, or name)
        #[arg(long)]
        folder: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single note
    View {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Edit an existing note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
        /// Move into a folder (ID, unique ID prefix, or name)
        #[arg(long, conflicts_with = "unfile")]
        folder: Option<String>,
        /// Clear the folder assignment
        #[arg(long)]
        unfile: bool,
    },
    /// Delete an existing note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Attach an image to a note, cropped to the 16:10 card format
    Attach {
        /// Note ID or unique ID prefix
        id: String,
        /// Path to the source image file
        image: PathBuf,
        /// Crop selection in display coordinates (height derives from the
        /// fixed aspect ratio); centered default when omitted
        #[arg(long, value_name = "X,Y,WIDTH")]
        region: Option<String>,
    },
    /// Remove a note's image
    Detach {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum FolderCommands {
    /// Create a folder
    Add {
        /// Folder name
        name: String,
    },
    /// List folders with note counts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a folder; its notes become unfiled
    Delete {
        /// Folder ID, unique ID prefix, or name
        id: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
