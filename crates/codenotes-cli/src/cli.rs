use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "codenotes")]
#[command(about = "Personal notes, file notes and a checklist next to your code")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the notes store file
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a personal note
    #[command(alias = "new")]
    Add {
        /// Note text
        text: Vec<String>,
    },
    /// Attach a note to a line of a file
    Note {
        /// File the note belongs to
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
        /// 1-based line number
        #[arg(long, value_name = "N")]
        line: u32,
        /// Note text (prompted for when omitted)
        text: Vec<String>,
    },
    /// Add a checklist item
    Check {
        /// Item text
        text: Vec<String>,
    },
    /// Flip a checklist item between done and not done
    Toggle {
        /// Item ID or unique ID prefix
        id: String,
    },
    /// Edit a note or checklist item
    Edit {
        /// Note or item ID, or a unique ID prefix
        id: String,
        /// Replacement text (opens the editor when omitted)
        text: Vec<String>,
    },
    /// Delete a note or checklist item
    Delete {
        /// Note or item ID, or a unique ID prefix
        id: String,
    },
    /// Remove every checked checklist item
    ClearCompleted,
    /// Show personal notes, file notes and the checklist
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Jump to the line a file note is attached to
    Goto {
        /// Note ID or unique ID prefix
        id: String,
        /// Open the file in the configured editor
        #[arg(long)]
        open: bool,
    },
    /// Write the panel as an HTML document
    Render {
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
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

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Update configuration values
    Set {
        /// Default notes store file
        #[arg(long, value_name = "PATH")]
        store_path: Option<PathBuf>,
        /// Editor command used by `edit` and `goto --open`
        #[arg(long, value_name = "CMD")]
        editor: Option<String>,
    },
}
