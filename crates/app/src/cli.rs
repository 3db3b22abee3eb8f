//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use khabari_domain::{AuthType, ExportView, HttpMethod, Section};

/// Khabari: compose, send and inspect HTTP requests from the terminal.
///
/// State (tabs, responses, history, collections) is kept between runs.
/// Edits apply to the active tab.
#[derive(Parser, Debug)]
#[command(name = "khabari", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding khabari-storage.json (overrides configuration)
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List open tabs; the active one is marked with `*`
    Tabs,
    /// Open a new tab and switch to it
    NewTab,
    /// Close a tab
    Close {
        /// Tab position (1-based) or id
        tab: String,
    },
    /// Switch to a tab
    Switch {
        /// Tab position (1-based) or id
        tab: String,
    },
    /// Rename the active tab, or the one given with --tab
    Rename {
        /// New name
        name: String,
        /// Tab position (1-based) or id
        #[arg(long)]
        tab: Option<String>,
    },
    /// Select the editor section
    Section {
        /// params, headers, body or auth
        section: Section,
    },
    /// Set the URL; its query string replaces the params
    Url {
        /// Full URL, query included
        url: String,
    },
    /// Set the HTTP method
    Method {
        /// GET, POST, PUT, DELETE, PATCH, HEAD or OPTIONS
        method: HttpMethod,
    },
    /// Edit query params
    #[command(subcommand)]
    Param(ParamCommand),
    /// Edit headers
    #[command(subcommand)]
    Header(HeaderCommand),
    /// Replace the request body
    Body {
        /// Body text
        text: String,
    },
    /// Pretty-print a JSON body in place
    Format,
    /// Edit authorization
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Send the active tab's request and show the response
    Send {
        /// View to print
        #[arg(long, value_enum, default_value_t = ShowView::Data)]
        view: ShowView,
    },
    /// Show the active tab's last response
    Show {
        /// View to print
        #[arg(long, value_enum, default_value_t = ShowView::Data)]
        view: ShowView,
    },
    /// Save a view of the active tab's last response as JSON
    Export {
        /// data, raw or headers
        #[arg(long, default_value = "data")]
        view: ExportView,
        /// Output directory (overrides configuration)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// List executed requests, newest first
    History {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
        /// Delete all history
        #[arg(long)]
        clear: bool,
    },
    /// Organize collections and folders
    #[command(subcommand)]
    Collection(CollectionCommand),
}

/// `param` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ParamCommand {
    /// Write a param row (index = row count appends)
    Set {
        /// Row index, 0-based
        index: usize,
        /// Param name
        key: String,
        /// Param value
        #[arg(default_value = "")]
        value: String,
        /// Keep the row but leave it out of the URL
        #[arg(long)]
        disabled: bool,
    },
    /// Turn a row on or off
    Toggle {
        /// Row index, 0-based
        index: usize,
    },
    /// Delete a row
    Rm {
        /// Row index, 0-based
        index: usize,
    },
}

/// `header` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HeaderCommand {
    /// Set a header
    Set {
        /// Header name
        name: String,
        /// Header value
        value: String,
    },
    /// Remove a header
    Rm {
        /// Header name
        name: String,
    },
}

/// `auth` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    /// Change the auth type; clears its fields
    Type {
        /// none, basic, bearer or apiKey
        kind: AuthType,
    },
    /// Set an auth field (username, password, token, key, value)
    Set {
        /// Field name
        key: String,
        /// Field value
        value: String,
    },
}

/// `collection` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CollectionCommand {
    /// Add a collection, or a folder inside --parent
    Add {
        /// Display name
        name: String,
        /// Parent collection or folder id
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename a collection or folder
    Rename {
        /// Node id
        id: String,
        /// New name
        name: String,
    },
    /// Delete a collection or folder and everything in it
    Rm {
        /// Node id
        id: String,
    },
    /// Show the parts of the tree whose names match
    Search {
        /// Case-insensitive substring
        query: String,
    },
    /// Show the whole tree
    Tree,
}

/// Response views for the terminal.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowView {
    /// Parsed body as pretty JSON
    #[default]
    Data,
    /// The whole response record
    Raw,
    /// Response headers
    Headers,
    /// Body as a table, when it is an array or object
    Table,
}
