//! Input module - The command language
//!
//! Everything that turns typed text and key presses into changes of the
//! model:
//!
//! - `lexer`: Tokenizing command lines
//! - `command`: The incremental command protocol and its errors
//! - `dispatcher`: Command registry and line dispatch
//! - `commands`: Built-in commands
//! - `keys`: Key symbols and sequence notation
//! - `bindings`: Binding table and key sequence resolution
//! - `script`, `defaults`: Configuration scripts

pub mod bindings;
pub mod command;
pub mod commands;
mod defaults;
pub mod dispatcher;
pub mod keys;
pub mod lexer;
pub mod script;

pub use bindings::{BindingTable, KeyResolver, Resolution, DEFAULT_SEQUENCE_TIMEOUT};
pub use dispatcher::Dispatcher;
pub use keys::{format_sequence, Key};
pub use script::{load_config_file, load_defaults};
