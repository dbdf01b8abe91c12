//! Composition shell: mounts the products and cart remotes around one shared context
pub mod app;
pub mod commands;
pub mod context;
pub mod layout;
pub mod remote;
pub mod router;
pub mod views;

pub use app::{standard_remotes, Shell, ShellOutput};
pub use commands::{CommandError, ShellCommand, HELP};
pub use context::AppContext;
pub use layout::{CartBadge, Layout};
pub use remote::{LazyRemote, RemoteRegistry, RemoteState, RemoteView, LOADING_PLACEHOLDER};
pub use router::{Route, Router};
pub use views::{CartRemote, ProductsRemote};
