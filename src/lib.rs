//! Member directory and spotlight rendering for chamber-of-commerce sites.
//!
//! A member document (a bare array or `{ "members": [...] }`) is fetched from
//! a file or URL, normalized into complete [`Member`] values and rendered as a
//! typed element tree: one card per member for the directory, and a small
//! random pick of Silver and Gold members for the spotlight.

pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod format;
pub mod markup;
pub mod normalize;
pub mod page;
pub mod source;
pub mod spotlight;
pub mod types;

pub use config::{Config, ConfigBuilder, ConfigFile, Layout};
pub use context::{Container, RenderContext};
pub use directory::{DirectoryRenderer, DirectoryState};
pub use error::{Error, Result};
pub use markup::{Element, Node};
pub use source::DataSource;
pub use spotlight::{select_spotlight, SpotlightSchedule, SpotlightSelector, SpotlightState};
pub use types::{Member, Tier};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder, Layout};
    pub use crate::context::{Container, RenderContext};
    pub use crate::directory::{DirectoryRenderer, DirectoryState};
    pub use crate::error::{Error, Result};
    pub use crate::markup::{Element, Node};
    pub use crate::page::Page;
    pub use crate::source::DataSource;
    pub use crate::spotlight::{SpotlightSelector, SpotlightState};
    pub use crate::types::{Member, Tier};
}
