// Browser module - paginated text viewport over rendered documents
#![allow(unused_imports)]

pub mod error;
pub mod html;
pub mod renderer;
pub mod viewport;

pub use error::{BrowserError, Result};
pub use renderer::{ContentRenderer, LocalRenderer, RenderedDocument};
pub use viewport::Viewport;
