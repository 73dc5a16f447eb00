pub mod app;
pub mod event;
pub mod host;
pub mod render;
pub mod terminal;

pub use app::App;
pub use event::{EventLoop, LoadResult};
pub use render::render;
pub use terminal::{TerminalGuard, install_panic_hook};
