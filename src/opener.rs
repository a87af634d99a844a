//! External URL launching.

use std::io;

use crate::flog_debug;

/// Opens a URL outside the session (the desktop browser).
pub trait Opener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Hands URLs to the platform launcher without waiting for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        flog_debug!("SystemOpener::open url={}", url);
        open::that_detached(url)
    }
}
