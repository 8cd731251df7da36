//! Host clipboard capability.
//!
//! Writes are fire-and-forget. Reads are asynchronous: the host hands back a
//! [`ClipboardRead`] and completes it whenever the platform delivers the
//! text. A read whose sender is dropped without a value is a failed read.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;

pub type ClipboardRead = oneshot::Receiver<String>;

pub trait Clipboard {
    fn write_text(&mut self, text: &str);
    fn read_text(&mut self) -> ClipboardRead;
}

#[derive(Default)]
struct MemoryInner {
    contents: String,
    deferred: bool,
    pending: Vec<oneshot::Sender<String>>,
}

/// In-process clipboard.
///
/// Cloning shares the same buffer, so a host (or a test) can keep a handle
/// after boxing one into the UI services. In deferred mode reads stay
/// pending until [`MemoryClipboard::complete_reads`] or
/// [`MemoryClipboard::fail_reads`] is called.
#[derive(Clone, Default)]
pub struct MemoryClipboard(Rc<RefCell<MemoryInner>>);

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deferred() -> Self {
        let cb = Self::default();
        cb.0.borrow_mut().deferred = true;
        cb
    }

    pub fn contents(&self) -> String {
        self.0.borrow().contents.clone()
    }

    pub fn set_contents(&self, text: impl Into<String>) {
        self.0.borrow_mut().contents = text.into();
    }

    pub fn pending_reads(&self) -> usize {
        self.0.borrow().pending.len()
    }

    /// Delivers the current contents to every outstanding read.
    pub fn complete_reads(&self) {
        let mut inner = self.0.borrow_mut();
        let contents = inner.contents.clone();
        for tx in inner.pending.drain(..) {
            let _ = tx.send(contents.clone());
        }
    }

    /// Drops every outstanding read without a value.
    pub fn fail_reads(&self) {
        self.0.borrow_mut().pending.clear();
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) {
        self.0.borrow_mut().contents = text.to_string();
    }

    fn read_text(&mut self) -> ClipboardRead {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.0.borrow_mut();
        if inner.deferred {
            inner.pending.push(tx);
        } else {
            let _ = tx.send(inner.contents.clone());
        }
        rx
    }
}

/// OS clipboard through `arboard`. Reads complete immediately.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn try_new() -> crate::Result<Self> {
        let cb = arboard::Clipboard::new().map_err(|e| crate::UiError::Clipboard(e.to_string()))?;
        Ok(Self { inner: Some(cb) })
    }

    /// Like [`SystemClipboard::try_new`], but degrades to a clipboard that
    /// never yields text when the platform has none.
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|e| {
            log::warn!("{e}");
            Self { inner: None }
        })
    }
}

#[cfg(feature = "system-clipboard")]
impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) {
        if let Some(cb) = self.inner.as_mut()
            && let Err(e) = cb.set_text(text.to_string())
        {
            log::warn!("Clipboard write failed: {e}");
        }
    }

    fn read_text(&mut self) -> ClipboardRead {
        let (tx, rx) = oneshot::channel();
        match self.inner.as_mut().map(|cb| cb.get_text()) {
            Some(Ok(text)) => {
                let _ = tx.send(text);
            }
            Some(Err(e)) => log::warn!("Clipboard read failed: {e}"),
            None => {}
        }
        rx
    }
}
