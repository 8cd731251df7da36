//! Screen registry and overlay stack.
//!
//! Pure bookkeeping: every change returns the notifications to deliver, in
//! order, and the caller floods them through the element tree.

use std::collections::HashMap;

use smallvec::{SmallVec, smallvec};
use trellis_core::{Result, UiError};

use crate::element::NodeId;
use crate::event::ScreenChange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootKind {
    Screen,
    Overlay,
}

/// Roots to notify, in delivery order.
pub type Notices = SmallVec<[(NodeId, ScreenChange); 2]>;

#[derive(Default)]
pub struct ScreenStack {
    roots: HashMap<String, (RootKind, NodeId)>,
    current: Option<NodeId>,
    overlays: Vec<NodeId>,
}

impl ScreenStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, kind: RootKind, root: NodeId) {
        let name = name.into();
        if self.roots.insert(name.clone(), (kind, root)).is_some() {
            log::warn!("'{name}' was already registered; replacing it");
        }
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.roots.get(name).map(|&(_, id)| id)
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.values().map(|&(_, id)| id)
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn overlays(&self) -> &[NodeId] {
        &self.overlays
    }

    pub fn top_overlay(&self) -> Option<NodeId> {
        self.overlays.last().copied()
    }

    /// The root receiving input and paint: top overlay, else the screen.
    pub fn active(&self) -> Option<NodeId> {
        self.top_overlay().or(self.current)
    }

    /// Resolves a registered root of the given kind. A root registered under
    /// the other kind counts as missing.
    pub fn find(&self, name: &str, kind: RootKind) -> Result<NodeId> {
        match self.roots.get(name) {
            Some(&(k, id)) if k == kind => Ok(id),
            _ => Err(match kind {
                RootKind::Screen => UiError::UnknownScreen(name.to_string()),
                RootKind::Overlay => UiError::UnknownOverlay(name.to_string()),
            }),
        }
    }

    pub fn set_screen(&mut self, name: &str) -> Option<Notices> {
        let to = match self.find(name, RootKind::Screen) {
            Ok(id) => id,
            Err(err) => {
                log::warn!("Failed to change screen: {err}");
                return None;
            }
        };
        let from = self.current.replace(to);
        log::debug!("screen -> {name}");

        let mut notices = Notices::new();
        if let Some(old) = from {
            notices.push((old, ScreenChange { leaving: true, from, to }));
        }
        notices.push((to, ScreenChange { leaving: false, from, to }));
        Some(notices)
    }

    pub fn open_overlay(&mut self, name: &str) -> Option<(NodeId, Notices)> {
        let to = match self.find(name, RootKind::Overlay) {
            Ok(id) => id,
            Err(err) => {
                log::warn!("Failed to open overlay: {err}");
                return None;
            }
        };
        let from = self.active();
        self.overlays.push(to);
        log::debug!("overlay opened: {name} (depth {})", self.overlays.len());

        let mut notices = Notices::new();
        if let Some(old) = from {
            notices.push((old, ScreenChange { leaving: true, from, to }));
        }
        notices.push((to, ScreenChange { leaving: false, from, to }));
        Some((to, notices))
    }

    /// Pops the top overlay. Nothing to notify when no overlay is open.
    pub fn close_overlay(&mut self) -> Option<Notices> {
        let closed = self.overlays.pop()?;
        log::debug!("overlay closed (depth {})", self.overlays.len());
        let Some(to) = self.active() else {
            return Some(smallvec![(
                closed,
                ScreenChange { leaving: true, from: Some(closed), to: closed }
            )]);
        };
        let from = Some(closed);
        Some(smallvec![
            (closed, ScreenChange { leaving: true, from, to }),
            (to, ScreenChange { leaving: false, from, to }),
        ])
    }
}
