//! Element arena and the flood passes.
//!
//! Nodes live in a generational [`SlotMap`], so a [`NodeId`] kept past its
//! node's lifetime resolves to nothing instead of a different element.
//! Every pass starts at a root and walks children in insertion order,
//! which is both paint order and dispatch order. A hidden node cuts off
//! its whole subtree from every pass except screen-change notifications.

use std::any::Any;
use std::collections::HashMap;

use slotmap::SlotMap;
use trellis_core::{Renderer, Result, Style, TextMeasure, Theme, UiError, Vec2};

use crate::element::{
    Cx, ElementOptions, Env, EventHandler, Node, NodeId, ViewCx, Widget, resolve_style,
};
use crate::event::{CursorState, ScreenChange, UiEvent};

const DEFAULT_STYLE: &str = "default";

#[derive(Default)]
pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
    labels: HashMap<String, NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `widget` under `parent` (or as a root) and resolves its style
    /// against `theme`, inheriting the parent's style name.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        widget: Box<dyn Widget>,
        options: ElementOptions,
        theme: Option<&Theme>,
    ) -> Result<NodeId> {
        let inherited = match parent {
            Some(p) => self
                .nodes
                .get(p)
                .map(|n| n.resolved_name.clone())
                .ok_or(UiError::StaleNode)?,
            None => DEFAULT_STYLE.to_string(),
        };

        let id = self.nodes.insert(Node::new(widget, parent, options));
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            p.children.push(id);
        }

        if let Some(label) = self.nodes[id].label.clone() {
            if self.labels.insert(label.clone(), id).is_some() {
                log::warn!("Label '{label}' was already registered; it now refers to the new element");
            }
        }

        self.resolve_styles(id, &inherited, theme);
        Ok(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn by_label(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn position(&self, id: NodeId) -> Option<Vec2> {
        self.nodes.get(id).map(|n| n.position)
    }

    /// Local pointer position seen by `id` during the last update.
    pub fn mouse(&self, id: NodeId) -> Option<Vec2> {
        self.nodes.get(id).map(|n| n.mouse)
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_none_or(|n| n.hidden)
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hidden = hidden;
        }
    }

    pub fn kind(&self, id: NodeId) -> Option<&'static str> {
        self.nodes.get(id).map(|n| n.widget.kind())
    }

    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.nodes.get(id).map(|n| &n.style)
    }

    pub fn widget<W: Widget>(&self, id: NodeId) -> Option<&W> {
        let widget: &dyn Any = &*self.nodes.get(id)?.widget;
        widget.downcast_ref::<W>()
    }

    pub fn widget_mut<W: Widget>(&mut self, id: NodeId) -> Option<&mut W> {
        let widget: &mut dyn Any = &mut *self.nodes.get_mut(id)?.widget;
        widget.downcast_mut::<W>()
    }

    /// Registers a user handler for the event `name` on `id`, replacing any
    /// previous one. Returns false when the node no longer exists.
    pub fn on(&mut self, id: NodeId, name: impl Into<String>, handler: EventHandler) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.handlers.insert(name.into(), handler);
                true
            }
            None => false,
        }
    }

    /// Delivers `event` to every visible node under `id`: children first,
    /// then the widget, then the user handler registered for the event name.
    pub fn emit(&mut self, id: NodeId, event: &UiEvent, env: &mut Env) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.hidden {
            return;
        }
        let children = node.children.clone();
        for child in children {
            self.emit(child, event, env);
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let Node {
            widget,
            style,
            hidden,
            mouse,
            handlers,
            ..
        } = node;
        let handler = handlers.get(event.name()).cloned();
        let mut cx = Cx::new(id, *mouse, style, hidden, env);
        widget.event(event, &mut cx);
        if let Some(handler) = handler {
            handler(event, &mut cx);
        }
    }

    /// Per-frame tick. Each node stores the pointer in its own local space
    /// before its children run, so they translate from the parent's result.
    pub fn update(&mut self, id: NodeId, parent_mouse: Vec2, env: &mut Env) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.hidden {
            return;
        }
        node.mouse = if node.position.is_zero() {
            parent_mouse
        } else {
            parent_mouse - node.position
        };
        let mouse = node.mouse;
        let children = node.children.clone();
        for child in children {
            self.update(child, mouse, env);
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let Node {
            widget,
            style,
            hidden,
            hooks,
            ..
        } = node;
        let hook = hooks.update.clone();
        let mut cx = Cx::new(id, mouse, style, hidden, env);
        widget.update(&mut cx);
        if let Some(hook) = hook {
            hook(&mut cx);
        }
    }

    pub fn draw(&self, id: NodeId, r: &mut dyn Renderer, env: &Env) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.hidden {
            return;
        }

        r.push();
        if !node.position.is_zero() {
            r.translate(node.position.x, node.position.y);
        }

        let cx = ViewCx::new(id, node.mouse, &node.style, env);
        node.widget.show(r, &cx);
        if let Some(draw) = &node.hooks.draw {
            draw(r, &cx);
        }

        for &child in &node.children {
            self.draw(child, r, env);
        }

        node.widget.post_show(r, &cx);
        if let Some(post_draw) = &node.hooks.post_draw {
            post_draw(r, &cx);
        }
        r.pop();
    }

    /// First cursor state produced by a child wins; otherwise the node's
    /// user hook, then the widget's own default.
    pub fn cursor_state(&self, id: NodeId, env: &Env) -> Option<CursorState> {
        let node = self.nodes.get(id)?;
        if node.hidden {
            return None;
        }
        for &child in &node.children {
            if let Some(state) = self.cursor_state(child, env) {
                return Some(state);
            }
        }

        let cx = ViewCx::new(id, node.mouse, &node.style, env);
        if let Some(hook) = &node.hooks.cursor_state
            && let Some(state) = hook(&cx)
        {
            return Some(state);
        }
        node.widget.cursor_state(&cx)
    }

    /// First non-empty tooltip of a hovered node, depth first.
    pub fn tooltip(&self, id: NodeId, env: &Env) -> Option<String> {
        let node = self.nodes.get(id)?;
        if node.hidden {
            return None;
        }
        for &child in &node.children {
            if let Some(tooltip) = self.tooltip(child, env) {
                return Some(tooltip);
            }
        }

        let tooltip = node.tooltip.as_ref()?;
        let cx = ViewCx::new(id, node.mouse, &node.style, env);
        if !node.widget.is_hovered(&cx) {
            return None;
        }
        Some(tooltip.get()).filter(|t| !t.is_empty())
    }

    /// Screen-change notification. Reaches hidden nodes too, so a hidden
    /// field still drops focus when its screen goes away.
    pub fn change_screen(&mut self, id: NodeId, change: &ScreenChange, env: &mut Env) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.change_screen(child, change, env);
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let Node {
            widget,
            style,
            hidden,
            mouse,
            hooks,
            ..
        } = node;
        let hook = hooks.change_screen.clone();
        let mut cx = Cx::new(id, *mouse, style, hidden, env);
        widget.change_screen(change, &mut cx);
        if let Some(hook) = hook {
            hook(change, &mut cx);
        }
    }

    /// Resolves the style of `id` and its subtree. A node without an
    /// explicit style name uses `inherited`; the name it ends up with is
    /// what its children inherit.
    pub fn resolve_styles(&mut self, id: NodeId, inherited: &str, theme: Option<&Theme>) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let name = node
            .style_name
            .clone()
            .unwrap_or_else(|| inherited.to_string());
        node.style = resolve_style(theme, node.widget.kind(), &name);
        node.widget.restyle(theme, &name);
        node.resolved_name = name.clone();

        let children = node.children.clone();
        for child in children {
            self.resolve_styles(child, &name, theme);
        }
    }

    pub fn measure_changed(&mut self, id: NodeId, measure: &dyn TextMeasure) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.widget.on_measure_changed(measure);
        let children = node.children.clone();
        for child in children {
            self.measure_changed(child, measure);
        }
    }
}
