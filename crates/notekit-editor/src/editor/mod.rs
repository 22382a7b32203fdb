//! Editing session.
//!
//! The [`Editor`] owns the scene, undo stack, selection, viewport, tools
//! and the document of the page being edited. Hosts feed it pointer and
//! key input and subscribe to its [`EventBus`]; every committed change is
//! published after the input event that caused it has been handled.
//!
//! This module is split into submodules:
//! - `input`: pointer and key routing, hotkeys, temporary pan
//! - `layers`: layer management
//! - `pages`: page navigation and file boundaries
//! - `cut`: rectangle cut of vector paths

mod cut;
mod input;
mod layers;
mod pages;

pub use cut::cut_item;
pub use input::PointerPhase;

use std::sync::Arc;

use notekit_core::{
    EditorEvent, EventBus, HistoryEvent, ItemId, SceneEvent, SelectionEvent, ToolEvent, ViewEvent,
};
use notekit_settings::Config;

use crate::commands::SceneCommand;
use crate::document::Document;
use crate::geometry::Point;
use crate::gizmo::Gizmo;
use crate::history::UndoStack;
use crate::model::{ImageItem, Item, ItemTransform};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::tools::{delete_selected, ShapeMode, Tool, ToolContext, ToolKind, ToolPreview, ToolSet};
use crate::viewport::Viewport;

/// What the editor compares before and after an input event to decide
/// which change notifications to publish.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    selection: Vec<ItemId>,
    zoom: f64,
    scroll: (f64, f64),
    history: (bool, bool, usize, usize),
}

pub struct Editor {
    scene: Scene,
    history: UndoStack,
    selection: Selection,
    viewport: Viewport,
    gizmo: Gizmo,
    tools: ToolSet,
    active: ToolKind,
    /// Tool to restore when the space bar is released.
    space_restore: Option<ToolKind>,
    config: Config,
    document: Document,
    bus: Arc<EventBus>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("scene", &self.scene)
            .field("active", &self.active)
            .field("selection", &self.selection)
            .field("viewport", &self.viewport)
            .field("history", &self.history.len())
            .field("document", &self.document)
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Editor {
    pub fn new(config: Config) -> Self {
        Self::with_bus(config, Arc::new(EventBus::new()))
    }

    /// Creates an editor publishing to an existing bus.
    pub fn with_bus(config: Config, bus: Arc<EventBus>) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!("Editor started with questionable settings: {}", e);
        }
        let canvas = &config.canvas;
        let mut tools = ToolSet::default();
        tools.shape.set_mode(ShapeMode::from(config.tools.shape));
        Self {
            scene: Scene::new(canvas.z_band),
            history: UndoStack::new(canvas.undo_limit),
            selection: Selection::new(),
            viewport: Viewport::default().with_settings(canvas),
            gizmo: Gizmo::new(canvas.handle_size, canvas.rotate_handle_offset),
            tools,
            active: ToolKind::Pen,
            space_restore: None,
            document: Document::new(canvas.z_band),
            config,
            bus,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn gizmo(&self) -> &Gizmo {
        &self.gizmo
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tool defaults (color, widths, font) can change at any time; the
    /// next gesture picks them up.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Overlay of the active tool, for the host to draw above the scene.
    pub fn preview(&self) -> Option<ToolPreview> {
        self.tools.get(self.active).preview()
    }

    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.viewport.set_view_size(width, height);
    }

    /// Switches tools, cancelling any gesture of the old one.
    pub fn set_tool(&mut self, kind: ToolKind) {
        self.space_restore = None;
        self.switch_tool(kind);
    }

    fn switch_tool(&mut self, kind: ToolKind) {
        if kind == self.active {
            return;
        }
        let old = self.active;
        self.run(|tools, ctx| tools.get_mut(old).deactivate(ctx));
        self.active = kind;
        self.run(|tools, ctx| tools.get_mut(kind).activate(ctx));
        tracing::debug!("Tool {} -> {}", old, kind);
        self.bus.publish(EditorEvent::Tool(ToolEvent::Activated {
            name: kind.name().to_string(),
        }));
    }

    /// Changes the shape tool mode; an unfinished shape is dropped.
    pub fn set_shape_mode(&mut self, mode: ShapeMode) {
        self.tools.shape.set_mode(mode);
    }

    /// Drops the active tool's gesture, restoring anything it moved live.
    pub fn cancel_gesture(&mut self) {
        let kind = self.active;
        if self.tools.get(kind).is_idle() {
            return;
        }
        self.run(|tools, ctx| {
            let tool = tools.get_mut(kind);
            tool.deactivate(ctx);
            tool.activate(ctx);
        });
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        self.run(|_, ctx| {
            let label = ctx.history.undo_text().map(|t| format!("Undo {}", t));
            let done = ctx.history.undo(ctx.scene);
            if let (true, Some(label)) = (done, label) {
                ctx.outbox
                    .push(EditorEvent::Scene(SceneEvent::Changed { label }));
            }
            done
        })
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        self.run(|_, ctx| {
            let label = ctx.history.redo_text().map(|t| format!("Redo {}", t));
            let done = ctx.history.redo(ctx.scene);
            if let (true, Some(label)) = (done, label) {
                ctx.outbox
                    .push(EditorEvent::Scene(SceneEvent::Changed { label }));
            }
            done
        })
    }

    /// Replaces the selection with the editable items among `ids`.
    pub fn select(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        let ids: Vec<ItemId> = ids.into_iter().collect();
        self.run(|_, ctx| {
            let editable: Vec<ItemId> = ids
                .into_iter()
                .filter(|id| ctx.scene.is_item_editable(*id))
                .collect();
            ctx.selection.set(editable);
        });
    }

    pub fn clear_selection(&mut self) {
        self.run(|_, ctx| {
            ctx.selection.clear();
        });
    }

    /// Deletes the selected items as one undo step.
    pub fn delete_selection(&mut self) -> bool {
        self.cancel_gesture();
        self.run(|_, ctx| delete_selected(ctx))
    }

    /// Inserts an image on the current layer at `at` (the view center when
    /// `None`). Images wider than the configured maximum are scaled down.
    /// The new image is selected and the Selection tool becomes active.
    pub fn insert_image(
        &mut self,
        filename: impl Into<String>,
        width: u32,
        height: u32,
        at: Option<Point>,
    ) -> Option<ItemId> {
        let filename = filename.into();
        if width == 0 || height == 0 {
            tracing::warn!("Refusing to insert empty image '{}'", filename);
            return None;
        }
        let at = at.unwrap_or_else(|| self.viewport.visible_scene_rect().center());
        let max_width = self.config.canvas.image_max_width;

        let inserted = self.run(|_, ctx| {
            let Some(layer) = ctx.editable_current_layer() else {
                tracing::warn!("Current layer is hidden or locked, image not inserted");
                return None;
            };
            let mut transform = ItemTransform::at(at);
            if max_width > 0.0 && f64::from(width) > max_width {
                transform = transform.with_uniform_scale(max_width / f64::from(width));
            }
            let item = Item::image(
                ImageItem {
                    filename,
                    width,
                    height,
                },
                transform,
            );
            let id = item.id;
            ctx.push(SceneCommand::add(item, layer));
            ctx.selection.set([id]);
            Some(id)
        });

        if inserted.is_some() {
            self.set_tool(ToolKind::Selection);
        }
        inserted
    }

    /// Records the result of an interactive text edit. Returns false when
    /// the item is not a text item or the content did not change.
    pub fn commit_text_edit(&mut self, id: ItemId, content: impl Into<String>) -> bool {
        let content = content.into();
        self.run(|_, ctx| {
            let Some(old) = ctx
                .scene
                .item(id)
                .and_then(Item::as_text)
                .map(|text| text.content.clone())
            else {
                tracing::warn!("Text edit for {} ignored: not a text item", id);
                return false;
            };
            if old == content {
                return false;
            }
            ctx.push(SceneCommand::change_text(id, old, content));
            true
        })
    }

    /// Runs `f` with a tool context borrowing the session, then publishes
    /// the events it produced plus selection, view and history changes.
    fn run<R>(&mut self, f: impl FnOnce(&mut ToolSet, &mut ToolContext<'_>) -> R) -> R {
        let before = self.state_snapshot();
        let mut outbox = Vec::new();
        let result = {
            let mut ctx = ToolContext {
                scene: &mut self.scene,
                history: &mut self.history,
                selection: &mut self.selection,
                viewport: &mut self.viewport,
                gizmo: &mut self.gizmo,
                settings: &self.config.tools,
                canvas: &self.config.canvas,
                outbox: &mut outbox,
            };
            f(&mut self.tools, &mut ctx)
        };
        self.settle(before, outbox);
        result
    }

    fn state_snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            selection: self.selection.ids().to_vec(),
            zoom: self.viewport.zoom(),
            scroll: self.viewport.scroll(),
            history: (
                self.history.can_undo(),
                self.history.can_redo(),
                self.history.undo_depth(),
                self.history.redo_depth(),
            ),
        }
    }

    fn settle(&mut self, before: StateSnapshot, events: Vec<EditorEvent>) {
        let scene = &self.scene;
        self.selection.retain(|id| scene.contains_item(id));

        let after = self.state_snapshot();
        let selection_changed = after.selection != before.selection;
        if selection_changed {
            self.gizmo.set_angle(0.0);
        }
        if self.active == ToolKind::Selection {
            if selection_changed || !events.is_empty() {
                self.gizmo.update(self.scene.bounds_of(self.selection.ids()));
            }
        } else {
            self.gizmo.hide();
        }

        for event in events {
            self.bus.publish(event);
        }
        if selection_changed {
            self.bus
                .publish(EditorEvent::Selection(SelectionEvent::Changed {
                    items: after.selection.clone(),
                }));
        }
        if after.zoom != before.zoom || after.scroll != before.scroll {
            self.bus.publish(EditorEvent::View(ViewEvent::Changed {
                zoom: after.zoom,
                scroll_x: after.scroll.0,
                scroll_y: after.scroll.1,
            }));
        }
        if after.history != before.history {
            self.bus.publish(EditorEvent::History(HistoryEvent::Changed {
                can_undo: after.history.0,
                can_redo: after.history.1,
            }));
        }
    }

    /// Swaps in a freshly loaded scene; history and selection start empty.
    fn replace_scene(&mut self, scene: Scene) {
        let kind = self.active;
        self.run(|tools, ctx| tools.get_mut(kind).deactivate(ctx));
        self.scene = scene;
        self.run(|tools, ctx| {
            ctx.history.clear();
            ctx.selection.clear();
            ctx.outbox.push(EditorEvent::Scene(SceneEvent::Loaded {
                item_count: ctx.scene.item_count(),
            }));
            tools.get_mut(kind).activate(ctx);
        });
    }
}
