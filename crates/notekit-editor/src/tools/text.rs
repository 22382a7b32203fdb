//! Text placement.
//!
//! The tool only creates text items and asks the host to start editing;
//! typing happens in the host's text widget, which reports the final
//! content back through the editor.

use notekit_core::constants::DEFAULT_TEXT_CONTENT;

use super::{PointerEvent, Tool, ToolContext, ToolKind};
use crate::commands::SceneCommand;
use crate::model::{Item, TextItem};

#[derive(Debug, Default)]
pub struct TextTool;

impl TextTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        if !event.is_left() {
            return;
        }

        let hit = ctx.scene.item_at(event.scene, ctx.pick_tolerance());
        if let Some(id) = hit.filter(|id| ctx.scene.item(*id).is_some_and(|i| i.as_text().is_some())) {
            let locked = ctx.scene.layer_of(id).is_some_and(|layer| layer.locked);
            if !locked {
                ctx.request_text_edit(id, false);
            }
            return;
        }

        let Some(layer) = ctx.editable_current_layer() else {
            return;
        };
        let item = Item::text(
            TextItem {
                content: DEFAULT_TEXT_CONTENT.to_string(),
                font_family: ctx.settings.font_family.clone(),
                font_size: ctx.settings.font_size,
                color: ctx.color(),
            },
            event.scene,
        );
        let id = item.id;
        ctx.push(SceneCommand::add(item, layer));
        ctx.selection.set([id]);
        ctx.request_text_edit(id, true);
    }

    fn on_pointer_move(&mut self, _event: &PointerEvent, _ctx: &mut ToolContext<'_>) {}

    fn on_pointer_up(&mut self, _event: &PointerEvent, _ctx: &mut ToolContext<'_>) {}

    fn is_idle(&self) -> bool {
        true
    }
}
