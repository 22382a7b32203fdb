//! Layer management.
//!
//! Layer operations are not recorded on the undo stack. Commands that
//! later target a removed layer log a warning and do nothing.

use notekit_core::{EditorEvent, LayerId, SceneError, SceneEvent};

use super::Editor;

impl Editor {
    /// Adds a layer on top and makes it current.
    pub fn add_layer(&mut self, name: impl Into<String>) -> LayerId {
        let name = name.into();
        self.run(|_, ctx| {
            let id = ctx.scene.add_layer(name);
            ctx.outbox.push(layers_changed(ctx.scene.layer_count()));
            ctx.outbox
                .push(EditorEvent::Scene(SceneEvent::CurrentLayerChanged { layer: id }));
            id
        })
    }

    /// Removes a layer with all its items. The last layer cannot be removed.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<(), SceneError> {
        self.cancel_gesture();
        self.run(|_, ctx| {
            let removed = ctx.scene.remove_layer(id)?;
            tracing::info!("Removed layer '{}' with {} item(s)", removed.name, removed.len());
            ctx.outbox.push(layers_changed(ctx.scene.layer_count()));
            if let Some(current) = ctx.scene.current_layer_id() {
                ctx.outbox
                    .push(EditorEvent::Scene(SceneEvent::CurrentLayerChanged { layer: current }));
            }
            Ok(())
        })
    }

    pub fn rename_layer(&mut self, id: LayerId, name: impl Into<String>) -> Result<(), SceneError> {
        let name = name.into();
        self.run(|_, ctx| {
            ctx.scene.rename_layer(id, name)?;
            ctx.outbox.push(layers_changed(ctx.scene.layer_count()));
            Ok(())
        })
    }

    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> Result<(), SceneError> {
        self.cancel_gesture();
        self.run(|_, ctx| {
            ctx.scene.set_layer_visible(id, visible)?;
            if !visible {
                drop_layer_from_selection(ctx.scene, ctx.selection, id);
            }
            ctx.outbox.push(layers_changed(ctx.scene.layer_count()));
            Ok(())
        })
    }

    /// Locking a layer also deselects its items.
    pub fn set_layer_locked(&mut self, id: LayerId, locked: bool) -> Result<(), SceneError> {
        self.cancel_gesture();
        self.run(|_, ctx| {
            ctx.scene.set_layer_locked(id, locked)?;
            if locked {
                drop_layer_from_selection(ctx.scene, ctx.selection, id);
            }
            ctx.outbox.push(layers_changed(ctx.scene.layer_count()));
            Ok(())
        })
    }

    /// Moves a layer to `to` in the top-to-bottom list and reassigns z.
    pub fn move_layer(&mut self, id: LayerId, to: usize) -> Result<(), SceneError> {
        self.run(|_, ctx| {
            ctx.scene.move_layer(id, to)?;
            ctx.outbox.push(layers_changed(ctx.scene.layer_count()));
            Ok(())
        })
    }

    pub fn set_current_layer(&mut self, id: LayerId) -> Result<(), SceneError> {
        self.run(|_, ctx| {
            ctx.scene.set_current_layer(id)?;
            ctx.outbox
                .push(EditorEvent::Scene(SceneEvent::CurrentLayerChanged { layer: id }));
            Ok(())
        })
    }
}

fn layers_changed(layer_count: usize) -> EditorEvent {
    EditorEvent::Scene(SceneEvent::LayersChanged { layer_count })
}

fn drop_layer_from_selection(
    scene: &crate::scene::Scene,
    selection: &mut crate::selection::Selection,
    layer: LayerId,
) {
    selection.retain(|item| scene.layer_of(item).map(|l| l.id) != Some(layer));
}
