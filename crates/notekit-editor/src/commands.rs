//! Reversible scene mutations.
//!
//! Every committed change to the scene goes through a [`SceneCommand`].
//! Commands hold the items that are currently *off* the scene: an `Add`
//! keeps its item only while undone, a `Delete` only while applied.

use notekit_core::{ItemId, LayerId};

use crate::model::{Item, ItemKind, ItemTransform};
use crate::scene::Scene;

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum SceneCommand {
    Add(AddItem),
    Delete(DeleteItems),
    Replace(ReplaceItem),
    MoveRotateScale(MoveRotateScale),
    ChangeText(ChangeText),
    Composite(CompositeCommand),
}

/// Group of commands undone and redone as one step.
#[derive(Debug, Clone)]
pub struct CompositeCommand {
    pub commands: Vec<SceneCommand>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AddItem {
    pub layer: LayerId,
    pub id: ItemId,
    /// Some while the item is not in the scene.
    item: Option<Item>,
    /// Whether the item currently in the scene was put there by this command.
    inserted: bool,
}

#[derive(Debug, Clone)]
pub struct DeleteEntry {
    pub layer: LayerId,
    pub id: ItemId,
    /// List index the item had when it was removed.
    index: usize,
    /// Some while the item is removed.
    item: Option<Item>,
}

#[derive(Debug, Clone)]
pub struct DeleteItems {
    pub entries: Vec<DeleteEntry>,
}

/// One item becomes zero or more items at the same list position.
#[derive(Debug, Clone)]
pub struct ReplaceItem {
    pub layer: LayerId,
    pub old_id: ItemId,
    pub new_ids: Vec<ItemId>,
    index: Option<usize>,
    old: Option<Item>,
    new_items: Vec<Item>,
}

#[derive(Debug, Clone)]
pub struct MoveRotateScale {
    pub id: ItemId,
    pub old: ItemTransform,
    pub new: ItemTransform,
}

#[derive(Debug, Clone)]
pub struct ChangeText {
    pub id: ItemId,
    pub old: String,
    pub new: String,
}

impl SceneCommand {
    pub fn add(item: Item, layer: LayerId) -> Self {
        SceneCommand::Add(AddItem {
            layer,
            id: item.id,
            item: Some(item),
            inserted: false,
        })
    }

    pub fn delete(targets: impl IntoIterator<Item = (ItemId, LayerId)>) -> Self {
        SceneCommand::Delete(DeleteItems {
            entries: targets
                .into_iter()
                .map(|(id, layer)| DeleteEntry {
                    layer,
                    id,
                    index: 0,
                    item: None,
                })
                .collect(),
        })
    }

    pub fn replace(old_id: ItemId, new_items: Vec<Item>, layer: LayerId) -> Self {
        SceneCommand::Replace(ReplaceItem {
            layer,
            old_id,
            new_ids: new_items.iter().map(|i| i.id).collect(),
            index: None,
            old: None,
            new_items,
        })
    }

    pub fn move_rotate_scale(id: ItemId, old: ItemTransform, new: ItemTransform) -> Self {
        SceneCommand::MoveRotateScale(MoveRotateScale { id, old, new })
    }

    pub fn change_text(id: ItemId, old: String, new: String) -> Self {
        SceneCommand::ChangeText(ChangeText { id, old, new })
    }

    pub fn composite(name: impl Into<String>, commands: Vec<SceneCommand>) -> Self {
        SceneCommand::Composite(CompositeCommand {
            commands,
            name: name.into(),
        })
    }

    /// Label shown in undo/redo menus.
    pub fn name(&self) -> &str {
        match self {
            SceneCommand::Add(_) => "Add",
            SceneCommand::Delete(_) => "Delete",
            SceneCommand::Replace(_) => "Erase",
            SceneCommand::MoveRotateScale(_) => "Transform",
            SceneCommand::ChangeText(_) => "Edit Text",
            SceneCommand::Composite(cmd) => &cmd.name,
        }
    }

    /// Forward action.
    pub fn apply(&mut self, scene: &mut Scene) {
        match self {
            SceneCommand::Add(cmd) => {
                if scene.contains_item(cmd.id) {
                    if !cmd.inserted {
                        tracing::debug!("Add {}: already in the scene", cmd.id);
                    }
                    return;
                }
                let Some(item) = cmd.item.take() else {
                    tracing::warn!("Add {}: no item to insert", cmd.id);
                    return;
                };
                match scene.layer_mut(cmd.layer) {
                    Some(layer) => layer.push(item),
                    None => {
                        tracing::warn!("Add {}: layer {} is gone", cmd.id, cmd.layer);
                        cmd.item = Some(item);
                        return;
                    }
                }
                cmd.inserted = true;
                scene.reassign_z();
            }
            SceneCommand::Delete(cmd) => {
                for entry in &mut cmd.entries {
                    let removed = scene.layer_mut(entry.layer).and_then(|l| l.remove(entry.id));
                    match removed {
                        Some((index, item)) => {
                            entry.index = index;
                            entry.item = Some(item);
                        }
                        None => tracing::warn!(
                            "Delete {}: not found in layer {}",
                            entry.id,
                            entry.layer
                        ),
                    }
                }
                scene.reassign_z();
            }
            SceneCommand::Replace(cmd) => {
                let Some(layer) = scene.layer_mut(cmd.layer) else {
                    tracing::warn!("Replace {}: layer {} is gone", cmd.old_id, cmd.layer);
                    return;
                };
                let Some((index, old)) = layer.remove(cmd.old_id) else {
                    tracing::warn!("Replace {}: item not in layer", cmd.old_id);
                    return;
                };
                for item in cmd.new_items.drain(..).rev() {
                    layer.insert(index, item);
                }
                cmd.index = Some(index);
                cmd.old = Some(old);
                scene.reassign_z();
            }
            SceneCommand::MoveRotateScale(cmd) => set_transform(scene, cmd.id, cmd.new),
            SceneCommand::ChangeText(cmd) => set_text(scene, cmd.id, &cmd.new),
            SceneCommand::Composite(cmd) => {
                for sub_cmd in &mut cmd.commands {
                    sub_cmd.apply(scene);
                }
            }
        }
    }

    /// Inverse action.
    pub fn undo(&mut self, scene: &mut Scene) {
        match self {
            SceneCommand::Add(cmd) => {
                if !cmd.inserted {
                    return;
                }
                if let Some((_, item)) = scene.layer_mut(cmd.layer).and_then(|l| l.remove(cmd.id)) {
                    cmd.item = Some(item);
                    cmd.inserted = false;
                    scene.reassign_z();
                }
            }
            SceneCommand::Delete(cmd) => {
                for entry in cmd.entries.iter_mut().rev() {
                    let Some(item) = entry.item.take() else {
                        continue;
                    };
                    match scene.layer_mut(entry.layer) {
                        Some(layer) => layer.insert(entry.index, item),
                        None => {
                            tracing::warn!("Undo delete {}: layer {} is gone", entry.id, entry.layer);
                            entry.item = Some(item);
                        }
                    }
                }
                scene.reassign_z();
            }
            SceneCommand::Replace(cmd) => {
                let (Some(index), Some(old)) = (cmd.index, cmd.old.take()) else {
                    return;
                };
                let Some(layer) = scene.layer_mut(cmd.layer) else {
                    tracing::warn!("Undo replace {}: layer {} is gone", cmd.old_id, cmd.layer);
                    cmd.old = Some(old);
                    return;
                };
                cmd.new_items = cmd
                    .new_ids
                    .iter()
                    .filter_map(|id| layer.remove(*id).map(|(_, item)| item))
                    .collect();
                layer.insert(index, old);
                cmd.index = None;
                scene.reassign_z();
            }
            SceneCommand::MoveRotateScale(cmd) => set_transform(scene, cmd.id, cmd.old),
            SceneCommand::ChangeText(cmd) => set_text(scene, cmd.id, &cmd.old),
            SceneCommand::Composite(cmd) => {
                for sub_cmd in cmd.commands.iter_mut().rev() {
                    sub_cmd.undo(scene);
                }
            }
        }
    }
}

fn set_transform(scene: &mut Scene, id: ItemId, transform: ItemTransform) {
    match scene.item_mut(id) {
        Some(item) => item.transform = transform,
        None => tracing::warn!("Transform {}: item not in scene", id),
    }
}

fn set_text(scene: &mut Scene, id: ItemId, content: &str) {
    match scene.item_mut(id).map(|item| &mut item.kind) {
        Some(ItemKind::Text(text)) => text.content = content.to_string(),
        Some(_) => tracing::warn!("Edit text {}: not a text item", id),
        None => tracing::warn!("Edit text {}: item not in scene", id),
    }
}
