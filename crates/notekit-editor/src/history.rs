//! Undo/redo stack with macro grouping.

use crate::commands::SceneCommand;
use crate::scene::Scene;

#[derive(Debug)]
struct OpenMacro {
    name: String,
    commands: Vec<SceneCommand>,
}

/// Linear command history.
///
/// Pushing a command executes it and drops everything past the current
/// position. Between [`UndoStack::begin_macro`] and
/// [`UndoStack::end_macro`] pushed commands run immediately but are
/// recorded as a single composite entry.
#[derive(Debug, Default)]
pub struct UndoStack {
    undo_stack: Vec<SceneCommand>,
    redo_stack: Vec<SceneCommand>,
    open_macros: Vec<OpenMacro>,
    /// Maximum undo depth, 0 for unlimited.
    limit: usize,
}

impl UndoStack {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Executes `cmd` against `scene` and records it.
    pub fn push(&mut self, mut cmd: SceneCommand, scene: &mut Scene) {
        cmd.apply(scene);
        if let Some(open) = self.open_macros.last_mut() {
            open.commands.push(cmd);
            return;
        }
        self.record(cmd);
    }

    fn record(&mut self, cmd: SceneCommand) {
        tracing::debug!("history: recorded '{}'", cmd.name());
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
        if self.limit > 0 && self.undo_stack.len() > self.limit {
            let overflow = self.undo_stack.len() - self.limit;
            self.undo_stack.drain(..overflow);
        }
    }

    pub fn begin_macro(&mut self, name: impl Into<String>) {
        self.open_macros.push(OpenMacro {
            name: name.into(),
            commands: Vec::new(),
        });
    }

    /// Closes the innermost macro. Returns false if no commands were
    /// recorded in it, in which case nothing is added to the history.
    pub fn end_macro(&mut self) -> bool {
        let Some(open) = self.open_macros.pop() else {
            tracing::warn!("history: end_macro without begin_macro");
            return false;
        };
        if open.commands.is_empty() {
            return false;
        }
        let composite = SceneCommand::composite(open.name, open.commands);
        match self.open_macros.last_mut() {
            Some(parent) => parent.commands.push(composite),
            None => self.record(composite),
        }
        true
    }

    pub fn in_macro(&self) -> bool {
        !self.open_macros.is_empty()
    }

    /// Reverts the most recent entry. Returns false when there is nothing
    /// to undo or a macro is still open.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        if self.in_macro() {
            tracing::warn!("history: undo ignored while a macro is open");
            return false;
        }
        match self.undo_stack.pop() {
            Some(mut cmd) => {
                cmd.undo(scene);
                tracing::debug!("history: undo '{}'", cmd.name());
                self.redo_stack.push(cmd);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        if self.in_macro() {
            tracing::warn!("history: redo ignored while a macro is open");
            return false;
        }
        match self.redo_stack.pop() {
            Some(mut cmd) => {
                cmd.apply(scene);
                tracing::debug!("history: redo '{}'", cmd.name());
                self.undo_stack.push(cmd);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Total number of recorded entries, undone ones included.
    pub fn len(&self) -> usize {
        self.undo_stack.len() + self.redo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current position: the number of entries that can be undone.
    pub fn index(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn undo_text(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.name())
    }

    pub fn redo_text(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.name())
    }

    /// Forgets all history, including any open macro.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_macros.clear();
    }
}
