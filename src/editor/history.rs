// src/editor/history.rs
//
// Command-based undo/redo for tile edits. One command covers one full
// gesture (press..release); the history keeps a bounded undo stack and
// clears the redo stack whenever a new command is committed.

use std::collections::VecDeque;

use crate::map::{CellState, TileGrid};

/// Maximum number of commands kept on the undo stack. Older commands are
/// evicted, never newer ones.
pub const MAX_UNDO: usize = 50;

/// A single recorded cell transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub x: i32,
    pub z: i32,
    pub old: CellState,
    pub new: CellState,
}

/// An atomic, reversible batch of cell diffs produced by one gesture.
///
/// Diffs stay in recorded order. Duplicate coordinates are allowed (a
/// drag can cross the same cell twice); sequential replay keeps the
/// old/new chains correct in both directions.
#[derive(Debug, Clone, Default)]
pub struct EditCommand {
    changes: Vec<CellChange>,
}

impl EditCommand {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Restores every old value, newest diff first.
    fn unexecute(&self, grid: &mut TileGrid) {
        for change in self.changes.iter().rev() {
            grid.set(change.x, change.z, change.old);
        }
    }

    /// Re-applies every new value in recorded order.
    fn execute(&self, grid: &mut TileGrid) {
        for change in &self.changes {
            grid.set(change.x, change.z, change.new);
        }
    }
}

/// Undo/redo log with a gesture-scoped recording buffer.
///
/// State machine: `Idle` -> (`begin_edit`) -> `Recording` ->
/// (`end_edit`) -> `Idle`. `record_change` outside a recording is
/// dropped, as is an `end_edit` without a matching `begin_edit`.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: VecDeque<EditCommand>,
    redo_stack: Vec<EditCommand>,
    open: Option<EditCommand>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new command buffer at gesture start. A buffer left open by
    /// an earlier unfinished gesture is discarded.
    pub fn begin_edit(&mut self) {
        self.open = Some(EditCommand::default());
    }

    /// Whether a command buffer is currently open.
    pub fn is_recording(&self) -> bool {
        self.open.is_some()
    }

    /// Appends a diff to the open command. Only actual transitions are
    /// recorded; `old == new` and calls outside a gesture are dropped.
    pub fn record_change(&mut self, x: i32, z: i32, old: CellState, new: CellState) {
        if old == new {
            return;
        }
        if let Some(cmd) = self.open.as_mut() {
            cmd.changes.push(CellChange { x, z, old, new });
        }
    }

    /// Closes the gesture. A non-empty command is pushed onto the undo
    /// stack (evicting the oldest entry past [`MAX_UNDO`]) and the redo
    /// stack is cleared; an empty command is discarded without touching
    /// either stack. Returns true if a command was committed.
    pub fn end_edit(&mut self) -> bool {
        let Some(cmd) = self.open.take() else {
            return false;
        };
        if cmd.is_empty() {
            return false;
        }
        self.undo_stack.push_back(cmd);
        if self.undo_stack.len() > MAX_UNDO {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        true
    }

    /// Reverts the most recent command onto `grid`. Returns false if
    /// there is nothing to undo.
    pub fn undo(&mut self, grid: &mut TileGrid) -> bool {
        match self.undo_stack.pop_back() {
            Some(cmd) => {
                cmd.unexecute(grid);
                self.redo_stack.push(cmd);
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone command onto `grid`. Returns
    /// false if there is nothing to redo.
    pub fn redo(&mut self, grid: &mut TileGrid) -> bool {
        match self.redo_stack.pop() {
            Some(cmd) => {
                cmd.execute(grid);
                self.undo_stack.push_back(cmd);
                true
            }
            None => false,
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drops both stacks and any open buffer. Called when a map is
    /// created or a different map is loaded.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open = None;
    }
}
