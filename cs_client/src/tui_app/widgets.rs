//! Small stateful widgets used by the TUI.

use ratatui::widgets::{ListItem, ListState, ScrollbarState};

/// A bounded list, newest item first, with a selection cursor and a
/// matching scrollbar.
///
/// Meant to be drawn with `ListDirection::BottomToTop` so the newest item
/// sits at the bottom of the window.
pub struct ScrollableList {
    pub list_items: Vec<ListItem<'static>>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
    max_items: usize,
}

impl ScrollableList {
    pub fn new(max_items: usize) -> Self {
        Self {
            list_items: Vec::new(),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
            max_items,
        }
    }

    pub fn len(&self) -> usize {
        self.list_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list_items.is_empty()
    }

    /// Add an item as the newest, dropping the oldest past capacity
    pub fn push(&mut self, item: ListItem<'static>) {
        self.list_items.insert(0, item);
        self.list_items.truncate(self.max_items);
        self.scroll_state = self.scroll_state.content_length(self.list_items.len());
        self.jump_to_last();
    }

    /// Select the oldest item
    pub fn jump_to_first(&mut self) {
        if self.list_items.is_empty() {
            return;
        }
        let last = self.list_items.len() - 1;
        self.select(last);
    }

    /// Select the newest item
    pub fn jump_to_last(&mut self) {
        if self.list_items.is_empty() {
            return;
        }
        self.select(0);
    }

    /// Move towards older items
    pub fn move_up(&mut self) {
        if self.list_items.is_empty() {
            return;
        }
        let idx = self
            .list_state
            .selected()
            .map_or(0, |i| (i + 1).min(self.list_items.len() - 1));
        self.select(idx);
    }

    /// Move towards newer items
    pub fn move_down(&mut self) {
        if self.list_items.is_empty() {
            return;
        }
        let idx = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.select(idx);
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    fn select(&mut self, idx: usize) {
        self.list_state.select(Some(idx));
        // Scrollbar runs top to bottom while the list grows upwards
        let position = self.list_items.len().saturating_sub(idx + 1);
        self.scroll_state = self.scroll_state.position(position);
    }
}

/// Single-line text input with a cursor
#[derive(Debug, Default)]
pub struct UserInput {
    pub value: String,
    /// Cursor position in characters, not bytes
    pub char_idx: usize,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_idx(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn input(&mut self, c: char) {
        let idx = self.byte_idx();
        self.value.insert(idx, c);
        self.char_idx += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.char_idx == 0 {
            return;
        }
        self.char_idx -= 1;
        let idx = self.byte_idx();
        self.value.remove(idx);
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.char_idx < self.char_count() {
            let idx = self.byte_idx();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.char_idx = self.char_idx.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.char_idx = (self.char_idx + 1).min(self.char_count());
    }

    pub fn jump_to_first(&mut self) {
        self.char_idx = 0;
    }

    pub fn jump_to_last(&mut self) {
        self.char_idx = self.char_count();
    }

    /// Take the current value and clear the input
    pub fn submit(&mut self) -> String {
        self.char_idx = 0;
        std::mem::take(&mut self.value)
    }
}
