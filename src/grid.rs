//! Grid Layout
//!
//! Lays feed items out as rows of cards for the item grid.

use crate::models::{ItemId, ItemRecord};

pub const MAX_CELLS_PER_ROW: usize = 3;

/// A renderable item: the record plus its validated id
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: ItemId,
    pub item: ItemRecord,
}

impl Card {
    pub fn link(&self) -> String {
        crate::models::item_page_link(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// Unique for the lifetime of the grid, used as the list key
    pub key: u64,
    pub cards: Vec<Card>,
}

/// Replace the grid (new query) or append after it (next page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Replace,
    Append,
}

/// Drop records without an id, then chunk the rest into rows in server order.
/// A dropped record takes no cell; the next valid record fills its slot.
pub fn layout_rows(items: &[ItemRecord]) -> Vec<Vec<Card>> {
    let cards: Vec<Card> = items
        .iter()
        .filter_map(|item| {
            item.unique_id.clone().map(|id| Card {
                id,
                item: item.clone(),
            })
        })
        .collect();

    cards
        .chunks(MAX_CELLS_PER_ROW)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Rendered rows plus the next row key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridState {
    pub rows: Vec<GridRow>,
    next_key: u64,
    /// Set once the first page has been applied
    loaded: bool,
}

impl GridState {
    pub fn apply_page(&mut self, items: &[ItemRecord], mode: RenderMode) {
        self.loaded = true;
        if mode == RenderMode::Replace {
            self.rows.clear();
        }
        for cards in layout_rows(items) {
            let key = self.next_key;
            self.next_key += 1;
            self.rows.push(GridRow { key, cards });
        }
    }

    pub fn card_count(&self) -> usize {
        self.rows.iter().map(|row| row.cards.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Empty only after a page actually arrived, not while the first fetch is pending
    pub fn shows_empty_notice(&self) -> bool {
        self.loaded && self.rows.is_empty()
    }
}
