//! Fixed-capacity tile ring
//!
//! The pool is always full: recycling rotates the front slot to the back
//! by moving an index, so steady-state scrolling never allocates.

use glam::Vec2;

use super::state::Tile;

/// Ring of `len` tile slots, front = oldest/leftmost
#[derive(Debug, Clone)]
pub struct TilePool {
    slots: Vec<Tile>,
    front: usize,
    /// Next sequence index handed out on recycle
    next_index: u64,
}

impl TilePool {
    /// Fill `count` slots starting at `origin`, spaced one tile width apart
    pub fn new(count: usize, origin: Vec2, tile_size: Vec2, tile_scale: Vec2) -> Self {
        let slots = (0..count)
            .map(|i| {
                let pos = origin + Vec2::new(i as f32 * tile_size.x, 0.0);
                Tile::new(i as u64, pos, tile_size, tile_scale)
            })
            .collect();
        Self {
            slots,
            front: 0,
            next_index: count as u64,
        }
    }

    /// Lay the existing slots out again from `origin` (reuses every slot)
    pub fn relayout(&mut self, origin: Vec2, tile_width: f32) {
        let len = self.slots.len();
        for i in 0..len {
            let slot = (self.front + i) % len;
            let tile = &mut self.slots[slot];
            tile.index = i as u64;
            tile.pos = origin + Vec2::new(i as f32 * tile_width, 0.0);
        }
        self.next_index = len as u64;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, i: usize) -> usize {
        (self.front + i) % self.slots.len()
    }

    /// Tile at logical position `i` (0 = front)
    pub fn get(&self, i: usize) -> Option<&Tile> {
        (i < self.slots.len()).then(|| &self.slots[self.slot(i)])
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Tile> {
        if i < self.slots.len() {
            let slot = self.slot(i);
            Some(&mut self.slots[slot])
        } else {
            None
        }
    }

    pub fn front(&self) -> Option<&Tile> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&Tile> {
        self.slots.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Tiles front to back
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        let (tail, head) = self.slots.split_at(self.front);
        head.iter().chain(tail.iter())
    }

    /// Tiles in storage order (for passes where order does not matter)
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.slots.iter_mut()
    }

    /// The tile directly in front of logical position `i`
    pub fn predecessor(&self, i: usize) -> Option<&Tile> {
        self.get(i.checked_sub(1)?)
    }

    /// Move the front tile to the back, one tile width past the old back,
    /// and give it the next sequence index. Returns the recycled tile.
    pub fn recycle_front(&mut self, tile_width: f32) -> Option<&mut Tile> {
        let back_pos = self.back()?.pos;
        let slot = self.front;
        self.front = (self.front + 1) % self.slots.len();

        let index = self.next_index;
        self.next_index += 1;

        let tile = &mut self.slots[slot];
        tile.index = index;
        tile.pos = back_pos + Vec2::new(tile_width, 0.0);
        Some(tile)
    }
}
