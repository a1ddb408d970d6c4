use crate::models::{renumber, Block};
use crate::util::now_ms;

pub type BlocksObserver = Box<dyn FnMut(&[Block])>;

/// In-memory owner of one page's ordered blocks during an editing session.
///
/// Every mutation keeps `order` dense (`0..n`) and reports the full array to the
/// observer. The observer only hears about real changes: the state loaded at
/// construction counts as already reported, and a mutation that leaves the
/// array deep-equal to the last report is swallowed.
pub struct BlockList {
    blocks: Vec<Block>,
    last_notified: Vec<Block>,
    next_seq: u64,
    clock: fn() -> i64,
    observer: Option<BlocksObserver>,
}

impl BlockList {
    pub fn new(initial: Vec<Block>) -> Self {
        Self::with_clock(initial, now_ms)
    }

    pub fn with_clock(mut initial: Vec<Block>, clock: fn() -> i64) -> Self {
        initial.sort_by_key(|b| b.order);
        renumber(&mut initial);

        Self {
            last_notified: initial.clone(),
            blocks: initial,
            next_seq: 0,
            clock,
            observer: None,
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[Block]) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Load a different page without reporting it as an edit.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        let fresh = Self::with_clock(blocks, self.clock);
        self.blocks = fresh.blocks;
        self.last_notified = fresh.last_notified;
    }

    /// Append an empty block of `block_type` at the end.
    pub fn select_block(&mut self, block_type: &str) -> &Block {
        let id = self.fresh_id();
        let order = self.blocks.len() as u32;
        self.blocks.push(Block::new(id, block_type, order));
        self.notify();

        &self.blocks[self.blocks.len() - 1]
    }

    /// Move `active_id` to the slot currently held by `over_id`.
    ///
    /// Array-move semantics: the moved block lands at the target's old index and
    /// everything in between shifts by one. Unknown ids are ignored.
    pub fn reorder(&mut self, active_id: &str, over_id: &str) -> bool {
        if active_id == over_id {
            return false;
        }

        let Some(from) = self.position(active_id) else {
            return false;
        };
        let Some(to) = self.position(over_id) else {
            return false;
        };

        let moved = self.blocks.remove(from);
        self.blocks.insert(to, moved);
        renumber(&mut self.blocks);
        self.notify()
    }

    pub fn update_content(&mut self, block_id: &str, content: &str) -> bool {
        let Some(b) = self.blocks.iter_mut().find(|b| b.id == block_id) else {
            return false;
        };
        if b.content == content {
            return false;
        }
        b.content = content.to_string();
        self.notify()
    }

    pub fn remove_block(&mut self, block_id: &str) -> bool {
        let Some(idx) = self.position(block_id) else {
            return false;
        };
        self.blocks.remove(idx);
        renumber(&mut self.blocks);
        self.notify()
    }

    fn position(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    fn fresh_id(&mut self) -> String {
        let ms = (self.clock)();
        loop {
            self.next_seq += 1;
            let id = make_block_id(ms, self.next_seq);
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn notify(&mut self) -> bool {
        if self.blocks == self.last_notified {
            return false;
        }
        self.last_notified = self.blocks.clone();
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.blocks);
        }
        true
    }
}

/// One keyboard step of a block handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

impl Step {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Step::Up),
            "ArrowDown" => Some(Step::Down),
            _ => None,
        }
    }
}

/// Id of the block one slot away from `block_id`, if there is one.
///
/// Reordering `block_id` onto it moves the block by exactly one position.
pub fn neighbour_id(blocks: &[Block], block_id: &str, step: Step) -> Option<String> {
    let idx = blocks.iter().position(|b| b.id == block_id)?;
    let target = match step {
        Step::Up => idx.checked_sub(1)?,
        Step::Down => idx + 1,
    };
    blocks.get(target).map(|b| b.id.clone())
}

pub(crate) fn make_block_id(now_ms: i64, seq: u64) -> String {
    format!("blk-{now_ms}-{seq}")
}
