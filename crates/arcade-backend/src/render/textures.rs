use std::collections::HashMap;

use super::TextureHandle;

/// Handle-to-resource table private to one renderer instance.
///
/// Every handle present in the table refers to a live resource; absence is the
/// only representation of "destroyed or never existed". Handles come from a
/// monotonic counter starting at 1 and are never handed out twice.
#[derive(Debug)]
pub struct TextureTable<T> {
    entries: HashMap<TextureHandle, T>,
    next_id: u32,
}

impl<T> TextureTable<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 1,
        }
    }

    /// Stores `resource` under a fresh handle.
    ///
    /// Returns [`TextureHandle::INVALID`] (dropping `resource`) once the id space
    /// is exhausted.
    pub fn insert(&mut self, resource: T) -> TextureHandle {
        let Some(next) = self.next_id.checked_add(1) else {
            return TextureHandle::INVALID;
        };

        let handle = TextureHandle::from_raw(self.next_id);
        self.next_id = next;
        self.entries.insert(handle, resource);
        handle
    }

    #[inline]
    pub fn get(&self, handle: TextureHandle) -> Option<&T> {
        self.entries.get(&handle)
    }

    #[inline]
    pub fn remove(&mut self, handle: TextureHandle) -> Option<T> {
        self.entries.remove(&handle)
    }

    #[inline]
    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every resource and returns how many were released.
    ///
    /// The handle counter is not reset.
    pub fn release_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }
}

impl<T> Default for TextureTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
