//! Explicit traversal stack replacing recursion.
//!
//! Holds the ancestors of the frame currently being expanded, root first.
//! Storage is reserved up front to the configured depth; under
//! `FallbackPolicy::Fail` that reservation is a hard limit.

use super::frame::SearchFrame;
use crate::core::FallbackPolicy;
use crate::error::ArenaError;

/// LIFO of search frames.
#[derive(Debug)]
pub struct TraversalStack {
    frames: Vec<SearchFrame>,
    capacity: usize,
    policy: FallbackPolicy,
    peak_depth: usize,
}

impl TraversalStack {
    /// Reserve room for `capacity` frames.
    #[must_use]
    pub fn with_capacity(capacity: usize, policy: FallbackPolicy) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            capacity,
            policy,
            peak_depth: 0,
        }
    }

    /// Make sure one more frame can be pushed.
    ///
    /// Call before giving up ownership of the frame so a refusal leaves the
    /// caller holding it.
    pub fn reserve_slot(&mut self) -> Result<(), ArenaError> {
        if self.frames.len() < self.capacity {
            return Ok(());
        }

        match self.policy {
            FallbackPolicy::Fail => Err(ArenaError::Exhausted {
                pool: "frames",
                capacity: self.capacity,
            }),
            FallbackPolicy::Heap | FallbackPolicy::HeapOnly => {
                tracing::debug!(depth = self.frames.len(), "growing traversal stack");
                self.frames.reserve(self.capacity);
                self.capacity = self.frames.capacity();
                Ok(())
            }
        }
    }

    /// Push a frame, respecting the depth limit.
    pub fn push(&mut self, frame: SearchFrame) -> Result<(), (SearchFrame, ArenaError)> {
        if let Err(err) = self.reserve_slot() {
            return Err((frame, err));
        }

        self.frames.push(frame);
        self.peak_depth = self.peak_depth.max(self.frames.len());
        Ok(())
    }

    /// Pop the most recently pushed frame.
    pub fn pop(&mut self) -> Option<SearchFrame> {
        self.frames.pop()
    }

    /// Whether no frames are waiting.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames waiting; equals the depth of the current frame.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Deepest the stack has been.
    #[inline]
    #[must_use]
    pub fn peak_depth(&self) -> usize {
        self.peak_depth
    }

    /// Frames the stack accepts before the fallback policy applies.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every frame, top first.
    pub fn drain(&mut self) -> impl Iterator<Item = SearchFrame> + '_ {
        self.frames.drain(..).rev()
    }
}
