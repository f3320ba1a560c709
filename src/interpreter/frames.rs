//! The runtime scope stack.
//!
//! Frames are kept separate from the static scope tree. Each frame points
//! at its parent by index; a function frame's parent is always the global
//! frame, a block frame's parent is the frame that was active when the block
//! started.

use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId(pub usize);

impl FrameId {
    pub const NONE: FrameId = FrameId(0);
    pub const GLOBAL: FrameId = FrameId(1);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub parent: FrameId,
    pub bindings: Vec<(String, Value)>,
}

impl Frame {
    fn new(parent: FrameId) -> Self {
        Frame {
            parent,
            bindings: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameStack {
    frames: Vec<Frame>,
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStack {
    /// A stack holding only the sentinel and the global frame.
    pub fn new() -> Self {
        FrameStack {
            frames: vec![Frame::new(FrameId::NONE), Frame::new(FrameId::NONE)],
        }
    }

    /// Drops every frame but the sentinel and an emptied global frame.
    pub fn reset(&mut self) {
        self.frames.truncate(2);
        self.frames[FrameId::GLOBAL.0].bindings.clear();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The frame statements currently execute in.
    pub fn active(&self) -> FrameId {
        FrameId(self.frames.len() - 1)
    }

    pub fn push(&mut self, parent: FrameId) -> FrameId {
        self.frames.push(Frame::new(parent));
        self.active()
    }

    /// Pops the active frame; the two reserved frames are never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 2 {
            self.frames.pop();
        }
    }

    /// Binds `name` in the active frame. A later binding of the same name in
    /// the same frame hides the earlier one.
    pub fn bind(&mut self, name: &str, value: Value) {
        let active = self.active();
        self.frames[active.0]
            .bindings
            .push((name.to_string(), value));
    }

    fn find(&self, name: &str) -> Option<(usize, usize)> {
        let mut current = self.active();
        while current != FrameId::NONE {
            let frame = self.frames.get(current.0)?;
            if let Some(index) = frame
                .bindings
                .iter()
                .rposition(|(binding, _)| binding == name)
            {
                return Some((current.0, index));
            }
            current = frame.parent;
        }
        None
    }

    /// Looks `name` up from the active frame through its parents.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.find(name)
            .map(|(frame, index)| &self.frames[frame].bindings[index].1)
    }

    /// Overwrites the nearest binding of `name`. Returns `false` when the
    /// name is not bound.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.find(name) {
            Some((frame, index)) => {
                self.frames[frame].bindings[index].1 = value;
                true
            }
            None => false,
        }
    }
}
