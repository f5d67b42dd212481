//! Explicit stack of open containers.
//!
//! The decoder never recurses: each `[` or `{` pushes a [`Frame`] and the
//! matching `]` or `}` pops it. The top frame is always the nearest enclosing
//! container of whatever is being decoded. A closed container is attached to
//! its parent at that point, under the key (if any) recorded when it opened.
use crate::value::{Array, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Array,
    Object,
}

impl ContainerKind {
    fn closing(self) -> char {
        match self {
            Self::Array => ']',
            Self::Object => '}',
        }
    }
}

#[derive(Debug)]
enum Container {
    Array(Array),
    Object(Map),
}

impl Container {
    fn into_value(self) -> Value {
        match self {
            Self::Array(vec) => Value::Array(vec),
            Self::Object(map) => Value::Object(map),
        }
    }
}

#[derive(Debug)]
struct Frame {
    /// Key under which the finished container goes into its parent object.
    slot: Option<String>,
    container: Container,
}

/// Why [`ContainerStack::close`] could not pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseError {
    /// Nothing is open.
    Empty,
    /// The delimiter does not match the open container.
    Mismatch,
}

#[derive(Debug, Default)]
pub(crate) struct ContainerStack {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl ContainerStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drops any frames left behind by an earlier read. Finished children
    /// held by those frames are torn down without recursing.
    pub(crate) fn clear(&mut self) {
        for frame in self.frames.drain(..) {
            frame.container.into_value().dismantle();
        }
        self.max_depth = 0;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Deepest nesting reached since the last [`clear`](Self::clear).
    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub(crate) fn top_kind(&self) -> Option<ContainerKind> {
        self.frames.last().map(|f| match f.container {
            Container::Array(_) => ContainerKind::Array,
            Container::Object(_) => ContainerKind::Object,
        })
    }

    fn push(&mut self, slot: Option<String>, container: Container) {
        self.frames.push(Frame { slot, container });
        self.max_depth = self.max_depth.max(self.frames.len());
    }

    pub(crate) fn open_array(&mut self, slot: Option<String>) {
        self.push(slot, Container::Array(Array::new()));
    }

    pub(crate) fn open_object(&mut self, slot: Option<String>) {
        self.push(slot, Container::Object(Map::new()));
    }

    /// Adds a finished value to the top container: by key into an object,
    /// by position into an array. With nothing open the value is discarded.
    pub(crate) fn append(&mut self, key: Option<String>, value: Value) {
        let Some(top) = self.frames.last_mut() else {
            value.dismantle();
            return;
        };
        match (&mut top.container, key) {
            (Container::Object(map), Some(key)) => {
                if let Some(replaced) = map.insert(key, value) {
                    replaced.dismantle();
                }
            }
            (Container::Array(vec), _) => vec.push(value),
            (Container::Object(_), None) => {
                debug_assert!(false, "object entry without a key");
                value.dismantle();
            }
        }
    }

    /// Pops the top container for `delimiter` (`]` or `}`).
    ///
    /// If another container is still open, the popped one is appended to it
    /// and `Ok(None)` is returned; otherwise the popped container is the
    /// finished root and is returned. With `sort_keys`, an object's entries
    /// are put in key order as it closes.
    pub(crate) fn close(&mut self, delimiter: char, sort_keys: bool) -> Result<Option<Value>, CloseError> {
        let kind = self.top_kind().ok_or(CloseError::Empty)?;
        if kind.closing() != delimiter {
            return Err(CloseError::Mismatch);
        }
        let Some(Frame { slot, container }) = self.frames.pop() else {
            return Err(CloseError::Empty);
        };

        let value = match container {
            Container::Object(mut map) if sort_keys => {
                map.sort_keys();
                Value::Object(map)
            }
            other => other.into_value(),
        };

        if self.frames.is_empty() {
            return Ok(Some(value));
        }
        self.append(slot, value);
        Ok(None)
    }
}

impl Drop for ContainerStack {
    fn drop(&mut self) {
        self.clear();
    }
}
