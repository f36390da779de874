use {
    super::keyspec::{KeySpec, Keys},
    crate::{core_editor::SessionState, EditResult, KeyPress},
    std::{fmt, sync::Arc},
};

/// What a handler gets to see about the session for one key press
pub struct EditContext<'a> {
    /// The line under the cursor
    pub line: &'a str,
    /// Snapshot of the whole buffer
    pub lines: &'a [String],
    /// Cursor column in characters
    pub column: usize,
    /// Cursor row
    pub row: usize,
    /// The key press being dispatched
    pub key: &'a KeyPress,
    /// Session state, carried forward whatever the handler returns
    pub state: &'a mut SessionState,
}

/// Function computing the response to a key press
pub type Handler = Arc<dyn Fn(&mut EditContext<'_>) -> EditResult + Send + Sync>;

/// Wrap a closure into a [`Handler`]
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut EditContext<'_>) -> EditResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Ordered bindings from keys to handlers.
///
/// Order is precedence: when several bindings match a key press, every one of their
/// handlers runs and the last result wins. Register catch-all bindings first.
#[derive(Clone, Default)]
pub struct KeyMap {
    bindings: Vec<(Keys, Handler)>,
}

impl fmt::Debug for KeyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bindings.iter().map(|(keys, _)| keys))
            .finish()
    }
}

impl KeyMap {
    /// Empty key map
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding
    ///
    /// Binding keys equal to an existing binding replaces its handler and keeps its position.
    pub fn add_binding(&mut self, keys: impl Into<Keys>, handler: Handler) {
        let keys = keys.into();
        match self.bindings.iter_mut().find(|(bound, _)| *bound == keys) {
            Some(binding) => binding.1 = handler,
            None => self.bindings.push((keys, handler)),
        }
    }

    /// Adds a binding from a closure
    pub fn add_handler<F>(&mut self, keys: impl Into<Keys>, f: F)
    where
        F: Fn(&mut EditContext<'_>) -> EditResult + Send + Sync + 'static,
    {
        self.add_binding(keys, handler(f));
    }

    /// Builder variant of [`KeyMap::add_handler`]
    #[must_use]
    pub fn with_binding<F>(mut self, keys: impl Into<Keys>, f: F) -> Self
    where
        F: Fn(&mut EditContext<'_>) -> EditResult + Send + Sync + 'static,
    {
        self.add_handler(keys, f);
        self
    }

    /// Remove a binding
    ///
    /// Returns the handler if the keys were bound
    pub fn remove_binding(&mut self, keys: impl Into<Keys>) -> Option<Handler> {
        let keys = keys.into();
        let position = self.bindings.iter().position(|(bound, _)| *bound == keys)?;
        Some(self.bindings.remove(position).1)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Expand multi-key bindings in place into one entry per [`KeySpec`]
    pub fn flatten(&self) -> FlatKeyMap {
        let bindings = self
            .bindings
            .iter()
            .flat_map(|(keys, handler)| keys.iter().map(move |spec| (spec.clone(), handler.clone())))
            .collect();
        FlatKeyMap { bindings }
    }
}

/// [`KeyMap`] flattened for dispatch
#[derive(Clone, Default)]
pub struct FlatKeyMap {
    bindings: Vec<(KeySpec, Handler)>,
}

impl fmt::Debug for FlatKeyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bindings.iter().map(|(spec, _)| spec))
            .finish()
    }
}

impl FlatKeyMap {
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Run every handler whose spec matches `context.key`, in order.
    ///
    /// Returns the result of the last one, or `None` if nothing matched.
    pub fn resolve(&self, context: &mut EditContext<'_>) -> Option<EditResult> {
        let mut result = None;
        for (spec, handler) in &self.bindings {
            if spec.matches(context.key) {
                result = Some(handler(context));
            }
        }
        result
    }
}
