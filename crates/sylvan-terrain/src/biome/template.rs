//! Placeable templates owned by the asset layer.

use std::sync::Arc;

use hashbrown::HashMap;

/// A prefab that placement can clone and transform.
///
/// Implemented by whatever the renderer uses for models. The generator only
/// clones templates and applies a yaw and a uniform scale to the clone.
pub trait Template: Clone + Send + Sync {
    /// Rotate around the vertical axis by `radians`.
    fn rotate_y(&mut self, radians: f64);
    /// Multiply the current scale by `factor`.
    fn scale_uniform(&mut self, factor: f64);
}

/// Name-indexed set of loaded templates.
pub struct TemplateRegistry<T> {
    templates: HashMap<String, Arc<T>>,
}

impl<T> TemplateRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Add or replace a template. Returns the previous template with that name.
    pub fn insert(&mut self, name: impl Into<String>, template: T) -> Option<Arc<T>> {
        self.templates.insert(name.into(), Arc::new(template))
    }

    /// Shared handle to a template.
    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        self.templates.get(name).cloned()
    }

    /// Returns `true` if a template with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered template names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<T> Default for TemplateRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(String, T)> for TemplateRegistry<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(name, t)| (name, Arc::new(t)))
                .collect(),
        }
    }
}
