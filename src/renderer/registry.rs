use super::ObjectRenderer;
use crate::core::{Category, Value};
use crate::error::Error;
use crate::Result;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// What a custom renderer is registered for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RendererTarget {
    /// Every value of a category.
    Category(Category),
    /// [`Opaque`](crate::Opaque) values of one Rust type. `name` is only
    /// used for display; matching compares `id`.
    Type { id: TypeId, name: &'static str },
}

impl RendererTarget {
    /// Targets opaque values wrapping `T`.
    pub fn type_of<T: Any>() -> Self {
        RendererTarget::Type {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (RendererTarget::Category(category), value) => value.category() == *category,
            (RendererTarget::Type { id, .. }, Value::Opaque(opaque)) => opaque.payload_type_id() == *id,
            (RendererTarget::Type { .. }, _) => false,
        }
    }
}

impl From<Category> for RendererTarget {
    fn from(category: Category) -> Self {
        RendererTarget::Category(category)
    }
}

impl fmt::Display for RendererTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererTarget::Category(category) => write!(f, "category:{category}"),
            RendererTarget::Type { name, .. } => write!(f, "type:{name}"),
        }
    }
}

#[derive(Clone)]
pub(crate) struct Registration {
    target: RendererTarget,
    priority: i32,
    seq: u64,
    renderer: Arc<dyn ObjectRenderer>,
}

/// Picks the best custom renderer for `value`.
///
/// `registrations` is kept ordered by priority (descending) and then
/// registration order, so the first match wins.
pub(crate) fn select_renderer<'r>(
    registrations: &'r [Registration],
    value: &Value,
) -> Option<&'r dyn ObjectRenderer> {
    registrations
        .iter()
        .find(|r| r.target.matches(value) && r.renderer.supports(value))
        .map(|r| r.renderer.as_ref())
}

/// Custom renderers, ranked above the built-ins.
///
/// Readers take a cheap snapshot of the current registrations and never
/// block each other; writers copy, modify and swap the list.
#[derive(Default)]
pub struct RendererRegistry {
    registrations: RwLock<Arc<Vec<Registration>>>,
    next_seq: AtomicU64,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `renderer` for `target` at the renderer's own priority.
    ///
    /// Renderers with a blank name are rejected.
    pub fn register<R>(&self, target: impl Into<RendererTarget>, renderer: R) -> Result<()>
    where
        R: ObjectRenderer + 'static,
    {
        self.register_shared(target, Arc::new(renderer))
    }

    pub fn register_shared(
        &self,
        target: impl Into<RendererTarget>,
        renderer: Arc<dyn ObjectRenderer>,
    ) -> Result<()> {
        if renderer.name().trim().is_empty() {
            return Err(Error::InvalidRenderer(
                "renderer name must not be blank".to_string(),
            ));
        }

        let registration = Registration {
            target: target.into(),
            priority: renderer.priority(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            renderer,
        };
        tracing::debug!(
            renderer = registration.renderer.name(),
            target = %registration.target,
            priority = registration.priority,
            "Registering renderer"
        );

        self.update(|list| {
            list.push(registration);
            list.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.seq.cmp(&b.seq)));
        });
        Ok(())
    }

    /// Removes every registration named `name`. Returns whether any existed.
    pub fn unregister(&self, name: &str) -> bool {
        let mut removed = false;
        self.update(|list| {
            let before = list.len();
            list.retain(|r| r.renderer.name() != name);
            removed = list.len() != before;
        });
        if removed {
            tracing::debug!(renderer = name, "Unregistered renderer");
        }
        removed
    }

    pub fn has_renderer(&self, name: &str) -> bool {
        self.snapshot().iter().any(|r| r.renderer.name() == name)
    }

    /// Names in dispatch order.
    pub fn renderer_names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|r| r.renderer.name().to_string())
            .collect()
    }

    /// Custom renderer that would handle `value`; `None` means a built-in does.
    pub fn resolve(&self, value: &Value) -> Option<Arc<dyn ObjectRenderer>> {
        self.snapshot()
            .iter()
            .find(|r| r.target.matches(value) && r.renderer.supports(value))
            .map(|r| Arc::clone(&r.renderer))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Drops every custom renderer.
    pub fn clear(&self) {
        self.update(Vec::clear);
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<Registration>> {
        let guard = self
            .registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn update(&self, f: impl FnOnce(&mut Vec<Registration>)) {
        let mut guard = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.as_ref().clone();
        f(&mut next);
        *guard = Arc::new(next);
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("renderers", &self.renderer_names())
            .finish()
    }
}
