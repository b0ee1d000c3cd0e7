//! Attribute resolvers.
//!
//! A resolver enriches subject data before it is tested, e.g. by loading a
//! product record from its id. The engine calls it once at every policy level
//! it visits, so it must be cheap, idempotent and leave unknown types alone.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Fills in or normalizes attributes of subject data.
pub trait Resolver: Send + Sync {
    /// Resolves `subject` in place. Types the resolver does not know are left untouched.
    fn resolve_in_place(&self, subject: &mut dyn Any);
}

impl dyn Resolver + '_ {
    /// Resolves an owned value and hands it back.
    pub fn resolve<T: Any>(&self, mut value: T) -> T {
        self.resolve_in_place(&mut value);
        value
    }
}

/// Clones `data` and runs the optional resolver over the copy.
pub(crate) fn resolved<T: Any + Clone>(data: &T, resolver: Option<&dyn Resolver>) -> T {
    match resolver {
        Some(r) => r.resolve(data.clone()),
        None => data.clone(),
    }
}

// ============================================================================
// ResolverRegistry
// ============================================================================

type ResolveFn = Box<dyn Fn(&mut dyn Any) + Send + Sync>;

/// A resolver dispatching on the concrete subject type.
///
/// ```
/// use alfa_policy::resolver::{Resolver, ResolverRegistry};
///
/// #[derive(Clone)]
/// struct Employee { email: String, division: Option<String> }
///
/// let registry = ResolverRegistry::new().with(|e: &mut Employee| {
///     if e.email == "rockstar@example.com" {
///         e.division = Some("CorpSales".to_string());
///     }
/// });
///
/// let resolver: &dyn Resolver = &registry;
/// let employee = resolver.resolve(Employee { email: "rockstar@example.com".into(), division: None });
/// assert_eq!(employee.division.as_deref(), Some("CorpSales"));
/// ```
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<TypeId, ResolveFn>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the resolution step for `T`, replacing any previous one.
    pub fn with<T, F>(mut self, resolve: F) -> Self
    where
        T: Any,
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.resolvers.insert(
            TypeId::of::<T>(),
            Box::new(move |subject: &mut dyn Any| {
                if let Some(value) = subject.downcast_mut::<T>() {
                    resolve(value);
                }
            }),
        );
        self
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Resolver for ResolverRegistry {
    fn resolve_in_place(&self, subject: &mut dyn Any) {
        if let Some(resolve) = self.resolvers.get(&(*subject).type_id()) {
            resolve(subject);
        }
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("types", &self.resolvers.len())
            .finish()
    }
}
