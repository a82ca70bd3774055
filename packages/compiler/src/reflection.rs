//! Reflection
//!
//! Resolution of property names to setters that change detection uses to write
//! directive inputs. The view compiler only requests and forwards setters; it never
//! calls them.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{CompilerError, Result};

pub type SetterFn = Arc<dyn Fn(&mut dyn Any, Box<dyn Any>) + Send + Sync>;

/// A setter for one property on directive instances.
#[derive(Clone)]
pub struct Setter {
    property: String,
    func: SetterFn,
}

impl Setter {
    pub fn new(property: impl Into<String>, func: SetterFn) -> Self {
        Setter {
            property: property.into(),
            func,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn set(&self, target: &mut dyn Any, value: Box<dyn Any>) {
        (self.func)(target, value)
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter")
            .field("property", &self.property)
            .finish_non_exhaustive()
    }
}

/// Setters are compared by the property they write; reflectors are expected to
/// resolve a name to the same behavior every time.
impl PartialEq for Setter {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property
    }
}

pub trait Reflector: Send + Sync {
    fn setter(&self, property: &str) -> Result<Setter>;
}

/// A [`Reflector`] backed by explicitly registered setters.
#[derive(Default, Clone)]
pub struct SetterRegistry {
    setters: HashMap<String, SetterFn>,
}

impl SetterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, property: impl Into<String>, func: SetterFn) -> &mut Self {
        self.setters.insert(property.into(), func);
        self
    }

    pub fn with<T, V>(mut self, property: &str, setter: fn(&mut T, V)) -> Self
    where
        T: 'static,
        V: 'static,
    {
        let func: SetterFn = Arc::new(move |target: &mut dyn Any, value: Box<dyn Any>| {
            if let (Some(target), Ok(value)) = (target.downcast_mut::<T>(), value.downcast::<V>()) {
                setter(target, *value);
            }
        });
        self.register(property, func);
        self
    }

    pub fn len(&self) -> usize {
        self.setters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}

impl Reflector for SetterRegistry {
    fn setter(&self, property: &str) -> Result<Setter> {
        self.setters
            .get(property)
            .map(|func| Setter::new(property, func.clone()))
            .ok_or_else(|| CompilerError::MissingSetter {
                property: property.to_string(),
            })
    }
}
