use crate::{error::Error, object::ObjectRef};
use sgparam_primitives::PrimitiveType;
use std::{collections::BTreeMap, fmt};

/// Builds a fresh instance of one class.
pub type Constructor = Box<dyn Fn() -> ObjectRef>;

type FactoryKey = (String, Option<PrimitiveType>);

///
/// FactoryBuilder
///
/// Registration phase of an [`ObjectFactory`]. Each `(class, generic)`
/// pair may be registered once.
///

#[derive(Default)]
pub struct FactoryBuilder {
    constructors: BTreeMap<FactoryKey, Constructor>,
}

impl FactoryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        self,
        class_name: &str,
        constructor: impl Fn() -> ObjectRef + 'static,
    ) -> Result<Self, Error> {
        self.insert(class_name, None, Box::new(constructor))
    }

    /// Register a generic class instantiated for one element type.
    pub fn register_generic(
        self,
        class_name: &str,
        generic: PrimitiveType,
        constructor: impl Fn() -> ObjectRef + 'static,
    ) -> Result<Self, Error> {
        self.insert(class_name, Some(generic), Box::new(constructor))
    }

    #[must_use]
    pub fn build(self) -> ObjectFactory {
        ObjectFactory {
            constructors: self.constructors,
        }
    }

    fn insert(
        mut self,
        class_name: &str,
        generic: Option<PrimitiveType>,
        constructor: Constructor,
    ) -> Result<Self, Error> {
        if class_name.is_empty() {
            return Err(Error::factory_invariant("class name must not be empty"));
        }

        let key = (class_name.to_string(), generic);
        if self.constructors.contains_key(&key) {
            return Err(Error::factory_invariant(format!(
                "class `{}` is already registered{}",
                class_name,
                generic.map_or_else(String::new, |g| format!(" for {g}"))
            )));
        }
        self.constructors.insert(key, constructor);

        Ok(self)
    }
}

///
/// ObjectFactory
///
/// Read-only lookup from a stored class name back to a live instance.
///

#[derive(Default)]
pub struct ObjectFactory {
    constructors: BTreeMap<FactoryKey, Constructor>,
}

impl ObjectFactory {
    /// Build a new instance, or `None` if the class is unknown.
    #[must_use]
    pub fn construct(&self, class_name: &str, generic: Option<PrimitiveType>) -> Option<ObjectRef> {
        self.constructors
            .get(&(class_name.to_string(), generic))
            .map(|constructor| constructor())
    }

    #[must_use]
    pub fn contains(&self, class_name: &str, generic: Option<PrimitiveType>) -> bool {
        self.constructors
            .contains_key(&(class_name.to_string(), generic))
    }

    /// Registered class names in sorted order, one per generic variant.
    pub fn class_list(&self) -> impl Iterator<Item = (&str, Option<PrimitiveType>)> {
        self.constructors
            .keys()
            .map(|(name, generic)| (name.as_str(), *generic))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for FactoryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.constructors.keys()).finish()
    }
}

impl fmt::Debug for ObjectFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.constructors.keys()).finish()
    }
}

///
/// TESTS
///
