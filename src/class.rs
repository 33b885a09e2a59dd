//! Class metadata records.
//!
//! One [`ClassInfo`] node exists per reflected class. It owns the property
//! and function descriptors declared on that class and carries a non-owning
//! back-reference to its superclass record, forming an acyclic chain that
//! terminates at the universal root. Member lookup walks that chain, so the
//! nearest declaring class shadows further ones.
//!
//! Records are built during registration and read-only afterward; the
//! directory publishes them as `&'static` (see [`crate::registry`]).

use crate::invoke::Invoker;
use crate::meta::AttributeSet;
use std::collections::HashMap;

/// Metadata for one reflected field.
///
/// `offset` is the byte offset of the field inside the owning type's layout,
/// as reported by `core::mem::offset_of!` at registration time. It is stored
/// as data and never dereferenced by this crate. `type_name` is declaration
/// text, not validated against any real type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub type_name: String,
    pub offset: usize,
    pub meta: AttributeSet,
}

/// Metadata for one reflected callable member plus its type-erased invoker.
///
/// `return_type` and `param_types` are declaration text carried for
/// introspection; the invoker alone knows the concrete signature.
pub struct FunctionInfo {
    pub name: String,
    pub return_type: String,
    pub param_types: Vec<String>,
    pub meta: AttributeSet,
    pub invoker: Invoker,
}

impl std::fmt::Debug for FunctionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionInfo")
            .field("name", &self.name)
            .field("return_type", &self.return_type)
            .field("param_types", &self.param_types)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Per-class reflection metadata node.
#[derive(Debug)]
pub struct ClassInfo {
    pub name: String,
    /// `size_of` the reflected type.
    pub size: usize,
    pub super_class: Option<&'static ClassInfo>,
    properties: Vec<Property>,
    functions: Vec<FunctionInfo>,
    property_map: HashMap<String, usize>,
    function_map: HashMap<String, usize>,
}

impl ClassInfo {
    pub fn new(
        name: impl Into<String>,
        size: usize,
        super_class: Option<&'static ClassInfo>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            super_class,
            properties: Vec::new(),
            functions: Vec::new(),
            property_map: HashMap::new(),
            function_map: HashMap::new(),
        }
    }

    /// Append a property descriptor and map its name to the new index.
    ///
    /// `raw_meta` is run through [`AttributeSet::parse`]. Re-registering a
    /// name points the map at the newer descriptor; the older one stays in
    /// the positional sequence. The map, not the sequence, is authoritative
    /// for lookup.
    pub fn add_property(&mut self, name: &str, type_name: &str, offset: usize, raw_meta: &str) {
        self.properties.push(Property {
            name: name.to_string(),
            type_name: type_name.to_string(),
            offset,
            meta: AttributeSet::parse(raw_meta),
        });
        self.property_map
            .insert(name.to_string(), self.properties.len() - 1);
    }

    /// Append a function descriptor and map its name to the new index.
    /// Same last-write-wins semantics as [`ClassInfo::add_property`].
    pub fn add_function(
        &mut self,
        name: &str,
        return_type: &str,
        param_types: &[&str],
        raw_meta: &str,
        invoker: Invoker,
    ) {
        self.functions.push(FunctionInfo {
            name: name.to_string(),
            return_type: return_type.to_string(),
            param_types: param_types.iter().map(|t| t.to_string()).collect(),
            meta: AttributeSet::parse(raw_meta),
            invoker,
        });
        self.function_map
            .insert(name.to_string(), self.functions.len() - 1);
    }

    /// Find a property by name, walking the superclass chain on a local
    /// miss. `None` only when the root is passed without a match.
    pub fn property(&self, name: &str) -> Option<&Property> {
        if let Some(&idx) = self.property_map.get(name) {
            return Some(&self.properties[idx]);
        }
        self.super_class.and_then(|sup| sup.property(name))
    }

    /// Find a function by name, walking the superclass chain on a local miss.
    pub fn function(&self, name: &str) -> Option<&FunctionInfo> {
        if let Some(&idx) = self.function_map.get(name) {
            return Some(&self.functions[idx]);
        }
        self.super_class.and_then(|sup| sup.function(name))
    }

    /// Own (non-inherited) properties in registration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Own (non-inherited) functions in registration order.
    pub fn functions(&self) -> &[FunctionInfo] {
        &self.functions
    }

    /// Superclass records in order, immediate parent first.
    pub fn parent_chain(&self) -> Vec<&'static ClassInfo> {
        let mut chain = Vec::new();
        let mut current = self.super_class;
        while let Some(cls) = current {
            chain.push(cls);
            current = cls.super_class;
        }
        chain
    }

    /// True if `self` is `ancestor` or inherits from it. Record identity is
    /// pointer identity, since exactly one record exists per class.
    pub fn is_subclass_of(&self, ancestor: &ClassInfo) -> bool {
        if std::ptr::eq(self, ancestor) {
            return true;
        }
        let mut current = self.super_class;
        while let Some(cls) = current {
            if std::ptr::eq::<ClassInfo>(cls, ancestor) {
                return true;
            }
            current = cls.super_class;
        }
        false
    }
}
