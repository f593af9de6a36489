//! The generic record shape consumed from the repository layer.

use crate::settings::Settings;
use indexmap::IndexMap;

/// A scalar attribute value (IDs, dates, numeric codes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Int(i64),
    Text(String),
}

impl Attribute {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attribute::Text(s) => Some(s),
            Attribute::Int(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Attribute::Int(i) => Some(*i),
            Attribute::Text(_) => None,
        }
    }
}

impl From<i64> for Attribute {
    fn from(value: i64) -> Self {
        Attribute::Int(value)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Text(value.to_string())
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        Attribute::Text(value)
    }
}

/// A related entity or an ordered sequence of related entities.
///
/// Sequences keep the order the repository delivered them in; contributor
/// ordering is significant.
#[derive(Debug, Clone, PartialEq)]
pub enum Associated {
    One(Entity),
    Many(Vec<Entity>),
}

/// A generic record: flat scalar attributes, locale-keyed settings and named
/// associated items. Immutable once loaded; the builder methods exist for
/// request-scoped assembly only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    pub attributes: IndexMap<String, Attribute>,
    pub settings: Settings,
    associated: IndexMap<String, Associated>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Attribute>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_one(mut self, relation: impl Into<String>, entity: Entity) -> Self {
        self.associated
            .insert(relation.into(), Associated::One(entity));
        self
    }

    pub fn with_many(mut self, relation: impl Into<String>, entities: Vec<Entity>) -> Self {
        self.associated
            .insert(relation.into(), Associated::Many(entities));
        self
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Attribute::as_str)
    }

    pub fn attr_i64(&self, name: &str) -> Option<i64> {
        self.attributes.get(name).and_then(Attribute::as_i64)
    }

    /// The single related entity for a relation, if present.
    pub fn one(&self, relation: &str) -> Option<&Entity> {
        match self.associated.get(relation) {
            Some(Associated::One(entity)) => Some(entity),
            _ => None,
        }
    }

    /// The related entities for a relation; empty when the relation is
    /// absent or holds a single item.
    pub fn many(&self, relation: &str) -> &[Entity] {
        match self.associated.get(relation) {
            Some(Associated::Many(entities)) => entities,
            _ => &[],
        }
    }
}
