//! Typed event records.

use std::fmt;

use indexmap::IndexMap;

use crate::value::Value;

/// An attribute map: attribute name to scalar value.
pub type Attrs = IndexMap<String, Value>;

/// An immutable, externally-identified event.
///
/// `id` is assigned by the caller (1-based in the reference test suite);
/// the engine never re-derives or re-orders by it — ordering is always
/// input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: u64,
    pub ty: String,
    pub attrs: Attrs,
}

impl Event {
    pub fn new(id: u64, ty: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            id,
            ty: ty.into(),
            attrs,
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.attrs.get(name).copied()
    }

    /// Render attribute values in the order `schema` lists them for this
    /// event's type, falling back to the event's own attribute insertion
    /// order when the type is absent from `schema`.
    fn ordered_attrs<'a>(&'a self, schema: Option<&'a [String]>) -> Vec<(&'a str, Value)> {
        match schema {
            Some(names) => names
                .iter()
                .filter_map(|n| self.attrs.get(n).map(|v| (n.as_str(), *v)))
                .collect(),
            None => self
                .attrs
                .iter()
                .map(|(k, v)| (k.as_str(), *v))
                .collect(),
        }
    }

    /// `type(id,attr1,attr2,…)` per the canonical textual form.
    pub fn display_with_schema(&self, schema: Option<&[String]>) -> String {
        let mut out = format!("{}({}", self.ty, self.id);
        for (_, v) in self.ordered_attrs(schema) {
            out.push(',');
            out.push_str(&v.to_string());
        }
        out.push(')');
        out
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with_schema(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, Value)]) -> Attrs {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn display_uses_schema_order() {
        let ev = Event::new(
            3,
            "withdraw",
            attrs(&[("price", Value::Int(5)), ("name", Value::Int(1))]),
        );
        let schema = vec!["name".to_string(), "price".to_string()];
        assert_eq!(ev.display_with_schema(Some(&schema)), "withdraw(3,1,5)");
    }

    #[test]
    fn display_without_schema_uses_insertion_order() {
        let ev = Event::new(1, "e", attrs(&[("name", Value::Int(1)), ("price", Value::Int(0))]));
        assert_eq!(ev.display_with_schema(None), "e(1,1,0)");
    }
}
