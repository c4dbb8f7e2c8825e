//! Serde support for the dynamic element tree.
//!
//! With the `serde` feature enabled, [`Element`] implements [`Serialize`] so
//! a decoded tree can be handed to any serde-based consumer. Scalars
//! serialize as strings, since the dynamic tree is untyped.
//!
//! # Examples
//!
//! ```
//! let doc = yamlet::from_str("a: 1\nb: two")?;
//! let value = serde_yaml::to_value(&doc)?;
//! assert_eq!(value["b"], serde_yaml::Value::from("two"));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::element::Element;

impl Serialize for Element {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Element::Null => serializer.serialize_none(),
            Element::Scalar(text, ..) => serializer.serialize_str(text),
            Element::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;

                for item in items {
                    seq.serialize_element(item)?;
                }

                seq.end()
            }
            Element::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;

                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }

                map.end()
            }
        }
    }
}
