use anyhow::Result;

use yamlet::schema::{Descriptor, Entry, Kind, PrimitiveKind, Sink, Source};
use yamlet::{Config, Error};

struct Leaf(PrimitiveKind);

impl Descriptor for Leaf {
    fn kind(&self) -> Kind {
        Kind::Primitive(self.0)
    }
}

const INT: Leaf = Leaf(PrimitiveKind::Int);
const STR: Leaf = Leaf(PrimitiveKind::Str);

struct ClassDesc {
    fields: &'static [(&'static str, &'static dyn Descriptor)],
}

impl Descriptor for ClassDesc {
    fn kind(&self) -> Kind {
        Kind::Class
    }

    fn element_count(&self) -> usize {
        self.fields.len()
    }

    fn element_name(&self, index: usize) -> &str {
        self.fields[index].0
    }

    fn element_descriptor(&self, index: usize) -> &dyn Descriptor {
        self.fields[index].1
    }
}

struct ListDesc(&'static dyn Descriptor);

impl Descriptor for ListDesc {
    fn kind(&self) -> Kind {
        Kind::List
    }

    fn element_descriptor(&self, _: usize) -> &dyn Descriptor {
        self.0
    }
}

struct MapDesc(&'static dyn Descriptor, &'static dyn Descriptor);

impl Descriptor for MapDesc {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn element_descriptor(&self, index: usize) -> &dyn Descriptor {
        if index == 0 {
            self.0
        } else {
            self.1
        }
    }
}

/// A decoded value, built back up from sink calls.
#[derive(Debug, PartialEq)]
enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Class(Vec<(String, Value)>),
    Map(Vec<(String, Value)>),
    List(Vec<Value>),
}

enum Node {
    Class(Vec<(String, Value)>),
    Map(Vec<(String, Value)>),
    List(Vec<Value>),
}

/// Builds a [`Value`] tree from sink calls.
#[derive(Default)]
struct Builder {
    stack: Vec<(Option<String>, Node)>,
    label: Option<String>,
    result: Option<Value>,
}

impl Builder {
    fn put(&mut self, value: Value) {
        match self.stack.last_mut() {
            Some((_, Node::Class(fields) | Node::Map(fields))) => {
                let label = self.label.take().unwrap_or_default();
                fields.push((label, value));
            }
            Some((_, Node::List(items))) => items.push(value),
            None => self.result = Some(value),
        }
    }

    fn begin(&mut self, node: Node) {
        let label = self.label.take();
        self.stack.push((label, node));
    }
}

impl Sink for Builder {
    fn put_null(&mut self) -> Result<(), Error> {
        self.put(Value::Null);
        Ok(())
    }

    fn put_bool(&mut self, value: bool) -> Result<(), Error> {
        self.put(Value::Bool(value));
        Ok(())
    }

    fn put_int(&mut self, value: i64) -> Result<(), Error> {
        self.put(Value::Int(value));
        Ok(())
    }

    fn put_float(&mut self, value: f64) -> Result<(), Error> {
        self.put(Value::Float(value));
        Ok(())
    }

    fn put_str(&mut self, value: &str) -> Result<(), Error> {
        self.put(Value::Str(value.to_string()));
        Ok(())
    }

    fn put_char(&mut self, value: char) -> Result<(), Error> {
        self.put(Value::Str(value.to_string()));
        Ok(())
    }

    fn begin_class(&mut self) -> Result<(), Error> {
        self.begin(Node::Class(Vec::new()));
        Ok(())
    }

    fn begin_map(&mut self) -> Result<(), Error> {
        self.begin(Node::Map(Vec::new()));
        Ok(())
    }

    fn begin_list(&mut self) -> Result<(), Error> {
        self.begin(Node::List(Vec::new()));
        Ok(())
    }

    fn end_composite(&mut self) -> Result<(), Error> {
        let (label, node) = self.stack.pop().expect("balanced composites");

        let value = match node {
            Node::Class(fields) => Value::Class(fields),
            Node::Map(fields) => Value::Map(fields),
            Node::List(items) => Value::List(items),
        };

        self.label = label;
        self.put(value);
        Ok(())
    }

    fn field(&mut self, _: usize, name: &str) -> Result<(), Error> {
        self.label = Some(name.to_string());
        Ok(())
    }

    fn key(&mut self, key: &str) -> Result<(), Error> {
        self.label = Some(key.to_string());
        Ok(())
    }
}

static BOT: ClassDesc = ClassDesc {
    fields: &[("account", &INT), ("password", &STR)],
};

static OWNER: ClassDesc = ClassDesc {
    fields: &[("account", &INT)],
};

static CONFIG: ClassDesc = ClassDesc {
    fields: &[("bot", &BOT), ("owner", &OWNER)],
};

#[test]
fn nested_classes_decode() -> Result<()> {
    let input = "bot:\n  account: 12345678910\n  password: \"=w==w==w=\"\nowner:\n  account: 12345678910";

    let mut builder = Builder::default();
    yamlet::decode_with(input, &CONFIG, &mut builder)?;

    let expected = Value::Class(vec![
        (
            "bot".to_string(),
            Value::Class(vec![
                ("account".to_string(), Value::Int(12345678910)),
                ("password".to_string(), Value::Str("=w==w==w=".to_string())),
            ]),
        ),
        (
            "owner".to_string(),
            Value::Class(vec![("account".to_string(), Value::Int(12345678910))]),
        ),
    ]);

    assert_eq!(builder.result, Some(expected));
    Ok(())
}

static STR_MAP: MapDesc = MapDesc(&STR, &STR);
static STR_LIST: ListDesc = ListDesc(&STR);

static TEST_DATA: ClassDesc = ClassDesc {
    fields: &[
        ("nullable", &STR),
        ("nonnull", &STR),
        ("nullableMap", &STR_MAP),
        ("nullableList", &STR_LIST),
    ],
};

struct TestData;

impl Source for TestData {
    fn entry_count(&self) -> usize {
        4
    }

    fn entry(&self, index: usize) -> Entry<'_> {
        match index {
            1 => Entry::Str("value".into()),
            _ => Entry::Null,
        }
    }
}

#[test]
fn nullable_fields_encode_and_redecode() -> Result<()> {
    let out = yamlet::encode_with(&Config::default(), &TEST_DATA, &TestData)?;
    assert_eq!(
        out,
        "nullable: null\nnonnull: value\nnullableMap: null\nnullableList: null\n"
    );

    let mut builder = Builder::default();
    yamlet::decode_with(&out, &TEST_DATA, &mut builder)?;

    let expected = Value::Class(vec![
        ("nullable".to_string(), Value::Null),
        ("nonnull".to_string(), Value::Str("value".to_string())),
        ("nullableMap".to_string(), Value::Null),
        ("nullableList".to_string(), Value::Null),
    ]);

    assert_eq!(builder.result, Some(expected));
    Ok(())
}

static ROW: ClassDesc = ClassDesc {
    fields: &[("a", &INT), ("b", &INT)],
};

static ROW_LIST: ListDesc = ListDesc(&ROW);

static TABLE: ClassDesc = ClassDesc {
    fields: &[("t", &ROW_LIST)],
};

struct RowValues;

impl Source for RowValues {
    fn entry_count(&self) -> usize {
        2
    }

    fn entry(&self, index: usize) -> Entry<'_> {
        Entry::Int(index as i64 + 1)
    }
}

struct Rows;

impl Source for Rows {
    fn entry_count(&self) -> usize {
        1
    }

    fn entry(&self, _: usize) -> Entry<'_> {
        Entry::Nested(&RowValues)
    }
}

struct Table;

impl Source for Table {
    fn entry_count(&self) -> usize {
        1
    }

    fn entry(&self, _: usize) -> Entry<'_> {
        Entry::Nested(&Rows)
    }
}

/// The `- ` items of a block sequence under a mapping key sit at the key's
/// own column.
#[test]
fn list_in_class_emits_at_key_column() -> Result<()> {
    let out = yamlet::encode_with(&Config::default(), &TABLE, &Table)?;
    assert_eq!(out, "t:\n- a: 1\n  b: 2\n");

    let mut builder = Builder::default();
    yamlet::decode_with(&out, &TABLE, &mut builder)?;

    let expected = Value::Class(vec![(
        "t".to_string(),
        Value::List(vec![Value::Class(vec![
            ("a".to_string(), Value::Int(1)),
            ("b".to_string(), Value::Int(2)),
        ])]),
    )]);

    assert_eq!(builder.result, Some(expected));
    Ok(())
}

static INT_LIST: ListDesc = ListDesc(&INT);

static NUMS: ClassDesc = ClassDesc {
    fields: &[("nums", &INT_LIST)],
};

struct Nums;

impl Source for Nums {
    fn entry_count(&self) -> usize {
        1
    }

    fn entry(&self, _: usize) -> Entry<'_> {
        struct Items;

        impl Source for Items {
            fn entry_count(&self) -> usize {
                3
            }

            fn entry(&self, index: usize) -> Entry<'_> {
                Entry::Int(index as i64 + 1)
            }
        }

        Entry::Nested(&Items)
    }
}

/// With the automatic list layout, primitive element types go flow and
/// composite element types go block.
#[test]
fn auto_list_layout_follows_element_kind() -> Result<()> {
    let out = yamlet::encode_with(&Config::default(), &NUMS, &Nums)?;
    assert_eq!(out, "nums: [ 1, 2, 3 ]\n");

    let out = yamlet::encode_with(&Config::default(), &TABLE, &Table)?;
    assert_eq!(out, "t:\n- a: 1\n  b: 2\n");
    Ok(())
}

#[test]
fn map_round_trip() -> Result<()> {
    static SCORES: MapDesc = MapDesc(&STR, &INT);

    struct Scores;

    impl Source for Scores {
        fn entry_count(&self) -> usize {
            2
        }

        fn entry_key(&self, index: usize) -> &str {
            ["alice", "bob"][index]
        }

        fn entry(&self, index: usize) -> Entry<'_> {
            Entry::Int([3, 5][index])
        }
    }

    let out = yamlet::encode_with(&Config::default(), &SCORES, &Scores)?;
    assert_eq!(out, "alice: 3\nbob: 5\n");

    let mut builder = Builder::default();
    yamlet::decode_with(&out, &SCORES, &mut builder)?;

    let expected = Value::Map(vec![
        ("alice".to_string(), Value::Int(3)),
        ("bob".to_string(), Value::Int(5)),
    ]);

    assert_eq!(builder.result, Some(expected));
    Ok(())
}
