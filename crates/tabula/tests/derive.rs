use std::sync::Arc;

use tabula::Recordable;
use tabula_reflect::{Reflect, Type, Value};

#[derive(Recordable)]
struct Plain {
    id: u32,
    label: String,
}

#[derive(Recordable)]
#[record(rename_all = "camelCase")]
struct Renamed {
    first_name: String,
    #[record(rename = "Family")]
    last_name: String,
    #[record(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
    r#type: String,
}

#[derive(Recordable)]
struct Docs {
    /// Line one
    /// and line two.
    a: bool,
    /// Ignored
    #[record(doc = "Explicit")]
    b: bool,
    c: bool,
}

#[derive(Recordable)]
struct Wrapper<T> {
    inner: T,
    tags: Option<Vec<String>>,
}

#[derive(Recordable)]
#[record(rename_all = "SCREAMING_SNAKE_CASE")]
struct Nested {
    plain: Plain,
    maybe: Option<Plain>,
}

#[derive(Recordable)]
struct Node {
    name: String,
    #[record(skip)]
    #[allow(dead_code)]
    children: Vec<Node>,
}

#[test]
fn field_names_follow_declaration_order() {
    let shape = Plain::shape();
    assert_eq!(shape.name(), Some("Plain"));
    assert_eq!(shape.field_names().collect::<Vec<_>>(), ["id", "label"]);
    assert_eq!(shape.fields()[0].ty, Type::Uint("u32"));
    assert_eq!(shape.fields()[1].ty, Type::Str);
}

#[test]
fn values_line_up_with_the_shape() {
    let v = Plain {
        id: 7,
        label: "seven".into(),
    }
    .reflect();
    let record = v.as_record().unwrap();
    assert_eq!(record.get("id"), Some(&Value::Uint(7)));
    assert_eq!(record.get("label"), Some(&Value::from("seven")));
}

#[test]
fn renames_and_skips() {
    let shape = Renamed::shape();
    assert_eq!(
        shape.field_names().collect::<Vec<_>>(),
        ["firstName", "Family", "type"]
    );
    let v = Renamed {
        first_name: "Gaius".into(),
        last_name: "Caesar".into(),
        cache: vec![1, 2, 3],
        r#type: "consul".into(),
    }
    .reflect();
    assert_eq!(v.to_string(), "{Gaius Caesar consul}");
}

#[test]
fn doc_comments_and_doc_attributes() {
    let shape = Docs::shape();
    let docs: Vec<Option<&str>> = shape.fields().iter().map(|f| f.doc.as_deref()).collect();
    assert_eq!(docs, [Some("Line one and line two."), Some("Explicit"), None]);
}

#[test]
fn shapes_are_shared() {
    assert!(Arc::ptr_eq(&Plain::shape(), &Plain::shape()));
    let a = Plain {
        id: 1,
        label: String::new(),
    }
    .reflect();
    assert!(Arc::ptr_eq(a.as_record().unwrap().shape(), &Plain::shape()));
}

#[test]
fn generic_structs() {
    let shape = Wrapper::<i16>::shape();
    assert_eq!(shape.fields()[0].ty, Type::Int("i16"));
    assert_eq!(
        shape.fields()[1].ty,
        Type::option(Type::seq(Type::Str))
    );

    let v = Wrapper {
        inner: 3u8,
        tags: None,
    }
    .reflect();
    let record = v.as_record().unwrap();
    assert_eq!(record.get("inner"), Some(&Value::Uint(3)));
    assert!(record.get("tags").unwrap().is_null());
}

#[test]
fn nested_records_resolve_by_path() {
    let v = Nested {
        plain: Plain {
            id: 1,
            label: "one".into(),
        },
        maybe: None,
    }
    .reflect();
    let record = v.as_record().unwrap();
    assert_eq!(record.resolve("PLAIN.label").unwrap(), &Value::from("one"));

    let shape = Nested::shape();
    assert_eq!(shape.resolve("MAYBE.id").unwrap().ty, Type::Uint("u32"));
}

#[test]
fn describe_uses_the_struct_name() {
    let out = tabula::render_to_string("t", "{{ describe(data) }}", &Vec::<Nested>::new(), None)
        .unwrap();
    assert_eq!(
        out,
        "Vec<struct Nested {\n\tPLAIN Plain\n\tMAYBE Option<Plain>\n}>"
    );
}

#[test]
fn skipped_self_references_do_not_recurse() {
    let tree = vec![Node {
        name: "root".into(),
        children: vec![Node {
            name: "leaf".into(),
            children: Vec::new(),
        }],
    }];
    assert_eq!(Node::shape().field_names().collect::<Vec<_>>(), ["name"]);
    let out = tabula::render_to_string("t", "{{ select(data, 'name') }}", &tree, None).unwrap();
    assert_eq!(out, "root\n");
}
