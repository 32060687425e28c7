//! Type declarations for `describe` and usage text.

use tabula_reflect::{FieldDescriptor, Shape, Type, Value};

use crate::util::{display_width, pad_right};

/// Renders the declared type of a value.
///
/// ```rust
/// use tabula_reflect::{Seq, Type, Value};
/// use tabula_render::describe;
///
/// let v = Value::Seq(Seq::empty(Type::Uint("u32")));
/// assert_eq!(describe(&v), "Vec<u32>");
/// ```
pub fn describe(value: &Value) -> String {
    describe_type(&value.type_of(), false)
}

/// Renders a type as an indented declaration.
///
/// The outermost record is always expanded; nested named records are shown
/// by name and nested anonymous records are expanded in place. With
/// `with_docs`, documented fields get an aligned `// doc` comment.
pub fn describe_type(ty: &Type, with_docs: bool) -> String {
    render(ty, 0, true, with_docs)
}

fn render(ty: &Type, depth: usize, expand_named: bool, with_docs: bool) -> String {
    match ty {
        Type::Record(shape) if expand_named || shape.name().is_none() => {
            render_struct(shape, depth, with_docs)
        }
        Type::Seq(elem) => format!("Vec<{}>", render(elem, depth, expand_named, with_docs)),
        Type::Option(inner) => format!("Option<{}>", render(inner, depth, expand_named, with_docs)),
        other => other.name(),
    }
}

fn render_struct(shape: &Shape, depth: usize, with_docs: bool) -> String {
    let indent = "\t".repeat(depth + 1);
    let mut out = match shape.name() {
        Some(name) => format!("struct {name} {{\n"),
        None => "struct {\n".to_string(),
    };

    let types: Vec<String> = shape
        .fields()
        .iter()
        .map(|f| render(&f.ty, depth + 1, false, with_docs))
        .collect();
    let name_width = shape
        .field_names()
        .map(display_width)
        .max()
        .unwrap_or(0);
    let type_width = types
        .iter()
        .filter(|t| !t.contains('\n'))
        .map(|t| display_width(t))
        .max()
        .unwrap_or(0);

    for (field, ty) in shape.fields().iter().zip(&types) {
        out.push_str(&indent);
        out.push_str(&pad_right(&field.name, name_width + 1));
        match doc_of(field, with_docs) {
            Some(doc) if !ty.contains('\n') => {
                out.push_str(&pad_right(ty, type_width + 1));
                out.push_str("// ");
                out.push_str(doc);
            }
            Some(doc) => {
                out.push_str(ty);
                out.push_str(" // ");
                out.push_str(doc);
            }
            None => out.push_str(ty),
        }
        out.push('\n');
    }

    out.push_str(&"\t".repeat(depth));
    out.push('}');
    out
}

fn doc_of(field: &FieldDescriptor, with_docs: bool) -> Option<&str> {
    if with_docs {
        field.doc.as_deref()
    } else {
        None
    }
}
