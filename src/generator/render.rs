//! Text rendering of projected declarations.
//!
//! Declarations are written as TypeScript-style interfaces with inline object
//! types, which every supported validator generator accepts as input.

use super::projector::{FieldDecl, TypeDecl, TypeExpr};
use crate::ident::property_name;

/// Indentation of one nesting level.
pub const INDENT: &str = "  ";

/// Render a type expression on a single line.
pub fn render_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Verbatim(text) | TypeExpr::Reference(text) => text.clone(),
        TypeExpr::Object(fields) if fields.is_empty() => "{}".to_string(),
        TypeExpr::Object(fields) => {
            let body: Vec<String> = fields.iter().map(render_member).collect();
            format!("{{ {} }}", body.join("; "))
        }
        TypeExpr::Generic { name, args } => {
            let args: Vec<String> = args.iter().map(render_type).collect();
            format!("{name}<{}>", args.join(", "))
        }
        TypeExpr::Array(element) => match element.as_ref() {
            TypeExpr::Union(_) => format!("({})[]", render_type(element)),
            _ => format!("{}[]", render_type(element)),
        },
        TypeExpr::Union(members) => members
            .iter()
            .map(render_type)
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn render_member(field: &FieldDecl) -> String {
    format!(
        "{}{}: {}",
        property_name(&field.name),
        if field.optional { "?" } else { "" },
        render_type(&field.ty)
    )
}

/// Render a declaration as an exported interface, indented by `depth` levels.
pub fn render_declaration(decl: &TypeDecl, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    let mut out = format!("{pad}export interface {} {{\n", decl.name);
    for field in &decl.fields {
        out.push_str(&format!("{pad}{INDENT}{};\n", render_member(field)));
    }
    out.push_str(&format!("{pad}}}\n"));
    out
}

/// Render the shared lazy collection container: a generic wrapper around the
/// items of a to-many relation that may not be loaded yet.
pub fn render_collection_declaration(name: &str, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    format!("{pad}export interface {name}<T> {{\n{pad}{INDENT}items: T[];\n{pad}}}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::projector::DeclKind;

    fn field(name: &str, optional: bool, ty: TypeExpr) -> FieldDecl {
        FieldDecl {
            name: name.to_string(),
            optional,
            ty,
        }
    }

    #[test]
    fn test_render_many_union() {
        let element = TypeExpr::Reference("PostPartial".to_string());
        let ty = TypeExpr::Union(vec![
            TypeExpr::Generic {
                name: "Collection".to_string(),
                args: vec![element.clone()],
            },
            TypeExpr::Array(Box::new(element)),
        ]);
        assert_eq!(render_type(&ty), "Collection<PostPartial> | PostPartial[]");
    }

    #[test]
    fn test_render_inline_objects() {
        let stub = TypeExpr::Object(vec![field(
            "id",
            false,
            TypeExpr::Verbatim("number".to_string()),
        )]);
        assert_eq!(render_type(&stub), "{ id: number }");
        assert_eq!(render_type(&TypeExpr::Object(Vec::new())), "{}");
        assert_eq!(
            render_type(&TypeExpr::Array(Box::new(TypeExpr::Union(vec![
                TypeExpr::Verbatim("A".to_string()),
                TypeExpr::Verbatim("B".to_string()),
            ])))),
            "(A | B)[]"
        );
    }

    #[test]
    fn test_render_declaration() {
        let decl = TypeDecl {
            name: "User".to_string(),
            entity: "User".to_string(),
            kind: DeclKind::Main,
            fields: vec![
                field("id", false, TypeExpr::Verbatim("number".to_string())),
                field("created-at", true, TypeExpr::Verbatim("Date".to_string())),
            ],
        };
        assert_eq!(
            render_declaration(&decl, 1),
            "  export interface User {\n    id: number;\n    \"created-at\"?: Date;\n  }\n"
        );
    }

    #[test]
    fn test_render_collection_declaration() {
        assert_eq!(
            render_collection_declaration("Collection", 0),
            "export interface Collection<T> {\n  items: T[];\n}\n"
        );
    }
}
