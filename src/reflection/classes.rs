//! Class, interface, and trait extraction.
//!
//! Each class-like declaration is reflected into a [`ClassReflection`]
//! with its properties and methods in declaration order.  Method bodies
//! are handed to [`super::uses`] so each method carries its own recorded
//! call-sites and hook dispatches.

use mago_span::HasSpan;
use mago_syntax::ast::*;

use crate::types::{
    ClassReflection, MethodReflection, ParameterReflection, PropertyReflection, ScopeUsage,
    Visibility,
};
use crate::util::bytes_to_string;

use super::{ReflectCtx, uses};

/// Recursively walk statements and extract class-like declarations.
/// Handles class-likes at the top level as well as nested inside
/// namespace declarations.
pub(crate) fn extract_classes_from_statements<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    classes: &mut Vec<ClassReflection>,
    ctx: &ReflectCtx<'a>,
) {
    for statement in statements {
        match statement {
            Statement::Class(class) => {
                let extends = class
                    .extends
                    .as_ref()
                    .and_then(|ext| ext.types.first().map(|ident| bytes_to_string(ident.value())));

                let implements: Vec<String> = class
                    .implements
                    .as_ref()
                    .map(|imp| {
                        imp.types
                            .iter()
                            .map(|ident| bytes_to_string(ident.value()))
                            .collect()
                    })
                    .unwrap_or_default();

                let (methods, properties) = extract_class_like_members(class.members.iter(), ctx);
                let (line, end_line) = ctx.line_span(class);

                classes.push(ClassReflection {
                    name: bytes_to_string(class.name.value),
                    line,
                    end_line,
                    is_final: class.modifiers.contains_final(),
                    is_abstract: class.modifiers.contains_abstract(),
                    extends,
                    implements,
                    properties,
                    methods,
                    doc: ctx.docblock_for(class).map(str::to_string),
                });
            }
            Statement::Interface(iface) => {
                // Interfaces use `extends` for parent interfaces; the
                // first one fills the parent slot.
                let extends = iface
                    .extends
                    .as_ref()
                    .and_then(|ext| ext.types.first().map(|ident| bytes_to_string(ident.value())));

                let (methods, properties) = extract_class_like_members(iface.members.iter(), ctx);
                let (line, end_line) = ctx.line_span(iface);

                classes.push(ClassReflection {
                    name: bytes_to_string(iface.name.value),
                    line,
                    end_line,
                    is_final: false,
                    is_abstract: false,
                    extends,
                    implements: vec![],
                    properties,
                    methods,
                    doc: ctx.docblock_for(iface).map(str::to_string),
                });
            }
            Statement::Trait(trait_def) => {
                let (methods, properties) =
                    extract_class_like_members(trait_def.members.iter(), ctx);
                let (line, end_line) = ctx.line_span(trait_def);

                classes.push(ClassReflection {
                    name: bytes_to_string(trait_def.name.value),
                    line,
                    end_line,
                    is_final: false,
                    is_abstract: false,
                    extends: None,
                    implements: vec![],
                    properties,
                    methods,
                    doc: ctx.docblock_for(trait_def).map(str::to_string),
                });
            }
            Statement::Namespace(namespace) => {
                extract_classes_from_statements(namespace.statements().iter(), classes, ctx);
            }
            _ => {}
        }
    }
}

/// Extract methods and properties from class-like members, preserving
/// declaration order.
fn extract_class_like_members<'a>(
    members: impl Iterator<Item = &'a ClassLikeMember<'a>>,
    ctx: &ReflectCtx<'a>,
) -> (Vec<MethodReflection>, Vec<PropertyReflection>) {
    let mut methods = Vec::new();
    let mut properties = Vec::new();

    for member in members {
        match member {
            ClassLikeMember::Method(method) => {
                let uses = match &method.body {
                    MethodBody::Concrete(block) => {
                        uses::collect_scope_usage(block.statements.iter(), ctx)
                    }
                    _ => ScopeUsage::default(),
                };
                let (line, end_line) = ctx.line_span(method);

                methods.push(MethodReflection {
                    name: bytes_to_string(method.name.value),
                    line,
                    end_line,
                    is_final: method.modifiers.contains_final(),
                    is_abstract: method.modifiers.contains_abstract(),
                    is_static: method.modifiers.iter().any(|m| m.is_static()),
                    visibility: extract_visibility(method.modifiers.iter()),
                    arguments: extract_parameters(&method.parameter_list, ctx),
                    doc: ctx.docblock_for(member).map(str::to_string),
                    uses,
                });
            }
            ClassLikeMember::Property(property) => {
                let is_static = property.modifiers().iter().any(|m| m.is_static());
                let visibility = extract_visibility(property.modifiers().iter());
                let doc = ctx.docblock_for(member).map(str::to_string);
                let prop_span = property.span();
                let end_line = ctx.lines.line_of(prop_span.end.offset);

                for var in property.variables().iter() {
                    let raw_name = bytes_to_string(var.name);
                    let name = raw_name.strip_prefix('$').unwrap_or(&raw_name).to_string();
                    let line = ctx.lines.line_of(var.span().start.offset);

                    properties.push(PropertyReflection {
                        name,
                        line,
                        end_line,
                        default: default_after(ctx, var.span().end.offset, prop_span.end.offset),
                        is_static,
                        visibility,
                        doc: doc.clone(),
                    });
                }
            }
            _ => {}
        }
    }

    (methods, properties)
}

/// Extract visibility from a set of modifiers.
/// Defaults to `Public` if no visibility modifier is present.
pub(crate) fn extract_visibility<'a>(
    modifiers: impl Iterator<Item = &'a Modifier<'a>>,
) -> Visibility {
    for m in modifiers {
        if m.is_private() {
            return Visibility::Private;
        }
        if m.is_protected() {
            return Visibility::Protected;
        }
        if m.is_public() {
            return Visibility::Public;
        }
    }
    Visibility::Public
}

/// Extract parameter information from a parameter list.
pub(crate) fn extract_parameters<'a>(
    parameter_list: &'a FunctionLikeParameterList<'a>,
    ctx: &ReflectCtx<'a>,
) -> Vec<ParameterReflection> {
    parameter_list
        .parameters
        .iter()
        .map(|param| {
            let default = param
                .default_value
                .as_ref()
                .map(|dv| default_value_source(ctx, dv.span()));

            ParameterReflection {
                name: bytes_to_string(param.variable.name),
                default,
                type_hint: param.hint.as_ref().map(extract_hint_string),
            }
        })
        .collect()
}

/// Extract a string representation of a type hint from the AST.
pub(crate) fn extract_hint_string(hint: &Hint<'_>) -> String {
    match hint {
        Hint::Identifier(ident) => bytes_to_string(ident.value()),
        Hint::Nullable(nullable) => format!("?{}", extract_hint_string(nullable.hint)),
        Hint::Union(union) => {
            let left = extract_hint_string(union.left);
            let right = extract_hint_string(union.right);
            format!("{}|{}", left, right)
        }
        Hint::Intersection(intersection) => {
            let left = extract_hint_string(intersection.left);
            let right = extract_hint_string(intersection.right);
            format!("{}&{}", left, right)
        }
        Hint::Void(ident)
        | Hint::Never(ident)
        | Hint::Float(ident)
        | Hint::Bool(ident)
        | Hint::Integer(ident)
        | Hint::String(ident)
        | Hint::Object(ident)
        | Hint::Mixed(ident)
        | Hint::Iterable(ident) => bytes_to_string(ident.value),
        Hint::Null(keyword)
        | Hint::True(keyword)
        | Hint::False(keyword)
        | Hint::Array(keyword)
        | Hint::Callable(keyword)
        | Hint::Static(keyword)
        | Hint::Self_(keyword)
        | Hint::Parent(keyword) => bytes_to_string(keyword.value),
        Hint::Parenthesized(paren) => format!("({})", extract_hint_string(paren.hint)),
    }
}

/// The source text of a default-value node with the leading `=` stripped.
fn default_value_source(ctx: &ReflectCtx<'_>, span: mago_span::Span) -> String {
    ctx.source_of(span)
        .trim_start_matches('=')
        .trim()
        .to_string()
}

/// Read a property default from the source between the variable name and
/// the end of the declaration.  Multi-variable declarations split on the
/// separating comma.
fn default_after(ctx: &ReflectCtx<'_>, from: u32, to: u32) -> Option<String> {
    let tail = ctx
        .content
        .get(from as usize..to as usize)
        .unwrap_or("")
        .trim_start();
    let rest = tail.strip_prefix('=')?;
    let value = rest.split([',', ';']).next().unwrap_or(rest).trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
