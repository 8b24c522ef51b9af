//! Standalone function, include, and constant extraction.
//!
//! Functions are collected from the top level, from namespace bodies,
//! from block statements, and from `if` guards (the common
//! `if (!function_exists('foo')) { function foo() {} }` pattern).
//! Constants come from `define()` calls and `const` declarations;
//! includes from the four `include`/`require` construct flavours.

use mago_span::HasSpan;
use mago_syntax::ast::*;

use crate::types::{ConstantReflection, FunctionReflection, IncludeKind, IncludeReflection};

use super::{ReflectCtx, classes, uses};
use crate::util::bytes_to_string;

/// Extract standalone function definitions from a sequence of statements.
pub(crate) fn extract_functions_from_statements<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    functions: &mut Vec<FunctionReflection>,
    ctx: &ReflectCtx<'a>,
) {
    for statement in statements {
        match statement {
            Statement::Function(func) => {
                let (line, end_line) = ctx.line_span(func);

                functions.push(FunctionReflection {
                    name: bytes_to_string(func.name.value),
                    line,
                    end_line,
                    arguments: classes::extract_parameters(&func.parameter_list, ctx),
                    doc: ctx.docblock_for(func).map(str::to_string),
                    uses: uses::collect_scope_usage(func.body.statements.iter(), ctx),
                });
            }
            Statement::Namespace(namespace) => {
                extract_functions_from_statements(namespace.statements().iter(), functions, ctx);
            }
            Statement::Block(block) => {
                extract_functions_from_statements(block.statements.iter(), functions, ctx);
            }
            Statement::If(if_stmt) => {
                each_if_statement(&if_stmt.body, &mut |stmt| {
                    extract_functions_from_statements(std::iter::once(stmt), functions, ctx);
                });
            }
            _ => {}
        }
    }
}

/// Walk statements and extract include statements and constants, in
/// source order.  Recurses into namespace blocks, block statements, and
/// `if` guards (the `if (!defined('X')) { define('X', …); }` pattern).
pub(crate) fn extract_includes_and_constants<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    includes: &mut Vec<IncludeReflection>,
    constants: &mut Vec<ConstantReflection>,
    ctx: &ReflectCtx<'a>,
) {
    for statement in statements {
        match statement {
            Statement::Expression(expr_stmt) => {
                extract_from_expression(expr_stmt.expression, includes, constants, ctx);
            }
            Statement::Constant(const_decl) => {
                for item in const_decl.items.iter() {
                    let line = ctx.lines.line_of(item.span().start.offset);
                    constants.push(ConstantReflection {
                        name: bytes_to_string(item.name.value),
                        line,
                        value: const_item_value(ctx, item.span()),
                    });
                }
            }
            Statement::Namespace(namespace) => {
                extract_includes_and_constants(
                    namespace.statements().iter(),
                    includes,
                    constants,
                    ctx,
                );
            }
            Statement::Block(block) => {
                extract_includes_and_constants(block.statements.iter(), includes, constants, ctx);
            }
            Statement::If(if_stmt) => {
                each_if_statement(&if_stmt.body, &mut |stmt| {
                    extract_includes_and_constants(
                        std::iter::once(stmt),
                        includes,
                        constants,
                        ctx,
                    );
                });
            }
            _ => {}
        }
    }
}

/// Pull an include or a `define()` constant out of a statement-level
/// expression.
fn extract_from_expression<'a>(
    expr: &'a Expression<'a>,
    includes: &mut Vec<IncludeReflection>,
    constants: &mut Vec<ConstantReflection>,
    ctx: &ReflectCtx<'a>,
) {
    match expr {
        Expression::Construct(construct) => {
            let (kind, value) = match construct {
                Construct::Include(c) => (IncludeKind::Include, c.value),
                Construct::IncludeOnce(c) => (IncludeKind::IncludeOnce, c.value),
                Construct::Require(c) => (IncludeKind::Require, c.value),
                Construct::RequireOnce(c) => (IncludeKind::RequireOnce, c.value),
                _ => return,
            };
            includes.push(IncludeReflection {
                name: ctx.source_of(value.span()).to_string(),
                line: ctx.lines.line_of(value.span().start.offset),
                kind,
            });
        }
        Expression::Call(Call::Function(func_call)) => {
            if let Some(constant) = try_extract_define(func_call, ctx) {
                constants.push(constant);
            }
        }
        _ => {}
    }
}

/// Try to extract a constant from a `define('NAME', …)` call expression.
/// Returns `Some` if the expression is a call to `define` whose first
/// argument is a string literal.
fn try_extract_define<'a>(
    func_call: &'a FunctionCall<'a>,
    ctx: &ReflectCtx<'a>,
) -> Option<ConstantReflection> {
    let func_name = match func_call.function {
        Expression::Identifier(ident) => ident.value(),
        _ => return None,
    };
    if !func_name.eq_ignore_ascii_case(b"define") {
        return None;
    }

    let args: Vec<_> = func_call.argument_list.arguments.iter().collect();
    if args.is_empty() {
        return None;
    }
    let first_expr = match &args[0] {
        Argument::Positional(pos) => pos.value,
        Argument::Named(named) => named.value,
    };
    let Expression::Literal(Literal::String(lit_str)) = first_expr else {
        return None;
    };
    let name = bytes_to_string(lit_str.value.filter(|v| !v.is_empty())?);

    let value = args.get(1).map(|arg| {
        let expr = match arg {
            Argument::Positional(pos) => pos.value,
            Argument::Named(named) => named.value,
        };
        ctx.source_of(expr.span()).to_string()
    });

    Some(ConstantReflection {
        name,
        line: ctx.lines.line_of(func_call.span().start.offset),
        value,
    })
}

/// The value half of a `const NAME = …;` item, read from source.
fn const_item_value(ctx: &ReflectCtx<'_>, span: mago_span::Span) -> Option<String> {
    let source = ctx.source_of(span);
    let value = source.split_once('=')?.1.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Invoke `f` on every statement reachable from an `if` body, covering
/// brace-delimited and colon-delimited forms along with their `elseif`
/// and `else` branches.
fn each_if_statement<'a>(body: &'a IfBody<'a>, f: &mut dyn FnMut(&'a Statement<'a>)) {
    match body {
        IfBody::Statement(body) => {
            f(body.statement);
            for else_if in body.else_if_clauses.iter() {
                f(else_if.statement);
            }
            if let Some(else_clause) = &body.else_clause {
                f(else_clause.statement);
            }
        }
        IfBody::ColonDelimited(body) => {
            for stmt in body.statements.iter() {
                f(stmt);
            }
            for else_if in body.else_if_clauses.iter() {
                for stmt in else_if.statements.iter() {
                    f(stmt);
                }
            }
            if let Some(else_clause) = &body.else_clause {
                for stmt in else_clause.statements.iter() {
                    f(stmt);
                }
            }
        }
    }
}
