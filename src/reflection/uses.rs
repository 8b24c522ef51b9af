//! Call-site and hook dispatch collection.
//!
//! Walks the statements of one scope (the file body, a function body, or
//! a method body) and records every function call, method call, and hook
//! dispatch into a [`ScopeUsage`].  Closure and arrow-function bodies
//! count toward the enclosing scope; nested `function` and class
//! declarations open scopes of their own and are skipped here.

use mago_span::HasSpan;
use mago_syntax::ast::*;

use crate::types::{CallSite, HookKind, HookReflection, RawArg, ScopeUsage};

use super::ReflectCtx;
use crate::util::bytes_to_string;

/// Collect usage from the file body, skipping declarations that carry
/// their own scopes.
pub(crate) fn collect_file_usage<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    usage: &mut ScopeUsage,
    ctx: &ReflectCtx<'a>,
) {
    walk_statements(statements, usage, ctx);
}

/// Collect usage from a function or method body.
pub(crate) fn collect_scope_usage<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    ctx: &ReflectCtx<'a>,
) -> ScopeUsage {
    let mut usage = ScopeUsage::default();
    walk_statements(statements, &mut usage, ctx);
    usage
}

fn walk_statements<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    usage: &mut ScopeUsage,
    ctx: &ReflectCtx<'a>,
) {
    for statement in statements {
        walk_statement(statement, usage, ctx);
    }
}

fn walk_statement<'a>(stmt: &'a Statement<'a>, usage: &mut ScopeUsage, ctx: &ReflectCtx<'a>) {
    match stmt {
        Statement::Expression(expr_stmt) => {
            walk_expression(expr_stmt.expression, usage, ctx);
        }
        Statement::Block(block) => {
            walk_statements(block.statements.iter(), usage, ctx);
        }
        Statement::If(if_stmt) => {
            walk_expression(if_stmt.condition, usage, ctx);
            match &if_stmt.body {
                IfBody::Statement(body) => {
                    walk_statement(body.statement, usage, ctx);
                    for else_if in body.else_if_clauses.iter() {
                        walk_expression(else_if.condition, usage, ctx);
                        walk_statement(else_if.statement, usage, ctx);
                    }
                    if let Some(else_clause) = &body.else_clause {
                        walk_statement(else_clause.statement, usage, ctx);
                    }
                }
                IfBody::ColonDelimited(body) => {
                    walk_statements(body.statements.iter(), usage, ctx);
                    for else_if in body.else_if_clauses.iter() {
                        walk_expression(else_if.condition, usage, ctx);
                        walk_statements(else_if.statements.iter(), usage, ctx);
                    }
                    if let Some(else_clause) = &body.else_clause {
                        walk_statements(else_clause.statements.iter(), usage, ctx);
                    }
                }
            }
        }
        Statement::Foreach(foreach) => {
            walk_expression(foreach.expression, usage, ctx);
            match &foreach.body {
                ForeachBody::Statement(inner) => walk_statement(inner, usage, ctx),
                ForeachBody::ColonDelimited(body) => {
                    walk_statements(body.statements.iter(), usage, ctx);
                }
            }
        }
        Statement::For(for_stmt) => {
            for init in for_stmt.initializations.iter() {
                walk_expression(init, usage, ctx);
            }
            for cond in for_stmt.conditions.iter() {
                walk_expression(cond, usage, ctx);
            }
            for increment in for_stmt.increments.iter() {
                walk_expression(increment, usage, ctx);
            }
            match &for_stmt.body {
                ForBody::Statement(inner) => walk_statement(inner, usage, ctx),
                ForBody::ColonDelimited(body) => {
                    walk_statements(body.statements.iter(), usage, ctx);
                }
            }
        }
        Statement::While(while_stmt) => {
            walk_expression(while_stmt.condition, usage, ctx);
            match &while_stmt.body {
                WhileBody::Statement(inner) => walk_statement(inner, usage, ctx),
                WhileBody::ColonDelimited(body) => {
                    walk_statements(body.statements.iter(), usage, ctx);
                }
            }
        }
        Statement::DoWhile(dw) => {
            walk_statement(dw.statement, usage, ctx);
            walk_expression(dw.condition, usage, ctx);
        }
        Statement::Try(try_stmt) => {
            walk_statements(try_stmt.block.statements.iter(), usage, ctx);
            for catch in try_stmt.catch_clauses.iter() {
                walk_statements(catch.block.statements.iter(), usage, ctx);
            }
            if let Some(finally) = &try_stmt.finally_clause {
                walk_statements(finally.block.statements.iter(), usage, ctx);
            }
        }
        Statement::Return(ret) => {
            if let Some(expr) = ret.value {
                walk_expression(expr, usage, ctx);
            }
        }
        Statement::Echo(echo) => {
            for expr in echo.values.iter() {
                walk_expression(expr, usage, ctx);
            }
        }
        Statement::Switch(switch) => {
            walk_expression(switch.expression, usage, ctx);
            match &switch.body {
                SwitchBody::BraceDelimited(body) => {
                    for case in body.cases.iter() {
                        walk_statements(case.statements().iter(), usage, ctx);
                    }
                }
                SwitchBody::ColonDelimited(body) => {
                    for case in body.cases.iter() {
                        walk_statements(case.statements().iter(), usage, ctx);
                    }
                }
            }
        }
        Statement::Namespace(namespace) => {
            walk_statements(namespace.statements().iter(), usage, ctx);
        }
        // Function and class-like declarations open their own scopes;
        // their bodies are collected separately.
        Statement::Function(_)
        | Statement::Class(_)
        | Statement::Interface(_)
        | Statement::Trait(_)
        | Statement::Enum(_) => {}
        _ => {}
    }
}

fn walk_expression<'a>(expr: &'a Expression<'a>, usage: &mut ScopeUsage, ctx: &ReflectCtx<'a>) {
    match expr {
        Expression::Call(call) => {
            record_call(call, usage, ctx);
        }
        Expression::Assignment(assignment) => {
            walk_expression(assignment.lhs, usage, ctx);
            walk_expression(assignment.rhs, usage, ctx);
        }
        Expression::Binary(bin) => {
            walk_expression(bin.lhs, usage, ctx);
            walk_expression(bin.rhs, usage, ctx);
        }
        Expression::Parenthesized(paren) => {
            walk_expression(paren.expression, usage, ctx);
        }
        Expression::Conditional(cond) => {
            walk_expression(cond.condition, usage, ctx);
            if let Some(then) = cond.then {
                walk_expression(then, usage, ctx);
            }
            walk_expression(cond.r#else, usage, ctx);
        }
        Expression::Array(arr) => {
            for elem in arr.elements.iter() {
                match elem {
                    ArrayElement::KeyValue(kv) => {
                        walk_expression(kv.key, usage, ctx);
                        walk_expression(kv.value, usage, ctx);
                    }
                    ArrayElement::Value(v) => {
                        walk_expression(v.value, usage, ctx);
                    }
                    _ => {}
                }
            }
        }
        // Closure and arrow-function bodies belong to the enclosing scope.
        Expression::Closure(closure) => {
            walk_statements(closure.body.statements.iter(), usage, ctx);
        }
        Expression::ArrowFunction(arrow) => {
            walk_expression(arrow.expression, usage, ctx);
        }
        _ => {}
    }
}

/// Record one call expression, then recurse into its receiver and
/// arguments for nested calls.
fn record_call<'a>(call: &'a Call<'a>, usage: &mut ScopeUsage, ctx: &ReflectCtx<'a>) {
    match call {
        Call::Function(func_call) => {
            if let Expression::Identifier(ident) = func_call.function {
                let name = bytes_to_string(ident.value());
                let (line, end_line) = ctx.line_span(func_call);
                let args = collect_args(&func_call.argument_list, ctx);

                if let Some(kind) = HookKind::from_function_name(&name) {
                    usage.hooks.push(make_hook(kind, func_call, args, ctx, line, end_line));
                } else {
                    usage.functions.push(CallSite {
                        name,
                        class: None,
                        is_static: false,
                        line,
                        end_line,
                        args,
                    });
                }
            }
            walk_argument_list(&func_call.argument_list, usage, ctx);
        }
        Call::Method(method_call) => {
            if let ClassLikeMemberSelector::Identifier(ident) = &method_call.method {
                let (line, end_line) = ctx.line_span(method_call);
                usage.methods.push(CallSite {
                    name: bytes_to_string(ident.value),
                    class: Some(receiver_name(method_call.object, ctx)),
                    is_static: false,
                    line,
                    end_line,
                    args: collect_args(&method_call.argument_list, ctx),
                });
            }
            walk_expression(method_call.object, usage, ctx);
            walk_argument_list(&method_call.argument_list, usage, ctx);
        }
        Call::NullSafeMethod(method_call) => {
            if let ClassLikeMemberSelector::Identifier(ident) = &method_call.method {
                let (line, end_line) = ctx.line_span(method_call);
                usage.methods.push(CallSite {
                    name: bytes_to_string(ident.value),
                    class: Some(receiver_name(method_call.object, ctx)),
                    is_static: false,
                    line,
                    end_line,
                    args: collect_args(&method_call.argument_list, ctx),
                });
            }
            walk_expression(method_call.object, usage, ctx);
            walk_argument_list(&method_call.argument_list, usage, ctx);
        }
        Call::StaticMethod(static_call) => {
            if let ClassLikeMemberSelector::Identifier(ident) = &static_call.method {
                let class = match static_call.class {
                    Expression::Identifier(class_ident) => bytes_to_string(class_ident.value()),
                    other => ctx.source_of(other.span()).to_string(),
                };
                let (line, end_line) = ctx.line_span(static_call);
                usage.methods.push(CallSite {
                    name: bytes_to_string(ident.value),
                    class: Some(class),
                    is_static: true,
                    line,
                    end_line,
                    args: collect_args(&static_call.argument_list, ctx),
                });
            }
            walk_argument_list(&static_call.argument_list, usage, ctx);
        }
    }
}

/// The receiver half of an instance method call: `$this`, a variable
/// name, or the raw source of a more complex receiver expression.
fn receiver_name<'a>(object: &'a Expression<'a>, ctx: &ReflectCtx<'a>) -> String {
    match object {
        Expression::Variable(Variable::Direct(dv)) => bytes_to_string(dv.name),
        Expression::Identifier(ident) => bytes_to_string(ident.value()),
        other => ctx.source_of(other.span()).to_string(),
    }
}

fn collect_args<'a>(argument_list: &'a ArgumentList<'a>, ctx: &ReflectCtx<'a>) -> Vec<RawArg> {
    argument_list
        .arguments
        .iter()
        .map(|arg| {
            let value = match arg {
                Argument::Positional(pos) => pos.value,
                Argument::Named(named) => named.value,
            };
            RawArg {
                source: ctx.source_of(value.span()).to_string(),
                literal: string_literal_value(value),
            }
        })
        .collect()
}

/// Recurse into call arguments to pick up nested calls.
fn walk_argument_list<'a>(
    argument_list: &'a ArgumentList<'a>,
    usage: &mut ScopeUsage,
    ctx: &ReflectCtx<'a>,
) {
    for arg in argument_list.arguments.iter() {
        let value = match arg {
            Argument::Positional(pos) => pos.value,
            Argument::Named(named) => named.value,
        };
        walk_expression(value, usage, ctx);
    }
}

/// The unquoted value of a string-literal expression.
fn string_literal_value(expr: &Expression<'_>) -> Option<String> {
    if let Expression::Literal(Literal::String(lit_str)) = expr {
        lit_str.value.map(bytes_to_string)
    } else {
        None
    }
}

fn make_hook<'a>(
    kind: HookKind,
    func_call: &'a FunctionCall<'a>,
    args: Vec<RawArg>,
    ctx: &ReflectCtx<'a>,
    line: u32,
    end_line: u32,
) -> HookReflection {
    let mut args = args.into_iter();
    let name = args.next().map(|arg| hook_name(&arg)).unwrap_or_default();
    let rest = args.map(|arg| arg.source).collect();

    HookReflection {
        name,
        kind,
        line,
        end_line,
        args: rest,
        doc: ctx.docblock_for(func_call).map(str::to_string),
    }
}

/// A hook's exported name: the literal value of its first argument, or
/// the argument source with the surrounding quotes trimmed when the name
/// is built dynamically (`"{$tag}_header"` exports as `{$tag}_header`).
fn hook_name(arg: &RawArg) -> String {
    if let Some(literal) = &arg.literal {
        return literal.clone();
    }
    arg.source
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}
