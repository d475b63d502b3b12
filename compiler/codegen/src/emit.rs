//! Go source emission via the `Emit` trait.
//!
//! Every syntax-tree node knows how to render itself. Blocks indent with one tab
//! per level, as `gofmt` does; alignment and import grouping beyond that is left
//! to the external formatter.

use crate::go_ast::{
    GoComment, GoDecl, GoExpr, GoFile, GoFunc, GoParam, GoStmt, GoStructField, GoValueSpec,
};
use crate::GENERATED_MARKER;

/// Trait for emitting Go source from syntax-tree nodes.
pub trait Emit {
    /// Render the node as Go source.
    fn emit(&self) -> String;
}

fn tabs(indent: usize) -> String { "\t".repeat(indent) }

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() && (c as u32) < 0x80 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

// =============================================================================
// Files
// =============================================================================

impl Emit for GoFile {
    fn emit(&self) -> String {
        let mut out = format!("package {}\n\n", self.package);

        // Standard library first, then everything else, as goimports groups them.
        let (std, external): (Vec<&String>, Vec<&String>) =
            self.imports.iter().partition(|path| is_std_import(path));
        match (std.len(), external.len()) {
            (0, 0) => {}
            (1, 0) | (0, 1) => {
                let path = std.first().or(external.first()).map(|p| quote(p)).unwrap_or_default();
                out.push_str(&format!("import {path}\n\n"));
            }
            _ => {
                out.push_str("import (\n");
                for path in &std {
                    out.push_str(&format!("\t{}\n", quote(path)));
                }
                if !std.is_empty() && !external.is_empty() {
                    out.push('\n');
                }
                for path in &external {
                    out.push_str(&format!("\t{}\n", quote(path)));
                }
                out.push_str(")\n\n");
            }
        }

        out.push_str(GENERATED_MARKER);
        out.push('\n');
        for decl in &self.decls {
            out.push('\n');
            out.push_str(&decl.emit());
        }
        out
    }
}

fn is_std_import(path: &str) -> bool {
    path.split('/').next().is_some_and(|first| !first.contains('.'))
}

// =============================================================================
// Comments
// =============================================================================

impl GoComment {
    fn emit_indented(&self, indent: usize) -> String {
        let prefix = tabs(indent);
        match self {
            GoComment::Line(lines) => lines
                .iter()
                .map(|line| {
                    if line.is_empty() {
                        format!("{prefix}//\n")
                    } else {
                        format!("{prefix}// {line}\n")
                    }
                })
                .collect(),
            GoComment::Block(lines) => {
                let mut out = format!("{prefix}/*\n");
                for line in lines {
                    out.push_str(&format!("{prefix}{line}\n"));
                }
                out.push_str(&format!("{prefix}*/\n"));
                out
            }
        }
    }
}

impl Emit for GoComment {
    fn emit(&self) -> String { self.emit_indented(0) }
}

fn emit_doc(doc: &Option<GoComment>, indent: usize) -> String {
    doc.as_ref().map(|d| d.emit_indented(indent)).unwrap_or_default()
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for GoStructField {
    fn emit(&self) -> String {
        let mut out = emit_doc(&self.doc, 1);
        out.push_str(&format!("\t{} {}", self.name, self.ty));
        if let Some(tag) = &self.tag {
            out.push_str(&format!(" `{tag}`"));
        }
        out.push('\n');
        out
    }
}

impl GoValueSpec {
    fn emit_indented(&self, indent: usize) -> String {
        let mut out = emit_doc(&self.doc, indent);
        out.push_str(&format!("{}{}", tabs(indent), self.name));
        if let Some(ty) = &self.ty {
            out.push_str(&format!(" {ty}"));
        }
        if let Some(value) = &self.value {
            out.push_str(&format!(" = {}", value.emit_at(indent)));
        }
        out.push('\n');
        out
    }
}

fn emit_group(keyword: &str, specs: &[GoValueSpec], indent: usize) -> String {
    let prefix = tabs(indent);
    let mut out = format!("{prefix}{keyword} (\n");
    for spec in specs {
        out.push_str(&spec.emit_indented(indent + 1));
    }
    out.push_str(&format!("{prefix})\n"));
    out
}

impl Emit for GoDecl {
    fn emit(&self) -> String {
        match self {
            GoDecl::Struct { doc, name, fields } => {
                let mut out = emit_doc(doc, 0);
                out.push_str(&format!("type {name} struct {{\n"));
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 && field.doc.is_some() {
                        out.push('\n');
                    }
                    out.push_str(&field.emit());
                }
                out.push_str("}\n");
                out
            }
            GoDecl::Type { doc, name, underlying } => {
                format!("{}type {name} {underlying}\n", emit_doc(doc, 0))
            }
            GoDecl::Const(specs) => emit_group("const", specs, 0),
            GoDecl::Var(specs) => match specs.as_slice() {
                [single] if single.doc.is_none() => format!("var {}", single.emit_indented(0)),
                specs => emit_group("var", specs, 0),
            },
            GoDecl::Func(func) => func.emit(),
            GoDecl::Verbatim { doc, source } => {
                let mut out = emit_doc(doc, 0);
                out.push_str(source.trim_end());
                out.push('\n');
                out
            }
        }
    }
}

impl Emit for GoParam {
    fn emit(&self) -> String {
        if self.name.is_empty() {
            self.ty.clone()
        } else {
            format!("{} {}", self.name, self.ty)
        }
    }
}

fn emit_params(params: &[GoParam]) -> String {
    params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ")
}

impl Emit for GoFunc {
    fn emit(&self) -> String {
        let mut out = emit_doc(&self.doc, 0);
        out.push_str("func ");
        if let Some(receiver) = &self.receiver {
            out.push_str(&format!("({}) ", receiver.emit()));
        }
        out.push_str(&format!("{}({})", self.name, emit_params(&self.params)));

        match self.results.as_slice() {
            [] => {}
            [single] if single.name.is_empty() => out.push_str(&format!(" {}", single.ty)),
            results => out.push_str(&format!(" ({})", emit_params(results))),
        }

        out.push_str(" {\n");
        for stmt in &self.body {
            out.push_str(&stmt.emit_indented(1));
        }
        out.push_str("}\n");
        out
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for GoStmt {
    fn emit(&self) -> String { self.emit_indented(0) }
}

impl GoStmt {
    /// Emit with the given indentation level (one tab per level).
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = tabs(indent);
        match self {
            GoStmt::If { init, cond, body } => {
                let init = init.as_ref().map(|s| format!("{}; ", s.emit_inline(indent))).unwrap_or_default();
                let mut out = format!("{prefix}if {init}{} {{\n", cond.emit_at(indent));
                for stmt in body {
                    out.push_str(&stmt.emit_indented(indent + 1));
                }
                out.push_str(&format!("{prefix}}}\n"));
                out
            }
            GoStmt::Range { key, value, expr, body } => {
                let mut out =
                    format!("{prefix}for {key}, {value} := range {} {{\n", expr.emit_at(indent));
                for stmt in body {
                    out.push_str(&stmt.emit_indented(indent + 1));
                }
                out.push_str(&format!("{prefix}}}\n"));
                out
            }
            GoStmt::Const(specs) => emit_group("const", specs, indent),
            simple => format!("{prefix}{}\n", simple.emit_inline(indent)),
        }
    }

    /// Single-line statements, also usable as an `if` initializer.
    fn emit_inline(&self, indent: usize) -> String {
        match self {
            GoStmt::Expr(expr) => expr.emit_at(indent),
            GoStmt::Define { names, values } => {
                format!("{} := {}", names.join(", "), emit_list(values, indent))
            }
            GoStmt::Assign { target, value } => {
                format!("{} = {}", target.emit_at(indent), value.emit_at(indent))
            }
            GoStmt::Return(values) if values.is_empty() => "return".to_string(),
            GoStmt::Return(values) => format!("return {}", emit_list(values, indent)),
            GoStmt::Var { name, ty } => format!("var {name} {ty}"),
            GoStmt::Defer(expr) => format!("defer {}", expr.emit_at(indent)),
            block => block.emit_indented(indent).trim().to_string(),
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

fn emit_list(exprs: &[GoExpr], indent: usize) -> String {
    exprs.iter().map(|e| e.emit_at(indent)).collect::<Vec<_>>().join(", ")
}

impl Emit for GoExpr {
    fn emit(&self) -> String { self.emit_at(0) }
}

impl GoExpr {
    /// Emit an expression that starts on a line indented `indent` levels.
    pub fn emit_at(&self, indent: usize) -> String {
        match self {
            GoExpr::Ident(name) => name.clone(),
            GoExpr::Str(value) => quote(value),
            GoExpr::Int(value) => value.to_string(),
            GoExpr::Call { func, args, multiline } => {
                let func = func.emit_at(indent);
                if *multiline && args.len() > 1 {
                    let inner = tabs(indent + 1);
                    let rest = args[1..]
                        .iter()
                        .map(|a| format!("{inner}{}", a.emit_at(indent + 1)))
                        .collect::<Vec<_>>()
                        .join(",\n");
                    format!("{func}({},\n{rest})", args[0].emit_at(indent))
                } else {
                    format!("{func}({})", emit_list(args, indent))
                }
            }
            GoExpr::Selector(expr, sel) => format!("{}.{sel}", expr.emit_at(indent)),
            GoExpr::AddressOf(expr) => format!("&{}", expr.emit_at(indent)),
            GoExpr::Deref(expr) => format!("*{}", expr.emit_at(indent)),
            GoExpr::Index(expr, index) => {
                format!("{}[{}]", expr.emit_at(indent), index.emit_at(indent))
            }
            GoExpr::Binary(left, op, right) => {
                format!("{} {op} {}", left.emit_at(indent), right.emit_at(indent))
            }
            GoExpr::TypeAssert(expr, ty) => format!("{}.({ty})", expr.emit_at(indent)),
            GoExpr::Composite { ty, elems } if elems.is_empty() => format!("{ty}{{}}"),
            GoExpr::Composite { ty, elems } => {
                let inner = tabs(indent + 1);
                let mut out = format!("{ty}{{\n");
                for (key, value) in elems {
                    let value = value.emit_at(indent + 1);
                    match key {
                        Some(key) => out.push_str(&format!("{inner}{}: {value},\n", key.emit_at(indent + 1))),
                        None => out.push_str(&format!("{inner}{value},\n")),
                    }
                }
                out.push_str(&format!("{}}}", tabs(indent)));
                out
            }
        }
    }
}
