//! A small Go syntax tree.
//!
//! Emitters build these nodes instead of concatenating text; [`crate::emit`] turns a
//! finished [`GoFile`] into source in one pass. The tree covers exactly the
//! constructs the generated client code uses.

use std::collections::BTreeSet;

/// One generated Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFile {
    /// Package clause.
    pub package: String,
    /// Import paths, deduplicated and ordered.
    pub imports: BTreeSet<String>,
    /// Top-level declarations in emission order.
    pub decls: Vec<GoDecl>,
}

impl GoFile {
    /// Create an empty file in `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self { package: package.into(), imports: BTreeSet::new(), decls: Vec::new() }
    }

    /// Record an import path.
    pub fn import(&mut self, path: impl Into<String>) { self.imports.insert(path.into()); }

    /// Append a declaration.
    pub fn push(&mut self, decl: GoDecl) { self.decls.push(decl); }
}

/// A comment attached to a declaration or struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoComment {
    /// `// line` per line; an empty line renders as a bare `//`.
    Line(Vec<String>),
    /// `/* ... */` around unprefixed lines.
    Block(Vec<String>),
}

/// A struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoStructField {
    /// Leading comment.
    pub doc: Option<GoComment>,
    /// Member name.
    pub name: String,
    /// Rendered type.
    pub ty: String,
    /// Raw tag content, without backquotes.
    pub tag: Option<String>,
}

/// A `name [type] [= value]` spec inside a `const` or `var` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoValueSpec {
    /// Leading comment.
    pub doc: Option<GoComment>,
    /// Declared name.
    pub name: String,
    /// Optional explicit type.
    pub ty: Option<String>,
    /// Optional initializer.
    pub value: Option<GoExpr>,
}

impl GoValueSpec {
    fn spec(name: impl Into<String>, ty: Option<String>, value: Option<GoExpr>) -> Self {
        Self { doc: None, name: name.into(), ty, value }
    }

    /// A bare name, continuing an `iota` sequence.
    pub fn name(name: impl Into<String>) -> Self { Self::spec(name, None, None) }

    /// A name with an initializer.
    pub fn value(name: impl Into<String>, value: GoExpr) -> Self { Self::spec(name, None, Some(value)) }

    /// A name with an explicit type and no initializer.
    pub fn declared(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::spec(name, Some(ty.into()), None)
    }

    /// A name with an explicit type and an initializer.
    pub fn typed(name: impl Into<String>, ty: impl Into<String>, value: GoExpr) -> Self {
        Self::spec(name, Some(ty.into()), Some(value))
    }

    /// Attach a leading comment.
    pub fn doc(mut self, doc: Option<GoComment>) -> Self {
        self.doc = doc;
        self
    }
}

/// A parameter, result or receiver. An empty name renders the type alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoParam {
    /// Parameter name.
    pub name: String,
    /// Rendered type.
    pub ty: String,
}

impl GoParam {
    /// A named parameter.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }

    /// An unnamed result.
    pub fn unnamed(ty: impl Into<String>) -> Self { Self { name: String::new(), ty: ty.into() } }
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFunc {
    /// Leading comment.
    pub doc: Option<GoComment>,
    /// Method receiver.
    pub receiver: Option<GoParam>,
    /// Function name.
    pub name: String,
    /// Parameters.
    pub params: Vec<GoParam>,
    /// Results; parenthesized when named or more than one.
    pub results: Vec<GoParam>,
    /// Body statements.
    pub body: Vec<GoStmt>,
}

impl GoFunc {
    /// A function named `name` with no parameters, results or body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            doc: None,
            receiver: None,
            name: name.into(),
            params: Vec::new(),
            results: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Attach a leading comment.
    pub fn doc(mut self, doc: Option<GoComment>) -> Self {
        self.doc = doc;
        self
    }

    /// Make this a method on `receiver`.
    pub fn receiver(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.receiver = Some(GoParam::new(name, ty));
        self
    }

    /// Append a parameter.
    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(GoParam::new(name, ty));
        self
    }

    /// Append a result.
    pub fn result(mut self, result: GoParam) -> Self {
        self.results.push(result);
        self
    }

    /// Replace the body.
    pub fn body(mut self, body: Vec<GoStmt>) -> Self {
        self.body = body;
        self
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoDecl {
    /// `type Name struct { ... }`
    Struct {
        /// Leading comment.
        doc: Option<GoComment>,
        /// Type name.
        name: String,
        /// Members in emission order.
        fields: Vec<GoStructField>,
    },
    /// `type Name underlying`
    Type {
        /// Leading comment.
        doc: Option<GoComment>,
        /// Type name.
        name: String,
        /// Underlying type.
        underlying: String,
    },
    /// `const ( ... )`
    Const(Vec<GoValueSpec>),
    /// `var ( ... )`
    Var(Vec<GoValueSpec>),
    /// A function or method.
    Func(GoFunc),
    /// Source supplied by a schema author, emitted verbatim after its comment.
    Verbatim {
        /// Leading comment.
        doc: Option<GoComment>,
        /// The source text.
        source: String,
    },
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoStmt {
    /// An expression evaluated for its effect.
    Expr(GoExpr),
    /// `a, b := x, y`
    Define {
        /// Declared names.
        names: Vec<String>,
        /// Values.
        values: Vec<GoExpr>,
    },
    /// `a = x`
    Assign {
        /// Assignment target.
        target: GoExpr,
        /// Assigned value.
        value: GoExpr,
    },
    /// `return ...`
    Return(Vec<GoExpr>),
    /// `if [init;] cond { ... }`
    If {
        /// Optional simple statement before the condition.
        init: Option<Box<GoStmt>>,
        /// Condition.
        cond: GoExpr,
        /// Body.
        body: Vec<GoStmt>,
    },
    /// `for key, value := range expr { ... }`
    Range {
        /// Key variable, usually `_`.
        key: String,
        /// Value variable.
        value: String,
        /// Ranged expression.
        expr: GoExpr,
        /// Body.
        body: Vec<GoStmt>,
    },
    /// A `const ( ... )` group local to a function.
    Const(Vec<GoValueSpec>),
    /// `var name type`
    Var {
        /// Declared name.
        name: String,
        /// Declared type.
        ty: String,
    },
    /// `defer call`
    Defer(GoExpr),
}

impl GoStmt {
    /// `return` with no values.
    pub fn bare_return() -> Self { GoStmt::Return(Vec::new()) }

    /// `if err != nil { return err }`
    pub fn return_on_err() -> Self {
        GoStmt::If {
            init: None,
            cond: GoExpr::not_nil(ident("err")),
            body: vec![GoStmt::Return(vec![ident("err")])],
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoExpr {
    /// An identifier or qualified identifier.
    Ident(String),
    /// An interpreted string literal.
    Str(String),
    /// An integer literal.
    Int(u64),
    /// A call.
    Call {
        /// Callee.
        func: Box<GoExpr>,
        /// Arguments.
        args: Vec<GoExpr>,
        /// Put every argument after the first on its own line.
        multiline: bool,
    },
    /// `x.sel`
    Selector(Box<GoExpr>, String),
    /// `&x`
    AddressOf(Box<GoExpr>),
    /// `*x`
    Deref(Box<GoExpr>),
    /// `x[i]`
    Index(Box<GoExpr>, Box<GoExpr>),
    /// `x op y`
    Binary(Box<GoExpr>, &'static str, Box<GoExpr>),
    /// `x.(T)`
    TypeAssert(Box<GoExpr>, String),
    /// `T{k: v, ...}`, one element per line.
    Composite {
        /// Literal type.
        ty: String,
        /// Elements with optional keys.
        elems: Vec<(Option<GoExpr>, GoExpr)>,
    },
}

/// Shorthand for [`GoExpr::Ident`].
pub fn ident(name: impl Into<String>) -> GoExpr { GoExpr::Ident(name.into()) }

/// Shorthand for [`GoExpr::Str`].
pub fn string(value: impl Into<String>) -> GoExpr { GoExpr::Str(value.into()) }

/// A single-line call of a named function.
pub fn call(func: impl Into<String>, args: Vec<GoExpr>) -> GoExpr {
    GoExpr::Call { func: Box::new(ident(func)), args, multiline: false }
}

/// A call that puts every argument after the first on its own line.
pub fn multiline_call(func: impl Into<String>, args: Vec<GoExpr>) -> GoExpr {
    GoExpr::Call { func: Box::new(ident(func)), args, multiline: true }
}

impl GoExpr {
    /// `self.name`
    pub fn field(self, name: impl Into<String>) -> Self { GoExpr::Selector(Box::new(self), name.into()) }

    /// `&self`
    pub fn addr(self) -> Self { GoExpr::AddressOf(Box::new(self)) }

    /// `*self`
    pub fn deref(self) -> Self { GoExpr::Deref(Box::new(self)) }

    /// `self[index]`
    pub fn index(self, index: GoExpr) -> Self { GoExpr::Index(Box::new(self), Box::new(index)) }

    /// `self(args...)`
    pub fn call(self, args: Vec<GoExpr>) -> Self {
        GoExpr::Call { func: Box::new(self), args, multiline: false }
    }

    /// `expr != nil`
    pub fn not_nil(expr: GoExpr) -> Self { GoExpr::Binary(Box::new(expr), "!=", Box::new(ident("nil"))) }

    /// `expr == nil`
    pub fn is_nil(expr: GoExpr) -> Self { GoExpr::Binary(Box::new(expr), "==", Box::new(ident("nil"))) }
}
