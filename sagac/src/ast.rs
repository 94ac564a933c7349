//! Syntax tree for the supported JavaScript module subset.
//!
//! Node kinds follow the ESTree vocabulary so that [`ExprKind::name`] and
//! [`PatternKind::name`] can report unsupported constructs by the names
//! JavaScript tooling uses.

use crate::span::Span;

/// A parsed module.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// An identifier with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

// ============================================================
// Statements
// ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Import(ImportDecl),
    /// `export function ...` / `export const ...`
    ExportNamed(Box<Stmt>),
    /// `export { a, b as c } [from "..."]` / `export * from "..."`
    ExportList(ExportList),
    /// `export default ...`
    ExportDefault(Box<Stmt>),
    Function(Function),
    Var(VarDecl),
    Block(Block),
    Expr(Expr),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    Try {
        block: Block,
        handler: Option<CatchClause>,
        finalizer: Option<Block>,
    },
    Return(Option<Expr>),
    Throw(Expr),
    For {
        init: Option<Box<Stmt>>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        kind: ForEachKind,
        left: Box<Stmt>,
        right: Expr,
        body: Box<Stmt>,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Break(Option<Ident>),
    Continue(Option<Ident>),
    /// `label: body`
    Labeled {
        label: Ident,
        body: Box<Stmt>,
    },
    Class(Class),
    Empty,
}

/// A class declaration or expression. Only the header is kept; the body is
/// skipped by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Option<Ident>,
    pub super_class: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForEachKind {
    In,
    Of,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<Pattern>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for `default:`
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub default: Option<Ident>,
    pub namespace: Option<Ident>,
    /// `(imported, local)` pairs.
    pub named: Vec<(Ident, Ident)>,
    /// Raw module specifier, quotes included.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportList {
    /// `(local, exported)` pairs. Empty for `export * from`.
    pub specifiers: Vec<(Ident, Ident)>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: VarKind,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub id: Pattern,
    pub init: Option<Expr>,
    pub span: Span,
}

/// A function declaration or expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<Ident>,
    pub params: Vec<Pattern>,
    pub body: Block,
    pub is_generator: bool,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Block(Block),
    Expr(Box<Expr>),
}

// ============================================================
// Expressions
// ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Ident(String),
    This,
    /// `object.property`
    Member {
        object: Box<Expr>,
        property: Ident,
    },
    /// `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Array(Vec<Expr>),
    Object(Vec<Property>),
    Template(TemplateLiteral),
    TaggedTemplate {
        tag: Box<Expr>,
        quasi: TemplateLiteral,
    },
    Function(Box<Function>),
    Arrow(Box<ArrowFunction>),
    Class(Box<Class>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Yield {
        argument: Option<Box<Expr>>,
        delegate: bool,
    },
    Await(Box<Expr>),
    Spread(Box<Expr>),
    Sequence(Vec<Expr>),
}

impl ExprKind {
    /// ESTree node name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Literal(_) => "Literal",
            ExprKind::Ident(_) => "Identifier",
            ExprKind::This => "ThisExpression",
            ExprKind::Member { .. } => "MemberExpression",
            ExprKind::Index { .. } => "MemberExpression (computed)",
            ExprKind::Call { .. } => "CallExpression",
            ExprKind::New { .. } => "NewExpression",
            ExprKind::Array(_) => "ArrayExpression",
            ExprKind::Object(_) => "ObjectExpression",
            ExprKind::Template(_) => "TemplateLiteral",
            ExprKind::TaggedTemplate { .. } => "TaggedTemplateExpression",
            ExprKind::Function(_) => "FunctionExpression",
            ExprKind::Arrow(_) => "ArrowFunctionExpression",
            ExprKind::Class(_) => "ClassExpression",
            ExprKind::Unary { .. } => "UnaryExpression",
            ExprKind::Update { .. } => "UpdateExpression",
            ExprKind::Binary { op, .. } if op.is_logical() => "LogicalExpression",
            ExprKind::Binary { .. } => "BinaryExpression",
            ExprKind::Assign { .. } => "AssignmentExpression",
            ExprKind::Conditional { .. } => "ConditionalExpression",
            ExprKind::Yield { .. } => "YieldExpression",
            ExprKind::Await(_) => "AwaitExpression",
            ExprKind::Spread(_) => "SpreadElement",
            ExprKind::Sequence(_) => "SequenceExpression",
        }
    }
}

impl Expr {
    /// Direct sub-expressions in source order.
    ///
    /// Function and arrow bodies are not expressions of the enclosing scope
    /// and are not returned; callers that need them match on the kind.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Literal(_)
            | ExprKind::Ident(_)
            | ExprKind::This
            | ExprKind::Function(_)
            | ExprKind::Arrow(_) => Vec::new(),
            ExprKind::Member { object, .. } => vec![&**object],
            ExprKind::Index { object, index } => vec![&**object, &**index],
            ExprKind::Class(class) => class.super_class.iter().map(|base| &**base).collect(),
            ExprKind::Call { callee, args } | ExprKind::New { callee, args } => {
                std::iter::once(&**callee).chain(args).collect()
            }
            ExprKind::Array(elements) => elements.iter().collect(),
            ExprKind::Sequence(exprs) => exprs.iter().collect(),
            ExprKind::Object(props) => props
                .iter()
                .flat_map(|prop| {
                    let key = match &prop.key {
                        PropKey::Computed(expr) => Some(&**expr),
                        _ => None,
                    };
                    key.into_iter().chain(std::iter::once(&prop.value))
                })
                .collect(),
            ExprKind::Template(tpl) => tpl.exprs.iter().collect(),
            ExprKind::TaggedTemplate { tag, quasi } => {
                std::iter::once(&**tag).chain(&quasi.exprs).collect()
            }
            ExprKind::Unary { operand, .. } | ExprKind::Update { operand, .. } => vec![&**operand],
            ExprKind::Binary { left, right, .. } => vec![&**left, &**right],
            ExprKind::Assign { target, value, .. } => vec![&**target, &**value],
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => vec![&**test, &**consequent, &**alternate],
            ExprKind::Yield { argument, .. } => argument.iter().map(|a| &**a).collect(),
            ExprKind::Await(inner) | ExprKind::Spread(inner) => vec![&**inner],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Source text as written, quotes and escapes included.
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    Boolean,
    Null,
    /// `/pattern/flags`
    RegExp,
}

/// A template literal. Quasis and embedded expressions are kept in separate
/// sequences; their relative order is recovered from source offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    pub exprs: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateElement {
    /// Raw text between delimiters, escapes untouched.
    pub raw: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropKey,
    pub value: Expr,
    pub shorthand: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropKey {
    Ident(Ident),
    /// String or numeric key, raw text.
    Literal(String),
    Computed(Box<Expr>),
    /// `...expr` inside an object literal; the value holds the spread.
    Spread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    BitNot,
    Typeof,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Exp,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    In,
    Instanceof,
    And,
    Or,
    Nullish,
}

impl BinaryOp {
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Nullish)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
}

// ============================================================
// Patterns
// ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    Ident(String),
    Object {
        props: Vec<ObjectPatternProp>,
        rest: Option<Box<Pattern>>,
    },
    Array(Vec<Option<Pattern>>),
    /// `target = default`
    Assign {
        target: Box<Pattern>,
        default: Box<Expr>,
    },
    Rest(Box<Pattern>),
}

impl PatternKind {
    /// ESTree node name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Ident(_) => "Identifier",
            PatternKind::Object { .. } => "ObjectPattern",
            PatternKind::Array(_) => "ArrayPattern",
            PatternKind::Assign { .. } => "AssignmentPattern",
            PatternKind::Rest(_) => "RestElement",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPatternProp {
    pub key: PropKey,
    pub value: Pattern,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, start: usize) -> Expr {
        Expr::new(
            ExprKind::Ident(name.to_string()),
            Span::new(start, start + name.len()),
        )
    }

    #[test]
    fn test_call_children_in_order() {
        let call = Expr::new(
            ExprKind::Call {
                callee: Box::new(ident("call", 0)),
                args: vec![ident("fn", 5), ident("a", 9)],
            },
            Span::new(0, 11),
        );
        let names: Vec<_> = call
            .children()
            .into_iter()
            .map(|e| match &e.kind {
                ExprKind::Ident(name) => name.as_str(),
                _ => "?",
            })
            .collect();
        assert_eq!(names, vec!["call", "fn", "a"]);
    }

    #[test]
    fn test_function_bodies_are_opaque() {
        let arrow = Expr::new(
            ExprKind::Arrow(Box::new(ArrowFunction {
                params: Vec::new(),
                body: ArrowBody::Expr(Box::new(ident("x", 6))),
                is_async: false,
            })),
            Span::new(0, 7),
        );
        assert!(arrow.children().is_empty());
    }

    #[test]
    fn test_node_names() {
        let logical = ExprKind::Binary {
            op: BinaryOp::And,
            left: Box::new(ident("a", 0)),
            right: Box::new(ident("b", 5)),
        };
        assert_eq!(logical.name(), "LogicalExpression");
        assert_eq!(PatternKind::Ident("x".into()).name(), "Identifier");
    }
}
