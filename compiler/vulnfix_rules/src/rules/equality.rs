//! Reference comparison of objects.

use rustc_hash::FxHashSet;
use vulnfix_ir::visitor::{block_roots, member_roots};
use vulnfix_ir::{
    BinaryOp, Block, CompilationUnit, ExprArena, ExprId, ExprKind, ExprTag, Literal, LocalVar,
    MemberKind, Node, Param, Scope, StmtKind, TypeDecl, TypeRef, UnaryOp,
};

use super::{Rule, RuleContext, RuleId};
use crate::error::RuleError;
use crate::imports::spelling;

/// Calls that always return a primitive.
const PRIMITIVE_CALLS: [&str; 8] = [
    "size", "length", "hashCode", "ordinal", "compareTo", "equals", "isEmpty", "indexOf",
];

/// `a == b` on objects becomes `Objects.equals(a, b)`, and `a != b`
/// becomes `!Objects.equals(a, b)`.
pub struct ReferenceEquality;

impl Rule for ReferenceEquality {
    fn id(&self) -> RuleId {
        RuleId::ReferenceEquality
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let regions = regions(cx.unit);
        let objects = spelling(cx.unit, "java.util.Objects");
        let arena = &mut cx.unit.arena;
        let mut count = 0;
        for (roots, names) in regions {
            for id in arena.find_exprs(roots, ExprTag::Binary) {
                let ExprKind::Binary { op, left, right } = *arena.kind(id) else {
                    continue;
                };
                if !matches!(op, BinaryOp::Eq | BinaryOp::NotEq) {
                    continue;
                }
                if !compares_objects(arena, &names, left, right) {
                    continue;
                }
                let left = strip_parens(arena, left);
                let right = strip_parens(arena, right);
                let target = arena.path(&objects);
                let call = ExprKind::MethodCall {
                    target: Some(target),
                    type_args: Vec::new(),
                    name: "equals".to_string(),
                    args: vec![left, right],
                };
                if op == BinaryOp::Eq {
                    arena.replace_expr(id, call);
                } else {
                    let operand = arena.alloc(call);
                    arena.replace_expr(
                        id,
                        ExprKind::Unary {
                            op: UnaryOp::Not,
                            operand,
                        },
                    );
                }
                count += 1;
            }
        }
        Ok(count)
    }
}

fn compares_objects(
    arena: &ExprArena,
    names: &PrimitiveNames,
    left: ExprId,
    right: ExprId,
) -> bool {
    let (l, r) = (arena.unwrap_parens(left), arena.unwrap_parens(right));
    if arena.kind(l).is_literal() && arena.kind(r).is_literal() {
        return false;
    }
    let opaque = |id: ExprId| matches!(arena.kind(id), ExprKind::This | ExprKind::Literal(Literal::Null));
    if opaque(l) || opaque(r) {
        return false;
    }
    !names.is_primitive(arena, l) && !names.is_primitive(arena, r)
}

fn strip_parens(arena: &ExprArena, mut id: ExprId) -> ExprId {
    while let ExprKind::Paren(inner) = arena.kind(id) {
        id = *inner;
    }
    id
}

/// Names declared with a primitive type in one region of code.
#[derive(Default, Debug)]
struct PrimitiveNames {
    scalars: FxHashSet<String>,
    /// One-dimensional primitive arrays, whose elements are primitive.
    arrays: FxHashSet<String>,
}

impl PrimitiveNames {
    fn declare(&mut self, ty: &TypeRef, name: &str, extra_dims: u8) {
        if !PRIMITIVE_NAMES.contains(&ty.name.as_str()) {
            return;
        }
        match ty.dims + extra_dims {
            0 => {
                self.scalars.insert(name.to_string());
            }
            1 => {
                self.arrays.insert(name.to_string());
            }
            _ => {}
        }
    }

    fn declare_local(&mut self, local: &LocalVar) {
        for declarator in &local.declarators {
            self.declare(&local.ty, &declarator.name, declarator.dims);
        }
    }

    fn declare_params(&mut self, params: &[Param]) {
        for param in params {
            if !param.varargs {
                self.declare(&param.ty, &param.name, 0);
            }
        }
    }

    /// Locals declared anywhere under `roots`.
    fn declare_body(&mut self, arena: &ExprArena, roots: &[Node]) {
        for node in arena.preorder(roots.to_vec(), Scope::Deep) {
            let Node::Stmt(id) = node else { continue };
            match &arena.get_stmt(id).kind {
                StmtKind::LocalVar(local) | StmtKind::ForEach { var: local, .. } => {
                    self.declare_local(local);
                }
                _ => {}
            }
        }
    }

    fn is_primitive(&self, arena: &ExprArena, id: ExprId) -> bool {
        match arena.kind(arena.unwrap_parens(id)) {
            ExprKind::Literal(literal) => !matches!(
                literal,
                Literal::String(_) | Literal::TextBlock(_) | Literal::Null
            ),
            ExprKind::Unary { .. } | ExprKind::InstanceOf { .. } => true,
            ExprKind::Binary { op, left, right } => {
                op.yields_primitive()
                    || (self.is_primitive(arena, *left) && self.is_primitive(arena, *right))
            }
            ExprKind::Cast { ty, .. } => ty.is_primitive(),
            ExprKind::Name(name) => self.scalars.contains(name),
            ExprKind::FieldAccess { target, name } => {
                name == "length"
                    || (matches!(arena.kind(*target), ExprKind::This)
                        && self.scalars.contains(name))
            }
            ExprKind::MethodCall { name, .. } => PRIMITIVE_CALLS.contains(&name.as_str()),
            ExprKind::Index { target, .. } => {
                matches!(arena.kind(*target), ExprKind::Name(name) if self.arrays.contains(name))
            }
            ExprKind::Assign { target, .. } => self.is_primitive(arena, *target),
            ExprKind::Conditional {
                then_expr,
                else_expr,
                ..
            } => self.is_primitive(arena, *then_expr) && self.is_primitive(arena, *else_expr),
            _ => false,
        }
    }
}

const PRIMITIVE_NAMES: [&str; 8] = [
    "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

/// Code regions paired with the primitive names visible in them: one per
/// method or initializer body, plus field initializers, for every type.
fn regions(unit: &CompilationUnit) -> Vec<(Vec<Node>, PrimitiveNames)> {
    let mut out = Vec::new();
    for ty in &unit.types {
        type_regions(&unit.arena, ty, &mut out);
    }
    out
}

fn type_regions(arena: &ExprArena, ty: &TypeDecl, out: &mut Vec<(Vec<Node>, PrimitiveNames)>) {
    let fields = || {
        let mut names = PrimitiveNames::default();
        for field in ty.fields() {
            for declarator in &field.declarators {
                names.declare(&field.ty, &declarator.name, declarator.dims);
            }
        }
        names.declare_params(&ty.record_components);
        names
    };

    let mut shared = Vec::new();
    for constant in &ty.enum_constants {
        if let Some(args) = &constant.args {
            shared.extend(args.iter().map(|&e| Node::Expr(e)));
        }
        if let Some(body) = &constant.body {
            shared.extend(member_roots(body));
        }
    }
    for member in &ty.members {
        match &member.kind {
            MemberKind::Field(field) => {
                shared.extend(field.declarators.iter().filter_map(|d| d.init.map(Node::Expr)));
            }
            MemberKind::Method(method) => {
                if let Some(body) = &method.body {
                    let mut names = fields();
                    names.declare_params(&method.params);
                    out.push(body_region(arena, body, names));
                }
            }
            MemberKind::Initializer { body, .. } => out.push(body_region(arena, body, fields())),
            MemberKind::Type(inner) => type_regions(arena, inner, out),
        }
    }
    if !shared.is_empty() {
        out.push((shared, fields()));
    }
}

fn body_region(
    arena: &ExprArena,
    body: &Block,
    mut names: PrimitiveNames,
) -> (Vec<Node>, PrimitiveNames) {
    let roots = block_roots(body);
    names.declare_body(arena, &roots);
    (roots, names)
}
