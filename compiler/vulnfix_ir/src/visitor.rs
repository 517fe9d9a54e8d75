//! Tree traversal.
//!
//! Traversal is pre-order in document order. Children are read *after* the
//! callback runs on their parent, so a callback may rewrite a node and the
//! walk continues into whatever the node now contains.
//!
//! Annotations are never entered: literals inside `@Foo("x")` are not
//! expression-position code and rules must not rewrite them.

use crate::ast::{
    Block, CompilationUnit, ExprKind, ExprTag, LambdaBody, Member, MemberKind, Resource,
    StmtKind, StmtTag, TypeDecl,
};
use crate::{ExprArena, ExprId, StmtId};

/// A node reference: either an expression or a statement.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Node {
    Expr(ExprId),
    Stmt(StmtId),
}

/// How far a traversal reaches.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Scope {
    /// Everything, including lambda bodies and nested class bodies.
    Deep,
    /// Stops at lambda bodies, anonymous class bodies, and local types:
    /// only code that executes as part of the enclosing body.
    Body,
}

impl ExprArena {
    /// Direct children of `node`, in document order.
    pub fn children(&self, node: Node, scope: Scope) -> Vec<Node> {
        let mut out = Vec::new();
        match node {
            Node::Expr(id) => self.expr_children(id, scope, &mut out),
            Node::Stmt(id) => self.stmt_children(id, scope, &mut out),
        }
        out
    }

    fn expr_children(&self, id: ExprId, scope: Scope, out: &mut Vec<Node>) {
        let exprs = |out: &mut Vec<Node>, ids: &[ExprId]| {
            out.extend(ids.iter().map(|&e| Node::Expr(e)));
        };
        match self.kind(id) {
            ExprKind::Literal(_)
            | ExprKind::Name(_)
            | ExprKind::This
            | ExprKind::Super
            | ExprKind::ClassLit(_)
            | ExprKind::TypeExpr(_)
            | ExprKind::Annotation(_) => {}
            ExprKind::FieldAccess { target, .. } | ExprKind::MethodRef { target, .. } => {
                out.push(Node::Expr(*target));
            }
            ExprKind::MethodCall { target, args, .. } => {
                out.extend(target.map(Node::Expr));
                exprs(out, args);
            }
            ExprKind::New { args, body, .. } => {
                exprs(out, args);
                if let (Some(members), Scope::Deep) = (body, scope) {
                    out.extend(member_roots(members));
                }
            }
            ExprKind::NewArray { dims, init, .. } => {
                exprs(out, dims);
                out.extend(init.map(Node::Expr));
            }
            ExprKind::ArrayInit(items) => exprs(out, items),
            ExprKind::Unary { operand, .. } => out.push(Node::Expr(*operand)),
            ExprKind::Binary { left, right, .. } => exprs(out, &[*left, *right]),
            ExprKind::Assign { target, value, .. } => exprs(out, &[*target, *value]),
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => exprs(out, &[*cond, *then_expr, *else_expr]),
            ExprKind::Cast { expr, .. }
            | ExprKind::InstanceOf { expr, .. }
            | ExprKind::Paren(expr)
            | ExprKind::Commented { expr, .. } => out.push(Node::Expr(*expr)),
            ExprKind::Index { target, index } => exprs(out, &[*target, *index]),
            ExprKind::Lambda { body, .. } => {
                if scope == Scope::Deep {
                    match body {
                        LambdaBody::Expr(e) => out.push(Node::Expr(*e)),
                        LambdaBody::Block(block) => out.extend(block_roots(block)),
                    }
                }
            }
            ExprKind::Switch { selector, cases } => {
                out.push(Node::Expr(*selector));
                for case in cases {
                    exprs(out, &case.labels);
                    out.extend(case.body.iter().map(|&s| Node::Stmt(s)));
                }
            }
        }
    }

    fn stmt_children(&self, id: StmtId, scope: Scope, out: &mut Vec<Node>) {
        match &self.get_stmt(id).kind {
            StmtKind::Expr(e) | StmtKind::Throw(e) | StmtKind::Yield(e) => {
                out.push(Node::Expr(*e));
            }
            StmtKind::Return(e) => out.extend(e.map(Node::Expr)),
            StmtKind::LocalVar(local) => {
                out.extend(local.declarators.iter().filter_map(|d| d.init.map(Node::Expr)));
            }
            StmtKind::LocalType(ty) => {
                if scope == Scope::Deep {
                    out.extend(type_roots(ty));
                }
            }
            StmtKind::Block(block) => out.extend(block_roots(block)),
            StmtKind::If {
                cond,
                then_stmt,
                else_stmt,
            } => {
                out.push(Node::Expr(*cond));
                out.push(Node::Stmt(*then_stmt));
                out.extend(else_stmt.map(Node::Stmt));
            }
            StmtKind::While { cond, body } => {
                out.push(Node::Expr(*cond));
                out.push(Node::Stmt(*body));
            }
            StmtKind::DoWhile { body, cond } => {
                out.push(Node::Stmt(*body));
                out.push(Node::Expr(*cond));
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                out.extend(init.iter().map(|&s| Node::Stmt(s)));
                out.extend(cond.map(Node::Expr));
                out.extend(update.iter().map(|&e| Node::Expr(e)));
                out.push(Node::Stmt(*body));
            }
            StmtKind::ForEach { iterable, body, .. } => {
                out.push(Node::Expr(*iterable));
                out.push(Node::Stmt(*body));
            }
            StmtKind::Try {
                resources,
                body,
                catches,
                finally,
            } => {
                for resource in resources {
                    match resource {
                        Resource::Decl(local) => out.extend(
                            local.declarators.iter().filter_map(|d| d.init.map(Node::Expr)),
                        ),
                        Resource::Expr(e) => out.push(Node::Expr(*e)),
                    }
                }
                out.extend(block_roots(body));
                for catch in catches {
                    out.extend(block_roots(&catch.body));
                }
                if let Some(finally) = finally {
                    out.extend(block_roots(finally));
                }
            }
            StmtKind::Switch { selector, cases } => {
                out.push(Node::Expr(*selector));
                for case in cases {
                    out.extend(case.labels.iter().map(|&e| Node::Expr(e)));
                    out.extend(case.body.iter().map(|&s| Node::Stmt(s)));
                }
            }
            StmtKind::Synchronized { lock, body } => {
                out.push(Node::Expr(*lock));
                out.extend(block_roots(body));
            }
            StmtKind::Labeled { body, .. } => out.push(Node::Stmt(*body)),
            StmtKind::Assert { cond, message } => {
                out.push(Node::Expr(*cond));
                out.extend(message.map(Node::Expr));
            }
            StmtKind::Break(_) | StmtKind::Continue(_) | StmtKind::Empty => {}
        }
    }

    /// All nodes reachable from `roots`, pre-order.
    pub fn preorder(&self, roots: Vec<Node>, scope: Scope) -> Vec<Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Node> = roots.into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node, scope).into_iter().rev());
        }
        out
    }

    /// Pre-order walk that lets the callback mutate the arena.
    ///
    /// The callback sees each node before its children are read.
    pub fn walk_mut<F>(&mut self, roots: Vec<Node>, scope: Scope, mut f: F)
    where
        F: FnMut(&mut ExprArena, Node),
    {
        let mut stack: Vec<Node> = roots.into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            f(self, node);
            stack.extend(self.children(node, scope).into_iter().rev());
        }
    }

    /// Expressions of the given kind under `roots`, in document order.
    pub fn find_exprs(&self, roots: Vec<Node>, tag: ExprTag) -> Vec<ExprId> {
        self.preorder(roots, Scope::Deep)
            .into_iter()
            .filter_map(|node| match node {
                Node::Expr(id) if self.kind(id).tag() == tag => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Statements of the given kind under `roots`, in document order.
    pub fn find_stmts(&self, roots: Vec<Node>, tag: StmtTag, scope: Scope) -> Vec<StmtId> {
        self.preorder(roots, scope)
            .into_iter()
            .filter_map(|node| match node {
                Node::Stmt(id) if self.get_stmt(id).kind.tag() == tag => Some(id),
                _ => None,
            })
            .collect()
    }
}

/// Statement roots of a block.
pub fn block_roots(block: &Block) -> Vec<Node> {
    block.stmts.iter().map(|&s| Node::Stmt(s)).collect()
}

/// Roots of a sequence of members: field initializers, method and
/// initializer bodies, and nested types. Annotation element defaults are
/// annotation values and are skipped.
pub fn member_roots(members: &[Member]) -> Vec<Node> {
    let mut out = Vec::new();
    for member in members {
        match &member.kind {
            MemberKind::Field(field) => {
                out.extend(field.declarators.iter().filter_map(|d| d.init.map(Node::Expr)));
            }
            MemberKind::Method(method) => {
                if let Some(body) = &method.body {
                    out.extend(block_roots(body));
                }
            }
            MemberKind::Initializer { body, .. } => out.extend(block_roots(body)),
            MemberKind::Type(ty) => out.extend(type_roots(ty)),
        }
    }
    out
}

/// Roots of a type body, including enum constant arguments and bodies.
pub fn type_roots(ty: &TypeDecl) -> Vec<Node> {
    let mut out = Vec::new();
    for constant in &ty.enum_constants {
        if let Some(args) = &constant.args {
            out.extend(args.iter().map(|&e| Node::Expr(e)));
        }
        if let Some(body) = &constant.body {
            out.extend(member_roots(body));
        }
    }
    out.extend(member_roots(&ty.members));
    out
}

/// Roots of every type declared in the unit.
pub fn unit_roots(unit: &CompilationUnit) -> Vec<Node> {
    unit.types.iter().flat_map(type_roots).collect()
}

/// Calls `f` on every member type declaration, outermost first.
///
/// Local and anonymous classes are not included.
pub fn for_each_type_mut(types: &mut [TypeDecl], f: &mut dyn FnMut(&mut TypeDecl)) {
    for ty in types {
        f(ty);
        for member in &mut ty.members {
            if let MemberKind::Type(inner) = &mut member.kind {
                for_each_type_mut(std::slice::from_mut(inner), f);
            }
        }
    }
}

#[cfg(test)]
mod tests;
