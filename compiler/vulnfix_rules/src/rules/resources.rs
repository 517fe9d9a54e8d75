//! JDBC resource scoping.
//!
//! Local `Connection`/`Statement`/`ResultSet` declarations are moved into
//! try-with-resources headers so they are closed on every path. Each
//! statement list is rebuilt on its own: statements before the first
//! tracked declaration stay where they are, a run of consecutive tracked
//! declarations becomes one header, and everything after the run becomes
//! the body. A later run inside that body nests another scoped block, so
//! acquisition order and release order are kept.
//!
//! A tracked declaration in a `for` header is hoisted into a scoped block
//! around the loop (and around its label, if any).
//!
//! The method then gets one handler that logs the failure, and a default
//! return when the original body had none.

use std::mem;

use rustc_hash::FxHashSet;
use vulnfix_ir::visitor::{block_roots, for_each_type_mut};
use vulnfix_ir::{
    Block, CatchClause, Comment, ExprArena, ExprId, ExprKind, Literal, LocalVar, MemberKind, MethodDecl,
    Modifiers, Node, Resource, Scope, Stmt, StmtId, StmtKind, StmtTag, TypeRef, VarDeclarator,
};

use super::{log_error_stmt, Rule, RuleContext, RuleId};
use crate::error::RuleError;

/// Types whose instances must be closed.
const TRACKED: [&str; 5] = [
    "Connection",
    "Statement",
    "PreparedStatement",
    "CallableStatement",
    "ResultSet",
];

/// Names tried, in order, for the handler's exception variable before
/// falling back to `e1`, `e2`, ...
const CATCH_NAMES: [&str; 2] = ["e", "ex"];

pub struct ResourceScope;

impl Rule for ResourceScope {
    fn id(&self) -> RuleId {
        RuleId::ResourceScope
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let unit = &mut *cx.unit;
        let arena = &mut unit.arena;
        let mut count = 0;
        let mut failure = None;
        for_each_type_mut(&mut unit.types, &mut |ty| {
            for member in &mut ty.members {
                let MemberKind::Method(method) = &mut member.kind else {
                    continue;
                };
                if method.is_constructor() || failure.is_some() {
                    continue;
                }
                match scope_method(arena, method) {
                    Ok(true) => count += 1,
                    Ok(false) => {}
                    Err(err) => failure = Some(err),
                }
            }
        });
        failure.map_or(Ok(count), Err)
    }
}

fn is_tracked(ty: &TypeRef) -> bool {
    TRACKED.iter().any(|simple| ty.is_named("java.sql", simple))
}

fn is_tracked_decl(arena: &ExprArena, id: StmtId) -> bool {
    matches!(&arena.get_stmt(id).kind, StmtKind::LocalVar(local) if is_tracked(&local.ty))
}

/// Rewrite one method. Returns whether anything changed.
fn scope_method(arena: &mut ExprArena, method: &mut MethodDecl) -> Result<bool, RuleError> {
    let Some(body) = &mut method.body else {
        return Ok(false);
    };
    let roots = block_roots(body);
    let tracked = arena
        .find_stmts(roots.clone(), StmtTag::LocalVar, Scope::Body)
        .into_iter()
        .any(|id| is_tracked_decl(arena, id));
    if !tracked {
        return Ok(false);
    }
    let had_return = !arena
        .find_stmts(roots.clone(), StmtTag::Return, Scope::Body)
        .is_empty();
    let catch_name = free_catch_name(arena, &roots, method.params.iter().map(|p| p.name.as_str()));

    let (mut stmts, top) = scope_list(arena, mem::take(&mut body.stmts))?;
    let handler = CatchClause {
        modifiers: Modifiers::empty(),
        types: vec![TypeRef::simple("Exception")],
        body: Block::new(vec![log_error_stmt(arena, &catch_name)]),
        name: catch_name,
    };
    match top {
        Some(scoped) => {
            if let StmtKind::Try { catches, .. } = &mut arena.get_stmt_mut(scoped).kind {
                catches.push(handler);
            }
        }
        None => {
            let inner = Block {
                stmts,
                trailing_comments: mem::take(&mut body.trailing_comments),
            };
            let wrapped = arena.alloc_stmt_kind(StmtKind::Try {
                resources: Vec::new(),
                body: inner,
                catches: vec![handler],
                finally: None,
            });
            stmts = vec![wrapped];
        }
    }

    if let Some(return_type) = &method.return_type {
        if !return_type.is_void() && !had_return {
            let value = default_value(arena, return_type);
            stmts.push(arena.return_stmt(Some(value)));
        }
    }
    body.stmts = stmts;
    Ok(true)
}

/// Rebuild a statement list. Returns the new list and the scoped block
/// created directly in it, if any.
fn scope_list(
    arena: &mut ExprArena,
    stmts: Vec<StmtId>,
) -> Result<(Vec<StmtId>, Option<StmtId>), RuleError> {
    let mut out = Vec::with_capacity(stmts.len());
    let mut rest = stmts.into_iter().peekable();
    while let Some(&id) = rest.peek() {
        if is_tracked_decl(arena, id) {
            break;
        }
        rest.next();
        scope_nested(arena, id)?;
        out.push(id);
    }
    if rest.peek().is_none() {
        return Ok((out, None));
    }

    let mut resources = Vec::new();
    let mut comments = Vec::new();
    while let Some(&id) = rest.peek() {
        if !is_tracked_decl(arena, id) {
            break;
        }
        rest.next();
        let (local, mut attached) = take_local(arena, id)?;
        comments.append(&mut attached);
        resources.extend(split_declarators(arena, local));
    }
    let (inner, _) = scope_list(arena, rest.collect())?;
    let scoped = arena.alloc_stmt(Stmt {
        comments,
        ..Stmt::synthetic(StmtKind::Try {
            resources,
            body: Block::new(inner),
            catches: Vec::new(),
            finally: None,
        })
    });
    out.push(scoped);
    Ok((out, Some(scoped)))
}

/// Detach a local declaration and its comments from statement `id`.
fn take_local(arena: &mut ExprArena, id: StmtId) -> Result<(LocalVar, Vec<Comment>), RuleError> {
    let stmt = arena.get_stmt_mut(id);
    let local = match mem::replace(&mut stmt.kind, StmtKind::Empty) {
        StmtKind::LocalVar(local) => local,
        other => {
            stmt.kind = other;
            return Err(RuleError::shape("local variable declaration", stmt.span));
        }
    };
    let mut comments = mem::take(&mut stmt.comments);
    comments.extend(stmt.trailing.take());
    Ok((local, comments))
}

/// One resource per declarator; an uninitialized declarator gets `null`.
fn split_declarators(arena: &mut ExprArena, local: LocalVar) -> Vec<Resource> {
    let LocalVar {
        modifiers,
        annotations,
        ty,
        declarators,
    } = local;
    declarators
        .into_iter()
        .map(|declarator| {
            let init = match declarator.init {
                Some(init) => init,
                None => arena.null_literal(),
            };
            Resource::Decl(LocalVar {
                modifiers,
                annotations: annotations.clone(),
                ty: ty.clone(),
                declarators: vec![VarDeclarator {
                    init: Some(init),
                    ..declarator
                }],
            })
        })
        .collect()
}

fn scope_block(arena: &mut ExprArena, block: Block) -> Result<Block, RuleError> {
    let (stmts, _) = scope_list(arena, block.stmts)?;
    Ok(Block {
        stmts,
        trailing_comments: block.trailing_comments,
    })
}

/// Rebuild the statement lists nested inside statement `id`.
fn scope_nested(arena: &mut ExprArena, id: StmtId) -> Result<(), RuleError> {
    let kind = arena.replace_stmt(id, StmtKind::Empty);
    let kind = scope_kind(arena, kind)?;
    arena.replace_stmt(id, kind);
    Ok(())
}

fn scope_kind(arena: &mut ExprArena, kind: StmtKind) -> Result<StmtKind, RuleError> {
    let nested = |arena: &mut ExprArena, ids: &[StmtId]| -> Result<(), RuleError> {
        ids.iter().try_for_each(|&id| scope_nested(arena, id))
    };
    Ok(match kind {
        StmtKind::Block(block) => StmtKind::Block(scope_block(arena, block)?),
        StmtKind::If {
            cond,
            then_stmt,
            else_stmt,
        } => {
            nested(arena, &[then_stmt])?;
            nested(arena, else_stmt.as_slice())?;
            StmtKind::If {
                cond,
                then_stmt,
                else_stmt,
            }
        }
        StmtKind::While { cond, body } => {
            nested(arena, &[body])?;
            StmtKind::While { cond, body }
        }
        StmtKind::DoWhile { body, cond } => {
            nested(arena, &[body])?;
            StmtKind::DoWhile { body, cond }
        }
        StmtKind::For {
            init,
            cond,
            update,
            body,
        } => {
            nested(arena, &[body])?;
            let (resources, init) = hoist_tracked(arena, init)?;
            let looped = StmtKind::For {
                init,
                cond,
                update,
                body,
            };
            scoped_around(arena, resources, looped)
        }
        StmtKind::ForEach {
            var,
            iterable,
            body,
        } => {
            nested(arena, &[body])?;
            StmtKind::ForEach {
                var,
                iterable,
                body,
            }
        }
        StmtKind::Labeled { label, body } => {
            let resources = hoist_for_header(arena, body)?;
            nested(arena, &[body])?;
            scoped_around(arena, resources, StmtKind::Labeled { label, body })
        }
        StmtKind::Synchronized { lock, body } => StmtKind::Synchronized {
            lock,
            body: scope_block(arena, body)?,
        },
        StmtKind::Try {
            resources,
            body,
            catches,
            finally,
        } => scope_try(arena, resources, body, catches, finally)?,
        StmtKind::Switch {
            selector,
            mut cases,
        } => {
            for case in &mut cases {
                case.body = scope_list(arena, mem::take(&mut case.body))?.0;
            }
            StmtKind::Switch { selector, cases }
        }
        other => other,
    })
}

/// Split a `for` initializer into the resources it declares and the
/// statements that stay in the header.
fn hoist_tracked(
    arena: &mut ExprArena,
    init: Vec<StmtId>,
) -> Result<(Vec<Resource>, Vec<StmtId>), RuleError> {
    let (hoisted, kept): (Vec<StmtId>, Vec<StmtId>) =
        init.into_iter().partition(|&id| is_tracked_decl(arena, id));
    let mut resources = Vec::new();
    for id in hoisted {
        let (local, _) = take_local(arena, id)?;
        resources.extend(split_declarators(arena, local));
    }
    Ok((resources, kept))
}

/// `hoist_tracked` applied in place to statement `id` when it is a `for`.
fn hoist_for_header(arena: &mut ExprArena, id: StmtId) -> Result<Vec<Resource>, RuleError> {
    let init = match &mut arena.get_stmt_mut(id).kind {
        StmtKind::For { init, .. } => mem::take(init),
        _ => return Ok(Vec::new()),
    };
    let (resources, kept) = hoist_tracked(arena, init)?;
    if let StmtKind::For { init, .. } = &mut arena.get_stmt_mut(id).kind {
        *init = kept;
    }
    Ok(resources)
}

/// `kind` inside a scoped block owning `resources`, or `kind` itself when
/// there are none.
fn scoped_around(arena: &mut ExprArena, resources: Vec<Resource>, kind: StmtKind) -> StmtKind {
    if resources.is_empty() {
        return kind;
    }
    let inner = arena.alloc_stmt_kind(kind);
    StmtKind::Try {
        resources,
        body: Block::new(vec![inner]),
        catches: Vec::new(),
        finally: None,
    }
}

fn scope_try(
    arena: &mut ExprArena,
    resources: Vec<Resource>,
    body: Block,
    catches: Vec<CatchClause>,
    finally: Option<Block>,
) -> Result<StmtKind, RuleError> {
    let body = scope_block(arena, body)?;
    let catches = catches
        .into_iter()
        .map(|catch| {
            Ok(CatchClause {
                body: scope_block(arena, catch.body)?,
                ..catch
            })
        })
        .collect::<Result<Vec<_>, RuleError>>()?;
    let finally = finally.map(|block| scope_block(arena, block)).transpose()?;
    Ok(StmtKind::Try {
        resources,
        body,
        catches,
        finally,
    })
}

/// First of `e`, `ex`, `e1`, `e2`, ... not used by a parameter or local.
fn free_catch_name<'a>(
    arena: &ExprArena,
    roots: &[Node],
    params: impl Iterator<Item = &'a str>,
) -> String {
    let mut used: FxHashSet<String> = params.map(str::to_string).collect();
    for node in arena.preorder(roots.to_vec(), Scope::Deep) {
        let Node::Stmt(id) = node else { continue };
        match &arena.get_stmt(id).kind {
            StmtKind::LocalVar(local) | StmtKind::ForEach { var: local, .. } => {
                used.extend(local.declarators.iter().map(|d| d.name.clone()));
            }
            StmtKind::Try {
                resources,
                catches,
                ..
            } => {
                for resource in resources {
                    if let Resource::Decl(local) = resource {
                        used.extend(local.declarators.iter().map(|d| d.name.clone()));
                    }
                }
                used.extend(catches.iter().map(|c| c.name.clone()));
            }
            _ => {}
        }
    }
    CATCH_NAMES
        .iter()
        .map(|name| (*name).to_string())
        .chain((1..).map(|n| format!("e{n}")))
        .find(|name| !used.contains(name))
        .unwrap_or_else(|| "e".to_string())
}

/// Zero value for a declared return type.
fn default_value(arena: &mut ExprArena, ty: &TypeRef) -> ExprId {
    if ty.is_string() {
        return arena.string_literal("");
    }
    let literal = match (ty.dims, ty.name.as_str()) {
        (0, "byte" | "short" | "int") => Literal::Int("0".into()),
        (0, "long") => Literal::Int("0L".into()),
        (0, "float") => Literal::Float("0.0f".into()),
        (0, "double") => Literal::Float("0.0".into()),
        (0, "boolean") => Literal::Bool(false),
        (0, "char") => Literal::Char("\\0".into()),
        _ => Literal::Null,
    };
    arena.alloc(ExprKind::Literal(literal))
}

#[cfg(test)]
mod tests;
