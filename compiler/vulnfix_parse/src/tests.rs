#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vulnfix_ir::{
    BinaryOp, CommentKind, ExprKind, LambdaParams, Literal, MemberKind, Modifiers, Resource,
    StmtKind, TypeKind,
};

use super::*;

fn parse_ok(source: &str) -> CompilationUnit {
    match parse(source) {
        Ok(unit) => unit,
        Err(err) => panic!("parse failed: {err}"),
    }
}

fn method_body(unit: &CompilationUnit, index: usize) -> Vec<vulnfix_ir::StmtId> {
    let methods: Vec<_> = unit.types[0]
        .members
        .iter()
        .filter_map(|m| match &m.kind {
            MemberKind::Method(method) => method.body.as_ref().map(|b| b.stmts.clone()),
            _ => None,
        })
        .collect();
    methods[index].clone()
}

#[test]
fn package_imports_and_class() {
    let unit = parse_ok(
        "package com.acme;\n\nimport java.util.List;\nimport static java.lang.Math.*;\n\npublic class Job {}\n",
    );
    assert_eq!(unit.package_name(), Some("com.acme"));
    assert_eq!(unit.imports.len(), 2);
    assert!(unit.imports[1].is_static && unit.imports[1].wildcard);
    assert_eq!(unit.imports[1].path, "java.lang.Math");
    assert_eq!(unit.types[0].name, "Job");
    assert_eq!(unit.types[0].modifiers, Modifiers::PUBLIC);
}

#[test]
fn fields_methods_and_constructors() {
    let unit = parse_ok(
        "class A {
            private static final int X = 1, Y;
            A(int x) { }
            <T> T pick(T a) throws java.io.IOException { return a; }
            abstract void run();
        }",
    );
    let kinds: Vec<_> = unit.types[0]
        .members
        .iter()
        .map(|m| match &m.kind {
            MemberKind::Field(f) => format!("field {}", f.declarators.len()),
            MemberKind::Method(m) if m.is_constructor() => format!("ctor {}", m.name),
            MemberKind::Method(m) => format!("method {} {}", m.name, m.throws.len()),
            _ => "other".to_string(),
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["field 2", "ctor A", "method pick 1", "method run 0"]
    );
}

#[test]
fn enum_record_interface_annotation_type() {
    let unit = parse_ok(
        "enum Color { RED(1) { int f() { return 1; } }, GREEN; Color() {} Color(int x) {} }
         record Point(int x, int y) implements Shape { }
         sealed interface Shape permits Point { default int area() { return 0; } }
         @interface Marker { String value() default \"x\"; }",
    );
    let kinds: Vec<_> = unit.types.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TypeKind::Enum,
            TypeKind::Record,
            TypeKind::Interface,
            TypeKind::Annotation
        ]
    );
    assert_eq!(unit.types[0].enum_constants.len(), 2);
    assert!(unit.types[0].enum_constants[0].body.is_some());
    assert_eq!(unit.types[1].record_components.len(), 2);
    assert!(unit.types[2].modifiers.contains(Modifiers::SEALED));
    assert_eq!(unit.types[2].permits.len(), 1);
}

#[test]
fn local_var_versus_expression_statement() {
    let unit = parse_ok(
        "class A { void f() {
            List<String> xs = new ArrayList<>();
            xs.add(\"a\");
            int[] a = {1, 2};
            i = i + 1;
            var v = 3;
        } }",
    );
    let body = method_body(&unit, 0);
    let tags: Vec<_> = body
        .iter()
        .map(|&s| match &unit.arena.get_stmt(s).kind {
            StmtKind::LocalVar(_) => "local",
            StmtKind::Expr(_) => "expr",
            _ => "other",
        })
        .collect();
    assert_eq!(tags, vec!["local", "expr", "local", "expr", "local"]);
}

#[test]
fn shift_operators_from_adjacent_tokens() {
    let unit = parse_ok("class A { void f() { x = a >> 2; y >>>= 1; Map<K, List<V>> m; } }");
    let body = method_body(&unit, 0);
    let StmtKind::Expr(assign) = unit.arena.get_stmt(body[0]).kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Assign { value, .. } = unit.arena.kind(assign) else {
        panic!("expected assignment");
    };
    assert!(matches!(
        unit.arena.kind(*value),
        ExprKind::Binary {
            op: BinaryOp::Shr,
            ..
        }
    ));
    assert!(matches!(
        unit.arena.get_stmt(body[2]).kind,
        StmtKind::LocalVar(_)
    ));
}

#[test]
fn casts_lambdas_and_method_refs() {
    let unit = parse_ok(
        "class A { void f() {
            Object o = (String) x;
            int n = (int) -y;
            Runnable r = () -> run();
            Function<String, Integer> g = (a) -> a.length();
            BinaryOperator<Integer> h = (Integer a, Integer b) -> { return a + b; };
            Supplier<List<String>> s = ArrayList::new;
            IntFunction<int[]> mk = int[]::new;
            Object p = (x) + 1;
        } }",
    );
    let body = method_body(&unit, 0);
    let init = |i: usize| match &unit.arena.get_stmt(body[i]).kind {
        StmtKind::LocalVar(local) => local.declarators[0].init.unwrap(),
        other => panic!("expected local: {other:?}"),
    };
    assert!(matches!(unit.arena.kind(init(0)), ExprKind::Cast { .. }));
    assert!(matches!(unit.arena.kind(init(1)), ExprKind::Cast { .. }));
    assert!(matches!(
        unit.arena.kind(init(3)),
        ExprKind::Lambda {
            params: LambdaParams::Inferred {
                parenthesized: true,
                ..
            },
            ..
        }
    ));
    assert!(matches!(
        unit.arena.kind(init(4)),
        ExprKind::Lambda {
            params: LambdaParams::Typed(_),
            ..
        }
    ));
    assert!(matches!(unit.arena.kind(init(5)), ExprKind::MethodRef { .. }));
    assert!(matches!(unit.arena.kind(init(6)), ExprKind::MethodRef { .. }));
    assert!(matches!(unit.arena.kind(init(7)), ExprKind::Binary { .. }));
}

#[test]
fn try_with_resources_and_multi_catch() {
    let unit = parse_ok(
        "class A { void f() {
            try (Connection c = ds.getConnection(); stmt) {
                use(c);
            } catch (IOException | SQLException e) {
            } finally {
                done();
            }
        } }",
    );
    let body = method_body(&unit, 0);
    let StmtKind::Try {
        resources,
        catches,
        finally,
        ..
    } = &unit.arena.get_stmt(body[0]).kind
    else {
        panic!("expected try");
    };
    assert!(matches!(resources[0], Resource::Decl(_)));
    assert!(matches!(resources[1], Resource::Expr(_)));
    assert_eq!(catches[0].types.len(), 2);
    assert!(finally.is_some());
}

#[test]
fn switch_forms() {
    let unit = parse_ok(
        "class A { int f(int k) {
            switch (k) { case 1: case 2: a(); break; default: b(); }
            return switch (k) { case 1, 2 -> 10; default -> { yield 20; } };
        } }",
    );
    let body = method_body(&unit, 0);
    let StmtKind::Switch { cases, .. } = &unit.arena.get_stmt(body[0]).kind else {
        panic!("expected switch");
    };
    assert_eq!(cases.len(), 3);
    assert!(cases[0].body.is_empty());
    assert!(cases[2].labels.is_empty());
    let StmtKind::Return(Some(value)) = unit.arena.get_stmt(body[1]).kind else {
        panic!("expected return");
    };
    let ExprKind::Switch { cases, .. } = unit.arena.kind(value) else {
        panic!("expected switch expression");
    };
    assert!(cases.iter().all(|c| c.arrow));
    assert_eq!(cases[0].labels.len(), 2);
}

#[test]
fn comments_attach_to_members_and_statements() {
    let unit = parse_ok(
        "/** Job. */
class Job {
    /** The name. */
    private String name; // trailing

    void run() {
        // first
        a();
        b(); /* after b */
        // dangling
    }
}
",
    );
    let ty = &unit.types[0];
    assert_eq!(ty.comments[0].kind, CommentKind::Doc);
    assert_eq!(ty.members[0].comments[0].text, "/** The name. */");
    assert_eq!(
        ty.members[0].trailing.as_ref().map(|c| c.text.as_str()),
        Some("// trailing")
    );
    let MemberKind::Method(run) = &ty.members[1].kind else {
        panic!("expected method");
    };
    let block = run.body.as_ref().unwrap();
    let first = unit.arena.get_stmt(block.stmts[0]);
    assert_eq!(first.comments[0].text, "// first");
    let second = unit.arena.get_stmt(block.stmts[1]);
    assert_eq!(second.trailing.as_ref().unwrap().text, "/* after b */");
    assert_eq!(block.trailing_comments[0].text, "// dangling");
}

#[test]
fn comment_inside_expression_wraps_primary() {
    let unit = parse_ok("class A { void f() { call(a, /* why */ b); } }");
    let body = method_body(&unit, 0);
    let StmtKind::Expr(call) = unit.arena.get_stmt(body[0]).kind else {
        panic!("expected expression statement");
    };
    let ExprKind::MethodCall { args, .. } = unit.arena.kind(call) else {
        panic!("expected call");
    };
    assert!(matches!(
        unit.arena.kind(args[1]),
        ExprKind::Commented { .. }
    ));
}

#[test]
fn literals_keep_source_spelling() {
    let unit = parse_ok("class A { String s = \"a\\\"b\"; long n = 0x1FL; char c = '\\n'; }");
    let inits: Vec<_> = unit.types[0]
        .fields()
        .map(|f| unit.arena.kind(f.declarators[0].init.unwrap()).clone())
        .collect();
    assert_eq!(
        inits,
        vec![
            ExprKind::Literal(Literal::String("a\\\"b".into())),
            ExprKind::Literal(Literal::Int("0x1FL".into())),
            ExprKind::Literal(Literal::Char("\\n".into())),
        ]
    );
}

#[test]
fn anonymous_class_and_generic_call() {
    let unit = parse_ok(
        "class A { void f() { Runnable r = new Runnable() { public void run() {} }; List<String> l = Collections.<String>emptyList(); } }",
    );
    let body = method_body(&unit, 0);
    let StmtKind::LocalVar(local) = &unit.arena.get_stmt(body[0]).kind else {
        panic!("expected local");
    };
    assert!(matches!(
        unit.arena.kind(local.declarators[0].init.unwrap()),
        ExprKind::New { body: Some(_), .. }
    ));
}

#[test]
fn syntax_error_reports_span() {
    let err = parse("class A { void f() { int x = ; } }").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
    assert!(err.span().start > 0);
}

#[test]
fn lex_error_surfaces_as_parse_error() {
    let err = parse("class A { /* open").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
}

#[test]
fn unsupported_syntax_fails_soft() {
    let err = parse("record R(int x) { R { } }").unwrap_err();
    assert!(matches!(err, ParseError::Unsupported { .. }));
}

#[test]
fn deeply_nested_expression() {
    let mut expr = String::from("1");
    for _ in 0..1_000 {
        expr = format!("({expr} + 1)");
    }
    let source = format!("class A {{ int x = {expr}; }}");
    assert!(parse(&source).is_ok());
}
