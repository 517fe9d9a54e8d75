#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vulnfix_ir::{BinaryOp, ExprArena, ExprKind, StmtKind, UnaryOp};

use super::*;

fn format(source: &str) -> String {
    render(&vulnfix_parse::parse(source).unwrap())
}

#[test]
fn unit_layout() {
    let source = "package com.acme;\nimport java.util.List;\npublic class Job {\n  private int a;\n  private int b;\n  void run() { if (a > b) return; else { b++; } }\n}\n";
    assert_eq!(
        format(source),
        "package com.acme;

import java.util.List;

public class Job {
    private int a;
    private int b;

    void run() {
        if (a > b)
            return;
        else {
            b++;
        }
    }
}
"
    );
}

#[test]
fn comments_come_back() {
    let source = "/**\n   * Job.\n   */\nclass Job {\n// counter\nint n; // count\nvoid f() {\na(); // after\n// end\n}\n}\n";
    assert_eq!(
        format(source),
        "/**
 * Job.
 */
class Job {
    // counter
    int n; // count

    void f() {
        a(); // after
        // end
    }
}
"
    );
}

#[test]
fn enum_with_bodies_and_constructors() {
    let source = "enum Color { RED(\"r\") { String f() { return \"x\"; } }, GREEN; private final String c; Color() { this(\"g\"); } Color(String c) { this.c = c; } }";
    assert_eq!(
        format(source),
        "enum Color {
    RED(\"r\") {
        String f() {
            return \"x\";
        }
    },
    GREEN;

    private final String c;

    Color() {
        this(\"g\");
    }

    Color(String c) {
        this.c = c;
    }
}
"
    );
}

#[test]
fn try_switch_and_lambdas() {
    let source = "class A { int f(int k) { try (Connection c = ds.getConnection(); s) { run(() -> { go(); }); } catch (IOException | SQLException e) { } finally { done(); } switch (k) { case 1: case 2: a(); break; default: b(); } return switch (k) { case 1 -> 10; default -> { yield 20; } }; } }";
    assert_eq!(
        format(source),
        "class A {
    int f(int k) {
        try (Connection c = ds.getConnection(); s) {
            run(() -> {
                go();
            });
        } catch (IOException | SQLException e) {} finally {
            done();
        }
        switch (k) {
            case 1:
            case 2:
                a();
                break;
            default:
                b();
        }
        return switch (k) {
            case 1 -> 10;
            default -> {
                yield 20;
            }
        };
    }
}
"
    );
}

#[test]
fn annotations_generics_and_records() {
    let source = "@Service public final class S<T extends Comparable<T>> implements Api { @Size(max = 255) private Map<String, List<? super T>> m = new HashMap<>(); public String get(@RequestParam(\"q\") final String q, int... rest) throws IOException { return q; } } record P(int x, int y) {}";
    assert_eq!(
        format(source),
        "@Service
public final class S<T extends Comparable<T>> implements Api {
    @Size(max = 255)
    private Map<String, List<? super T>> m = new HashMap<>();

    public String get(@RequestParam(\"q\") final String q, int... rest) throws IOException {
        return q;
    }
}

record P(int x, int y) {}
"
    );
}

#[test]
fn synthesized_operands_get_parentheses() {
    let mut arena = ExprArena::new();
    let a = arena.name("a");
    let b = arena.name("b");
    let c = arena.name("c");
    let sum = arena.binary(BinaryOp::Add, a, b);
    let product = arena.binary(BinaryOp::Mul, sum, c);
    assert_eq!(render_expr(&arena, product), "(a + b) * c");

    let eq = arena.binary(BinaryOp::Eq, a, b);
    let negated = arena.not(eq);
    assert_eq!(render_expr(&arena, negated), "!(a == b)");

    let call = arena.static_call("Objects", "equals", vec![a, b]);
    let not_equals = arena.not(call);
    assert_eq!(render_expr(&arena, not_equals), "!Objects.equals(a, b)");

    let neg = arena.alloc(ExprKind::Unary {
        op: UnaryOp::Neg,
        operand: c,
    });
    let double_neg = arena.alloc(ExprKind::Unary {
        op: UnaryOp::Neg,
        operand: neg,
    });
    assert_eq!(render_expr(&arena, double_neg), "-(-c)");

    let right = arena.binary(BinaryOp::Sub, b, c);
    let left_assoc = arena.binary(BinaryOp::Sub, a, right);
    assert_eq!(render_expr(&arena, left_assoc), "a - (b - c)");
}

#[test]
fn statement_rendering() {
    let mut arena = ExprArena::new();
    let log = arena.name("log");
    let message = arena.string_value("say \"hi\"");
    let call = arena.call(Some(log), "info", vec![message]);
    let stmt = arena.expr_stmt(call);
    assert_eq!(render_stmt(&arena, stmt), "log.info(\"say \\\"hi\\\"\");");

    let ret = arena.return_stmt(None);
    assert!(matches!(arena.get_stmt(ret).kind, StmtKind::Return(None)));
    assert_eq!(render_stmt(&arena, ret), "return;");
}

#[test]
fn commented_expression_stays_inline() {
    let source = "class A { void f() { call(a, // why\n b); } }";
    assert_eq!(
        format(source),
        "class A {
    void f() {
        call(a, /* why */ b);
    }
}
"
    );
}

#[test]
fn shifts_and_casts_survive() {
    let source = "class A { void f() { x >>>= 2; y = (int) (z >> 1); Object o = (Runnable) () -> run(); } }";
    assert_eq!(
        format(source),
        "class A {
    void f() {
        x >>>= 2;
        y = (int) (z >> 1);
        Object o = (Runnable) () -> run();
    }
}
"
    );
}
