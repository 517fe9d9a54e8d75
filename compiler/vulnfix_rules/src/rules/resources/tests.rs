#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vulnfix_fmt::render;
use vulnfix_parse::parse;

use super::*;
use crate::config::RuleConfig;
use crate::constants::ConstantTable;

fn scope(source: &str) -> (String, usize) {
    let mut unit = parse(source).unwrap();
    let mut constants = ConstantTable::new();
    let config = RuleConfig::default();
    let mut cx = RuleContext {
        unit: &mut unit,
        constants: &mut constants,
        config: &config,
    };
    let count = ResourceScope.apply(&mut cx).unwrap();
    (render(&unit), count)
}

#[test]
fn connection_in_int_method() {
    let (out, count) = scope(
        "class Dao {\n    int count(DataSource ds) throws SQLException {\n        Connection c = ds.getConnection();\n        c.close();\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert_eq!(
        out,
        "class Dao {
    int count(DataSource ds) throws SQLException {
        try (Connection c = ds.getConnection()) {
            c.close();
        } catch (Exception e) {
            log.error(e.getMessage(), e);
        }
        return 0;
    }
}
"
    );
}

#[test]
fn runs_nest_in_acquisition_order() {
    let (out, _) = scope(
        "class Dao {
    List<String> names(DataSource ds) {
        List<String> out = new ArrayList<>();
        // open
        Connection c = ds.getConnection();
        PreparedStatement ps = c.prepareStatement(SQL), other;
        ps.setInt(1, 2);
        java.sql.ResultSet rs = ps.executeQuery();
        while (rs.next()) {
            out.add(rs.getString(1));
        }
        return out;
    }
}
",
    );
    assert_eq!(
        out,
        "class Dao {
    List<String> names(DataSource ds) {
        List<String> out = new ArrayList<>();
        // open
        try (Connection c = ds.getConnection(); PreparedStatement ps = c.prepareStatement(SQL); PreparedStatement other = null) {
            ps.setInt(1, 2);
            try (java.sql.ResultSet rs = ps.executeQuery()) {
                while (rs.next()) {
                    out.add(rs.getString(1));
                }
                return out;
            }
        } catch (Exception e) {
            log.error(e.getMessage(), e);
        }
    }
}
"
    );
}

#[test]
fn nested_declarations_wrap_whole_body() {
    let (out, _) = scope(
        "class Dao {
    void run(DataSource ds, Exception e) {
        int ex = 0;
        if (ready()) {
            Statement st = ds.getConnection().createStatement();
            st.execute(SQL);
        }
    }
}
",
    );
    assert_eq!(
        out,
        "class Dao {
    void run(DataSource ds, Exception e) {
        try {
            int ex = 0;
            if (ready()) {
                try (Statement st = ds.getConnection().createStatement()) {
                    st.execute(SQL);
                }
            }
        } catch (Exception e1) {
            log.error(e1.getMessage(), e1);
        }
    }
}
"
    );
}

#[test]
fn default_return_matches_declared_type() {
    let cases = [
        ("String", "\"\""),
        ("byte", "0"),
        ("short", "0"),
        ("int", "0"),
        ("long", "0L"),
        ("float", "0.0f"),
        ("double", "0.0"),
        ("boolean", "false"),
        ("char", "'\\0'"),
        ("Object", "null"),
        ("int[]", "null"),
    ];
    for (ty, value) in cases {
        let source = format!(
            "class Dao {{\n    {ty} f(DataSource ds) {{\n        Connection c = ds.getConnection();\n    }}\n}}\n"
        );
        let (out, _) = scope(&source);
        let expected = format!(
            "        try (Connection c = ds.getConnection()) {{}} catch (Exception e) {{\n            log.error(e.getMessage(), e);\n        }}\n        return {value};\n    }}\n}}\n"
        );
        assert!(out.ends_with(&expected), "{ty}:\n{out}");
    }
}

#[test]
fn lambda_returns_do_not_count() {
    let (out, _) = scope(
        "class Dao {\n    int f(DataSource ds) {\n        Connection c = ds.getConnection();\n        run(() -> {\n            return;\n        });\n    }\n}\n",
    );
    assert!(out.ends_with("        return 0;\n    }\n}\n"), "{out}");
}

#[test]
fn untracked_code_is_untouched() {
    let source = "class Dao {
    private Connection c;

    Dao(DataSource ds) {
        Connection c = ds.getConnection();
    }

    void g() {
        Runnable r = () -> {
            Connection c = open();
        };
        Connection[] all = open();
    }
}
";
    let (out, count) = scope(source);
    assert_eq!(count, 0);
    assert_eq!(out, source);
}

#[test]
fn second_pass_changes_nothing() {
    let (once, _) = scope(
        "class Dao {\n    long f(DataSource ds) {\n        Connection c = ds.getConnection();\n        switch (k) {\n            case 1:\n                ResultSet rs = q();\n                use(rs);\n                break;\n        }\n    }\n}\n",
    );
    assert!(once.contains("case 1:\n                    try (ResultSet rs = q()) {\n                        use(rs);\n                        break;\n                    }"), "{once}");
    let (twice, count) = scope(&once);
    assert_eq!(count, 0);
    assert_eq!(twice, once);
}

#[test]
fn catch_names_skip_used_ones() {
    let mut arena = ExprArena::new();
    let name = free_catch_name(&arena, &[], ["e", "ex", "e1"].into_iter());
    assert_eq!(name, "e2");
    let stmt = arena.alloc_stmt_kind(StmtKind::Empty);
    let name = free_catch_name(&arena, &[Node::Stmt(stmt)], std::iter::empty());
    assert_eq!(name, "e");
}

#[test]
fn for_header_resource_wraps_loop() {
    let (out, count) = scope(
        "class Dao {\n    void dump(Statement st) {\n        for (ResultSet rs = st.executeQuery(\"q\"); rs.next();) {\n            print(rs);\n        }\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert_eq!(
        out,
        "class Dao {
    void dump(Statement st) {
        try {
            try (ResultSet rs = st.executeQuery(\"q\")) {
                for (; rs.next();) {
                    print(rs);
                }
            }
        } catch (Exception e) {
            log.error(e.getMessage(), e);
        }
    }
}
"
    );
    let (twice, count) = scope(&out);
    assert_eq!(count, 0);
    assert_eq!(twice, out);
}

#[test]
fn labeled_for_header_is_wrapped_outside_label() {
    let (out, _) = scope(
        "class Dao {\n    void dump(Statement st) {\n        rows: for (ResultSet rs = st.executeQuery(\"q\"); rs.next();) {\n            continue rows;\n        }\n    }\n}\n",
    );
    assert!(out.contains("try (ResultSet rs = st.executeQuery(\"q\")) {"), "{out}");
    let wrapped = out.find("try (ResultSet").unwrap();
    let label = out.find("rows:").unwrap();
    assert!(wrapped < label, "{out}");
    assert!(out.contains("for (; rs.next();)"), "{out}");
}

/// A declaration assigned later keeps its `null` initializer inside the
/// header; the assignment in the body is left for the author.
#[test]
fn null_initialized_connection_keeps_later_assignment() {
    let (out, _) = scope(
        "class Dao {\n    void open(DataSource ds) {\n        Connection c = null;\n        try {\n            c = ds.getConnection();\n        } finally {\n            done();\n        }\n    }\n}\n",
    );
    assert!(out.contains("try (Connection c = null) {"), "{out}");
    assert!(out.contains("c = ds.getConnection();"), "{out}");
}
