#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vulnfix_fmt::render;
use vulnfix_parse::parse;

use super::*;
use crate::config::RuleConfig;
use crate::constants::ConstantTable;

/// Apply one rule, flush constants, and render.
fn run_with(rule: &dyn Rule, config: &RuleConfig, source: &str) -> (String, usize) {
    let mut unit = parse(source).unwrap();
    let mut constants = ConstantTable::new();
    constants.seed(&unit);
    let count = {
        let mut cx = RuleContext {
            unit: &mut unit,
            constants: &mut constants,
            config,
        };
        rule.apply(&mut cx).unwrap()
    };
    constants.flush(&mut unit).unwrap();
    (render(&unit), count)
}

fn run(rule: &dyn Rule, source: &str) -> (String, usize) {
    run_with(rule, &RuleConfig::default(), source)
}

// Registry

#[test]
fn standard_order_matches_ids() {
    assert_eq!(Pipeline::standard().ids(), RuleId::ALL);
}

#[test]
fn rule_ids_round_trip_through_names() {
    for id in RuleId::ALL {
        assert_eq!(id.as_str().parse::<RuleId>(), Ok(id));
    }
    assert!("no-such-rule".parse::<RuleId>().is_err());
    assert_eq!(RuleId::MissingHashCode.to_string(), "missing-hashcode");
}

#[test]
fn only_keeps_standard_order() {
    let pipeline = Pipeline::only(&[RuleId::ResourceScope, RuleId::LoggerPresence]);
    assert_eq!(
        pipeline.ids(),
        [RuleId::LoggerPresence, RuleId::ResourceScope]
    );
}

// Logger

#[test]
fn logger_added_to_each_type() {
    let (out, count) = run(
        &LoggerPresence,
        "class A {\n    int n;\n    static class B {}\n}\ninterface I {}\n@interface Marker {}\n",
    );
    assert_eq!(count, 3);
    assert_eq!(
        out,
        "class A {
    private static final Logger log = LoggerFactory.getLogger(A.class);
    int n;

    static class B {
        private static final Logger log = LoggerFactory.getLogger(B.class);
    }
}

interface I {
    Logger log = LoggerFactory.getLogger(I.class);
}

@interface Marker {}
"
    );
}

#[test]
fn logger_not_duplicated() {
    let source = "class A {\n    private static final Logger log = LoggerFactory.getLogger(A.class);\n}\n";
    let (out, count) = run(&LoggerPresence, source);
    assert_eq!(count, 0);
    assert_eq!(out, source);
}

#[test]
fn logger_qualified_when_name_taken() {
    let (out, _) = run(
        &LoggerPresence,
        "import java.util.logging.Logger;\n\nclass A {}\n",
    );
    assert!(out.contains(
        "private static final org.slf4j.Logger log = LoggerFactory.getLogger(A.class);"
    ));
}

// Console

#[test]
fn println_statement_logs_constant() {
    let (out, count) = run(
        &ConsoleRedirect,
        "class A {\n    void f(int n) {\n        System.out.println(\"Starting job\");\n        System.out.print(n);\n        System.err.println(\"e\");\n        System.out.println();\n    }\n}\n",
    );
    assert_eq!(count, 2);
    assert_eq!(
        out,
        "class A {
    public static final String CONST_STARTING_JOB = \"Starting job\";

    void f(int n) {
        log.info(CONST_STARTING_JOB);
        log.info(n);
        System.err.println(\"e\");
        System.out.println();
    }
}
"
    );
}

#[test]
fn residual_console_covers_err_and_empty() {
    let (out, count) = run(
        &ResidualConsole,
        "class A {\n    void f() {\n        System.err.println(\"e\");\n        System.out.println();\n        String s = check(System.out.print(1));\n    }\n}\n",
    );
    assert_eq!(count, 3);
    assert!(out.contains("log.info(\"e\");"));
    assert!(out.contains("log.info(\"\");"));
    assert!(out.contains("String s = check(log.info(1));"));
}

// Literals

#[test]
fn call_arguments_become_constants() {
    let (out, count) = run(
        &LiteralExtraction,
        "class A {\n    @SuppressWarnings(\"x\")\n    void f() {\n        use(\"a b\", \"a-b\", 1);\n        use(\"a b\");\n        String s = \"kept\";\n        use(\"in\" + s);\n        new Thing(\"ctor\");\n    }\n}\n",
    );
    assert_eq!(count, 3);
    assert_eq!(
        out,
        "class A {
    public static final String CONST_A_B = \"a b\";
    public static final String CONST_A_B_2 = \"a-b\";

    @SuppressWarnings(\"x\")
    void f() {
        use(CONST_A_B, CONST_A_B_2, 1);
        use(CONST_A_B);
        String s = \"kept\";
        use(\"in\" + s);
        new Thing(\"ctor\");
    }
}
"
    );
}

#[test]
fn nested_type_literals_belong_to_top_level_type() {
    let (out, _) = run(
        &LiteralExtraction,
        "class A {\n    static class B {\n        void f() {\n            use(\"x\");\n        }\n    }\n}\n",
    );
    assert!(out.starts_with("class A {\n    public static final String CONST_X = \"x\";\n"));
}

#[test]
fn existing_constant_is_reused() {
    let source = "class A {\n    public static final String CONST_X = \"x\";\n\n    void f() {\n        use(\"x\");\n    }\n}\n";
    let (out, _) = run(&LiteralExtraction, source);
    assert_eq!(out, source.replace("use(\"x\")", "use(CONST_X)"));
}

#[test]
fn constants_precede_static_initializers() {
    let (out, _) = run(
        &LiteralExtraction,
        "class A {\n    static final Pattern P = Pattern.compile(\"[a-z]+\");\n    private int n;\n}\n",
    );
    assert_eq!(
        out,
        "class A {
    public static final String CONST__A_Z_ = \"[a-z]+\";
    static final Pattern P = Pattern.compile(CONST__A_Z_);
    private int n;
}
"
    );
}

#[test]
fn enum_constant_arguments_are_qualified() {
    let (out, count) = run(
        &LiteralExtraction,
        "enum Color {\n    RED(String.valueOf(\"r\"));\n\n    void f() {\n        use(\"r\");\n    }\n}\n",
    );
    assert_eq!(count, 2);
    assert!(out.contains("RED(String.valueOf(Color.CONST_R))"), "{out}");
    assert!(out.contains("public static final String CONST_R = \"r\";"), "{out}");
    assert!(out.contains("use(CONST_R);"), "{out}");
}

// Equality

#[test]
fn object_comparisons_use_objects_equals() {
    let (out, count) = run(
        &ReferenceEquality,
        "class A {\n    int n;\n    boolean f(String input, String expected, int k, int[] xs, Object o) {\n        if (input == expected) return true;\n        if (input != expected) return false;\n        if (k == 3 || n == k || xs[0] == k || xs.length == 0) return true;\n        if (o == null || this == o || \"a\" == \"b\") return false;\n        if (input.length() == k || (k + 1) == n) return false;\n        return (input) == o;\n    }\n}\n",
    );
    assert_eq!(count, 3);
    assert!(out.contains("if (Objects.equals(input, expected))"));
    assert!(out.contains("if (!Objects.equals(input, expected))"));
    assert!(out.contains("if (k == 3 || n == k || xs[0] == k || xs.length == 0)"));
    assert!(out.contains("if (o == null || this == o || \"a\" == \"b\")"));
    assert!(out.contains("if (input.length() == k || (k + 1) == n)"));
    assert!(out.contains("return Objects.equals(input, o);"));
}

#[test]
fn local_primitives_are_left_alone() {
    let (_, count) = run(
        &ReferenceEquality,
        "class A {\n    void f() {\n        long a = 1, b = 2;\n        for (char c : cs) {\n            if (a == b || c == 'x') g();\n        }\n    }\n}\n",
    );
    assert_eq!(count, 0);
}

// Secrets

#[test]
fn credentials_read_from_environment() {
    let (out, count) = run(
        &HardcodedCredential,
        "class A {\n    private String dbPassword = \"hunter2\";\n    private static final String CONST_KEY = \"k\";\n    void f() {\n        String apiKey = \"abc\", other = \"x\";\n        String secretToken = compute();\n    }\n}\n",
    );
    assert_eq!(count, 2);
    assert!(out.contains("private String dbPassword = System.getenv(\"DB_PASSWORD\");"));
    assert!(out.contains("private static final String CONST_KEY = \"k\";"));
    assert!(out.contains("String apiKey = System.getenv(\"API_KEY\"), other = \"x\";"));
    assert!(out.contains("String secretToken = compute();"));
}

#[test]
fn long_string_fields_lose_their_value() {
    let (out, count) = run(
        &HardcodedToken,
        "class A {\n    public static final String TOKEN = \"abcdefghijklmnopqrstuvwxyz\";\n    private String shortOne = \"abc\";\n    public static final String CONST_LONG_VALUE_HERE_AND_MORE = \"long value here and more\";\n}\ninterface I {\n    String T = \"abcdefghijklmnopqrstuvwxyz\";\n}\n",
    );
    assert_eq!(count, 1);
    assert!(out.contains("    public static String TOKEN;\n"));
    assert!(out.contains("private String shortOne = \"abc\";"));
    assert!(out.contains("CONST_LONG_VALUE_HERE_AND_MORE = \"long value here and more\";"));
    assert!(out.contains("String T = \"abcdefghijklmnopqrstuvwxyz\";"));
}

// Injection

#[test]
fn concatenated_query_is_flagged() {
    let (out, count) = run(
        &SqlLiteral,
        "class A {\n    void f(String id) {\n        String q = \"SELECT * FROM t WHERE id = '\" + id + \"'\";\n        String s = \"hello \" + id;\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert!(out.contains(
        "String q = /* SECURITY: use a parameterized query (PreparedStatement) instead of string concatenation */ \"SELECT * FROM t WHERE id = '\";"
    ));
    assert!(out.contains("String s = \"hello \" + id;"));
}

#[test]
fn files_resolve_under_base() {
    let (out, count) = run(
        &PathTraversal,
        "class A {\n    File f(String name) {\n        new File(a, b);\n        return new java.io.File(name);\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert!(out.contains(
        "return Paths.get(\"/app/data\").resolve(name).normalize().toFile();"
    ));
    assert!(out.contains("new File(a, b);"));
}

#[test]
fn exec_runs_fixed_command() {
    let config = RuleConfig {
        command: vec!["ls".to_string(), "-l".to_string()],
        ..RuleConfig::default()
    };
    let (out, count) = run_with(
        &CommandInjection,
        &config,
        "class A {\n    void f(String cmd) throws IOException {\n        Runtime.getRuntime().exec(cmd);\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert!(out.contains("new ProcessBuilder(\"ls\", \"-l\").start();"));
}

// Crypto

#[test]
fn weak_primitives_replaced() {
    let source = "class A {\n    void f() throws Exception {\n        Random r = new Random(42);\n        MessageDigest d = MessageDigest.getInstance(\"MD5\");\n        MessageDigest s = MessageDigest.getInstance(\"SHA-1\");\n    }\n}\n";
    let (out, count) = run(&WeakRandom, source);
    assert_eq!(count, 1);
    assert!(out.contains("Random r = new SecureRandom();"));
    let (out, count) = run(&WeakHash, source);
    assert_eq!(count, 1);
    assert!(out.contains("MessageDigest.getInstance(\"SHA-256\");"));
    assert!(out.contains("MessageDigest.getInstance(\"SHA-1\");"));
}

// Logging

#[test]
fn password_messages_redacted_once() {
    let source = "class A {\n    void f(String password) {\n        log.info(\"user password: \" + password);\n        log.info(\"fine\");\n        log.info(\"Sensitive data redacted\", password);\n    }\n}\n";
    let (out, count) = run(&SensitiveLogging, source);
    assert_eq!(count, 1);
    assert!(out.contains("log.info(\"Sensitive data redacted\");"));
    assert!(out.contains("log.info(\"fine\");"));
    let (again, count) = run(&SensitiveLogging, &out);
    assert_eq!(count, 0);
    assert_eq!(again, out);
}

#[test]
fn redaction_constant_counts_as_redacted() {
    let source = "class A {\n    public static final String CONST_SENSITIVE_DATA_REDACTED = \"Sensitive data redacted\";\n\n    void f(String password) {\n        log.info(CONST_SENSITIVE_DATA_REDACTED, password);\n    }\n}\n";
    let (out, count) = run(&SensitiveLogging, source);
    assert_eq!(count, 0);
    assert_eq!(out, source);
}

// Exceptions

#[test]
fn empty_handlers_log() {
    let (out, count) = run(
        &EmptyCatch,
        "class A {\n    void f() {\n        try {\n            g();\n        } catch (IOException ex) {\n        } catch (RuntimeException e) {\n            throw e;\n        }\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert!(out.contains(
        "} catch (IOException ex) {\n            log.error(ex.getMessage(), ex);\n        } catch (RuntimeException e) {\n            throw e;\n        }"
    ));
}

#[test]
fn innermost_handler_becomes_cause() {
    let (out, count) = run(
        &SwallowedException,
        "class A {\n    void f() {\n        try {\n            g();\n        } catch (IOException outer) {\n            try {\n                h();\n            } catch (SQLException inner) {\n                throw new RuntimeException();\n            }\n            throw new RuntimeException();\n        }\n        throw new RuntimeException();\n    }\n}\n",
    );
    assert_eq!(count, 2);
    assert!(out.contains("throw new RuntimeException(inner);"));
    assert!(out.contains("throw new RuntimeException(outer);"));
    assert!(out.contains("    throw new RuntimeException();\n    }\n}"));
}

#[test]
fn throws_exception_removed() {
    let (out, count) = run(
        &OverbroadThrows,
        "class A {\n    void f() throws IOException, Exception {}\n\n    void g() throws java.lang.Exception {}\n}\n",
    );
    assert_eq!(count, 2);
    assert_eq!(
        out,
        "class A {\n    void f() throws IOException {}\n\n    void g() {}\n}\n"
    );
}

// hashCode

#[test]
fn hashcode_from_compared_fields() {
    let (out, count) = run(
        &MissingHashCode,
        "class P {\n    private static int created;\n    private String name;\n    private int age;\n    private String note;\n\n    @Override\n    public boolean equals(Object o) {\n        if (!(o instanceof P)) return false;\n        P other = (P) o;\n        return age == other.age && Objects.equals(this.name, other.name);\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert!(out.ends_with(
        "    @Override\n    public int hashCode() {\n        return Objects.hash(name, age);\n    }\n}\n"
    ));
}

#[test]
fn hashcode_falls_back_to_class_name() {
    let (out, count) = run(
        &MissingHashCode,
        "class P {\n    public boolean equals(Object o) {\n        return o instanceof P;\n    }\n\n    public int size() {\n        return 0;\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert!(out.contains(
        "    }\n\n    @Override\n    public int hashCode() {\n        return getClass().getName().hashCode();\n    }\n\n    public int size() {"
    ));
    let (_, count) = run(&MissingHashCode, &out);
    assert_eq!(count, 0);
}

// Exposure

#[test]
fn mutable_returns_are_copied() {
    let (out, count) = run(
        &MutableExposure,
        "class A {\n    private Date created;\n    private Calendar when;\n\n    Date created() {\n        return this.created;\n    }\n\n    Calendar when() {\n        Runnable r = () -> {};\n        return when;\n    }\n\n    Date now() {\n        return new Date();\n    }\n}\n",
    );
    assert_eq!(count, 2);
    assert!(out.contains(
        "return this.created == null ? null : new Date(this.created.getTime());"
    ));
    assert!(out.contains("return when == null ? null : (Calendar) when.clone();"));
    assert!(out.contains("return new Date();"));
}

#[test]
fn calendar_return_is_cloned() {
    let (out, count) = run(
        &MutableExposure,
        "class A {\n    private java.util.Calendar cal;\n\n    java.util.Calendar cal() {\n        return cal;\n    }\n}\n",
    );
    assert_eq!(count, 1);
    assert!(
        out.contains("return cal == null ? null : (java.util.Calendar) cal.clone();"),
        "{out}"
    );
}

#[test]
fn public_statics_made_private() {
    let (out, count) = run(
        &PublicMutableStatic,
        "class A {\n    public static int count = 0;\n    public static String a, b = \"x\";\n    public static final int MAX = 1;\n}\ninterface I {\n    public static int X = 1;\n}\n",
    );
    assert_eq!(count, 2);
    assert!(out.contains("private static final int count = 0;"));
    assert!(out.contains("private static String a, b = \"x\";"));
    assert!(out.contains("public static final int MAX = 1;"));
    assert!(out.contains("public static int X = 1;"));
}

// Serial

#[test]
fn serializable_gets_version() {
    let (out, count) = run(
        &SerialVersion,
        "class A implements java.io.Serializable {\n    private static final Logger log = LoggerFactory.getLogger(A.class);\n    private int n;\n}\nclass B implements Serializable {\n    private static final long serialVersionUID = 7L;\n}\nclass C {}\n",
    );
    assert_eq!(count, 1);
    assert!(out.contains(
        "    private static final Logger log = LoggerFactory.getLogger(A.class);\n    private static final long serialVersionUID = 1L;\n    private int n;\n"
    ));
}

// Validation

#[test]
fn request_strings_are_bounded() {
    let (out, count) = run(
        &RequestValidation,
        "class C {\n    String f(@RequestParam String q, @PathVariable(\"id\") String id, @RequestParam int n, @RequestParam @Size(max = 9) String s, String plain) {\n        return q;\n    }\n}\n",
    );
    assert_eq!(count, 2);
    assert!(out.contains(
        "String f(@RequestParam @Size(max = 255) String q, @PathVariable(\"id\") @Size(max = 255) String id, @RequestParam int n, @RequestParam @Size(max = 9) String s, String plain)"
    ));
}
