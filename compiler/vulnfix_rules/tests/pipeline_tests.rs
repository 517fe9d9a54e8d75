#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Whole-pipeline behavior through `Engine::remediate_source`.

use pretty_assertions::assert_eq;
use vulnfix_rules::{Engine, RuleConfig, RuleId};

fn remediate(source: &str) -> vulnfix_rules::Remediated {
    Engine::default()
        .remediate_source(source)
        .unwrap_or_else(|err| panic!("source does not parse: {err}\n{source}"))
}

#[test]
fn connection_scoped_with_default_return() {
    let out = remediate(
        "package com.acme;

import java.sql.Connection;
import javax.sql.DataSource;

public class Dao {
    int count(DataSource ds) throws SQLException {
        Connection c = ds.getConnection();
        c.close();
    }
}
",
    );
    assert_eq!(
        out.text,
        "package com.acme;

import java.sql.Connection;
import javax.sql.DataSource;
import org.slf4j.Logger;
import org.slf4j.LoggerFactory;

public class Dao {
    private static final Logger log = LoggerFactory.getLogger(Dao.class);

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
    assert_eq!(out.report.count(RuleId::ResourceScope), 1);
    assert_eq!(out.report.count(RuleId::LoggerPresence), 1);
}

#[test]
fn println_becomes_logged_constant() {
    let out = remediate(
        "public class Job {\n    public void run() {\n        System.out.println(\"Starting job\");\n    }\n}\n",
    );
    assert_eq!(
        out.text,
        "import org.slf4j.Logger;
import org.slf4j.LoggerFactory;

public class Job {
    public static final String CONST_STARTING_JOB = \"Starting job\";
    private static final Logger log = LoggerFactory.getLogger(Job.class);

    public void run() {
        log.info(CONST_STARTING_JOB);
    }
}
"
    );
    assert_eq!(out.report.count(RuleId::ConsoleRedirect), 1);
    assert_eq!(out.report.constants_added, 1);
    assert_eq!(
        out.report.imports_added,
        ["org.slf4j.Logger", "org.slf4j.LoggerFactory"]
    );
}

#[test]
fn string_identity_becomes_objects_equals() {
    let out = remediate(
        "public class Check {\n    public boolean same(String input, String expected) {\n        return input == expected;\n    }\n}\n",
    );
    assert!(out.text.contains("import java.util.Objects;\n"));
    assert!(out.text.contains("return Objects.equals(input, expected);"));
    assert_eq!(out.report.count(RuleId::ReferenceEquality), 1);
}

const ACCOUNT: &str = "package com.acme;

import java.io.Serializable;
import java.util.Date;

public class Account implements Serializable {
    public static int instances = 0;
    private String owner;
    private Date opened;
    private String apiToken = \"abcdefghijklmnopqrstuvwxyz0123\";

    public Date getOpened() {
        return opened;
    }

    @Override
    public boolean equals(Object o) {
        if (this == o) return true;
        if (!(o instanceof Account)) return false;
        Account other = (Account) o;
        return owner == other.owner;
    }

    public void audit() throws Exception {
        System.out.println(\"Auditing account\");
        try {
            check(owner);
        } catch (IllegalStateException e) {
        } catch (RuntimeException e) {
            throw new RuntimeException();
        }
        Random r = new Random();
    }

    public int load(DataSource ds) {
        Connection c = ds.getConnection();
        Statement st = c.createStatement();
        st.execute(QUERY);
    }
}
";

#[test]
fn account_fully_remediated() {
    let out = remediate(ACCOUNT);
    assert_eq!(
        out.text,
        "package com.acme;

import java.io.Serializable;
import java.util.Date;
import org.slf4j.Logger;
import org.slf4j.LoggerFactory;
import java.util.Objects;
import java.security.SecureRandom;

public class Account implements Serializable {
    public static final String CONST_AUDITING_ACCOUNT = \"Auditing account\";
    private static final Logger log = LoggerFactory.getLogger(Account.class);
    private static final int instances = 0;
    private static final long serialVersionUID = 1L;
    private String owner;
    private Date opened;
    private String apiToken;

    public Date getOpened() {
        return opened == null ? null : new Date(opened.getTime());
    }

    @Override
    public boolean equals(Object o) {
        if (this == o)
            return true;
        if (!(o instanceof Account))
            return false;
        Account other = (Account) o;
        return Objects.equals(owner, other.owner);
    }

    @Override
    public int hashCode() {
        return Objects.hash(owner);
    }

    public void audit() {
        log.info(CONST_AUDITING_ACCOUNT);
        try {
            check(owner);
        } catch (IllegalStateException e) {
            log.error(e.getMessage(), e);
        } catch (RuntimeException e) {
            throw new RuntimeException(e);
        }
        Random r = new SecureRandom();
    }

    public int load(DataSource ds) {
        try (Connection c = ds.getConnection(); Statement st = c.createStatement()) {
            st.execute(QUERY);
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
fn second_pass_is_a_no_op() {
    let first = remediate(ACCOUNT);
    let second = remediate(&first.text);
    assert_eq!(second.text, first.text);
    assert_eq!(second.report.total_rewrites(), 0);
    assert_eq!(second.report.constants_added, 0);
    assert!(second.report.imports_added.is_empty());
}

#[test]
fn second_pass_only_extracts_introduced_literals() {
    let first = remediate(
        "class Files {\n    File open(String name) {\n        return new File(name);\n    }\n}\n",
    );
    assert!(first.text.contains("Paths.get(\"/app/data\")"));
    let second = remediate(&first.text);
    assert_eq!(
        second.report.rewrites.keys().copied().collect::<Vec<_>>(),
        [RuleId::LiteralExtraction]
    );
    assert!(second.text.contains("Paths.get(CONST__APP_DATA)"));
    assert!(second
        .text
        .contains("public static final String CONST__APP_DATA = \"/app/data\";"));
    let third = remediate(&second.text);
    assert_eq!(third.text, second.text);
}

#[test]
fn disabled_rules_do_not_run() {
    let config = RuleConfig::default()
        .disable(RuleId::LoggerPresence)
        .disable(RuleId::LiteralExtraction);
    let out = Engine::new(config)
        .remediate_source("class A {\n    void f(String a) {\n        use(\"x\", a == \"y\");\n    }\n}\n")
        .unwrap();
    assert!(!out.text.contains("LoggerFactory"));
    assert!(out.text.contains("use(\"x\", Objects.equals(a, \"y\"));"));
    assert_eq!(out.report.count(RuleId::LoggerPresence), 0);
    assert_eq!(out.report.count(RuleId::ReferenceEquality), 1);
}

#[test]
fn every_log_field_is_unique() {
    let out = remediate(
        "class A {\n    class B {}\n    enum C { X }\n    record D(int n) {}\n    interface E {}\n}\n",
    );
    for name in ["A", "B", "C", "D", "E"] {
        let init = format!("LoggerFactory.getLogger({name}.class)");
        assert_eq!(out.text.matches(&init).count(), 1, "{name}:\n{}", out.text);
    }
}

#[test]
fn parse_errors_are_reported() {
    assert!(Engine::default().remediate_source("class {").is_err());
}

#[test]
fn author_constant_is_not_reused_for_extracted_literal() {
    let out = remediate(
        "class Banner {\n    private static final String WELCOME = \"Welcome to the application!\";\n\n    void show() {\n        System.out.println(\"Welcome to the application!\");\n    }\n}\n",
    );
    assert!(out.text.contains("private static String WELCOME;"), "{}", out.text);
    assert!(
        out.text.contains("log.info(CONST_WELCOME_TO_THE_APPLICATION_);"),
        "{}",
        out.text
    );
    assert!(
        out.text.contains(
            "public static final String CONST_WELCOME_TO_THE_APPLICATION_ = \"Welcome to the application!\";"
        ),
        "{}",
        out.text
    );
    assert!(!out.text.contains("log.info(WELCOME)"), "{}", out.text);
}

#[test]
fn extracted_constants_are_declared_before_their_readers() {
    let out = remediate(
        "class Rules {\n    static final Pattern P = Pattern.compile(\"[a-z]+\");\n\n    enum Color {\n        RED(String.valueOf(\"r\"));\n\n        Color(String code) {}\n    }\n}\n",
    );
    let constant = out
        .text
        .find("public static final String CONST__A_Z_ = \"[a-z]+\";")
        .unwrap_or_else(|| panic!("{}", out.text));
    let reader = out.text.find("Pattern.compile(CONST__A_Z_)").unwrap();
    assert!(constant < reader, "{}", out.text);
    assert!(out.text.contains("RED(String.valueOf(CONST_R))"), "{}", out.text);
}
