//! Type references.
//!
//! Types are kept semantically (qualified name, arguments, dimensions)
//! rather than as raw text, so rules can ask "is this a `java.sql.Connection`"
//! or "is this primitive" without reparsing.

/// A reference to a type as written in source.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeRef {
    /// Possibly qualified name, e.g. `int`, `String`, `java.util.Map.Entry`.
    pub name: String,
    /// `None` when no `<...>` was written; `Some(vec![])` is the diamond `<>`.
    pub args: Option<Vec<TypeArg>>,
    /// Array dimensions (`String[][]` has 2).
    pub dims: u8,
}

/// A type argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeArg {
    Type(TypeRef),
    /// `?`, `? extends T`, `? super T`.
    Wildcard(Option<(WildcardBound, TypeRef)>),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WildcardBound {
    Extends,
    Super,
}

/// A declared type parameter: `T extends Comparable<T> & Serializable`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

const PRIMITIVES: [&str; 8] = [
    "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

impl TypeRef {
    /// A plain, non-generic, non-array type.
    pub fn simple(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            args: None,
            dims: 0,
        }
    }

    /// The `void` pseudo-type used for method return types.
    pub fn void() -> Self {
        TypeRef::simple("void")
    }

    /// Last segment of the (possibly qualified) name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn is_void(&self) -> bool {
        self.dims == 0 && self.name == "void"
    }

    /// Primitive scalar (not an array of primitives).
    pub fn is_primitive(&self) -> bool {
        self.dims == 0 && PRIMITIVES.contains(&self.name.as_str())
    }

    /// `String` or `java.lang.String`, not an array.
    pub fn is_string(&self) -> bool {
        self.dims == 0 && (self.name == "String" || self.name == "java.lang.String")
    }

    /// Matches `simple` either unqualified or as `package.simple`.
    pub fn is_named(&self, package: &str, simple: &str) -> bool {
        if self.dims != 0 {
            return false;
        }
        self.name == simple
            || self
                .name
                .strip_prefix(package)
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|rest| rest == simple)
    }
}
