//! Declaration modifiers.

use bitflags::bitflags;

bitflags! {
    /// Java declaration modifiers.
    ///
    /// Annotations are kept separately on each declaration; this set only
    /// holds keyword modifiers. Rendering uses [`Modifiers::keywords`], which
    /// yields the canonical JLS order regardless of source order.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
        const SEALED = 1 << 6;
        const NON_SEALED = 1 << 7;
        const TRANSIENT = 1 << 8;
        const VOLATILE = 1 << 9;
        const SYNCHRONIZED = 1 << 10;
        const NATIVE = 1 << 11;
        const STRICTFP = 1 << 12;
        const DEFAULT = 1 << 13;

        /// Any access modifier.
        const VISIBILITY = Self::PUBLIC.bits() | Self::PROTECTED.bits() | Self::PRIVATE.bits();
    }
}

/// Canonical modifier order (JLS 8.1.1, 8.3.1, 8.4.3).
const ORDER: [(Modifiers, &str); 14] = [
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::DEFAULT, "default"),
    (Modifiers::STATIC, "static"),
    (Modifiers::SEALED, "sealed"),
    (Modifiers::NON_SEALED, "non-sealed"),
    (Modifiers::FINAL, "final"),
    (Modifiers::TRANSIENT, "transient"),
    (Modifiers::VOLATILE, "volatile"),
    (Modifiers::SYNCHRONIZED, "synchronized"),
    (Modifiers::NATIVE, "native"),
    (Modifiers::STRICTFP, "strictfp"),
];

impl Modifiers {
    /// Parse a single modifier keyword.
    pub fn from_keyword(word: &str) -> Option<Modifiers> {
        ORDER
            .iter()
            .find(|(_, kw)| *kw == word)
            .map(|(flag, _)| *flag)
    }

    /// Keywords for the set flags, in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        ORDER
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, kw)| *kw)
    }

    /// `public static` without `final`.
    pub fn is_public_mutable_static(self) -> bool {
        self.contains(Modifiers::PUBLIC | Modifiers::STATIC) && !self.contains(Modifiers::FINAL)
    }
}
