/*!
A character class over bytes, stored as a 256-bit set.

Byte `ch` lives at bit `ch & 31` of word `ch >> 5`, so [`CharMap::contains()`] is one load, one shift and one mask, without any data-dependent branch.

Classes are usually built once and only read afterwards. All the constructors are `const fn`, so a class can be a `static`:
```
use ib_charmap::map::CharMap;

static VOWELS: CharMap = CharMap::from_bytes(b"aeiou");

assert!(VOWELS.contains(b'e'));
assert!(!VOWELS.contains(b'y'));
assert_eq!(VOWELS.len(), 5);
```
*/
use core::{fmt, ops};

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CharMap([u32; 8]);

impl CharMap {
    /// The empty class.
    pub const fn new() -> Self {
        Self([0; 8])
    }

    /// Marks `ch` as a member. Setting the same byte twice is a no-op.
    #[inline]
    pub fn set(&mut self, ch: u8) {
        *self = self.with(ch);
    }

    /// `const` version of [`set()`](Self::set).
    pub const fn with(mut self, ch: u8) -> Self {
        self.0[(ch >> 5) as usize] |= 1 << (ch & 31);
        self
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    #[cfg_attr(not(feature = "perf-inline"), inline)]
    pub const fn contains(&self, ch: u8) -> bool {
        self.0[(ch >> 5) as usize] & (1 << (ch & 31)) != 0
    }

    /// All bytes in `lo..=hi`. Empty if `lo > hi`.
    pub const fn from_range(lo: u8, hi: u8) -> Self {
        let mut map = Self::new();
        if lo > hi {
            return map;
        }
        let mut ch = lo;
        loop {
            map = map.with(ch);
            if ch == hi {
                break;
            }
            ch += 1;
        }
        map
    }

    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut map = Self::new();
        let mut i = 0;
        while i < bytes.len() {
            map = map.with(bytes[i]);
            i += 1;
        }
        map
    }

    pub const fn union(mut self, other: Self) -> Self {
        let mut i = 0;
        while i < self.0.len() {
            self.0[i] |= other.0[i];
            i += 1;
        }
        self
    }

    pub const fn intersection(mut self, other: Self) -> Self {
        let mut i = 0;
        while i < self.0.len() {
            self.0[i] &= other.0[i];
            i += 1;
        }
        self
    }

    /// Every byte not in this class.
    pub const fn complement(mut self) -> Self {
        let mut i = 0;
        while i < self.0.len() {
            self.0[i] = !self.0[i];
            i += 1;
        }
        self
    }

    /// The number of member bytes.
    pub fn len(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&word| word == 0)
    }

    /// Member bytes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&ch| self.contains(ch))
    }

    /// [`contains()`](Self::contains) bound to this class, i.e. a method value.
    ///
    /// ```
    /// use ib_charmap::class::DIGITS;
    ///
    /// let is_digit = DIGITS.predicate();
    /// assert!(is_digit(b'7'));
    /// assert_eq!(b"ab1".iter().position(|&b| is_digit(b)), Some(2));
    /// ```
    #[inline]
    pub fn predicate(&self) -> impl Fn(u8) -> bool + Copy + '_ {
        move |ch| self.contains(ch)
    }
}

impl fmt::Debug for CharMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CharMap(b\"")?;
        for ch in self.iter() {
            write!(f, "{}", ch.escape_ascii())?;
        }
        f.write_str("\")")
    }
}

impl FromIterator<u8> for CharMap {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl Extend<u8> for CharMap {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        for ch in iter {
            self.set(ch);
        }
    }
}

impl ops::Not for CharMap {
    type Output = Self;

    fn not(self) -> Self {
        self.complement()
    }
}

impl ops::BitOr for CharMap {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl ops::BitAnd for CharMap {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}
