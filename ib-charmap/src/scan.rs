/*!
First-match and first-mismatch scans over a [`CharMap`].

Every function here returns the lowest index whose byte is (`index_*`) or is not (`skip_*`) in the class, or `buf.len()` if there is no such byte. They differ only in how the predicate reaches the loop:

| Variant | Index | Skip |
| --- | --- | --- |
| Hand-written loop | [`index_bytes_any`] | [`skip_bytes_any`] |
| [`index_func`], bound method | [`index_bytes_any_index_func_direct`] | [`skip_bytes_any_index_func_direct`] |
| [`index_func`], closure | [`index_bytes_any_index_func_wrapped`] | [`skip_bytes_any_index_func`] |
| [`index_func_dyn`], `&mut dyn FnMut` | [`index_bytes_any_index_func_dyn`] | [`skip_bytes_any_index_func_dyn`] |
| [`Iterator::position()`] | [`index_bytes_any_position`] | [`skip_bytes_any_position`] |

[`Scan`] enumerates them, and [`Finder`] is the strategy-picking scanner to compare them against.

```
use ib_charmap::{class::{DIGITS, LOWERCASE, UPPERCASE}, scan::*};

let buf = b"0123456789012345678901234567890123456789abc";
assert_eq!(index_bytes_any(buf, &LOWERCASE), 40);
assert_eq!(skip_bytes_any(buf, &DIGITS), 40);
assert_eq!(index_bytes_any(buf, &UPPERCASE), buf.len());
for scan in Scan::ALL {
    assert_eq!(scan.index(buf, &LOWERCASE), 40, "{}", scan.name());
}
```
*/
use crate::map::CharMap;

/// The offset in `buf` of the first byte in `cm`, iterating over the buffer by hand.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn index_bytes_any(buf: &[u8], cm: &CharMap) -> usize {
    for (i, &ch) in buf.iter().enumerate() {
        if cm.contains(ch) {
            return i;
        }
    }
    buf.len()
}

/// The offset in `buf` of the first byte not in `cm`. [`index_bytes_any`] with the condition inverted.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn skip_bytes_any(buf: &[u8], cm: &CharMap) -> usize {
    for (i, &ch) in buf.iter().enumerate() {
        if !cm.contains(ch) {
            return i;
        }
    }
    buf.len()
}

/// The offset of the first byte satisfying `f`, or `buf.len()` if none does.
///
/// Unlike [`Iterator::position()`] there is no `None`: "not found" is the end of the buffer, so the result can be used to slice directly.
///
/// ```
/// use ib_charmap::scan::index_func;
///
/// let buf = b"   x";
/// let i = index_func(buf, |ch| ch != b' ');
/// assert_eq!(&buf[i..], b"x");
/// assert_eq!(index_func(b"", |_| true), 0);
/// ```
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn index_func(buf: &[u8], mut f: impl FnMut(u8) -> bool) -> usize {
    for (i, &ch) in buf.iter().enumerate() {
        if f(ch) {
            return i;
        }
    }
    buf.len()
}

/// [`index_func`] with a dynamically dispatched predicate.
// Not inlined, otherwise the call may be devirtualized
#[inline(never)]
pub fn index_func_dyn(buf: &[u8], f: &mut dyn FnMut(u8) -> bool) -> usize {
    for (i, &ch) in buf.iter().enumerate() {
        if f(ch) {
            return i;
        }
    }
    buf.len()
}

/// [`index_bytes_any`] by passing the bound [`CharMap::predicate()`] to [`index_func`] directly.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn index_bytes_any_index_func_direct(buf: &[u8], cm: &CharMap) -> usize {
    index_func(buf, cm.predicate())
}

/// [`index_bytes_any`] by wrapping [`CharMap::contains()`] in a closure for [`index_func`].
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn index_bytes_any_index_func_wrapped(buf: &[u8], cm: &CharMap) -> usize {
    index_func(buf, |ch| cm.contains(ch))
}

/// [`index_bytes_any`] through [`index_func_dyn`].
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn index_bytes_any_index_func_dyn(buf: &[u8], cm: &CharMap) -> usize {
    index_func_dyn(buf, &mut |ch| cm.contains(ch))
}

/// [`index_bytes_any`] through [`Iterator::position()`].
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn index_bytes_any_position(buf: &[u8], cm: &CharMap) -> usize {
    buf.iter()
        .position(|&ch| cm.contains(ch))
        .unwrap_or(buf.len())
}

/// [`skip_bytes_any`] by passing the complement's bound predicate to [`index_func`].
///
/// A bound method can't be negated, so this pays for building `!cm` on every call.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn skip_bytes_any_index_func_direct(buf: &[u8], cm: &CharMap) -> usize {
    let complement = !*cm;
    index_func(buf, complement.predicate())
}

/// [`skip_bytes_any`] by wrapping the negated [`CharMap::contains()`] in a closure for [`index_func`].
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn skip_bytes_any_index_func(buf: &[u8], cm: &CharMap) -> usize {
    index_func(buf, |ch| !cm.contains(ch))
}

/// [`skip_bytes_any`] through [`index_func_dyn`].
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn skip_bytes_any_index_func_dyn(buf: &[u8], cm: &CharMap) -> usize {
    index_func_dyn(buf, &mut |ch| !cm.contains(ch))
}

/// [`skip_bytes_any`] through [`Iterator::position()`].
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn skip_bytes_any_position(buf: &[u8], cm: &CharMap) -> usize {
    buf.iter()
        .position(|&ch| !cm.contains(ch))
        .unwrap_or(buf.len())
}

/// All scan variants, for running the same input through each of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scan {
    Loop,
    IndexFuncDirect,
    IndexFuncWrapped,
    IndexFuncDyn,
    Position,
}

impl Scan {
    pub const ALL: [Scan; 5] = [
        Scan::Loop,
        Scan::IndexFuncDirect,
        Scan::IndexFuncWrapped,
        Scan::IndexFuncDyn,
        Scan::Position,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Scan::Loop => "loop",
            Scan::IndexFuncDirect => "index_func_direct",
            Scan::IndexFuncWrapped => "index_func_wrapped",
            Scan::IndexFuncDyn => "index_func_dyn",
            Scan::Position => "position",
        }
    }

    pub fn index(self, buf: &[u8], cm: &CharMap) -> usize {
        match self {
            Scan::Loop => index_bytes_any(buf, cm),
            Scan::IndexFuncDirect => index_bytes_any_index_func_direct(buf, cm),
            Scan::IndexFuncWrapped => index_bytes_any_index_func_wrapped(buf, cm),
            Scan::IndexFuncDyn => index_bytes_any_index_func_dyn(buf, cm),
            Scan::Position => index_bytes_any_position(buf, cm),
        }
    }

    pub fn skip(self, buf: &[u8], cm: &CharMap) -> usize {
        match self {
            Scan::Loop => skip_bytes_any(buf, cm),
            Scan::IndexFuncDirect => skip_bytes_any_index_func_direct(buf, cm),
            Scan::IndexFuncWrapped => skip_bytes_any_index_func(buf, cm),
            Scan::IndexFuncDyn => skip_bytes_any_index_func_dyn(buf, cm),
            Scan::Position => skip_bytes_any_position(buf, cm),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    /// Empty class.
    Never,
    /// Full class.
    Always,
    #[cfg(feature = "perf-find")]
    Byte1(u8),
    #[cfg(feature = "perf-find")]
    Byte2(u8, u8),
    #[cfg(feature = "perf-find")]
    Byte3(u8, u8, u8),
    Map,
}

impl Strategy {
    fn new(map: &CharMap) -> Self {
        match map.len() {
            0 => return Strategy::Never,
            256 => return Strategy::Always,
            _ => (),
        }
        #[cfg(feature = "perf-find")]
        {
            let mut bytes = map.iter();
            match (bytes.next(), bytes.next(), bytes.next(), bytes.next()) {
                (Some(b1), None, _, _) => return Strategy::Byte1(b1),
                (Some(b1), Some(b2), None, _) => return Strategy::Byte2(b1, b2),
                (Some(b1), Some(b2), Some(b3), None) => return Strategy::Byte3(b1, b2, b3),
                _ => (),
            }
        }
        Strategy::Map
    }

    #[inline]
    fn find(self, buf: &[u8], map: &CharMap) -> usize {
        match self {
            Strategy::Never => buf.len(),
            Strategy::Always => 0,
            // sse2/avx2 on x86_64
            #[cfg(feature = "perf-find")]
            Strategy::Byte1(b1) => memchr::memchr(b1, buf).unwrap_or(buf.len()),
            #[cfg(feature = "perf-find")]
            Strategy::Byte2(b1, b2) => memchr::memchr2(b1, b2, buf).unwrap_or(buf.len()),
            #[cfg(feature = "perf-find")]
            Strategy::Byte3(b1, b2, b3) => {
                memchr::memchr3(b1, b2, b3, buf).unwrap_or(buf.len())
            }
            Strategy::Map => index_bytes_any(buf, map),
        }
    }
}

/// A scanner for one class that picks its search routine once, at construction.
///
/// - Empty or full classes don't look at the buffer at all.
/// - Classes of one to three bytes use `memchr` (with feature `perf-find`). Skipping works the same way when the *complement* is that small.
/// - Everything else falls back to [`index_bytes_any`].
///
/// ```
/// use ib_charmap::{map::CharMap, scan::Finder};
///
/// let finder = Finder::new(CharMap::from_bytes(b",;"));
/// assert_eq!(finder.index(b"a,b;c"), 1);
/// assert_eq!(finder.index(b"abc"), 3);
/// assert_eq!(finder.skip(b",;,x"), 3);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Finder {
    map: CharMap,
    complement: CharMap,
    index: Strategy,
    skip: Strategy,
}

impl Finder {
    pub fn new(map: CharMap) -> Self {
        let complement = !map;
        Self {
            map,
            complement,
            index: Strategy::new(&map),
            skip: Strategy::new(&complement),
        }
    }

    pub fn map(&self) -> &CharMap {
        &self.map
    }

    /// Same as [`index_bytes_any`] with this finder's class.
    #[inline]
    pub fn index(&self, buf: &[u8]) -> usize {
        self.index.find(buf, &self.map)
    }

    /// Same as [`skip_bytes_any`] with this finder's class.
    #[inline]
    pub fn skip(&self, buf: &[u8]) -> usize {
        self.skip.find(buf, &self.complement)
    }
}

impl From<CharMap> for Finder {
    fn from(map: CharMap) -> Self {
        Self::new(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{DIGITS, LOWERCASE, UPPERCASE};

    const TESTDATA: &[u8] = b"0123456789012345678901234567890123456789abc";

    #[test]
    fn index() {
        assert_eq!(index_bytes_any(TESTDATA, &LOWERCASE), 40);
        assert_eq!(index_bytes_any_index_func_direct(TESTDATA, &LOWERCASE), 40);
        assert_eq!(index_bytes_any_index_func_wrapped(TESTDATA, &LOWERCASE), 40);
        assert_eq!(index_bytes_any_index_func_dyn(TESTDATA, &LOWERCASE), 40);
        assert_eq!(index_bytes_any_position(TESTDATA, &LOWERCASE), 40);
    }

    #[test]
    fn skip() {
        assert_eq!(skip_bytes_any(TESTDATA, &DIGITS), 40);
        assert_eq!(skip_bytes_any_index_func_direct(TESTDATA, &DIGITS), 40);
        assert_eq!(skip_bytes_any_index_func(TESTDATA, &DIGITS), 40);
        assert_eq!(skip_bytes_any_index_func_dyn(TESTDATA, &DIGITS), 40);
        assert_eq!(skip_bytes_any_position(TESTDATA, &DIGITS), 40);
    }

    #[test]
    fn not_found() {
        for scan in Scan::ALL {
            assert_eq!(scan.index(TESTDATA, &UPPERCASE), TESTDATA.len(), "{scan:?}");
            assert_eq!(scan.skip(b"0123", &DIGITS), 4, "{scan:?}");
            assert_eq!(scan.index(b"", &LOWERCASE), 0, "{scan:?}");
            assert_eq!(scan.skip(b"", &LOWERCASE), 0, "{scan:?}");
            assert_eq!(scan.index(b"a", &LOWERCASE), 0, "{scan:?}");
            assert_eq!(scan.skip(b"a", &DIGITS), 0, "{scan:?}");
        }
    }

    #[test]
    fn index_func_stops_early() {
        let mut calls = 0;
        let i = index_func(TESTDATA, |ch| {
            calls += 1;
            ch == b'5'
        });
        assert_eq!(i, 5);
        assert_eq!(calls, 6);

        let mut calls = 0;
        let i = index_func_dyn(TESTDATA, &mut |ch| {
            calls += 1;
            ch == b'c'
        });
        assert_eq!(i, 42);
        assert_eq!(calls, 43);
    }

    #[test]
    fn scan_names() {
        let names: Vec<_> = Scan::ALL.iter().map(|scan| scan.name()).collect();
        assert_eq!(
            names,
            [
                "loop",
                "index_func_direct",
                "index_func_wrapped",
                "index_func_dyn",
                "position"
            ]
        );
    }

    #[test]
    fn finder_strategy() {
        assert_eq!(Finder::new(CharMap::new()).index, Strategy::Never);
        assert_eq!(Finder::new(CharMap::new()).skip, Strategy::Always);
        assert_eq!(Finder::new(LOWERCASE).index, Strategy::Map);
        assert_eq!(Finder::new(LOWERCASE).skip, Strategy::Map);

        #[cfg(feature = "perf-find")]
        {
            let finder = Finder::new(CharMap::from_bytes(b"x"));
            assert_eq!(finder.index, Strategy::Byte1(b'x'));
            assert_eq!(finder.skip, Strategy::Map);

            let finder = Finder::new(!CharMap::from_bytes(b"yx"));
            assert_eq!(finder.index, Strategy::Map);
            assert_eq!(finder.skip, Strategy::Byte2(b'x', b'y'));

            let finder = Finder::new(CharMap::from_bytes(b"\0\x80\xff"));
            assert_eq!(finder.index, Strategy::Byte3(0, 0x80, 0xff));
        }
    }

    #[test]
    fn finder() {
        let classes = [
            CharMap::new(),
            !CharMap::new(),
            CharMap::from_bytes(b"a"),
            CharMap::from_bytes(b"9a"),
            CharMap::from_bytes(b"9ab"),
            !CharMap::from_bytes(b"0"),
            !CharMap::from_bytes(b"01"),
            !CharMap::from_bytes(b"012"),
            LOWERCASE,
            DIGITS,
        ];
        for map in classes {
            let finder = Finder::from(map);
            assert_eq!(finder.map(), &map);
            let bufs: [&[u8]; 5] = [TESTDATA, b"", b"abc", b"0", b"\xff0a"];
            for buf in bufs {
                assert_eq!(finder.index(buf), index_bytes_any(buf, &map), "{map:?} {buf:?}");
                assert_eq!(finder.skip(buf), skip_bytes_any(buf, &map), "{map:?} {buf:?}");
            }
        }
    }
}
