//! Byte character classes and first-match scans.
/*!
A [`CharMap`](map::CharMap) is a set of byte values stored as a 256-bit set. This crate scans buffers for the first byte in (or not in) such a class in several equivalent ways, so their performance can be compared:
- A hand-written loop
- A higher-order [`index_func()`](scan::index_func), with the bound method passed directly or wrapped in a closure
- [`index_func_dyn()`](scan::index_func_dyn) and [`Iterator::position()`]
- [`Finder`](scan::Finder), which picks `memchr` for tiny classes

All of them return the same offset on the same input: the index of the first matching byte, or the buffer length if there is none.

```
use ib_charmap::{class::LOWERCASE, scan::index_bytes_any};

assert_eq!(index_bytes_any(b"0123456789abc", &LOWERCASE), 10);
assert_eq!(index_bytes_any(b"0123456789", &LOWERCASE), 10);
```

Run the comparison with `cargo bench --bench scan`.

## Crate features
*/
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(feature = "doc", doc = document_features::document_features!())]
pub mod class;
pub mod map;
pub mod scan;
