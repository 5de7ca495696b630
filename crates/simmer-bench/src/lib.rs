//! Benchmark crate for Simmer. The measurements live in `benches/`;
//! this library is intentionally empty.

#![forbid(unsafe_code)]
