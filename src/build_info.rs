//! Compile-time build information, embedded into failure reports.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
