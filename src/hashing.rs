//! String hashing that is deterministic per target. The standard library hasher is randomly seeded
//! per process, which would make the per-stream seed offsets in `crate::random` differ between
//! runs. `FxHasher` output depends on the pointer width, so a seed reproduces a run only on targets
//! of the same width (32-bit and 64-bit builds give different runs for the same seed).

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// A convenience method to compute the hash of a `&str`.
pub fn hash_str(data: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_bytes());
    hasher.finish()
}
