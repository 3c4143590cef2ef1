//! Connection id generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identifier of one client connection.
pub type Uid = String;

/// Generates connection ids that are unique for the lifetime of the process.
///
/// Format: `C` followed by 6 base36 characters, e.g. "CAAAAAB". Ids are
/// never reused, so a stale id held by a finished task can't alias a newer
/// connection.
#[derive(Debug, Default)]
pub struct UidGenerator {
    counter: AtomicU64,
}

impl UidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next unique id.
    pub fn next(&self) -> Uid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("C{}", base36_encode_6(n))
    }
}

/// Encode a number as a 6-character base36 string.
fn base36_encode_6(mut n: u64) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut result = [b'A'; 6];

    for slot in result.iter_mut().rev() {
        *slot = CHARS[(n % 36) as usize];
        n /= 36;
    }

    String::from_utf8_lossy(&result).into_owned()
}
