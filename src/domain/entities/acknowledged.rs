use serde::{Deserialize, Serialize};

/// `{ "ok": true }` body returned by deletes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Acknowledged {
    pub ok: bool,
}

impl Acknowledged {
    pub fn ok() -> Self {
        Acknowledged { ok: true }
    }
}
