use md5::{Digest, Md5};
use std::fmt;

/// Signs catalog requests with the `ts`/`apikey`/`hash` triple.
///
/// A signature is only valid around the time it was made, so callers ask for
/// a fresh one on every request.
#[derive(Clone)]
pub struct AuthSigner {
    public_key: String,
    private_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub ts: String,
    pub apikey: String,
    pub hash: String,
}

impl AuthSigner {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn sign(&self) -> AuthParams {
        self.sign_at(chrono::Utc::now().timestamp())
    }

    /// `hash = md5(ts + private_key + public_key)`, lowercase hex.
    pub fn sign_at(&self, timestamp: i64) -> AuthParams {
        let ts = timestamp.to_string();

        let mut hasher = Md5::new();
        hasher.update(ts.as_bytes());
        hasher.update(self.private_key.as_bytes());
        hasher.update(self.public_key.as_bytes());
        let hash = hex::encode(hasher.finalize());

        AuthParams {
            ts,
            apikey: self.public_key.clone(),
            hash,
        }
    }
}

impl fmt::Debug for AuthSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSigner")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl AuthParams {
    pub fn as_query(&self) -> [(&'static str, &str); 3] {
        [
            ("ts", self.ts.as_str()),
            ("apikey", self.apikey.as_str()),
            ("hash", self.hash.as_str()),
        ]
    }
}
