use rand::Rng;
use std::fs;
use std::path::Path;

const KEY_FILE: &str = "session.key";

/// HMAC key for session tokens, persisted so tokens survive restarts.
#[derive(Clone)]
pub struct SessionKey(Vec<u8>);

impl SessionKey {
    pub fn from_secret(secret: &str) -> Self {
        Self(secret.as_bytes().to_vec())
    }

    /// Load the key from `<data_dir>/session.key`, generating it on first start.
    pub fn load_or_create(data_dir: &Path) -> anyhow::Result<Self> {
        let path = data_dir.join(KEY_FILE);

        if path.exists() {
            let encoded = fs::read_to_string(&path)?;
            let bytes = hex::decode(encoded.trim())?;
            if bytes.len() < 32 {
                anyhow::bail!("{} is too short", path.display());
            }
            Ok(Self(bytes))
        } else {
            let bytes: [u8; 32] = rand::thread_rng().gen();
            fs::write(&path, hex::encode(bytes))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
            }
            tracing::info!("Generated new session key at {}", path.display());
            Ok(Self(bytes.to_vec()))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}
