use crate::market::Ledger;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// "EMBRLDG1" in little-endian bytes.
pub const LEDGER_MAGIC: u64 = 0x3147_444C_5242_4D45;

pub const LEDGER_FILENAME: &str = "ledger.dat";

/// Magic plus payload length.
const HEADER_LEN: u64 = 12;
const CHECKSUM_LEN: u64 = 32;

/// Saves and loads the marketplace ledger with a checksummed binary format.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Store under the platform config directory (via `directories`).
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "ember-exchange").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;
        Self::in_dir(project_dirs.config_dir())
    }

    /// Store inside an explicit directory, creating it if needed.
    pub fn in_dir(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(LEDGER_FILENAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes the ledger.
    ///
    /// File format:
    /// - Magic (8 bytes)
    /// - Payload length (4 bytes)
    /// - bincode payload (variable length)
    /// - SHA256 over the three fields above (32 bytes)
    pub fn save(&self, ledger: &Ledger) -> io::Result<()> {
        let data =
            bincode::serialize(ledger).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = u32::try_from(data.len())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut hasher = Sha256::new();
        hasher.update(LEDGER_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        // Written to a temp file and renamed into place.
        let tmp_path = self.path.with_extension("dat.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&LEDGER_MAGIC.to_le_bytes())?;
            file.write_all(&data_len.to_le_bytes())?;
            file.write_all(&data)?;
            file.write_all(&checksum)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        info!(path = %self.path.display(), stoves = ledger.stove_count(), "Ledger saved");
        Ok(())
    }

    /// Reads and verifies the ledger.
    ///
    /// Fails with `InvalidData` on a wrong magic, a length that does not
    /// match the file size, a checksum mismatch, or an undecodable payload;
    /// with `NotFound` when no file exists.
    pub fn load(&self) -> io::Result<Ledger> {
        let mut file = fs::File::open(&self.path)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != LEDGER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid ledger file: expected 0x{:016X}, got 0x{:016X}",
                    LEDGER_MAGIC, magic
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let expected_size = HEADER_LEN + u64::from(data_len) + CHECKSUM_LEN;
        let actual_size = file.metadata()?.len();
        if actual_size != expected_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Ledger file is {} bytes, header promises {}",
                    actual_size, expected_size
                ),
            ));
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        let ledger: Ledger = bincode::deserialize(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        debug!(path = %self.path.display(), stoves = ledger.stove_count(), "Ledger loaded");
        Ok(ledger)
    }

    /// Loads the ledger, or returns `fallback` when no file exists yet.
    /// Corrupt files are still an error.
    pub fn load_or(&self, fallback: Ledger) -> io::Result<Ledger> {
        match self.load() {
            Ok(ledger) => Ok(ledger),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(fallback),
            Err(e) => Err(e),
        }
    }
}
