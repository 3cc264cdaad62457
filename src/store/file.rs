//! Save file I/O
//!
//! Each call opens the file, makes one full pass and drops the handle
//! before returning.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::container::{self, DecodeStats, Entries};
use crate::error::{Result, StoreError};

/// Magic bytes identifying a save file ("PSW\0")
pub const MAGIC: [u8; 4] = [0x50, 0x53, 0x57, 0x00];

/// Header size: Magic (4)
pub const HEADER_SIZE: usize = MAGIC.len();

/// Read and decode a save file
///
/// A file shorter than the header, or with different leading bytes, is a
/// [`StoreError::HeaderMismatch`] and nothing after the header is read.
pub fn read_file(path: &Path) -> Result<(Entries, DecodeStats)> {
    let mut file = File::open(path)?;

    let mut header = Vec::with_capacity(HEADER_SIZE);
    (&mut file).take(HEADER_SIZE as u64).read_to_end(&mut header)?;
    if header != MAGIC {
        return Err(StoreError::HeaderMismatch {
            expected: MAGIC,
            found: header,
        });
    }

    let mut body = Vec::new();
    file.read_to_end(&mut body)?;

    let (entries, stats) = container::decode_with_stats(&body);
    debug!(
        path = %path.display(),
        bytes = body.len(),
        entries = stats.entries_decoded,
        "read save file"
    );
    Ok((entries, stats))
}

/// Write the header and an encoded container, replacing the whole file
///
/// Returns the number of bytes written.
pub fn write_file(path: &Path, container_bytes: &[u8], sync: bool) -> Result<u64> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&MAGIC)?;
    writer.write_all(container_bytes)?;
    writer.flush()?;

    if sync {
        writer.get_ref().sync_all()?;
    }

    let written = (HEADER_SIZE + container_bytes.len()) as u64;
    debug!(path = %path.display(), bytes = written, "wrote save file");
    Ok(written)
}
