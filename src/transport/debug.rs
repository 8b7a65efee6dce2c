use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Thread-safe PCAP capture of outbound telemetry datagrams.
///
/// Frames are stored without IP/UDP headers under the USER0 link type, so a
/// dissector can be attached to it directly.
#[derive(Clone)]
pub struct PcapRecorder {
    inner: Arc<Mutex<PcapWriter>>,
}

impl PcapRecorder {
    /// Create a recorder that writes to the provided path, truncating any existing file.
    pub fn create(path: &Path) -> io::Result<Self> {
        let writer = PcapWriter::new(File::create(path)?)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(writer)),
        })
    }

    /// Record a datagram stamped with the current system time.
    pub fn record(&self, datagram: &[u8]) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("pcap recorder poisoned"))?;
        guard.write_record(SystemTime::now(), datagram)
    }
}

impl std::fmt::Debug for PcapRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PcapRecorder").finish_non_exhaustive()
    }
}

struct PcapWriter {
    out: BufWriter<File>,
}

const PCAP_MAGIC: u32 = 0xa1b2_c3d4;
const PCAP_VERSION: (u16, u16) = (2, 4);
const PCAP_SNAPLEN: u32 = 65_535;
const LINKTYPE_USER0: u32 = 147;

impl PcapWriter {
    fn new(file: File) -> io::Result<Self> {
        let mut out = BufWriter::new(file);
        let mut header = [0u8; 24];
        header[0..4].copy_from_slice(&PCAP_MAGIC.to_le_bytes());
        header[4..6].copy_from_slice(&PCAP_VERSION.0.to_le_bytes());
        header[6..8].copy_from_slice(&PCAP_VERSION.1.to_le_bytes());
        // bytes 8..16: thiszone and sigfigs, always zero
        header[16..20].copy_from_slice(&PCAP_SNAPLEN.to_le_bytes());
        header[20..24].copy_from_slice(&LINKTYPE_USER0.to_le_bytes());
        out.write_all(&header)?;
        out.flush()?;
        Ok(Self { out })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_record(&mut self, timestamp: SystemTime, data: &[u8]) -> io::Result<()> {
        let since_epoch = timestamp.duration_since(UNIX_EPOCH).unwrap_or_default();
        let secs = since_epoch.as_secs().min(u64::from(u32::MAX)) as u32;
        let length = data.len().min(PCAP_SNAPLEN as usize) as u32;

        let mut record = [0u8; 16];
        record[0..4].copy_from_slice(&secs.to_le_bytes());
        record[4..8].copy_from_slice(&since_epoch.subsec_micros().to_le_bytes());
        record[8..12].copy_from_slice(&length.to_le_bytes());
        record[12..16].copy_from_slice(&(data.len() as u32).to_le_bytes());

        self.out.write_all(&record)?;
        self.out.write_all(&data[..length as usize])?;
        self.out.flush()
    }
}
