pub mod namecheap;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
    Cname,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Cname => "CNAME",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One host record as sent to the registrar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub host: String,
    pub record_type: RecordType,
    pub address: String,
    pub ttl: u32,
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Success { records: Vec<HostRecord>, raw: String },
    Failure { message: String, raw: String },
}

impl UpdateOutcome {
    pub fn raw(&self) -> &str {
        match self {
            UpdateOutcome::Success { raw, .. } | UpdateOutcome::Failure { raw, .. } => raw,
        }
    }
}
