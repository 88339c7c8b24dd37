use log::{info, warn};

use crate::config::{Config, DomainConfig, TargetConfig};
use crate::error::Result;
use crate::provider::namecheap::{NamecheapClient, SET_HOSTS_COMMAND};
use crate::provider::{HostRecord, RecordType, UpdateOutcome};

pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// The complete record set for the domain: apex A and `www` CNAME.
pub fn desired_records(target: &TargetConfig) -> Vec<HostRecord> {
    vec![
        HostRecord {
            host: "@".to_string(),
            record_type: RecordType::A,
            address: target.a_record.clone(),
            ttl: target.ttl,
        },
        HostRecord {
            host: "www".to_string(),
            record_type: RecordType::Cname,
            address: target.cname.clone(),
            ttl: target.ttl,
        },
    ]
}

/// Flattens records into setHosts' 1-based indexed parameters.
pub fn set_hosts_params(domain: &DomainConfig, records: &[HostRecord]) -> Vec<(String, String)> {
    let mut params = vec![
        ("SLD".to_string(), domain.sld.clone()),
        ("TLD".to_string(), domain.tld.clone()),
    ];

    for (i, record) in records.iter().enumerate() {
        let n = i + 1;
        params.push((format!("HostName{}", n), record.host.clone()));
        params.push((format!("RecordType{}", n), record.record_type.to_string()));
        params.push((format!("Address{}", n), record.address.clone()));
        params.push((format!("TTL{}", n), record.ttl.to_string()));
    }

    params
}

/// Replaces every host record of the domain in one setHosts call.
///
/// A well-formed failure reply comes back as `UpdateOutcome::Failure`; only
/// transport and parse problems are returned as errors.
pub async fn update_dns_records(client: &NamecheapClient, config: &Config) -> Result<UpdateOutcome> {
    let records = desired_records(&config.target);
    let params = set_hosts_params(&config.domain, &records);

    info!(
        "Replacing host records of {} with {} record(s)",
        config.domain.name(),
        records.len()
    );

    let response = client.call(SET_HOSTS_COMMAND, &params).await?;

    if response.is_ok() {
        return Ok(UpdateOutcome::Success {
            records,
            raw: response.raw,
        });
    }

    let message = response.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    warn!("setHosts failed: {}", message);

    Ok(UpdateOutcome::Failure {
        message,
        raw: response.raw,
    })
}
