use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::provider::{HostRecord, RecordType};

pub fn prompt_username<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    write!(output, "Enter your Namecheap username: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let username = line.trim();
    if username.is_empty() {
        return Err(Error::invalid_input("username must not be empty"));
    }
    Ok(username.to_string())
}

pub fn banner<W: Write>(mut out: W, domain: &str, username: &str, client_ip: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "🚀 Configuring {} to point to Vercel...", domain)?;
    writeln!(out, "👤 Username: {}", username)?;
    writeln!(out, "🌍 Your IP: {}", client_ip)?;
    writeln!(out, "🔄 Updating DNS records for {}...", domain)?;
    Ok(())
}

pub fn raw_response<W: Write>(mut out: W, raw: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Debug - API Response:")?;
    writeln!(out, "{}", raw)?;
    writeln!(out)?;
    Ok(())
}

pub fn success<W: Write>(mut out: W, config: &Config, records: &[HostRecord]) -> Result<()> {
    let domain = config.domain.name();

    writeln!(out, "✅ DNS records updated successfully!")?;
    writeln!(out)?;
    writeln!(out, "📝 DNS Records set:")?;
    for record in records {
        let label = match record.record_type {
            RecordType::A => "A Record",
            RecordType::Cname => "CNAME",
        };
        writeln!(out, "   {}: {} → {}", label, record.host, record.address)?;
    }
    writeln!(out)?;
    writeln!(out, "⏱️  DNS propagation can take 5-60 minutes")?;
    writeln!(out)?;
    writeln!(out, "🌐 Your site will be available at: https://{}", domain)?;

    writeln!(out)?;
    writeln!(out, "✅ All done! Now add the domain in Vercel:")?;
    let mut step = 1;
    if let Some(url) = &config.target.dashboard_url {
        writeln!(out, "   {}. Go to: {}", step, url)?;
        step += 1;
    }
    writeln!(out, "   {}. Click 'Add Domain'", step)?;
    writeln!(out, "   {}. Enter: {}", step + 1, domain)?;
    writeln!(out, "   {}. Click 'Add' - it should verify immediately", step + 2)?;
    Ok(())
}

pub fn failure<W: Write>(mut out: W, message: &str) -> Result<()> {
    writeln!(out, "❌ Error: {}", message)?;
    writeln!(out)?;
    writeln!(out, "❌ Failed to update DNS records")?;
    writeln!(out, "Make sure:")?;
    writeln!(out, "1. Your IP is whitelisted in Namecheap API settings")?;
    writeln!(out, "2. API access is enabled")?;
    writeln!(out, "3. Username is correct")?;
    Ok(())
}
