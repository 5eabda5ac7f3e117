use std::process::Stdio;
use tokio::process::Command;

use crate::probe::ProbeSettings;
use crate::probe::probe_error::ProbeError;

#[cfg(windows)]
const PING_COUNT_FLAG: &str = "-n";
#[cfg(not(windows))]
const PING_COUNT_FLAG: &str = "-c";

/// Sends a single echo request through the platform `ping` utility.
///
/// Exit status 0 means reachable. Spawn failures, non-zero exits and the
/// optional timeout all collapse to `false`; the cause is logged.
pub async fn probe_reachability(address: &str, settings: &ProbeSettings) -> bool {
    match ping_once(address, settings).await {
        Ok(()) => {
            log::debug!("ping {} ok", address);
            true
        }
        Err(e) => {
            log::debug!("ping {} failed: {}", address, e);
            false
        }
    }
}

pub(crate) async fn ping_once(address: &str, settings: &ProbeSettings) -> Result<(), ProbeError> {
    let address = address.trim();
    if address.is_empty() || address.starts_with('-') {
        return Err(ProbeError::InvalidAddress(address.to_string()));
    }

    let mut child = Command::new(&settings.ping_program)
        .args([PING_COUNT_FLAG, "1", address])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProbeError::Spawn {
            program: settings.ping_program.clone(),
            source,
        })?;

    let status = match settings.ping_timeout {
        Some(limit) => {
            let waited = tokio::time::timeout(limit, child.wait()).await;
            match waited {
                Ok(status) => status?,
                Err(_) => {
                    let _ = child.start_kill();
                    return Err(ProbeError::Timeout(limit.as_millis()));
                }
            }
        }
        None => child.wait().await?,
    };

    if status.success() {
        Ok(())
    } else {
        Err(ProbeError::NoReply(status.to_string()))
    }
}
