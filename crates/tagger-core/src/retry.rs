// SPDX-License-Identifier: Apache-2.0

//! Backoff policy for tracker reads.
//!
//! Only reads retry. Bulk label changes are sent once: a failed item is
//! reported and the run moves on.

use std::time::Duration;

use backon::ExponentialBuilder;

/// Retries used when the configuration does not say otherwise.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Rate limiting (429) and gateway or server failures (5xx).
#[must_use]
pub fn is_retryable_http(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Transient Octocrab failures.
///
/// A 403 counts as transient because GitHub answers secondary rate limits
/// with it. Transport errors always retry.
#[must_use]
pub fn is_retryable_octocrab(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            status == 403 || is_retryable_http(status)
        }
        octocrab::Error::Service { .. } | octocrab::Error::Hyper { .. } => true,
        _ => false,
    }
}

/// Like [`is_retryable_octocrab`], for an error still wrapped in anyhow.
#[must_use]
pub fn is_retryable_anyhow(e: &anyhow::Error) -> bool {
    e.downcast_ref::<octocrab::Error>()
        .is_some_and(is_retryable_octocrab)
}

/// Exponential backoff for reads: 1 s, doubling, jittered, `max_retries` times.
///
/// Zero disables retrying.
#[must_use]
pub fn read_backoff(max_retries: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_factor(2.0)
        .with_min_delay(Duration::from_secs(1))
        .with_max_times(max_retries)
        .with_jitter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_and_server_errors_retry() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_http(status), "{status}");
        }
    }

    #[test]
    fn test_client_errors_do_not_retry() {
        for status in [200, 400, 401, 404, 410, 422] {
            assert!(!is_retryable_http(status), "{status}");
        }
    }

    #[test]
    fn test_plain_errors_do_not_retry() {
        assert!(!is_retryable_anyhow(&anyhow::anyhow!("label not found")));
        assert!(!is_retryable_anyhow(&anyhow::anyhow!(
            crate::error::TaggerError::NotAuthenticated
        )));
    }
}
