use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{RestavoError, Result};
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const BASE_DELAY_MS: u64 = 1000;
const MAX_JITTER_MS: u64 = 1000;

/// Maps a non-2xx response to `ServerRejected` carrying the server's message.
pub fn check_response_status(response: ApiResponse) -> Result<ApiResponse> {
    if !response.is_success() {
        let message = response.message();
        tracing::warn!(status = response.status, error = %message, "Request rejected");
        return Err(RestavoError::ServerRejected {
            status: response.status,
            message,
        });
    }
    Ok(response)
}

/// Delay before retrying after the zero-based `attempt`: `2^attempt` seconds plus up to one
/// second of jitter.
pub fn backoff_delay<R: Rng>(attempt: u32, rng: &mut R) -> Duration {
    let exponential = BASE_DELAY_MS.saturating_mul(1u64 << attempt.min(20));
    let jitter = rng.random_range(0..MAX_JITTER_MS);
    Duration::from_millis(exponential + jitter)
}

/// Send `request` up to `max_attempts` times, backing off while the server answers 429.
///
/// Any other response, including other error statuses, is returned as-is on first sight.
/// Transport failures are retried on the same schedule except on the last attempt, where
/// the failure is returned. Running out of attempts on 429s yields `RetryExhausted`.
pub async fn fetch_with_retry<T, R>(
    transport: &T,
    request: &ApiRequest,
    max_attempts: u32,
    rng: &mut R,
) -> Result<ApiResponse>
where
    T: Transport,
    R: Rng,
{
    for attempt in 0..max_attempts {
        let is_last = attempt + 1 == max_attempts;

        match transport.send(request).await {
            Ok(response) if !response.is_rate_limited() => return Ok(response),
            Ok(_) => {
                if is_last {
                    break;
                }
                let delay = backoff_delay(attempt, rng);
                tracing::warn!(
                    path = %request.path,
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                if is_last {
                    tracing::error!(
                        path = %request.path,
                        attempts = max_attempts,
                        error = %e,
                        "Request failed permanently"
                    );
                    return Err(e);
                }
                let delay = backoff_delay(attempt, rng);
                tracing::warn!(
                    path = %request.path,
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Request failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    tracing::error!(path = %request.path, attempts = max_attempts, "Max retries exceeded");
    Err(RestavoError::RetryExhausted {
        attempts: max_attempts,
    })
}
