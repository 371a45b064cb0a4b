use std::thread;
use std::time::Duration;

use super::Result;

/// Parameters of the exponential backoff between attempts.
///
/// The base step is the caller's request timeout, so a slow endpoint is
/// given progressively longer gaps rather than being hammered at the
/// timeout cadence.
#[derive(Clone, Debug)]
pub struct Backoff {
    /// Maximum number of attempts, including the first.
    pub steps: u32,
    /// Sleep before the second attempt; later sleeps grow by `factor`.
    pub duration: Duration,
    pub factor: f64,
    pub jitter: f64,
}

impl Backoff {
    pub fn for_client(timeout: Duration, retry_count: u32) -> Backoff {
        Backoff {
            steps: retry_count.max(1),
            duration: timeout,
            factor: 5.0,
            jitter: 0.1,
        }
    }
}

/// Run `op` until it succeeds or the backoff is exhausted.
///
/// Every error is treated as retryable: the caller cannot tell a transient
/// transport fault from a permanent one at this layer. The last error is
/// surfaced unchanged once the attempts run out.
pub fn on_error<T, F>(backoff: &Backoff, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut step = backoff.duration;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op() {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= backoff.steps {
                    return Err(e);
                }
                let jittered = step.mul_f64(1.0 + backoff.jitter * rand::random::<f64>());
                warn!(
                    "attempt {}/{} failed, retrying in {:?}: {}",
                    attempt, backoff.steps, jittered, e
                );
                thread::sleep(jittered);
                step = step.mul_f64(backoff.factor);
            }
        }
    }
}
