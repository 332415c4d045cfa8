use std::env;
use std::sync::OnceLock;

const DISABLE_ENV: &str = "NUMSTAT_DISABLE_PARALLEL";
const MIN_ELEMS_ENV: &str = "NUMSTAT_PARALLEL_MIN_ELEMS";
const MIN_FLOPS_ENV: &str = "NUMSTAT_PARALLEL_MIN_FLOPS";

const DEFAULT_MIN_ELEMS: usize = 16 * 16;
const DEFAULT_MIN_FLOPS: usize = 128 * 128 * 32;

static DISABLE_PARALLEL: OnceLock<bool> = OnceLock::new();
static MIN_ELEMENTS: OnceLock<usize> = OnceLock::new();
static MIN_FLOPS: OnceLock<usize> = OnceLock::new();

fn parallel_disabled() -> bool {
    *DISABLE_PARALLEL.get_or_init(|| parse_flag(env::var(DISABLE_ENV).ok().as_deref()))
}

fn min_elements_threshold() -> usize {
    *MIN_ELEMENTS.get_or_init(|| {
        parse_threshold(env::var(MIN_ELEMS_ENV).ok().as_deref()).unwrap_or(DEFAULT_MIN_ELEMS)
    })
}

fn min_flops_threshold() -> usize {
    *MIN_FLOPS.get_or_init(|| {
        parse_threshold(env::var(MIN_FLOPS_ENV).ok().as_deref()).unwrap_or(DEFAULT_MIN_FLOPS)
    })
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|value| value.trim().to_ascii_lowercase()),
        Some(ref value) if value == "1" || value == "true" || value == "yes"
    )
}

fn parse_threshold(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&value| value > 0)
}

/// Whether an `m x k` by `k x n` product is large enough to split across
/// threads.
pub fn should_parallelize(m: usize, n: usize, k: usize) -> bool {
    if parallel_disabled() {
        return false;
    }
    let elems = m.saturating_mul(n);
    let flops = elems.saturating_mul(k);
    elems >= min_elements_threshold() && flops >= min_flops_threshold()
}

#[cfg(feature = "parallel")]
mod pool {
    use rayon::ThreadPoolBuilder;
    use std::env;
    use std::sync::Once;

    const THREAD_ENV: &str = "NUMSTAT_CPU_THREADS";

    static INIT_RAYON: Once = Once::new();

    /// `0` or garbage means "let rayon decide".
    pub(super) fn parse_thread_override(raw: Option<&str>) -> Option<usize> {
        match raw.map(str::trim) {
            None | Some("") => None,
            Some(value) => match value.parse::<usize>() {
                Ok(0) | Err(_) => None,
                Ok(n) => Some(n),
            },
        }
    }

    /// Size the global pool from `NUMSTAT_CPU_THREADS` on first use.
    pub fn ensure_rayon_pool() {
        INIT_RAYON.call_once(|| {
            let requested = parse_thread_override(env::var(THREAD_ENV).ok().as_deref());
            let builder = match requested {
                Some(threads) => ThreadPoolBuilder::new().num_threads(threads),
                None => ThreadPoolBuilder::new(),
            };
            // A global pool installed by the host application wins.
            if let Err(err) = builder.build_global() {
                tracing::debug!(error = %err, "rayon global pool already initialised");
            }
        });
    }
}

#[cfg(feature = "parallel")]
pub use pool::ensure_rayon_pool;
