/// Round a GiB total up to the next multiple of 32.
///
/// Storage is billed in 32 GiB blocks, so 417 rounds to 448 and an exact
/// multiple stays put.
pub fn round_up_to_block(gib: i64) -> i64 {
    const BLOCK: i64 = 32;
    if gib <= 0 {
        return 0;
    }
    ((gib + BLOCK - 1) / BLOCK) * BLOCK
}

/// Convert a Kubernetes resource quantity into whole GiB.
///
/// Handles the binary suffixes (Ki, Mi, Gi, Ti, Pi, Ei), the decimal ones
/// (k, M, G, T, P, E), and plain byte counts. Fractions of a GiB are
/// discarded, which matches how the capacity totals are reported.
pub fn quantity_to_gib(quantity: &str) -> super::Result<i64> {
    const GIB: f64 = (1u64 << 30) as f64;

    let q = quantity.trim();
    if q.is_empty() {
        bail!("empty quantity");
    }

    let split = q
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or_else(|| q.len());
    let (number, suffix) = q.split_at(split);
    let value: f64 = number
        .parse()
        .map_err(|e| format_err!("invalid quantity '{}': {}", quantity, e))?;
    if value < 0.0 {
        bail!("negative quantity '{}'", quantity);
    }

    let multiplier: f64 = match suffix {
        "" => 1.0,
        "Ki" => 1024.0,
        "Mi" => 1024.0 * 1024.0,
        "Gi" => GIB,
        "Ti" => GIB * 1024.0,
        "Pi" => GIB * 1024.0 * 1024.0,
        "Ei" => GIB * 1024.0 * 1024.0 * 1024.0,
        "k" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        "T" => 1e12,
        "P" => 1e15,
        "E" => 1e18,
        _ => bail!("unknown quantity suffix '{}' in '{}'", suffix, quantity),
    };

    Ok(((value * multiplier) / GIB) as i64)
}
