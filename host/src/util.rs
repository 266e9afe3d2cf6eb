use anyhow::{bail, Context, Result};

/// Session seed from the command line: `0x`-prefixed hex or decimal. Also
/// serves as the clap value parser for every `--seed`-like flag.
pub fn parse_seed(arg: &str) -> Result<u32> {
    let text = arg.trim();
    let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"));
    let (digits, radix, kind) = match hex {
        Some(hex) => (hex, 16, "hex"),
        None => (text, 10, "decimal"),
    };
    if digits.is_empty() {
        bail!("session seed `{arg}` has no digits");
    }
    u32::from_str_radix(digits, radix)
        .with_context(|| format!("session seed `{text}` is not a 32-bit {kind} number"))
}

/// Seed as stored in a tape header, in the form `parse_seed` reads back.
pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

/// `count` consecutive seeds starting at `start`, wrapping past `u32::MAX`.
pub fn seed_range(start: u32, count: u32) -> Vec<u32> {
    (0..count).map(|i| start.wrapping_add(i)).collect()
}
