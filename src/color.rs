//! Paint colors supplied by the host.

/// Linear RGB in `0.0..=1.0`. Alpha is owned by the renderer.
pub type Rgb = [f32; 3];

/// Parse `#rgb` or `#rrggbb` (leading `#` optional).
#[must_use]
pub fn parse_hex(spec: &str) -> Option<Rgb> {
    let hex = spec.trim().trim_start_matches('#');
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| f32::from(v) / 255.0);
    match hex.len() {
        3 => {
            let mut out = [0.0; 3];
            for (slot, i) in out.iter_mut().zip(0..3) {
                let digit = hex.get(i..=i)?;
                *slot = channel(&digit.repeat(2))?;
            }
            Some(out)
        }
        6 => Some([
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        ]),
        _ => None,
    }
}
