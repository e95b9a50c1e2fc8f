//! Packed `0xRRGGBB` color helpers.
//!
//! Hosts hand colors over as packed integers (the way chemistry toolkits
//! usually store per-atom colors). Everything downstream works in `[f32; 3]`
//! with channels in `0.0..=1.0`.

/// Unpack `0xRRGGBB` into normalized RGB.
#[must_use]
pub fn rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

/// Pack normalized RGB back into `0xRRGGBB`, clamping out-of-range channels.
#[must_use]
pub fn pack(color: [f32; 3]) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(color[0]) << 16) | (channel(color[1]) << 8) | channel(color[2])
}

/// Per-item colors: the given packed colors where present, `fallback` for
/// any item past the end of the list.
#[must_use]
pub fn per_item(colors: Option<&[u32]>, count: usize, fallback: u32) -> Vec<[f32; 3]> {
    let colors = colors.unwrap_or_default();
    if !colors.is_empty() && colors.len() < count {
        log::warn!(
            "{} colors for {count} items, padding with {fallback:#08x}",
            colors.len()
        );
    }
    (0..count)
        .map(|i| rgb(colors.get(i).copied().unwrap_or(fallback)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channels() {
        assert_eq!(rgb(0xFF_00_00), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x00_00_FF), [0.0, 0.0, 1.0]);
        let grey = rgb(0x20_20_20);
        assert!((grey[0] - 32.0 / 255.0).abs() < 1e-6);
        assert_eq!(grey[0], grey[2]);
    }

    #[test]
    fn pack_inverts_rgb() {
        for hex in [0x00_AB_B1, 0xA9_FC_FF, 0x00_60_63, 0xFF_FF_FF] {
            assert_eq!(pack(rgb(hex)), hex);
        }
        assert_eq!(pack([2.0, -1.0, 0.5]), 0xFF_00_80);
    }

    #[test]
    fn per_item_pads_with_fallback() {
        let colors = per_item(Some(&[0xFF_00_00]), 3, 0xFF_FF_FF);
        assert_eq!(colors, vec![[1.0, 0.0, 0.0], [1.0; 3], [1.0; 3]]);
        assert_eq!(per_item(None, 2, 0x00_00_00), vec![[0.0; 3]; 2]);
    }
}
