use serde::{Deserialize, Serialize};

use crate::color::parse::{Color, parse_color, parse_hex};
use crate::foundation::error::{ChartError, ChartResult};

/// Plotly's 24-color qualitative palette, the default series palette.
pub const DARK24: [&str; 24] = [
    "#2E91E5", "#E15F99", "#1CA71C", "#FB0D0D", "#DA16FF", "#222A2A", "#B68100", "#750D86",
    "#EB663B", "#511CFB", "#00A08B", "#FB00D1", "#FC0080", "#B2828D", "#6C7C32", "#778AAE",
    "#862A16", "#A777F1", "#620042", "#1616A7", "#DA60CA", "#6C4516", "#0D2A63", "#AF0038",
];

/// Tableau 10, also used for `C0`..`C9` aliases.
pub const TAB10: [&str; 10] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#7F7F7F",
    "#BCBD22", "#17BECF",
];

const SET1: [&str; 9] = [
    "#E41A1C", "#377EB8", "#4DAF4A", "#984EA3", "#FF7F00", "#FFFF33", "#A65628", "#F781BF",
    "#999999",
];

// Evenly spaced stops; sampled with linear blending.
const VIRIDIS: [&str; 9] = [
    "#440154", "#482878", "#3E4A89", "#31688E", "#26828E", "#1F9E89", "#35B779", "#6DCD59",
    "#FDE725",
];
const PLASMA: [&str; 9] = [
    "#0D0887", "#4C02A1", "#7E03A8", "#A92395", "#CC4778", "#E56B5D", "#F89441", "#FDC328",
    "#F0F921",
];
const INFERNO: [&str; 9] = [
    "#000004", "#1B0C41", "#4A0C6B", "#781C6D", "#A52C60", "#CF4446", "#ED6925", "#FB9B06",
    "#FCFFA4",
];
const MAGMA: [&str; 9] = [
    "#000004", "#1C1044", "#4F127B", "#812581", "#B5367A", "#E55064", "#FB8861", "#FEC287",
    "#FCFDBF",
];
const GREYS: [&str; 9] = [
    "#FFFFFF", "#F0F0F0", "#D9D9D9", "#BDBDBD", "#969696", "#737373", "#525252", "#252525",
    "#000000",
];
const BLUES: [&str; 9] = [
    "#F7FBFF", "#DEEBF7", "#C6DBEF", "#9ECAE1", "#6BAED6", "#4292C6", "#2171B5", "#08519C",
    "#08306B",
];

/// Entries produced when sampling a continuous colormap.
pub const COLORMAP_SAMPLES: usize = 256;

/// How chart series colors are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// A palette name (`dark24`, `tab10`, `set1`), a colormap name (`viridis`, ...) or a
    /// single color applied to every series.
    Named(String),
    /// Explicit colors, one per series in order.
    List(Vec<String>),
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::Named("dark24".to_owned())
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        Self::Named(s.to_owned())
    }
}

/// Resolve `spec` into an ordered color list for `series` data columns.
///
/// Palettes and explicit lists keep their own length; colormaps yield [`COLORMAP_SAMPLES`]
/// entries; a single color is repeated `series` times.
pub fn resolve_colors(spec: &ColorSpec, series: usize) -> ChartResult<Vec<Color>> {
    match spec {
        ColorSpec::List(items) => {
            if items.is_empty() {
                return Err(ChartError::config("color list must not be empty"));
            }
            items
                .iter()
                .map(|s| parse_color(s).map_err(|e| ChartError::config(format!("color list: {e}"))))
                .collect()
        }
        ColorSpec::Named(name) => {
            let key = name.trim().to_ascii_lowercase();
            if let Some(hexes) = qualitative(&key) {
                return hexes.iter().map(|h| hex_const(h)).collect();
            }
            if let Some(stops) = colormap(&key) {
                let stops = stops.iter().map(|h| hex_const(h)).collect::<ChartResult<Vec<_>>>()?;
                return Ok(sample_colormap(&stops, COLORMAP_SAMPLES));
            }
            let single = parse_color(name).map_err(|_| {
                ChartError::config(format!(
                    "\"{name}\" is neither a palette, a colormap nor a color; provide a suitable color name or colormap"
                ))
            })?;
            Ok(vec![single; series.max(1)])
        }
    }
}

fn qualitative(name: &str) -> Option<&'static [&'static str]> {
    Some(match name {
        "dark24" => &DARK24,
        "tab10" => &TAB10,
        "set1" => &SET1,
        _ => return None,
    })
}

fn colormap(name: &str) -> Option<&'static [&'static str]> {
    Some(match name {
        "viridis" => &VIRIDIS,
        "plasma" => &PLASMA,
        "inferno" => &INFERNO,
        "magma" => &MAGMA,
        "greys" => &GREYS,
        "blues" => &BLUES,
        _ => return None,
    })
}

fn hex_const(h: &str) -> ChartResult<Color> {
    parse_hex(h).map_err(ChartError::config)
}

/// Sample `n` colors from evenly spaced `stops`.
pub(crate) fn sample_colormap(stops: &[Color], n: usize) -> Vec<Color> {
    match (stops, n) {
        (_, 0) | ([], _) => Vec::new(),
        ([only], _) => vec![*only; n],
        (_, 1) => vec![stops[0]],
        _ => {
            let segments = (stops.len() - 1) as f64;
            (0..n)
                .map(|i| {
                    let pos = i as f64 / (n - 1) as f64 * segments;
                    let seg = (pos.floor() as usize).min(stops.len() - 2);
                    stops[seg].lerp(stops[seg + 1], pos - seg as f64)
                })
                .collect()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
