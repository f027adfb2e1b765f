pub mod html;
pub mod json;

/// Pre-generated EDA charts served from the static directory.
pub const CHART_IMAGES: [&str; 3] = [
    "correlation_heatmap.png",
    "health_score_dist.png",
    "top_features.png",
];

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

/// Gaps smaller than this display as zero and read "at mission average".
const GAP_DEAD_BAND: f64 = 0.005;

/// Two decimals with an explicit sign, for gaps.
pub fn format_gap(v: f64) -> String {
    if v.abs() < GAP_DEAD_BAND {
        "0.00".to_string()
    } else if v > 0.0 {
        format!("+{:.2}", v)
    } else {
        format!("{:.2}", v)
    }
}

pub fn gap_statement(gap: f64) -> &'static str {
    if gap.abs() < GAP_DEAD_BAND {
        "at mission average"
    } else if gap > 0.0 {
        "above mission average"
    } else {
        "below mission average"
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tests.rs"]
mod tests;
