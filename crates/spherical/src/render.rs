//! numpy-style text rendering of float matrices.
//!
//! Follows `numpy.array2string` with the default print options: up to 8
//! fractional digits, shortest round-trip digits, trailing zeros trimmed,
//! scientific notation when magnitudes call for it and `...` summaries for
//! arrays of more than 1000 elements. Rows are never wrapped.

const PRECISION: usize = 8;
const SUMMARY_THRESHOLD: usize = 1000;
const EDGE_ITEMS: usize = 3;

/// Layout shared by every element of one rendered array.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FloatFormat {
    Positional {
        pad_left: usize,
        pad_right: usize,
    },
    Scientific {
        pad_left: usize,
        pad_right: usize,
        precision: usize,
        exp_digits: usize,
    },
}

impl FloatFormat {
    fn for_values(values: &[f64]) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let magnitudes: Vec<f64> = finite.iter().filter(|v| **v != 0.0).map(|v| v.abs()).collect();
        let scientific = match (
            magnitudes.iter().copied().reduce(f64::max),
            magnitudes.iter().copied().reduce(f64::min),
        ) {
            (Some(max), Some(min)) => max >= 1e8 || min < 1e-4 || max / min > 1000.0,
            _ => false,
        };

        let mut format = if finite.is_empty() {
            FloatFormat::Positional {
                pad_left: 0,
                pad_right: 0,
            }
        } else if scientific {
            let parts: Vec<Scientific> = finite.iter().map(|&v| Scientific::of(v)).collect();
            let precision = parts.iter().map(|p| p.fraction.len()).max().unwrap_or(0);
            let exp_digits = parts
                .iter()
                .map(|p| p.exponent.unsigned_abs().to_string().len())
                .max()
                .unwrap_or(0)
                .max(2);
            FloatFormat::Scientific {
                pad_left: parts.iter().map(|p| p.integer.len()).max().unwrap_or(0),
                pad_right: exp_digits + 2 + precision,
                precision,
                exp_digits,
            }
        } else {
            let strs: Vec<String> = finite.iter().map(|&v| positional(v)).collect();
            let split: Vec<(&str, &str)> = strs.iter().filter_map(|s| s.split_once('.')).collect();
            FloatFormat::Positional {
                pad_left: split.iter().map(|(int, _)| int.len()).max().unwrap_or(0),
                pad_right: split.iter().map(|(_, frac)| frac.len()).max().unwrap_or(0),
            }
        };

        if finite.len() != values.len() {
            let neg_inf = values.iter().any(|v| v.is_infinite() && *v < 0.0);
            let special_len = 3 + usize::from(neg_inf);
            let (pad_left, pad_right) = format.pads_mut();
            *pad_left = (*pad_left).max(special_len.saturating_sub(*pad_right + 1));
        }
        format
    }

    fn pads_mut(&mut self) -> (&mut usize, &mut usize) {
        match self {
            FloatFormat::Positional { pad_left, pad_right } => (pad_left, pad_right),
            FloatFormat::Scientific {
                pad_left, pad_right, ..
            } => (pad_left, pad_right),
        }
    }

    fn width(&self) -> usize {
        match *self {
            FloatFormat::Positional { pad_left, pad_right } => pad_left + pad_right + 1,
            FloatFormat::Scientific {
                pad_left, pad_right, ..
            } => pad_left + pad_right + 1,
        }
    }

    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            let text = if value.is_nan() {
                "nan"
            } else if value < 0.0 {
                "-inf"
            } else {
                "inf"
            };
            return format!("{text:>width$}", width = self.width());
        }
        match *self {
            FloatFormat::Positional { pad_left, pad_right } => {
                let text = positional(value);
                let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
                format!("{int:>pad_left$}.{frac:<pad_right$}")
            }
            FloatFormat::Scientific {
                pad_left,
                precision,
                exp_digits,
                ..
            } => {
                let Scientific {
                    integer,
                    fraction,
                    exponent,
                } = Scientific::of(value);
                let sign = if exponent < 0 { '-' } else { '+' };
                format!(
                    "{integer:>pad_left$}.{fraction:0<precision$}e{sign}{exp:0>exp_digits$}",
                    exp = exponent.unsigned_abs()
                )
            }
        }
    }
}

/// Shortest round-trip digits, at most [`PRECISION`] after the point, with
/// trailing zeros trimmed and the point kept (`"90."`, `"-0.5"`).
fn positional(value: f64) -> String {
    let shortest = value.to_string();
    match shortest.split_once('.') {
        Some((_, frac)) if frac.len() > PRECISION => {
            let rounded = format!("{value:.prec$}", prec = PRECISION);
            rounded.trim_end_matches('0').to_string()
        }
        Some(_) => shortest,
        None => shortest + ".",
    }
}

/// Mantissa and exponent of the shortest scientific representation.
struct Scientific {
    integer: String,
    fraction: String,
    exponent: i32,
}

impl Scientific {
    fn of(value: f64) -> Self {
        let mut text = format!("{value:e}");
        if let Some((mantissa, _)) = text.split_once('e') {
            let digits = mantissa.split_once('.').map_or(0, |(_, frac)| frac.len());
            if digits > PRECISION {
                text = format!("{value:.prec$e}", prec = PRECISION);
            }
        }
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        Self {
            integer: integer.to_string(),
            fraction: fraction.trim_end_matches('0').to_string(),
            exponent: exponent.parse().unwrap_or(0),
        }
    }
}

/// Render a row-major matrix of `cols` columns the way numpy's `str` does.
///
/// ```
/// use spherical::render::format_matrix;
///
/// let text = format_matrix(&[0.0, -90.0, -180.0, 90.0], 2);
/// assert_eq!(text, "[[   0.  -90.]\n [-180.   90.]]");
/// ```
pub fn format_matrix(values: &[f64], cols: usize) -> String {
    if cols == 0 || values.is_empty() {
        return "[]".to_string();
    }
    let rows = values.len() / cols;
    let summarize = values.len() > SUMMARY_THRESHOLD;
    let row_ranges = visible(rows, summarize);
    let col_ranges = visible(cols, summarize);

    let shown: Vec<f64> = row_ranges
        .iter()
        .flat_map(|rr| rr.clone())
        .flat_map(|row| {
            col_ranges
                .iter()
                .flat_map(|cr| cr.clone())
                .map(move |col| values[row * cols + col])
        })
        .collect();
    let format = FloatFormat::for_values(&shown);

    let render_row = |row: usize| -> String {
        let cells: Vec<String> = col_ranges
            .iter()
            .map(|cr| {
                cr.clone()
                    .map(|col| format.format(values[row * cols + col]))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        format!("[{}]", cells.join(" ... "))
    };

    let mut lines: Vec<String> = Vec::new();
    for (i, range) in row_ranges.iter().enumerate() {
        if i > 0 {
            lines.push("...".to_string());
        }
        lines.extend(range.clone().map(&render_row));
    }
    format!("[{}]", lines.join("\n "))
}

/// Index ranges shown along one axis of `len` elements.
fn visible(len: usize, summarize: bool) -> Vec<std::ops::Range<usize>> {
    if summarize && len > 2 * EDGE_ITEMS {
        vec![0..EDGE_ITEMS, len - EDGE_ITEMS..len]
    } else {
        vec![0..len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(values: &[f64]) -> Vec<String> {
        let format = FloatFormat::for_values(values);
        values.iter().map(|&v| format.format(v)).collect()
    }

    #[test]
    fn test_positional_digits() {
        assert_eq!(positional(90.0), "90.");
        assert_eq!(positional(-0.0), "-0.");
        assert_eq!(positional(0.1 + 0.2), "0.3");
        assert_eq!(positional(1.0 / 3.0), "0.33333333");
        assert_eq!(positional(0.999999999), "1.");
    }

    #[test]
    fn test_fixed_alignment() {
        assert_eq!(render(&[1.5, -10.25, 100.0]), vec!["  1.5 ", "-10.25", "100.  "]);
    }

    #[test]
    fn test_scientific_switch() {
        assert_eq!(render(&[1e-5, 1.0]), vec!["1.e-05", "1.e+00"]);
        assert_eq!(render(&[1.5e8, -2.0]), vec![" 1.5e+08", "-2.0e+00"]);
        assert_eq!(render(&[1.0, 2000.0]), vec!["1.e+00", "2.e+03"]);
    }

    #[test]
    fn test_large_ratio_stays_fixed_below_threshold() {
        assert_eq!(render(&[1.0, 1000.0]), vec!["   1.", "1000."]);
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(render(&[1.0, f64::NAN]), vec![" 1.", "nan"]);
        assert_eq!(render(&[f64::NEG_INFINITY, 2.5]), vec!["-inf", " 2.5"]);
    }

    #[test]
    fn test_format_matrix_rows() {
        assert_eq!(
            format_matrix(&[0.0, -90.0, -180.0, 90.0], 2),
            "[[   0.  -90.]\n [-180.   90.]]"
        );
        assert_eq!(format_matrix(&[2.0, 1.0], 2), "[[2. 1.]]");
        assert_eq!(format_matrix(&[], 2), "[]");
    }

    #[test]
    fn test_format_matrix_summarizes_long_arrays() {
        let values: Vec<f64> = (1000..2002).map(|v| v as f64).collect();
        let text = format_matrix(&values, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "[[1000. 1001.]");
        assert_eq!(lines[3], " ...");
        assert_eq!(lines[6], " [2000. 2001.]]");
    }

    #[test]
    fn test_format_matrix_summary_switches_to_scientific() {
        // Shown values span 1..1001, a ratio above 1000.
        let values: Vec<f64> = (0..1002).map(|v| v as f64).collect();
        let text = format_matrix(&values, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "[[0.000e+00 1.000e+00]");
        assert_eq!(lines[3], " ...");
        assert_eq!(lines[4], " [9.960e+02 9.970e+02]");
        assert_eq!(lines[6], " [1.000e+03 1.001e+03]]");
    }
}
