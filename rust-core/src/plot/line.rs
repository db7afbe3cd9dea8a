//! 2D line data handed to figures and CSV export

use super::PlotError;

/// Named x/y series
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_name: String,
    pub y_name: String,
}

impl Line {
    /// Create a line, checking that both axes have the same length
    pub fn new(
        x: Vec<f64>,
        y: Vec<f64>,
        x_name: impl Into<String>,
        y_name: impl Into<String>,
    ) -> Result<Self, PlotError> {
        if x.len() != y.len() {
            return Err(PlotError::ShapeMismatch(format!(
                "line has {} x values but {} y values",
                x.len(),
                y.len()
            )));
        }
        Ok(Self {
            x,
            y,
            x_name: x_name.into(),
            y_name: y_name.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Points with both coordinates finite
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (x, y))
    }

    /// (x_min, x_max, y_min, y_max) over finite points
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.points().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            })
        })
    }
}

/// Lines for one axes, or one group of lines per panel
///
/// The caller states which layout it means; nothing is inferred from the
/// shape of the data.
#[derive(Debug, Clone, PartialEq)]
pub enum LineSet {
    /// Every line on a single axes
    Single(Vec<Line>),

    /// One inner vector per panel
    Panels(Vec<Vec<Line>>),
}

impl LineSet {
    /// All lines in panel order
    pub fn lines(&self) -> Vec<&Line> {
        match self {
            LineSet::Single(lines) => lines.iter().collect(),
            LineSet::Panels(panels) => panels.iter().flatten().collect(),
        }
    }

    /// Number of axes the set draws on
    pub fn panel_count(&self) -> usize {
        match self {
            LineSet::Single(_) => 1,
            LineSet::Panels(panels) => panels.len(),
        }
    }
}

impl From<Line> for LineSet {
    fn from(line: Line) -> Self {
        LineSet::Single(vec![line])
    }
}

impl From<Vec<Line>> for LineSet {
    fn from(lines: Vec<Line>) -> Self {
        LineSet::Single(lines)
    }
}

impl From<Vec<Vec<Line>>> for LineSet {
    fn from(panels: Vec<Vec<Line>>) -> Self {
        LineSet::Panels(panels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_axes() {
        assert!(Line::new(vec![0.0, 1.0], vec![1.0], "t", "y").is_err());
        let line = Line::new(vec![0.0, 1.0], vec![1.0, 2.0], "t", "y").unwrap();
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let line = Line::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![-1.0, f64::NAN, 5.0, f64::INFINITY],
            "t",
            "y",
        )
        .unwrap();
        assert_eq!(line.points().count(), 2);
        assert_eq!(line.bounds(), Some((0.0, 2.0, -1.0, 5.0)));
    }

    #[test]
    fn test_line_set_layouts() {
        let a = Line::new(vec![0.0], vec![1.0], "t", "a").unwrap();
        let b = Line::new(vec![0.0], vec![2.0], "t", "b").unwrap();

        let single: LineSet = a.clone().into();
        assert_eq!(single.panel_count(), 1);

        let panels: LineSet = vec![vec![a.clone(), b.clone()], vec![b.clone()]].into();
        assert_eq!(panels.panel_count(), 2);
        let names: Vec<&str> = panels.lines().iter().map(|l| l.y_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "b"]);
    }
}
