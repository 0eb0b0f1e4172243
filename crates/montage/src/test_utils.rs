//! Test fixtures shared by the unit tests.

use std::rc::Rc;

use montage_core::{
    dimension::Dimension,
    element::{Selection, Viewable},
    value::Value,
};

use crate::item::Item;

/// A minimal two-dimensional element: a list of `(x, y)` points.
#[derive(Debug, Clone)]
pub(crate) struct Curve {
    group: String,
    label: String,
    points: Vec<(f64, f64)>,
}

impl Curve {
    pub(crate) fn new(group: &str, label: &str) -> Self {
        Self {
            group: group.to_string(),
            label: label.to_string(),
            points: vec![(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)],
        }
    }
}

impl Viewable for Curve {
    fn group(&self) -> &str {
        &self.group
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn dimensions(&self) -> Vec<Dimension> {
        vec![Dimension::new("x"), Dimension::new("y")]
    }

    fn dimension_values(&self, dimension: &str) -> Option<Vec<Value>> {
        let values = match dimension {
            "x" => self.points.iter().map(|&(x, _)| Value::Float(x)).collect(),
            "y" => self.points.iter().map(|&(_, y)| Value::Float(y)).collect(),
            _ => return None,
        };
        Some(values)
    }

    fn relabel(&self, group: Option<&str>, label: Option<&str>) -> Rc<dyn Viewable> {
        let mut curve = self.clone();
        if let Some(group) = group {
            curve.group = group.to_string();
        }
        if let Some(label) = label {
            curve.label = label.to_string();
        }
        Rc::new(curve)
    }

    fn select(&self, selection: &Selection) -> Rc<dyn Viewable> {
        let keep = |dimension: &str, value: f64| {
            selection
                .get(dimension)
                .is_none_or(|selector| selector.matches(&Value::Float(value)))
        };
        let points = self
            .points
            .iter()
            .copied()
            .filter(|&(x, y)| keep("x", x) && keep("y", y))
            .collect();
        Rc::new(Self {
            points,
            ..self.clone()
        })
    }
}

pub(crate) fn curve_element(group: &str, label: &str) -> Rc<dyn Viewable> {
    Rc::new(Curve::new(group, label))
}

pub(crate) fn curve(group: &str, label: &str) -> Item {
    Item::Element(curve_element(group, label))
}
