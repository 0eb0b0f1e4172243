//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use montage::{
    Item,
    dimension::Dimension,
    element::{Selection, Viewable},
    value::Value,
};

/// A labelled one-dimensional series of integer samples.
#[derive(Debug, Clone)]
pub struct Series {
    group: String,
    label: String,
    samples: Vec<i64>,
}

impl Series {
    pub fn new(group: &str, label: &str) -> Self {
        Self {
            group: group.to_string(),
            label: label.to_string(),
            samples: (0..5).collect(),
        }
    }
}

impl Viewable for Series {
    fn group(&self) -> &str {
        &self.group
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn dimensions(&self) -> Vec<Dimension> {
        vec![Dimension::new("sample")]
    }

    fn dimension_values(&self, dimension: &str) -> Option<Vec<Value>> {
        (dimension == "sample").then(|| self.samples.iter().copied().map(Value::Int).collect())
    }

    fn relabel(&self, group: Option<&str>, label: Option<&str>) -> Rc<dyn Viewable> {
        Rc::new(Self {
            group: group.unwrap_or(&self.group).to_string(),
            label: label.unwrap_or(&self.label).to_string(),
            samples: self.samples.clone(),
        })
    }

    fn select(&self, selection: &Selection) -> Rc<dyn Viewable> {
        let samples = self
            .samples
            .iter()
            .copied()
            .filter(|&sample| {
                selection
                    .get("sample")
                    .is_none_or(|selector| selector.matches(&Value::Int(sample)))
            })
            .collect();
        Rc::new(Self {
            samples,
            ..self.clone()
        })
    }
}

pub fn series(group: &str, label: &str) -> Item {
    Item::element(Series::new(group, label))
}

pub fn paths(layout: &montage::Layout) -> Vec<String> {
    layout.paths().map(ToString::to_string).collect()
}
