use serde::{Deserialize, Serialize};

use crate::map::source::TileSource;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayerError {
    #[error("no layer titled {0} in this group")]
    UnknownLayer(String),
    #[error("layer {0} appears more than once in the group")]
    DuplicateLayer(LayerTitle),
}

/// Human-readable layer titles, also used as the radio option values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LayerTitle {
    Standard,
    Humanitarian,
    NaturalEarth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub title: LayerTitle,
    pub source: TileSource,
    pub visible: bool,
}

/// An ordered set of layers switched as one unit. Titles are unique within a group.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGroup {
    layers: Vec<TileLayer>,
}

/// The visibility every layer of a group should have after a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityAssignment {
    pub selected: LayerTitle,
    pub visibility: Vec<(LayerTitle, bool)>,
}

impl LayerGroup {
    pub fn new(layers: Vec<TileLayer>) -> Result<Self, LayerError> {
        for (i, layer) in layers.iter().enumerate() {
            if layers[..i].iter().any(|other| other.title == layer.title) {
                return Err(LayerError::DuplicateLayer(layer.title));
            }
        }

        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    pub fn get(&self, title: LayerTitle) -> Option<&TileLayer> {
        self.layers.iter().find(|layer| layer.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = LayerTitle> + '_ {
        self.layers.iter().map(|layer| layer.title)
    }

    /// Writes an assignment back into the layer flags.
    pub fn apply(&mut self, assignment: &VisibilityAssignment) {
        for layer in &mut self.layers {
            if let Some((_, visible)) = assignment
                .visibility
                .iter()
                .find(|(title, _)| *title == layer.title)
            {
                layer.visible = *visible;
            }
        }
    }
}

/// Shows `selected` and hides every sibling. Does not touch the group; the caller
/// applies the result to both the group and the engine.
pub fn select_layer(
    group: &LayerGroup,
    selected: LayerTitle,
) -> Result<VisibilityAssignment, LayerError> {
    if group.get(selected).is_none() {
        return Err(LayerError::UnknownLayer(selected.to_string()));
    }

    Ok(VisibilityAssignment {
        selected,
        visibility: group
            .titles()
            .map(|title| (title, title == selected))
            .collect(),
    })
}
