//! Material base-color sampling.

use crate::color::Rgb;
use crate::model::Material;

/// One color per material that declares a base-color factor.
pub fn sample_materials(materials: &[Material]) -> Vec<Rgb> {
    materials
        .iter()
        .filter_map(|material| {
            let color = material.base_color?;
            tracing::debug!(
                "Material '{}' base color: {}",
                material.name.as_deref().unwrap_or("Unnamed"),
                color
            );
            Some(color)
        })
        .collect()
}
