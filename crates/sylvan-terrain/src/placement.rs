//! Organism placement: cumulative weighted selection followed by a scarcity and
//! climate eligibility gate.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::biome::{BiomeDef, Template, WeightedOrganism};
use crate::rng::RandomSource;

/// Where a placement is being attempted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementSite {
    /// World-space anchor of the instance (x, surface height, z).
    pub position: DVec3,
    /// Elevation sample at the site.
    pub elevation: f64,
    /// Moisture sample at the site.
    pub moisture: f64,
}

/// An independent, transformed copy of an organism template.
#[derive(Clone, Debug)]
pub struct PlacedInstance<T> {
    /// The cloned template with rotation and scale already applied.
    pub instance: T,
    /// Name of the organism that was selected.
    pub organism: String,
    /// World-space anchor of the instance.
    pub position: DVec3,
    /// Uniform scale factor that was applied.
    pub scale: f64,
    /// Yaw that was applied, in radians, in `[0, TAU)`.
    pub rotation: f64,
}

/// Select an organism by cumulative weight.
///
/// Returns the first organism whose running weight total reaches `r`, or
/// `None` when the list is empty or its total is below `r`.
pub fn select_organism<T>(
    organisms: &[WeightedOrganism<T>],
    r: f64,
) -> Option<&WeightedOrganism<T>> {
    let mut cumulative = 0.0;
    organisms.iter().find(|o| {
        cumulative += o.weight;
        r <= cumulative
    })
}

/// Attempt to place one organism from `biome` at `site`.
///
/// Draw order: one selection draw; one scarcity draw unless the selected
/// organism's scarcity is 0; then, only if the gate passes, one scale draw and
/// one rotation draw. A selected organism that fails the gate yields `None`;
/// later organisms are not tried.
pub fn place<T: Template>(
    biome: &BiomeDef<T>,
    site: &PlacementSite,
    rng: &mut impl RandomSource,
) -> Option<PlacedInstance<T>> {
    let r = rng.next_f64();
    let organism = select_organism(&biome.organisms, r)?;

    let survives_scarcity = organism.scarcity == 0.0 || rng.next_f64() >= organism.scarcity;
    if !survives_scarcity || !organism.accepts_climate(site.elevation, site.moisture) {
        return None;
    }

    let scale = rng.range_f64(organism.scale.min, organism.scale.max);
    let rotation = rng.range_f64(0.0, TAU);

    let mut instance = T::clone(&organism.template);
    instance.rotate_y(rotation);
    instance.scale_uniform(scale);

    Some(PlacedInstance {
        instance,
        organism: organism.name.clone(),
        position: site.position,
        scale,
        rotation,
    })
}
