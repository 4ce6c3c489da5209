//! Fit variable-aspect obstacle art onto uniform-width tiles
//!
//! The obstacle is a child of its tile, so its world size is
//! `footprint * local_scale * tile.scale`. We pick `local_scale` so the
//! world width matches the tile and the template aspect ratio survives.

use glam::Vec2;

use super::state::Tile;
use crate::catalog::ObstacleTemplate;

/// Result of a successful fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Scale to apply relative to the tile
    pub local_scale: Vec2,
    /// Final on-screen size
    pub world_size: Vec2,
}

/// Compute the tile-relative scale for `template` on `tile`.
///
/// Returns `None` (and logs) if the tile or template has no footprint.
pub fn fit(tile: &Tile, template: &ObstacleTemplate) -> Option<Fit> {
    let Some(tile_size) = tile.world_size() else {
        log::warn!("Tile {} has no visual footprint, skipping fit", tile.index);
        return None;
    };
    let Some(footprint) = template.footprint else {
        log::warn!("Obstacle '{}' has no visual footprint, skipping fit", template.name);
        return None;
    };
    fit_size(tile_size.x, tile.scale, footprint, template.baked_scale).or_else(|| {
        log::warn!(
            "Degenerate footprint for '{}' on tile {}, skipping fit",
            template.name,
            tile.index
        );
        None
    })
}

/// Scale a `footprint` with `baked_scale` to `target_width`, dividing out
/// the parent's `parent_scale`
pub fn fit_size(target_width: f32, parent_scale: Vec2, footprint: Vec2, baked_scale: Vec2) -> Option<Fit> {
    let native = footprint * baked_scale;
    if !(native.x > 0.0 && native.y > 0.0 && parent_scale.x != 0.0 && parent_scale.y != 0.0) {
        return None;
    }

    let factor = target_width / native.x;
    let world_size = native * factor;
    let local_scale = baked_scale * factor / parent_scale;
    Some(Fit {
        local_scale,
        world_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tile(width: f32, scale: Vec2) -> Tile {
        Tile::new(3, Vec2::ZERO, Vec2::new(width, 1.0), scale)
    }

    /// World size the engine would render with the fitted scale
    fn rendered(tile: &Tile, template: &ObstacleTemplate, fit: &Fit) -> Vec2 {
        template.footprint.unwrap() * fit.local_scale * tile.scale
    }

    #[test]
    fn test_wide_template() {
        let tile = tile(2.0, Vec2::ONE);
        let template = ObstacleTemplate::new("spikes", Vec2::new(128.0, 48.0));
        let fit = fit(&tile, &template).unwrap();
        assert!((fit.world_size.x - 2.0).abs() < 1e-5);
        assert!((fit.world_size.y - 0.75).abs() < 1e-5);
        assert_eq!(rendered(&tile, &template, &fit), fit.world_size);
    }

    #[test]
    fn test_parent_scale_divided_out() {
        let tile = tile(2.0, Vec2::new(4.0, 0.5));
        let template = ObstacleTemplate::new("crate", Vec2::new(64.0, 64.0));
        let fit = fit(&tile, &template).unwrap();
        let size = rendered(&tile, &template, &fit);
        assert!((size.x - 2.0).abs() < 1e-5);
        assert!((size.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_baked_scale_keeps_aspect() {
        let tile = tile(3.0, Vec2::ONE);
        let template = ObstacleTemplate::new("cactus", Vec2::new(40.0, 96.0))
            .with_baked_scale(Vec2::new(1.0, 1.25));
        let fit = fit(&tile, &template).unwrap();
        // 40 x 120 rendered natively
        assert!((fit.world_size.y / fit.world_size.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_missing_footprint() {
        let mut tile = tile(2.0, Vec2::ONE);
        let mut template = ObstacleTemplate::new("ghost", Vec2::new(10.0, 10.0));
        template.footprint = None;
        assert!(fit(&tile, &template).is_none());

        template.footprint = Some(Vec2::new(10.0, 10.0));
        tile.size = None;
        assert!(fit(&tile, &template).is_none());

        tile.size = Some(Vec2::ONE);
        template.footprint = Some(Vec2::new(0.0, 10.0));
        assert!(fit(&tile, &template).is_none());
    }

    proptest! {
        #[test]
        fn fit_matches_width_and_aspect(
            width in 0.1f32..50.0,
            fw in 1.0f32..512.0,
            fh in 1.0f32..512.0,
            bx in 0.25f32..4.0,
            by in 0.25f32..4.0,
            sx in 0.1f32..10.0,
            sy in 0.1f32..10.0,
        ) {
            let tile = tile(width, Vec2::new(sx, sy));
            let template = ObstacleTemplate::new("prop", Vec2::new(fw, fh))
                .with_baked_scale(Vec2::new(bx, by));
            let fit = fit(&tile, &template).unwrap();
            let size = rendered(&tile, &template, &fit);
            let aspect = (fh * by) / (fw * bx);
            prop_assert!((size.x - width).abs() <= width * 1e-3);
            prop_assert!(((size.y / size.x) - aspect).abs() <= aspect * 1e-3);
        }
    }
}
