//! Hit layers for filtering proximity tests
//!
//! Every hittable object sits on a layer and carries a mask of the layers it
//! reacts to. A test from A against B only proceeds when B's layer is in A's
//! mask; the reverse direction is decided separately.

use bitflags::bitflags;

bitflags! {
    /// Layer membership and reaction masks
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HitLayers: u32 {
        /// Player character
        const PLAYER = 1 << 0;
        /// Hostile characters
        const ENEMY = 1 << 1;
        /// Thrown or fired objects
        const PROJECTILE = 1 << 2;
        /// Static scenery
        const ENVIRONMENT = 1 << 3;
        /// Volumes that only report overlaps
        const TRIGGER = 1 << 4;
        /// Pickups and collectibles
        const PICKUP = 1 << 5;
    }
}

impl HitLayers {
    /// Whether an object with this mask reacts to `layer`
    pub fn reacts_to(self, layer: HitLayers) -> bool {
        self.intersects(layer)
    }

    /// Mutual filter: each side's layer is in the other's mask
    pub fn mutual(layer_a: HitLayers, mask_a: HitLayers, layer_b: HitLayers, mask_b: HitLayers) -> bool {
        mask_a.reacts_to(layer_b) && mask_b.reacts_to(layer_a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_way_interest_is_not_mutual() {
        let projectile_mask = HitLayers::ENEMY;
        let enemy_mask = HitLayers::PLAYER;

        assert!(projectile_mask.reacts_to(HitLayers::ENEMY));
        assert!(!HitLayers::mutual(
            HitLayers::PROJECTILE,
            projectile_mask,
            HitLayers::ENEMY,
            enemy_mask
        ));
    }

    #[test]
    fn combined_masks_react_to_each_member() {
        let mask = HitLayers::PLAYER | HitLayers::PROJECTILE;
        assert!(mask.reacts_to(HitLayers::PROJECTILE));
        assert!(!mask.reacts_to(HitLayers::PICKUP));
        assert!(HitLayers::all().reacts_to(HitLayers::TRIGGER));
        assert!(!HitLayers::empty().reacts_to(HitLayers::all()));
    }
}
