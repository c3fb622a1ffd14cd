//! Fixed-capacity effect chain
//!
//! The chain always holds exactly [`SLOT_COUNT`] slots indexed `0..SLOT_COUNT`.
//! Slots never move; only their contents change. Processing runs in
//! ascending slot order, ahead of resampling and output volume.

use crate::effect::Effect;
use crate::error::{ChainError, Result};
use crate::slot::EffectSlot;
use serde::{Deserialize, Serialize};

/// Number of slots in the chain
pub const SLOT_COUNT: usize = 4;

/// Ordered chain of effect slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EffectSlot>", into = "Vec<EffectSlot>")]
pub struct EffectChain {
    slots: [EffectSlot; SLOT_COUNT],
}

impl EffectChain {
    /// Chain with every slot empty
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(EffectSlot::empty),
        }
    }

    /// Build a chain from a full snapshot.
    ///
    /// The snapshot must contain exactly `SLOT_COUNT` slots listed in index
    /// order. Partial snapshots are rejected as a whole.
    pub fn from_slots(slots: Vec<EffectSlot>) -> Result<Self> {
        if slots.len() != SLOT_COUNT {
            return Err(ChainError::SlotCount {
                expected: SLOT_COUNT,
                actual: slots.len(),
            });
        }
        if let Some((position, slot)) = slots
            .iter()
            .enumerate()
            .find(|(position, slot)| slot.index != *position)
        {
            return Err(ChainError::SlotIndexMismatch {
                position,
                index: slot.index,
            });
        }

        let slots: [EffectSlot; SLOT_COUNT] =
            slots.try_into().map_err(|rejected: Vec<EffectSlot>| ChainError::SlotCount {
                expected: SLOT_COUNT,
                actual: rejected.len(),
            })?;
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[EffectSlot] {
        &self.slots
    }

    pub fn to_vec(&self) -> Vec<EffectSlot> {
        self.slots.to_vec()
    }

    pub fn slot(&self, index: usize) -> Result<&EffectSlot> {
        self.slots.get(index).ok_or(ChainError::InvalidSlot(index))
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut EffectSlot> {
        self.slots
            .get_mut(index)
            .ok_or(ChainError::InvalidSlot(index))
    }

    /// Put an effect into a slot (replacing anything there) and enable it
    pub fn install(&mut self, index: usize, effect: Effect) -> Result<()> {
        let slot = self.slot_mut(index)?;
        slot.effect = Some(effect);
        slot.enabled = true;
        Ok(())
    }

    /// Empty a slot, returning the effect it held
    pub fn remove(&mut self, index: usize) -> Result<Option<Effect>> {
        let slot = self.slot_mut(index)?;
        slot.enabled = false;
        Ok(slot.effect.take())
    }

    /// Change the bypass flag of a populated slot. The payload is untouched.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        let slot = self.slot_mut(index)?;
        if slot.effect.is_none() {
            return Err(ChainError::EmptySlot(index));
        }
        slot.enabled = enabled;
        Ok(())
    }

    /// Replace the payload of a populated slot, keeping its enabled flag
    pub fn replace_effect(&mut self, index: usize, effect: Effect) -> Result<()> {
        let slot = self.slot_mut(index)?;
        match slot.effect.as_mut() {
            Some(current) if current.kind() != effect.kind() => {
                Err(ChainError::invalid_parameter(format!(
                    "Slot {} holds {}, not {}",
                    index,
                    current.kind(),
                    effect.kind()
                )))
            }
            Some(current) => {
                *current = effect;
                Ok(())
            }
            None => Err(ChainError::EmptySlot(index)),
        }
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        self.slots = std::array::from_fn(EffectSlot::empty);
    }

    pub fn populated_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0
    }

    /// Effects that take part in processing, in processing order
    pub fn active_effects(&self) -> impl Iterator<Item = (usize, &Effect)> {
        self.slots
            .iter()
            .filter(|slot| slot.enabled)
            .filter_map(|slot| slot.effect.as_ref().map(|effect| (slot.index, effect)))
    }

    /// Every populated effect in slot order, enabled or not
    pub fn effects(&self) -> Vec<Effect> {
        self.slots
            .iter()
            .filter_map(|slot| slot.effect.clone())
            .collect()
    }
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<EffectSlot>> for EffectChain {
    type Error = ChainError;

    fn try_from(slots: Vec<EffectSlot>) -> Result<Self> {
        Self::from_slots(slots)
    }
}

impl From<EffectChain> for Vec<EffectSlot> {
    fn from(chain: EffectChain) -> Self {
        chain.slots.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;
    use crate::settings::StereoSettings;

    #[test]
    fn new_chain_has_four_empty_slots() {
        let chain = EffectChain::new();
        assert_eq!(chain.slots().len(), SLOT_COUNT);
        for (i, slot) in chain.slots().iter().enumerate() {
            assert_eq!(slot.index, i);
            assert!(slot.is_empty());
        }
    }

    #[test]
    fn install_and_remove() {
        let mut chain = EffectChain::new();
        chain
            .install(2, EffectKind::Limiter.default_effect())
            .unwrap();
        assert_eq!(chain.populated_count(), 1);
        assert!(chain.slot(2).unwrap().enabled);

        let removed = chain.remove(2).unwrap();
        assert_eq!(removed, Some(EffectKind::Limiter.default_effect()));
        assert!(chain.is_empty());
        assert_eq!(chain.slots().len(), SLOT_COUNT);
    }

    #[test]
    fn out_of_range_slot_rejected() {
        let mut chain = EffectChain::new();
        let err = chain
            .install(4, EffectKind::Eq.default_effect())
            .unwrap_err();
        assert_eq!(err, ChainError::InvalidSlot(4));
        assert!(err.to_string().contains("0-3"));
    }

    #[test]
    fn toggle_requires_effect() {
        let mut chain = EffectChain::new();
        assert_eq!(chain.set_enabled(1, true), Err(ChainError::EmptySlot(1)));
        assert_eq!(
            chain.replace_effect(1, EffectKind::Eq.default_effect()),
            Err(ChainError::EmptySlot(1))
        );
    }

    #[test]
    fn replace_keeps_enabled_flag() {
        let mut chain = EffectChain::new();
        chain.install(0, EffectKind::Stereo.default_effect()).unwrap();
        chain.set_enabled(0, false).unwrap();
        let wide = Effect::Stereo {
            settings: StereoSettings::with_width(1.5),
        };
        chain.replace_effect(0, wide.clone()).unwrap();
        let slot = chain.slot(0).unwrap();
        assert!(!slot.enabled);
        assert_eq!(slot.effect, Some(wide));
    }

    #[test]
    fn replace_rejects_other_effect_type() {
        let mut chain = EffectChain::new();
        chain.install(0, EffectKind::Limiter.default_effect()).unwrap();
        let err = chain
            .replace_effect(0, EffectKind::Compressor.default_effect())
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidParameter(_)));
        assert_eq!(
            chain.slot(0).unwrap().effect,
            Some(EffectKind::Limiter.default_effect())
        );
    }

    #[test]
    fn active_effects_in_slot_order() {
        let mut chain = EffectChain::new();
        chain.install(3, EffectKind::Limiter.default_effect()).unwrap();
        chain.install(0, EffectKind::Eq.default_effect()).unwrap();
        chain.install(1, EffectKind::Compressor.default_effect()).unwrap();
        chain.set_enabled(1, false).unwrap();

        let order: Vec<usize> = chain.active_effects().map(|(i, _)| i).collect();
        assert_eq!(order, vec![0, 3]);
    }

    #[test]
    fn from_slots_rejects_partial_snapshot() {
        let slots = vec![EffectSlot::empty(0), EffectSlot::empty(1)];
        assert_eq!(
            EffectChain::from_slots(slots),
            Err(ChainError::SlotCount {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn from_slots_rejects_reordered_snapshot() {
        let slots = vec![
            EffectSlot::empty(1),
            EffectSlot::empty(0),
            EffectSlot::empty(2),
            EffectSlot::empty(3),
        ];
        assert!(matches!(
            EffectChain::from_slots(slots),
            Err(ChainError::SlotIndexMismatch { position: 0, index: 1 })
        ));
    }

    #[test]
    fn serializes_as_slot_array() {
        let json = serde_json::to_value(EffectChain::new()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(SLOT_COUNT));
        let back: EffectChain = serde_json::from_value(json).unwrap();
        assert_eq!(back, EffectChain::new());
    }
}
